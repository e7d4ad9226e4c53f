use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mapgen_generator::{Generator, GeneratorConfig};
use mapgen_introspect::{IntrospectedTable, TableDescriptors};
use mapgen_plugins::{PluginConfig, PluginProperties};

fn schema(table_count: usize) -> Vec<IntrospectedTable> {
    let tables: Vec<String> = (0..table_count)
        .map(|i| {
            format!(
                r#"{{ "name": "table_{i}", "columns": [
                    {{ "name": "id", "jdbcType": "BIGINT", "primaryKey": true }},
                    {{ "name": "owner_id", "jdbcType": "INTEGER" }},
                    {{ "name": "title", "jdbcType": "VARCHAR" }},
                    {{ "name": "body", "jdbcType": "LONGVARCHAR" }},
                    {{ "name": "created_at", "jdbcType": "TIMESTAMP" }}
                ] }}"#
            )
        })
        .collect();
    let json = format!(
        r#"{{ "modelPackage": "com.bench.model", "clientPackage": "com.bench.mapper", "tables": [{}] }}"#,
        tables.join(",")
    );
    TableDescriptors::from_json(&json).unwrap().resolve().unwrap()
}

fn config() -> GeneratorConfig {
    let none = PluginProperties::new;
    GeneratorConfig {
        plugins: vec![
            PluginConfig::new(
                "generic-interface",
                PluginProperties::new()
                    .with("interface", "com.bench.mapper.BaseMapper")
                    .with("example", "true"),
            ),
            PluginConfig::new("exist-by-example", none()),
            PluginConfig::new("select-one-by-example", none()),
            PluginConfig::new("update-select-null", none()),
            PluginConfig::new("manual-query", PluginProperties::new().with("upsert", "true")),
        ],
        ..GeneratorConfig::default()
    }
}

fn generate_small_schema(c: &mut Criterion) {
    let tables = schema(5);
    let config = config();

    c.bench_function("generate_5_tables", |b| {
        b.iter(|| {
            let generator = Generator::new(&config).unwrap();
            generator.run(black_box(tables.clone()))
        })
    });
}

fn generate_large_schema(c: &mut Criterion) {
    let tables = schema(200);
    let config = config();

    c.bench_function("generate_200_tables", |b| {
        b.iter(|| {
            let generator = Generator::new(&config).unwrap();
            generator.run(black_box(tables.clone()))
        })
    });
}

criterion_group!(benches, generate_small_schema, generate_large_schema);
criterion_main!(benches);
