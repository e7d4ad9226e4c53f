use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mapgen_generator::{GeneratorConfig, DEFAULT_CONFIG_NAME};
use mapgen_introspect::{ColumnDescriptor, TableDescriptor, TableDescriptors};
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: String,

    /// Fully qualified name of the shared generic mapper interface
    #[arg(short, long, default_value = "com.example.mapper.BaseMapper")]
    pub interface: String,

    /// Generate the generic interface without the example type parameter
    #[arg(long)]
    pub no_example: bool,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let project_dir = cwd.join(&args.path);
    fs::create_dir_all(&project_dir)?;
    let config_path = project_dir.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing mapgen project...".bright_blue().bold());

    let mut config = GeneratorConfig::default();
    for plugin in config.plugins.iter_mut().filter(|p| p.kind == "generic-interface") {
        plugin.properties.set("interface", args.interface.clone());
        plugin.properties.set("example", (!args.no_example).to_string());
    }

    let tables_path = config.tables_path(&project_dir);
    if !tables_path.exists() {
        let tables = example_tables(&args.interface);
        fs::write(&tables_path, serde_json::to_string_pretty(&tables)?)?;
        println!("  {} Created {}", "✓".green(), config.tables);
    }

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Describe your tables in {}", config.tables);
    println!("  2. Run: mapgen generate");
    println!("  3. Check output in {}/", config.target_project);

    Ok(())
}

fn column(name: &str, jdbc_type: &str, primary_key: bool) -> ColumnDescriptor {
    ColumnDescriptor {
        name: name.to_string(),
        jdbc_type: jdbc_type.to_string(),
        primary_key,
        java_type: None,
        property: None,
        nullable: !primary_key,
        identity: false,
        generated_always: false,
        sequence: false,
        type_handler: None,
        delimited: false,
    }
}

/// A one-table descriptor file in the interface's base package
fn example_tables(interface: &str) -> TableDescriptors {
    let base_package = interface
        .rsplit_once('.')
        .map(|(package, _)| package.rsplit_once('.').map_or(package, |(base, _)| base))
        .unwrap_or("com.example");

    TableDescriptors {
        model_package: format!("{}.model", base_package),
        client_package: format!("{}.mapper", base_package),
        sql_map_package: None,
        delimit_identifiers: false,
        tables: vec![TableDescriptor {
            name: "user".to_string(),
            catalog: None,
            schema: None,
            alias: None,
            domain_object_name: None,
            enable_example: true,
            select_all: false,
            primary_key_class: false,
            generated_key: None,
            columns: vec![
                column("id", "INTEGER", true),
                column("user_name", "VARCHAR", false),
                column("created_at", "TIMESTAMP", false),
            ],
        }],
    }
}
