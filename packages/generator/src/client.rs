use mapgen_dom::{Interface, JavaType, Method, Parameter};
use mapgen_introspect::IntrospectedTable;
use mapgen_plugins::generic::PARAM_ANNOTATION;
use mapgen_plugins::ClientMethodKind;

/// Whether the table gets a given standard method (and its statement)
pub fn applies(kind: ClientMethodKind, table: &IntrospectedTable) -> bool {
    if kind.requires_example() && !table.example_enabled {
        return false;
    }
    if kind.requires_primary_key() && !table.has_primary_key() {
        return false;
    }
    if kind.requires_blobs() && !table.has_blob_columns() {
        return false;
    }
    if kind == ClientMethodKind::SelectAll && !table.select_all_enabled {
        return false;
    }
    // the selective update alone covers tables whose only non-key columns are BLOBs
    if kind == ClientMethodKind::UpdateByPrimaryKeyWithoutBlobs && table.base_columns().iter().all(|c| c.primary_key) {
        return false;
    }
    true
}

/// Parameters identifying one row: the key object, or one per key column
fn key_parameters(table: &IntrospectedTable) -> Vec<Parameter> {
    if let Some(key_type) = &table.primary_key_type {
        return vec![Parameter::new(key_type.clone(), "key")];
    }

    let columns = table.primary_key_columns();
    let annotate = columns.len() > 1;
    columns
        .into_iter()
        .map(|c| {
            if annotate {
                Parameter::named(c.java_type.clone(), c.java_property.clone())
            } else {
                Parameter::new(c.java_type.clone(), c.java_property.clone())
            }
        })
        .collect()
}

/// Table-specific signature of a standard method, `None` when the table
/// does not get it
pub fn client_method(kind: ClientMethodKind, table: &IntrospectedTable) -> Option<Method> {
    if !applies(kind, table) {
        return None;
    }

    let record = table.base_record_type.clone();
    let example = table.example_type.clone();
    let records = JavaType::list_of(record.clone());
    let method = Method::new(kind.method_name());

    let method = match kind {
        ClientMethodKind::CountByExample => method
            .returning(JavaType::long())
            .with_parameter(Parameter::new(example, "example")),
        ClientMethodKind::DeleteByExample => method
            .returning(JavaType::int())
            .with_parameter(Parameter::new(example, "example")),
        ClientMethodKind::DeleteByPrimaryKey => {
            let mut method = method.returning(JavaType::int());
            method.parameters = key_parameters(table);
            method
        }
        ClientMethodKind::Insert | ClientMethodKind::InsertSelective => method
            .returning(JavaType::int())
            .with_parameter(Parameter::new(record, "record")),
        ClientMethodKind::SelectAll => method.returning(records),
        ClientMethodKind::SelectByExampleWithBlobs | ClientMethodKind::SelectByExampleWithoutBlobs => method
            .returning(records)
            .with_parameter(Parameter::new(example, "example")),
        ClientMethodKind::SelectByPrimaryKey => {
            let mut method = method.returning(record);
            method.parameters = key_parameters(table);
            method
        }
        ClientMethodKind::UpdateByExampleSelective
        | ClientMethodKind::UpdateByExampleWithBlobs
        | ClientMethodKind::UpdateByExampleWithoutBlobs => method
            .returning(JavaType::int())
            .with_parameter(Parameter::named(record, "record"))
            .with_parameter(Parameter::named(example, "example")),
        ClientMethodKind::UpdateByPrimaryKeySelective
        | ClientMethodKind::UpdateByPrimaryKeyWithBlobs
        | ClientMethodKind::UpdateByPrimaryKeyWithoutBlobs => method
            .returning(JavaType::int())
            .with_parameter(Parameter::new(record, "record")),
    };

    Some(method)
}

/// Empty mapper interface for a table
pub fn client_interface(table: &IntrospectedTable) -> Interface {
    Interface::new(table.mapper_type.clone())
}

/// Add a kept method along with the imports its signature needs
pub fn add_client_method(client: &mut Interface, method: Method) {
    client.imports.extend(method.signature_imports());
    if method.has_parameter_annotations() {
        client.add_import_name(PARAM_ANNOTATION);
    }
    client.add_method(method);
}
