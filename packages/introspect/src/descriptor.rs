use crate::column::IntrospectedColumn;
use crate::error::{IntrospectError, IntrospectResult};
use crate::generated_key::GeneratedKey;
use crate::naming::{camel_case, is_blob_jdbc_type, java_type_for_jdbc, pascal_case};
use crate::table::{IntrospectedTable, TableName};
use mapgen_dom::JavaType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Table descriptor file format (`tables.json`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDescriptors {
    /// Package for record and example classes
    pub model_package: String,

    /// Package for mapper interfaces
    pub client_package: String,

    /// Package for mapper XML files (defaults to the client package)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_map_package: Option<String>,

    /// Delimit every column name in generated SQL
    #[serde(default)]
    pub delimit_identifiers: bool,

    pub tables: Vec<TableDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDescriptor {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Entity name; derived from the table name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_object_name: Option<String>,

    #[serde(default = "default_true")]
    pub enable_example: bool,

    #[serde(default)]
    pub select_all: bool,

    /// Generate a separate key class for composite keys
    #[serde(default)]
    pub primary_key_class: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_key: Option<GeneratedKeyDescriptor>,

    pub columns: Vec<ColumnDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedKeyDescriptor {
    pub column: String,

    /// Dialect shortcut (`MySql`, `JDBC`, ...) or a literal statement
    pub sql_statement: String,

    #[serde(default = "default_true")]
    pub identity: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    pub name: String,

    pub jdbc_type: String,

    #[serde(default)]
    pub primary_key: bool,

    /// Overrides the default JDBC → Java mapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_type: Option<String>,

    /// Overrides the camel-cased property name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,

    #[serde(default = "default_true")]
    pub nullable: bool,

    #[serde(default)]
    pub identity: bool,

    #[serde(default)]
    pub generated_always: bool,

    #[serde(default)]
    pub sequence: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_handler: Option<String>,

    #[serde(default)]
    pub delimited: bool,
}

fn default_true() -> bool {
    true
}

impl TableDescriptors {
    pub fn from_json(json: &str) -> IntrospectResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> IntrospectResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Resolve every descriptor into an introspected table, in file order
    pub fn resolve(&self) -> IntrospectResult<Vec<IntrospectedTable>> {
        let mut seen = HashSet::new();
        let mut tables = Vec::with_capacity(self.tables.len());

        for descriptor in &self.tables {
            let table = descriptor.resolve(self)?;
            if !seen.insert(table.key()) {
                return Err(IntrospectError::DuplicateTable(table.key()));
            }
            debug!(
                table = %table.key(),
                columns = table.columns.len(),
                key_class = table.generate_primary_key_class(),
                "resolved table"
            );
            tables.push(table);
        }

        Ok(tables)
    }
}

impl TableDescriptor {
    pub fn resolve(&self, defaults: &TableDescriptors) -> IntrospectResult<IntrospectedTable> {
        if self.columns.is_empty() {
            return Err(IntrospectError::InvalidTable {
                table: self.name.clone(),
                message: "no columns declared".to_string(),
            });
        }

        let domain = self
            .domain_object_name
            .clone()
            .unwrap_or_else(|| pascal_case(&self.name));
        let model_type = |suffix: &str| {
            JavaType::new(format!("{}.{}{}", defaults.model_package, domain, suffix))
        };

        let columns: Vec<IntrospectedColumn> = self
            .columns
            .iter()
            .map(|c| c.resolve(self.alias.as_deref(), defaults.delimit_identifiers))
            .collect();

        let generated_key = match &self.generated_key {
            Some(key) => {
                if !columns
                    .iter()
                    .any(|c| c.actual_column_name.eq_ignore_ascii_case(&key.column))
                {
                    return Err(IntrospectError::UnknownColumn {
                        table: self.name.clone(),
                        column: key.column.clone(),
                    });
                }
                Some(GeneratedKey::from_statement(
                    key.column.clone(),
                    &key.sql_statement,
                    key.identity,
                ))
            }
            None => None,
        };

        let key_columns = columns.iter().filter(|c| c.primary_key).count();
        let primary_key_type = if self.primary_key_class && key_columns > 1 {
            Some(model_type("Key"))
        } else {
            None
        };

        Ok(IntrospectedTable {
            name: TableName {
                catalog: self.catalog.clone(),
                schema: self.schema.clone(),
                table: self.name.clone(),
                alias: self.alias.clone(),
            },
            base_record_type: model_type(""),
            example_type: model_type("Example"),
            primary_key_type,
            mapper_type: JavaType::new(format!("{}.{}Mapper", defaults.client_package, domain)),
            xml_mapper_package: defaults
                .sql_map_package
                .clone()
                .unwrap_or_else(|| defaults.client_package.clone()),
            columns,
            generated_key,
            example_enabled: self.enable_example,
            select_all_enabled: self.select_all,
        })
    }
}

impl ColumnDescriptor {
    fn resolve(&self, table_alias: Option<&str>, delimit_all: bool) -> IntrospectedColumn {
        let java_type = match &self.java_type {
            Some(name) => JavaType::new(name.clone()),
            None => java_type_for_jdbc(&self.jdbc_type),
        };

        IntrospectedColumn {
            actual_column_name: self.name.clone(),
            java_property: self
                .property
                .clone()
                .unwrap_or_else(|| camel_case(&self.name)),
            jdbc_type_name: self.jdbc_type.to_ascii_uppercase(),
            java_type,
            primary_key: self.primary_key,
            identity: self.identity,
            generated_always: self.generated_always,
            sequence: self.sequence,
            nullable: self.nullable && !self.primary_key,
            blob: is_blob_jdbc_type(&self.jdbc_type),
            type_handler: self.type_handler.clone(),
            delimited: self.delimited || delimit_all,
            table_alias: table_alias.map(|a| a.to_string()),
        }
    }
}
