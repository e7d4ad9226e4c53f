use crate::column::IntrospectedColumn;
use crate::generated_key::GeneratedKey;
use mapgen_dom::JavaType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableName {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub table: String,
    pub alias: Option<String>,
}

impl TableName {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            catalog: None,
            schema: None,
            table: table.into(),
            alias: None,
        }
    }

    /// `catalog.schema.table`, skipping absent parts
    pub fn fully_qualified(&self) -> String {
        let mut parts = Vec::new();
        if let Some(catalog) = &self.catalog {
            parts.push(catalog.as_str());
        }
        if let Some(schema) = &self.schema {
            parts.push(schema.as_str());
        }
        parts.push(self.table.as_str());
        parts.join(".")
    }
}

/// Everything the plugins may read about one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrospectedTable {
    pub name: TableName,
    pub base_record_type: JavaType,
    pub example_type: JavaType,
    /// Composite key class, when one is generated
    pub primary_key_type: Option<JavaType>,
    pub mapper_type: JavaType,
    pub xml_mapper_package: String,
    pub columns: Vec<IntrospectedColumn>,
    pub generated_key: Option<GeneratedKey>,
    pub example_enabled: bool,
    pub select_all_enabled: bool,
}

impl IntrospectedTable {
    /// Stable identity of the table within one run
    pub fn key(&self) -> String {
        self.name.fully_qualified()
    }

    pub fn fully_qualified_table_name_at_runtime(&self) -> String {
        self.name.fully_qualified()
    }

    /// Runtime name followed by the alias, e.g. `shop.order o`
    pub fn aliased_fully_qualified_table_name_at_runtime(&self) -> String {
        match &self.name.alias {
            Some(alias) => format!("{} {}", self.name.fully_qualified(), alias),
            None => self.name.fully_qualified(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&IntrospectedColumn> {
        self.columns
            .iter()
            .find(|c| c.actual_column_name.eq_ignore_ascii_case(name))
    }

    pub fn primary_key_columns(&self) -> Vec<&IntrospectedColumn> {
        self.columns.iter().filter(|c| c.primary_key).collect()
    }

    pub fn non_primary_key_columns(&self) -> Vec<&IntrospectedColumn> {
        self.columns.iter().filter(|c| !c.primary_key).collect()
    }

    /// Non-BLOB columns
    pub fn base_columns(&self) -> Vec<&IntrospectedColumn> {
        self.columns.iter().filter(|c| !c.blob).collect()
    }

    pub fn blob_columns(&self) -> Vec<&IntrospectedColumn> {
        self.columns.iter().filter(|c| c.blob).collect()
    }

    pub fn has_blob_columns(&self) -> bool {
        self.columns.iter().any(|c| c.blob)
    }

    pub fn has_primary_key(&self) -> bool {
        self.columns.iter().any(|c| c.primary_key)
    }

    pub fn generate_primary_key_class(&self) -> bool {
        self.primary_key_type.is_some()
    }

    /// Type of the by-primary-key parameter: the key class, or the single key
    /// column's type. Tables with a composite key and no key class have none.
    pub fn id_type(&self) -> Option<JavaType> {
        if let Some(key) = &self.primary_key_type {
            return Some(key.clone());
        }
        match self.primary_key_columns().as_slice() {
            [single] => Some(single.java_type.boxed()),
            _ => None,
        }
    }

    pub fn base_result_map_id(&self) -> &'static str {
        "BaseResultMap"
    }

    pub fn result_map_with_blobs_id(&self) -> &'static str {
        "ResultMapWithBLOBs"
    }

    pub fn base_column_list_id(&self) -> &'static str {
        "Base_Column_List"
    }

    pub fn blob_column_list_id(&self) -> &'static str {
        "Blob_Column_List"
    }

    pub fn example_where_clause_id(&self) -> &'static str {
        "Example_Where_Clause"
    }

    pub fn update_by_example_where_clause_id(&self) -> &'static str {
        "Update_By_Example_Where_Clause"
    }

    pub fn xml_mapper_file_name(&self) -> String {
        format!("{}.xml", self.mapper_type.short_name())
    }
}
