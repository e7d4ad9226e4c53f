use crate::plugin::Plugin;
use crate::properties::PluginProperties;
use mapgen_dom::{Document, XmlElement};
use mapgen_introspect::IntrospectedTable;

const DYNAMIC_COLUMN_LIST: &str = "Dynamic_Column_List";
const TABLE_DYNAMIC_COLUMN_LIST: &str = "Table_Dynamic_Column_List";
const TABLE_ALIAS_DYNAMIC_COLUMN_LIST: &str = "Table_Alias_Dynamic_Column_List";

/// Column lists qualified by a table alias chosen at the call site
///
/// Meant for joins: `<include refid="Dynamic_Column_List"><property
/// name="tb" value="u" /></include>` expands to `u.id as u_id, ...`.
#[derive(Debug)]
pub struct DynamicColumnsPlugin {
    table_property: String,
    alias_prefix: String,
}

impl DynamicColumnsPlugin {
    pub const TABLE_PROPERTY: &'static str = "tableProperty";
    pub const ALIAS_PREFIX: &'static str = "aliasPrefix";

    pub fn new(properties: PluginProperties) -> Self {
        Self {
            table_property: properties
                .get_non_empty(Self::TABLE_PROPERTY)
                .unwrap_or("tb")
                .to_string(),
            alias_prefix: properties
                .get_non_empty(Self::ALIAS_PREFIX)
                .unwrap_or("pfx")
                .to_string(),
        }
    }

    fn fragment(
        &self,
        id: &str,
        table: &IntrospectedTable,
        column: impl Fn(&str, &str) -> String,
    ) -> XmlElement {
        let columns: Vec<String> = table
            .columns
            .iter()
            .map(|c| column(&self.table_property, &c.actual_column_name))
            .collect();
        XmlElement::new("sql")
            .with_attribute("id", id)
            .with_text(columns.join(", "))
    }
}

impl Plugin for DynamicColumnsPlugin {
    fn name(&self) -> &'static str {
        "dynamic-columns"
    }

    fn description(&self) -> &'static str {
        "Adds column list fragments qualified by a caller supplied table alias"
    }

    fn sql_map_document_generated(
        &mut self,
        document: &mut Document,
        table: &IntrospectedTable,
    ) -> bool {
        let full = self.fragment(DYNAMIC_COLUMN_LIST, table, |tb, col| {
            format!("${{{tb}}}.{col} as ${{{tb}}}_{col}", tb = tb, col = col)
        });
        let one_to_one = self.fragment(TABLE_DYNAMIC_COLUMN_LIST, table, |tb, col| {
            format!("${{{tb}}}.{col} as {col}", tb = tb, col = col)
        });
        let prefix = self.alias_prefix.clone();
        let aliased = self.fragment(TABLE_ALIAS_DYNAMIC_COLUMN_LIST, table, move |tb, col| {
            format!("${{{tb}}}.{col} as ${{{pfx}}}_{col}", tb = tb, pfx = prefix, col = col)
        });

        document.root.add_child(full);
        document.root.add_child(one_to_one);
        document.root.add_child(aliased);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapgen_introspect::TableDescriptors;

    #[test]
    fn test_fragments() {
        let json = r#"{ "modelPackage": "m", "clientPackage": "c",
            "tables": [{ "name": "order", "columns": [
                { "name": "id", "jdbcType": "INTEGER", "primaryKey": true },
                { "name": "user_id", "jdbcType": "INTEGER" }
            ] }] }"#;
        let table = TableDescriptors::from_json(json).unwrap().resolve().unwrap().remove(0);

        let mut plugin = DynamicColumnsPlugin::new(PluginProperties::new());
        let mut document = Document::mapper("c.OrderMapper");
        plugin.sql_map_document_generated(&mut document, &table);

        assert_eq!(
            document.find_by_id("Dynamic_Column_List").unwrap().text_content(),
            "${tb}.id as ${tb}_id, ${tb}.user_id as ${tb}_user_id"
        );
        assert_eq!(
            document.find_by_id("Table_Dynamic_Column_List").unwrap().text_content(),
            "${tb}.id as id, ${tb}.user_id as user_id"
        );
        assert_eq!(
            document.find_by_id("Table_Alias_Dynamic_Column_List").unwrap().text_content(),
            "${tb}.id as ${pfx}_id, ${tb}.user_id as ${pfx}_user_id"
        );
    }
}
