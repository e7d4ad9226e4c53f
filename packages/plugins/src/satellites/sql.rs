//! Fragments shared by the satellite statement templates.

use mapgen_dom::XmlElement;
use mapgen_introspect::{GeneratedKey, IntrospectedColumn, IntrospectedTable};

/// `<if test="_parameter != null"><include refid="..." /></if>`
pub(crate) fn where_include(refid: &str) -> XmlElement {
    XmlElement::new("if")
        .with_attribute("test", "_parameter != null")
        .with_child(XmlElement::new("include").with_attribute("refid", refid))
}

pub(crate) fn example_where(table: &IntrospectedTable) -> XmlElement {
    where_include(table.example_where_clause_id())
}

/// Where clause for statements whose example is passed as `@Param("example")`
pub(crate) fn update_example_where(table: &IntrospectedTable) -> XmlElement {
    where_include(table.update_by_example_where_clause_id())
}

pub(crate) fn distinct(prefix: &str) -> XmlElement {
    XmlElement::new("if")
        .with_attribute("test", format!("{}distinct", prefix))
        .with_text("distinct")
}

pub(crate) fn order_by(prefix: &str) -> XmlElement {
    XmlElement::new("if")
        .with_attribute("test", format!("{}orderByClause != null", prefix))
        .with_text(format!("order by ${{{}orderByClause}}", prefix))
}

/// `limit n` or `limit offset, n`, depending on which values are set
pub(crate) fn limit_offset(prefix: &str) -> XmlElement {
    let choose = XmlElement::new("choose")
        .with_child(
            XmlElement::new("when")
                .with_attribute("test", format!("{}offset != null", prefix))
                .with_text(format!("limit ${{{p}offset}}, ${{{p}limit}}", p = prefix)),
        )
        .with_child(
            XmlElement::new("otherwise").with_text(format!("limit ${{{}limit}}", prefix)),
        );

    XmlElement::new("if")
        .with_attribute("test", format!("{}limit != null", prefix))
        .with_child(choose)
}

/// How the primary key reaches a by-key statement
#[derive(Debug, Clone, Copy)]
pub(crate) enum KeyBinding<'a> {
    /// Key columns are properties of a parameter object (`record.id`)
    Properties(Option<&'a str>),
    /// The whole key is one named parameter (`@Param("id")`)
    Named(&'a str),
}

/// `where a = #{..}` followed by `  and b = #{..}` lines
pub(crate) fn key_predicate(table: &IntrospectedTable, binding: KeyBinding<'_>, aliased: bool) -> Vec<String> {
    let columns = table.primary_key_columns();
    let single = columns.len() == 1 && !table.generate_primary_key_class();

    columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let name = if aliased {
                column.aliased_escaped_column_name()
            } else {
                column.escaped_column_name()
            };
            let value = match binding {
                KeyBinding::Properties(prefix) => column.parameter_clause(prefix),
                KeyBinding::Named(param) if single => column.parameter_clause_for(param),
                KeyBinding::Named(param) => {
                    column.parameter_clause_for(&format!("{}.{}", param, column.java_property))
                }
            };
            let lead = if i == 0 { "where" } else { "  and" };
            format!("{} {} = {}", lead, name, value)
        })
        .collect()
}

/// The column holding the table's generated key, when both exist
pub(crate) fn generated_key(table: &IntrospectedTable) -> Option<(&GeneratedKey, &IntrospectedColumn)> {
    let key = table.generated_key.as_ref()?;
    let column = table.column(&key.column)?;
    Some((key, column))
}

/// `<selectKey>` for keys fetched by a statement
pub(crate) fn select_key(key: &GeneratedKey, column: &IntrospectedColumn, prefix: &str) -> XmlElement {
    XmlElement::new("selectKey")
        .with_attribute("resultType", column.java_type.full_name())
        .with_attribute("keyProperty", format!("{}{}", prefix, column.java_property))
        .with_attribute("order", key.order())
        .with_text(key.runtime_sql_statement.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapgen_introspect::TableDescriptors;

    fn tables() -> Vec<IntrospectedTable> {
        let json = r#"{
            "modelPackage": "m", "clientPackage": "c",
            "tables": [
                { "name": "user", "columns": [{ "name": "user_id", "jdbcType": "INTEGER", "primaryKey": true }] },
                { "name": "grant", "primaryKeyClass": true, "alias": "g", "columns": [
                    { "name": "user_id", "jdbcType": "INTEGER", "primaryKey": true },
                    { "name": "role_id", "jdbcType": "INTEGER", "primaryKey": true }
                ] }
            ]
        }"#;
        TableDescriptors::from_json(json).unwrap().resolve().unwrap()
    }

    #[test]
    fn test_key_predicate_named_single_column() {
        let tables = tables();
        let lines = key_predicate(&tables[0], KeyBinding::Named("id"), false);
        assert_eq!(lines, vec!["where user_id = #{id,jdbcType=INTEGER}"]);
    }

    #[test]
    fn test_key_predicate_key_class() {
        let tables = tables();
        let lines = key_predicate(&tables[1], KeyBinding::Named("id"), true);
        assert_eq!(
            lines,
            vec![
                "where g.user_id = #{id.userId,jdbcType=INTEGER}",
                "  and g.role_id = #{id.roleId,jdbcType=INTEGER}",
            ]
        );

        let lines = key_predicate(&tables[1], KeyBinding::Properties(Some("record.")), false);
        assert_eq!(lines[1], "  and role_id = #{record.roleId,jdbcType=INTEGER}");
    }

    #[test]
    fn test_limit_offset_clause() {
        let clause = limit_offset("example.");
        assert_eq!(clause.attribute("test"), Some("example.limit != null"));
        assert_eq!(
            clause.text_content(),
            "limit ${example.offset}, ${example.limit} limit ${example.limit}"
        );
    }
}
