use mapgen_dom::{Document, XmlElement};
use mapgen_introspect::{IntrospectedColumn, IntrospectedTable};
use mapgen_plugins::ClientMethodKind;

use crate::client::applies;

fn include(refid: &str) -> XmlElement {
    XmlElement::new("include").with_attribute("refid", refid)
}

fn where_include(refid: &str) -> XmlElement {
    XmlElement::new("if")
        .with_attribute("test", "_parameter != null")
        .with_child(include(refid))
}

fn result_mapping(tag: &str, column: &IntrospectedColumn) -> XmlElement {
    let mut element = XmlElement::new(tag)
        .with_attribute("column", column.actual_column_name.clone())
        .with_attribute("property", column.java_property.clone())
        .with_attribute("jdbcType", column.jdbc_type_name.clone());
    if let Some(handler) = &column.type_handler {
        element.add_attribute("typeHandler", handler.clone());
    }
    element
}

fn column_list(id: &str, columns: &[&IntrospectedColumn]) -> XmlElement {
    let names: Vec<String> = columns.iter().map(|c| c.aliased_escaped_column_name()).collect();
    XmlElement::new("sql")
        .with_attribute("id", id)
        .with_text(names.join(", "))
}

/// Criteria loop shared by both example where clauses
fn criteria_where(id: &str, collection: &str) -> XmlElement {
    let list_value = XmlElement::new("when")
        .with_attribute("test", "criterion.listValue")
        .with_text("and ${criterion.condition}")
        .with_child(
            XmlElement::new("foreach")
                .with_attribute("close", ")")
                .with_attribute("collection", "criterion.value")
                .with_attribute("item", "listItem")
                .with_attribute("open", "(")
                .with_attribute("separator", ",")
                .with_text("#{listItem}"),
        );

    let choose = XmlElement::new("choose")
        .with_child(
            XmlElement::new("when")
                .with_attribute("test", "criterion.noValue")
                .with_text("and ${criterion.condition}"),
        )
        .with_child(
            XmlElement::new("when")
                .with_attribute("test", "criterion.singleValue")
                .with_text("and ${criterion.condition} #{criterion.value}"),
        )
        .with_child(
            XmlElement::new("when")
                .with_attribute("test", "criterion.betweenValue")
                .with_text("and ${criterion.condition} #{criterion.value} and #{criterion.secondValue}"),
        )
        .with_child(list_value);

    let criteria = XmlElement::new("if")
        .with_attribute("test", "criteria.valid")
        .with_child(
            XmlElement::new("trim")
                .with_attribute("prefix", "(")
                .with_attribute("prefixOverrides", "and")
                .with_attribute("suffix", ")")
                .with_child(
                    XmlElement::new("foreach")
                        .with_attribute("collection", "criteria.criteria")
                        .with_attribute("item", "criterion")
                        .with_child(choose),
                ),
        );

    XmlElement::new("sql").with_attribute("id", id).with_child(
        XmlElement::new("where").with_child(
            XmlElement::new("foreach")
                .with_attribute("collection", collection)
                .with_attribute("item", "criteria")
                .with_attribute("separator", "or")
                .with_child(criteria),
        ),
    )
}

/// Mapper document holding the result maps and shared fragments; the
/// statements are appended by the pipeline after their hooks ran
pub fn base_document(table: &IntrospectedTable) -> Document {
    let mut document = Document::mapper(table.mapper_type.full_name());

    let mut base = XmlElement::new("resultMap")
        .with_attribute("id", table.base_result_map_id())
        .with_attribute("type", table.base_record_type.full_name());
    for column in table.base_columns() {
        let tag = if column.primary_key { "id" } else { "result" };
        base.add_child(result_mapping(tag, column));
    }
    document.root.add_child(base);

    if table.has_blob_columns() {
        let mut blobs = XmlElement::new("resultMap")
            .with_attribute("id", table.result_map_with_blobs_id())
            .with_attribute("extends", table.base_result_map_id())
            .with_attribute("type", table.base_record_type.full_name());
        for column in table.blob_columns() {
            blobs.add_child(result_mapping("result", column));
        }
        document.root.add_child(blobs);
    }

    if table.example_enabled {
        document
            .root
            .add_child(criteria_where(table.example_where_clause_id(), "oredCriteria"));
        document.root.add_child(criteria_where(
            table.update_by_example_where_clause_id(),
            "example.oredCriteria",
        ));
    }

    document
        .root
        .add_child(column_list(table.base_column_list_id(), &table.base_columns()));
    if table.has_blob_columns() {
        document
            .root
            .add_child(column_list(table.blob_column_list_id(), &table.blob_columns()));
    }

    document
}

/// `where a = #{a}` then `  and b = #{b}`, with an optional property prefix
fn key_predicate(table: &IntrospectedTable, prefix: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, column) in table.primary_key_columns().into_iter().enumerate() {
        let lead = if i == 0 { "where" } else { "  and" };
        lines.push(format!(
            "{} {} = {}",
            lead,
            column.escaped_column_name(),
            column.parameter_clause(prefix)
        ));
    }
    lines
}

fn key_parameter_type(table: &IntrospectedTable) -> String {
    match (&table.primary_key_type, table.id_type()) {
        (Some(key), _) => key.full_name().to_string(),
        (None, Some(id)) => id.full_name().to_string(),
        (None, None) => "map".to_string(),
    }
}

fn with_lines(mut element: XmlElement, lines: Vec<String>) -> XmlElement {
    for line in lines {
        element.add_text(line);
    }
    element
}

/// Columns written by insert and update statements
fn writable_columns(table: &IntrospectedTable) -> Vec<&IntrospectedColumn> {
    table.columns.iter().filter(|c| !c.generated_always).collect()
}

/// `col = #{prefix.prop}` assignments for updates, one per line
fn set_assignments(columns: &[&IntrospectedColumn], prefix: Option<&str>) -> Vec<String> {
    let count = columns.len();
    columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let separator = if i + 1 < count { "," } else { "" };
            format!("{} = {}{}", c.escaped_column_name(), c.parameter_clause(prefix), separator)
        })
        .collect()
}

fn selective_set(columns: &[&IntrospectedColumn], prefix: &str) -> XmlElement {
    let mut set = XmlElement::new("set");
    for column in columns {
        set.add_child(
            XmlElement::new("if")
                .with_attribute("test", format!("{}{} != null", prefix, column.java_property))
                .with_text(format!(
                    "{} = {},",
                    column.escaped_column_name(),
                    column.parameter_clause(Some(prefix))
                )),
        );
    }
    set
}

fn generated_key_column(table: &IntrospectedTable) -> Option<&IntrospectedColumn> {
    table.generated_key.as_ref().and_then(|key| table.column(&key.column))
}

fn insert_statement(kind: ClientMethodKind, table: &IntrospectedTable) -> XmlElement {
    let mut insert = XmlElement::new("insert")
        .with_attribute("id", kind.method_name())
        .with_attribute("parameterType", table.base_record_type.full_name());

    // identity keys are not written; the database fills them in
    let key_column = generated_key_column(table);
    if let (Some(key), Some(column)) = (&table.generated_key, key_column) {
        if key.jdbc_standard {
            insert.add_attribute("keyColumn", column.actual_column_name.clone());
            insert.add_attribute("keyProperty", column.java_property.clone());
            insert.add_attribute("useGeneratedKeys", "true");
        } else {
            insert.add_child(
                XmlElement::new("selectKey")
                    .with_attribute("keyProperty", column.java_property.clone())
                    .with_attribute("order", key.order())
                    .with_attribute("resultType", column.java_type.full_name())
                    .with_text(key.runtime_sql_statement.clone()),
            );
        }
    }

    let identity = |c: &IntrospectedColumn| {
        key_column.map_or(false, |k| k.actual_column_name == c.actual_column_name)
            && table.generated_key.as_ref().map_or(false, |k| k.identity)
    };
    let columns: Vec<&IntrospectedColumn> = writable_columns(table)
        .into_iter()
        .filter(|c| !identity(c))
        .collect();

    let table_name = table.fully_qualified_table_name_at_runtime();
    if kind == ClientMethodKind::Insert {
        let names: Vec<String> = columns.iter().map(|c| c.escaped_column_name()).collect();
        let values: Vec<String> = columns.iter().map(|c| c.parameter_clause(None)).collect();
        insert.add_text(format!("insert into {} ({})", table_name, names.join(", ")));
        insert.add_text(format!("values ({})", values.join(", ")));
        return insert;
    }

    let mut names = XmlElement::new("trim")
        .with_attribute("prefix", "(")
        .with_attribute("suffix", ")")
        .with_attribute("suffixOverrides", ",");
    let mut values = XmlElement::new("trim")
        .with_attribute("prefix", "values (")
        .with_attribute("suffix", ")")
        .with_attribute("suffixOverrides", ",");
    for column in &columns {
        let test = format!("{} != null", column.java_property);
        names.add_child(
            XmlElement::new("if")
                .with_attribute("test", test.clone())
                .with_text(format!("{},", column.escaped_column_name())),
        );
        values.add_child(
            XmlElement::new("if")
                .with_attribute("test", test)
                .with_text(format!("{},", column.parameter_clause(None))),
        );
    }

    insert.add_text(format!("insert into {}", table_name));
    insert.add_child(names);
    insert.add_child(values);
    insert
}

fn select_by_example(kind: ClientMethodKind, table: &IntrospectedTable) -> XmlElement {
    let blobs = kind == ClientMethodKind::SelectByExampleWithBlobs;
    let result_map = if blobs {
        table.result_map_with_blobs_id()
    } else {
        table.base_result_map_id()
    };

    let mut select = XmlElement::new("select")
        .with_attribute("id", kind.method_name())
        .with_attribute("parameterType", table.example_type.full_name())
        .with_attribute("resultMap", result_map)
        .with_text("select")
        .with_child(
            XmlElement::new("if")
                .with_attribute("test", "distinct")
                .with_text("distinct"),
        )
        .with_child(include(table.base_column_list_id()));
    if blobs {
        select.add_text(",");
        select.add_child(include(table.blob_column_list_id()));
    }
    select
        .with_text(format!("from {}", table.aliased_fully_qualified_table_name_at_runtime()))
        .with_child(where_include(table.example_where_clause_id()))
        .with_child(
            XmlElement::new("if")
                .with_attribute("test", "orderByClause != null")
                .with_text("order by ${orderByClause}"),
        )
}

fn update_by_example(kind: ClientMethodKind, table: &IntrospectedTable) -> XmlElement {
    let update = XmlElement::new("update")
        .with_attribute("id", kind.method_name())
        .with_attribute("parameterType", "map")
        .with_text(format!(
            "update {}",
            table.aliased_fully_qualified_table_name_at_runtime()
        ));

    let update = match kind {
        ClientMethodKind::UpdateByExampleSelective => {
            update.with_child(selective_set(&writable_columns(table), "record."))
        }
        _ => {
            let columns: Vec<&IntrospectedColumn> = writable_columns(table)
                .into_iter()
                .filter(|c| kind == ClientMethodKind::UpdateByExampleWithBlobs || !c.blob)
                .collect();
            let mut lines = set_assignments(&columns, Some("record."));
            if let Some(first) = lines.first_mut() {
                *first = format!("set {}", first);
            }
            with_lines(update, lines)
        }
    };

    update.with_child(where_include(table.update_by_example_where_clause_id()))
}

fn update_by_primary_key(kind: ClientMethodKind, table: &IntrospectedTable) -> XmlElement {
    let update = XmlElement::new("update")
        .with_attribute("id", kind.method_name())
        .with_attribute("parameterType", table.base_record_type.full_name())
        .with_text(format!("update {}", table.fully_qualified_table_name_at_runtime()));

    let columns: Vec<&IntrospectedColumn> = writable_columns(table)
        .into_iter()
        .filter(|c| !c.primary_key)
        .filter(|c| kind != ClientMethodKind::UpdateByPrimaryKeyWithoutBlobs || !c.blob)
        .collect();

    let update = if kind == ClientMethodKind::UpdateByPrimaryKeySelective {
        let mut set = XmlElement::new("set");
        for column in &columns {
            set.add_child(
                XmlElement::new("if")
                    .with_attribute("test", format!("{} != null", column.java_property))
                    .with_text(format!(
                        "{} = {},",
                        column.escaped_column_name(),
                        column.parameter_clause(None)
                    )),
            );
        }
        update.with_child(set)
    } else {
        let mut lines = set_assignments(&columns, None);
        if let Some(first) = lines.first_mut() {
            *first = format!("set {}", first);
        }
        with_lines(update, lines)
    };

    with_lines(update, key_predicate(table, None))
}

/// Statement backing a standard method, `None` when the table does not get it
pub fn statement(kind: ClientMethodKind, table: &IntrospectedTable) -> Option<XmlElement> {
    if !applies(kind, table) {
        return None;
    }

    let element = match kind {
        ClientMethodKind::CountByExample => XmlElement::new("select")
            .with_attribute("id", kind.method_name())
            .with_attribute("parameterType", table.example_type.full_name())
            .with_attribute("resultType", "java.lang.Long")
            .with_text(format!(
                "select count(*) from {}",
                table.aliased_fully_qualified_table_name_at_runtime()
            ))
            .with_child(where_include(table.example_where_clause_id())),
        ClientMethodKind::DeleteByExample => XmlElement::new("delete")
            .with_attribute("id", kind.method_name())
            .with_attribute("parameterType", table.example_type.full_name())
            .with_text(format!(
                "delete from {}",
                table.aliased_fully_qualified_table_name_at_runtime()
            ))
            .with_child(where_include(table.example_where_clause_id())),
        ClientMethodKind::DeleteByPrimaryKey => with_lines(
            XmlElement::new("delete")
                .with_attribute("id", kind.method_name())
                .with_attribute("parameterType", key_parameter_type(table))
                .with_text(format!("delete from {}", table.fully_qualified_table_name_at_runtime())),
            key_predicate(table, None),
        ),
        ClientMethodKind::Insert | ClientMethodKind::InsertSelective => insert_statement(kind, table),
        ClientMethodKind::SelectAll => XmlElement::new("select")
            .with_attribute("id", kind.method_name())
            .with_attribute("resultMap", table.base_result_map_id())
            .with_text("select")
            .with_child(include(table.base_column_list_id()))
            .with_text(format!(
                "from {}",
                table.aliased_fully_qualified_table_name_at_runtime()
            )),
        ClientMethodKind::SelectByExampleWithBlobs | ClientMethodKind::SelectByExampleWithoutBlobs => {
            select_by_example(kind, table)
        }
        ClientMethodKind::SelectByPrimaryKey => {
            let result_map = if table.has_blob_columns() {
                table.result_map_with_blobs_id()
            } else {
                table.base_result_map_id()
            };
            let mut select = XmlElement::new("select")
                .with_attribute("id", kind.method_name())
                .with_attribute("parameterType", key_parameter_type(table))
                .with_attribute("resultMap", result_map)
                .with_text("select")
                .with_child(include(table.base_column_list_id()));
            if table.has_blob_columns() {
                select.add_text(",");
                select.add_child(include(table.blob_column_list_id()));
            }
            with_lines(
                select.with_text(format!("from {}", table.fully_qualified_table_name_at_runtime())),
                key_predicate(table, None),
            )
        }
        ClientMethodKind::UpdateByExampleSelective
        | ClientMethodKind::UpdateByExampleWithBlobs
        | ClientMethodKind::UpdateByExampleWithoutBlobs => update_by_example(kind, table),
        ClientMethodKind::UpdateByPrimaryKeySelective
        | ClientMethodKind::UpdateByPrimaryKeyWithBlobs
        | ClientMethodKind::UpdateByPrimaryKeyWithoutBlobs => update_by_primary_key(kind, table),
    };

    Some(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapgen_introspect::TableDescriptors;

    fn tables() -> Vec<IntrospectedTable> {
        let json = r#"{ "modelPackage": "com.x.model", "clientPackage": "com.x.mapper",
            "tables": [
                { "name": "user",
                  "generatedKey": { "column": "id", "sqlStatement": "MySql" },
                  "columns": [
                    { "name": "id", "jdbcType": "INTEGER", "primaryKey": true },
                    { "name": "user_name", "jdbcType": "VARCHAR" },
                    { "name": "bio", "jdbcType": "LONGVARCHAR" }
                ] },
                { "name": "tag", "enableExample": false,
                  "generatedKey": { "column": "id", "sqlStatement": "JDBC" },
                  "columns": [
                    { "name": "id", "jdbcType": "BIGINT", "primaryKey": true },
                    { "name": "label", "jdbcType": "VARCHAR" }
                ] }
            ] }"#;
        TableDescriptors::from_json(json).unwrap().resolve().unwrap()
    }

    #[test]
    fn test_base_document_fragments() {
        let tables = tables();
        let document = base_document(&tables[0]);
        assert_eq!(
            document.statement_ids(),
            vec![
                "BaseResultMap",
                "ResultMapWithBLOBs",
                "Example_Where_Clause",
                "Update_By_Example_Where_Clause",
                "Base_Column_List",
                "Blob_Column_List",
            ]
        );
        assert_eq!(
            document.find_by_id("Base_Column_List").unwrap().text_content(),
            "id, user_name"
        );

        let document = base_document(&tables[1]);
        assert!(document.find_by_id("Example_Where_Clause").is_none());
    }

    #[test]
    fn test_insert_with_select_key() {
        let tables = tables();
        let insert = statement(ClientMethodKind::Insert, &tables[0]).unwrap();
        let key = insert.find_descendant("selectKey").unwrap();
        assert_eq!(key.attribute("order"), Some("AFTER"));
        assert_eq!(key.text_content(), "SELECT LAST_INSERT_ID()");
        // identity column is left to the database
        assert!(insert.text_content().contains("insert into user (user_name, bio)"));
    }

    #[test]
    fn test_insert_with_jdbc_key() {
        let tables = tables();
        let insert = statement(ClientMethodKind::InsertSelective, &tables[1]).unwrap();
        assert_eq!(insert.attribute("useGeneratedKeys"), Some("true"));
        assert_eq!(insert.attribute("keyProperty"), Some("id"));
        assert!(insert.find_descendant("selectKey").is_none());
    }

    #[test]
    fn test_by_key_statements() {
        let tables = tables();
        let select = statement(ClientMethodKind::SelectByPrimaryKey, &tables[0]).unwrap();
        assert_eq!(select.attribute("parameterType"), Some("java.lang.Integer"));
        assert_eq!(select.attribute("resultMap"), Some("ResultMapWithBLOBs"));
        assert!(select
            .text_content()
            .ends_with("where id = #{id,jdbcType=INTEGER}"));

        let update = statement(ClientMethodKind::UpdateByPrimaryKeyWithoutBlobs, &tables[0]).unwrap();
        let text = update.text_content();
        assert!(text.contains("set user_name = #{userName,jdbcType=VARCHAR}"));
        assert!(!text.contains("bio"));
    }

    #[test]
    fn test_example_statements_skipped_without_example() {
        let tables = tables();
        assert!(statement(ClientMethodKind::CountByExample, &tables[1]).is_none());
        assert!(statement(ClientMethodKind::SelectByExampleWithBlobs, &tables[1]).is_none());

        let select = statement(ClientMethodKind::SelectByExampleWithBlobs, &tables[0]).unwrap();
        assert!(select.find_descendant("include").is_some());
        assert_eq!(select.attribute("resultMap"), Some("ResultMapWithBLOBs"));
    }
}
