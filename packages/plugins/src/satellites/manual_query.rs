use super::sql::{self, KeyBinding};
use super::require_generic;
use crate::context::PluginContext;
use crate::error::PluginResult;
use crate::generic::ContributionHandle;
use crate::hooks::{ClientMethodKind, ClientStyle};
use crate::plugin::Plugin;
use crate::properties::PluginProperties;
use mapgen_dom::{
    Document, Field, Interface, JavaType, Method, Parameter, TopLevelClass, Visibility, XmlElement,
};
use mapgen_introspect::{IntrospectedColumn, IntrospectedTable};

const SELECT_MANUALLY_BY_EXAMPLE: &str = "selectManuallyByExample";
const SELECT_MANUALLY_BY_ID: &str = "selectManuallyById";
const UPDATE_MANUALLY_BY_EXAMPLE: &str = "updateManuallyByExample";
const UPDATE_MANUALLY_BY_ID: &str = "updateManuallyById";
const INSERT_OR_UPDATE_MANUALLY: &str = "insertOrUpdateManually";
const INSERT_SELECTIVE_OR_UPDATE_MANUALLY: &str = "insertSelectiveOrUpdateManually";

/// Hand-written select and update clauses plus limit/offset paging
///
/// Callers pass the select list or `set` clause as a string; the statements
/// splice it in verbatim. Example classes gain `limit`/`offset` members and
/// `selectByExample` honours them. With `upsert=true` two
/// `insert ... on duplicate key update` methods are added as well.
#[derive(Debug)]
pub struct ManualQueryPlugin {
    properties: PluginProperties,
    handle: Option<ContributionHandle>,
}

impl ManualQueryPlugin {
    pub const UPSERT: &'static str = "upsert";

    pub fn new(properties: PluginProperties) -> Self {
        Self {
            properties,
            handle: None,
        }
    }

    fn upsert(&self) -> bool {
        self.properties.is_true(Self::UPSERT)
    }

    fn contribute_methods(&self, handle: &ContributionHandle) {
        let string = JavaType::string;

        if let Some(example) = handle.example() {
            if !handle.has_contributed(SELECT_MANUALLY_BY_EXAMPLE) {
                handle.contribute(
                    Method::new(SELECT_MANUALLY_BY_EXAMPLE)
                        .returning(handle.model_list())
                        .with_parameter(Parameter::named(string(), "selectClause"))
                        .with_parameter(Parameter::named(example.clone(), "example")),
                );
            }
            if !handle.has_contributed(UPDATE_MANUALLY_BY_EXAMPLE) {
                handle.contribute(
                    Method::new(UPDATE_MANUALLY_BY_EXAMPLE)
                        .returning(JavaType::int())
                        .with_parameter(Parameter::named(string(), "updateClause"))
                        .with_parameter(Parameter::named(example, "example")),
                );
            }
        }

        if !handle.has_contributed(SELECT_MANUALLY_BY_ID) {
            handle.contribute(
                Method::new(SELECT_MANUALLY_BY_ID)
                    .returning(handle.model())
                    .with_parameter(Parameter::named(string(), "selectClause"))
                    .with_parameter(Parameter::named(handle.id(), "id")),
            );
        }
        if !handle.has_contributed(UPDATE_MANUALLY_BY_ID) {
            handle.contribute(
                Method::new(UPDATE_MANUALLY_BY_ID)
                    .returning(JavaType::int())
                    .with_parameter(Parameter::named(string(), "updateClause"))
                    .with_parameter(Parameter::named(handle.id(), "id")),
            );
        }

        if self.upsert() {
            for name in [INSERT_OR_UPDATE_MANUALLY, INSERT_SELECTIVE_OR_UPDATE_MANUALLY] {
                if !handle.has_contributed(name) {
                    handle.contribute(
                        Method::new(name)
                            .returning(JavaType::int())
                            .with_parameter(Parameter::named(handle.model(), "record"))
                            .with_parameter(Parameter::named(string(), "updateClause")),
                    );
                }
            }
        }
    }
}

fn select_by_example(table: &IntrospectedTable) -> XmlElement {
    XmlElement::new("select")
        .with_attribute("id", SELECT_MANUALLY_BY_EXAMPLE)
        .with_attribute("parameterType", "map")
        .with_attribute("resultMap", table.base_result_map_id())
        .with_text("select")
        .with_child(sql::distinct("example."))
        .with_text(format!(
            "${{selectClause}} from {}",
            table.aliased_fully_qualified_table_name_at_runtime()
        ))
        .with_child(sql::update_example_where(table))
        .with_child(sql::order_by("example."))
        .with_child(sql::limit_offset("example."))
}

fn select_by_id(table: &IntrospectedTable) -> XmlElement {
    let mut element = XmlElement::new("select")
        .with_attribute("id", SELECT_MANUALLY_BY_ID)
        .with_attribute("parameterType", "map")
        .with_attribute("resultMap", table.base_result_map_id())
        .with_text(format!(
            "select ${{selectClause}} from {}",
            table.aliased_fully_qualified_table_name_at_runtime()
        ));
    for line in sql::key_predicate(table, KeyBinding::Named("id"), true) {
        element.add_text(line);
    }
    element
}

fn update_by_example(table: &IntrospectedTable) -> XmlElement {
    XmlElement::new("update")
        .with_attribute("id", UPDATE_MANUALLY_BY_EXAMPLE)
        .with_attribute("parameterType", "map")
        .with_text(format!(
            "update {}",
            table.aliased_fully_qualified_table_name_at_runtime()
        ))
        .with_text("set ${updateClause}")
        .with_child(sql::update_example_where(table))
}

fn update_by_id(table: &IntrospectedTable) -> XmlElement {
    let mut element = XmlElement::new("update")
        .with_attribute("id", UPDATE_MANUALLY_BY_ID)
        .with_attribute("parameterType", "map")
        .with_text(format!("update {}", table.fully_qualified_table_name_at_runtime()))
        .with_text("set ${updateClause}");
    for line in sql::key_predicate(table, KeyBinding::Named("id"), false) {
        element.add_text(line);
    }
    element
}

/// Start an upsert statement, wiring up the generated key when the table
/// has one. Returns the suffix for the `on duplicate key update` clause.
fn upsert_head(id: &str, table: &IntrospectedTable) -> (XmlElement, String) {
    let mut element = XmlElement::new("insert")
        .with_attribute("id", id)
        .with_attribute("parameterType", "map");

    let suffix = match sql::generated_key(table) {
        Some((key, column)) => {
            if key.jdbc_standard {
                element.add_attribute("useGeneratedKeys", "true");
                element.add_attribute("keyProperty", format!("record.{}", column.java_property));
                element.add_attribute("keyColumn", column.actual_column_name.clone());
            } else {
                element.add_child(sql::select_key(key, column, "record."));
            }
            format!(
                ", {col} = last_insert_id({col})",
                col = column.actual_column_name
            )
        }
        None => String::new(),
    };

    (element, suffix)
}

fn insertable_columns(table: &IntrospectedTable) -> Vec<&IntrospectedColumn> {
    table
        .columns
        .iter()
        .filter(|c| !c.identity && !c.generated_always)
        .collect()
}

fn insert_or_update(table: &IntrospectedTable) -> XmlElement {
    let (mut element, suffix) = upsert_head(INSERT_OR_UPDATE_MANUALLY, table);
    let columns = insertable_columns(table);

    let names: Vec<String> = columns.iter().map(|c| c.escaped_column_name()).collect();
    let values: Vec<String> = columns
        .iter()
        .map(|c| c.parameter_clause(Some("record.")))
        .collect();

    element.add_text(format!(
        "insert into {} ({})",
        table.fully_qualified_table_name_at_runtime(),
        names.join(", ")
    ));
    element.add_text(format!("values ({})", values.join(", ")));
    element.add_text(format!("on duplicate key update ${{updateClause}}{}", suffix));
    element
}

fn insert_selective_or_update(table: &IntrospectedTable) -> XmlElement {
    let (mut element, suffix) = upsert_head(INSERT_SELECTIVE_OR_UPDATE_MANUALLY, table);
    element.add_text(format!(
        "insert into {}",
        table.fully_qualified_table_name_at_runtime()
    ));

    let trim = |prefix: &str| {
        XmlElement::new("trim")
            .with_attribute("prefix", prefix)
            .with_attribute("suffix", ")")
            .with_attribute("suffixOverrides", ",")
    };
    let mut columns = trim("(");
    let mut values = trim("values (");

    for column in insertable_columns(table) {
        let name = format!("{},", column.escaped_column_name());
        let value = format!("{},", column.parameter_clause(Some("record.")));

        // primitives and sequence values are always present
        if column.sequence || column.java_type.is_primitive() {
            columns.add_text(name);
            values.add_text(value);
            continue;
        }

        let test = format!("record.{} != null", column.java_property);
        columns.add_child(XmlElement::new("if").with_attribute("test", test.clone()).with_text(name));
        values.add_child(XmlElement::new("if").with_attribute("test", test).with_text(value));
    }

    element.add_child(columns);
    element.add_child(values);
    element.add_text(format!("on duplicate key update ${{updateClause}}{}", suffix));
    element
}

fn add_page_members(class: &mut TopLevelClass) {
    let int = JavaType::int();
    let integer = int.boxed();
    let this_type = JavaType::new(class.ty.full_name());

    class.add_field(Field::new("limit", integer.clone()).with_visibility(Visibility::Protected));
    class.add_field(Field::new("offset", integer.clone()).with_visibility(Visibility::Protected));

    class.add_method(
        Method::new("limit")
            .with_visibility(Visibility::Public)
            .returning(this_type.clone())
            .with_parameter(Parameter::new(int.clone(), "offset"))
            .with_parameter(Parameter::new(int.clone(), "limit"))
            .with_body_line("this.offset = offset;")
            .with_body_line("this.limit = limit;")
            .with_body_line("return this;"),
    );
    class.add_method(
        Method::new("limit")
            .with_visibility(Visibility::Public)
            .returning(this_type)
            .with_parameter(Parameter::new(int, "limit"))
            .with_body_line("this.limit = limit;")
            .with_body_line("return this;"),
    );

    for (property, getter, setter) in [
        ("limit", "getLimit", "setLimit"),
        ("offset", "getOffset", "setOffset"),
    ] {
        class.add_method(
            Method::new(getter)
                .with_visibility(Visibility::Public)
                .returning(integer.clone())
                .with_body_line(format!("return {};", property)),
        );
        class.add_method(
            Method::new(setter)
                .with_visibility(Visibility::Public)
                .with_parameter(Parameter::new(integer.clone(), property))
                .with_body_line(format!("this.{p} = {p};", p = property)),
        );
    }
}

impl Plugin for ManualQueryPlugin {
    fn name(&self) -> &'static str {
        "manual-query"
    }

    fn description(&self) -> &'static str {
        "Adds manual select/update methods and limit/offset paging"
    }

    fn validate(&mut self, ctx: &mut PluginContext) -> PluginResult<()> {
        self.handle = Some(require_generic(ctx, self.name(), false)?);
        Ok(())
    }

    fn model_example_class_generated(
        &mut self,
        class: &mut TopLevelClass,
        _table: &IntrospectedTable,
    ) -> bool {
        if self.handle.is_some() {
            add_page_members(class);
        }
        true
    }

    fn client_generated(
        &mut self,
        _client: &mut Interface,
        _style: ClientStyle,
        _table: &IntrospectedTable,
    ) -> bool {
        if let Some(handle) = &self.handle {
            self.contribute_methods(handle);
        }
        true
    }

    fn sql_map_element_generated(
        &mut self,
        kind: ClientMethodKind,
        element: &mut XmlElement,
        _table: &IntrospectedTable,
    ) -> bool {
        if self.handle.is_some()
            && matches!(
                kind,
                ClientMethodKind::SelectByExampleWithoutBlobs
                    | ClientMethodKind::SelectByExampleWithBlobs
            )
        {
            element.add_child(sql::limit_offset(""));
        }
        true
    }

    fn sql_map_document_generated(
        &mut self,
        document: &mut Document,
        table: &IntrospectedTable,
    ) -> bool {
        let handle = match &self.handle {
            Some(handle) => handle,
            None => return true,
        };
        let root = &mut document.root;

        if self.upsert() {
            root.add_child(insert_or_update(table));
            root.add_child(insert_selective_or_update(table));
        }
        if handle.example_enabled() && table.example_enabled {
            root.add_child(select_by_example(table));
        }
        if table.has_primary_key() {
            root.add_child(select_by_id(table));
        }
        if handle.example_enabled() && table.example_enabled {
            root.add_child(update_by_example(table));
        }
        if table.has_primary_key() {
            root.add_child(update_by_id(table));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generic::GenericInterface;
    use mapgen_introspect::TableDescriptors;

    fn table(generated_key: &str) -> IntrospectedTable {
        let json = format!(
            r#"{{ "modelPackage": "com.x.model", "clientPackage": "com.x.mapper",
                "tables": [{{ "name": "user", {} "columns": [
                    {{ "name": "id", "jdbcType": "INTEGER", "primaryKey": true, "identity": true }},
                    {{ "name": "name", "jdbcType": "VARCHAR" }},
                    {{ "name": "age", "jdbcType": "INTEGER", "javaType": "int" }}
                ] }}] }}"#,
            generated_key
        );
        TableDescriptors::from_json(&json).unwrap().resolve().unwrap().remove(0)
    }

    fn validated(example: bool, upsert: bool) -> (ManualQueryPlugin, ContributionHandle) {
        let mut ctx = PluginContext::new("src");
        let handle = ContributionHandle::new(GenericInterface::initialize("com.x.BaseMapper", example).unwrap());
        ctx.provide_generic(handle.clone()).unwrap();

        let props = PluginProperties::new().with("upsert", if upsert { "true" } else { "false" });
        let mut plugin = ManualQueryPlugin::new(props);
        plugin.validate(&mut ctx).expect("Failed to validate");
        (plugin, handle)
    }

    #[test]
    fn test_contributed_methods_follow_example_setting() {
        let table = table("");
        let mut client = Interface::new(table.mapper_type.clone());

        let (mut plugin, handle) = validated(true, false);
        plugin.client_generated(&mut client, ClientStyle::Interface, &table);
        plugin.client_generated(&mut client, ClientStyle::Class, &table);
        let mut names = handle.method_names();
        names.sort();
        assert_eq!(
            names,
            vec![
                "selectManuallyByExample",
                "selectManuallyById",
                "updateManuallyByExample",
                "updateManuallyById"
            ]
        );

        let (mut plugin, handle) = validated(false, true);
        plugin.client_generated(&mut client, ClientStyle::Interface, &table);
        let mut names = handle.method_names();
        names.sort();
        assert_eq!(
            names,
            vec![
                "insertOrUpdateManually",
                "insertSelectiveOrUpdateManually",
                "selectManuallyById",
                "updateManuallyById"
            ]
        );
    }

    #[test]
    fn test_example_class_gains_paging_members() {
        let table = table("");
        let (mut plugin, _) = validated(true, false);
        let mut class = TopLevelClass::new(table.example_type.clone());
        assert!(plugin.model_example_class_generated(&mut class, &table));

        assert_eq!(class.field("limit").unwrap().ty.to_string(), "Integer");
        assert_eq!(class.field("offset").unwrap().visibility, Visibility::Protected);
        let limits: Vec<_> = class.methods_named("limit").collect();
        assert_eq!(limits.len(), 2);
        assert_eq!(limits[0].body_lines[0], "this.offset = offset;");
        assert_eq!(limits[1].return_type.as_ref().unwrap().to_string(), "UserExample");
        assert!(class.methods_named("setOffset").next().is_some());
    }

    #[test]
    fn test_paging_accessors() {
        let table = table("");
        let (mut plugin, _) = validated(true, false);
        let mut class = TopLevelClass::new(table.example_type.clone());
        plugin.model_example_class_generated(&mut class, &table);

        let getter = class.methods_named("getLimit").next().unwrap();
        assert_eq!(getter.return_type.as_ref().unwrap().to_string(), "Integer");
        assert_eq!(getter.body_lines, vec!["return limit;"]);

        let setter = class.methods_named("setOffset").next().unwrap();
        assert_eq!(setter.parameters[0].name, "offset");
        assert_eq!(setter.body_lines, vec!["this.offset = offset;"]);

        assert!(class.methods_named("getOffset").next().is_some());
        assert!(class.methods_named("setLimit").next().is_some());
    }

    #[test]
    fn test_select_by_example_gets_limit_clause() {
        let table = table("");
        let (mut plugin, _) = validated(true, false);
        let mut select = XmlElement::new("select").with_attribute("id", "selectByExample");
        plugin.sql_map_element_generated(ClientMethodKind::SelectByExampleWithoutBlobs, &mut select, &table);

        let clause = select.elements().last().unwrap();
        assert_eq!(clause.attribute("test"), Some("limit != null"));
        assert_eq!(clause.text_content(), "limit ${offset}, ${limit} limit ${limit}");
    }

    #[test]
    fn test_upsert_without_generated_key() {
        let table = table("");
        let element = insert_or_update(&table);
        assert_eq!(element.attribute("useGeneratedKeys"), None);
        assert!(element.find_descendant("selectKey").is_none());
        assert_eq!(
            element.texts().collect::<Vec<_>>(),
            vec![
                "insert into user (name, age)",
                "values (#{record.name,jdbcType=VARCHAR}, #{record.age,jdbcType=INTEGER})",
                "on duplicate key update ${updateClause}",
            ]
        );
    }

    #[test]
    fn test_upsert_with_jdbc_key() {
        let table = table(r#""generatedKey": { "column": "id", "sqlStatement": "JDBC" },"#);
        let element = insert_or_update(&table);
        assert_eq!(element.attribute("useGeneratedKeys"), Some("true"));
        assert_eq!(element.attribute("keyProperty"), Some("record.id"));
        assert_eq!(element.attribute("keyColumn"), Some("id"));
        assert_eq!(
            element.texts().last(),
            Some("on duplicate key update ${updateClause}, id = last_insert_id(id)")
        );
    }

    #[test]
    fn test_selective_upsert_with_select_key() {
        let table = table(r#""generatedKey": { "column": "id", "sqlStatement": "MySql" },"#);
        let element = insert_selective_or_update(&table);

        let select_key = element.find_descendant("selectKey").unwrap();
        assert_eq!(select_key.attribute("keyProperty"), Some("record.id"));
        assert_eq!(select_key.attribute("order"), Some("AFTER"));
        assert_eq!(select_key.text_content(), "SELECT LAST_INSERT_ID()");

        let trims: Vec<_> = element.elements().filter(|e| e.name == "trim").collect();
        assert_eq!(trims.len(), 2);
        // `age` is a primitive and never wrapped in a null check
        assert_eq!(trims[0].texts().collect::<Vec<_>>(), vec!["age,"]);
        assert_eq!(trims[0].elements().count(), 1);
    }

    #[test]
    fn test_document_statements() {
        let table = table("");
        let (mut plugin, _) = validated(true, false);
        let mut document = Document::mapper("com.x.mapper.UserMapper");
        plugin.sql_map_document_generated(&mut document, &table);

        assert_eq!(
            document.statement_ids(),
            vec![
                "selectManuallyByExample",
                "selectManuallyById",
                "updateManuallyByExample",
                "updateManuallyById"
            ]
        );
        let by_id = document.find_by_id("selectManuallyById").unwrap();
        assert_eq!(
            by_id.texts().collect::<Vec<_>>(),
            vec![
                "select ${selectClause} from user",
                "where id = #{id,jdbcType=INTEGER}"
            ]
        );
        let by_example = document.find_by_id("selectManuallyByExample").unwrap();
        assert!(by_example.text_content().contains("limit ${example.offset}, ${example.limit}"));
    }
}
