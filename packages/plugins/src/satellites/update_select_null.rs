use super::{require_generic, sql};
use crate::context::PluginContext;
use crate::error::PluginResult;
use crate::generic::ContributionHandle;
use crate::hooks::ClientStyle;
use crate::plugin::Plugin;
use mapgen_dom::{Document, Interface, JavaType, Method, Parameter, XmlElement};
use mapgen_introspect::IntrospectedTable;
use super::sql::KeyBinding;

const UPDATE_BY_ID_SELECT_NULL: &str = "updateByIdSelectNull";

/// Adds `int updateByIdSelectNull(T record, String updateNullClause)`
///
/// Works like the selective update but appends a caller supplied clause, so
/// columns can be set to `null` explicitly.
#[derive(Debug, Default)]
pub struct UpdateSelectNullPlugin {
    handle: Option<ContributionHandle>,
}

impl UpdateSelectNullPlugin {
    pub fn new() -> Self {
        Self::default()
    }
}

fn update_element(table: &IntrospectedTable) -> XmlElement {
    let mut set = XmlElement::new("set");
    for column in table.non_primary_key_columns() {
        if column.generated_always {
            continue;
        }
        set.add_child(
            XmlElement::new("if")
                .with_attribute("test", format!("record.{} != null", column.java_property))
                .with_text(format!(
                    "{} = {},",
                    column.escaped_column_name(),
                    column.parameter_clause(Some("record."))
                )),
        );
    }
    set.add_text("${updateNullClause}");

    let mut element = XmlElement::new("update")
        .with_attribute("id", UPDATE_BY_ID_SELECT_NULL)
        .with_attribute("parameterType", "map")
        .with_text(format!("update {}", table.fully_qualified_table_name_at_runtime()))
        .with_child(set);
    for line in sql::key_predicate(table, KeyBinding::Properties(Some("record.")), false) {
        element.add_text(line);
    }
    element
}

impl Plugin for UpdateSelectNullPlugin {
    fn name(&self) -> &'static str {
        "update-select-null"
    }

    fn description(&self) -> &'static str {
        "Adds updateByIdSelectNull to the generic interface"
    }

    fn validate(&mut self, ctx: &mut PluginContext) -> PluginResult<()> {
        self.handle = Some(require_generic(ctx, self.name(), false)?);
        Ok(())
    }

    fn client_generated(
        &mut self,
        _client: &mut Interface,
        _style: ClientStyle,
        _table: &IntrospectedTable,
    ) -> bool {
        let handle = match &self.handle {
            Some(handle) => handle,
            None => return true,
        };
        if !handle.has_contributed(UPDATE_BY_ID_SELECT_NULL) {
            handle.contribute(
                Method::new(UPDATE_BY_ID_SELECT_NULL)
                    .returning(JavaType::int())
                    .with_parameter(Parameter::named(handle.model(), "record"))
                    .with_parameter(Parameter::named(JavaType::string(), "updateNullClause")),
            );
        }
        true
    }

    fn sql_map_document_generated(
        &mut self,
        document: &mut Document,
        table: &IntrospectedTable,
    ) -> bool {
        if self.handle.is_some() && table.has_primary_key() {
            document.root.add_child(update_element(table));
        }
        true
    }
}
