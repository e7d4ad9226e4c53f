use super::{require_generic, sql};
use crate::context::PluginContext;
use crate::error::PluginResult;
use crate::generic::ContributionHandle;
use crate::hooks::ClientStyle;
use crate::plugin::Plugin;
use mapgen_dom::{Document, Interface, Method, Parameter, XmlElement};
use mapgen_introspect::IntrospectedTable;

const SELECT_ONE_BY_EXAMPLE: &str = "selectOneByExample";

/// Adds `T selectOneByExample(E example)`, always limited to one row
#[derive(Debug, Default)]
pub struct SelectOneByExamplePlugin {
    handle: Option<ContributionHandle>,
}

impl SelectOneByExamplePlugin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Plugin for SelectOneByExamplePlugin {
    fn name(&self) -> &'static str {
        "select-one-by-example"
    }

    fn description(&self) -> &'static str {
        "Adds selectOneByExample to the generic interface"
    }

    fn validate(&mut self, ctx: &mut PluginContext) -> PluginResult<()> {
        self.handle = Some(require_generic(ctx, self.name(), true)?);
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
        if handle.has_contributed(SELECT_ONE_BY_EXAMPLE) {
            return true;
        }
        if let Some(example) = handle.example() {
            handle.contribute(
                Method::new(SELECT_ONE_BY_EXAMPLE)
                    .returning(handle.model())
                    .with_parameter(Parameter::new(example, "example")),
            );
        }
        true
    }

    fn sql_map_document_generated(
        &mut self,
        document: &mut Document,
        table: &IntrospectedTable,
    ) -> bool {
        if self.handle.is_none() || !table.example_enabled {
            return true;
        }

        let element = XmlElement::new("select")
            .with_attribute("id", SELECT_ONE_BY_EXAMPLE)
            .with_attribute("parameterType", table.example_type.full_name())
            .with_attribute("resultMap", table.base_result_map_id())
            .with_text("select")
            .with_child(sql::distinct(""))
            .with_child(XmlElement::new("include").with_attribute("refid", table.base_column_list_id()))
            .with_text(format!(
                "from {}",
                table.aliased_fully_qualified_table_name_at_runtime()
            ))
            .with_child(sql::example_where(table))
            .with_child(sql::order_by(""))
            .with_text("limit 1");
        document.root.add_child(element);
        true
    }
}
