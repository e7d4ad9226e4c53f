use super::{require_generic, sql};
use crate::context::PluginContext;
use crate::error::PluginResult;
use crate::generic::ContributionHandle;
use crate::hooks::ClientStyle;
use crate::plugin::Plugin;
use mapgen_dom::{Document, Interface, JavaType, Method, Parameter, XmlElement};
use mapgen_introspect::IntrospectedTable;

const EXIST_BY_EXAMPLE: &str = "existByExample";

/// Adds `boolean existByExample(E example)`
#[derive(Debug, Default)]
pub struct ExistByExamplePlugin {
    handle: Option<ContributionHandle>,
}

impl ExistByExamplePlugin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Plugin for ExistByExamplePlugin {
    fn name(&self) -> &'static str {
        "exist-by-example"
    }

    fn description(&self) -> &'static str {
        "Adds existByExample to the generic interface"
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
        if handle.has_contributed(EXIST_BY_EXAMPLE) {
            return true;
        }
        if let Some(example) = handle.example() {
            handle.contribute(
                Method::new(EXIST_BY_EXAMPLE)
                    .returning(JavaType::boolean())
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
            .with_attribute("id", EXIST_BY_EXAMPLE)
            .with_attribute("parameterType", table.example_type.full_name())
            .with_attribute("resultType", "boolean")
            .with_text("select count(*) > 0")
            .with_text(format!(
                "from {}",
                table.aliased_fully_qualified_table_name_at_runtime()
            ))
            .with_child(sql::example_where(table));
        document.root.add_child(element);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PluginError;
    use crate::generic::GenericInterface;

    #[test]
    fn test_requires_generic_interface() {
        let mut plugin = ExistByExamplePlugin::new();
        let err = plugin.validate(&mut PluginContext::new("src")).unwrap_err();
        assert_eq!(
            err,
            PluginError::Dependency {
                plugin: "exist-by-example".to_string()
            }
        );
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_requires_example_support() {
        let mut ctx = PluginContext::new("src");
        let generic = GenericInterface::initialize("com.x.BaseMapper", false).unwrap();
        ctx.provide_generic(ContributionHandle::new(generic)).unwrap();

        let err = ExistByExamplePlugin::new().validate(&mut ctx).unwrap_err();
        assert!(matches!(err, PluginError::Config { .. }));
    }
}
