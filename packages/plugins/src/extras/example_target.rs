use crate::context::PluginContext;
use crate::error::{PluginError, PluginResult};
use crate::plugin::Plugin;
use crate::properties::PluginProperties;
use mapgen_dom::JavaType;
use mapgen_introspect::IntrospectedTable;
use tracing::debug;

/// Moves example classes into their own package
///
/// `targetPackage` names the package; when unset each table's example goes
/// to `<model package>.example`.
#[derive(Debug)]
pub struct ExampleTargetPlugin {
    properties: PluginProperties,
    target_package: Option<String>,
}

impl ExampleTargetPlugin {
    pub const TARGET_PACKAGE: &'static str = "targetPackage";

    pub fn new(properties: PluginProperties) -> Self {
        Self {
            properties,
            target_package: None,
        }
    }

    fn package_for(&self, table: &IntrospectedTable) -> String {
        match &self.target_package {
            Some(package) => package.clone(),
            None => match table.base_record_type.package() {
                Some(model) => format!("{}.example", model),
                None => "example".to_string(),
            },
        }
    }
}

impl Plugin for ExampleTargetPlugin {
    fn name(&self) -> &'static str {
        "example-target"
    }

    fn description(&self) -> &'static str {
        "Generates example classes into a separate package"
    }

    fn validate(&mut self, _ctx: &mut PluginContext) -> PluginResult<()> {
        let package = self.properties.get_non_empty(Self::TARGET_PACKAGE);
        if let Some(package) = package {
            if package.starts_with('.') || package.ends_with('.') {
                return Err(PluginError::Config {
                    plugin: self.name().to_string(),
                    message: format!("'{}' is not a valid package", package),
                });
            }
        }
        self.target_package = package.map(String::from);
        Ok(())
    }

    fn initialized(&mut self, table: &mut IntrospectedTable) {
        let package = self.package_for(table);
        let relocated = JavaType::new(format!("{}.{}", package, table.example_type.short_name()));
        debug!(table = %table.key(), example = %relocated.full_name(), "relocated example type");
        table.example_type = relocated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapgen_introspect::TableDescriptors;

    fn user() -> IntrospectedTable {
        let json = r#"{ "modelPackage": "com.x.model", "clientPackage": "com.x.mapper",
            "tables": [{ "name": "user", "columns": [{ "name": "id", "jdbcType": "INTEGER" }] }] }"#;
        TableDescriptors::from_json(json).unwrap().resolve().unwrap().remove(0)
    }

    #[test]
    fn test_default_package() {
        let mut plugin = ExampleTargetPlugin::new(PluginProperties::new());
        plugin.validate(&mut PluginContext::new("src")).unwrap();

        let mut table = user();
        plugin.initialized(&mut table);
        assert_eq!(table.example_type.full_name(), "com.x.model.example.UserExample");
    }

    #[test]
    fn test_configured_package() {
        let props = PluginProperties::new().with("targetPackage", "com.x.criteria");
        let mut plugin = ExampleTargetPlugin::new(props);
        plugin.validate(&mut PluginContext::new("src")).unwrap();

        let mut table = user();
        plugin.initialized(&mut table);
        assert_eq!(table.example_type.full_name(), "com.x.criteria.UserExample");
    }

    #[test]
    fn test_invalid_package() {
        let props = PluginProperties::new().with("targetPackage", "com.x.");
        let mut plugin = ExampleTargetPlugin::new(props);
        assert!(plugin.validate(&mut PluginContext::new("src")).is_err());
    }
}
