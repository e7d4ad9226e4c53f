use crate::context::PluginContext;
use crate::error::{PluginError, PluginResult};
use crate::extras::{DynamicColumnsPlugin, ExampleTargetPlugin, MapperChunkPlugin};
use crate::generic::GenericInterfacePlugin;
use crate::hooks::{ClientMethodKind, ClientStyle};
use crate::plugin::Plugin;
use crate::properties::PluginProperties;
use crate::satellites::{
    ExistByExamplePlugin, ManualQueryPlugin, SelectOneByExamplePlugin, UpdateSelectNullPlugin,
};
use mapgen_dom::{
    Document, GeneratedJavaFile, GeneratedXmlFile, Interface, Method, TopLevelClass, XmlElement,
};
use mapgen_introspect::IntrospectedTable;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One `plugins` entry of the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub properties: PluginProperties,
}

impl PluginConfig {
    pub fn new(kind: impl Into<String>, properties: PluginProperties) -> Self {
        Self {
            kind: kind.into(),
            properties,
        }
    }
}

/// Names accepted in the `type` field
pub const PLUGIN_TYPES: &[&str] = &[
    "generic-interface",
    "exist-by-example",
    "manual-query",
    "select-one-by-example",
    "update-select-null",
    "example-target",
    "dynamic-columns",
    "mapper-chunk",
];

/// Instantiate a built-in plugin from its configuration
pub fn create_plugin(config: &PluginConfig) -> PluginResult<Box<dyn Plugin>> {
    let properties = config.properties.clone();
    let plugin: Box<dyn Plugin> = match config.kind.as_str() {
        "generic-interface" => Box::new(GenericInterfacePlugin::new(properties)),
        "exist-by-example" => Box::new(ExistByExamplePlugin::new()),
        "manual-query" => Box::new(ManualQueryPlugin::new(properties)),
        "select-one-by-example" => Box::new(SelectOneByExamplePlugin::new()),
        "update-select-null" => Box::new(UpdateSelectNullPlugin::new()),
        "example-target" => Box::new(ExampleTargetPlugin::new(properties)),
        "dynamic-columns" => Box::new(DynamicColumnsPlugin::new(properties)),
        "mapper-chunk" => Box::new(MapperChunkPlugin::new()),
        other => return Err(PluginError::UnknownPlugin(other.to_string())),
    };
    Ok(plugin)
}

/// Ordered set of plugins, dispatched as one
///
/// Hooks run in declaration order. For hooks that decide whether an
/// artifact is kept, the first `false` wins and later plugins are skipped.
pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginRegistry {
    pub fn empty() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    pub fn from_configs(configs: &[PluginConfig]) -> PluginResult<Self> {
        let mut registry = Self::empty();
        for config in configs {
            registry.add_plugin(create_plugin(config)?);
        }
        Ok(registry)
    }

    pub fn add_plugin(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    pub fn plugins(&self) -> &[Box<dyn Plugin>] {
        &self.plugins
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Validate every plugin in order, dropping the ones that fail
    ///
    /// Returns the warnings for dropped plugins. Fatal errors abort at once.
    pub fn validate(&mut self, ctx: &mut PluginContext) -> PluginResult<Vec<String>> {
        let mut warnings = Vec::new();
        let mut active = Vec::with_capacity(self.plugins.len());

        for mut plugin in self.plugins.drain(..) {
            match plugin.validate(ctx) {
                Ok(()) => {
                    debug!(plugin = plugin.name(), "plugin validated");
                    active.push(plugin);
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    warn!(plugin = plugin.name(), "plugin disabled: {}", err);
                    warnings.push(format!("{}: {}", plugin.name(), err));
                }
            }
        }

        self.plugins = active;
        Ok(warnings)
    }

    pub fn initialized(&mut self, table: &mut IntrospectedTable) {
        for plugin in &mut self.plugins {
            plugin.initialized(table);
        }
    }

    pub fn model_example_class_generated(
        &mut self,
        class: &mut TopLevelClass,
        table: &IntrospectedTable,
    ) -> bool {
        self.plugins
            .iter_mut()
            .all(|p| p.model_example_class_generated(class, table))
    }

    pub fn client_method_generated(
        &mut self,
        kind: ClientMethodKind,
        method: &mut Method,
        style: ClientStyle,
        table: &IntrospectedTable,
    ) -> bool {
        self.plugins
            .iter_mut()
            .all(|p| p.client_method_generated(kind, method, style, table))
    }

    pub fn client_generated(
        &mut self,
        client: &mut Interface,
        style: ClientStyle,
        table: &IntrospectedTable,
    ) -> bool {
        self.plugins
            .iter_mut()
            .all(|p| p.client_generated(client, style, table))
    }

    pub fn sql_map_element_generated(
        &mut self,
        kind: ClientMethodKind,
        element: &mut XmlElement,
        table: &IntrospectedTable,
    ) -> bool {
        self.plugins
            .iter_mut()
            .all(|p| p.sql_map_element_generated(kind, element, table))
    }

    pub fn sql_map_document_generated(
        &mut self,
        document: &mut Document,
        table: &IntrospectedTable,
    ) -> bool {
        self.plugins
            .iter_mut()
            .all(|p| p.sql_map_document_generated(document, table))
    }

    pub fn additional_java_files(&mut self) -> Vec<GeneratedJavaFile> {
        self.plugins
            .iter_mut()
            .flat_map(|p| p.additional_java_files())
            .collect()
    }

    pub fn additional_xml_files(&mut self) -> Vec<GeneratedXmlFile> {
        self.plugins
            .iter_mut()
            .flat_map(|p| p.additional_xml_files())
            .collect()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.names())
            .finish()
    }
}
