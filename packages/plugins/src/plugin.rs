use crate::context::PluginContext;
use crate::error::PluginResult;
use crate::hooks::{ClientMethodKind, ClientStyle};
use mapgen_dom::{
    Document, GeneratedJavaFile, GeneratedXmlFile, Interface, Method, TopLevelClass, XmlElement,
};
use mapgen_introspect::IntrospectedTable;

/// Trait for generator plugins
///
/// Every hook has a no-op default so a plugin only overrides the callbacks it
/// observes. Hooks returning `bool` decide whether the artifact is kept: the
/// first plugin returning `false` removes it and later plugins are not asked.
pub trait Plugin {
    /// Unique identifier, also the `type` used in configuration
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check settings and wire up dependencies before any table is processed.
    /// A plugin whose validation fails takes no part in the run.
    fn validate(&mut self, _ctx: &mut PluginContext) -> PluginResult<()> {
        Ok(())
    }

    /// Table metadata is resolved but nothing has been generated yet
    fn initialized(&mut self, _table: &mut IntrospectedTable) {}

    fn model_example_class_generated(
        &mut self,
        _class: &mut TopLevelClass,
        _table: &IntrospectedTable,
    ) -> bool {
        true
    }

    fn client_method_generated(
        &mut self,
        _kind: ClientMethodKind,
        _method: &mut Method,
        _style: ClientStyle,
        _table: &IntrospectedTable,
    ) -> bool {
        true
    }

    fn client_generated(
        &mut self,
        _client: &mut Interface,
        _style: ClientStyle,
        _table: &IntrospectedTable,
    ) -> bool {
        true
    }

    fn sql_map_element_generated(
        &mut self,
        _kind: ClientMethodKind,
        _element: &mut XmlElement,
        _table: &IntrospectedTable,
    ) -> bool {
        true
    }

    fn sql_map_document_generated(
        &mut self,
        _document: &mut Document,
        _table: &IntrospectedTable,
    ) -> bool {
        true
    }

    /// Extra Java artifacts, collected once after every table is processed
    fn additional_java_files(&mut self) -> Vec<GeneratedJavaFile> {
        Vec::new()
    }

    fn additional_xml_files(&mut self) -> Vec<GeneratedXmlFile> {
        Vec::new()
    }
}
