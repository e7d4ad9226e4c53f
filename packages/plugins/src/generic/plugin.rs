use super::{ContributionHandle, GenericInterface, MapperBinder};
use crate::context::PluginContext;
use crate::error::{PluginError, PluginResult};
use crate::hooks::{ClientMethodKind, ClientStyle};
use crate::plugin::Plugin;
use crate::properties::PluginProperties;
use mapgen_dom::{CompilationUnit, GeneratedJavaFile, Interface, JavaType, Method};
use mapgen_introspect::IntrospectedTable;
use tracing::{debug, info};

/// Collapses the standard per-table mapper methods into one shared generic
/// interface and makes every mapper extend it
///
/// Methods moved to the shared interface are removed from the table's own
/// mapper. Tables that cannot instantiate the interface (no single id type,
/// or examples disabled while the interface expects them) keep their methods.
pub struct GenericInterfacePlugin {
    properties: PluginProperties,
    handle: Option<ContributionHandle>,
    binder: MapperBinder,
    target_project: String,
}

impl GenericInterfacePlugin {
    pub const INTERFACE: &'static str = "interface";
    pub const EXAMPLE: &'static str = "example";

    pub fn new(properties: PluginProperties) -> Self {
        Self {
            properties,
            handle: None,
            binder: MapperBinder::new(),
            target_project: String::new(),
        }
    }

    pub fn handle(&self) -> Option<&ContributionHandle> {
        self.handle.as_ref()
    }

    fn bindable(handle: &ContributionHandle, table: &IntrospectedTable) -> bool {
        table.id_type().is_some() && (!handle.example_enabled() || table.example_enabled)
    }

    /// Record the table's concrete types and contribute the generic form of
    /// `method`. Returns `false` when the method stays table-specific.
    fn absorb(
        &mut self,
        handle: &ContributionHandle,
        kind: ClientMethodKind,
        method: &Method,
        table: &IntrospectedTable,
    ) -> bool {
        let example = match (kind.requires_example(), handle.example()) {
            (false, _) => None,
            (true, Some(example)) if table.example_enabled => Some(example),
            (true, _) => return false,
        };
        let model = handle.model();

        let (return_type, substitutions) = match kind {
            ClientMethodKind::CountByExample => {
                self.binder.bind_count_or_delete(table, table.example_type.clone());
                (JavaType::long(), example.into_iter().collect())
            }
            ClientMethodKind::DeleteByExample => {
                self.binder.bind_count_or_delete(table, table.example_type.clone());
                (JavaType::int(), example.into_iter().collect())
            }
            ClientMethodKind::DeleteByPrimaryKey | ClientMethodKind::SelectByPrimaryKey => {
                let id = match (method.parameters.as_slice(), table.id_type()) {
                    ([_], Some(id)) => id,
                    _ => return false,
                };
                self.binder.bind_delete(table, id);
                let return_type = if kind == ClientMethodKind::DeleteByPrimaryKey {
                    JavaType::int()
                } else {
                    model
                };
                (return_type, vec![handle.id()])
            }
            ClientMethodKind::Insert | ClientMethodKind::InsertSelective => {
                self.binder.bind_insert(table, table.base_record_type.clone());
                (JavaType::int(), vec![model])
            }
            ClientMethodKind::SelectAll => (handle.model_list(), Vec::new()),
            ClientMethodKind::SelectByExampleWithBlobs
            | ClientMethodKind::SelectByExampleWithoutBlobs => {
                (handle.model_list(), example.into_iter().collect())
            }
            ClientMethodKind::UpdateByExampleSelective
            | ClientMethodKind::UpdateByExampleWithBlobs
            | ClientMethodKind::UpdateByExampleWithoutBlobs => (
                JavaType::int(),
                std::iter::once(model).chain(example).collect(),
            ),
            ClientMethodKind::UpdateByPrimaryKeySelective
            | ClientMethodKind::UpdateByPrimaryKeyWithBlobs
            | ClientMethodKind::UpdateByPrimaryKeyWithoutBlobs => (JavaType::int(), vec![model]),
        };

        if handle.contribute_substituted(method, Some(return_type), &substitutions) {
            debug!(method = %method.name, table = %table.key(), "contributed to generic interface");
        }
        true
    }
}

impl Plugin for GenericInterfacePlugin {
    fn name(&self) -> &'static str {
        "generic-interface"
    }

    fn description(&self) -> &'static str {
        "Moves the standard mapper methods into one shared generic interface"
    }

    fn validate(&mut self, ctx: &mut PluginContext) -> PluginResult<()> {
        if self.handle.is_some() {
            return Err(PluginError::InvocationOrder(format!(
                "{} validated twice",
                self.name()
            )));
        }

        let name = self
            .properties
            .get_non_empty(Self::INTERFACE)
            .ok_or_else(|| PluginError::MissingProperty {
                plugin: self.name().to_string(),
                property: Self::INTERFACE.to_string(),
            })?;
        let example = self.properties.is_true(Self::EXAMPLE);

        let handle = ContributionHandle::new(GenericInterface::initialize(name, example)?);
        ctx.provide_generic(handle.clone())?;

        info!(interface = name, example, "generic interface initialized");
        self.target_project = ctx.java_target_project().to_string();
        self.handle = Some(handle);
        Ok(())
    }

    fn client_method_generated(
        &mut self,
        kind: ClientMethodKind,
        method: &mut Method,
        _style: ClientStyle,
        table: &IntrospectedTable,
    ) -> bool {
        let handle = match &self.handle {
            Some(handle) => handle.clone(),
            None => return true,
        };
        if !Self::bindable(&handle, table) {
            return true;
        }
        !self.absorb(&handle, kind, method, table)
    }

    fn client_generated(
        &mut self,
        client: &mut Interface,
        _style: ClientStyle,
        table: &IntrospectedTable,
    ) -> bool {
        let handle = match &self.handle {
            Some(handle) => handle,
            None => return true,
        };

        match self.binder.attach(handle, table, client) {
            Ok(ty) => debug!(mapper = %client.ty.full_name(), supertype = %ty, "attached generic interface"),
            Err(err) => debug!("skipping generic supertype: {}", err),
        }
        true
    }

    fn additional_java_files(&mut self) -> Vec<GeneratedJavaFile> {
        let handle = match &self.handle {
            Some(handle) => handle,
            None => return Vec::new(),
        };

        let interface = handle.finalize();
        info!(
            interface = %interface.ty.full_name(),
            methods = interface.methods.len(),
            "generic interface finalized"
        );
        vec![GeneratedJavaFile::new(
            CompilationUnit::Interface(interface),
            self.target_project.clone(),
        )]
    }
}

impl std::fmt::Debug for GenericInterfacePlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericInterfacePlugin")
            .field("properties", &self.properties)
            .field("validated", &self.handle.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapgen_dom::Parameter;
    use mapgen_introspect::TableDescriptors;

    fn plugin(example: bool) -> (GenericInterfacePlugin, PluginContext) {
        let props = PluginProperties::new()
            .with("interface", "com.x.BaseMapper")
            .with("example", if example { "true" } else { "false" });
        let mut plugin = GenericInterfacePlugin::new(props);
        let mut ctx = PluginContext::new("src/main/java");
        plugin.validate(&mut ctx).expect("Failed to validate");
        (plugin, ctx)
    }

    fn table(json_columns: &str) -> IntrospectedTable {
        let json = format!(
            r#"{{ "modelPackage": "com.x.model", "clientPackage": "com.x.mapper",
                  "tables": [{{ "name": "user", "columns": {} }}] }}"#,
            json_columns
        );
        TableDescriptors::from_json(&json).unwrap().resolve().unwrap().remove(0)
    }

    fn user() -> IntrospectedTable {
        table(r#"[{ "name": "id", "jdbcType": "INTEGER", "primaryKey": true },
                  { "name": "name", "jdbcType": "VARCHAR" }]"#)
    }

    #[test]
    fn test_missing_interface_property() {
        let mut plugin = GenericInterfacePlugin::new(PluginProperties::new());
        let mut ctx = PluginContext::new("src");
        let err = plugin.validate(&mut ctx).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Property interface not set for plugin generic-interface"
        );
        assert!(!ctx.has_generic());
    }

    #[test]
    fn test_second_validation_is_fatal() {
        let (mut plugin, mut ctx) = plugin(true);
        let err = plugin.validate(&mut ctx).unwrap_err();
        assert!(err.is_fatal());

        let mut other = GenericInterfacePlugin::new(
            PluginProperties::new().with("interface", "com.y.Base"),
        );
        let err = other.validate(&mut ctx).unwrap_err();
        assert!(matches!(err, PluginError::InvocationOrder(_)));
    }

    #[test]
    fn test_insert_is_moved_to_the_generic_interface() {
        let (mut plugin, _ctx) = plugin(false);
        let user = user();
        let mut insert = Method::new("insert")
            .returning(JavaType::int())
            .with_parameter(Parameter::new(user.base_record_type.clone(), "record"));

        for style in [ClientStyle::Interface, ClientStyle::Class] {
            let keep = plugin.client_method_generated(ClientMethodKind::Insert, &mut insert, style, &user);
            assert!(!keep);
        }

        let interface = plugin.handle().unwrap().finalize();
        assert_eq!(interface.method_names(), vec!["insert"]);
        assert_eq!(interface.methods[0].parameters[0].ty.to_string(), "T");
    }

    #[test]
    fn test_example_methods_stay_when_examples_disabled() {
        let (mut plugin, _ctx) = plugin(false);
        let user = user();
        let mut count = Method::new("countByExample")
            .returning(JavaType::long())
            .with_parameter(Parameter::new(user.example_type.clone(), "example"));

        let keep = plugin.client_method_generated(
            ClientMethodKind::CountByExample,
            &mut count,
            ClientStyle::Interface,
            &user,
        );
        assert!(keep);
        assert!(!plugin.handle().unwrap().has_contributed("countByExample"));
    }

    #[test]
    fn test_composite_key_table_keeps_its_methods() {
        let (mut plugin, _ctx) = plugin(false);
        let table = table(
            r#"[{ "name": "user_id", "jdbcType": "INTEGER", "primaryKey": true },
                { "name": "role_id", "jdbcType": "INTEGER", "primaryKey": true }]"#,
        );
        let mut insert = Method::new("insert")
            .with_parameter(Parameter::new(table.base_record_type.clone(), "record"));

        assert!(plugin.client_method_generated(
            ClientMethodKind::Insert,
            &mut insert,
            ClientStyle::Interface,
            &table
        ));

        let mut client = Interface::new(table.mapper_type.clone());
        assert!(plugin.client_generated(&mut client, ClientStyle::Interface, &table));
        assert!(client.super_interfaces.is_empty());
    }

    #[test]
    fn test_primitive_key_is_boxed_in_supertype() {
        let (mut plugin, _ctx) = plugin(true);
        let table = table(
            r#"[{ "name": "id", "jdbcType": "INTEGER", "javaType": "int", "primaryKey": true }]"#,
        );
        let mut select = Method::new("selectByPrimaryKey")
            .returning(table.base_record_type.clone())
            .with_parameter(Parameter::new(JavaType::int(), "id"));
        let mut count = Method::new("countByExample")
            .returning(JavaType::long())
            .with_parameter(Parameter::new(table.example_type.clone(), "example"));
        let mut insert = Method::new("insert")
            .returning(JavaType::int())
            .with_parameter(Parameter::new(table.base_record_type.clone(), "record"));

        for (kind, method) in [
            (ClientMethodKind::SelectByPrimaryKey, &mut select),
            (ClientMethodKind::CountByExample, &mut count),
            (ClientMethodKind::Insert, &mut insert),
        ] {
            assert!(!plugin.client_method_generated(kind, method, ClientStyle::Interface, &table));
        }

        let mut client = Interface::new(table.mapper_type.clone());
        assert!(plugin.client_generated(&mut client, ClientStyle::Interface, &table));
        assert_eq!(
            client.super_interfaces[0].to_string(),
            "BaseMapper<User, UserExample, Integer>"
        );
    }

    #[test]
    fn test_additional_file_targets_java_project() {
        let (mut plugin, _ctx) = plugin(true);
        let files = plugin.additional_java_files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].target_project, "src/main/java");
        assert_eq!(files[0].file_name(), "BaseMapper.java");
        assert!(files[0].unit.as_interface().unwrap().imports.contains("java.util.List"));
    }
}
