use super::contribution::ContributionHandle;
use crate::error::{PluginError, PluginResult};
use mapgen_dom::{Interface, JavaType};
use mapgen_introspect::IntrospectedTable;
use std::collections::HashMap;
use tracing::debug;

/// Concrete types recorded for one table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBinding {
    pub model: Option<JavaType>,
    pub example: Option<JavaType>,
    pub id: Option<JavaType>,
}

/// Records each table's concrete model, example and id types and attaches
/// the instantiated generic interface to the table's mapper
///
/// Every slot is first-write-wins: later observations for the same table
/// never replace a recorded type.
#[derive(Debug, Default)]
pub struct MapperBinder {
    bindings: HashMap<String, TableBinding>,
}

fn record(slot: &mut Option<JavaType>, ty: JavaType, table: &str, kind: &str) {
    match slot {
        Some(existing) => {
            if *existing != ty {
                debug!(table, kind, kept = %existing, ignored = %ty, "binding already recorded");
            }
        }
        None => *slot = Some(ty),
    }
}

impl MapperBinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_insert(&mut self, table: &IntrospectedTable, model: JavaType) {
        let key = table.key();
        let binding = self.bindings.entry(key.clone()).or_default();
        record(&mut binding.model, model, &key, "model");
    }

    pub fn bind_delete(&mut self, table: &IntrospectedTable, id: JavaType) {
        let key = table.key();
        let binding = self.bindings.entry(key.clone()).or_default();
        record(&mut binding.id, id, &key, "id");
    }

    pub fn bind_count_or_delete(&mut self, table: &IntrospectedTable, example: JavaType) {
        let key = table.key();
        let binding = self.bindings.entry(key.clone()).or_default();
        record(&mut binding.example, example, &key, "example");
    }

    pub fn binding(&self, table: &IntrospectedTable) -> Option<&TableBinding> {
        self.bindings.get(&table.key())
    }

    /// Add `Generic<Model, Example, Id>` as a supertype of `client`
    ///
    /// Fails with a binding error when a type the interface needs was never
    /// recorded for this table; the client is left untouched in that case.
    pub fn attach(
        &self,
        handle: &ContributionHandle,
        table: &IntrospectedTable,
        client: &mut Interface,
    ) -> PluginResult<JavaType> {
        let missing = |what: &'static str| PluginError::Binding {
            table: table.key(),
            missing: what,
        };

        let binding = self.binding(table).ok_or_else(|| missing("model"))?;
        let model = binding.model.as_ref().ok_or_else(|| missing("model"))?;
        let id = binding.id.as_ref().ok_or_else(|| missing("id"))?;
        let example = if handle.example_enabled() {
            Some(binding.example.as_ref().ok_or_else(|| missing("example"))?)
        } else {
            None
        };

        let ty = handle
            .instantiate(model, example, id)
            .ok_or_else(|| missing("example"))?;
        client.add_super_interface(ty.clone());
        client.add_import(model);
        if let Some(example) = example {
            client.add_import(example);
        }

        Ok(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generic::GenericInterface;
    use mapgen_introspect::TableDescriptors;

    fn tables() -> Vec<IntrospectedTable> {
        let json = r#"{
            "modelPackage": "com.x.model",
            "clientPackage": "com.x.mapper",
            "tables": [
                { "name": "user", "columns": [{ "name": "id", "jdbcType": "INTEGER", "primaryKey": true }] },
                { "name": "order", "columns": [{ "name": "id", "jdbcType": "BIGINT", "primaryKey": true }] }
            ]
        }"#;
        TableDescriptors::from_json(json).unwrap().resolve().unwrap()
    }

    fn handle(example: bool) -> ContributionHandle {
        ContributionHandle::new(GenericInterface::initialize("com.x.BaseMapper", example).unwrap())
    }

    #[test]
    fn test_first_write_wins() {
        let tables = tables();
        let mut binder = MapperBinder::new();
        binder.bind_insert(&tables[0], JavaType::new("com.x.model.User"));
        binder.bind_insert(&tables[0], JavaType::new("com.x.model.Other"));
        binder.bind_delete(&tables[0], JavaType::new("java.lang.Integer"));
        binder.bind_delete(&tables[0], JavaType::new("java.lang.Long"));

        let binding = binder.binding(&tables[0]).unwrap();
        assert_eq!(binding.model.as_ref().unwrap().full_name(), "com.x.model.User");
        assert_eq!(binding.id.as_ref().unwrap().full_name(), "java.lang.Integer");
        assert!(binder.binding(&tables[1]).is_none());
    }

    #[test]
    fn test_attach_adds_supertype_and_imports() {
        let tables = tables();
        let handle = handle(true);
        let mut binder = MapperBinder::new();
        let user = &tables[0];
        binder.bind_insert(user, user.base_record_type.clone());
        binder.bind_count_or_delete(user, user.example_type.clone());
        binder.bind_delete(user, JavaType::new("java.lang.Integer"));

        let mut client = Interface::new(user.mapper_type.clone());
        let ty = binder.attach(&handle, user, &mut client).unwrap();

        assert_eq!(ty.to_string(), "BaseMapper<User, UserExample, Integer>");
        assert_eq!(client.super_interfaces, vec![ty]);
        assert!(client.imports.contains("com.x.BaseMapper"));
        assert!(client.imports.contains("com.x.model.User"));
        assert!(client.imports.contains("com.x.model.UserExample"));
    }

    #[test]
    fn test_attach_without_model_is_a_binding_error() {
        let tables = tables();
        let handle = handle(false);
        let mut binder = MapperBinder::new();
        binder.bind_delete(&tables[1], JavaType::new("java.lang.Long"));

        let mut client = Interface::new(tables[1].mapper_type.clone());
        let err = binder.attach(&handle, &tables[1], &mut client).unwrap_err();
        assert_eq!(
            err,
            PluginError::Binding {
                table: "order".to_string(),
                missing: "model"
            }
        );
        assert!(client.super_interfaces.is_empty());
        assert!(client.imports.is_empty());
    }

    #[test]
    fn test_example_only_required_when_enabled() {
        let tables = tables();
        let mut binder = MapperBinder::new();
        let order = &tables[1];
        binder.bind_insert(order, order.base_record_type.clone());
        binder.bind_delete(order, JavaType::new("java.lang.Long"));

        let mut client = Interface::new(order.mapper_type.clone());
        let err = binder.attach(&handle(true), order, &mut client).unwrap_err();
        assert!(matches!(err, PluginError::Binding { missing: "example", .. }));

        let ty = binder.attach(&handle(false), order, &mut client).unwrap();
        assert_eq!(ty.to_string(), "BaseMapper<Order, Long>");
    }
}
