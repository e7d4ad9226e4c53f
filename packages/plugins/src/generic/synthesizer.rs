use crate::error::{PluginError, PluginResult};
use mapgen_dom::{Interface, JavaType, Method, Visibility};
use std::collections::HashSet;

pub const PARAM_ANNOTATION: &str = "org.apache.ibatis.annotations.Param";

/// Type variables of the shared interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameters {
    pub model: JavaType,
    /// Present only when example support is enabled
    pub example: Option<JavaType>,
    pub id: JavaType,
}

impl TypeParameters {
    fn new(example_enabled: bool) -> Self {
        Self {
            model: JavaType::variable("T"),
            example: example_enabled.then(|| JavaType::variable("E")),
            id: JavaType::variable("PK"),
        }
    }

    pub fn model_list(&self) -> JavaType {
        JavaType::list_of(self.model.clone())
    }

    fn as_vec(&self) -> Vec<JavaType> {
        let mut params = vec![self.model.clone()];
        params.extend(self.example.clone());
        params.push(self.id.clone());
        params
    }
}

/// The shared generic mapper interface and its contribution registry
///
/// Methods can only be added through `contribute*`, which checks the
/// registry first, so every method name appears at most once however often
/// and in whatever order contributions arrive.
#[derive(Debug, Clone)]
pub struct GenericInterface {
    interface: Interface,
    params: TypeParameters,
    contributed: HashSet<String>,
}

impl GenericInterface {
    pub fn initialize(name: &str, example_enabled: bool) -> PluginResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PluginError::MissingProperty {
                plugin: "generic-interface".to_string(),
                property: "interface".to_string(),
            });
        }
        if name.ends_with('.') || name.contains("..") || name.contains(char::is_whitespace) {
            return Err(PluginError::Config {
                plugin: "generic-interface".to_string(),
                message: format!("'{}' is not a valid interface name", name),
            });
        }

        let params = TypeParameters::new(example_enabled);
        let mut ty = JavaType::new(name);
        for param in params.as_vec() {
            ty.add_argument(param);
        }

        let mut interface = Interface::new(ty);
        interface.visibility = Visibility::Public;

        Ok(Self {
            interface,
            params,
            contributed: HashSet::new(),
        })
    }

    pub fn name(&self) -> &str {
        self.interface.ty.full_name()
    }

    pub fn params(&self) -> &TypeParameters {
        &self.params
    }

    pub fn example_enabled(&self) -> bool {
        self.params.example.is_some()
    }

    pub fn has_contributed(&self, method_name: &str) -> bool {
        self.contributed.contains(method_name)
    }

    /// Add an already generic method. Returns `false` when the name is taken.
    pub fn contribute(&mut self, mut method: Method) -> bool {
        if !self.contributed.insert(method.name.clone()) {
            return false;
        }
        method.visibility = Visibility::Public;
        method.body_lines.clear();
        self.interface.add_method(method);
        true
    }

    /// Add a generic copy of a table-specific method
    ///
    /// Parameter `i` is retyped to `substitutions[i]` when present; remaining
    /// parameters keep their concrete type. Names and annotations survive.
    pub fn contribute_substituted(
        &mut self,
        method: &Method,
        return_type: Option<JavaType>,
        substitutions: &[JavaType],
    ) -> bool {
        if self.has_contributed(&method.name) {
            return false;
        }

        let parameters = method
            .parameters
            .iter()
            .enumerate()
            .map(|(i, p)| match substitutions.get(i) {
                Some(ty) => p.retyped(ty.clone()),
                None => p.clone(),
            })
            .collect();

        let mut generic = Method::new(method.name.clone());
        generic.return_type = return_type;
        generic.parameters = parameters;
        self.contribute(generic)
    }

    pub fn method_names(&self) -> Vec<&str> {
        self.interface.method_names()
    }

    /// Snapshot of the interface with methods sorted by name and imports
    /// computed from the final signatures
    pub fn finalize(&self) -> Interface {
        let mut interface = self.interface.clone();
        interface.methods.sort_by(|a, b| a.name.cmp(&b.name));

        for method in &interface.methods {
            interface.imports.extend(method.signature_imports());
        }
        if interface.methods.iter().any(|m| m.has_parameter_annotations()) {
            interface.imports.insert(PARAM_ANNOTATION.to_string());
        }
        if self.example_enabled() {
            interface.add_import(&JavaType::list());
        }

        interface
    }

    /// The interface type with concrete arguments for one table
    ///
    /// `None` when example support is on and no example type is given.
    pub fn instantiate(
        &self,
        model: &JavaType,
        example: Option<&JavaType>,
        id: &JavaType,
    ) -> Option<JavaType> {
        let mut ty = JavaType::new(self.name());
        ty.add_argument(model.clone());
        match (self.example_enabled(), example) {
            (true, Some(example)) => ty.add_argument(example.clone()),
            (true, None) => return None,
            (false, _) => {}
        }
        ty.add_argument(id.clone());
        Some(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapgen_dom::Parameter;

    fn user_method(name: &str) -> Method {
        Method::new(name)
            .returning(JavaType::int())
            .with_parameter(Parameter::new(JavaType::new("com.x.model.User"), "record"))
    }

    #[test]
    fn test_type_parameter_count() {
        let with = GenericInterface::initialize("com.x.BaseMapper", true).unwrap();
        assert_eq!(with.finalize().ty.to_string(), "BaseMapper<T, E, PK>");

        let without = GenericInterface::initialize("com.x.BaseMapper", false).unwrap();
        assert_eq!(without.finalize().ty.arguments().len(), 2);
        assert_eq!(without.finalize().ty.to_string(), "BaseMapper<T, PK>");
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = GenericInterface::initialize("  ", true).unwrap_err();
        assert_eq!(err.to_string(), "Property interface not set for plugin generic-interface");
        assert!(!err.is_fatal());

        let err = GenericInterface::initialize("com.x.", true).unwrap_err();
        assert!(matches!(err, PluginError::Config { .. }));
    }

    #[test]
    fn test_contribution_is_idempotent() {
        let mut generic = GenericInterface::initialize("com.x.BaseMapper", false).unwrap();
        let model = generic.params().model.clone();

        for name in ["insert", "updateByPrimaryKey", "insert", "insert", "updateByPrimaryKey"] {
            generic.contribute_substituted(&user_method(name), Some(JavaType::int()), &[model.clone()]);
        }

        let mut names = generic.method_names();
        names.sort();
        assert_eq!(names, vec!["insert", "updateByPrimaryKey"]);
        assert!(generic.has_contributed("insert"));
        assert!(!generic.has_contributed("Insert"));
    }

    #[test]
    fn test_substitution_is_positional() {
        let mut generic = GenericInterface::initialize("com.x.BaseMapper", true).unwrap();
        let method = Method::new("selectManuallyByExample")
            .with_parameter(Parameter::named(JavaType::string(), "selectClause"))
            .with_parameter(Parameter::named(JavaType::new("com.x.model.UserExample"), "example"));

        let example = generic.params().example.clone().unwrap();
        let list = generic.params().model_list();
        generic.contribute_substituted(&method, Some(list), &[JavaType::string(), example]);

        let finalized = generic.finalize();
        let contributed = finalized.method("selectManuallyByExample").unwrap();
        assert_eq!(contributed.parameters[0].ty.to_string(), "String");
        assert_eq!(contributed.parameters[1].ty.to_string(), "E");
        assert_eq!(contributed.parameters[1].annotations, vec!["@Param(\"example\")"]);
        assert!(finalized.imports.contains(PARAM_ANNOTATION));
        assert!(finalized.imports.contains("java.util.List"));
    }

    #[test]
    fn test_unsubstituted_parameters_stay_concrete() {
        let mut generic = GenericInterface::initialize("com.x.BaseMapper", false).unwrap();
        let method = Method::new("deleteByName")
            .returning(JavaType::int())
            .with_parameter(Parameter::new(JavaType::new("java.util.Date"), "before"));
        generic.contribute_substituted(&method, Some(JavaType::int()), &[]);

        let finalized = generic.finalize();
        assert_eq!(finalized.methods[0].parameters[0].ty.full_name(), "java.util.Date");
        assert!(finalized.imports.contains("java.util.Date"));
    }

    #[test]
    fn test_finalize_sorts_and_is_pure() {
        let mut generic = GenericInterface::initialize("com.x.BaseMapper", true).unwrap();
        let model = generic.params().model.clone();
        for name in ["selectAll", "insert", "existByExample", "countByExample"] {
            generic.contribute(Method::new(name).returning(model.clone()));
        }

        let first = generic.finalize();
        let second = generic.finalize();
        assert_eq!(first, second);
        assert_eq!(
            first.method_names(),
            vec!["countByExample", "existByExample", "insert", "selectAll"]
        );
        // insertion order is untouched
        assert_eq!(generic.method_names()[0], "selectAll");
    }

    #[test]
    fn test_instantiate() {
        let generic = GenericInterface::initialize("com.x.BaseMapper", true).unwrap();
        let ty = generic.instantiate(
            &JavaType::new("com.x.model.User"),
            Some(&JavaType::new("com.x.model.UserExample")),
            &JavaType::new("java.lang.Integer"),
        ).unwrap();
        assert_eq!(ty.to_string(), "BaseMapper<User, UserExample, Integer>");
        assert!(ty.import_names().contains("com.x.model.UserExample"));
        assert!(!ty.import_names().contains("java.lang.Integer"));
    }

    #[test]
    fn test_instantiate_needs_example_when_enabled() {
        let model = JavaType::new("com.x.model.User");
        let id = JavaType::new("java.lang.Long");

        let generic = GenericInterface::initialize("com.x.BaseMapper", true).unwrap();
        assert_eq!(generic.instantiate(&model, None, &id), None);

        let generic = GenericInterface::initialize("com.x.BaseMapper", false).unwrap();
        let ty = generic.instantiate(&model, None, &id).unwrap();
        assert_eq!(ty.to_string(), "BaseMapper<User, Long>");
    }
}
