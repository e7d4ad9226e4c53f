use super::synthesizer::GenericInterface;
use mapgen_dom::{Interface, JavaType, Method};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared access to the run's generic interface
///
/// Handed out by `PluginContext::lookup_generic`. Holders can add methods and
/// read the type variables but never touch the registry directly. Cloning
/// the handle shares the same interface.
#[derive(Debug, Clone)]
pub struct ContributionHandle(Rc<RefCell<GenericInterface>>);

impl ContributionHandle {
    pub fn new(generic: GenericInterface) -> Self {
        Self(Rc::new(RefCell::new(generic)))
    }

    pub fn has_contributed(&self, method_name: &str) -> bool {
        self.0.borrow().has_contributed(method_name)
    }

    pub fn contribute(&self, method: Method) -> bool {
        self.0.borrow_mut().contribute(method)
    }

    pub fn contribute_substituted(
        &self,
        method: &Method,
        return_type: Option<JavaType>,
        substitutions: &[JavaType],
    ) -> bool {
        self.0
            .borrow_mut()
            .contribute_substituted(method, return_type, substitutions)
    }

    /// `T`
    pub fn model(&self) -> JavaType {
        self.0.borrow().params().model.clone()
    }

    /// `E`, absent when example support is off
    pub fn example(&self) -> Option<JavaType> {
        self.0.borrow().params().example.clone()
    }

    /// `PK`
    pub fn id(&self) -> JavaType {
        self.0.borrow().params().id.clone()
    }

    /// `List<T>`
    pub fn model_list(&self) -> JavaType {
        self.0.borrow().params().model_list()
    }

    pub fn example_enabled(&self) -> bool {
        self.0.borrow().example_enabled()
    }

    pub fn method_names(&self) -> Vec<String> {
        self.0
            .borrow()
            .method_names()
            .into_iter()
            .map(String::from)
            .collect()
    }

    pub fn instantiate(
        &self,
        model: &JavaType,
        example: Option<&JavaType>,
        id: &JavaType,
    ) -> Option<JavaType> {
        self.0.borrow().instantiate(model, example, id)
    }

    pub fn finalize(&self) -> Interface {
        self.0.borrow().finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_one_registry() {
        let handle = ContributionHandle::new(
            GenericInterface::initialize("com.x.BaseMapper", true).unwrap(),
        );
        let other = handle.clone();

        assert!(handle.contribute(Method::new("existByExample").returning(JavaType::boolean())));
        assert!(other.has_contributed("existByExample"));
        assert!(!other.contribute(Method::new("existByExample")));
        assert_eq!(other.method_names(), vec!["existByExample".to_string()]);
    }

    #[test]
    fn test_type_variables() {
        let handle = ContributionHandle::new(
            GenericInterface::initialize("com.x.BaseMapper", false).unwrap(),
        );
        assert_eq!(handle.model().to_string(), "T");
        assert_eq!(handle.example(), None);
        assert_eq!(handle.id().to_string(), "PK");
        assert_eq!(handle.model_list().to_string(), "List<T>");
    }
}
