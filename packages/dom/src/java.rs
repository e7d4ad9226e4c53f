use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "double", "float", "int", "long", "short", "void",
];

/// A (possibly parameterized) Java type reference
///
/// `name` is always the fully-qualified base name (`java.util.List`), type
/// arguments are kept separately so they can be substituted and imported one
/// by one. Type variables (`T`, `PK`) carry no package and are never imported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JavaType {
    name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    arguments: Vec<JavaType>,
    #[serde(default)]
    variable: bool,
}

impl JavaType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            variable: false,
        }
    }

    /// A generic type variable such as `T`
    pub fn variable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            variable: true,
        }
    }

    pub fn int() -> Self {
        Self::new("int")
    }

    pub fn long() -> Self {
        Self::new("long")
    }

    pub fn boolean() -> Self {
        Self::new("boolean")
    }

    pub fn string() -> Self {
        Self::new("java.lang.String")
    }

    pub fn list() -> Self {
        Self::new("java.util.List")
    }

    pub fn list_of(element: JavaType) -> Self {
        Self::list().with_argument(element)
    }

    pub fn with_argument(mut self, argument: JavaType) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn add_argument(&mut self, argument: JavaType) {
        self.arguments.push(argument);
    }

    pub fn arguments(&self) -> &[JavaType] {
        &self.arguments
    }

    /// Fully-qualified base name without type arguments
    pub fn full_name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) => &self.name[idx + 1..],
            None => &self.name,
        }
    }

    pub fn package(&self) -> Option<&str> {
        if self.variable {
            return None;
        }
        self.name.rfind('.').map(|idx| &self.name[..idx])
    }

    pub fn is_primitive(&self) -> bool {
        PRIMITIVES.contains(&self.name.as_str())
    }

    pub fn is_variable(&self) -> bool {
        self.variable
    }

    /// Boxed counterpart of a primitive, or the type itself
    pub fn boxed(&self) -> JavaType {
        let wrapper = match self.name.as_str() {
            "boolean" => "java.lang.Boolean",
            "byte" => "java.lang.Byte",
            "char" => "java.lang.Character",
            "double" => "java.lang.Double",
            "float" => "java.lang.Float",
            "int" => "java.lang.Integer",
            "long" => "java.lang.Long",
            "short" => "java.lang.Short",
            _ => return self.clone(),
        };
        JavaType::new(wrapper)
    }

    fn needs_import(&self) -> bool {
        match self.package() {
            Some(package) => package != "java.lang",
            None => false,
        }
    }

    /// Every fully-qualified name that must be imported to use this type,
    /// including the ones reachable through type arguments
    pub fn import_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_imports(&mut names);
        names
    }

    fn collect_imports(&self, names: &mut BTreeSet<String>) {
        if self.needs_import() {
            names.insert(self.name.clone());
        }
        for argument in &self.arguments {
            argument.collect_imports(names);
        }
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())?;
        if !self.arguments.is_empty() {
            f.write_str("<")?;
            for (i, argument) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", argument)?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Protected,
    Private,
    Default,
}

impl Visibility {
    pub fn keyword(&self) -> &'static str {
        match self {
            Visibility::Public => "public ",
            Visibility::Protected => "protected ",
            Visibility::Private => "private ",
            Visibility::Default => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub ty: JavaType,
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<String>,
}

impl Parameter {
    pub fn new(ty: JavaType, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
            annotations: Vec::new(),
        }
    }

    /// Parameter carrying a MyBatis `@Param("name")` annotation
    pub fn named(ty: JavaType, name: impl Into<String>) -> Self {
        let name = name.into();
        let annotation = format!("@Param(\"{}\")", name);
        Self {
            ty,
            name,
            annotations: vec![annotation],
        }
    }

    /// Same name and annotations, different type
    pub fn retyped(&self, ty: JavaType) -> Self {
        Self {
            ty,
            name: self.name.clone(),
            annotations: self.annotations.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub visibility: Visibility,
    /// `None` renders as `void`
    pub return_type: Option<JavaType>,
    pub parameters: Vec<Parameter>,
    pub annotations: Vec<String>,
    pub body_lines: Vec<String>,
    pub javadoc: Vec<String>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Default,
            return_type: None,
            parameters: Vec::new(),
            annotations: Vec::new(),
            body_lines: Vec::new(),
            javadoc: Vec::new(),
        }
    }

    pub fn returning(mut self, ty: JavaType) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_body_line(mut self, line: impl Into<String>) -> Self {
        self.body_lines.push(line.into());
        self
    }

    pub fn add_annotation(&mut self, annotation: impl Into<String>) {
        let annotation = annotation.into();
        if !self.annotations.contains(&annotation) {
            self.annotations.push(annotation);
        }
    }

    pub fn is_abstract(&self) -> bool {
        self.body_lines.is_empty()
    }

    /// Imports required by the signature (return type and parameters)
    pub fn signature_imports(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        if let Some(ty) = &self.return_type {
            names.extend(ty.import_names());
        }
        for parameter in &self.parameters {
            names.extend(parameter.ty.import_names());
        }
        names
    }

    pub fn has_parameter_annotations(&self) -> bool {
        self.parameters.iter().any(|p| !p.annotations.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: JavaType,
    pub visibility: Visibility,
    pub initializer: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: JavaType) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Private,
            initializer: None,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub ty: JavaType,
    pub visibility: Visibility,
    pub super_interfaces: Vec<JavaType>,
    pub imports: BTreeSet<String>,
    pub methods: Vec<Method>,
    pub javadoc: Vec<String>,
}

impl Interface {
    pub fn new(ty: JavaType) -> Self {
        Self {
            ty,
            visibility: Visibility::Public,
            super_interfaces: Vec::new(),
            imports: BTreeSet::new(),
            methods: Vec::new(),
            javadoc: Vec::new(),
        }
    }

    pub fn add_import(&mut self, ty: &JavaType) {
        self.imports.extend(ty.import_names());
    }

    pub fn add_import_name(&mut self, name: impl Into<String>) {
        self.imports.insert(name.into());
    }

    pub fn add_super_interface(&mut self, ty: JavaType) {
        self.add_import(&ty);
        if !self.super_interfaces.contains(&ty) {
            self.super_interfaces.push(ty);
        }
    }

    pub fn add_method(&mut self, method: Method) {
        self.methods.push(method);
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(|m| m.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopLevelClass {
    pub ty: JavaType,
    pub visibility: Visibility,
    pub super_class: Option<JavaType>,
    pub imports: BTreeSet<String>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    pub javadoc: Vec<String>,
}

impl TopLevelClass {
    pub fn new(ty: JavaType) -> Self {
        Self {
            ty,
            visibility: Visibility::Public,
            super_class: None,
            imports: BTreeSet::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            javadoc: Vec::new(),
        }
    }

    pub fn add_import(&mut self, ty: &JavaType) {
        self.imports.extend(ty.import_names());
    }

    pub fn add_field(&mut self, field: Field) {
        self.add_import(&field.ty);
        self.fields.push(field);
    }

    pub fn add_method(&mut self, method: Method) {
        self.imports.extend(method.signature_imports());
        self.methods.push(method);
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Method> + 'a {
        self.methods.iter().filter(move |m| m.name == name)
    }
}
