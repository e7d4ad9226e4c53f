use crate::java::{Interface, JavaType, TopLevelClass};
use crate::xml::Document;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A Java source file's top-level declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompilationUnit {
    Interface(Interface),
    Class(TopLevelClass),
}

impl CompilationUnit {
    pub fn ty(&self) -> &JavaType {
        match self {
            CompilationUnit::Interface(interface) => &interface.ty,
            CompilationUnit::Class(class) => &class.ty,
        }
    }

    pub fn as_interface(&self) -> Option<&Interface> {
        match self {
            CompilationUnit::Interface(interface) => Some(interface),
            CompilationUnit::Class(_) => None,
        }
    }

    pub fn as_class(&self) -> Option<&TopLevelClass> {
        match self {
            CompilationUnit::Class(class) => Some(class),
            CompilationUnit::Interface(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedJavaFile {
    pub unit: CompilationUnit,
    pub target_project: String,
}

impl GeneratedJavaFile {
    pub fn new(unit: CompilationUnit, target_project: impl Into<String>) -> Self {
        Self {
            unit,
            target_project: target_project.into(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.java", self.unit.ty().short_name())
    }

    pub fn package(&self) -> &str {
        self.unit.ty().package().unwrap_or("")
    }

    /// Path below the target project, derived from the package
    pub fn relative_path(&self) -> PathBuf {
        package_path(self.package()).join(self.file_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedXmlFile {
    pub document: Document,
    pub file_name: String,
    pub target_package: String,
    pub target_project: String,
}

impl GeneratedXmlFile {
    pub fn new(
        document: Document,
        file_name: impl Into<String>,
        target_package: impl Into<String>,
        target_project: impl Into<String>,
    ) -> Self {
        Self {
            document,
            file_name: file_name.into(),
            target_package: target_package.into(),
            target_project: target_project.into(),
        }
    }

    pub fn relative_path(&self) -> PathBuf {
        package_path(&self.target_package).join(&self.file_name)
    }
}

fn package_path(package: &str) -> PathBuf {
    package
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect()
}
