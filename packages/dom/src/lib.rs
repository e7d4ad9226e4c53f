//! # Mapgen DOM
//!
//! In-memory models for the two artifact kinds the generator produces:
//! Java compilation units (interfaces and classes) and MyBatis-style XML
//! mapper documents, plus renderers that turn them into source text.

pub mod artifact;
pub mod java;
pub mod render;
pub mod writer;
pub mod xml;

pub use artifact::{CompilationUnit, GeneratedJavaFile, GeneratedXmlFile};
pub use java::{Field, Interface, JavaType, Method, Parameter, TopLevelClass, Visibility};
pub use render::{render_java, render_xml, RenderOptions};
pub use writer::SourceWriter;
pub use xml::{Attribute, Document, XmlElement, XmlNode};

#[cfg(test)]
mod tests;
