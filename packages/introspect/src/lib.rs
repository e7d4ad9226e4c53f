//! Read-only table metadata consumed by the generator and its plugins.
//!
//! Tables normally come from database introspection; here they are described
//! in JSON ([`TableDescriptors`]) and resolved into [`IntrospectedTable`]s using
//! the usual naming conventions.

pub mod column;
pub mod descriptor;
pub mod error;
pub mod generated_key;
pub mod naming;
pub mod table;

pub use column::IntrospectedColumn;
pub use descriptor::{ColumnDescriptor, GeneratedKeyDescriptor, TableDescriptor, TableDescriptors};
pub use error::{IntrospectError, IntrospectResult};
pub use generated_key::GeneratedKey;
pub use table::{IntrospectedTable, TableName};
