//! Plugins that shape per-table artifacts without touching the generic
//! interface.

mod dynamic_columns;
mod example_target;
mod mapper_chunk;

pub use dynamic_columns::DynamicColumnsPlugin;
pub use example_target::ExampleTargetPlugin;
pub use mapper_chunk::MapperChunkPlugin;
