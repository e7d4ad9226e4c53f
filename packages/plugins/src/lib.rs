//! # Mapgen Plugins
//!
//! Callback implementations driven by the generator pipeline. The centre of
//! the crate is the generic interface synthesizer: every per-table mapper
//! contributes its standard methods to one shared `BaseMapper<T, E, PK>`
//! style interface, and satellite plugins add further methods to it exactly
//! once while still emitting their SQL for every table.

pub mod context;
pub mod error;
pub mod extras;
pub mod generic;
pub mod hooks;
pub mod plugin;
pub mod properties;
pub mod registry;
pub mod satellites;

pub use context::PluginContext;
pub use error::{PluginError, PluginResult};
pub use extras::{DynamicColumnsPlugin, ExampleTargetPlugin, MapperChunkPlugin};
pub use generic::{
    ContributionHandle, GenericInterface, GenericInterfacePlugin, MapperBinder, TableBinding,
};
pub use hooks::{ClientMethodKind, ClientStyle};
pub use plugin::Plugin;
pub use properties::PluginProperties;
pub use registry::{create_plugin, PluginConfig, PluginRegistry, PLUGIN_TYPES};
pub use satellites::{
    ExistByExamplePlugin, ManualQueryPlugin, PageWindow, SelectOneByExamplePlugin,
    UpdateSelectNullPlugin,
};
