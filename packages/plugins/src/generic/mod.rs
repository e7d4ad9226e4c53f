mod binder;
mod contribution;
mod plugin;
mod synthesizer;

pub use binder::{MapperBinder, TableBinding};
pub use contribution::ContributionHandle;
pub use plugin::GenericInterfacePlugin;
pub use synthesizer::{GenericInterface, TypeParameters, PARAM_ANNOTATION};
