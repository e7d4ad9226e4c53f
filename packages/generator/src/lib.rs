//! # Mapgen Generator
//!
//! The host pipeline. For every table it builds the default model, example,
//! mapper interface and mapper XML artifacts and fires the plugin callbacks
//! at each creation point; after the last table it collects the artifacts
//! plugins produce on their own, such as the shared generic interface.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod sqlmap;

pub use config::{ClientStyleConfig, GeneratorConfig, DEFAULT_CONFIG_NAME};
pub use error::{GeneratorError, GeneratorResult};
pub use pipeline::{GenerationOutput, Generator};
