pub mod generate;
pub mod init;
pub mod plugins;

pub use generate::{generate, GenerateArgs};
pub use init::{init, InitArgs};
pub use plugins::{plugins, PluginsArgs};
