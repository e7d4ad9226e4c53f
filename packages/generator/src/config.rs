use crate::error::GeneratorResult;
use mapgen_introspect::{IntrospectedTable, TableDescriptors};
use mapgen_plugins::{ClientStyle, PluginConfig, PluginProperties};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "mapgen.config.json";

/// Mapgen configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Source root for generated Java files
    #[serde(default = "default_target_project")]
    pub target_project: String,

    /// Resource root for generated mapper XML files
    #[serde(default = "default_sql_map_target_project")]
    pub sql_map_target_project: String,

    #[serde(default)]
    pub client_style: ClientStyleConfig,

    /// Table descriptor file, relative to the config
    #[serde(default = "default_tables")]
    pub tables: String,

    /// Plugins in the order they are validated and called
    #[serde(default)]
    pub plugins: Vec<PluginConfig>,
}

/// Which client callback overloads the pipeline fires
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientStyleConfig {
    #[default]
    Interface,
    /// Also fire the class-style overload for every client hook
    InterfaceAndClass,
}

impl ClientStyleConfig {
    pub fn styles(&self) -> Vec<ClientStyle> {
        match self {
            ClientStyleConfig::Interface => vec![ClientStyle::Interface],
            ClientStyleConfig::InterfaceAndClass => vec![ClientStyle::Interface, ClientStyle::Class],
        }
    }
}

fn default_target_project() -> String {
    "src/main/java".to_string()
}

fn default_sql_map_target_project() -> String {
    "src/main/resources".to_string()
}

fn default_tables() -> String {
    "tables.json".to_string()
}

impl GeneratorConfig {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> GeneratorResult<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(GeneratorConfig::default())
        }
    }

    pub fn tables_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.tables)
    }

    /// Read and resolve the table descriptor file
    pub fn load_tables(&self, cwd: &Path) -> GeneratorResult<Vec<IntrospectedTable>> {
        let descriptors = TableDescriptors::load(&self.tables_path(cwd))?;
        Ok(descriptors.resolve()?)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            target_project: default_target_project(),
            sql_map_target_project: default_sql_map_target_project(),
            client_style: ClientStyleConfig::default(),
            tables: default_tables(),
            plugins: vec![PluginConfig::new(
                "generic-interface",
                PluginProperties::new()
                    .with("interface", "com.example.mapper.BaseMapper")
                    .with("example", "true"),
            )],
        }
    }
}
