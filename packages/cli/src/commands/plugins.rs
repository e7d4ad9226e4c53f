use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mapgen_plugins::{create_plugin, PluginConfig, PluginProperties, PLUGIN_TYPES};

#[derive(Debug, Args)]
pub struct PluginsArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn plugins(args: PluginsArgs) -> Result<()> {
    let mut entries = Vec::with_capacity(PLUGIN_TYPES.len());
    for kind in PLUGIN_TYPES {
        let plugin = create_plugin(&PluginConfig::new(*kind, PluginProperties::new()))?;
        entries.push((plugin.name(), plugin.description()));
    }

    if args.json {
        let json: Vec<serde_json::Value> = entries
            .iter()
            .map(|(name, description)| serde_json::json!({ "type": name, "description": description }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    for (name, description) in entries {
        println!("  {:<24} {}", name.bright_white(), description.dimmed());
    }
    Ok(())
}
