use crate::context::PluginContext;
use crate::error::PluginResult;
use crate::plugin::Plugin;
use mapgen_dom::{Document, GeneratedXmlFile};
use mapgen_introspect::IntrospectedTable;
use tracing::{debug, info};

/// Emits an empty mapper XML per table under `<xml package>.empty`
///
/// Meant for the first run of a project: the empty files hold hand-written
/// statements while the generated mapper XML can be overwritten freely.
#[derive(Debug, Default)]
pub struct MapperChunkPlugin {
    target_project: String,
    files: Vec<GeneratedXmlFile>,
}

impl MapperChunkPlugin {
    pub fn new() -> Self {
        Self::default()
    }
}

fn empty_mapper(table: &IntrospectedTable, target_project: &str) -> GeneratedXmlFile {
    GeneratedXmlFile::new(
        Document::mapper(table.mapper_type.full_name()),
        table.xml_mapper_file_name(),
        format!("{}.empty", table.xml_mapper_package),
        target_project,
    )
}

impl Plugin for MapperChunkPlugin {
    fn name(&self) -> &'static str {
        "mapper-chunk"
    }

    fn description(&self) -> &'static str {
        "Generates empty mapper XML files for hand-written statements"
    }

    fn validate(&mut self, ctx: &mut PluginContext) -> PluginResult<()> {
        self.target_project = ctx.sql_map_target_project().to_string();
        Ok(())
    }

    fn initialized(&mut self, table: &mut IntrospectedTable) {
        let file = empty_mapper(table, &self.target_project);
        debug!(table = %table.key(), package = %file.target_package, "queued empty mapper");
        self.files.push(file);
    }

    fn additional_xml_files(&mut self) -> Vec<GeneratedXmlFile> {
        info!(files = self.files.len(), "emitting empty mappers");
        std::mem::take(&mut self.files)
    }
}
