use crate::client;
use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, GeneratorResult};
use crate::model;
use crate::sqlmap;
use mapgen_dom::{CompilationUnit, GeneratedJavaFile, GeneratedXmlFile};
use mapgen_introspect::IntrospectedTable;
use mapgen_plugins::{ClientMethodKind, PluginContext, PluginRegistry};
use tracing::{debug, info, instrument};

/// Everything one run produced
#[derive(Debug, Default)]
pub struct GenerationOutput {
    pub java_files: Vec<GeneratedJavaFile>,
    pub xml_files: Vec<GeneratedXmlFile>,
    /// Plugins disabled during validation, as `name: reason`
    pub warnings: Vec<String>,
}

impl GenerationOutput {
    pub fn java_file(&self, full_name: &str) -> Option<&GeneratedJavaFile> {
        self.java_files
            .iter()
            .find(|f| f.unit.ty().full_name() == full_name)
    }

    pub fn xml_file(&self, file_name: &str) -> Option<&GeneratedXmlFile> {
        self.xml_files.iter().find(|f| f.file_name == file_name)
    }
}

/// Drives one generation run over a set of tables
///
/// Plugins are validated once when the generator is built; the generator is
/// consumed by `run` because plugins accumulate state across tables.
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    registry: PluginRegistry,
    warnings: Vec<String>,
}

impl Generator {
    /// Build the plugins named in the config and validate them
    pub fn new(config: &GeneratorConfig) -> GeneratorResult<Self> {
        let registry = PluginRegistry::from_configs(&config.plugins)?;
        Self::with_registry(config, registry)
    }

    pub fn with_registry(config: &GeneratorConfig, mut registry: PluginRegistry) -> GeneratorResult<Self> {
        let mut ctx = PluginContext::new(config.target_project.clone())
            .with_sql_map_target_project(config.sql_map_target_project.clone());
        let warnings = registry.validate(&mut ctx)?;
        info!(
            plugins = ?registry.names(),
            disabled = warnings.len(),
            "plugins validated"
        );

        Ok(Self {
            config: config.clone(),
            registry,
            warnings,
        })
    }

    /// Plugins dropped during validation
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn run(mut self, tables: Vec<IntrospectedTable>) -> GeneratorResult<GenerationOutput> {
        if tables.is_empty() {
            return Err(GeneratorError::NoTables);
        }

        let mut output = GenerationOutput {
            warnings: std::mem::take(&mut self.warnings),
            ..Default::default()
        };

        for table in tables {
            self.generate_table(table, &mut output);
        }

        output.java_files.extend(self.registry.additional_java_files());
        output.xml_files.extend(self.registry.additional_xml_files());

        info!(
            java_files = output.java_files.len(),
            xml_files = output.xml_files.len(),
            "generation complete"
        );
        Ok(output)
    }

    #[instrument(skip(self, table, output), fields(table = %table.key()))]
    fn generate_table(&mut self, mut table: IntrospectedTable, output: &mut GenerationOutput) {
        self.registry.initialized(&mut table);
        let target = self.config.target_project.as_str();

        if let Some(key) = model::key_class(&table) {
            output
                .java_files
                .push(GeneratedJavaFile::new(CompilationUnit::Class(key), target));
        }
        output.java_files.push(GeneratedJavaFile::new(
            CompilationUnit::Class(model::record_class(&table)),
            target,
        ));

        if table.example_enabled {
            let mut example = model::example_class(&table);
            if self.registry.model_example_class_generated(&mut example, &table) {
                output
                    .java_files
                    .push(GeneratedJavaFile::new(CompilationUnit::Class(example), target));
            }
        }

        let styles = self.config.client_style.styles();
        let mut mapper = client::client_interface(&table);
        for kind in ClientMethodKind::ALL {
            let mut method = match client::client_method(kind, &table) {
                Some(method) => method,
                None => continue,
            };
            // every style is notified even after one of them drops the method
            let mut keep = true;
            for style in &styles {
                keep &= self
                    .registry
                    .client_method_generated(kind, &mut method, *style, &table);
            }
            if keep {
                client::add_client_method(&mut mapper, method);
            } else {
                debug!(method = kind.method_name(), "client method removed by plugin");
            }
        }

        let mut keep_mapper = true;
        for style in &styles {
            keep_mapper &= self.registry.client_generated(&mut mapper, *style, &table);
        }
        if keep_mapper {
            output
                .java_files
                .push(GeneratedJavaFile::new(CompilationUnit::Interface(mapper), target));
        }

        let mut document = sqlmap::base_document(&table);
        for kind in ClientMethodKind::ALL {
            let mut element = match sqlmap::statement(kind, &table) {
                Some(element) => element,
                None => continue,
            };
            if self.registry.sql_map_element_generated(kind, &mut element, &table) {
                document.root.add_child(element);
            }
        }

        if self.registry.sql_map_document_generated(&mut document, &table) {
            output.xml_files.push(GeneratedXmlFile::new(
                document,
                table.xml_mapper_file_name(),
                table.xml_mapper_package.clone(),
                self.config.sql_map_target_project.clone(),
            ));
        }
    }
}
