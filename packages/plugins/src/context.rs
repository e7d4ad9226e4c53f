use crate::error::{PluginError, PluginResult};
use crate::generic::ContributionHandle;

/// Run-wide values shared with plugins during validation
///
/// Replaces any global lookup: the generic interface plugin registers its
/// handle here and dependent plugins fetch it when they validate.
#[derive(Debug, Default)]
pub struct PluginContext {
    java_target_project: String,
    sql_map_target_project: String,
    generic: Option<ContributionHandle>,
}

impl PluginContext {
    pub fn new(java_target_project: impl Into<String>) -> Self {
        Self {
            java_target_project: java_target_project.into(),
            sql_map_target_project: String::new(),
            generic: None,
        }
    }

    pub fn with_sql_map_target_project(mut self, project: impl Into<String>) -> Self {
        self.sql_map_target_project = project.into();
        self
    }

    /// Source root for Java files created by plugins
    pub fn java_target_project(&self) -> &str {
        &self.java_target_project
    }

    /// Resource root for mapper XML files created by plugins
    pub fn sql_map_target_project(&self) -> &str {
        &self.sql_map_target_project
    }

    pub fn provide_generic(&mut self, handle: ContributionHandle) -> PluginResult<()> {
        if self.generic.is_some() {
            return Err(PluginError::InvocationOrder(
                "a generic interface is already registered for this run".to_string(),
            ));
        }
        self.generic = Some(handle);
        Ok(())
    }

    /// The active generic interface, or a dependency error naming `requester`
    pub fn lookup_generic(&self, requester: &str) -> PluginResult<ContributionHandle> {
        self.generic.clone().ok_or_else(|| PluginError::Dependency {
            plugin: requester.to_string(),
        })
    }

    pub fn has_generic(&self) -> bool {
        self.generic.is_some()
    }
}
