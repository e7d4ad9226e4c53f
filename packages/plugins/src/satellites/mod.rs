//! Plugins that add methods to the shared generic interface
//!
//! Each one declares its methods on the generic interface once per run,
//! guarded by the contribution registry, and writes its statements into
//! every table's mapper XML.

mod exist_by_example;
mod manual_query;
mod page;
mod select_one_by_example;
pub(crate) mod sql;
mod update_select_null;

pub use exist_by_example::ExistByExamplePlugin;
pub use manual_query::ManualQueryPlugin;
pub use page::PageWindow;
pub use select_one_by_example::SelectOneByExamplePlugin;
pub use update_select_null::UpdateSelectNullPlugin;

use crate::context::PluginContext;
use crate::error::{PluginError, PluginResult};
use crate::generic::ContributionHandle;

/// Fetch the generic interface for a satellite, optionally requiring
/// example support
pub(crate) fn require_generic(
    ctx: &PluginContext,
    plugin: &str,
    needs_example: bool,
) -> PluginResult<ContributionHandle> {
    let handle = ctx.lookup_generic(plugin)?;
    if needs_example && !handle.example_enabled() {
        return Err(PluginError::Config {
            plugin: plugin.to_string(),
            message: "the generic interface must be declared with example=true".to_string(),
        });
    }
    Ok(handle)
}
