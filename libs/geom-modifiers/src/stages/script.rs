//! Script stage and the process-wide script host.
//!
//! Scripting engines live outside this crate. An application installs one
//! [`ScriptHost`] with [`set_script_host`]; every [`Script`] stage then runs
//! its source through it. Without a host the stage warns and does nothing.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use geom_buffer::MeshBuffer;

use crate::error::ModifierError;
use crate::modifier::{modifier_common, Modifier, ModifierBase};
use crate::property::Properties;

/// Runs script source against a buffer.
pub trait ScriptHost: Send + Sync {
    /// Executes `source` with `buffer` in scope.
    ///
    /// # Errors
    ///
    /// A human readable message. The stage discards the buffer the script
    /// was working on in that case.
    fn run(&self, source: &str, buffer: &mut MeshBuffer) -> Result<(), String>;
}

type SharedHost = Arc<dyn ScriptHost>;

fn host_slot() -> &'static RwLock<Option<SharedHost>> {
    static HOST: OnceLock<RwLock<Option<SharedHost>>> = OnceLock::new();
    HOST.get_or_init(|| RwLock::new(None))
}

/// Installs (or with `None` removes) the process-wide script host.
///
/// # Returns
///
/// The previously installed host.
pub fn set_script_host(host: Option<SharedHost>) -> Option<SharedHost> {
    let mut slot = host_slot().write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *slot, host)
}

/// Currently installed script host.
pub fn script_host() -> Option<SharedHost> {
    host_slot()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Runs its source on the installed [`ScriptHost`].
///
/// The script works on a copy that replaces the buffer only on success.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    base: ModifierBase,
}

impl Script {
    /// Registry class name.
    pub const CLASS: &'static str = "Script";

    /// Creates the stage with default properties.
    pub fn new() -> Self {
        let mut props = Properties::new();
        props.define("script", "script", "Source run by the script host", "");
        Self {
            base: ModifierBase::new("script", props),
        }
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::new()
    }
}

impl Modifier for Script {
    modifier_common!();

    fn execute(&self, buffer: &mut MeshBuffer) -> Result<(), ModifierError> {
        let source = self
            .properties()
            .get_text("script")
            .map_err(|e| self.property_error(e))?;
        let Some(host) = script_host() else {
            log::warn!("no script host installed, '{}' stage skipped", Self::CLASS);
            return Ok(());
        };

        let mut work = buffer.clone();
        host.run(source, &mut work).map_err(|message| ModifierError::Script {
            stage: Self::CLASS.to_string(),
            message,
        })?;
        buffer.set_shared_vertices(work.shared_vertices(), work.share_threshold().unwrap_or(0.0));
        buffer.replace_geometry(work);
        Ok(())
    }
}
