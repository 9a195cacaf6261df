//! Generate-or-reuse and update entry points over a module directory.

use crate::error::Result;
use crate::event_log::{self, EventLog};
use crate::handler::{Generation, ModuleHandler};
use crate::log_debug;
use crate::store::{ModuleStore, validate_module_name};
use std::path::PathBuf;

/// What an import or update did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The module already existed and was left alone
    Existing(PathBuf),
    /// Source was produced by the LLM and written
    Generated {
        path: PathBuf,
        generation: Generation,
    },
}

impl Outcome {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Existing(path) | Self::Generated { path, .. } => path,
        }
    }
}

pub struct Workflow {
    handler: ModuleHandler,
    store: ModuleStore,
    events: EventLog,
}

impl Workflow {
    pub fn new(handler: ModuleHandler, store: ModuleStore, events: EventLog) -> Self {
        Self {
            handler,
            store,
            events,
        }
    }

    /// Return the module if it exists, otherwise generate it from `intent`.
    /// With `overwrite` an existing module is regenerated.
    pub async fn import(
        &self,
        module_name: &str,
        intent: &str,
        overwrite: bool,
    ) -> Result<Outcome> {
        validate_module_name(module_name)?;

        if self.store.exists(module_name) && !overwrite {
            log_debug!("Module '{}' exists, skipping generation", module_name);
            return Ok(Outcome::Existing(self.store.path_for(module_name)));
        }

        let generation = self.handler.generate(intent).await?;
        self.finish(module_name, generation)
    }

    /// Rewrite an existing module according to `intent`
    pub async fn update(&self, module_name: &str, intent: &str) -> Result<Outcome> {
        validate_module_name(module_name)?;

        let existing_source = self.store.read(module_name)?;
        let generation = self.handler.update(&existing_source, intent).await?;
        self.finish(module_name, generation)
    }

    fn finish(&self, module_name: &str, generation: Generation) -> Result<Outcome> {
        self.events
            .record(module_name, event_log::PROMPT, &generation.prompt)?;
        self.events
            .record(module_name, event_log::RESPONSE, &generation.raw_response)?;

        let path = self.store.write(module_name, &generation.source)?;
        Ok(Outcome::Generated { path, generation })
    }
}
