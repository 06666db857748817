//! Subcommand implementations.
//!
//! Commands write through [`Io`] so tests can capture output.

pub mod ask;
pub mod delete;
pub mod doctor;
pub mod sessions;
pub mod show;

use std::io::{Read, Write};

use agent_adapter::AgentKind;
use anyhow::Result;
use session_store::SessionStore;

use crate::config::Config;
use crate::paths::HirePaths;

/// Everything a command reads: paths, the effective config and the store.
#[derive(Debug, Clone)]
pub struct Context {
    pub paths: HirePaths,
    pub config: Config,
    pub store: SessionStore,
}

impl Context {
    /// Loads config once for the whole command.
    #[must_use]
    pub fn load(paths: HirePaths) -> Self {
        let config = Config::load(&paths.config_path());
        Self::with_config(paths, config)
    }

    #[must_use]
    pub fn with_config(paths: HirePaths, config: Config) -> Self {
        let store = SessionStore::new(paths.sessions_dir());
        Self {
            paths,
            config,
            store,
        }
    }
}

pub struct Io<'a> {
    pub stdin: &'a mut dyn Read,
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
}

pub(crate) fn parse_agent(name: Option<&str>) -> Result<Option<AgentKind>> {
    Ok(name.map(str::parse::<AgentKind>).transpose()?)
}
