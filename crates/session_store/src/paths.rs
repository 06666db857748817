use std::path::{Path, PathBuf};

use agent_adapter::AgentKind;

pub const SESSIONS_DIR: &str = "sessions";

/// `<data_dir>/sessions`.
#[must_use]
pub fn sessions_root(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSIONS_DIR)
}

#[must_use]
pub fn session_file_name(session_id: &str) -> String {
    format!("{session_id}.json")
}

/// `<root>/<agent>/<id>.json`.
#[must_use]
pub fn session_path(root: &Path, agent: AgentKind, session_id: &str) -> PathBuf {
    root.join(agent.name()).join(session_file_name(session_id))
}
