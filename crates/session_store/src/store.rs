use std::fs;
use std::path::{Path, PathBuf};

use agent_adapter::AgentKind;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::error::SessionStoreError;
use crate::paths::session_path;
use crate::schema::{new_session_id, now_rfc3339, SessionRecord, SESSION_VERSION};

const MAX_ID_ATTEMPTS: usize = 16;

/// Directory of session records, one JSON file per session grouped by agent.
#[derive(Debug, Clone)]
pub struct SessionStore {
    root: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Starts a new in-memory session; nothing is written until [`Self::save`].
    /// The id is unused by every agent on disk.
    pub fn create(
        &self,
        agent: AgentKind,
        name: Option<String>,
    ) -> Result<SessionRecord, SessionStoreError> {
        self.create_with_ids(agent, name, new_session_id)
    }

    pub(crate) fn create_with_ids(
        &self,
        agent: AgentKind,
        name: Option<String>,
        mut next_id: impl FnMut() -> String,
    ) -> Result<SessionRecord, SessionStoreError> {
        let created_at = now_rfc3339()?;
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = next_id();
            if self.id_in_use(&id) {
                debug!(%id, "session id already taken");
                continue;
            }
            return Ok(SessionRecord::with_id(id, agent, name, created_at));
        }
        Err(SessionStoreError::IdExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    fn id_in_use(&self, id: &str) -> bool {
        AgentKind::ALL
            .into_iter()
            .any(|agent| session_path(&self.root, agent, id).exists())
    }

    #[must_use]
    pub fn path_for(&self, record: &SessionRecord) -> PathBuf {
        session_path(&self.root, record.agent, &record.id)
    }

    /// Writes the record as pretty JSON through a temporary file and rename.
    pub fn save(&self, record: &SessionRecord) -> Result<PathBuf, SessionStoreError> {
        let path = self.path_for(record);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| {
                SessionStoreError::io("creating session directory", parent, source)
            })?;
        }

        let mut contents = serde_json::to_string_pretty(record)
            .map_err(|source| SessionStoreError::json_serialize(&path, source))?;
        contents.push('\n');

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, contents)
            .map_err(|source| SessionStoreError::io("writing session file", &temp_path, source))?;
        fs::rename(&temp_path, &path)
            .map_err(|source| SessionStoreError::io("replacing session file", &path, source))?;

        debug!(session = %record.id, path = %path.display(), "session saved");
        Ok(path)
    }

    /// Reads and validates one record file.
    pub fn read(path: &Path) -> Result<SessionRecord, SessionStoreError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| SessionStoreError::io("reading session file", path, source))?;
        let record: SessionRecord = serde_json::from_str(&contents)
            .map_err(|source| SessionStoreError::json_parse(path, source))?;
        validate_record(path, &record)?;
        Ok(record)
    }

    /// Loads a session by exact id, searching every agent directory.
    pub fn load(&self, id: &str) -> Result<SessionRecord, SessionStoreError> {
        for agent in AgentKind::ALL {
            let path = session_path(&self.root, agent, id);
            if path.is_file() {
                return Self::read(&path);
            }
        }
        Err(SessionStoreError::NotFound {
            query: id.to_string(),
        })
    }

    /// Finds a session by exact id, then unique id prefix, then name.
    ///
    /// Several sessions sharing a name resolve to the most recently updated one.
    pub fn resolve(&self, id_or_name: &str) -> Result<SessionRecord, SessionStoreError> {
        let query = id_or_name.trim();
        if query.is_empty() {
            return Err(SessionStoreError::NotFound {
                query: id_or_name.to_string(),
            });
        }

        let records = self.list(None)?;
        if let Some(record) = records.iter().find(|record| record.id == query) {
            return Ok(record.clone());
        }

        let prefixed: Vec<&SessionRecord> = records
            .iter()
            .filter(|record| record.id.starts_with(query))
            .collect();
        match prefixed.as_slice() {
            [record] => return Ok((*record).clone()),
            [] => {}
            many => {
                return Err(SessionStoreError::Ambiguous {
                    query: query.to_string(),
                    matches: many.iter().map(|record| record.id.clone()).collect(),
                });
            }
        }

        records
            .into_iter()
            .find(|record| record.name.as_deref() == Some(query))
            .ok_or_else(|| SessionStoreError::NotFound {
                query: query.to_string(),
            })
    }

    /// Most recently updated session of `agent`, if any.
    pub fn latest(&self, agent: AgentKind) -> Result<Option<SessionRecord>, SessionStoreError> {
        Ok(self.list(Some(agent))?.into_iter().next())
    }

    /// All readable sessions, newest first. Unreadable files are skipped with a
    /// warning.
    pub fn list(&self, agent: Option<AgentKind>) -> Result<Vec<SessionRecord>, SessionStoreError> {
        let agents: Vec<AgentKind> = match agent {
            Some(agent) => vec![agent],
            None => AgentKind::ALL.to_vec(),
        };

        let mut records = Vec::new();
        for agent in agents {
            let dir = self.root.join(agent.name());
            for path in record_files(&dir)? {
                match Self::read(&path) {
                    Ok(record) => records.push(record),
                    Err(error) => warn!(%error, "skipping unreadable session"),
                }
            }
        }

        records.sort_by(|left, right| {
            right
                .updated_at_time()
                .cmp(&left.updated_at_time())
                .then_with(|| left.id.cmp(&right.id))
        });
        Ok(records)
    }

    pub fn count(&self) -> Result<usize, SessionStoreError> {
        Ok(self.list(None)?.len())
    }

    /// Removes the session file for `record`.
    pub fn delete(&self, record: &SessionRecord) -> Result<(), SessionStoreError> {
        let path = self.path_for(record);
        fs::remove_file(&path)
            .map_err(|source| SessionStoreError::io("deleting session file", &path, source))?;
        debug!(session = %record.id, "session deleted");
        Ok(())
    }

    /// Removes every session, or every session of one agent. Returns how many
    /// were deleted.
    pub fn delete_all(&self, agent: Option<AgentKind>) -> Result<usize, SessionStoreError> {
        let records = self.list(agent)?;
        for record in &records {
            self.delete(record)?;
        }
        Ok(records.len())
    }
}

fn record_files(dir: &Path) -> Result<Vec<PathBuf>, SessionStoreError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(SessionStoreError::io(
                "listing session directory",
                dir,
                source,
            ))
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|source| SessionStoreError::io("listing session directory", dir, source))?;
        let path = entry.path();
        if path.extension().is_some_and(|extension| extension == "json") && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub(crate) fn validate_record(
    path: &Path,
    record: &SessionRecord,
) -> Result<(), SessionStoreError> {
    if record.version != SESSION_VERSION {
        return Err(SessionStoreError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: record.version,
        });
    }

    validate_rfc3339(path, "created_at", &record.created_at)?;
    validate_rfc3339(path, "updated_at", &record.updated_at)?;
    for message in &record.messages {
        validate_rfc3339(path, "ts", &message.ts)?;
    }

    Ok(())
}

pub(crate) fn validate_rfc3339(
    path: &Path,
    field: &'static str,
    value: &str,
) -> Result<(), SessionStoreError> {
    if OffsetDateTime::parse(value, &Rfc3339).is_err() {
        return Err(SessionStoreError::InvalidTimestamp {
            path: path.to_path_buf(),
            field,
            value: value.to_string(),
        });
    }

    Ok(())
}
