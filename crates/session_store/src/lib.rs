mod error;
mod paths;
mod replay;
mod schema;
mod store;

pub use error::SessionStoreError;
pub use paths::{session_file_name, session_path, sessions_root, SESSIONS_DIR};
pub use schema::{now_rfc3339, SessionMessage, SessionRecord, SESSION_VERSION};
pub use store::SessionStore;
