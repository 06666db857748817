use agent_adapter::HistoryEntry;

use crate::schema::SessionRecord;

impl SessionRecord {
    /// Stored messages as adapter history, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.messages
            .iter()
            .map(|message| HistoryEntry {
                role: message.role,
                content: message.content.clone().into(),
            })
            .collect()
    }
}
