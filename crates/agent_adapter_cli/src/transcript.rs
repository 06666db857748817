use agent_adapter::{HistoryEntry, Role};

/// Renders prior turns plus the new message as a plain-text prompt.
///
/// With no history the message is returned as is. Otherwise each turn becomes
/// a `User:` or `Assistant:` block, blocks are separated by a blank line and
/// the new message closes the transcript as a final `User:` block.
#[must_use]
pub fn render_transcript(history: &[HistoryEntry], message: &str) -> String {
    if history.is_empty() {
        return message.to_string();
    }

    let mut blocks: Vec<String> = history
        .iter()
        .map(|entry| format!("{}: {}", speaker(entry.role), entry.content.text()))
        .collect();
    blocks.push(format!("{}: {message}", speaker(Role::User)));
    blocks.join("\n\n")
}

fn speaker(role: Role) -> &'static str {
    match role {
        Role::User => "User",
        Role::Assistant => "Assistant",
    }
}
