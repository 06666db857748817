use std::io::Write;

use anyhow::Result;
use serde_json::json;

use super::{parse_agent, Context, Io};
use crate::cli::SessionsArgs;

const PREVIEW_CHARS: usize = 40;

pub fn run(ctx: &Context, args: &SessionsArgs, io: &mut Io<'_>) -> Result<()> {
    let agent = parse_agent(args.agent.as_deref())?;
    let sessions = ctx.store.list(agent)?;

    if args.json {
        let rows: Vec<_> = sessions
            .iter()
            .map(|session| {
                json!({
                    "id": session.id,
                    "agent": session.agent,
                    "name": session.name,
                    "model": session.model,
                    "turns": session.turn_count(),
                    "created_at": session.created_at,
                    "updated_at": session.updated_at,
                })
            })
            .collect();
        writeln!(io.stdout, "{}", serde_json::to_string_pretty(&rows)?)?;
        return Ok(());
    }

    if sessions.is_empty() {
        writeln!(io.stdout, "No sessions found.")?;
        return Ok(());
    }

    for session in &sessions {
        let first_message = session
            .messages
            .first()
            .map(|message| preview(&message.content))
            .unwrap_or_default();
        writeln!(
            io.stdout,
            "{}  {:<6}  {}  {:>3} turn(s)  {}  {}",
            session.id,
            session.agent.name(),
            session.updated_at,
            session.turn_count(),
            session.name.as_deref().unwrap_or("-"),
            first_message
        )?;
    }
    Ok(())
}

/// First line of `text`, cut to a short preview.
fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > PREVIEW_CHARS {
        let cut: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}
