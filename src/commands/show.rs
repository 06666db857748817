use std::io::Write;

use agent_adapter::Role;
use anyhow::Result;

use super::{Context, Io};
use crate::cli::ShowArgs;

pub fn run(ctx: &Context, args: &ShowArgs, io: &mut Io<'_>) -> Result<()> {
    let session = ctx.store.resolve(&args.session)?;

    if args.json {
        writeln!(io.stdout, "{}", serde_json::to_string_pretty(&session)?)?;
        return Ok(());
    }

    writeln!(io.stdout, "Session {} ({})", session.id, session.agent)?;
    if let Some(name) = &session.name {
        writeln!(io.stdout, "Name: {name}")?;
    }
    if let Some(model) = &session.model {
        writeln!(io.stdout, "Model: {model}")?;
    }
    if let Some(backend) = &session.backend_session_id {
        writeln!(io.stdout, "Backend session: {backend}")?;
    }
    writeln!(io.stdout, "Created: {}", session.created_at)?;
    writeln!(io.stdout, "Updated: {}", session.updated_at)?;

    for message in &session.messages {
        let speaker = match message.role {
            Role::User => "You",
            Role::Assistant => session.agent.label(),
        };
        writeln!(io.stdout)?;
        writeln!(io.stdout, "[{speaker}] {}", message.ts)?;
        writeln!(io.stdout, "{}", message.content)?;
        for file in &message.files {
            writeln!(io.stdout, "  @{}", file.display())?;
        }
    }
    Ok(())
}
