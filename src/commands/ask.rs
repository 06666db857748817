use std::io::{Read, Write};
use std::path::PathBuf;

use agent_adapter::{AgentKind, AskRequest};
use anyhow::{anyhow, bail, Context as _, Result};
use serde_json::json;
use session_store::SessionRecord;
use tracing::{info, warn};

use super::{Context, Io};
use crate::adapters::AdapterFactory;
use crate::cli::AskArgs;
use crate::clipboard::copy_to_clipboard;
use crate::files::extract_file_refs;

/// Sends one message and records the exchange.
///
/// Nothing is written to the session store unless the backend answered.
pub fn run(
    ctx: &Context,
    args: &AskArgs,
    adapters: &dyn AdapterFactory,
    io: &mut Io<'_>,
) -> Result<()> {
    let (explicit_agent, words) = split_agent(&args.words);
    let mut message = words.join(" ");
    if message.trim().is_empty() || message.trim() == "-" {
        message = read_message(io)?;
    }
    if message.trim().is_empty() {
        bail!("Message is empty");
    }

    let mut session = select_session(ctx, args, explicit_agent)?;
    let agent = session.agent;
    let adapter = adapters.build(agent, &ctx.config);

    let (text, files): (String, Vec<PathBuf>) = if adapter.supports_attachments() {
        extract_file_refs(&message)
    } else {
        (message, Vec::new())
    };
    if text.trim().is_empty() {
        bail!("Message is empty");
    }

    let model = args.model.clone().or_else(|| session.model.clone());
    info!(
        agent = agent.name(),
        session = %session.id,
        files = files.len(),
        history = session.messages.len(),
        "asking"
    );
    let request = AskRequest::new(text.clone())
        .with_session_id(session.backend_session_id.clone())
        .with_model(model)
        .with_history(session.history())
        .with_files(files.clone());

    let result = adapter.ask(request);
    if let Some(error) = result.error {
        return Err(anyhow!(error));
    }
    let response = result.response.unwrap_or_default();

    session.push_turn(
        &text,
        &files,
        &response,
        result.session_id.clone(),
        args.model.clone(),
    )?;
    ctx.store
        .save(&session)
        .with_context(|| format!("could not save session {}", session.id))?;

    if args.json {
        let output = json!({
            "agent": agent.name(),
            "session": session.id,
            "response": response,
            "session_id": result.session_id,
            "raw": result.raw,
        });
        writeln!(io.stdout, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        writeln!(io.stdout, "{response}")?;
    }
    writeln!(io.stderr, "session: {}", session.id)?;

    if args.copy {
        if copy_to_clipboard(&response) {
            info!("response copied to clipboard");
        } else {
            warn!("could not copy to clipboard: no clipboard command succeeded");
        }
    }

    Ok(())
}

/// Splits a leading agent name off the words, if there is one.
fn split_agent(words: &[String]) -> (Option<AgentKind>, &[String]) {
    match words.split_first() {
        Some((first, rest)) => match first.parse::<AgentKind>() {
            Ok(agent) => (Some(agent), rest),
            Err(_) => (None, words),
        },
        None => (None, words),
    }
}

fn read_message(io: &mut Io<'_>) -> Result<String> {
    let mut message = String::new();
    io.stdin
        .read_to_string(&mut message)
        .context("could not read message from stdin")?;
    Ok(message.trim_end().to_string())
}

fn select_session(
    ctx: &Context,
    args: &AskArgs,
    explicit: Option<AgentKind>,
) -> Result<SessionRecord> {
    if let Some(query) = &args.session {
        let session = ctx.store.resolve(query)?;
        if let Some(agent) = explicit.filter(|agent| *agent != session.agent) {
            bail!(
                "Session {} belongs to {}, not {}",
                session.id,
                session.agent,
                agent
            );
        }
        return Ok(session);
    }

    let agent = match explicit {
        Some(agent) => agent,
        None => ctx.config.default_agent()?,
    };

    if args.continue_latest {
        if let Some(session) = ctx.store.latest(agent)? {
            return Ok(session);
        }
        info!(agent = agent.name(), "no previous session, starting a new one");
    }

    Ok(ctx.store.create(agent, args.name.clone())?)
}
