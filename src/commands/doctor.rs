//! Environment report: installed agents, config and sessions.

use std::io::Write;

use agent_adapter::AgentKind;
use agent_adapter_cli::CliOptions;
use agent_adapter_grok::GrokAdapter;
use anyhow::Result;

use super::{Context, Io};

/// Prints the report. Returns false when no agent at all is usable.
pub fn run(ctx: &Context, io: &mut Io<'_>) -> Result<bool> {
    let out = &mut *io.stdout;
    writeln!(out, "hire v{}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out)?;

    writeln!(out, "Checking agents...")?;
    let mut found = 0usize;
    let mut missing = 0usize;
    for agent in [AgentKind::Claude, AgentKind::Codex, AgentKind::Gemini] {
        let options = CliOptions::from_config(agent, &ctx.config.adapter_config(agent));
        match which::which(&options.command) {
            Ok(path) => {
                writeln!(out, "  \u{2713} {agent} - {}", path.display())?;
                found += 1;
            }
            Err(_) => {
                writeln!(out, "  \u{2717} {agent} - not found")?;
                missing += 1;
            }
        }
    }

    let grok = GrokAdapter::new(ctx.config.adapter_config(AgentKind::Grok));
    if grok.resolve_api_key().is_some() {
        writeln!(out, "  \u{2713} grok - API key configured")?;
        found += 1;
    } else {
        writeln!(
            out,
            "  \u{2717} grok - API key not found (set api_key in config or GROK_API_KEY env var)"
        )?;
        missing += 1;
    }
    writeln!(out)?;

    writeln!(out, "Checking config...")?;
    let config_path = ctx.paths.config_path();
    if config_path.exists() {
        writeln!(out, "  \u{2713} Config: {}", config_path.display())?;
    } else {
        writeln!(
            out,
            "  - Config: {} (not created yet, using defaults)",
            config_path.display()
        )?;
    }
    let session_count = ctx.store.count()?;
    writeln!(
        out,
        "  \u{2713} Sessions: {} ({session_count} sessions)",
        ctx.store.root().display()
    )?;
    writeln!(out)?;

    writeln!(out, "Effective config:")?;
    writeln!(out, "{}", serde_json::to_string_pretty(&ctx.config.masked())?)?;
    writeln!(out)?;

    if missing == 0 {
        writeln!(out, "All good!")?;
    } else if found == 0 {
        writeln!(
            out,
            "No agents found. Install at least one of: {}",
            AgentKind::available_names()
        )?;
        return Ok(false);
    } else {
        writeln!(out, "Ready! ({missing} agent(s) not installed)")?;
    }
    Ok(true)
}
