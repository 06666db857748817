use std::io::Write;

use anyhow::Result;

use super::{parse_agent, Context, Io};
use crate::cli::DeleteArgs;

pub fn run(ctx: &Context, args: &DeleteArgs, io: &mut Io<'_>) -> Result<()> {
    if args.all {
        let agent = parse_agent(args.agent.as_deref())?;
        let deleted = ctx.store.delete_all(agent)?;
        writeln!(io.stdout, "Deleted {deleted} session(s)")?;
        return Ok(());
    }

    let Some(query) = args.session.as_deref() else {
        anyhow::bail!("Specify a session or use --all");
    };
    let session = ctx.store.resolve(query)?;
    ctx.store.delete(&session)?;
    writeln!(io.stdout, "Deleted session {}", session.id)?;
    Ok(())
}
