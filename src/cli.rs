use clap::{ArgAction, Args, Parser, Subcommand};

/// Ask AI agents from the command line.
#[derive(Parser, Debug)]
#[command(name = "hire", version, about, disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a message to an agent
    Ask(AskArgs),

    /// List stored sessions, newest first
    Sessions(SessionsArgs),

    /// Print a session transcript
    Show(ShowArgs),

    /// Delete one session or many
    Delete(DeleteArgs),

    /// Check installed agents and configuration
    Doctor,
}

#[derive(Args, Debug, Default)]
pub struct AskArgs {
    /// Optional agent name followed by the message. Use `-` or omit the
    /// message to read it from stdin.
    #[arg(value_name = "[AGENT] MESSAGE")]
    pub words: Vec<String>,

    /// Continue a session by id, id prefix or name
    #[arg(short, long, value_name = "ID|NAME", conflicts_with = "continue_latest")]
    pub session: Option<String>,

    /// Continue the most recent session of the agent
    #[arg(short = 'c', long = "continue")]
    pub continue_latest: bool,

    /// Name for a new session
    #[arg(short, long, conflicts_with_all = ["session", "continue_latest"])]
    pub name: Option<String>,

    /// Model override
    #[arg(short, long)]
    pub model: Option<String>,

    /// Copy the response to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Default)]
pub struct SessionsArgs {
    /// Only sessions of this agent
    #[arg(short, long)]
    pub agent: Option<String>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Session id, id prefix or name
    pub session: String,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Default)]
pub struct DeleteArgs {
    /// Session id, id prefix or name
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub session: Option<String>,

    /// Delete every session
    #[arg(long)]
    pub all: bool,

    /// With --all, only sessions of this agent
    #[arg(short, long, requires = "all")]
    pub agent: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Command};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn ask_collects_words_and_flags() {
        let cli = Cli::try_parse_from(["hire", "-vv", "ask", "grok", "-m", "grok-3", "explain", "@main.rs"])
            .expect("valid ask");

        assert_eq!(cli.verbose, 2);
        let Command::Ask(args) = cli.command else {
            panic!("expected ask");
        };
        assert_eq!(args.words, vec!["grok", "explain", "@main.rs"]);
        assert_eq!(args.model.as_deref(), Some("grok-3"));
    }

    #[test]
    fn delete_needs_a_target_or_all() {
        assert!(Cli::try_parse_from(["hire", "delete"]).is_err());
        assert!(Cli::try_parse_from(["hire", "delete", "abc", "--all"]).is_err());
        assert!(Cli::try_parse_from(["hire", "delete", "--all", "-a", "grok"]).is_ok());
    }

    #[test]
    fn session_and_continue_are_exclusive() {
        assert!(Cli::try_parse_from(["hire", "ask", "-s", "x", "-c", "hi"]).is_err());
    }
}
