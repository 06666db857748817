//! System clipboard through the platform's copy command.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

type CopyCommand = (&'static str, &'static [&'static str]);

const MACOS_COMMANDS: &[CopyCommand] = &[("pbcopy", &[])];
const WINDOWS_COMMANDS: &[CopyCommand] = &[("clip", &[])];
// Wayland first, then X11.
const UNIX_COMMANDS: &[CopyCommand] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Copy commands to try in order on this platform.
#[must_use]
pub fn candidates() -> &'static [CopyCommand] {
    if cfg!(target_os = "macos") {
        MACOS_COMMANDS
    } else if cfg!(target_os = "windows") {
        WINDOWS_COMMANDS
    } else {
        UNIX_COMMANDS
    }
}

/// Copies `text`, returning false when no command succeeded.
pub fn copy_to_clipboard(text: &str) -> bool {
    candidates()
        .iter()
        .any(|(program, args)| copy_with_command(program, args, text))
}

fn copy_with_command(program: &str, args: &[&str], text: &str) -> bool {
    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(error) => {
            debug!(program, %error, "clipboard command unavailable");
            return false;
        }
    };

    if let Some(mut stdin) = child.stdin.take() {
        if stdin.write_all(text.as_bytes()).is_err() {
            let _ = child.kill();
            let _ = child.wait();
            return false;
        }
    }

    child.wait().map(|status| status.success()).unwrap_or(false)
}
