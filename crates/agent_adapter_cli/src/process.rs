use std::io::{self, Write};
use std::process::{Command, Stdio};

use agent_adapter::{AdapterError, AgentKind};
use tracing::debug;

/// One fully resolved subprocess call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliInvocation {
    pub program: String,
    pub args: Vec<String>,
    /// Written to the child's stdin, which is then closed.
    pub stdin: String,
}

/// Captured result of a finished subprocess.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliOutput {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CliOutput {
    #[must_use]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    #[must_use]
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

pub trait ProcessRunner: Send + Sync {
    fn run(&self, invocation: &CliInvocation) -> io::Result<CliOutput>;
}

/// Runs invocations with `std::process::Command`, blocking until exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, invocation: &CliInvocation) -> io::Result<CliOutput> {
        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdin = child.stdin.take();
        let input = invocation.stdin.as_bytes();
        let output = std::thread::scope(|scope| {
            // Stdin is fed while output is collected.
            scope.spawn(move || {
                if let Some(mut stdin) = stdin {
                    let _ = stdin.write_all(input);
                }
            });
            child.wait_with_output()
        })?;

        Ok(CliOutput {
            code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Runs `invocation` and maps launch failures and non-zero exits into the
/// adapter error taxonomy. Only successful exits come back as `Ok`.
pub fn run_backend(
    runner: &dyn ProcessRunner,
    agent: AgentKind,
    invocation: &CliInvocation,
) -> Result<CliOutput, AdapterError> {
    debug!(
        agent = agent.name(),
        program = %invocation.program,
        args = ?invocation.args,
        "spawning backend"
    );

    let output = runner.run(invocation).map_err(|error| {
        if error.kind() == io::ErrorKind::NotFound {
            AdapterError::Launch(format!(
                "{} not found. Is {} installed?",
                invocation.program,
                agent.name()
            ))
        } else {
            AdapterError::Launch(format!(
                "Failed to launch {}: {error}",
                invocation.program
            ))
        }
    })?;

    debug!(
        agent = agent.name(),
        code = ?output.code,
        stdout_bytes = output.stdout.len(),
        stderr_bytes = output.stderr.len(),
        "backend exited"
    );

    if output.success {
        Ok(output)
    } else {
        Err(AdapterError::BackendExecution {
            agent: agent.label().to_string(),
            code: output.code,
            stderr: output.stderr,
            stdout: output.stdout,
        })
    }
}


#[cfg(test)]
mod tests {
    use std::io;

    use pretty_assertions::assert_eq;

    use super::testing::FakeRunner;
    use super::*;

    fn invocation(program: &str) -> CliInvocation {
        CliInvocation {
            program: program.to_string(),
            args: vec!["-p".to_string()],
            stdin: "hello".to_string(),
        }
    }

    #[test]
    fn missing_executable_names_the_agent() {
        let runner = FakeRunner::returning(Err(io::Error::from(io::ErrorKind::NotFound)));

        let error = run_backend(&runner, AgentKind::Claude, &invocation("claude-dev"))
            .expect_err("missing executable must fail");

        assert_eq!(
            error.to_string(),
            "claude-dev not found. Is claude installed?"
        );
    }

    #[test]
    fn non_zero_exit_keeps_stderr_and_stdout() {
        let runner = FakeRunner::returning(Ok(CliOutput {
            code: Some(2),
            success: false,
            stdout: "partial".to_string(),
            stderr: "bad flag".to_string(),
        }));

        let error = run_backend(&runner, AgentKind::Codex, &invocation("codex"))
            .expect_err("exit 2 must fail");

        assert_eq!(
            error,
            AdapterError::BackendExecution {
                agent: "Codex".to_string(),
                code: Some(2),
                stderr: "bad flag".to_string(),
                stdout: "partial".to_string(),
            }
        );
    }

    #[test]
    fn successful_exit_passes_output_through() {
        let runner = FakeRunner::returning(Ok(CliOutput::ok("{}")));

        let output = run_backend(&runner, AgentKind::Gemini, &invocation("gemini"))
            .expect("exit 0 succeeds");

        assert_eq!(output.stdout, "{}");
        assert_eq!(runner.only_call(), invocation("gemini"));
    }
}
