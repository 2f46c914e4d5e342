//! ProcessRunner port - abstraction over external process execution
//!
//! The compiler invoker builds a `ProcessSpec` and hands it to a runner.
//! The system runner spawns the program; tests record the spec instead.

/// Description of one external process invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    /// Program looked up on the command search path
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
    /// Environment variables removed from the inherited environment
    pub env_remove: Vec<String>,
}

impl ProcessSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env_remove: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env_remove(mut self, key: impl Into<String>) -> Self {
        self.env_remove.push(key.into());
        self
    }

    /// Render as a shell-like command line for logging
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs external processes synchronously to completion
///
/// A program that cannot be found must be reported as an
/// `io::ErrorKind::NotFound` error, not as an output.
pub trait ProcessRunner {
    fn run(&self, spec: &ProcessSpec) -> std::io::Result<ProcessOutput>;
}

impl<T: ProcessRunner + ?Sized> ProcessRunner for &T {
    fn run(&self, spec: &ProcessSpec) -> std::io::Result<ProcessOutput> {
        (**self).run(spec)
    }
}
