//! System Process Runner
//!
//! Spawns the program with `std::process::Command`, blocking until it exits.

use std::process::{Command, Stdio};

use crate::domain::ports::{ProcessOutput, ProcessRunner, ProcessSpec};

/// Runs processes on the host, inheriting its environment
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, spec: &ProcessSpec) -> std::io::Result<ProcessOutput> {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for key in &spec.env_remove {
            command.env_remove(key);
        }

        let output = command.output()?;
        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
