//! Host I/O boundary
//!
//! The interpreter never touches stdio directly; all output and input go
//! through a [`Host`]. The CLI uses [`StdHost`]; tests use [`MockHost`] to
//! record output lines and replay scripted input.

use std::collections::VecDeque;
use std::io::{self, BufRead};

pub trait Host {
    /// Emit one line of program output.
    fn output(&mut self, text: &str);
    /// Read one line of program input, without the trailing newline.
    fn input(&mut self) -> String;
}

/// Standard input/output host used by the CLI.
pub struct StdHost;

impl Host for StdHost {
    fn output(&mut self, text: &str) {
        println!("{}", text);
    }

    fn input(&mut self) -> String {
        let mut line = String::new();
        // EOF reads as an empty line
        let _ = io::stdin().lock().read_line(&mut line);
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        line
    }
}

/// Scripted host for tests.
#[derive(Default)]
pub struct MockHost {
    pub outputs: Vec<String>,
    inputs: VecDeque<String>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs(inputs: &[&str]) -> Self {
        MockHost {
            outputs: Vec::new(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Host for MockHost {
    fn output(&mut self, text: &str) {
        self.outputs.push(text.to_string());
    }

    fn input(&mut self) -> String {
        self.inputs.pop_front().unwrap_or_default()
    }
}
