#![allow(dead_code)]

use microsh::{Error, ExecStatus, Line, Shell, Terminal};

/// Terminal that records everything printed and every echo toggle.
#[derive(Debug)]
pub struct Recorder {
    pub output: String,
    pub echo: bool,
    pub echo_changes: usize,
}

impl Default for Recorder {
    fn default() -> Self {
        Self {
            output: String::new(),
            echo: true,
            echo_changes: 0,
        }
    }
}

impl Terminal for Recorder {
    fn print(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn set_echo(&mut self, enabled: bool) {
        self.echo = enabled;
        self.echo_changes += 1;
    }
}

pub type TestShell<const N: usize = 8, const C: usize = 2> = Shell<Recorder, N, C>;

/// Take and clear whatever the shell printed so far.
pub fn take_output<const N: usize, const C: usize>(shell: &mut TestShell<N, C>) -> String {
    std::mem::take(&mut shell.terminal_mut().output)
}

/// Tokenize and process one line.
pub fn run<const N: usize, const C: usize>(shell: &mut TestShell<N, C>, input: &str) -> ExecStatus {
    let mut line: Line = Line::parse(input).unwrap();
    shell.process(&mut line)
}

/// Handler that reports which command ran and with how many tokens.
pub fn ran<const N: usize, const C: usize>(
    sh: &mut TestShell<N, C>,
    args: &[&str],
) -> Result<(), Error> {
    let text = format!("[ran {} argc={}]", args[0], args.len());
    sh.print(&text);
    Ok(())
}

/// Handler that always fails.
pub fn fails<const N: usize, const C: usize>(
    sh: &mut TestShell<N, C>,
    _args: &[&str],
) -> Result<(), Error> {
    sh.print("[fails]");
    Err(Error::Parameter)
}
