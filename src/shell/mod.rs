//! Command dispatch.
//!
//! [`Shell`] ties together a [`Terminal`], a [`CommandTable`] of handlers and,
//! once [`Shell::session_init`] has been called, a login session. The engine
//! hands every finished [`Line`] to [`Shell::process`]:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Line editor    │───▶│  Session gate   │───▶│   Dispatcher    │
//! │  (tokenized     │    │  (until logged  │    │   (lookup, arg  │
//! │   Line)         │    │   in)           │    │   limit, -h)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!                                                        │
//!                                                        ▼
//!                        ┌─────────────────┐    ┌─────────────────┐
//!                        │  Post-exec hook │◀───│    Handler      │
//!                        │  (diagnostics)  │    │                 │
//!                        └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use microsh::error::Error;
//! use microsh::line::Line;
//! use microsh::shell::{ExecStatus, Shell};
//! use microsh::terminal::{OutputFn, Terminal};
//!
//! fn out(text: &str) {
//!     print!("{}", text);
//! }
//!
//! fn hello<T: Terminal, const N: usize, const C: usize>(
//!     sh: &mut Shell<T, N, C>,
//!     args: &[&str],
//! ) -> Result<(), Error> {
//!     sh.print("Hello, ");
//!     sh.println(args.get(1).copied().unwrap_or("World"));
//!     Ok(())
//! }
//!
//! let mut shell: Shell<OutputFn> = Shell::new(out as OutputFn);
//! shell.register(2, "hello", hello, "Say hello").unwrap();
//!
//! let mut line: Line = Line::parse("hello world").unwrap();
//! assert_eq!(shell.process(&mut line), ExecStatus::Ok);
//! ```

use core::fmt;

use crate::command::{Command, CommandTable, DEFAULT_MAX_COMMANDS};
use crate::config::Config;
use crate::error::Error;
use crate::line::Line;
use crate::session::{DEFAULT_MAX_CREDENTIALS, LoggedInFn, Session, SessionState};
use crate::terminal::Terminal;

/// Second token that turns any command into a help request.
pub const HELP_FLAG: &str = "-h";

/// Function signature for command handlers.
///
/// Handlers receive the shell, so they can print, log out or re-register
/// commands, and every token of the line with the command name at index 0.
/// The returned value is only logged; it does not change the
/// [`ExecStatus`] of the line.
pub type CommandFn<T, const N: usize, const C: usize> =
    fn(&mut Shell<T, N, C>, &[&str]) -> Result<(), Error>;

/// Outcome of processing one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStatus {
    /// A handler ran or help text was printed.
    Ok,
    /// The line was empty.
    NoCommand,
    /// The login gate rejected the line and already told the user why.
    Error,
    /// No command with that name is registered.
    UnknownCommand,
    /// More tokens than the command's `max_args`.
    TooManyArguments,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ExecStatus {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ExecStatus::Ok => defmt::write!(f, "Ok"),
            ExecStatus::NoCommand => defmt::write!(f, "NoCommand"),
            ExecStatus::Error => defmt::write!(f, "Error"),
            ExecStatus::UnknownCommand => defmt::write!(f, "UnknownCommand"),
            ExecStatus::TooManyArguments => defmt::write!(f, "TooManyArguments"),
        }
    }
}

/// A shell instance.
///
/// `N` is the command table capacity, `C` the credential capacity. The shell
/// is the only owner of its state; run one instance per console.
pub struct Shell<
    T,
    const N: usize = DEFAULT_MAX_COMMANDS,
    const C: usize = DEFAULT_MAX_CREDENTIALS,
> {
    pub(crate) terminal: T,
    pub(crate) config: Config,
    pub(crate) commands: CommandTable<CommandFn<T, N, C>, N>,
    pub(crate) session: Option<Session<C>>,
    pub(crate) post_login: Option<LoggedInFn<T, N, C>>,
}

impl<T: Terminal, const N: usize, const C: usize> Shell<T, N, C> {
    /// Create a shell with the default [`Config`] and an empty command table.
    pub fn new(terminal: T) -> Self {
        Self {
            terminal,
            config: Config::default(),
            commands: CommandTable::new(),
            session: None,
            post_login: None,
        }
    }

    /// Create a shell with a custom configuration.
    ///
    /// # Errors
    ///
    /// * [`Error::Parameter`] - `config` failed [`Config::validate`]
    pub fn with_config(terminal: T, config: Config) -> Result<Self, Error> {
        config.validate()?;
        let mut shell = Self::new(terminal);
        shell.config = config;
        Ok(shell)
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared access to the terminal.
    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Exclusive access to the terminal.
    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    /// Print `text` as is.
    pub fn print(&mut self, text: &str) {
        self.terminal.print(text);
    }

    /// Print `text` followed by the configured line terminator.
    pub fn println(&mut self, text: &str) {
        self.terminal.print(text);
        self.terminal.print(self.config.end_line.as_str());
    }

    /// Register a command. See [`CommandTable::register`].
    pub fn register(
        &mut self,
        max_args: usize,
        name: &'static str,
        handler: CommandFn<T, N, C>,
        description: &'static str,
    ) -> Result<(), Error> {
        self.commands.register(max_args, name, handler, description)
    }

    /// Drop every registered command.
    pub fn unregister_all(&mut self) {
        self.commands.unregister_all();
        debug!("command table cleared");
    }

    /// Look a command up by exact name.
    pub fn find(&self, name: &str) -> Option<&Command<CommandFn<T, N, C>>> {
        self.commands.find(name)
    }

    /// The command table.
    pub fn commands(&self) -> &CommandTable<CommandFn<T, N, C>, N> {
        &self.commands
    }

    /// Print every registered command with its description, in registration
    /// order.
    pub fn list_commands(&mut self) {
        let eol = self.config.end_line.as_str();
        self.terminal.print("Available commands:");
        self.terminal.print(eol);

        for cmd in self.commands.iter() {
            self.terminal.print("\t");
            self.terminal.print(cmd.name);
            self.terminal.print("\t\t");
            self.terminal.print(cmd.description);
            self.terminal.print(eol);
        }
    }

    /// Run `line` through the active line processor and then the
    /// post-execution hook.
    ///
    /// This is what the line-editing engine should call for every line.
    pub fn process<const L: usize, const A: usize>(
        &mut self,
        line: &mut Line<L, A>,
    ) -> ExecStatus {
        let status = self.execute(line);
        let args = line.args();
        self.post_exec_hook(status, &args);
        status
    }

    /// Run `line` through the active line processor.
    ///
    /// While a session is set up and not logged in, the line goes to the
    /// login gate, which may wipe tokens of `line`. Otherwise it goes
    /// straight to [`dispatch`](Self::dispatch).
    pub fn execute<const L: usize, const A: usize>(
        &mut self,
        line: &mut Line<L, A>,
    ) -> ExecStatus {
        match self.session_state() {
            None | Some(SessionState::LoggedIn { .. }) => {
                let args = line.args();
                self.dispatch(&args)
            }
            Some(state) => self.authenticate(line, state),
        }
    }

    /// Find and run the command named by `args[0]`.
    ///
    /// 1. No tokens: [`ExecStatus::NoCommand`]
    /// 2. Name not registered: [`ExecStatus::UnknownCommand`]
    /// 3. More tokens than `max_args`: [`ExecStatus::TooManyArguments`]
    /// 4. `<name> -h`: print the description, [`ExecStatus::Ok`]
    /// 5. Otherwise call the handler, [`ExecStatus::Ok`]
    ///
    /// The handler is never called in cases 1 to 4.
    pub fn dispatch(&mut self, args: &[&str]) -> ExecStatus {
        let Some(&name) = args.first() else {
            return ExecStatus::NoCommand;
        };

        let Some(cmd) = self.commands.find(name).copied() else {
            trace!("no command '{=str}'", name);
            return ExecStatus::UnknownCommand;
        };

        if args.len() > cmd.max_args {
            trace!("'{=str}': {=usize} > {=usize} args", name, args.len(), cmd.max_args);
            return ExecStatus::TooManyArguments;
        }

        if args.len() == 2 && args[1] == HELP_FLAG {
            self.println(cmd.description);
            return ExecStatus::Ok;
        }

        if let Err(e) = (cmd.handler)(self, args) {
            debug!("'{=str}' returned {}", cmd.name, e);
        }

        ExecStatus::Ok
    }

    /// Print a one-line diagnostic for unknown-command and too-many-arguments
    /// outcomes. Every other status is silent, as is everything when
    /// [`Config::log_exec_result`] is off.
    pub fn post_exec_hook(&mut self, status: ExecStatus, args: &[&str]) {
        if !self.config.log_exec_result {
            return;
        }

        let reason = match status {
            ExecStatus::UnknownCommand => "Unknown command",
            ExecStatus::TooManyArguments => "Too many arguments",
            _ => return,
        };

        self.terminal.print(args.first().copied().unwrap_or(""));
        self.terminal.print(": ");
        self.println(reason);
    }
}

impl<T, const N: usize, const C: usize> fmt::Debug for Shell<T, N, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("config", &self.config)
            .field("commands", &self.commands.len())
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
