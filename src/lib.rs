//! # microsh - Shell for embedded systems
//!
//! A small command-shell layer for resource-constrained devices. It sits between
//! a line-editing engine (which owns the terminal, cursor, history and
//! completion) and the firmware's commands. This crate supports `no_std`
//! environments and never allocates.
//!
//! ## Features
//!
//! ### Command dispatch
//! - Fixed-capacity command table with per-command argument limits
//! - `<command> -h` prints the command description
//! - Diagnostics for unknown commands and too many arguments
//!
//! ### Login sessions
//! - Multiple accounts, each with its own login type
//! - Echo is suppressed while the password is typed
//! - Bounded password attempts per login
//! - Usernames and passwords are zeroized in the input buffer after use
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! microsh = "0.1.0"
//! ```
//!
//! ### Basic Example
//!
//! ```rust
//! use microsh::{Error, ExecStatus, Line, Shell, Terminal};
//!
//! struct Uart;
//!
//! impl Terminal for Uart {
//!     fn print(&mut self, text: &str) {
//!         print!("{}", text);
//!     }
//! }
//!
//! fn clear<T: Terminal, const N: usize, const C: usize>(
//!     sh: &mut Shell<T, N, C>,
//!     _args: &[&str],
//! ) -> Result<(), Error> {
//!     sh.print("\x1b[2J\x1b[H");
//!     Ok(())
//! }
//!
//! let mut shell: Shell<Uart> = Shell::new(Uart);
//! shell.register(1, "clear", clear, "Clear screen").unwrap();
//!
//! let mut line: Line = Line::parse("clear").unwrap();
//! assert_eq!(shell.process(&mut line), ExecStatus::Ok);
//!
//! let mut line: Line = Line::parse("clear now").unwrap();
//! assert_eq!(shell.process(&mut line), ExecStatus::TooManyArguments);
//! ```
//!
//! See [`session`] for gating commands behind a login.
//!
//! ## Optional Features
//!
//! - `std`: Implement [`Terminal`] for `std::io::Stdout` (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

#[cfg(all(test, not(feature = "std")))]
extern crate std;

#[macro_use]
mod fmt;

/// Common error type for setup operations.
pub mod error;

/// Runtime configuration.
pub mod config;

/// Output boundary towards the line-editing engine.
pub mod terminal;

/// Tokenized command lines.
pub mod line;

/// Command registry.
pub mod command;

/// Shell instance and dispatcher.
pub mod shell;

/// Login/password sessions.
pub mod session;

pub use command::{Command, CommandTable};
pub use config::{Config, LineEnding};
pub use error::Error;
pub use line::Line;
pub use session::{Credential, SessionState};
pub use shell::{CommandFn, ExecStatus, Shell};
pub use terminal::Terminal;
