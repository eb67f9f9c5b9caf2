//! Fixed-capacity command registry.
//!
//! The table is an ordered list of [`Command`] entries stored in a
//! `heapless::Vec`, so its memory footprint is known at compile time. Lookups
//! are a linear scan in registration order.
//!
//! Names are **not** deduplicated. Registering a name twice keeps both entries
//! and [`CommandTable::find`] returns the first one.

use heapless::Vec;

use crate::error::Error;

/// Default number of commands a shell can hold.
pub const DEFAULT_MAX_COMMANDS: usize = 8;

/// A registered command.
///
/// `H` is the handler type. The shell stores plain function pointers here,
/// see [`CommandFn`](crate::shell::CommandFn).
#[derive(Debug, Clone, Copy)]
pub struct Command<H> {
    /// The command name as typed by the user. Case-sensitive.
    pub name: &'static str,

    /// Maximum number of tokens accepted, **including** the command name.
    ///
    /// A command registered with `max_args == 2` accepts `cmd` and `cmd x`
    /// but rejects `cmd x y`.
    pub max_args: usize,

    /// Help text printed for `<name> -h`.
    pub description: &'static str,

    /// Function invoked when the command is executed.
    pub handler: H,
}

/// Ordered, fixed-capacity list of commands.
///
/// # Examples
///
/// ```rust
/// use microsh::command::CommandTable;
///
/// let mut table: CommandTable<u8, 2> = CommandTable::new();
/// table.register(1, "help", 1, "Show help").unwrap();
/// table.register(2, "help", 2, "Shadowed").unwrap();
///
/// // Duplicates are kept, the first one wins
/// assert_eq!(table.find("help").map(|c| c.handler), Some(1));
/// assert!(table.register(1, "full", 3, "").is_err());
/// ```
#[derive(Debug)]
pub struct CommandTable<H, const N: usize = DEFAULT_MAX_COMMANDS> {
    commands: Vec<Command<H>, N>,
}

impl<H, const N: usize> CommandTable<H, N> {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Append a command.
    ///
    /// # Arguments
    ///
    /// * `max_args` - Token limit including the command name, at least 1
    /// * `name` - Command name, must not be empty
    /// * `handler` - Handler to store
    /// * `description` - Help text
    ///
    /// # Errors
    ///
    /// * [`Error::Parameter`] - Empty name or `max_args == 0`
    /// * [`Error::Capacity`] - The table already holds `N` commands; it is left
    ///   unchanged
    pub fn register(
        &mut self,
        max_args: usize,
        name: &'static str,
        handler: H,
        description: &'static str,
    ) -> Result<(), Error> {
        if name.is_empty() || max_args == 0 {
            return Err(Error::Parameter);
        }

        self.commands
            .push(Command {
                name,
                max_args,
                description,
                handler,
            })
            .map_err(|_| {
                warn!("command table full, dropping '{=str}'", name);
                Error::Capacity
            })?;

        debug!("registered '{=str}' ({=usize} max args)", name, max_args);
        Ok(())
    }

    /// Remove every command. Calling it on an empty table is a no-op.
    pub fn unregister_all(&mut self) {
        self.commands.clear();
    }

    /// First command whose name is byte-for-byte equal to `name`.
    pub fn find(&self, name: &str) -> Option<&Command<H>> {
        self.commands.iter().find(|cmd| cmd.name == name)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Total number of slots.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Iterate over the commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Command<H>> {
        self.commands.iter()
    }
}

impl<H, const N: usize> Default for CommandTable<H, N> {
    fn default() -> Self {
        Self::new()
    }
}
