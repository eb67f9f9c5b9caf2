//! Boundary with the line-editing engine.
//!
//! The shell never touches a UART or a TTY itself. Everything it shows the user
//! goes through [`Terminal::print`], and the only other thing it asks of the
//! engine is to stop echoing typed characters while a password is entered.

/// Output side of the line-editing engine.
///
/// # Examples
///
/// ```rust
/// use microsh::terminal::Terminal;
///
/// struct Uart {
///     echo: bool,
/// }
///
/// impl Terminal for Uart {
///     fn print(&mut self, text: &str) {
///         // Push bytes to the transmit register
///         let _ = text;
///     }
///
///     fn set_echo(&mut self, enabled: bool) {
///         self.echo = enabled;
///     }
/// }
/// ```
pub trait Terminal {
    /// Write `text` to the user. The text carries its own line terminator.
    fn print(&mut self, text: &str);

    /// Turn echo of typed characters on or off.
    ///
    /// Engines that cannot suppress echo may keep the default no-op.
    fn set_echo(&mut self, _enabled: bool) {}
}

/// Function signature for plain output handlers.
///
/// ```rust
/// use microsh::terminal::{OutputFn, Terminal};
///
/// fn uart_write(text: &str) {
///     let _ = text;
/// }
///
/// let mut out: OutputFn = uart_write;
/// out.print("hello\r\n");
/// ```
pub type OutputFn = fn(&str);

impl Terminal for OutputFn {
    fn print(&mut self, text: &str) {
        (*self)(text)
    }
}

impl<T: Terminal + ?Sized> Terminal for &mut T {
    fn print(&mut self, text: &str) {
        (**self).print(text)
    }

    fn set_echo(&mut self, enabled: bool) {
        (**self).set_echo(enabled)
    }
}

#[cfg(feature = "std")]
impl Terminal for std::io::Stdout {
    fn print(&mut self, text: &str) {
        use std::io::Write;

        let _ = self.write_all(text.as_bytes());
        let _ = self.flush();
    }
}
