//! Tokenized command lines.
//!
//! A [`Line`] is what the line-editing engine hands to the shell once the user
//! presses Enter: a fixed-size byte buffer plus the position of every token in
//! it. Token 0 is the command name.
//!
//! The shell needs write access to the buffer so it can destroy usernames and
//! passwords right after it has looked at them ([`Line::wipe`]). The whole
//! buffer is also zeroized when the line is cleared or dropped.
//!
//! # Tokenization
//!
//! [`Line::parse`] splits on spaces and tabs and understands quoted tokens:
//!
//! ```text
//! sernum 12345                    # 2 tokens: ["sernum", "12345"]
//! config "device name" value      # 3 tokens: ["config", "device name", "value"]
//! echo "Line 1\nLine 2"           # 2 tokens: ["echo", "Line 1<LF>Line 2"]
//! path "C:\\Program Files"        # 2 tokens: ["path", "C:\Program Files"]
//! ```
//!
//! Engines with their own tokenizer can fill a line with [`Line::push_token`].

use core::fmt;
use core::str;

use heapless::Vec;
use zeroize::Zeroize;

use crate::error::Error;

/// Default maximum length of a command line in bytes.
pub const MAX_LINE_LEN: usize = 128;

/// Default maximum number of tokens per line, command name included.
pub const MAX_TOKENS: usize = 16;

const ASCII_SPACE: u8 = b' ';
const ASCII_TAB: u8 = b'\t';

/// A tokenized command line.
///
/// # Examples
///
/// ```rust
/// use microsh::line::Line;
///
/// let line: Line = Line::parse(r#"config "device name" 42"#).unwrap();
/// assert_eq!(line.argc(), 3);
/// assert_eq!(line.arg(1), Some("device name"));
/// ```
pub struct Line<const LEN: usize = MAX_LINE_LEN, const ARGS: usize = MAX_TOKENS> {
    buffer: [u8; LEN],
    len: usize,
    spans: Vec<(usize, usize), ARGS>,
}

impl<const LEN: usize, const ARGS: usize> Line<LEN, ARGS> {
    /// Create an empty line.
    pub const fn new() -> Self {
        Self {
            buffer: [0; LEN],
            len: 0,
            spans: Vec::new(),
        }
    }

    /// Tokenize `input` into a new line.
    ///
    /// # Errors
    ///
    /// * [`Error::Capacity`] - `input` is longer than `LEN` bytes or holds more
    ///   than `ARGS` tokens
    pub fn parse(input: &str) -> Result<Self, Error> {
        let mut line = Self::new();
        line.set(input)?;
        Ok(line)
    }

    /// Replace the contents of this line with the tokens of `input`.
    ///
    /// On error the line is left empty.
    pub fn set(&mut self, input: &str) -> Result<(), Error> {
        self.clear();

        let bytes = input.as_bytes();
        if bytes.len() > LEN {
            return Err(Error::Capacity);
        }
        self.buffer[..bytes.len()].copy_from_slice(bytes);
        self.len = bytes.len();

        if let Err(e) = self.tokenize() {
            self.clear();
            return Err(e);
        }
        Ok(())
    }

    /// Append a single, already separated token.
    ///
    /// # Errors
    ///
    /// * [`Error::Capacity`] - No room left in the buffer or the token list
    pub fn push_token(&mut self, token: &str) -> Result<(), Error> {
        let bytes = token.as_bytes();
        let start = self.len;
        let end = start.checked_add(bytes.len()).ok_or(Error::Capacity)?;
        if end > LEN || self.spans.is_full() {
            return Err(Error::Capacity);
        }

        self.buffer[start..end].copy_from_slice(bytes);
        self.len = end;
        self.spans
            .push((start, bytes.len()))
            .map_err(|_| Error::Capacity)
    }

    /// Number of tokens, command name included.
    pub fn argc(&self) -> usize {
        self.spans.len()
    }

    /// `true` when the line holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Token at `index`, or `None` if out of range.
    pub fn arg(&self, index: usize) -> Option<&str> {
        let &(start, len) = self.spans.get(index)?;
        str::from_utf8(&self.buffer[start..start + len]).ok()
    }

    /// All tokens in order.
    pub fn args(&self) -> Vec<&str, ARGS> {
        let mut args = Vec::new();
        for index in 0..self.spans.len() {
            // Cannot overflow: `args` has the same capacity as `spans`.
            let _ = args.push(self.arg(index).unwrap_or(""));
        }
        args
    }

    /// Overwrite the bytes of token `index` with zeroes.
    ///
    /// The token keeps its length, so it reads back as a run of NUL characters.
    /// The writes are volatile and cannot be optimized away.
    pub fn wipe(&mut self, index: usize) {
        if let Some(&(start, len)) = self.spans.get(index) {
            self.buffer[start..start + len].zeroize();
        }
    }

    /// Zeroize the buffer and drop every token.
    pub fn clear(&mut self) {
        self.buffer.zeroize();
        self.len = 0;
        self.spans.clear();
    }

    /// Split `buffer[..len]` into tokens, compacting escape sequences in place.
    fn tokenize(&mut self) -> Result<(), Error> {
        let mut i = 0;

        while i < self.len {
            while i < self.len && is_separator(self.buffer[i]) {
                i += 1;
            }

            if i >= self.len {
                break;
            }

            if self.buffer[i] == b'"' {
                i += 1;
                let start = i;
                let mut write = i;

                while i < self.len {
                    match self.buffer[i] {
                        b'\\' if i + 1 < self.len => {
                            i += 1;
                            self.buffer[write] = match self.buffer[i] {
                                b'n' => b'\n',
                                b't' => b'\t',
                                b'r' => b'\r',
                                other => other,
                            };
                            write += 1;
                            i += 1;
                        }
                        b'"' => {
                            i += 1;
                            break;
                        }
                        byte => {
                            self.buffer[write] = byte;
                            write += 1;
                            i += 1;
                        }
                    }
                }

                // Unclosed quotes still yield a token.
                self.push_span(start, write - start)?;
            } else {
                let start = i;
                while i < self.len && !is_separator(self.buffer[i]) && self.buffer[i] != b'"' {
                    i += 1;
                }
                self.push_span(start, i - start)?;
            }
        }

        Ok(())
    }

    fn push_span(&mut self, start: usize, len: usize) -> Result<(), Error> {
        self.spans.push((start, len)).map_err(|_| Error::Capacity)
    }
}

fn is_separator(byte: u8) -> bool {
    byte == ASCII_SPACE || byte == ASCII_TAB
}

impl<const LEN: usize, const ARGS: usize> Default for Line<LEN, ARGS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const LEN: usize, const ARGS: usize> Drop for Line<LEN, ARGS> {
    fn drop(&mut self) {
        self.buffer.zeroize();
    }
}

// Contents may hold credentials, so only the shape is printed.
impl<const LEN: usize, const ARGS: usize> fmt::Debug for Line<LEN, ARGS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Line")
            .field("len", &self.len)
            .field("argc", &self.spans.len())
            .finish()
    }
}
