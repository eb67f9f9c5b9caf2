//! Common error type for shell setup operations

/// A common error type for shell setup operations.
///
/// Returned synchronously by registration, session setup and configuration
/// calls. None of these are retried internally: the caller decides whether,
/// for example, a full command table is fatal for its firmware.
///
/// Dispatch and authentication failures are not errors in this sense. They are
/// reported to the user through the [`Terminal`](crate::terminal::Terminal)
/// and surface as an [`ExecStatus`](crate::shell::ExecStatus).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A null, empty or out-of-range argument was passed.
    Parameter,
    /// A fixed-capacity container (command table, credential set, line
    /// buffer) is full.
    Capacity,
    /// Generic failure, e.g. a configuration blob that could not be decoded.
    Common,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Parameter => defmt::write!(f, "Parameter"),
            Error::Capacity => defmt::write!(f, "Capacity"),
            Error::Common => defmt::write!(f, "Common"),
        }
    }
}
