//! Login sessions.
//!
//! Once [`Shell::session_init`] has been called, the shell refuses to run any
//! command that is not registered for the logged-out state until a user has
//! authenticated:
//!
//! ```text
//!              login <user>              <password> ok
//! ┌────────────┐  known   ┌──────────────────┐      ┌────────────┐
//! │ LoggedOut  │─────────▶│ AwaitingPassword │─────▶│  LoggedIn  │
//! └────────────┘          └──────────────────┘      └────────────┘
//!       ▲                    │ wrong password,             │
//!       │                    │ attempts left: stay         │
//!       └────────────────────┘ no attempts left            │
//!       ▲                                                  │
//!       └──────────────────── Shell::logout ───────────────┘
//! ```
//!
//! Typed characters are not echoed while the password is entered, and both the
//! username token and every token of the password line are zeroized in the
//! [`Line`] buffer as soon as they have been compared. Typing `login <user>`
//! while a password is pending switches to that account without using up an
//! attempt. Passwords are compared in clear text.
//!
//! # Example
//!
//! ```rust
//! use microsh::line::Line;
//! use microsh::session::Credential;
//! use microsh::shell::Shell;
//! use microsh::terminal::OutputFn;
//!
//! fn out(_text: &str) {}
//!
//! const CREDENTIALS: &[Credential] = &[Credential::new(1, "debug", "54321")];
//!
//! let mut shell: Shell<OutputFn> = Shell::new(out as OutputFn);
//! shell.session_init(CREDENTIALS, None).unwrap();
//!
//! shell.process(&mut Line::<64, 4>::parse("login debug").unwrap());
//! shell.process(&mut Line::<64, 4>::parse("54321").unwrap());
//! assert!(shell.is_logged_in());
//! assert_eq!(shell.login_type(), 1);
//! ```

use core::fmt;

use heapless::Vec;

use crate::error::Error;
use crate::line::Line;
use crate::shell::{ExecStatus, Shell};
use crate::terminal::Terminal;

/// Default number of credentials a shell can hold.
pub const DEFAULT_MAX_CREDENTIALS: usize = 2;

/// Login type reported while nobody is logged in.
pub const LOGGED_OUT: u32 = 0;

/// Command that starts a login.
pub const LOGIN_COMMAND: &str = "login";

const MSG_ENTER_USERNAME: &str = "Enter your username after 'login' command";
const MSG_ENTER_PASSWORD: &str = "Enter the password:";
const MSG_WRONG_USERNAME: &str = "Wrong username! Try again";
const MSG_WRONG_PASSWORD: &str = "Wrong password! ";
const MSG_TRY_AGAIN: &str = "Try again";
const MSG_LOGIN_AGAIN: &str = "Try to Log in again";
const MSG_LOGGED_IN: &str = "Logged In!";
const MSG_NEED_LOGIN: &str = "You need to Log In! Type 'login YOUR_USERNAME'";

/// Callback fired once after every successful login.
///
/// Typically used to swap the logged-out command set for the full one.
pub type LoggedInFn<T, const N: usize, const C: usize> = fn(&mut Shell<T, N, C>);

/// One account.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Credential {
    /// Non-zero account identifier. `0` is reserved for [`LOGGED_OUT`].
    pub login_type: u32,
    /// Name typed after `login`.
    pub username: &'static str,
    /// Clear-text password.
    pub password: &'static str,
}

impl Credential {
    /// Create a credential.
    pub const fn new(login_type: u32, username: &'static str, password: &'static str) -> Self {
        Self {
            login_type,
            username,
            password,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("login_type", &self.login_type)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Where the login state machine stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nobody is logged in. Only logged-out commands and `login` are accepted.
    LoggedOut,
    /// A known username was entered; the next line is the password.
    AwaitingPassword {
        /// Account whose password is expected.
        login_type: u32,
    },
    /// Authenticated. Lines go straight to the dispatcher.
    LoggedIn {
        /// Authenticated account.
        login_type: u32,
    },
}

impl SessionState {
    /// Pending or active login type, [`LOGGED_OUT`] otherwise.
    pub fn login_type(self) -> u32 {
        match self {
            SessionState::LoggedOut => LOGGED_OUT,
            SessionState::AwaitingPassword { login_type }
            | SessionState::LoggedIn { login_type } => login_type,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SessionState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            SessionState::LoggedOut => defmt::write!(f, "LoggedOut"),
            SessionState::AwaitingPassword { login_type } => {
                defmt::write!(f, "AwaitingPassword({=u32})", *login_type)
            }
            SessionState::LoggedIn { login_type } => {
                defmt::write!(f, "LoggedIn({=u32})", *login_type)
            }
        }
    }
}

#[derive(Debug)]
pub(crate) struct Session<const C: usize> {
    credentials: Vec<Credential, C>,
    state: SessionState,
    remaining_attempts: u8,
}

impl<const C: usize> Session<C> {
    fn reset(&mut self, max_attempts: u8) {
        self.state = SessionState::LoggedOut;
        self.remaining_attempts = max_attempts;
    }

    fn by_username(&self, username: &str) -> Option<&Credential> {
        self.credentials.iter().find(|c| c.username == username)
    }

    fn by_login_type(&self, login_type: u32) -> Option<&Credential> {
        self.credentials.iter().find(|c| c.login_type == login_type)
    }
}

impl<T: Terminal, const N: usize, const C: usize> Shell<T, N, C> {
    /// Enable login sessions.
    ///
    /// The credentials are copied into the shell and cannot be changed
    /// afterwards except by calling this again. The shell ends up logged out.
    ///
    /// # Arguments
    ///
    /// * `credentials` - Accounts allowed to log in
    /// * `post_login` - Optional callback fired after each successful login
    ///
    /// # Errors
    ///
    /// * [`Error::Parameter`] - A credential has login type 0 or an empty username
    /// * [`Error::Capacity`] - More than `C` credentials
    pub fn session_init(
        &mut self,
        credentials: &[Credential],
        post_login: Option<LoggedInFn<T, N, C>>,
    ) -> Result<(), Error> {
        if credentials
            .iter()
            .any(|c| c.login_type == LOGGED_OUT || c.username.is_empty())
        {
            return Err(Error::Parameter);
        }

        let count = credentials.len();
        let credentials = Vec::from_slice(credentials).map_err(|_| Error::Capacity)?;

        if matches!(
            self.session_state(),
            Some(SessionState::AwaitingPassword { .. })
        ) {
            self.terminal.set_echo(true);
        }

        self.session = Some(Session {
            credentials,
            state: SessionState::LoggedOut,
            remaining_attempts: self.config.max_auth_attempts,
        });
        self.post_login = post_login;

        info!("sessions enabled, {=usize} credentials", count);
        Ok(())
    }

    /// Return to the logged-out state and reset the attempt counter.
    ///
    /// Safe to call when already logged out. Registered commands are left
    /// alone; a `logout` command usually clears them with
    /// [`unregister_all`](Self::unregister_all) afterwards.
    ///
    /// # Errors
    ///
    /// * [`Error::Parameter`] - Sessions were never set up
    pub fn logout(&mut self) -> Result<(), Error> {
        let max_attempts = self.config.max_auth_attempts;
        let session = self.session.as_mut().ok_or(Error::Parameter)?;

        let was_awaiting = matches!(session.state, SessionState::AwaitingPassword { .. });
        session.reset(max_attempts);

        if was_awaiting {
            self.terminal.set_echo(true);
        }

        info!("logged out");
        Ok(())
    }

    /// State of the login state machine, `None` if sessions are not set up.
    pub fn session_state(&self) -> Option<SessionState> {
        self.session.as_ref().map(|s| s.state)
    }

    /// `true` once a user has authenticated.
    pub fn is_logged_in(&self) -> bool {
        matches!(self.session_state(), Some(SessionState::LoggedIn { .. }))
    }

    /// Login type of the authenticated user, [`LOGGED_OUT`] if nobody is.
    ///
    /// A login that is still waiting for its password also reports
    /// [`LOGGED_OUT`]. Use [`session_state`](Self::session_state) and
    /// [`SessionState::login_type`] to see the pending account.
    pub fn login_type(&self) -> u32 {
        match self.session_state() {
            Some(SessionState::LoggedIn { login_type }) => login_type,
            _ => LOGGED_OUT,
        }
    }

    /// Password attempts left before a pending login is dropped, `0` if
    /// sessions are not set up.
    pub fn remaining_attempts(&self) -> u8 {
        self.session.as_ref().map_or(0, |s| s.remaining_attempts)
    }

    /// Line processor used while not logged in.
    pub(crate) fn authenticate<const L: usize, const A: usize>(
        &mut self,
        line: &mut Line<L, A>,
        state: SessionState,
    ) -> ExecStatus {
        if line.is_empty() {
            return ExecStatus::NoCommand;
        }

        // `login` restarts a pending login without costing an attempt
        if line.arg(0) == Some(LOGIN_COMMAND) {
            return self.check_username(line);
        }

        match state {
            SessionState::AwaitingPassword { login_type } => self.check_password(line, login_type),
            _ => {
                let args = line.args();
                match self.dispatch(&args) {
                    ExecStatus::UnknownCommand => {
                        self.println(MSG_NEED_LOGIN);
                        ExecStatus::Error
                    }
                    status => status,
                }
            }
        }
    }

    fn check_username<const L: usize, const A: usize>(
        &mut self,
        line: &mut Line<L, A>,
    ) -> ExecStatus {
        let Some(username) = line.arg(1) else {
            self.println(MSG_ENTER_USERNAME);
            return ExecStatus::Error;
        };

        let found = self
            .session
            .as_ref()
            .and_then(|s| s.by_username(username))
            .map(|c| c.login_type);
        line.wipe(1);

        let Some(login_type) = found else {
            debug!("login: unknown username");
            self.println(MSG_WRONG_USERNAME);
            return ExecStatus::Error;
        };

        self.terminal.set_echo(false);
        if let Some(session) = self.session.as_mut() {
            session.state = SessionState::AwaitingPassword { login_type };
        }

        debug!("login: awaiting password for type {=u32}", login_type);
        self.println(MSG_ENTER_PASSWORD);
        ExecStatus::Ok
    }

    fn check_password<const L: usize, const A: usize>(
        &mut self,
        line: &mut Line<L, A>,
        login_type: u32,
    ) -> ExecStatus {
        let max_attempts = self.config.max_auth_attempts;

        let matched = match (self.session.as_ref(), line.arg(0)) {
            (Some(session), Some(entered)) => session
                .by_login_type(login_type)
                .is_some_and(|c| c.password == entered),
            _ => false,
        };
        // The whole line was typed without echo
        for index in 0..line.argc() {
            line.wipe(index);
        }

        let Some(session) = self.session.as_mut() else {
            return ExecStatus::Error;
        };

        if matched {
            session.state = SessionState::LoggedIn { login_type };
            session.remaining_attempts = max_attempts;

            self.terminal.set_echo(true);
            info!("login: type {=u32} logged in", login_type);
            self.println(MSG_LOGGED_IN);

            if let Some(post_login) = self.post_login {
                post_login(self);
            }
            return ExecStatus::Ok;
        }

        session.remaining_attempts = session.remaining_attempts.saturating_sub(1);
        let exhausted = session.remaining_attempts == 0;
        if exhausted {
            session.reset(max_attempts);
        }

        self.terminal.print(MSG_WRONG_PASSWORD);
        if exhausted {
            warn!("login: attempts exhausted for type {=u32}", login_type);
            self.terminal.set_echo(true);
            self.println(MSG_LOGIN_AGAIN);
        } else {
            self.println(MSG_TRY_AGAIN);
        }

        ExecStatus::Error
    }
}
