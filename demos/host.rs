//! Host demo: a login-gated console on stdin/stdout.
//!
//! ```text
//! cargo run --example host --features std
//! ```
//!
//! Accounts: `debug` / `54321` and `admin` / `12345`. Before logging in only
//! `help` is available; the full command set is installed by the post-login
//! callback and removed again by `logout`.

use std::io::{self, BufRead, Stdout};
use std::sync::atomic::{AtomicU32, Ordering};

use microsh::session::Credential;
use microsh::{Error, Line, Shell};

const DEMO_VERSION: &str = "0.1";

const LOGIN_TYPE_DEBUG: u32 = 1;
const LOGIN_TYPE_ADMIN: u32 = 2;

const CREDENTIALS: &[Credential] = &[
    Credential::new(LOGIN_TYPE_DEBUG, "debug", "54321"),
    Credential::new(LOGIN_TYPE_ADMIN, "admin", "12345"),
];

type DemoShell = Shell<Stdout, 4, 2>;

// Not persisted; saving to flash is left to real firmware.
static DEVICE_SN: AtomicU32 = AtomicU32::new(0);

fn help(sh: &mut DemoShell, _args: &[&str]) -> Result<(), Error> {
    sh.print("MicroSH library DEMO v");
    sh.println(DEMO_VERSION);

    if !sh.is_logged_in() {
        sh.println("Log in to get access to all commands:");
        sh.println("\tlogin YOUR_USERNAME");
        return Ok(());
    }

    sh.list_commands();
    sh.println("Use '<command> -h' for a short description");
    Ok(())
}

fn clear_screen(sh: &mut DemoShell, _args: &[&str]) -> Result<(), Error> {
    sh.print("\x1b[2J");
    sh.print("\x1b[H");
    Ok(())
}

fn sernum(sh: &mut DemoShell, args: &[&str]) -> Result<(), Error> {
    let Some(&arg) = args.get(1) else {
        sh.println("Read or specify serial number");
        return Err(Error::Parameter);
    };

    match arg {
        "?" => {
            let sn = DEVICE_SN.load(Ordering::Relaxed).to_string();
            sh.print("\tS/N ");
            sh.println(&sn);
        }
        "save" => sh.println("\tS/N save done"),
        value => match value.parse::<u32>() {
            Ok(sn) if sn != 0 => {
                DEVICE_SN.store(sn, Ordering::Relaxed);
                sh.print("\tset S/N ");
                sh.println(value);
            }
            _ => {
                sh.println("\tS/N not set");
                return Err(Error::Parameter);
            }
        },
    }
    Ok(())
}

fn logout(sh: &mut DemoShell, _args: &[&str]) -> Result<(), Error> {
    sh.logout()?;
    sh.unregister_all();
    register_auth_commands(sh)?;
    sh.println("Logged out");
    Ok(())
}

fn register_auth_commands(sh: &mut DemoShell) -> Result<(), Error> {
    sh.register(1, "help", help, "Show help")
}

fn register_all_commands(sh: &mut DemoShell) -> Result<(), Error> {
    sh.register(1, "help", help, "Show help")?;
    sh.register(1, "clear", clear_screen, "Clear screen")?;
    sh.register(2, "sernum", sernum, "sernum ? | sernum VALUE | sernum save")?;
    sh.register(1, "logout", logout, "End the session")
}

fn logged_in(sh: &mut DemoShell) {
    sh.unregister_all();
    if register_all_commands(sh).is_err() {
        sh.println("No memory to register all commands!");
    }
}

fn main() -> io::Result<()> {
    let mut shell: DemoShell = Shell::new(io::stdout());
    if register_auth_commands(&mut shell).is_err()
        || shell.session_init(CREDENTIALS, Some(logged_in)).is_err()
    {
        shell.println("Shell setup failed");
        return Ok(());
    }

    let mut line: Line = Line::new();
    for input in io::stdin().lock().lines() {
        let input = input?;
        match line.set(&input) {
            Ok(()) => {
                shell.process(&mut line);
            }
            Err(_) => shell.println("Line too long"),
        }
        line.clear();
    }

    Ok(())
}
