mod common;

use common::*;
use microsh::config::{Config, LineEnding};
use microsh::line::Line;
use microsh::{Error, ExecStatus, Shell};
use rand::Rng;

fn shell() -> TestShell {
    Shell::new(Recorder::default())
}

#[test]
fn empty_line_is_no_command() {
    let mut sh = shell();
    sh.register(1, "help", ran, "Show help").unwrap();

    assert_eq!(run(&mut sh, ""), ExecStatus::NoCommand);
    assert_eq!(run(&mut sh, "   "), ExecStatus::NoCommand);
    assert_eq!(sh.dispatch(&[]), ExecStatus::NoCommand);
    assert_eq!(take_output(&mut sh), "");
}

#[test]
fn registered_command_runs_with_all_tokens() {
    let mut sh = shell();
    sh.register(3, "sernum", ran, "Serial number").unwrap();

    assert_eq!(run(&mut sh, "sernum"), ExecStatus::Ok);
    assert_eq!(run(&mut sh, "sernum 42"), ExecStatus::Ok);
    assert_eq!(run(&mut sh, "sernum 42 save"), ExecStatus::Ok);
    assert_eq!(
        take_output(&mut sh),
        "[ran sernum argc=1][ran sernum argc=2][ran sernum argc=3]"
    );
}

#[test]
fn unknown_command_runs_nothing() {
    let mut sh = shell();
    sh.register(2, "help", ran, "Show help").unwrap();

    assert_eq!(sh.dispatch(&["halp"]), ExecStatus::UnknownCommand);
    assert_eq!(sh.dispatch(&["HELP", "-h"]), ExecStatus::UnknownCommand);
    assert_eq!(take_output(&mut sh), "");
}

#[test]
fn too_many_arguments_runs_nothing() {
    let mut sh = shell();
    sh.register(2, "sernum", ran, "Serial number").unwrap();

    assert_eq!(sh.dispatch(&["sernum", "1", "2"]), ExecStatus::TooManyArguments);
    assert_eq!(take_output(&mut sh), "");
}

#[test]
fn max_args_counts_the_command_itself() {
    let mut sh = shell();
    sh.register(1, "clear", ran, "Clear screen").unwrap();

    assert_eq!(sh.dispatch(&["clear"]), ExecStatus::Ok);
    assert_eq!(sh.dispatch(&["clear", "now"]), ExecStatus::TooManyArguments);
    // The limit applies before the help flag is looked at
    assert_eq!(sh.dispatch(&["clear", "-h"]), ExecStatus::TooManyArguments);
    assert_eq!(take_output(&mut sh), "[ran clear argc=1]");
}

#[test]
fn random_token_counts_respect_the_limit() {
    let mut rng = rand::thread_rng();
    let tokens = ["cmd", "a", "b", "c", "d", "e", "f", "g", "h", "i"];

    for _ in 0..200 {
        let max_args = rng.gen_range(1..=tokens.len());
        let argc = rng.gen_range(1..=tokens.len());

        let mut sh = shell();
        sh.register(max_args, "cmd", ran, "").unwrap();
        let status = sh.dispatch(&tokens[..argc]);

        if argc > max_args {
            assert_eq!(status, ExecStatus::TooManyArguments);
            assert_eq!(take_output(&mut sh), "");
        } else {
            assert_eq!(status, ExecStatus::Ok);
            assert!(!take_output(&mut sh).is_empty());
        }
    }
}

#[test]
fn help_flag_prints_description_only() {
    let mut sh = shell();
    sh.register(2, "sernum", ran, "Read or set the serial number").unwrap();

    assert_eq!(run(&mut sh, "sernum -h"), ExecStatus::Ok);
    assert_eq!(take_output(&mut sh), "Read or set the serial number\r\n");
}

#[test]
fn help_flag_only_as_sole_second_token() {
    let mut sh = shell();
    sh.register(3, "sernum", ran, "Serial number").unwrap();

    assert_eq!(run(&mut sh, "sernum -h x"), ExecStatus::Ok);
    assert_eq!(run(&mut sh, "sernum --help"), ExecStatus::Ok);
    assert_eq!(
        take_output(&mut sh),
        "[ran sernum argc=3][ran sernum argc=2]"
    );
}

#[test]
fn handler_error_does_not_change_status() {
    let mut sh = shell();
    sh.register(1, "broken", fails, "Always fails").unwrap();

    assert_eq!(run(&mut sh, "broken"), ExecStatus::Ok);
    assert_eq!(take_output(&mut sh), "[fails]");
}

#[test]
fn hook_reports_unknown_and_too_many() {
    let mut sh = shell();
    sh.register(1, "clear", ran, "Clear screen").unwrap();

    assert_eq!(run(&mut sh, "foo bar"), ExecStatus::UnknownCommand);
    assert_eq!(take_output(&mut sh), "foo: Unknown command\r\n");

    assert_eq!(run(&mut sh, "clear all"), ExecStatus::TooManyArguments);
    assert_eq!(take_output(&mut sh), "clear: Too many arguments\r\n");
}

#[test]
fn hook_is_silent_for_other_outcomes() {
    let mut sh = shell();
    sh.post_exec_hook(ExecStatus::Ok, &["x"]);
    sh.post_exec_hook(ExecStatus::NoCommand, &[]);
    sh.post_exec_hook(ExecStatus::Error, &["x"]);
    assert_eq!(take_output(&mut sh), "");
}

#[test]
fn hook_can_be_disabled() {
    let config = Config {
        log_exec_result: false,
        ..Config::default()
    };
    let mut sh: TestShell = Shell::with_config(Recorder::default(), config).unwrap();

    assert_eq!(run(&mut sh, "foo"), ExecStatus::UnknownCommand);
    assert_eq!(take_output(&mut sh), "");
}

#[test]
fn line_ending_follows_config() {
    let config = Config {
        end_line: LineEnding::Lf,
        ..Config::default()
    };
    let mut sh: TestShell = Shell::with_config(Recorder::default(), config).unwrap();
    sh.register(2, "sernum", ran, "Serial number").unwrap();

    run(&mut sh, "sernum -h");
    run(&mut sh, "nope");
    assert_eq!(take_output(&mut sh), "Serial number\nnope: Unknown command\n");
}

#[test]
fn invalid_config_rejected() {
    let config = Config {
        max_auth_attempts: 0,
        ..Config::default()
    };
    let result: Result<TestShell, Error> = Shell::with_config(Recorder::default(), config);
    assert_eq!(result.unwrap_err(), Error::Parameter);
}

#[test]
fn registration_beyond_capacity_fails() {
    let mut sh: TestShell<3> = Shell::new(Recorder::default());
    sh.register(1, "a", ran, "").unwrap();
    sh.register(1, "b", ran, "").unwrap();
    sh.register(1, "c", ran, "").unwrap();

    assert_eq!(sh.register(1, "d", ran, ""), Err(Error::Capacity));
    assert_eq!(sh.commands().len(), 3);
    assert_eq!(run(&mut sh, "d"), ExecStatus::UnknownCommand);
}

#[test]
fn registration_rejects_bad_parameters() {
    let mut sh = shell();
    assert_eq!(sh.register(1, "", ran, ""), Err(Error::Parameter));
    assert_eq!(sh.register(0, "zero", ran, ""), Err(Error::Parameter));
    assert!(sh.commands().is_empty());
}

#[test]
fn duplicate_names_first_registration_wins() {
    let mut sh: TestShell<2> = Shell::new(Recorder::default());
    sh.register(1, "help", ran, "h").unwrap();
    sh.register(1, "help", fails, "h2").unwrap();

    assert_eq!(sh.find("help").unwrap().description, "h");
    assert_eq!(sh.register(1, "help", ran, "h3"), Err(Error::Capacity));

    assert_eq!(run(&mut sh, "help"), ExecStatus::Ok);
    assert_eq!(take_output(&mut sh), "[ran help argc=1]");
}

#[test]
fn unregister_all_then_reregister() {
    let mut sh: TestShell<2> = Shell::new(Recorder::default());
    sh.register(1, "a", ran, "").unwrap();
    sh.register(1, "b", ran, "").unwrap();

    sh.unregister_all();
    assert!(sh.find("a").is_none());
    assert!(sh.find("b").is_none());
    assert_eq!(run(&mut sh, "a"), ExecStatus::UnknownCommand);

    sh.unregister_all();
    sh.register(1, "c", ran, "").unwrap();
    sh.register(1, "d", ran, "").unwrap();
    assert_eq!(sh.register(1, "e", ran, ""), Err(Error::Capacity));
}

#[test]
fn list_commands_in_order() {
    let mut sh = shell();
    sh.register(1, "help", ran, "Show help").unwrap();
    sh.register(1, "clear", ran, "Clear screen").unwrap();

    sh.list_commands();
    assert_eq!(
        take_output(&mut sh),
        "Available commands:\r\n\thelp\t\tShow help\r\n\tclear\t\tClear screen\r\n"
    );
}

#[test]
fn handler_can_modify_the_shell() {
    fn reset(sh: &mut TestShell, _args: &[&str]) -> Result<(), Error> {
        sh.unregister_all();
        sh.register(1, "after", ran, "")
    }

    let mut sh = shell();
    sh.register(1, "reset", reset, "").unwrap();

    assert_eq!(run(&mut sh, "reset"), ExecStatus::Ok);
    assert!(sh.find("reset").is_none());
    assert_eq!(run(&mut sh, "after"), ExecStatus::Ok);
    assert_eq!(take_output(&mut sh), "[ran after argc=1]");
}

#[test]
fn quoted_tokens_reach_the_handler() {
    fn show(sh: &mut TestShell, args: &[&str]) -> Result<(), Error> {
        sh.println(args[1]);
        Ok(())
    }

    let mut sh = shell();
    sh.register(2, "say", show, "").unwrap();

    let mut line: Line = Line::parse(r#"say "hello world""#).unwrap();
    assert_eq!(sh.process(&mut line), ExecStatus::Ok);
    assert_eq!(take_output(&mut sh), "hello world\r\n");
}

#[test]
fn no_session_means_no_login_gate() {
    let mut sh = shell();
    sh.register(1, "help", ran, "").unwrap();

    assert_eq!(sh.session_state(), None);
    assert!(!sh.is_logged_in());
    assert_eq!(sh.login_type(), 0);
    assert_eq!(sh.logout(), Err(Error::Parameter));
    assert_eq!(run(&mut sh, "login debug"), ExecStatus::UnknownCommand);
    assert_eq!(run(&mut sh, "help"), ExecStatus::Ok);
}
