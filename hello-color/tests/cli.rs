use std::io::Write;
use std::process::{Command, Output, Stdio};

const UNAVAILABLE: &str = "ERROR! The color you chose is not among the available colors :(";

fn run_binary(args: &[&str], stdin: &str) -> Output {
    run_binary_with_log(args, None, stdin.as_bytes())
}

fn run_binary_with_log(args: &[&str], rust_log: Option<&str>, stdin: &[u8]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_hello-color"));
    command
        .args(args)
        .env_remove("HELLO_COLOR_MODE")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(filter) = rust_log {
        command.env("RUST_LOG", filter);
    }

    let mut child = command.spawn().expect("spawn hello-color");
    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(stdin)
        .ok();

    child.wait_with_output().expect("wait for hello-color")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf8 stdout")
}

#[test]
fn prints_instructions_and_prompt() {
    let output = run_binary(&["--color", "never"], "red\n");
    let stdout = stdout_of(&output);

    assert!(output.status.success());
    assert!(stdout.starts_with(
        "Hello user! What color would you like 'Hello world' to be printed with?\n\
         Choose among: red, green, blue, magenta, yellow\n-->"
    ));
}

#[test]
fn always_mode_colors_greeting() {
    let output = run_binary(&["--color", "always"], "Magenta\n");
    let stdout = stdout_of(&output);

    assert!(output.status.success());
    assert!(
        stdout.contains("\x1b[35mHello world!\x1b[0m\n"),
        "unexpected stdout: {stdout:?}"
    );
}

#[test]
fn piped_output_defaults_to_plain_text() {
    let output = run_binary(&[], "blue\n");
    let stdout = stdout_of(&output);

    assert!(output.status.success());
    assert!(stdout.ends_with("-->Hello world!\n"), "{stdout:?}");
    assert!(!stdout.contains('\x1b'));
}

#[test]
fn invalid_color_exits_successfully_with_error_message() {
    for input in ["purple\n", "\n", " red\n", ""] {
        let output = run_binary(&["--color", "always"], input);
        let stdout = stdout_of(&output);

        assert!(output.status.success(), "{input:?}");
        assert!(stdout.ends_with(&format!("-->{UNAVAILABLE}\n")), "{stdout:?}");
        assert!(!stdout.contains("Hello world!"));
    }
}

#[test]
fn color_mode_can_come_from_environment() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_hello-color"))
        .env("HELLO_COLOR_MODE", "always")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn hello-color");
    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(b"yellow\n")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait for hello-color");

    assert!(stdout_of(&output).contains("\x1b[33mHello world!"));
}

#[test]
fn rejects_unknown_color_mode() {
    let output = run_binary(&["--color", "sometimes"], "red\n");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn invalid_utf8_input_is_rejected_with_success_exit() {
    let output = run_binary_with_log(&["--color", "never"], None, b"r\xffd\n");
    let stdout = stdout_of(&output);

    assert!(output.status.success());
    assert!(stdout.ends_with(&format!("-->{UNAVAILABLE}\n")), "{stdout:?}");
}

#[test]
fn debug_logging_goes_to_stderr_only() {
    let quiet = run_binary_with_log(&["--color", "always"], None, b"red\n");
    let logged = run_binary_with_log(
        &["--color", "always"],
        Some("hello_color=debug"),
        b"red\n",
    );

    assert!(logged.status.success());
    assert_eq!(logged.stdout, quiet.stdout);
    assert!(quiet.stderr.is_empty());

    let stderr = String::from_utf8_lossy(&logged.stderr);
    assert!(stderr.contains("greeter completed"), "{stderr:?}");
    assert!(stderr.contains("read color selection"), "{stderr:?}");
}
