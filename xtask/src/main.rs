use std::error::Error;
use std::process;

use clap::Command;
use duct::cmd;
use hello_color::palette::PALETTE;
use hello_color::{GREETING, UNAVAILABLE_MESSAGE};

type AnyResult<T> = Result<T, Box<dyn Error>>;
type StepFn = fn() -> AnyResult<()>;
type Step = (&'static str, StepFn);

const SMOKE_ARGS: &[&str] = &[
    "run",
    "--quiet",
    "--release",
    "-p",
    "hello-color",
    "--",
    "--color",
    "never",
];

fn cli() -> Command {
    Command::new("hello-color-task")
        .about("Tasks for managing the hello-color codebase")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("lint").about("Run Rust formatters and linters"))
        .subcommand(Command::new("test").about("Run the workspace tests"))
        .subcommand(
            Command::new("smoke").about("Pipe every palette color into the release binary"),
        )
        .subcommand(Command::new("all").about("Run every lint, test and smoke check"))
}

fn main() {
    if let Err(error) = run() {
        eprintln!("xtask error: {error}");
        process::exit(1);
    }
}

fn run() -> AnyResult<()> {
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("lint", _)) => run_lint(),
        Some(("test", _)) => run_tests(),
        Some(("smoke", _)) => run_smoke(),
        Some(("all", _)) => run_all(),
        _ => unreachable!(),
    }
}

fn run_lint() -> AnyResult<()> {
    println!("Running Rust lint...");
    run_cmd("cargo", &["fmt", "--all", "--check"])?;
    run_cmd(
        "cargo",
        &[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
    )
}

fn run_tests() -> AnyResult<()> {
    println!("Running Rust tests...");
    run_cmd("cargo", &["test", "--workspace"])
}

fn run_smoke() -> AnyResult<()> {
    println!("Running smoke checks...");

    for color in PALETTE {
        let input = format!("{}\n", color.name().to_uppercase());
        let stdout = pipe_into_binary(&input)?;
        if !stdout.ends_with(GREETING) {
            return Err(format!("'{color}' did not print the greeting: {stdout:?}").into());
        }
    }

    let stdout = pipe_into_binary("purple\n")?;
    if !stdout.ends_with(UNAVAILABLE_MESSAGE) {
        return Err(format!("'purple' was not rejected: {stdout:?}").into());
    }

    Ok(())
}

fn run_all() -> AnyResult<()> {
    let mut errors = Vec::new();

    const STEPS: &[Step] = &[
        ("Rust lint", run_lint),
        ("Rust tests", run_tests),
        ("Smoke checks", run_smoke),
    ];

    for (label, step) in STEPS {
        if let Err(error) = step() {
            eprintln!("{label} failed: {error}");
            errors.push(format!("{label}: {error}"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(format!("One or more tasks failed:\n{}", errors.join("\n")).into())
    }
}

fn run_cmd(program: &str, args: &[&str]) -> AnyResult<()> {
    println!("> {} {}", program, args.join(" "));
    cmd(program, args).run()?;
    Ok(())
}

fn pipe_into_binary(input: &str) -> AnyResult<String> {
    println!("> echo {:?} | cargo {}", input.trim_end(), SMOKE_ARGS.join(" "));
    let stdout = cmd("cargo", SMOKE_ARGS)
        .stdin_bytes(input.as_bytes().to_vec())
        .read()?;
    Ok(stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }
}
