use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

pub mod palette;

use palette::PaletteColor;

pub const GREETING: &str = "Hello world!";
pub const PROMPT_MARKER: &str = "-->";
pub const UNAVAILABLE_MESSAGE: &str =
    "ERROR! The color you chose is not among the available colors :(";

const LOG_TARGET: &str = "hello_color";

#[derive(Debug, Parser, Clone)]
#[command(
    name = "hello-color",
    author,
    version,
    about = "Ask for a color from a fixed palette and print 'Hello world!' in it",
    long_about = None
)]
pub struct Cli {
    /// When to emit terminal color sequences
    #[arg(
        long,
        value_enum,
        value_name = "WHEN",
        default_value_t = ColorMode::Auto,
        env = "HELLO_COLOR_MODE"
    )]
    pub color: ColorMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Color only when stdout is a terminal and NO_COLOR is unset
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn choice(self, stdout_is_terminal: bool) -> ColorChoice {
        match self {
            ColorMode::Auto if stdout_is_terminal => ColorChoice::Auto,
            ColorMode::Auto | ColorMode::Never => ColorChoice::Never,
            ColorMode::Always => ColorChoice::Always,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Greeted(PaletteColor),
    Unavailable,
}

#[derive(Debug, thiserror::Error)]
pub enum GreetError {
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`, `warn` when unset.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn instructions() -> String {
    format!(
        "Hello user! What color would you like 'Hello world' to be printed with?\n\
         Choose among: {}\n",
        palette::listing()
    )
}

pub fn run(cli: Cli) -> Result<()> {
    let choice = cli.color.choice(io::stdout().is_terminal());
    let mut stdout = StandardStream::stdout(choice);
    let stdin = io::stdin();

    let outcome = greet(stdin.lock(), &mut stdout).context("failed to run greeting prompt")?;

    info!(
        target: LOG_TARGET,
        color_mode = ?cli.color,
        outcome = ?outcome,
        "greeter completed"
    );

    Ok(())
}

/// Prints the instructions, reads a single line from `input` and answers on
/// `output`. A color outside the palette is a normal outcome, not an error;
/// only I/O failures are returned as `Err`.
pub fn greet<R, W>(mut input: R, output: &mut W) -> Result<Outcome, GreetError>
where
    R: BufRead,
    W: WriteColor,
{
    output.write_all(instructions().as_bytes())?;
    output.write_all(PROMPT_MARKER.as_bytes())?;
    output.flush()?;

    let mut raw = Vec::new();
    input.read_until(b'\n', &mut raw)?;
    let line = String::from_utf8_lossy(&raw);
    let selection = strip_line_ending(&line);
    debug!(target: LOG_TARGET, ?selection, "read color selection");

    let outcome = match palette::select(selection) {
        Ok(color) => {
            let mut styled = StyleGuard::new(output, color.terminal_color())?;
            styled.write_all(GREETING.as_bytes())?;
            styled.finish()?;
            writeln!(output)?;
            info!(target: LOG_TARGET, %color, "printed greeting");
            Outcome::Greeted(color)
        }
        Err(err) => {
            writeln!(output, "{UNAVAILABLE_MESSAGE}")?;
            info!(target: LOG_TARGET, %err, "rejected color selection");
            Outcome::Unavailable
        }
    };

    output.flush()?;
    Ok(outcome)
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Holds a foreground color on `out` until finished or dropped. The reset
/// sequence is written on every path out of the styled span.
struct StyleGuard<'a, W: WriteColor> {
    out: &'a mut W,
    active: bool,
}

impl<'a, W: WriteColor> StyleGuard<'a, W> {
    fn new(out: &'a mut W, color: Color) -> io::Result<Self> {
        out.set_color(ColorSpec::new().set_fg(Some(color)))?;
        Ok(Self { out, active: true })
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.out.write_all(buf)
    }

    fn finish(mut self) -> io::Result<()> {
        self.active = false;
        self.out.reset()
    }
}

impl<W: WriteColor> Drop for StyleGuard<'_, W> {
    fn drop(&mut self) {
        if self.active {
            if let Err(err) = self.out.reset() {
                warn!(target: LOG_TARGET, ?err, "failed to reset terminal color");
            }
        }
    }
}
