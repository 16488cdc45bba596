use clap::Parser;
use hello_color::{Cli, init_logging, run};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();
    run(cli)
}
