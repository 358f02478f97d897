use clap::Parser;
use hedgefund::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
