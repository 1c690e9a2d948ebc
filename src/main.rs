//! Atelier CLI — declarative topology planner for the Creative Studio stack.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "atelier",
    version,
    about = "Declarative topology planner for the Creative Studio cloud stack"
)]
struct Cli {
    #[command(subcommand)]
    command: atelier::cli::Commands,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = atelier::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
