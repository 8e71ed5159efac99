use clap::Parser;
use pagegrid::cli::commands::Cli;
use pagegrid::cli::handlers;

fn main() {
    // stdout carries command output; logs go to stderr
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
