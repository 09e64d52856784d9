use clap::{ArgAction, Parser, Subcommand};
use std::io::Write;

mod cli;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity, may be repeated
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rank the declarations of a source by how much unported work blocks them
    Sort(cli::Sort),
}

pub fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .filter_level(level)
        .init();

    let res = match cli.command {
        Command::Sort(sort) => sort.execute(),
    };

    if let Err(error) = res {
        log::error!("{error}");
        std::process::exit(1);
    }
}
