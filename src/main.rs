#[macro_use]
extern crate prettytable;

use anyhow::Context;
use std::io;
use structopt::StructOpt;

mod cli;
mod error;
mod manager;
mod memento;
mod model;
mod repl;

use cli::CommandLineArgs;
use manager::ToDoListManager;

/// Log to stderr so messages never mix with the task tables. RUST_LOG
/// overrides the level chosen here.
fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = CommandLineArgs::from_args();
    init_logging(args.verbose);

    let mut manager = ToDoListManager::new(args.render_options());

    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::run(&mut manager, stdin.lock(), stdout.lock(), !args.quiet)
        .context("The to-do session ended with an error.")?;

    log::debug!(
        "Session closed with {} tasks after {} snapshots.",
        manager.tasks().len(),
        manager.history().len()
    );
    Ok(())
}
