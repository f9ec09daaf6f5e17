//! CLI module graph and command dispatch.

pub mod command;
pub mod config;
pub mod output;
pub mod project;
pub mod report;

use crate::application::LedgerService;
use crate::error::Result;
use crate::port::BookStore;

use command::Commands;

/// Run a book command against `service`.
///
/// `check-config` does not touch the book and is handled by the caller.
pub fn dispatch<S: BookStore>(service: &LedgerService<S>, command: &Commands) -> Result<()> {
    match command {
        Commands::Projects => project::list(service),
        Commands::Ladder(args) => project::ladder(service, &args.id),
        Commands::Ledger(args) => project::ledger(service, &args.id),
        Commands::Advance(args) => project::advance(service, &args.id),
        Commands::Summary(args) => project::summary(service, &args.id),
        Commands::Record(args) => project::record(service, &args.file),
        Commands::Report(args) => report::execute(service, args.by, args.project.as_deref()),
        Commands::CheckConfig => Ok(()),
    }
}
