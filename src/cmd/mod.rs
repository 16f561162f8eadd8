//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`resolve`], [`validate`], or [`watch`]. Each
//! handler lives in its own submodule.

pub mod resolve;
pub mod validate;
pub mod watch;

use crate::cli::{Cli, Commands};
use crate::error::RouteTrieError;

pub async fn dispatch(cli: Cli) -> Result<(), RouteTrieError> {
    match cli.command {
        Some(Commands::Resolve(ref args)) => resolve::execute(args),
        Some(Commands::Validate(ref args)) => validate::execute(args),
        Some(Commands::Watch(args)) => watch::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  routetrie v{version} \u{2014} prefix-trie route matcher\n\n  \
         No command provided. To get started:\n\n    \
         routetrie validate routes.yaml              Check a route file\n    \
         routetrie resolve -r routes.yaml /users/1   Resolve a request path\n    \
         routetrie --help                            See all commands and options\n"
    );
}
