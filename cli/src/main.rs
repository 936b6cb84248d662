use tracing::{debug, info};

mod cli;
mod commands;
mod error;
mod logging;
mod registry;

use cli::Cli;
use logging::init_logging;

fn main() {
    let registry = commands::registry();
    let matches = Cli::command_with(&registry).get_matches();

    let result = Cli::from_matches(&matches).and_then(|cli| {
        init_logging(cli.verbose)?;
        info!("command-config starting");
        debug!("CLI arguments: {:?}", cli);
        cli.run(&registry, &matches)
    });

    match result {
        Ok(()) => info!("command-config completed successfully"),
        Err(e) => {
            tracing::error!("CLI error: {:?}", e);
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}
