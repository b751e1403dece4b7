mod cli;
mod console;
mod logging;
mod persistence;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use engine_logging::{engine_info, engine_warn};
use watcher_core::SessionEnd;
use watcher_engine::{FetchSettings, Watcher};

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    logging::initialize(args.log, args.verbose);

    let remembered = persistence::load_form(&args.state_file);
    let form = args.merge_into(remembered.unwrap_or_default());
    let config = form
        .to_config()
        .context("nothing to watch; pass --url and --selector")?;
    persistence::save_form(&args.state_file, &form);

    let watcher = Watcher::new(FetchSettings::default())?;
    watcher.subscribe(Arc::new(console::ConsoleObserver::stdout()));

    let handle = watcher.start(config)?;
    let signal = handle.stop_signal();
    ctrlc::set_handler(move || signal.stop()).context("failed to install ctrl-c handler")?;

    match handle.join() {
        SessionEnd::Cancelled | SessionEnd::NothingMatched => {
            engine_info!("watch finished");
            Ok(())
        }
        end @ (SessionEnd::TransportFailed | SessionEnd::SelectorFailed) => {
            engine_warn!("watch failed: {:?}", end);
            anyhow::bail!("watch ended after an error")
        }
    }
}
