mod cli;
mod inventory;
mod lib;
mod load;
mod log;

use cli::{args::Config, menu, report::Reports};
use inventory::Inventory;

fn main() {
    let matches = cli::args::app().get_matches();
    log::init(cli::args::verbosity(&matches));

    let mut reports = Reports::new();
    if let Some(config) = Config::from_matches(&matches, &mut reports) {
        tracing::debug!(?config, "starting");
        let outcome = Inventory::load(config.store)
            .and_then(|mut inv| menu::run(config.command, &mut inv, &mut reports));
        if let Err(e) = outcome {
            reports.error(&e);
        }
    }
    if !reports.is_empty() {
        eprint!("{}", reports);
    }
    if reports.is_fatal() {
        std::process::exit(1);
    }
}
