//! Logger initialisation for the CLI
//!
//! Two modes: `info` by default, `debug` when verbose. `RUST_LOG` still wins
//! when set. Lines are formatted as `LEVEL - message`.

use log::LevelFilter;
use std::io::Write;

/// Default filter for the given verbosity
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. Safe to call more than once; later calls are
/// ignored.
pub fn init_logger(verbose: bool) {
    let default_filter = default_level(verbose).to_string().to_lowercase();

    let result =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
            .format(|buf, record| writeln!(buf, "{} - {}", record.level(), record.args()))
            .try_init();
    if let Err(e) = result {
        log::debug!("Logger already initialised: {}", e);
    }
}
