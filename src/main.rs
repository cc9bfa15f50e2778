use anyhow::Result;
use clap::Parser;
use gzcore::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI --log-level takes precedence, then RUST_LOG, then DEBUG_LEVEL.
    // The config level is applied below once the file has been read.
    let override_level = cli.log_level.map(|l| l.to_level_filter());
    gzcore::debug::init_log_bridge(override_level);
    if override_level.is_none()
        && std::env::var_os("RUST_LOG").is_none()
        && let Ok(config) = cli::load_config(cli.config.as_deref())
    {
        let level = config.log_level.to_level_filter();
        if level != log::LevelFilter::Off {
            gzcore::debug::set_log_level(level);
        }
    }

    log::info!("gzcore {} starting", gzcore::VERSION);

    let mut stdout = std::io::stdout().lock();
    let result = cli::run(&cli, &mut stdout);
    if let Err(ref e) = result {
        eprintln!("gzcore: error: {e:#}");
    }
    result
}
