use clap::Parser;
use log::warn;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let summary = cli::run(&args)?;
    if summary.unreached > 0 {
        warn!(
            "'{}' ended early, output holds {} frames",
            args.input.display(),
            summary.frames_written.get()
        );
    }
    Ok(())
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let filter = std::env::var("AUDIO_TRIM_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new(if verbose { "debug" } else { "info" }),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        );

    // also forwards `log` records from the library
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to set up logging: {err}"))
}
