use anyhow::Result;
use clap::Parser;
use simprint::cli::{AppContext, Cli, Commands};
use tracing_subscriber::{EnvFilter, fmt};

/// Log filter from SIMPRINT_LOG, else from the -v count.
fn init_tracing(verbose: u8)
{
    let fallback = match verbose
    {
        0 => "warn",
        1 => "simprint=debug",
        _ => "simprint=trace",
    };
    let filter = EnvFilter::try_from_env("SIMPRINT_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()>
{
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Build a context once, pass everywhere
    let ctx = AppContext { quiet: cli.quiet, no_color: cli.no_color };

    match cli.command
    {
        Commands::Fingerprint(args) =>
        {
            let config = simprint::load_config(cli.config.as_deref())?;
            simprint::cli_ext::fingerprint_cmd::run(args, &config, &ctx)
        }
        Commands::Compare(args) =>
        {
            let config = simprint::load_config(cli.config.as_deref())?;
            simprint::cli_ext::compare_cmd::run(args, &config, &ctx)
        }
        Commands::Init(args) => simprint::infra::config::init(args, &ctx),
        Commands::Completions(args) => simprint::completion::run(args, &ctx),
    }
}
