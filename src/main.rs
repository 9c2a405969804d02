//! tproxyctl - Transparent Proxy Manager for macOS

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use tproxyctl::cli::{Cli, Commands};
use tproxyctl::fetcher::ReqwestFetcher;
use tproxyctl::runner::RealCommandRunner;
use tproxyctl::store::Store;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Rendered documents embed the CIDR path, so resolve the root up front.
    let root = std::path::absolute(&cli.root)?;
    let store = Store::new(root);
    let runner = RealCommandRunner::new();

    match cli.command {
        Commands::Subscribe { link } => {
            let fetcher = ReqwestFetcher::new()?;
            tproxyctl::commands::subscribe::run(&link, &store, &fetcher)
        }
        Commands::Update => {
            let fetcher = ReqwestFetcher::new()?;
            tproxyctl::commands::update::run(&store, &fetcher)
        }
        Commands::UpdateCidr => {
            let fetcher = ReqwestFetcher::new()?;
            tproxyctl::commands::update_cidr::run(&store, &fetcher)
        }
        Commands::Start => {
            let fetcher = ReqwestFetcher::new()?;
            tproxyctl::commands::start::run(&store, &fetcher, &runner)
        }
        Commands::Stop => tproxyctl::commands::stop::run(&runner),
        Commands::Restart => {
            let fetcher = ReqwestFetcher::new()?;
            tproxyctl::commands::restart::run(&store, &fetcher, &runner)
        }
        Commands::Version => {
            println!("tproxyctl {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
