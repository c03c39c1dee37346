use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use taskboard::cli::{self, Cli, Commands};
use taskboard::storage::config::{self, LogConfig};

/// Install the global subscriber; `RUST_LOG` wins over the configured filter.
fn init_logging(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() {
    // 解析命令行参数
    let cli = Cli::parse();

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    // 无子命令时等同于 `taskboard serve`
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Serve(Default::default()));

    match command {
        Commands::Serve(args) => {
            let config = args.apply(config);
            init_logging(&config.log);

            let runtime = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    eprintln!("Failed to create tokio runtime: {}", e);
                    std::process::exit(1);
                }
            };
            if let Err(e) = runtime.block_on(cli::serve::execute(config)) {
                tracing::error!(error = %e, "server error");
                std::process::exit(1);
            }
        }
        Commands::Config => {
            if let Err(e) = cli::config::execute(&config) {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }
}
