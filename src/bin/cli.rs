//! AwardHub CLI
//!
//! Serves the award site, or renders single pages and maintains exported
//! year files from the command line.

use std::path::PathBuf;
use std::sync::Arc;

use awardhub::{
    error::{AppError, Result},
    models::Config,
    router::{Navigation, Router},
    server,
    services::{RowStore, available_years, icons},
    session::ViewQuery,
};
use clap::{Parser, Subcommand};

/// AwardHub - yearly game award pages
#[derive(Parser, Debug)]
#[command(name = "awardhub", version, about = "Yearly game award site")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml", global = true)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Address to bind (default: server.bind from config)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Render one page to stdout
    Render {
        /// Site path, optionally with a query (e.g. "/steamawards/2024/?q=rpg")
        path: String,
    },

    /// List the years available from the data endpoint
    Years,

    /// Fill icon_url fields in exported year files from an image directory
    FillIcons {
        /// Directory containing steam_awards_*.json files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Image root containing one directory per year
        #[arg(long, default_value = "img")]
        img_dir: PathBuf,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn build_router(config: Config) -> Result<Arc<Router>> {
    let store = Arc::new(RowStore::from_config(&config)?);
    Ok(Arc::new(Router::new(Arc::new(config), store)))
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Serve { bind } => {
            config.validate()?;
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            log::info!("AwardHub starting...");
            let router = build_router(config)?;
            server::serve(router, &bind).await?;
        }

        Command::Render { path } => {
            let router = build_router(config)?;
            let (path, query) = match path.split_once('?') {
                Some((path, query)) => (path.to_string(), Some(query.to_string())),
                None => (path.clone(), None),
            };

            let navigation = match router
                .navigate(&path, &ViewQuery::parse(query.as_deref()))
                .await
            {
                Navigation::Redirect(target) => {
                    log::info!("{} redirects to {}", path, target);
                    router.navigate(&target, &ViewQuery::default()).await
                }
                other => other,
            };

            match navigation {
                Navigation::Page(page) => println!("{}", router.document(&page).await),
                Navigation::Redirect(target) => {
                    return Err(AppError::validation(format!(
                        "Redirect loop while rendering {path} (last: {target})"
                    )));
                }
                Navigation::Superseded => log::warn!("Render of {} was superseded", path),
            }
        }

        Command::Years => {
            let store = RowStore::from_config(&config)?;
            let rows = store.get_rows().await?;
            let years = available_years(&rows);
            if years.is_empty() {
                log::warn!("No years found in {} rows", rows.len());
            }
            for year in years {
                println!("{year}");
            }
        }

        Command::FillIcons { data_dir, img_dir } => {
            let report = icons::fill_icon_urls(&data_dir, &img_dir)?;
            log::info!("Updated {}/{} files", report.updated, report.total);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK (data source {})", config.source_url()?);
        }
    }

    Ok(())
}
