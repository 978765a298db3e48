//! Catalog console
//!
//! Command-line front end for the catalog backend: print a page of the
//! admin product dashboard, list categories, show the storefront landing
//! page, or browse the dashboard interactively.

#![forbid(unsafe_code)]

use catalog_client::{ApiClient, CatalogSource, ClientResult};
use catalog_console::command::HELP;
use catalog_console::{
    AccessState, BrowseCommand, CategorySelection, DashboardView, FetchTicket, PageFetcher,
    PageUpdate, StatusFilter, StorefrontView, render,
};
use catalog_core::{Config, ProductPage, Result, init_logging};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Command line interface for the catalog console
#[derive(Parser)]
#[command(
    name = "catalog-console",
    version = env!("CARGO_PKG_VERSION"),
    about = "Admin product dashboard and storefront console for the catalog backend"
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long)]
    log_format: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Print one page of the admin product dashboard
    Products {
        /// Page to fetch (overrides config)
        #[arg(short, long)]
        page: Option<u32>,

        /// Search text matched against product names
        #[arg(short, long)]
        search: Option<String>,

        /// Category id, or "all"
        #[arg(long, default_value = "all")]
        category: CategorySelection,

        /// Status filter (all, active, inactive, pending)
        #[arg(long, default_value = "all")]
        status: StatusFilter,

        /// Exact seller id
        #[arg(long)]
        seller: Option<i64>,

        /// Exact product id
        #[arg(long)]
        product: Option<i64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// List product categories
    Categories {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the storefront landing page
    Storefront,

    /// Browse the dashboard interactively from stdin
    Browse,

    /// Validate configuration
    Config {
        /// Show resolved configuration
        #[arg(short, long)]
        show: bool,
    },
}

/// Main entry point for the catalog console
///
/// # Errors
///
/// Returns error if configuration, logging or the selected command fails
#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::load_from(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    init_logging(&config.logging)?;
    debug!(base_url = %config.api.base_url, "configuration loaded");

    match cli.command {
        Commands::Config { show } => {
            if show {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Configuration is valid");
            }
            Ok(())
        }
        Commands::Products {
            page,
            search,
            category,
            status,
            seller,
            product,
            format,
        } => {
            let client = ApiClient::from_config(&config.api)?;
            let mut dashboard = config.dashboard.clone();
            if let Some(page) = page {
                dashboard.initial_page = page.max(1);
            }

            let mut view = DashboardView::new(config.session.to_context(), &dashboard);
            view.mount(&client).await;
            if view.access() == AccessState::Denied {
                view.session().ensure_admin()?;
            }

            view.set_search(search.unwrap_or_default());
            view.set_category(category);
            view.set_status(status);
            view.set_seller(seller);
            view.set_product(product);

            match format {
                OutputFormat::Table => print!("{}", render::dashboard(&view)),
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&view.snapshot())?);
                }
            }
            Ok(())
        }
        Commands::Categories { format } => {
            let client = ApiClient::from_config(&config.api)?;
            let mut storefront = StorefrontView::new();
            storefront.load(&client).await;

            match format {
                OutputFormat::Table => print!("{}", render::category_list(storefront.categories())),
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(storefront.categories().categories())?
                    );
                }
            }
            Ok(())
        }
        Commands::Storefront => {
            let client = ApiClient::from_config(&config.api)?;
            let mut storefront = StorefrontView::new();
            storefront.load(&client).await;
            print!("{}", render::storefront(&storefront));
            Ok(())
        }
        Commands::Browse => {
            let client = ApiClient::from_config(&config.api)?;
            let view = DashboardView::new(config.session.to_context(), &config.dashboard);
            browse(Arc::new(client), view).await
        }
    }
}

type Completion = (FetchTicket, ClientResult<ProductPage>);

/// Run a page fetch in the background and report back on `tx`
fn spawn_fetch(
    source: &Arc<dyn CatalogSource>,
    tx: &mpsc::UnboundedSender<Completion>,
    ticket: Option<FetchTicket>,
) {
    let Some(ticket) = ticket else {
        return;
    };
    let source = Arc::clone(source);
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = PageFetcher::fetch(source.as_ref(), ticket).await;
        // The loop may have exited already.
        let _ = tx.send((ticket, result));
    });
}

/// Interactive event loop: operator commands and fetch completions
async fn browse(source: Arc<dyn CatalogSource>, mut view: DashboardView) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();

    view.load_categories(source.as_ref()).await;
    spawn_fetch(&source, &tx, view.begin_fetch());
    print!("{}", render::dashboard(&view));
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match line.parse::<BrowseCommand>() {
                    Ok(BrowseCommand::Quit) => break,
                    Ok(BrowseCommand::Help) => println!("{HELP}"),
                    Ok(command) => {
                        let ticket = command.apply(&mut view);
                        spawn_fetch(&source, &tx, ticket);
                        print!("{}", render::dashboard(&view));
                    }
                    Err(message) => eprintln!("{message}"),
                }
            }
            Some((ticket, result)) = rx.recv() => {
                let update = view.complete_fetch(ticket, result);
                if let PageUpdate::Failed(ref e) = update {
                    eprintln!("Failed to load page {}: {e}", ticket.page());
                }
                if update.needs_redraw() {
                    print!("{}", render::dashboard(&view));
                }
            }
        }
    }

    info!("leaving browse loop");
    Ok(())
}
