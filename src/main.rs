//! Crawler Fleet main entry point
//!
//! This is the command-line interface operators use to inspect and control
//! the crawler fleet.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use crawler_fleet::api::{ApiClient, Environment};
use crawler_fleet::config::{load_optional_config, Config};
use crawler_fleet::controller::FleetController;
use crawler_fleet::fleet::{CrawlerId, EditField, FleetQuery, StatusFilter};
use crawler_fleet::output::{
    format_details, format_edit_form, format_fleet_table, format_status_counts,
};
use crawler_fleet::service::RemoteCrawlerService;
use crawler_fleet::state::{PauseAffordance, RunState};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

type Controller = FleetController<RemoteCrawlerService>;

/// Crawler Fleet: operator control for page-scraping workers
///
/// Lists the fleet reported by the control API, edits a crawler's page range
/// and session configuration, toggles pause/resume and requests archives.
#[derive(Parser, Debug)]
#[command(name = "crawler-fleet")]
#[command(version)]
#[command(about = "Operator control for a crawler fleet", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show status counts and the (filtered) crawler list
    List {
        /// Case-insensitive text matched against name, location and city
        #[arg(short, long)]
        search: Option<String>,

        /// all, online, offline, error or maintenance
        #[arg(long)]
        status: Option<StatusFilter>,
    },

    /// Show everything known about one crawler
    Show {
        /// Crawler id
        id: String,
    },

    /// Change a crawler's configuration; unspecified fields keep their values
    Edit {
        /// Crawler id
        id: String,

        #[command(flatten)]
        fields: EditArgs,
    },

    /// Send a pause/resume toggle for a crawler
    TogglePause {
        /// Crawler id
        id: String,
    },

    /// Ask the backend to package a paused crawler's output
    Archive {
        /// Crawler id
        id: String,
    },

    /// Show the build environment and effective configuration
    Env,
}

#[derive(Args, Debug, Default)]
struct EditArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    cidade: Option<String>,
    #[arg(long)]
    codigo_municipio: Option<String>,
    #[arg(long)]
    codigo_entidade: Option<String>,
    #[arg(long)]
    nome_entidade: Option<String>,
    #[arg(long)]
    ano: Option<String>,
    #[arg(long)]
    pagina_inicial: Option<String>,
    #[arg(long)]
    pagina_final: Option<String>,
    #[arg(long)]
    cookie_session: Option<String>,
    #[arg(long)]
    session_token: Option<String>,
    #[arg(long)]
    user_session_token: Option<String>,
}

impl EditArgs {
    /// Field changes in form order
    fn changes(self) -> Vec<(EditField, String)> {
        [
            (EditField::Name, self.name),
            (EditField::Cidade, self.cidade),
            (EditField::CodigoMunicipio, self.codigo_municipio),
            (EditField::CodigoEntidade, self.codigo_entidade),
            (EditField::NomeEntidade, self.nome_entidade),
            (EditField::Ano, self.ano),
            (EditField::PaginaInicial, self.pagina_inicial),
            (EditField::PaginaFinal, self.pagina_final),
            (EditField::CookieSession, self.cookie_session),
            (EditField::SessionToken, self.session_token),
            (EditField::UserSessionToken, self.user_session_token),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_optional_config(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load default configuration".to_string(),
    })?;

    if let Command::Env = cli.command {
        handle_env(&config);
        return Ok(());
    }

    let controller = build_controller(&config)?;
    controller
        .mount()
        .await
        .context("Failed to load the crawler fleet")?;

    match cli.command {
        Command::List { search, status } => handle_list(&controller, search, status),
        Command::Show { id } => handle_show(&controller, &id),
        Command::Edit { id, fields } => handle_edit(&controller, &id, fields).await,
        Command::TogglePause { id } => handle_toggle_pause(&controller, &id).await,
        Command::Archive { id } => handle_archive(&controller, &id).await,
        Command::Env => Ok(()),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawler_fleet=info,warn"),
            1 => EnvFilter::new("crawler_fleet=debug,info"),
            2 => EnvFilter::new("crawler_fleet=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn build_controller(config: &Config) -> anyhow::Result<Controller> {
    let client = ApiClient::new(&config.api).context("Failed to set up the control API client")?;
    tracing::debug!("Control API at {}", client.base_url());

    let status = config
        .dashboard
        .status_filter
        .parse::<StatusFilter>()
        .map_err(anyhow::Error::msg)?;
    let query = FleetQuery::new(config.dashboard.search.clone(), status);

    Ok(FleetController::with_query(
        RemoteCrawlerService::new(client),
        query,
    ))
}

/// Handles `env`: shows where requests go and with which settings
fn handle_env(config: &Config) {
    let environment = Environment::current();

    println!("=== Crawler Fleet Environment ===\n");
    println!("Backend:");
    println!("  Environment: {}", environment);
    println!("  Base URL: {}", environment.base_url());
    println!("  Headers: locale=pt-br, accept=*/*, content-type=application/json");

    println!("\nTransport:");
    match config.api.request_timeout_ms {
        Some(ms) => println!("  Request timeout: {}ms", ms),
        None => println!("  Request timeout: none"),
    }
    match config.api.connect_timeout_ms {
        Some(ms) => println!("  Connect timeout: {}ms", ms),
        None => println!("  Connect timeout: none"),
    }

    println!("\nDashboard:");
    println!("  Status filter: {}", config.dashboard.status_filter);
    println!("  Search: {:?}", config.dashboard.search);
}

/// Handles `list`: status counters over the whole fleet, then the filtered table
fn handle_list(
    controller: &Controller,
    search: Option<String>,
    status: Option<StatusFilter>,
) -> anyhow::Result<()> {
    if let Some(search) = search {
        controller.set_search(search);
    }
    if let Some(status) = status {
        controller.set_status_filter(status);
    }

    let visible = controller.visible();
    let query = controller.query();
    let counts = controller.status_counts();
    let fleet_size = controller.crawlers().len();

    println!("{}\n", format_status_counts(&counts));
    print!("{}", format_fleet_table(&visible));
    println!(
        "\n{} of {} crawlers shown (status: {}, search: {:?})",
        visible.len(),
        fleet_size,
        query.status,
        query.search
    );
    if counts.total() < fleet_size {
        println!(
            "{} crawler(s) report an unrecognized status",
            fleet_size - counts.total()
        );
    }
    if let Some(at) = controller.refreshed_at() {
        println!("Updated {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    Ok(())
}

/// Handles `show`: the details view for one crawler
fn handle_show(controller: &Controller, id: &str) -> anyhow::Result<()> {
    let crawler = controller.open_details(&CrawlerId::from(id))?;
    print!("{}", format_details(&crawler));
    Ok(())
}

/// Handles `edit`: opens the form, applies the changes and submits it
async fn handle_edit(controller: &Controller, id: &str, fields: EditArgs) -> anyhow::Result<()> {
    let id = CrawlerId::from(id);
    controller.open_edit(&id)?;

    let changes = fields.changes();
    if changes.is_empty() {
        anyhow::bail!("Nothing to change; pass at least one field option (see --help)");
    }

    for (field, value) in &changes {
        controller.set_edit_field(*field, value)?;
    }

    if let Some(form) = controller.edit_form() {
        print!("{}", format_edit_form(&form));
    }

    controller
        .submit_edit()
        .await
        .with_context(|| format!("Failed to save configuration for crawler {}", id))?;

    println!("\n✓ Configuration saved ({} field(s) changed)", changes.len());
    if let Some(crawler) = controller.find(&id) {
        print!("\n{}", format_details(&crawler));
    }
    Ok(())
}

/// Handles `toggle-pause`
async fn handle_toggle_pause(controller: &Controller, id: &str) -> anyhow::Result<()> {
    let id = CrawlerId::from(id);
    let before = controller
        .find(&id)
        .ok_or_else(|| anyhow::anyhow!("No crawler with id {}", id))?;
    let affordance = PauseAffordance::of(&before);

    println!("{} {} crawler {}", affordance.icon(), affordance.label(), id);
    controller
        .toggle_pause(&id)
        .await
        .with_context(|| format!("Failed to toggle crawler {}", id))?;

    match controller.find(&id) {
        Some(after) => println!(
            "✓ Crawler {} is now {} (was {})",
            id,
            RunState::of(&after),
            RunState::of(&before)
        ),
        None => println!("✓ Request sent; crawler {} no longer reported", id),
    }
    Ok(())
}

/// Handles `archive`
async fn handle_archive(controller: &Controller, id: &str) -> anyhow::Result<()> {
    let id = CrawlerId::from(id);
    controller
        .request_archive(&id)
        .await
        .with_context(|| format!("Failed to request archive for crawler {}", id))?;

    println!("✓ Archive requested for crawler {}", id);
    if let Some(after) = controller.find(&id) {
        println!("  Run state: {}", RunState::of(&after));
    }
    Ok(())
}
