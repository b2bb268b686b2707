//! catsync - command-line front end for the search-and-sync engine
//!
//! Runs one search or drill-down against the catalog, syncs the results
//! into the local entry store and prints the resulting view.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use catsync_common::config::{default_config_path, RootFolderResolver, TomlConfig};
use catsync_common::events::EventBus;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catsync_engine::services::ReqwestTransport;
use catsync_engine::{
    db, CatalogClient, CatalogEndpoints, Container, ContainerKind, EntryStore, EventBusView,
    SearchKind, SearchSession,
};

/// Command-line arguments for catsync
#[derive(Parser, Debug)]
#[command(name = "catsync")]
#[command(about = "Search the music catalog and sync results into the local library")]
#[command(version)]
struct Args {
    /// Root folder holding the entry store
    #[arg(short, long, env = "CATSYNC_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "CATSYNC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search the catalog (kind: tracks, artists, albums)
    Search {
        kind: String,
        term: String,
    },
    /// Load an artist's top tracks
    Artist {
        id: String,
    },
    /// Load an album's tracks with its cover
    Album {
        id: String,
    },
    /// List the search kinds with their menu texts
    Kinds,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Command::Kinds = args.command {
        for kind in SearchKind::ALL {
            println!("{}\t{}\t{}", kind, kind.label(), kind.placeholder());
        }
        return Ok(());
    }

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let config = TomlConfig::load(&config_path).context("Failed to load configuration")?;

    // Initialize tracing: configured log file, otherwise stderr
    let log_file = match &config.logging.file {
        Some(path) => Some(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?,
        ),
        None => None,
    };
    let stderr_layer = log_file
        .is_none()
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    let file_layer = log_file.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("catsync={0},catsync_engine={0}", config.logging.level).into()
            }),
        )
        .with(stderr_layer)
        .with(file_layer)
        .init();

    let root_folder = RootFolderResolver::new()
        .with_cli_arg(args.root_folder.clone())
        .with_toml_config(&config)
        .resolve();
    let db_path = config.database_path(&root_folder);
    info!("Root folder: {}", root_folder.display());
    info!("Database: {}", db_path.display());

    let pool = db::init_database_pool(&db_path)
        .await
        .context("Failed to open entry store")?;
    let store = EntryStore::new(pool);

    let transport = ReqwestTransport::from_config(&config).context("Failed to create HTTP client")?;
    let client = CatalogClient::new(Arc::new(transport));
    let endpoints = CatalogEndpoints::from_config(&config);

    let event_bus = EventBus::new(256);
    debug!(capacity = event_bus.capacity(), "View event bus ready");
    let mut events = event_bus.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            debug!(?event, "View event");
        }
    });
    let view = Arc::new(EventBusView::new(event_bus));

    let session = SearchSession::new(client, endpoints, store, view)
        .await
        .context("Failed to start search session")?;

    let (ticket, container_search) = match args.command {
        Command::Search { kind, term } => {
            let ticket = session.search_requested(&kind, &term).await?;
            (ticket, session.search_kind().await.groups_into_containers())
        }
        Command::Artist { id } => (
            session.select_container(&cli_container(ContainerKind::Artist, id)).await,
            false,
        ),
        Command::Album { id } => (
            session.select_container(&cli_container(ContainerKind::Album, id)).await,
            false,
        ),
        Command::Kinds => return Ok(()),
    };

    if ticket.finished().await.is_none() {
        info!("Request superseded before completion");
    }

    if !container_search {
        for entry in session.current_entries().await? {
            println!(
                "{}\t{}\t{}s\t{}",
                entry.title,
                entry.artist_display,
                entry.duration_secs,
                entry.cover_url.as_deref().unwrap_or("-")
            );
        }
    } else {
        for container in session.containers().await {
            println!(
                "{}\t{}\t{}\t{}",
                container.kind, container.id, container.name, container.external_url
            );
        }
    }

    Ok(())
}

/// Container for a drill-down requested by id from the command line
fn cli_container(kind: ContainerKind, id: String) -> Container {
    Container {
        name: id.clone(),
        kind,
        id,
        external_url: String::new(),
    }
}
