//! # Marquee Server
//!
//! Serves the title browse API backed by Postgres, or by an in-memory store
//! seeded from a JSON file for local work.

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, bail};
use clap::{Args as ClapArgs, Parser, Subcommand};
use marquee_config::{Config, ConfigLoad, ConfigLoader};
use marquee_core::{
    TitleQueryEngine,
    database::{InMemoryTitleRepository, InMemoryUserOverlayRepository, PostgresDatabase},
};
use marquee_server::{AppState, create_app, routes::cors_layer, seed::load_seed_file};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "marquee-server")]
#[command(about = "Title browsing API for the Marquee media catalog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to marquee.toml
    #[arg(long, env = "MARQUEE_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Path to a .env file (defaults to ./.env)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Serve from an in-memory store instead of Postgres
    #[arg(long, env = "MARQUEE_IN_MEMORY", default_value_t = false)]
    in_memory: bool,

    /// JSON array of titles to load into the in-memory store
    #[arg(long, requires = "in_memory")]
    seed: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
    /// Upsert titles from a JSON file and exit
    Seed { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,marquee_core=debug,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Some(Command::Db(DbCommand::Migrate)) => run_db_migrate(&cli.serve).await,
        Some(Command::Db(DbCommand::Seed { path })) => run_db_seed(&cli.serve, &path).await,
        None => run_server(cli.serve).await,
    }
}

fn load_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let mut loader = ConfigLoader::new().in_memory(args.in_memory);
    if let Some(path) = &args.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = &args.env_file {
        loader = loader.with_env_file(path);
    }

    let ConfigLoad { mut config, warnings } =
        loader.load().context("failed to load configuration")?;

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "loaded configuration file");
    }
    warnings.log();

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    Ok(config)
}

async fn connect(config: &Config) -> anyhow::Result<PostgresDatabase> {
    let Some(url) = config.database.url.as_deref() else {
        bail!("no database URL configured; set DATABASE_URL or use --in-memory");
    };
    PostgresDatabase::new(url, config.database.max_connections)
        .await
        .context("failed to connect to PostgreSQL")
}

async fn run_db_migrate(args: &ServeArgs) -> anyhow::Result<()> {
    let config = load_config(args)?;
    let db = connect(&config).await?;
    db.run_migrations().await.context("database migration failed")?;
    info!("Database migrations applied successfully");
    Ok(())
}

async fn run_db_seed(args: &ServeArgs, path: &std::path::Path) -> anyhow::Result<()> {
    let config = load_config(args)?;
    let titles = load_seed_file(path)?;
    let db = connect(&config).await?;
    let repo = db.titles();
    for title in &titles {
        repo.upsert(title)
            .await
            .with_context(|| format!("failed to seed title {}", title.title))?;
    }
    info!(count = titles.len(), "seeded titles");
    Ok(())
}

async fn build_engine(args: &ServeArgs, config: &Config) -> anyhow::Result<TitleQueryEngine> {
    let engine_config = config.query.to_engine_config();

    if args.in_memory {
        let titles = match &args.seed {
            Some(path) => load_seed_file(path)?,
            None => Vec::new(),
        };
        info!(titles = titles.len(), "using in-memory store");
        return Ok(TitleQueryEngine::new(
            Arc::new(InMemoryTitleRepository::with_titles(titles)),
            Arc::new(InMemoryUserOverlayRepository::new()),
            engine_config,
        ));
    }

    let db = connect(config).await?;
    Ok(TitleQueryEngine::new(
        Arc::new(db.titles()),
        Arc::new(db.user_overlays()),
        engine_config,
    ))
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let engine = build_engine(&args, &config).await?;

    let mut app = create_app(AppState::new(engine));
    if let Some(cors) = cors_layer(&config.server.cors_allowed_origins) {
        app = app.layer(cors);
    }

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "marquee server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
