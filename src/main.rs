use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use lectern::config::Config;
use lectern::db::{Database, SqliteDatabase};
use lectern::storage::FileStore;

/// Lectern: syllabus-driven study plans and topic quizzes.
///
/// Students upload a syllabus, get a topic list extracted from it, and
/// take faculty-authored quizzes scoped to those topics.
#[derive(Parser)]
#[command(name = "lectern", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database and upload directory
    Init,

    /// Run the web server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },

    /// Show system status (DB stats, quiz coverage)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lectern=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing Lectern database...");
            let config = Config::load()?;
            let db = init_database(&config).await?;
            let table_count = db.table_count().await?;
            FileStore::new(config.upload_dir.clone()).ensure_root()?;
            println!("Database initialized at: {}", config.db_path);
            println!("Upload directory: {}", config.upload_dir.display());
            println!("Tables created: {table_count}");
            println!("\nLectern is ready. Next step: set up your .env file");
            println!("  (see .env.example for required variables)");
            println!("{}", "\nThen run: cargo run -- serve".dimmed());
        }

        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            config.require_session_secret()?;
            config.require_faculty_credentials()?;
            let db = init_database(&config).await?;
            lectern::web::run_server(config, db, port, &bind).await?;
        }

        Commands::Status => {
            let config = Config::load()?;
            let db = open_database(&config).await?;
            lectern::status::show(&db, &config.db_path).await?;
        }
    }

    Ok(())
}

/// Open-or-create the database and wrap it in the trait object handlers use.
async fn init_database(config: &Config) -> Result<Arc<dyn Database>> {
    let conn = lectern::db::initialize(&config.db_path)?;
    Ok(Arc::new(SqliteDatabase::new(conn)))
}

/// Open an existing database (fails if `lectern init` hasn't run yet).
async fn open_database(config: &Config) -> Result<Arc<dyn Database>> {
    let conn = lectern::db::open(&config.db_path)?;
    Ok(Arc::new(SqliteDatabase::new(conn)))
}
