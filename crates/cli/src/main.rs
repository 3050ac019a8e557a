//! # Dealership CLI
//!
//! Command-line interface for the dealership API.
//!
//! ## Usage
//!
//! ```bash
//! dealership serve    # Start the API server (runs migrations and the admin seed)
//! dealership migrate  # Run database migrations
//! dealership seed     # Seed the administrator account
//! dealership validate # Check the environment configuration
//! dealership --help   # Show help
//! ```

use clap::{Args, CommandFactory as _, Parser, Subcommand};
use error::Result;
use migration::MigratorTrait as _;
use server::{AppState, Settings};

/// Car dealership inventory and sales API
#[derive(Parser, Debug)]
#[command(name = "dealership")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (debug, info, warn, error)
    #[arg(short = 'L', long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Output format (json, pretty, compact)
    #[arg(short, long, env = "DEALERSHIP_LOG_FORMAT", default_value = "pretty")]
    log_format: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the API server
    Serve,

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Seed the administrator account
    Seed,

    /// Validate the environment configuration without starting anything
    Validate,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
struct MigrateArgs {
    /// Rollback the last migration
    #[arg(long)]
    rollback: bool,
}

#[derive(Args, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: clap_complete::Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    logging::init(&cli.log_level, &cli.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    match cli.command {
        Commands::Serve => serve().await?,
        Commands::Migrate(args) => migrate(&args).await?,
        Commands::Seed => seed().await?,
        Commands::Validate => validate()?,
        Commands::Completions(args) => completions(&args),
    }

    Ok(())
}

async fn serve() -> Result<()> {
    let settings = Settings::from_env()?;

    logging::info!(target: "serve", address = %settings.address(), "Starting API server...");

    let db = migration::connect_to_database(&settings.database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    // Migrations and the admin seed run automatically on startup.
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    let state = AppState::new(db, settings.jwt_config());
    state
        .auth
        .ensure_admin(&settings.admin_email, &settings.admin_password)
        .await?;

    let router = server::create_app_router(state);

    let listener = tokio::net::TcpListener::bind(settings.address())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", settings.address(), e))?;

    logging::info!(target: "serve", address = %settings.address(), "API server listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

async fn migrate(args: &MigrateArgs) -> Result<()> {
    let settings = Settings::from_env()?;

    let db = migration::connect_to_database(&settings.database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    if args.rollback {
        logging::info!(target: "migrate", "Rolling back the last migration...");

        migration::Migrator::down(&db, None)
            .await
            .map_err(|e| anyhow::anyhow!("Rollback failed: {}", e))?;

        logging::info!(target: "migrate", "Rollback completed successfully");
        return Ok(());
    }

    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    logging::info!(target: "migrate", "Migrations completed successfully");
    Ok(())
}

async fn seed() -> Result<()> {
    let settings = Settings::from_env()?;

    let db = migration::connect_to_database(&settings.database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    let state = AppState::new(db, settings.jwt_config());
    state
        .auth
        .ensure_admin(&settings.admin_email, &settings.admin_password)
        .await?;

    logging::info!(target: "seed", email = %settings.admin_email, "Administrator seed completed");
    Ok(())
}

fn validate() -> Result<()> {
    let settings = Settings::from_env()?;

    logging::info!(
        target: "validate",
        address = %settings.address(),
        admin_email = %settings.admin_email,
        jwt_expiration_seconds = settings.jwt_expiration_seconds,
        log_level = %settings.log_level,
        log_format = %settings.log_format,
        "Configuration is valid"
    );
    Ok(())
}

fn completions(args: &CompletionsArgs) {
    clap_complete::generate(
        args.shell,
        &mut Cli::command(),
        "dealership",
        &mut std::io::stdout(),
    );
}
