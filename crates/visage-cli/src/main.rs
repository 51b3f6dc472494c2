use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use visage_match::Config;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "visage", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the gallery file (default: ~/.local/share/visage/gallery.json)
    #[arg(long, global = true)]
    gallery: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Enroll a labelled face photo into the gallery
    ///
    /// Sends the photo to the embedding provider, takes the first detected
    /// face, and appends a {label, vector} record to the gallery. The record
    /// is durably flushed before the command reports success.
    ///
    /// The same label may be enrolled repeatedly with different photos; each
    /// enrollment adds a record, which improves recognition of that person.
    Enroll {
        /// Identity label for the person in the photo
        label: String,
        /// Path to the photo file
        photo: PathBuf,
    },
    /// Recognize the face in a photo against the gallery
    ///
    /// Sends the photo to the embedding provider and searches the gallery for
    /// the closest enrolled record by cosine similarity. Reports a match only
    /// when the best score strictly exceeds the configured threshold.
    Recognize {
        /// Path to the photo file
        photo: PathBuf,
    },
    /// Show gallery status
    Status,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the current effective configuration
    Show,
    /// Create the config file with documented defaults
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match cli.gallery {
        Some(path) => Config::load_with_gallery_path(path)?,
        None => Config::load()?,
    };

    // Ensure gallery directory exists
    if let Some(parent) = config.gallery_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    match cli.command {
        Commands::Enroll { label, photo } => {
            commands::run_enroll(&config, label, photo).await?;
        }
        Commands::Recognize { photo } => {
            commands::run_recognize(&config, photo).await?;
        }
        Commands::Status => {
            commands::show_status(&config).await?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::show_config()?,
            ConfigAction::Init => commands::init_config()?,
        },
    }

    Ok(())
}
