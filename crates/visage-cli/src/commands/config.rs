use anyhow::Result;
use visage_match::{config, Config};

/// Show the current effective configuration.
pub fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!(
        "File exists: {}\n",
        if exists { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    println!("  similarity_threshold: {}", config.similarity_threshold);
    println!("  provider_endpoint: {}", config.provider_endpoint);
    println!(
        "  provider_api_key: {}",
        if config.provider_api_key.is_some() {
            "<set>"
        } else {
            "<not set>"
        }
    );
    println!("  provider_timeout_secs: {}", config.provider_timeout_secs);
    println!("  gallery_path: {}", config.gallery_path.display());

    println!("\nPriority: CLI args > ENV vars (VISAGE_*) > Config file > Defaults");

    Ok(())
}

/// Create the config file with documented defaults if it doesn't exist.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", path.display());
        println!("  Edit it to set your provider API key");
    } else {
        println!("Config file already exists: {}", path.display());
    }

    Ok(())
}
