use anyhow::{Context, Result};
use std::path::PathBuf;

use visage_match::{Config, Matcher};

pub async fn run_enroll(config: &Config, label: String, photo: PathBuf) -> Result<()> {
    log::info!("Enrolling '{}' from {}", label, photo.display());

    let image = std::fs::read(&photo)
        .with_context(|| format!("Failed to read photo {}", photo.display()))?;
    let file_name = photo
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo.jpg".to_string());

    let matcher = Matcher::from_config(config)?;
    matcher.enroll(&label, image, &file_name).await?;

    println!("✓ Enrolled '{label}'");
    println!(
        "  Gallery now holds {} record(s) at {}",
        matcher.store().len().await,
        matcher.store().path().display()
    );

    Ok(())
}
