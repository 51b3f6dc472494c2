use anyhow::{Context, Result};
use std::path::PathBuf;

use visage_core::MatchDecision;
use visage_match::{Config, Matcher};

pub async fn run_recognize(config: &Config, photo: PathBuf) -> Result<()> {
    log::info!("Recognizing {}", photo.display());

    let image = std::fs::read(&photo)
        .with_context(|| format!("Failed to read photo {}", photo.display()))?;

    let matcher = Matcher::from_config(config)?;

    match matcher.recognize(image).await? {
        MatchDecision::Matched { label, score } => {
            println!("✓ Match: {label} (score {score:.3})");
        }
        MatchDecision::NoMatch => {
            println!("✗ No match");
        }
    }

    Ok(())
}
