use anyhow::Result;
use std::collections::BTreeSet;

use visage_core::GalleryStore;
use visage_match::Config;

pub async fn show_status(config: &Config) -> Result<()> {
    let store = GalleryStore::open(&config.gallery_path)?;
    let gallery = store.snapshot().await;

    let identities: BTreeSet<&str> = gallery.iter().map(|r| r.label.as_str()).collect();

    println!("\n📊 Visage Status\n");
    println!("  Gallery: {}", config.gallery_path.display());
    println!("  Enrolled records: {}", gallery.len());
    println!("  Distinct identities: {}", identities.len());
    if let Some(dim) = gallery.dimension() {
        println!("  Embedding dimensionality: {dim}");
    }
    println!("  Similarity threshold: {}", config.similarity_threshold);
    println!("  Provider endpoint: {}", config.provider_endpoint);

    if gallery.is_empty() {
        println!("\n  Run `visage enroll <label> <photo>` to enroll the first face");
    }

    Ok(())
}
