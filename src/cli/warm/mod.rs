//! Warm command - builds or loads the reference embeddings and exits

use tracing::info;

pub async fn run() -> anyhow::Result<()> {
    let classifier = super::bootstrap().await?;

    let (phrases, dimensions) = classifier
        .matrix()
        .map(|m| (m.len(), m.dimensions()))
        .unwrap_or_default();

    info!(cache_key = classifier.cache_key(), "Reference embeddings ready");
    println!(
        "Reference embeddings ready: {} phrases, {} dimensions",
        phrases, dimensions
    );

    Ok(())
}
