use std::path::PathBuf;

use anyhow::Result;
use extgen_csharp::{config, generate_for_project};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Optional .env next to the working directory.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,extgen_core=info,extgen_csharp=info"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()?;

    let root = PathBuf::from(std::env::var("EXTGEN_ROOT").unwrap_or_else(|_| ".".into()));
    let explicit = std::env::var_os("EXTGEN_CONFIG").map(PathBuf::from);

    let cfg = config::load(&root, explicit.as_deref())?;
    let summary = generate_for_project(&root, &cfg).await?;

    info!(
        output = %summary.output_file,
        groups = summary.counts.groups,
        members = summary.counts.members,
        sha256 = %summary.content_sha256,
        "extgen done"
    );
    Ok(())
}
