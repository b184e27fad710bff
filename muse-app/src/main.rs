use anyhow::Result;
use muse_common::observability::{LogConfig, init_logging};
use muse_config::{MuseConfig, MuseConfigLoader};
mod wiring;

#[tokio::main]
async fn main() -> Result<()> {
    // 1) Load config (env wins)
    let cfg: MuseConfig = MuseConfigLoader::new().with_file("muse.yaml").load()?;

    let log_path = init_logging(LogConfig::default())?;
    tracing::info!(target: "app", log = %log_path.display(), "starting muse");

    wiring::run(cfg).await
}
