use gym_core::config::{EngineConfig, WarnLevel};
use std::path::Path;

pub fn run(root: &Path, port: u16) -> anyhow::Result<()> {
    let cfg = EngineConfig::load(root)?;
    for w in cfg.validate() {
        match w.level {
            WarnLevel::Error => anyhow::bail!("config: {}", w.message),
            WarnLevel::Warning => tracing::warn!("config: {}", w.message),
        }
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(gym_server::serve(root, port))
}
