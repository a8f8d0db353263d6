use anyhow::Context;
use gym_core::{config::EngineConfig, paths, store::FileStore};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    println!("Initializing gym data in: {}", root.display());

    FileStore::init(root)
        .with_context(|| format!("failed to create {}", paths::gym_dir(root).display()))?;

    let config_path = paths::config_path(root);
    if !config_path.exists() {
        EngineConfig::default()
            .save(root)
            .context("failed to write config.yaml")?;
        println!("  created: .gym/config.yaml");
    } else {
        println!("  exists:  .gym/config.yaml");
    }

    println!("Done. Next: gym staff add <id> --tenant <tenant> --name <name> --role admin");
    Ok(())
}
