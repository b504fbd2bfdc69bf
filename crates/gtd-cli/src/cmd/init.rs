use anyhow::Context;
use gtd_core::{
    config::{Config, StoreBackend, WarnLevel},
    io, paths,
};
use std::path::Path;

pub fn run(root: &Path, memory: bool, enforce_rules: bool) -> anyhow::Result<()> {
    println!("Initializing GTD in: {}", root.display());

    let dir = paths::gtd_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let config_path = paths::config_path(root);
    let config = if config_path.exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
        Config::load(root)?
    } else {
        let mut cfg = Config::default();
        if memory {
            cfg.store.backend = StoreBackend::Memory;
        }
        cfg.rules.enforce = enforce_rules;
        cfg.save(root).context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
        cfg
    };

    for warning in config.validate() {
        let label = match warning.level {
            WarnLevel::Warning => "warning",
            WarnLevel::Error => "error",
        };
        eprintln!("  {label}: {}", warning.message);
    }

    Ok(())
}
