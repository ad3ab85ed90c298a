use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::{default_config_toml, CONFIG_FILE_NAME};

pub fn run_init(path: &Path, force: bool) -> Result<()> {
    let target = path.join(CONFIG_FILE_NAME);

    if target.exists() && !force {
        anyhow::bail!("{} already exists; use --force to overwrite", target.display());
    }

    fs::create_dir_all(path).with_context(|| format!("creating {}", path.display()))?;
    fs::write(&target, default_config_toml()).with_context(|| format!("writing {}", target.display()))?;

    println!("Created: {}", target.display());
    Ok(())
}
