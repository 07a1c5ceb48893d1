//! `init` - write a commented config template

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};

use deployment_sync::config::{default_config_path, CONFIG_TEMPLATE};

pub fn cmd_init(path: Option<&Path>, force: bool, json: bool) -> Result<ExitCode> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) => path,
            None => bail!("cannot determine the config directory; pass --config PATH"),
        },
    };

    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, CONFIG_TEMPLATE)
        .with_context(|| format!("failed to write {}", path.display()))?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "complete",
                "command": "init",
                "path": path.display().to_string(),
            })
        );
    } else {
        println!("Wrote {}", path.display());
        println!("Fill in [source] and [sink], then run `deployment-sync plan`.");
    }
    Ok(ExitCode::SUCCESS)
}
