use std::path::Path;

use filesys_db_core::config::StoreConfig;

const MAX_CONFIG_BYTES: usize = 1024 * 1024;

pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<StoreConfig> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    if bytes.len() > MAX_CONFIG_BYTES {
        anyhow::bail!(
            "config file is too large ({} bytes; max {} bytes)",
            bytes.len(),
            MAX_CONFIG_BYTES
        );
    }
    let raw = String::from_utf8(bytes)?;
    let ext = path.extension().and_then(|s| s.to_str());
    let config: StoreConfig = match ext {
        Some("json") => serde_json::from_str(&raw)?,
        Some("toml") | None => toml::from_str(&raw)?,
        Some(other) => anyhow::bail!("unsupported config extension: {other}"),
    };
    config.validate()?;
    Ok(config)
}
