use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 1323, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON snapshot file holding all user records.
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { path: "data/users.json".into() }
    }
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.normalize_from_env();
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl StorageConfig {
    /// Fill the snapshot path from `STORAGE_PATH` when the TOML leaves it empty.
    pub fn normalize_from_env(&mut self) {
        if self.path.trim().is_empty() {
            if let Ok(path) = std::env::var("STORAGE_PATH") {
                self.path = path;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(anyhow!(
                "storage.path is empty; provide it in config.toml or the STORAGE_PATH env var"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let cfg: AppConfig = toml::from_str("").expect("empty config parses");
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 1323);
        assert_eq!(cfg.storage.path, "data/users.json");
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut cfg: AppConfig = toml::from_str(
            "[server]\nhost = \"0.0.0.0\"\nport = 0\n",
        )
        .expect("config parses");
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn storage_path_overrides_default() {
        let mut cfg: AppConfig = toml::from_str(
            "[storage]\npath = \"/var/lib/user-api/users.json\"\n",
        )
        .expect("config parses");
        cfg.normalize_and_validate().expect("valid config");
        assert_eq!(cfg.storage.path, "/var/lib/user-api/users.json");
    }
}
