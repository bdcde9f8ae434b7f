use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "./groupboard.sqlite3".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Path::new("config.toml");
        if config_path.exists() {
            let mut file = std::fs::File::open(config_path)?;
            let mut contents = String::new();
            file.read_to_string(&mut contents)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Config::default();
            let toml_string = toml::to_string_pretty(&default_config)?;
            let mut file = std::fs::File::create(config_path)?;
            file.write_all(toml_string.as_bytes())?;
            Ok(default_config)
        }
    }
}
