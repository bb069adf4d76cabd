use serde::{Deserialize, Serialize};

fn default_listen() -> String {
    "127.0.0.1:8000".to_string()
}

/// Process configuration, loaded from YAML with environment fallbacks for
/// the provider credentials. Missing keys simply disable the corresponding
/// external capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_listen")]
    pub listen: String,
    #[serde(default)]
    pub vt_api_key: Option<String>,
    #[serde(default)]
    pub gemini_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen: default_listen(),
            vt_api_key: None,
            gemini_api_key: None,
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Fill unset credentials from `VT_API_KEY` / `GEMINI_API_KEY`.
    pub fn apply_env(&mut self) {
        if self.vt_api_key.is_none() {
            self.vt_api_key = env_key("VT_API_KEY");
        }
        if self.gemini_api_key.is_none() {
            self.gemini_api_key = env_key("GEMINI_API_KEY");
        }
    }
}

fn env_key(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}
