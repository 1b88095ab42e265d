use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where the desktop adapter writes its PNG when no explicit path is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: String,
    pub filename: String,
}

impl Config {
    /// Load from environment variables, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let config = Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .unwrap_or(8080),
            },
            output: OutputConfig {
                directory: env::var("OUTPUT_DIR").unwrap_or_else(|_| ".".to_string()),
                filename: env::var("OUTPUT_FILE")
                    .unwrap_or_else(|_| "custom_qrcode.png".to_string()),
            },
        };

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.host.is_empty() {
            anyhow::bail!("Server host must not be empty");
        }

        if self.output.filename.is_empty() {
            anyhow::bail!("Output filename must not be empty");
        }

        Ok(())
    }

    pub fn output_path(&self) -> PathBuf {
        Path::new(&self.output.directory).join(&self.output.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filename_fails_validation() {
        let mut config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            output: OutputConfig {
                directory: ".".to_string(),
                filename: "out.png".to_string(),
            },
        };
        assert!(config.validate().is_ok());

        config.output.filename.clear();
        assert!(config.validate().is_err());
    }
}
