use std::{fs, path::Path, time::Duration};

use completion::{
    openai::{DEFAULT_BASE_URL, DEFAULT_MODEL},
    OpenAiConfig,
};
use serde::Deserialize;
use tracing::warn;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_host: String,
    pub port: u16,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".into(),
            port: 4000,
            openai_api_key: None,
            openai_model: DEFAULT_MODEL.into(),
            openai_base_url: DEFAULT_BASE_URL.into(),
            request_timeout_secs: 60,
        }
    }
}

impl Settings {
    pub fn openai_config(&self) -> OpenAiConfig {
        OpenAiConfig {
            api_key: self.openai_api_key.clone(),
            model: self.openai_model.clone(),
            base_url: self.openai_base_url.clone(),
            timeout: (self.request_timeout_secs > 0)
                .then(|| Duration::from_secs(self.request_timeout_secs)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_host: Option<String>,
    port: Option<u16>,
    openai_model: Option<String>,
    openai_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the optional settings file, then environment overrides.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.bind_host {
                    settings.bind_host = v;
                }
                if let Some(v) = file_cfg.port {
                    settings.port = v;
                }
                if let Some(v) = file_cfg.openai_model {
                    settings.openai_model = v;
                }
                if let Some(v) = file_cfg.openai_base_url {
                    settings.openai_base_url = v;
                }
                if let Some(v) = file_cfg.request_timeout_secs {
                    settings.request_timeout_secs = v;
                }
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "ignoring unreadable settings file");
            }
        }
    }

    if let Some(v) = env("APP__BIND_HOST") {
        settings.bind_host = v;
    }

    if let Some(v) = env("PORT") {
        apply_parsed(&mut settings.port, "PORT", &v);
    }
    if let Some(v) = env("APP__PORT") {
        apply_parsed(&mut settings.port, "APP__PORT", &v);
    }

    settings.openai_api_key = env("OPENAI_API_KEY")
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    if let Some(v) = env("OPENAI_MODEL") {
        settings.openai_model = v;
    }
    if let Some(v) = env("OPENAI_BASE_URL") {
        settings.openai_base_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        apply_parsed(
            &mut settings.request_timeout_secs,
            "APP__REQUEST_TIMEOUT_SECS",
            &v,
        );
    }

    settings
}

fn apply_parsed<T: std::str::FromStr>(slot: &mut T, key: &str, raw: &str) {
    match raw.trim().parse::<T>() {
        Ok(parsed) => *slot = parsed,
        Err(_) => warn!(key, value = raw, "ignoring unparseable setting"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
