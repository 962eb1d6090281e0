use std::{fs, num::NonZeroU32, path::Path, time::Duration};

use serde::Deserialize;
use shared::domain::LabelPolicy;
use tracing::warn;

const DEFAULT_PAGE_LIMIT: NonZeroU32 = match NonZeroU32::new(10) {
    Some(limit) => limit,
    None => unreachable!(),
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_url: String,
    pub page_limit: NonZeroU32,
    pub request_timeout_secs: u64,
    pub label_policy: LabelPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:3001".into(),
            page_limit: DEFAULT_PAGE_LIMIT,
            request_timeout_secs: 30,
            label_policy: LabelPolicy::default(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    service_url: Option<String>,
    page_limit: Option<u32>,
    request_timeout_secs: Option<u64>,
    label_policy: Option<LabelPolicy>,
}

/// Defaults, then `path` (if readable), then the process environment.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();
    if let Ok(raw) = fs::read_to_string(path) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<FileSettings>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            warn!(error = %err, "config: ignoring unreadable settings file");
            return;
        }
    };

    if let Some(v) = file_cfg.service_url {
        settings.service_url = v;
    }
    if let Some(v) = file_cfg.page_limit {
        match NonZeroU32::new(v) {
            Some(limit) => settings.page_limit = limit,
            None => warn!("config: page_limit must be positive; keeping {}", settings.page_limit),
        }
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.label_policy {
        settings.label_policy = v;
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("ANALYZER_SERVICE_URL") {
        settings.service_url = v;
    }
    if let Some(v) = var("APP__SERVICE_URL") {
        settings.service_url = v;
    }

    if let Some(v) = var("APP__PAGE_LIMIT") {
        match v.parse::<NonZeroU32>() {
            Ok(limit) => settings.page_limit = limit,
            Err(_) => warn!(value = %v, "config: ignoring invalid APP__PAGE_LIMIT"),
        }
    }

    if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    if let Some(v) = var("APP__LABEL_POLICY") {
        match v.parse::<LabelPolicy>() {
            Ok(policy) => settings.label_policy = policy,
            Err(err) => warn!("config: {err}"),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
