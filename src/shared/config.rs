use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub push: PushConfig,
    pub lists: ListConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout: u64,
}

impl ApiConfig {
    /// The push channel connects to the bare server URL, not the API prefix.
    pub fn push_base(&self) -> String {
        let trimmed = self.base_url.trim_end_matches('/');
        let stripped = trimmed.strip_suffix("/api").unwrap_or(trimmed);
        if stripped.is_empty() {
            trimmed.to_string()
        } else {
            stripped.to_string()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    pub enabled: bool,
    pub reconnect_delay_ms: u64,
    pub reconnect_attempts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    pub lead_page_limit: u32,
    pub activity_page_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:5000/api".to_string(),
                request_timeout: 30,
            },
            push: PushConfig {
                enabled: true,
                reconnect_delay_ms: 1000,
                reconnect_attempts: 5,
            },
            lists: ListConfig {
                lead_page_limit: 10,
                activity_page_limit: 50,
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("SWIFTCRM_API_URL") {
            if !v.trim().is_empty() {
                cfg.api.base_url = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("SWIFTCRM_REQUEST_TIMEOUT") {
            if let Some(value) = parse_u64(&v) {
                cfg.api.request_timeout = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("SWIFTCRM_PUSH_ENABLED") {
            cfg.push.enabled = parse_bool(&v, cfg.push.enabled);
        }
        if let Ok(v) = std::env::var("SWIFTCRM_PUSH_RECONNECT_DELAY_MS") {
            if let Some(value) = parse_u64(&v) {
                cfg.push.reconnect_delay_ms = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("SWIFTCRM_PUSH_RECONNECT_ATTEMPTS") {
            if let Some(value) = parse_u64(&v) {
                cfg.push.reconnect_attempts = value as u32;
            }
        }
        if let Ok(v) = std::env::var("SWIFTCRM_LEAD_PAGE_LIMIT") {
            if let Some(value) = parse_u64(&v) {
                cfg.lists.lead_page_limit = (value as u32).max(1);
            }
        }
        if let Ok(v) = std::env::var("SWIFTCRM_ACTIVITY_PAGE_LIMIT") {
            if let Some(value) = parse_u64(&v) {
                cfg.lists.activity_page_limit = (value as u32).max(1);
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api.base_url.trim().is_empty() {
            return Err("API base_url must not be empty".to_string());
        }
        if self.lists.lead_page_limit == 0 {
            return Err("Lead page limit must be greater than 0".to_string());
        }
        if self.lists.activity_page_limit == 0 {
            return Err("Activity page limit must be greater than 0".to_string());
        }
        if self.push.enabled && self.push.reconnect_delay_ms == 0 {
            return Err("Push reconnect_delay_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}
