// src/config.rs

use std::env;
use std::time::Duration;

use crate::error::ConfigError;
use crate::models::WidgetParams;
use crate::widget::WidgetSize;

pub const DEFAULT_BASE_URL: &str = "https://secondbuy.site/api";
pub const DEFAULT_PARAMETERS: &str = "16 | 138, 39, 1, 2, 3, 4, 5, 6, 7";
/// One week; longer intervals cannot be turned into a refresh date.
pub const MAX_REFRESH_INTERVAL_SECS: u64 = 7 * 24 * 60 * 60;

/// Service configuration, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub params: WidgetParams,
    pub size: WidgetSize,
    pub refresh_interval: Duration,
    pub request_timeout: Duration,
    pub bind: String,
    pub port: u16,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_positive(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    let raw = env_str(name, &default.to_string());
    raw.parse::<u64>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or(ConfigError::InvalidNumber { name, value: raw })
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let params = WidgetParams::parse(&env_str("WIDGET_PARAMETERS", DEFAULT_PARAMETERS))
            .map_err(|source| ConfigError::Params {
                name: "WIDGET_PARAMETERS",
                source,
            })?;
        let size = env_str("WIDGET_SIZE", "large")
            .parse::<WidgetSize>()
            .map_err(|source| ConfigError::Params {
                name: "WIDGET_SIZE",
                source,
            })?;

        let port = env_positive("PORT", 8080)?;
        let port = u16::try_from(port).map_err(|_| ConfigError::InvalidNumber {
            name: "PORT",
            value: port.to_string(),
        })?;

        let refresh_secs = env_positive("REFRESH_INTERVAL_SECS", 300)?;
        if refresh_secs > MAX_REFRESH_INTERVAL_SECS {
            return Err(ConfigError::InvalidNumber {
                name: "REFRESH_INTERVAL_SECS",
                value: refresh_secs.to_string(),
            });
        }

        Ok(Self {
            base_url: env_str("TAOSTATS_BASE_URL", DEFAULT_BASE_URL),
            params,
            size,
            refresh_interval: Duration::from_secs(refresh_secs),
            request_timeout: Duration::from_secs(env_positive("REQUEST_TIMEOUT_SECS", 10)?),
            bind: env_str("BIND_ADDR", "127.0.0.1"),
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests below mutate process-wide environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 7] = [
        "TAOSTATS_BASE_URL",
        "WIDGET_PARAMETERS",
        "WIDGET_SIZE",
        "REFRESH_INTERVAL_SECS",
        "REQUEST_TIMEOUT_SECS",
        "BIND_ADDR",
        "PORT",
    ];

    fn clear() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn defaults_apply_when_unset() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
        clear();

        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.params.netuid, 16);
        assert_eq!(cfg.params.uids, vec![138, 39, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(cfg.size, WidgetSize::Large);
        assert_eq!(cfg.refresh_interval, Duration::from_secs(300));
        assert_eq!(cfg.request_timeout, Duration::from_secs(10));
        assert_eq!((cfg.bind.as_str(), cfg.port), ("127.0.0.1", 8080));
    }

    #[test]
    fn reads_overrides() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
        clear();
        env::set_var("TAOSTATS_BASE_URL", " http://localhost:8000/api ");
        env::set_var("WIDGET_PARAMETERS", "3|5,6");
        env::set_var("WIDGET_SIZE", "small");
        env::set_var("REQUEST_TIMEOUT_SECS", "3");

        let cfg = AppConfig::from_env().unwrap();
        clear();
        assert_eq!(cfg.base_url, "http://localhost:8000/api");
        assert_eq!(cfg.params.uids, vec![5, 6]);
        assert_eq!(cfg.size, WidgetSize::Small);
        assert_eq!(cfg.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn malformed_values_are_errors_not_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());

        clear();
        env::set_var("WIDGET_PARAMETERS", "16 1,2");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::Params { name: "WIDGET_PARAMETERS", .. })
        ));

        clear();
        env::set_var("WIDGET_SIZE", "tiny");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::Params { name: "WIDGET_SIZE", .. })
        ));

        clear();
        env::set_var("REFRESH_INTERVAL_SECS", "0");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::InvalidNumber { name: "REFRESH_INTERVAL_SECS", .. })
        ));

        for too_long in ["10000000000000000", "604801"] {
            clear();
            env::set_var("REFRESH_INTERVAL_SECS", too_long);
            assert!(
                matches!(
                    AppConfig::from_env(),
                    Err(ConfigError::InvalidNumber { name: "REFRESH_INTERVAL_SECS", .. })
                ),
                "{too_long}"
            );
        }

        clear();
        env::set_var("REFRESH_INTERVAL_SECS", "604800");
        assert!(AppConfig::from_env().is_ok());

        clear();
        env::set_var("PORT", "99999");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::InvalidNumber { name: "PORT", .. })
        ));
        clear();
    }
}
