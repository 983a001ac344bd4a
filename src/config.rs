use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_port: u16,
    pub log_level: String,
    pub environment: String,
    pub synthetic_data: bool,
    pub price_refresh_interval_hours: u64,
}

impl AppConfig {
    /// Create application config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let http_port = env::var("HTTP_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(3001);

        let log_level = env::var("LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_string());

        let environment = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string());

        let synthetic_data = env::var("SYNTHETIC_DATA")
            .ok()
            .and_then(|s| s.parse::<bool>().ok())
            .unwrap_or(false);

        let price_refresh_interval_hours = env::var("PRICE_REFRESH_INTERVAL_HOURS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(24);

        // Validate log level
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid LOG_LEVEL: {}. Must be one of: {:?}",
                log_level, valid_log_levels
            ));
        }

        // Validate environment
        let valid_environments = ["development", "staging", "production"];
        if !valid_environments.contains(&environment.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid ENVIRONMENT: {}. Must be one of: {:?}",
                environment, valid_environments
            ));
        }

        if price_refresh_interval_hours == 0 {
            return Err("PRICE_REFRESH_INTERVAL_HOURS must be greater than 0".to_string());
        }

        Ok(Self {
            http_port,
            log_level: log_level.to_lowercase(),
            environment: environment.to_lowercase(),
            synthetic_data,
            price_refresh_interval_hours,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Get the price refresh period as a Duration
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.price_refresh_interval_hours * 3600)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http_port: 3001,
            log_level: "info".to_string(),
            environment: "development".to_string(),
            synthetic_data: false,
            price_refresh_interval_hours: 24,
        }
    }
}
