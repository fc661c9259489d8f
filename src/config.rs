use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::utils::error::{AppError, Result};

pub const DEFAULT_URL: &str = "https://www.olx.in/items/q-car-cover";

const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120 Safari/537.36";

/// Fixed browsing profile and scroll cadence for a collection run.
///
/// The listing site serves a different (and much sparser) page to clients
/// that do not look like a desktop browser, so the user agent, language and
/// window size stay pinned; only the headless toggle varies per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    pub user_agent: String,
    pub accept_language: String,
    pub window_width: u32,
    pub window_height: u32,
    pub nav_timeout_secs: u64,
    pub listing_wait_secs: u64,
    pub scroll_pause_ms: u64,
    pub settle_wait_ms: u64,
    pub nudge_pixels: u32,
    pub max_rounds: u32,
    pub chrome_path: Option<String>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        ScrapeConfig {
            user_agent: DESKTOP_USER_AGENT.to_string(),
            accept_language: "en-IN".to_string(),
            window_width: 1280,
            window_height: 800,
            nav_timeout_secs: 60,
            listing_wait_secs: 60,
            scroll_pause_ms: 1200,
            settle_wait_ms: 2000,
            nudge_pixels: 400,
            max_rounds: 30,
            chrome_path: None,
        }
    }
}

impl ScrapeConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Add Chrome path from environment if not set
        if config.chrome_path.is_none() {
            config.chrome_path = env::var("CHROME_PATH").ok();
        }

        config
    }

    pub fn validate(&self) -> Result<()> {
        if self.user_agent.trim().is_empty() {
            return Err(AppError::Config("user_agent must not be empty".into()));
        }

        if self.window_width == 0 || self.window_height == 0 {
            return Err(AppError::Config("window size must be greater than 0".into()));
        }

        if self.max_rounds == 0 {
            return Err(AppError::Config("max_rounds must be greater than 0".into()));
        }

        if self.scroll_pause_ms == 0 {
            return Err(AppError::Config("scroll_pause_ms must be greater than 0".into()));
        }

        Ok(())
    }

    pub fn nav_timeout(&self) -> Duration {
        Duration::from_secs(self.nav_timeout_secs)
    }

    pub fn listing_wait(&self) -> Duration {
        Duration::from_secs(self.listing_wait_secs)
    }

    pub fn scroll_pause(&self) -> Duration {
        Duration::from_millis(self.scroll_pause_ms)
    }

    pub fn settle_wait(&self) -> Duration {
        Duration::from_millis(self.settle_wait_ms)
    }
}
