use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::ScrapeConfig;
use crate::utils::error::{AppError, Result};

/// The surface the scroll loop needs from a live results page. Implemented
/// by `BrowserSession` on top of Chrome; tests drive the loop with a
/// scripted fake instead.
pub trait PageDriver {
    fn navigate(&mut self, url: &str) -> Result<()>;

    fn wait_for_listings(&mut self, selector: &str) -> Result<()>;

    fn scroll_to_bottom(&mut self) -> Result<()>;

    /// Small relative scroll used to jolt lazy loaders when the page height
    /// stops growing.
    fn nudge(&mut self, pixels: u32) -> Result<()>;

    fn scroll_height(&mut self) -> Result<u64>;

    /// Full HTML snapshot of the rendered document.
    fn content(&mut self) -> Result<String>;

    fn close(&mut self) -> Result<()>;

    /// Blocking pause between scroll steps. Fakes override this so tests
    /// run without sleeping.
    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// One Chrome process with a single tab, scoped to a collection run.
pub struct BrowserSession {
    // Chrome is torn down when this handle drops; hold it for the whole
    // session even though only the tab is used directly.
    _browser: Browser,
    tab: Arc<Tab>,
    listing_wait: Duration,
}

impl BrowserSession {
    pub fn launch(config: &ScrapeConfig, headless: bool) -> Result<Self> {
        let mut launch_options = LaunchOptions::default_builder()
            .headless(headless)
            .sandbox(false) // Often needed in containerized environments
            .window_size(Some((config.window_width, config.window_height)))
            .args(vec![
                OsStr::new("--no-sandbox"),
                OsStr::new("--disable-dev-shm-usage"),
                OsStr::new("--disable-gpu"),
                OsStr::new("--disable-extensions"),
            ])
            .build()
            .map_err(|e| AppError::Browser(format!("Failed to create launch options: {}", e)))?;

        // Set Chrome path if provided
        if let Some(chrome_path) = &config.chrome_path {
            launch_options.path = Some(std::path::PathBuf::from(chrome_path));
        }

        let browser = Browser::new(launch_options)
            .map_err(|e| AppError::Browser(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| AppError::Browser(format!("Failed to create tab: {}", e)))?;

        tab.set_user_agent(&config.user_agent, Some(&config.accept_language), None)
            .map_err(|e| AppError::Browser(format!("Failed to set user agent: {}", e)))?;
        tab.set_default_timeout(config.nav_timeout());

        info!("Browser session ready (headless: {})", headless);

        Ok(BrowserSession {
            _browser: browser,
            tab,
            listing_wait: config.listing_wait(),
        })
    }

    fn evaluate(&self, expression: &str) -> Result<Option<serde_json::Value>> {
        let result = self
            .tab
            .evaluate(expression, false)
            .map_err(|e| AppError::Script(format!("'{}' failed: {}", expression, e)))?;
        Ok(result.value)
    }
}

impl PageDriver for BrowserSession {
    fn navigate(&mut self, url: &str) -> Result<()> {
        self.tab.navigate_to(url).map_err(|e| AppError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        self.tab.wait_until_navigated().map_err(|e| AppError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        debug!("Navigation complete: {}", url);
        Ok(())
    }

    fn wait_for_listings(&mut self, selector: &str) -> Result<()> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, self.listing_wait)
            .map_err(|_| AppError::ListingWait {
                selector: selector.to_string(),
                timeout_secs: self.listing_wait.as_secs(),
            })?;
        Ok(())
    }

    fn scroll_to_bottom(&mut self) -> Result<()> {
        self.evaluate("window.scrollTo(0, document.body.scrollHeight)")?;
        Ok(())
    }

    fn nudge(&mut self, pixels: u32) -> Result<()> {
        self.evaluate(&format!("window.scrollBy(0, {})", pixels))?;
        Ok(())
    }

    fn scroll_height(&mut self) -> Result<u64> {
        self.evaluate("document.body.scrollHeight")?
            .as_ref()
            .and_then(|v| v.as_f64())
            .map(|h| h as u64)
            .ok_or_else(|| {
                AppError::Script("document.body.scrollHeight returned no value".to_string())
            })
    }

    fn content(&mut self) -> Result<String> {
        self.tab
            .get_content()
            .map_err(|e| AppError::Browser(format!("Failed to get page content: {}", e)))
    }

    fn close(&mut self) -> Result<()> {
        self.tab
            .close(true)
            .map_err(|e| AppError::Browser(format!("Failed to close tab: {}", e)))?;
        debug!("Browser session closed");
        Ok(())
    }
}
