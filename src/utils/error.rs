use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("No listings appeared for '{selector}' within {timeout_secs}s")]
    ListingWait { selector: String, timeout_secs: u64 },

    #[error("Script evaluation failed: {0}")]
    Script(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// AppError can be converted to anyhow::Error via Display implementation

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_navigation_error() {
        let err = AppError::Navigation {
            url: "https://www.olx.in/items/q-car-cover".to_string(),
            message: "timed out".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Navigation to https://www.olx.in/items/q-car-cover failed: timed out"
        );
    }

    #[test]
    fn test_listing_wait_error() {
        let err = AppError::ListingWait {
            selector: "a[href*='/item/']".to_string(),
            timeout_secs: 60,
        };
        assert_eq!(
            err.to_string(),
            "No listings appeared for 'a[href*='/item/']' within 60s"
        );
    }

    #[test]
    fn test_url_error_conversion() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let app_err: AppError = parse_err.into();
        assert!(matches!(app_err, AppError::Url(_)));
        assert!(app_err.to_string().starts_with("Invalid URL:"));
    }
}
