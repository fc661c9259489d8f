use serde::{Deserialize, Serialize};

/// One marketplace listing pulled off a search results page.
///
/// Field order is load-bearing: it is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub title: Option<String>,
    pub price: Option<String>,
    pub location: Option<String>,
    pub url: String,
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_serialize_as_null() {
        let record = ListingRecord {
            title: None,
            price: None,
            location: None,
            url: "https://www.olx.in/item/bare-ID1".to_string(),
            image: None,
        };

        let json = serde_json::to_string_pretty(&record).unwrap();
        assert!(json.contains("\"title\": null"));
        assert!(json.contains("\"url\": \"https://www.olx.in/item/bare-ID1\""));

        let back: ListingRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_non_ascii_survives_json() {
        let record = ListingRecord {
            title: Some("Car cover".to_string()),
            price: Some("₹ 1,200".to_string()),
            location: Some("Andheri West, Mumbai".to_string()),
            url: "https://www.olx.in/item/cover-ID2".to_string(),
            image: None,
        };

        let json = serde_json::to_string_pretty(&record).unwrap();
        // The rupee glyph must stay literal, not become a \u escape
        assert!(json.contains("₹ 1,200"));
        assert!(!json.contains("\\u20b9"));
    }
}
