use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Who is offering the vehicle. Inferred from marker phrases in the
/// detail-page markup, so `Unknown` is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SellerType {
    Private,
    Dealer,
    #[default]
    Unknown,
}

/// Normalized vehicle listing, one per detail page.
///
/// Field names match the store's column names; the struct serializes
/// directly into the POST body. Every text field defaults to empty rather
/// than failing construction, however sparse the source page is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub identifier: String,
    pub title: String,
    pub url: String,
    pub price: String,
    pub model_year: String,
    pub mileage: String,
    pub fuel_type: String,
    pub brand: String,
    pub model: String,
    pub equipment: String,
    pub image_urls: String,
    pub description: String,
    pub body_category: String,
    pub body_type: String,
    pub weight: String,
    pub width: String,
    pub door_count: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listed_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_listed: Option<i64>,
    pub seller_type: SellerType,
    pub horsepower: String,
    pub transmission: String,
    pub location: String,
    pub scraped_at: NaiveDate,
}

impl Listing {
    /// An all-empty record for the given identity, dated `today`.
    /// The extractor fills in whatever the page actually yields.
    pub fn sparse(identifier: &str, url: &str, today: NaiveDate) -> Self {
        Self {
            identifier: identifier.to_string(),
            title: String::new(),
            url: url.to_string(),
            price: String::new(),
            model_year: String::new(),
            mileage: String::new(),
            fuel_type: String::new(),
            brand: String::new(),
            model: String::new(),
            equipment: String::new(),
            image_urls: String::new(),
            description: String::new(),
            body_category: String::new(),
            body_type: String::new(),
            weight: String::new(),
            width: String::new(),
            door_count: String::new(),
            listed_date: None,
            days_listed: None,
            seller_type: SellerType::Unknown,
            horsepower: String::new(),
            transmission: String::new(),
            location: String::new(),
            scraped_at: today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_store_column_names() {
        let mut listing = Listing::sparse(
            "abc-123",
            "https://www.bilbasen.dk/brugt/bil/abc-123",
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        );
        listing.title = "Skoda Octavia".to_string();
        listing.listed_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        listing.days_listed = Some(14);
        listing.seller_type = SellerType::Dealer;

        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["identifier"], "abc-123");
        assert_eq!(value["title"], "Skoda Octavia");
        assert_eq!(value["listed_date"], "2024-01-01");
        assert_eq!(value["days_listed"], 14);
        assert_eq!(value["seller_type"], "Dealer");
        assert_eq!(value["scraped_at"], "2024-01-15");
        for key in [
            "price",
            "model_year",
            "mileage",
            "fuel_type",
            "brand",
            "model",
            "equipment",
            "image_urls",
            "description",
            "body_category",
            "body_type",
            "weight",
            "width",
            "door_count",
            "horsepower",
            "transmission",
            "location",
        ] {
            assert_eq!(value[key], "", "missing column {key}");
        }
    }

    #[test]
    fn absent_dates_are_omitted_from_json() {
        let listing = Listing::sparse(
            "abc-123",
            "https://www.bilbasen.dk/brugt/bil/abc-123",
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        );
        let value = serde_json::to_value(&listing).unwrap();
        assert!(value.get("listed_date").is_none());
        assert!(value.get("days_listed").is_none());
        assert_eq!(value["seller_type"], "Unknown");
    }
}
