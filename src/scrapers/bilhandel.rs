use std::time::Duration;

use crate::scrapers::types::{FieldRules, SiteProfile};

/// Selector set for bilhandel.dk. Index cards are anchors themselves,
/// detail pages carry no labeled tables; year, mileage and fuel come
/// from free-form spec items classified by keyword.
pub fn profile() -> SiteProfile {
    SiteProfile {
        name: "bilhandel",
        base_url: "https://bilhandel.dk",
        table: "bilhandel_cars",
        newest_url: "https://bilhandel.dk/s/alle-biler?sort=nyest&link=yes",
        model_url: None,
        model_page_cap: 1,
        sweep: &[],
        listing: "a[href^='/'][class*='listing']",
        listing_link: None,
        index_ready: "a[href^='/'][class*='listing']",
        detail_ready: "h1",
        index_wait: Duration::from_secs(15),
        detail_wait: Duration::from_secs(20),
        consent_text: None,
        fields: FieldRules {
            title: "h1",
            price: ".price",
            description: ".description",
            images: "img",
            image_src_filter: Some("uploads"),
            label_rows: &[],
            equipment_rows: None,
            equipment_cells: None,
            spec_items: Some(".car-data li"),
            posted_marker: None,
            posted_date_format: "%d.%m.%Y",
            private_marker: None,
            dealer_marker: None,
            model_year_labels: &[],
            mileage_labels: &[],
            fuel_labels: &[],
            body_category_labels: &[],
            body_type_labels: &[],
            weight_labels: &[],
            width_labels: &[],
            door_count_labels: &[],
            horsepower_labels: &[],
            transmission_labels: &[],
            location_labels: &[],
            model_year_keywords: &["årg"],
            mileage_keywords: &["km"],
            fuel_keywords: &["benzin", "diesel", "el"],
        },
    }
}
