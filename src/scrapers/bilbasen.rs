use std::time::Duration;

use crate::scrapers::types::{FieldRules, SiteProfile};

/// Selector set and vocabulary for bilbasen.dk, pinned to the current
/// site revision. Listing pages are client-rendered, so index and
/// detail fetches go through the browser navigator.
pub fn profile() -> SiteProfile {
    SiteProfile {
        name: "bilbasen",
        base_url: "https://www.bilbasen.dk",
        table: "bilbasen_cars",
        newest_url: "https://www.bilbasen.dk/brugt/bil?includeengroscvr=true&includeleasing=false&sortby=date&sortorder=desc",
        model_url: Some("https://www.bilbasen.dk/brugt/bil/{brand}/{model}?page={page}"),
        model_page_cap: 50,
        sweep: &[
            ("skoda", "octavia"),
            ("audi", "a4"),
            ("audi", "a6"),
            ("bmw", "3-serie"),
            ("mercedes", "c-klasse"),
            ("volkswagen", "golf"),
            ("toyota", "yaris"),
            ("ford", "focus"),
        ],
        listing: "article.Listing_listing__XwaYe",
        listing_link: Some("a.Listing_link__6Z504"),
        index_ready: "section.srp_results__2UEV_",
        detail_ready: "main.bas-MuiVipPageComponent-main",
        index_wait: Duration::from_secs(15),
        detail_wait: Duration::from_secs(20),
        consent_text: Some("Accepter alle"),
        fields: FieldRules {
            title: "h1.bas-MuiCarHeaderComponent-title",
            price: "span.bas-MuiCarPriceComponent-value[data-e2e='car-retail-price']",
            description: "div[aria-label='beskrivelse'] .bas-MuiAdDescriptionComponent-descriptionText",
            images: "img.bas-MuiGalleryImageComponent-image",
            image_src_filter: None,
            label_rows: &[
                "div[aria-label='Detaljer'] tr",
                "div[aria-label='Generelle modeloplysninger*'] tr",
            ],
            equipment_rows: Some("div[aria-label='Udstyr og tilbehør'] tr"),
            equipment_cells: Some(
                "th[data-e2e='car-equipment-item'], td[data-e2e='car-equipment-item']",
            ),
            spec_items: None,
            posted_marker: Some("Oprettet"),
            posted_date_format: "%d.%m.%Y",
            private_marker: Some("Privat sælger"),
            dealer_marker: Some("Forhandler"),
            model_year_labels: &["Modelår"],
            mileage_labels: &["Kilometertal"],
            fuel_labels: &["Drivmiddel"],
            body_category_labels: &["Kategori"],
            body_type_labels: &["Type"],
            weight_labels: &["Vægt"],
            width_labels: &["Bredde"],
            door_count_labels: &["Døre"],
            horsepower_labels: &["Ydelse", "Hk"],
            transmission_labels: &["Gear"],
            location_labels: &["By"],
            model_year_keywords: &[],
            mileage_keywords: &[],
            fuel_keywords: &[],
        },
    }
}
