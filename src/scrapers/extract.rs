use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};

use crate::models::{Listing, SellerType};
use crate::scrapers::types::{FieldRules, SiteProfile};

/// Normalize one detail page into a `Listing`.
///
/// Extraction is field-isolated: every step falls back to an empty or
/// absent value when its rule matches nothing, so the record is always
/// constructible no matter how sparse or broken the page is.
pub fn extract(
    detail_html: &str,
    url: &str,
    identifier: &str,
    profile: &SiteProfile,
    today: NaiveDate,
) -> Listing {
    let document = Html::parse_document(detail_html);
    let rules = &profile.fields;
    let mut listing = Listing::sparse(identifier, url, today);

    listing.title = first_text(&document, rules.title);
    let (brand, model) = split_title(&listing.title);
    listing.brand = brand;
    listing.model = model;

    listing.price = first_text(&document, rules.price);
    listing.description = joined_text(&document, rules.description);
    listing.image_urls = collect_images(&document, rules);
    listing.equipment = collect_equipment(&document, rules);

    let labels = label_pairs(&document, rules.label_rows);
    listing.model_year = find_label(&labels, rules.model_year_labels);
    listing.mileage = find_label(&labels, rules.mileage_labels);
    listing.fuel_type = find_label(&labels, rules.fuel_labels);
    listing.body_category = find_label(&labels, rules.body_category_labels);
    listing.body_type = find_label(&labels, rules.body_type_labels);
    listing.weight = find_label(&labels, rules.weight_labels);
    listing.width = find_label(&labels, rules.width_labels);
    listing.door_count = find_label(&labels, rules.door_count_labels);
    listing.horsepower = find_label(&labels, rules.horsepower_labels);
    listing.transmission = find_label(&labels, rules.transmission_labels);
    listing.location = find_label(&labels, rules.location_labels);

    classify_spec_items(&document, rules, &mut listing);

    if let Some((listed, days)) = posted_date(&document, rules, today) {
        listing.listed_date = Some(listed);
        listing.days_listed = Some(days);
    }
    listing.seller_type = seller_type(detail_html, rules);

    listing
}

/// Brand is the first whitespace token of the title, model the rest
/// joined by single spaces. An empty title yields empty both.
fn split_title(title: &str) -> (String, String) {
    let mut tokens = title.split_whitespace();
    let brand = tokens.next().unwrap_or_default().to_string();
    let model = tokens.collect::<Vec<_>>().join(" ");
    (brand, model)
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of the first element matching `selector`, or empty.
fn first_text(document: &Html, selector: &str) -> String {
    match Selector::parse(selector) {
        Ok(sel) => document
            .select(&sel)
            .next()
            .map(|el| element_text(&el))
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

/// Like `first_text`, but joins the element's text fragments with
/// single spaces. Used for multi-paragraph descriptions.
fn joined_text(document: &Html, selector: &str) -> String {
    match Selector::parse(selector) {
        Ok(sel) => document
            .select(&sel)
            .next()
            .map(|el| {
                el.text()
                    .map(str::trim)
                    .filter(|fragment| !fragment.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

/// First three image sources in document order, joined for display.
fn collect_images(document: &Html, rules: &FieldRules) -> String {
    let sel = match Selector::parse(rules.images) {
        Ok(sel) => sel,
        Err(_) => return String::new(),
    };
    document
        .select(&sel)
        .filter_map(|img| img.value().attr("src"))
        .filter(|src| rules.image_src_filter.map_or(true, |needle| src.contains(needle)))
        .take(3)
        .collect::<Vec<_>>()
        .join(", ")
}

fn collect_equipment(document: &Html, rules: &FieldRules) -> String {
    let (rows, cells) = match (rules.equipment_rows, rules.equipment_cells) {
        (Some(rows), Some(cells)) => (rows, cells),
        _ => return String::new(),
    };
    let (rows, cells) = match (Selector::parse(rows), Selector::parse(cells)) {
        (Ok(rows), Ok(cells)) => (rows, cells),
        _ => return String::new(),
    };
    let mut items = Vec::new();
    for row in document.select(&rows) {
        for cell in row.select(&cells) {
            let text = element_text(&cell);
            if !text.is_empty() {
                items.push(text);
            }
        }
    }
    items.join(", ")
}

/// Parse the profile's labeled row sections, in order, into one
/// label→value list. Rows missing either cell are skipped. Kept as an
/// ordered list so substring lookups stay deterministic.
fn label_pairs(document: &Html, row_selectors: &[&str]) -> Vec<(String, String)> {
    let header = Selector::parse("th").unwrap();
    let data = Selector::parse("td").unwrap();

    let mut pairs = Vec::new();
    for rows in row_selectors {
        let sel = match Selector::parse(rows) {
            Ok(sel) => sel,
            Err(_) => continue,
        };
        for row in document.select(&sel) {
            let label = row.select(&header).next();
            let value = row.select(&data).next();
            if let (Some(label), Some(value)) = (label, value) {
                pairs.push((element_text(&label), element_text(&value)));
            }
        }
    }
    pairs
}

/// Value of the first row whose label contains any needle. Substring
/// matching tolerates label drift across site revisions.
fn find_label(pairs: &[(String, String)], needles: &[&str]) -> String {
    pairs
        .iter()
        .find(|(label, _)| needles.iter().any(|needle| label.contains(needle)))
        .map(|(_, value)| value.clone())
        .unwrap_or_default()
}

/// Classify free-form spec items by keyword against their lowercased
/// text. Later matching items overwrite earlier ones, so a page
/// repeating a unit keeps the last occurrence.
fn classify_spec_items(document: &Html, rules: &FieldRules, listing: &mut Listing) {
    let selector = match rules.spec_items {
        Some(selector) => selector,
        None => return,
    };
    let sel = match Selector::parse(selector) {
        Ok(sel) => sel,
        Err(_) => return,
    };
    for item in document.select(&sel) {
        let text = element_text(&item).to_lowercase();
        if rules.model_year_keywords.iter().any(|k| text.contains(k)) {
            listing.model_year = text;
        } else if rules.mileage_keywords.iter().any(|k| text.contains(k)) {
            listing.mileage = text;
        } else if rules.fuel_keywords.iter().any(|k| text.contains(k)) {
            listing.fuel_type = text;
        }
    }
}

/// Posting date from the first text node containing the marker phrase.
/// Unparsable or absent dates yield `None`, never an error.
fn posted_date(
    document: &Html,
    rules: &FieldRules,
    today: NaiveDate,
) -> Option<(NaiveDate, i64)> {
    let marker = rules.posted_marker?;
    let raw = document
        .root_element()
        .text()
        .find(|node| node.contains(marker))?
        .replace(marker, "");
    let listed = NaiveDate::parse_from_str(raw.trim(), rules.posted_date_format).ok()?;
    Some((listed, (today - listed).num_days()))
}

/// Coarse substring scan over the raw markup. Approximate by nature;
/// absence of both markers is a normal `Unknown`.
fn seller_type(detail_html: &str, rules: &FieldRules) -> SellerType {
    if rules.private_marker.map_or(false, |m| detail_html.contains(m)) {
        SellerType::Private
    } else if rules.dealer_marker.map_or(false, |m| detail_html.contains(m)) {
        SellerType::Dealer
    } else {
        SellerType::Unknown
    }
}
