use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

static JSON_LD: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("invalid JSON-LD selector")
});

static META_PROPERTY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[property]").expect("invalid meta selector"));

static PRODUCT_META_PROPERTY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"product:|og:price").expect("invalid meta property pattern"));

// Used when a JSON-LD block is not valid JSON
static LOOSE_PRODUCT_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)"@type"\s*:\s*(\[\s*)?"product""#).expect("invalid product type pattern")
});

/// Returns true if structured data or meta tags declare a product
pub fn metadata_signal(document: &Html) -> bool {
    structured_data_declares_product(document)
        || open_graph_type_is_product(document)
        || has_product_meta_property(document)
}

fn structured_data_declares_product(document: &Html) -> bool {
    document.select(&JSON_LD).any(|script| {
        let text: String = script.text().collect();
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => declares_product(&value),
            Err(_) => LOOSE_PRODUCT_TYPE.is_match(&text),
        }
    })
}

/// Walks a JSON-LD value looking for an `@type` of `Product`
///
/// Nested nodes and `@graph` arrays are searched too.
fn declares_product(value: &Value) -> bool {
    match value {
        Value::Object(map) => {
            let typed_product = match map.get("@type") {
                Some(Value::String(kind)) => kind.eq_ignore_ascii_case("product"),
                Some(Value::Array(kinds)) => kinds.iter().any(|kind| {
                    kind.as_str()
                        .map_or(false, |kind| kind.eq_ignore_ascii_case("product"))
                }),
                _ => false,
            };
            typed_product || map.values().any(declares_product)
        }
        Value::Array(items) => items.iter().any(declares_product),
        _ => false,
    }
}

fn open_graph_type_is_product(document: &Html) -> bool {
    document.select(&META_PROPERTY).any(|meta| {
        let element = meta.value();
        element.attr("property") == Some("og:type")
            && element
                .attr("content")
                .map_or(false, |content| content.trim().eq_ignore_ascii_case("product"))
    })
}

fn has_product_meta_property(document: &Html) -> bool {
    document.select(&META_PROPERTY).any(|meta| {
        meta.value()
            .attr("property")
            .map_or(false, |property| PRODUCT_META_PROPERTY.is_match(property))
    })
}
