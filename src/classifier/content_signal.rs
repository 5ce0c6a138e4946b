use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

/// Phrases that commonly appear on product detail pages (lowercase)
pub const PRODUCT_INDICATORS: &[&str] = &[
    "add to cart",
    "add to bag",
    "buy now",
    "product details",
    "product description",
    "specifications",
    "shipping",
    "size chart",
];

static PRICE_ELEMENTS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("span[class], div[class], p[class]").expect("invalid price selector")
});

static PRICE_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)price|cost|mrp|amount").expect("invalid price class pattern"));

static QUANTITY_ELEMENTS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("select[class], input[class], div[class]").expect("invalid quantity selector")
});

static QUANTITY_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)qty|quantity|size|option").expect("invalid quantity class pattern")
});

/// Counts the distinct product indicator phrases present in the markup
pub fn count_indicator_phrases(raw_markup: &str) -> usize {
    let lowered = raw_markup.to_lowercase();
    PRODUCT_INDICATORS
        .iter()
        .filter(|phrase| lowered.contains(*phrase))
        .count()
}

/// Returns true if the page content reads like a product page
///
/// Two or more indicator phrases are enough on their own. A single phrase
/// needs backing from a price element or a quantity/size selector.
pub fn content_signal(raw_markup: &str, document: &Html) -> bool {
    if raw_markup.trim().is_empty() {
        return false;
    }

    match count_indicator_phrases(raw_markup) {
        0 => false,
        1 => {
            has_element_with_class(document, &PRICE_ELEMENTS, &PRICE_CLASS)
                || has_element_with_class(document, &QUANTITY_ELEMENTS, &QUANTITY_CLASS)
        }
        _ => true,
    }
}

fn has_element_with_class(document: &Html, selector: &Selector, class_pattern: &Regex) -> bool {
    document.select(selector).any(|element| {
        element
            .value()
            .attr("class")
            .map_or(false, |class| class_pattern.is_match(class))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(html: &str) -> bool {
        content_signal(html, &Html::parse_document(html))
    }

    #[test]
    fn test_count_is_case_insensitive_and_distinct() {
        assert_eq!(count_indicator_phrases("ADD TO CART add to cart Add To Cart"), 1);
        assert_eq!(count_indicator_phrases("Buy Now or Add to Bag"), 2);
        assert_eq!(count_indicator_phrases("nothing to see"), 0);
    }

    #[test]
    fn test_two_phrases_suffice() {
        assert!(check("<p>Buy now</p><p>Size chart</p>"));
    }

    #[test]
    fn test_single_phrase_with_price_element() {
        assert!(check(r#"<button>Add to Bag</button><span class="Product-Price">₹999</span>"#));
        assert!(check(r#"<button>Add to Bag</button><p class="final-mrp">₹999</p>"#));
    }

    #[test]
    fn test_single_phrase_with_quantity_selector() {
        assert!(check(r#"<button>Add to Cart</button><select class="qty-picker"></select>"#));
        assert!(check(r#"<button>Add to Cart</button><div class="size-options"></div>"#));
    }

    #[test]
    fn test_single_phrase_alone_is_not_enough() {
        assert!(!check(r#"<footer>Free shipping over ₹499</footer><div class="banner"></div>"#));
    }

    #[test]
    fn test_price_class_on_other_tags_ignored() {
        assert!(!check(r#"<button>Buy now</button><li class="price">₹10</li>"#));
    }

    #[test]
    fn test_price_without_phrases_is_not_enough() {
        assert!(!check(r#"<span class="price">₹999</span><select class="qty"></select>"#));
    }

    #[test]
    fn test_empty_and_malformed_markup() {
        assert!(!check(""));
        assert!(!check("   "));
        assert!(!check("<div class=\"banner\"><span>Add to cart<div"));
        assert!(check("<div class=\"price\"><span>Add to cart<div"));
    }
}
