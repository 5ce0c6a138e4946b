//! Built-in profiles for the fashion storefronts crawled by default

use super::{CardRule, ContentHeuristics, SiteProfile};
use crate::url::LinkBase;

/// Domain roots crawled when none are given on the command line
pub const DEFAULT_DOMAINS: &[&str] = &[
    "https://www.virgio.com/",
    "https://www.tatacliq.com/",
    "https://nykaafashion.com/",
    "https://www.westside.com/",
];

const ACCOUNT_PATHS: &[&str] = &[
    "/login",
    "/register",
    "/wishlist",
    "/cart",
    "/checkout",
    "/account",
    "/help",
    "/policy",
    "/about",
    "/terms",
    "/logout",
    "/customer-service",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// All built-in site profiles
pub fn builtin_profiles() -> Vec<SiteProfile> {
    vec![virgio(), tatacliq(), nykaa_fashion(), westside()]
}

fn virgio() -> SiteProfile {
    SiteProfile {
        domain: "*.virgio.com".to_string(),
        name: Some("virgio".to_string()),
        product_url_patterns: strings(&[r"(/collection/|/category/).*-p\d+$"]),
        ..SiteProfile::default()
    }
}

fn tatacliq() -> SiteProfile {
    SiteProfile {
        domain: "*.tatacliq.com".to_string(),
        name: Some("tatacliq".to_string()),
        product_url_patterns: strings(&[r"/p-\d+", r"pdp/", r"-p-\d+", r"/product-details/"]),
        markup_patterns: strings(&[
            r#""productId"\s*:\s*"[^"]+"#,
            r#""product"\s*:\s*\{"#,
            r"productDetails",
            r"pdpPageData",
        ]),
        excluded_paths: strings(ACCOUNT_PATHS),
        cards: vec![CardRule {
            tags: strings(&["div", "a"]),
            class_terms: strings(&["product"]),
            own_href: true,
            ..CardRule::default()
        }],
        link_base: LinkBase::Root,
        content: ContentHeuristics {
            add_to_buttons: true,
            min_price_elements: Some(2),
            size_selectors: false,
        },
        ..SiteProfile::default()
    }
}

fn nykaa_fashion() -> SiteProfile {
    let mut excluded_paths = strings(ACCOUNT_PATHS);
    excluded_paths.push("/privacy".to_string());

    SiteProfile {
        domain: "*.nykaafashion.com".to_string(),
        name: Some("nykaafashion".to_string()),
        product_url_patterns: strings(&[
            r"/prod/",
            r"/products/",
            r"productId=",
            r"/p/\d+",
            r"/fashion/[^/]+/p/",
            r"-p\d+$",
        ]),
        markup_patterns: strings(&[r#"itemprop="product"|"@type":"Product""#]),
        excluded_paths,
        priority_paths: strings(&[
            "/category/",
            "/products/",
            "/fashion/",
            "/prod/",
            "/collection/",
            "/brands/",
        ]),
        cards: vec![CardRule {
            tags: strings(&["div", "li", "article"]),
            class_terms: strings(&[
                "product-card",
                "plp-card",
                "product-tile",
                "product-box",
                "product-item",
            ]),
            data_attributes: strings(&["data-url", "data-href", "data-product-url"]),
            ..CardRule::default()
        }],
        link_base: LinkBase::Page,
        content: ContentHeuristics {
            add_to_buttons: true,
            min_price_elements: Some(2),
            size_selectors: true,
        },
    }
}

fn westside() -> SiteProfile {
    SiteProfile {
        domain: "*.westside.com".to_string(),
        name: Some("westside".to_string()),
        product_url_patterns: strings(&[
            r"/product/",
            r"/[^/]+/[^/]+/[a-zA-Z0-9-]+-[0-9]+\.html",
            r"/[^/]+/[^/]+/[^/]+\?productid=",
        ]),
        excluded_paths: strings(&[
            "/login",
            "/register",
            "/wishlist",
            "/checkout",
            "/search",
            "/cart",
            "/customer",
            "/store-locator",
        ]),
        cards: vec![CardRule {
            tags: strings(&["div"]),
            class_terms: strings(&["product-item", "product-tile"]),
            anchor_data_attributes: strings(&["data-product-url"]),
            ..CardRule::default()
        }],
        link_base: LinkBase::Root,
        ..SiteProfile::default()
    }
}
