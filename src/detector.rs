use regex::Regex;
use scraper::Html;

/// Phrases that show up in promo banners. Matching is case-insensitive
/// substring search over the rendered page text.
const KEYWORDS: [&str; 8] = [
    "sale",
    "discount",
    "off",
    "promo",
    "coupon",
    "clearance",
    "% off",
    "special offer",
];

/// Extract the text a visitor would actually see: everything under
/// `script`, `style` and `noscript` is dropped, the rest is lowercased
/// with runs of whitespace collapsed to single spaces.
pub fn page_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut parts: Vec<String> = Vec::new();
    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|e| matches!(e.name(), "script" | "style" | "noscript"))
        });
        if hidden {
            continue;
        }

        let text: &str = text;
        parts.push(text.to_owned());
    }

    let joined = parts.join(" ");
    let whitespace = Regex::new(r"\s+").unwrap();
    whitespace.replace_all(&joined, " ").trim().to_lowercase()
}

pub fn find_keywords(text: &str) -> Vec<&'static str> {
    KEYWORDS
        .iter()
        .filter(|keyword| text.contains(**keyword))
        .copied()
        .collect()
}

/// A non-empty result means the page is showing a discount.
pub fn detect(html: &str) -> Vec<&'static str> {
    find_keywords(&page_text(html))
}
