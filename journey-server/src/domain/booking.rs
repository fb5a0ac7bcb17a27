//! Prices and booking links.
//!
//! Booking links are pass-through URLs to third-party sites. Every link that
//! leaves this crate is re-parsed so that it is absolute and percent-encoded.

use reqwest::Url;

/// Format an amount as a currency-prefixed price, e.g. `"INR 4,520"`.
///
/// Amounts are rounded to whole units.
///
/// ```
/// use journey_server::domain::format_price;
///
/// assert_eq!(format_price("INR", 4520.0), "INR 4,520");
/// assert_eq!(format_price("usd", 1234567.6), "USD 1,234,568");
/// ```
pub fn format_price(currency: &str, amount: f64) -> String {
    let rounded = amount.max(0.0).round() as u64;
    format!("{} {}", currency_code(currency), group_thousands(rounded))
}

/// Re-tag a provider-formatted price (e.g. `"₹4,520"`) with a currency code.
pub fn tag_price(currency: &str, formatted: &str) -> String {
    let amount = formatted
        .trim()
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .trim();
    if amount.is_empty() {
        return unpriced(currency);
    }
    format!("{} {}", currency_code(currency), amount)
}

/// Price placeholder when the provider quoted nothing.
pub fn unpriced(currency: &str) -> String {
    format!("{} n/a", currency_code(currency))
}

fn currency_code(currency: &str) -> String {
    let code = currency.trim().to_uppercase();
    if code.is_empty() { "INR".to_string() } else { code }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Validate and percent-encode a provider-supplied booking URL.
///
/// Returns `None` unless the link is an absolute http(s) URL.
///
/// ```
/// use journey_server::domain::sanitize_link;
///
/// let link = sanitize_link("https://example.com/book?from=New Delhi").unwrap();
/// assert_eq!(link, "https://example.com/book?from=New%20Delhi");
///
/// assert!(sanitize_link("/relative/path").is_none());
/// ```
pub fn sanitize_link(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}

/// Build a search link on `base` with encoded query parameters.
pub fn search_link(base: &str, params: &[(&str, &str)]) -> String {
    match Url::parse_with_params(base, params) {
        Ok(url) => url.to_string(),
        Err(_) => base.replace(' ', "%20"),
    }
}
