//! Place names and provider location codes.

use std::fmt;

/// Error returned when parsing an invalid location code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location code: {reason}")]
pub struct InvalidLocationCode {
    reason: &'static str,
}

/// A provider-specific place identifier: an airport code, a station code,
/// or an opaque entity id.
///
/// Codes are opaque to this crate: any non-empty token of at most 128
/// characters with no whitespace or control characters. Case is kept as the
/// provider sent it.
///
/// # Examples
///
/// ```
/// use journey_server::domain::LocationCode;
///
/// let bom = LocationCode::parse("BOM").unwrap();
/// assert_eq!(bom.as_str(), "BOM");
///
/// assert!(LocationCode::parse("BOM.AIRPORT").is_ok());
/// assert!(LocationCode::parse("").is_err());
/// assert!(LocationCode::parse("MUMBAI CENTRAL").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LocationCode(String);

impl LocationCode {
    const MAX_LEN: usize = 128;

    /// Parse a code, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidLocationCode> {
        let s = s.trim();

        if s.is_empty() {
            return Err(InvalidLocationCode {
                reason: "must not be empty",
            });
        }

        if s.chars().count() > Self::MAX_LEN {
            return Err(InvalidLocationCode {
                reason: "must be at most 128 characters",
            });
        }

        if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(InvalidLocationCode {
                reason: "must not contain whitespace or control characters",
            });
        }

        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocationCode({})", self.0)
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a free-text place name into a cache/lookup key.
///
/// Lowercases, keeps the part before the first comma (dropping qualifiers
/// like ", India") and trims.
///
/// ```
/// use journey_server::domain::normalize_place_name;
///
/// assert_eq!(normalize_place_name("  Vapi, India"), "vapi");
/// assert_eq!(normalize_place_name("New Delhi"), "new delhi");
/// ```
pub fn normalize_place_name(name: &str) -> String {
    let lower = name.to_lowercase();
    lower
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// The display form of a place: the part before the first comma, trimmed,
/// with the caller's casing.
pub fn display_name(name: &str) -> &str {
    name.split(',').next().unwrap_or_default().trim()
}

/// All comma-separated parts of a place name, normalized.
pub fn place_qualifiers(name: &str) -> impl Iterator<Item = String> + '_ {
    name.split(',')
        .map(|part| part.trim().to_lowercase())
        .filter(|part| !part.is_empty())
}

/// Whether two place names refer to the same normalized place.
pub fn same_place(a: &str, b: &str) -> bool {
    normalize_place_name(a) == normalize_place_name(b)
}
