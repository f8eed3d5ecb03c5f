//! Parsing of the markup annotations that drive registration.
//!
//! The page declares behavior statically: an element's kind comes from a
//! data attribute, its target value from another, and the observer's root
//! margin from a CSS-margin-style shorthand. Hosts read those strings out
//! of the markup and hand them here.

use thiserror::Error;
use unveil_protocol::{ElementKind, Insets};

#[derive(Debug, Error, PartialEq)]
pub enum MarkupError {
    #[error("unknown element kind: {0:?}")]
    UnknownKind(String),
    #[error("invalid root margin {0:?}: expected 1-4 px lengths")]
    InvalidRootMargin(String),
}

/// Parse an element-kind annotation.
pub fn parse_kind(value: &str) -> Result<ElementKind, MarkupError> {
    match value.trim() {
        "reveal" => Ok(ElementKind::Generic),
        "progress" => Ok(ElementKind::ProgressBar),
        "counter" => Ok(ElementKind::Counter),
        other => Err(MarkupError::UnknownKind(other.to_string())),
    }
}

/// Parse an optional target-value annotation.
///
/// Absent, malformed, or non-finite values all come back as `None` — the
/// element still reveals, it just doesn't animate. This is the silent
/// degradation path, never an error.
pub fn parse_target(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parse a root-margin shorthand like `"0px 0px -50px 0px"`.
///
/// One to four px lengths, expanding CSS-style: one value applies to all
/// sides, two to vertical/horizontal, three to top/horizontal/bottom.
/// The `px` suffix is optional; other units are rejected.
pub fn parse_root_margin(value: &str) -> Result<Insets, MarkupError> {
    let invalid = || MarkupError::InvalidRootMargin(value.to_string());

    let mut lengths = Vec::with_capacity(4);
    for part in value.split_whitespace() {
        let number = part.strip_suffix("px").unwrap_or(part);
        let parsed: f64 = number.parse().map_err(|_| invalid())?;
        if !parsed.is_finite() {
            return Err(invalid());
        }
        lengths.push(parsed);
    }

    match lengths.as_slice() {
        [all] => Ok(Insets::new(*all, *all, *all, *all)),
        [vertical, horizontal] => Ok(Insets::new(*vertical, *horizontal, *vertical, *horizontal)),
        [top, horizontal, bottom] => Ok(Insets::new(*top, *horizontal, *bottom, *horizontal)),
        [top, right, bottom, left] => Ok(Insets::new(*top, *right, *bottom, *left)),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_kinds() {
        assert_eq!(parse_kind("reveal"), Ok(ElementKind::Generic));
        assert_eq!(parse_kind("progress"), Ok(ElementKind::ProgressBar));
        assert_eq!(parse_kind(" counter "), Ok(ElementKind::Counter));
    }

    #[test]
    fn unknown_kind_is_an_error() {
        assert_eq!(
            parse_kind("sparkle"),
            Err(MarkupError::UnknownKind("sparkle".to_string()))
        );
    }

    #[test]
    fn target_parses_numbers_and_degrades_on_garbage() {
        assert_eq!(parse_target(Some("75")), Some(75.0));
        assert_eq!(parse_target(Some(" 200 ")), Some(200.0));
        assert_eq!(parse_target(Some("NaN")), None);
        assert_eq!(parse_target(Some("inf")), None);
        assert_eq!(parse_target(Some("many")), None);
        assert_eq!(parse_target(None), None);
    }

    #[test]
    fn root_margin_four_values() {
        let insets = parse_root_margin("0px 0px -50px 0px");
        assert_eq!(insets, Ok(Insets::new(0.0, 0.0, -50.0, 0.0)));
    }

    #[test]
    fn root_margin_shorthand_expansion() {
        assert_eq!(parse_root_margin("10"), Ok(Insets::new(10.0, 10.0, 10.0, 10.0)));
        assert_eq!(
            parse_root_margin("5px 8px"),
            Ok(Insets::new(5.0, 8.0, 5.0, 8.0))
        );
        assert_eq!(
            parse_root_margin("1px 2px 3px"),
            Ok(Insets::new(1.0, 2.0, 3.0, 2.0))
        );
    }

    #[test]
    fn root_margin_rejects_garbage() {
        assert!(parse_root_margin("").is_err());
        assert!(parse_root_margin("1 2 3 4 5").is_err());
        assert!(parse_root_margin("50%").is_err());
        assert!(parse_root_margin("0px abc").is_err());
    }
}
