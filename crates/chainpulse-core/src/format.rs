//! Compact human-readable rendering of chain magnitudes.
//!
//! Pure, total functions: a magnitude either renders to a compact string
//! (`"686.0K"`, `"5.6M"`, `"999"`) or yields `None` ("no value"), letting the
//! caller decide on a placeholder. Zero, negative, and non-finite inputs all
//! yield `None`: a zero block count from an upstream is indistinguishable
//! from a missing field and must not be displayed as live data.

/// Renders a magnitude in compact form.
///
/// - `>= 1_000_000` → `"{value/1M:.1}M"`
/// - `1_000..=999_999` → `"{value/1K:.1}K"`
/// - `< 1_000` → decimal rendering with thousands grouping
///
/// Returns `None` for zero, negative, or non-finite input.
#[must_use]
pub fn format_compact(value: f64) -> Option<String> {
    if !value.is_finite() || value <= 0.0 {
        return None;
    }

    if value >= 1_000_000.0 {
        Some(format!("{:.1}M", value / 1_000_000.0))
    } else if value >= 1_000.0 {
        Some(format!("{:.1}K", value / 1_000.0))
    } else {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rounded = value.round() as u64;
        Some(group_thousands(rounded))
    }
}

/// Renders an integer with `,` separators every three digits.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_compact_below_one_thousand() {
        assert_eq!(format_compact(999.0), Some("999".to_string()));
        assert_eq!(format_compact(1.0), Some("1".to_string()));
    }

    #[test]
    fn test_format_compact_thousands() {
        assert_eq!(format_compact(1_500.0), Some("1.5K".to_string()));
        assert_eq!(format_compact(686_000.0), Some("686.0K".to_string()));
        assert_eq!(format_compact(999_999.0), Some("1000.0K".to_string()));
    }

    #[test]
    fn test_format_compact_millions() {
        assert_eq!(format_compact(2_500_000.0), Some("2.5M".to_string()));
        assert_eq!(format_compact(1_000_000.0), Some("1.0M".to_string()));
        assert_eq!(format_compact(5_600_000.0), Some("5.6M".to_string()));
    }

    #[test]
    fn test_format_compact_no_value() {
        assert_eq!(format_compact(0.0), None);
        assert_eq!(format_compact(-5.0), None);
        assert_eq!(format_compact(f64::NAN), None);
        assert_eq!(format_compact(f64::INFINITY), None);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(2_845_672), "2,845,672");
        assert_eq!(group_thousands(1_000_000_000), "1,000,000,000");
    }
}
