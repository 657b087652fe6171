use chrono::{DateTime, Datelike, Utc};

use crate::error::AppError;

/// Longest description accepted on create and edit, in characters.
pub const DESCRIPTION_MAX: usize = 500;

/// Renders the canonical SKU code:
/// `<COLUMN><ROW>-<SERIAL zero-padded to 4>-<MMYY>-<CATEGORY upper-cased>`.
///
/// The category is upper-cased in full, never truncated. Serials past 9999
/// widen to five or more digits instead of failing. An unlocated SKU
/// (empty column and row) produces a leading `-`.
pub fn format_sku(column: &str, row: &str, serial: i32, category: &str, month: u32, year: u32) -> String {
    format!(
        "{}{}-{:04}-{}-{}",
        column,
        row,
        serial,
        date_code(month, year),
        category.to_uppercase()
    )
}

/// MMYY stamp, e.g. `0325` for March 2025.
pub fn date_code(month: u32, year: u32) -> String {
    format!("{:02}{:02}", month, year % 100)
}

/// Month and two-digit year for a timestamp, so handlers take the clock
/// reading once and the formatter stays pure.
pub fn month_year(now: &DateTime<Utc>) -> (u32, u32) {
    (now.month(), (now.year() % 100) as u32)
}

/// Highest serial number across a set of records, 0 when empty.
///
/// The next serial is always derived from the maximum, never from whichever
/// record happens to come back last from the store.
pub fn highest_serial<I>(serials: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    serials.into_iter().max().unwrap_or(0)
}

/// Next serial to hand out given the persisted baseline. Purely arithmetic;
/// nothing is reserved until a record with this serial is saved.
pub fn next_serial(last_serial: i32) -> i32 {
    last_serial + 1
}

/// Recovers the serial number from a formatted code (second `-` segment).
pub fn parse_serial(code: &str) -> Option<i32> {
    code.split('-').nth(1)?.parse().ok()
}

/// Field validation shared by generate and save: a category is required,
/// and a SKU is either fully located or fully unlocated.
pub fn validate_fields(
    category: &str,
    column: &str,
    row: &str,
    description: Option<&str>,
) -> Result<(), AppError> {
    if category.trim().is_empty() {
        return Err(AppError::Validation("category is required".to_string()));
    }
    if column.trim().is_empty() != row.trim().is_empty() {
        return Err(AppError::Validation(
            "column and row must both be set, or both left empty".to_string(),
        ));
    }
    validate_description(description)
}

pub fn validate_description(description: Option<&str>) -> Result<(), AppError> {
    if let Some(text) = description {
        if text.chars().count() > DESCRIPTION_MAX {
            return Err(AppError::Validation(format!(
                "description is longer than {} characters",
                DESCRIPTION_MAX
            )));
        }
    }
    Ok(())
}

/// Matches a column/row pair against the registry sets, case-insensitively,
/// and returns the canonical stored values. Used when an edit assigns a
/// location to a SKU.
pub fn resolve_location(
    column: &str,
    row: &str,
    horizontal: &[String],
    vertical: &[String],
) -> Result<(String, String), AppError> {
    let canonical_column = horizontal
        .iter()
        .find(|loc| loc.eq_ignore_ascii_case(column))
        .ok_or_else(|| {
            AppError::InvalidLocation(format!("'{}' is not a registered column", column))
        })?;
    let canonical_row = vertical
        .iter()
        .find(|loc| loc.eq_ignore_ascii_case(row))
        .ok_or_else(|| AppError::InvalidLocation(format!("'{}' is not a registered row", row)))?;
    Ok((canonical_column.clone(), canonical_row.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_located_sku() {
        assert_eq!(format_sku("A", "1", 1, "cat1", 3, 25), "A1-0001-0325-CAT1");
    }

    #[test]
    fn category_is_never_truncated() {
        assert_eq!(
            format_sku("B", "2", 11, "category2", 12, 26),
            "B2-0011-1226-CATEGORY2"
        );
    }

    #[test]
    fn unlocated_sku_has_empty_prefix() {
        assert_eq!(format_sku("", "", 7, "tools", 1, 30), "-0007-0130-TOOLS");
    }

    #[test]
    fn serial_widens_past_four_digits() {
        assert_eq!(
            format_sku("A", "1", 10000, "cat1", 6, 25),
            "A1-10000-0625-CAT1"
        );
    }

    #[test]
    fn formatted_code_has_expected_segments() {
        let code = format_sku("C", "3", 42, "gadgets", 8, 26);
        let parts: Vec<&str> = code.split('-').collect();
        assert_eq!(parts.len(), 4);
        assert!(parts[0].chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(parts[1].len(), 4);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[3], "GADGETS");
    }

    #[test]
    fn formatter_is_deterministic() {
        let a = format_sku("D", "4", 251, "categoryX", 2, 25);
        let b = format_sku("D", "4", 251, "categoryX", 2, 25);
        assert_eq!(a, b);
    }

    #[test]
    fn next_serial_comes_from_the_maximum() {
        let last = highest_serial(vec![1, 5, 3]);
        assert_eq!(last, 5);
        assert_eq!(next_serial(last), 6);
    }

    #[test]
    fn empty_store_starts_at_one() {
        assert_eq!(next_serial(highest_serial(vec![])), 1);
    }

    #[test]
    fn parses_serial_from_code() {
        assert_eq!(parse_serial("A1-0011-0325-CAT1"), Some(11));
        assert_eq!(parse_serial("-0007-0130-TOOLS"), Some(7));
        assert_eq!(parse_serial("A1-10000-0625-CAT1"), Some(10000));
        assert_eq!(parse_serial("garbage"), None);
    }

    #[test]
    fn date_code_is_month_then_two_digit_year() {
        assert_eq!(date_code(3, 25), "0325");
        assert_eq!(date_code(11, 2026), "1126");
    }

    #[test]
    fn month_year_reads_the_clock_once() {
        let now = Utc.with_ymd_and_hms(2025, 8, 29, 12, 0, 0).unwrap();
        assert_eq!(month_year(&now), (8, 25));
    }

    #[test]
    fn category_is_required() {
        let err = validate_fields("  ", "A", "1", None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn half_filled_location_pair_is_rejected() {
        assert!(validate_fields("cat1", "A", "", None).is_err());
        assert!(validate_fields("cat1", "", "1", None).is_err());
        assert!(validate_fields("cat1", "A", "1", None).is_ok());
        assert!(validate_fields("cat1", "", "", None).is_ok());
    }

    #[test]
    fn overlong_description_is_rejected() {
        let long = "x".repeat(DESCRIPTION_MAX + 1);
        let err = validate_description(Some(&long)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let max = "x".repeat(DESCRIPTION_MAX);
        assert!(validate_description(Some(&max)).is_ok());
    }

    #[test]
    fn location_match_is_case_insensitive_and_canonical() {
        let horizontal = vec!["A".to_string(), "B".to_string()];
        let vertical = vec!["1".to_string(), "2".to_string()];
        let (column, row) = resolve_location("a", "1", &horizontal, &vertical).unwrap();
        assert_eq!(column, "A");
        assert_eq!(row, "1");
    }

    #[test]
    fn unknown_location_is_rejected() {
        let horizontal = vec!["A".to_string()];
        let vertical = vec!["1".to_string()];
        let err = resolve_location("Z", "1", &horizontal, &vertical).unwrap_err();
        assert!(matches!(err, AppError::InvalidLocation(_)));
        let err = resolve_location("A", "9", &horizontal, &vertical).unwrap_err();
        assert!(matches!(err, AppError::InvalidLocation(_)));
    }

    #[test]
    fn location_resolution_is_idempotent() {
        let horizontal = vec!["A".to_string()];
        let vertical = vec!["1".to_string()];
        let first = resolve_location("a", "1", &horizontal, &vertical).unwrap();
        let second = resolve_location("a", "1", &horizontal, &vertical).unwrap();
        assert_eq!(first, second);
    }
}
