use crate::config::{LATEST_DT, MAX_LIMIT, MIN_LIMIT};
use crate::store::SnapshotPatch;
use once_cell::sync::Lazy;
use regex::Regex;

// Compiled regexes for field checks
static KINGDOM_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{1,6}$").unwrap());
static DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static LEADING_INT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([+-]?)(\d+)").unwrap());

/// Kingdom text as it is stored while the user types.
pub fn normalize_kingdom(raw: &str) -> String {
    raw.trim().to_string()
}

/// True for 1-6 decimal digits.
pub fn is_valid_kingdom(kingdom: &str) -> bool {
    KINGDOM_REGEX.is_match(kingdom)
}

/// Field-level check used when the kingdom input loses focus. Empty input
/// is not flagged; the load action reports it instead.
pub fn kingdom_input_error(raw: &str) -> Option<String> {
    let value = normalize_kingdom(raw);
    if value.is_empty() || is_valid_kingdom(&value) {
        None
    } else {
        Some("Kingdom ID must be 1-6 digits".to_string())
    }
}

/// True for `YYYY-MM-DD` shaped dates.
pub fn is_valid_date(dt: &str) -> bool {
    DATE_REGEX.is_match(dt)
}

/// Field-level check for the date input. Empty input is left to the load
/// action.
pub fn date_input_error(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() || is_valid_date(value) {
        None
    } else {
        Some("Date must be YYYY-MM-DD".to_string())
    }
}

/// Parse the leading integer of `input` the way a browser number field
/// reports it, clamped to the allowed limit range. `None` when the text has
/// no leading integer at all.
pub fn parse_limit(input: &str) -> Option<u32> {
    let captures = LEADING_INT_REGEX.captures(input)?;
    let negative = &captures[1] == "-";
    let limit = match captures[2].parse::<u64>() {
        Ok(_) if negative => MIN_LIMIT,
        Ok(value) => value.clamp(MIN_LIMIT as u64, MAX_LIMIT as u64) as u32,
        // Too many digits for u64
        Err(_) if negative => MIN_LIMIT,
        Err(_) => MAX_LIMIT,
    };
    Some(limit)
}

/// Limit for arbitrary input text; non-numeric input becomes the minimum.
///
/// # Examples
/// ```
/// use rok_leaderboard::validation::clamp_limit;
/// assert_eq!(clamp_limit("50"), 50);
/// assert_eq!(clamp_limit("0"), 1);
/// assert_eq!(clamp_limit("9000"), 500);
/// assert_eq!(clamp_limit("abc"), 1);
/// ```
pub fn clamp_limit(input: &str) -> u32 {
    parse_limit(input).unwrap_or(MIN_LIMIT)
}

/// Patch for the date controls, keeping `dt == "latest"` exactly when
/// `use_latest` is set.
pub fn date_patch(use_latest: bool, date_input: &str) -> SnapshotPatch {
    let dt = if use_latest {
        LATEST_DT.to_string()
    } else {
        date_input.trim().to_string()
    };
    SnapshotPatch::new().use_latest(use_latest).dt(dt)
}
