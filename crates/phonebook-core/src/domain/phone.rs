use once_cell::sync::Lazy;
use regex::Regex;

pub const COUNTRY_PREFIX: &str = "+375";
pub const AREA_CODES: [&str; 5] = ["29", "25", "44", "33", "17"];

static PHONE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+375(29|25|44|33|17)[0-9]{7}$").expect("valid phone number regex")
});

/// Exact match against `+375XXNNNNNNN`; no trimming or reformatting.
pub fn is_valid_phone_number(value: &str) -> bool {
    PHONE_NUMBER_RE.is_match(value)
}
