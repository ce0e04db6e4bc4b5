/// Temperature / dew-point pair from a report group such as `M05/M09`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureGroup {
    pub air_c: Option<i32>,
    pub dew_point_c: Option<i32>,
}

impl TemperatureGroup {
    pub fn from_tokens(air: &str, dew_point: &str) -> Self {
        Self {
            air_c: parse_temperature(air),
            dew_point_c: parse_temperature(dew_point),
        }
    }
}

/// Parse a single METAR temperature token ("15", "M05") into whole degrees Celsius.
///
/// A leading `M` marks a value below zero. Anything that is not a plain
/// number after the marker is unavailable (`None`), never zero.
pub fn parse_temperature(token: &str) -> Option<i32> {
    let (negative, digits) = match token.strip_prefix('M') {
        Some(rest) => (true, rest),
        None => (false, token),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let value: i32 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Whole-degree Fahrenheit, rounded half away from zero
pub fn celsius_to_fahrenheit(c: i32) -> i32 {
    (c as f64 * 9.0 / 5.0 + 32.0).round() as i32
}
