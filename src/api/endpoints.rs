/// aviationweather.gov data API
pub const AVIATION_WEATHER_API: &str = "https://aviationweather.gov";

pub const METAR: &str = "/api/data/metar";

/// Raw text output, one report per line
pub const FORMAT_RAW: &str = "raw";
