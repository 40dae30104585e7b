use chrono::{DateTime, Datelike, FixedOffset};

const MALAY_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mac", "Apr", "Mei", "Jun", "Jul", "Ogos", "Sep", "Okt", "Nov", "Dis",
];
const ENGLISH_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn months_for(language: &str) -> &'static [&'static str; 12] {
    let primary = language.split(['-', '_']).next().unwrap_or_default();
    if primary.eq_ignore_ascii_case("ms") {
        &MALAY_MONTHS
    } else {
        &ENGLISH_MONTHS
    }
}

/// `5 Ogos 2024` style date in the post's own offset.
pub fn format_date(date: &DateTime<FixedOffset>, language: &str) -> String {
    let month = months_for(language)[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

pub fn format_optional_date(date: Option<&DateTime<FixedOffset>>, language: &str) -> String {
    date.map(|d| format_date(d, language)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(raw).unwrap()
    }

    #[test]
    fn test_malay_months() {
        assert_eq!(format_date(&date("2024-08-05T07:30:00+08:00"), "ms-MY"), "5 Ogos 2024");
        assert_eq!(format_date(&date("2023-12-31T23:59:00+08:00"), "ms"), "31 Dis 2023");
    }

    #[test]
    fn test_english_is_default() {
        assert_eq!(format_date(&date("2024-08-05T07:30:00+08:00"), "en-US"), "5 Aug 2024");
        assert_eq!(format_date(&date("2024-03-01T00:00:00Z"), ""), "1 Mar 2024");
    }

    #[test]
    fn test_uses_post_offset_not_utc() {
        // 00:30 on the 1st in Kuala Lumpur is still the 31st in UTC
        assert_eq!(format_date(&date("2024-02-01T00:30:00+08:00"), "en"), "1 Feb 2024");
    }

    #[test]
    fn test_missing_date() {
        assert_eq!(format_optional_date(None, "ms"), "");
    }
}
