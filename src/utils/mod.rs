use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub mod logging;

/// Format used by editable date-time form fields.
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

const DISPLAY_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";

/// Human-readable local time, or empty for `None`.
pub fn format_date_display(date: Option<&DateTime<Utc>>) -> String {
    format_date_display_in(date, &Local)
}

pub fn format_date_display_in<Tz: TimeZone>(date: Option<&DateTime<Utc>>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.map(|d| d.with_timezone(tz).format(DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}

/// `YYYY-MM-DDTHH:mm` in local time, or empty for `None`.
pub fn format_date_for_input(date: Option<&DateTime<Utc>>) -> String {
    format_date_for_input_in(date, &Local)
}

pub fn format_date_for_input_in<Tz: TimeZone>(date: Option<&DateTime<Utc>>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.map(|d| d.with_timezone(tz).format(INPUT_FORMAT).to_string())
        .unwrap_or_default()
}

/// Parse a form field value. Naive values are taken as local time.
pub fn parse_input_datetime(value: &str) -> Option<DateTime<Utc>> {
    parse_input_datetime_in(value, &Local)
}

pub fn parse_input_datetime_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    let naive = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    // `earliest` picks the first instant when a DST fold repeats the hour.
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

pub fn normalize_title(title: &str) -> String {
    title.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_none_formats_empty() {
        assert_eq!(format_date_display(None), "");
        assert_eq!(format_date_for_input(None), "");
    }

    #[test]
    fn test_format_for_input_in_utc() {
        assert_eq!(format_date_for_input_in(Some(&sample()), &Utc), "2024-01-01T10:00");
    }

    #[test]
    fn test_format_for_input_in_offset() {
        let mountain = FixedOffset::west_opt(7 * 3600).unwrap();
        assert_eq!(format_date_for_input_in(Some(&sample()), &mountain), "2024-01-01T03:00");
    }

    #[test]
    fn test_format_for_input_local_round_trip() {
        let local = Local.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let utc = local.with_timezone(&Utc);
        assert_eq!(format_date_for_input(Some(&utc)), "2024-01-01T10:00");
    }

    #[test]
    fn test_format_display() {
        let tz = FixedOffset::west_opt(4 * 3600).unwrap();
        let formatted = format_date_display_in(Some(&sample()), &tz);
        assert_eq!(formatted, "Jan 1, 2024, 6:00 AM");
        assert!(format_date_display(Some(&sample())).contains("2024"));
    }

    #[test]
    fn test_parse_input_formats() {
        let expected = sample();
        assert_eq!(parse_input_datetime_in("2024-01-01T10:00", &Utc), Some(expected));
        assert_eq!(parse_input_datetime_in("2024-01-01T10:00:00", &Utc), Some(expected));
        assert_eq!(parse_input_datetime_in("2024-01-01T10:00:00Z", &Utc), Some(expected));
        assert_eq!(
            parse_input_datetime_in("2024-01-01", &Utc),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_input_rejects_garbage() {
        assert!(parse_input_datetime("").is_none());
        assert!(parse_input_datetime("tomorrow").is_none());
        assert!(parse_input_datetime("2024-13-01T10:00").is_none());
    }

    #[test]
    fn test_parse_inverts_input_format() {
        let formatted = format_date_for_input(Some(&sample()));
        assert_eq!(parse_input_datetime(&formatted), Some(sample()));
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  Standup \n"), "Standup");
    }
}
