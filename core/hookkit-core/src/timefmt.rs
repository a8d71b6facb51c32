//! Local-time stamps used in session records and logs.

use chrono::{Local, NaiveDateTime};

/// `YYYY-MM-DD`
pub fn date_string(at: &NaiveDateTime) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// `HH:MM`
pub fn time_string(at: &NaiveDateTime) -> String {
    at.format("%H:%M").to_string()
}

/// `YYYY-MM-DD HH:MM:SS`
pub fn datetime_string(at: &NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Current wall-clock time in the local zone.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_formats_are_zero_padded() {
        let at = NaiveDate::from_ymd_opt(2026, 3, 7)
            .unwrap()
            .and_hms_opt(4, 5, 9)
            .unwrap();
        assert_eq!(date_string(&at), "2026-03-07");
        assert_eq!(time_string(&at), "04:05");
        assert_eq!(datetime_string(&at), "2026-03-07 04:05:09");
    }
}
