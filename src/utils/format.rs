//! Display formatting helpers

use chrono::NaiveDateTime;

use crate::table::PLACEHOLDER;

pub fn format_datetime(dt: Option<&NaiveDateTime>) -> String {
    dt.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Cut `s` to at most `max` characters, marking the cut with `…`
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Foydalanuvchilar", 6), "Foyda…");
        assert_eq!(truncate("ёжик-ёжик", 5), "ёжик…");
    }

    #[test]
    fn datetime_or_placeholder() {
        let dt = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(format_datetime(Some(&dt)), "2024-05-01 09:30");
        assert_eq!(format_datetime(None), PLACEHOLDER);
    }
}
