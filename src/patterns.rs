use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered filename patterns and their strptime templates. The first rule
/// that both matches and parses wins. Two-group rules concatenate their
/// captures with no separator before parsing.
static FILENAME_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (
            r"(\d{4}-\d{2}-\d{2} at \d{2}\.\d{2}\.\d{2})",
            "%Y-%m-%d at %H.%M.%S",
        ),
        (
            r"(\d{4}-\d{2}-\d{2} at \d{2}-\d{2}-\d{2})",
            "%Y-%m-%d at %H-%M-%S",
        ),
        (r"(\d{4}-\d{2}-\d{2}-\d{2}\d{2}\d{2})", "%Y-%m-%d-%H%M%S"),
        (r"(\d{8})_(\d{6})", "%Y%m%d%H%M%S"),
        // The template carries no separator between the date and time
        // halves even though the time half keeps its dashes. strptime
        // accepts the concatenated text anyway; pinned by a regression
        // test, do not "fix" without revisiting it.
        (r"(\d{4}-\d{2}-\d{2})_(\d{2}-\d{2}-\d{2})", "%Y-%m-%d%H-%M-%S"),
        (r"IMG_(\d{8})_(\d{6})", "%Y%m%d%H%M%S"),
    ]
    .into_iter()
    .map(|(pattern, format)| {
        (
            Regex::new(pattern).expect("failed to compile filename pattern"),
            format,
        )
    })
    .collect()
});

/// Extract the capture date-time embedded in a file name, if any rule
/// recognizes it. Malformed calendar values (e.g. month 13) skip the rule
/// rather than failing the whole lookup.
pub fn extract_datetime(file_name: &str) -> Option<NaiveDateTime> {
    for (pattern, format) in FILENAME_PATTERNS.iter() {
        let Some(captures) = pattern.captures(file_name) else {
            continue;
        };
        let text = match (captures.get(1), captures.get(2)) {
            (Some(first), Some(second)) => {
                format!("{}{}", first.as_str(), second.as_str())
            }
            (Some(first), None) => first.as_str().to_string(),
            _ => continue,
        };
        if let Ok(parsed) = NaiveDateTime::parse_from_str(&text, format) {
            return Some(parsed);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn screenshot_style_with_dots() {
        assert_eq!(
            extract_datetime("Screenshot 2023-06-15 at 14.30.00.png"),
            Some(dt(2023, 6, 15, 14, 30, 0))
        );
    }

    #[test]
    fn screenshot_style_with_dashes() {
        assert_eq!(
            extract_datetime("2021-01-02 at 03-04-05.jpg"),
            Some(dt(2021, 1, 2, 3, 4, 5))
        );
    }

    #[test]
    fn dashed_date_with_compact_time() {
        assert_eq!(
            extract_datetime("2020-12-31-235959.jpeg"),
            Some(dt(2020, 12, 31, 23, 59, 59))
        );
    }

    #[test]
    fn compact_date_and_time() {
        assert_eq!(
            extract_datetime("20230615_143000.jpg"),
            Some(dt(2023, 6, 15, 14, 30, 0))
        );
    }

    #[test]
    fn dashed_date_and_dashed_time_keeps_legacy_template() {
        // The template for this rule has no separator between the date and
        // time halves; the concatenated text still parses because %d and %H
        // each consume exactly two digits here. Pins the legacy behavior.
        assert_eq!(
            extract_datetime("2023-06-15_14-30-00.jpg"),
            Some(dt(2023, 6, 15, 14, 30, 0))
        );
    }

    #[test]
    fn img_prefixed_name() {
        assert_eq!(
            extract_datetime("IMG_20230615_143000.jpg"),
            Some(dt(2023, 6, 15, 14, 30, 0))
        );
    }

    #[test]
    fn pattern_found_anywhere_in_name() {
        assert_eq!(
            extract_datetime("vacation-IMG_20230615_143000-edited.cr2"),
            Some(dt(2023, 6, 15, 14, 30, 0))
        );
    }

    #[test]
    fn first_matching_rule_wins() {
        assert_eq!(
            extract_datetime("2023-06-15 at 14.30.00_20220101_000000.jpg"),
            Some(dt(2023, 6, 15, 14, 30, 0))
        );
    }

    #[test]
    fn invalid_calendar_values_skip_the_rule() {
        assert_eq!(extract_datetime("9999-13-40 at 25.61.61.jpg"), None);
    }

    #[test]
    fn invalid_compact_date_does_not_fall_back() {
        // Rule 4 matches but month 13 fails to parse; no later rule
        // matches this shape either.
        assert_eq!(extract_datetime("20231315_143000.jpg"), None);
    }

    #[test]
    fn unrecognized_name() {
        assert_eq!(extract_datetime("photo.jpg"), None);
    }
}
