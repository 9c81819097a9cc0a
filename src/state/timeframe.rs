//! Timeframe Filtering and Zoom
//!
//! Pure functions deriving the displayed subset of the raw dataset.
//! `now` is always passed in by the caller so a recomputation sees one
//! consistent reference instant.

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveDateTime, Utc};

use crate::state::global::DataPoint;

/// Selectable time window applied to the raw dataset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Timeframe {
    /// No time filter; every point passes
    #[default]
    Daily,
    /// Points strictly after `now - 7 days`
    Weekly,
    /// Points strictly after `now - 1 calendar month`
    Monthly,
}

impl Timeframe {
    /// Lower bound for this timeframe, or `None` when no filter applies.
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Timeframe::Daily => None,
            Timeframe::Weekly => Some(now - Duration::days(7)),
            Timeframe::Monthly => Some(
                now.checked_sub_months(Months::new(1))
                    .unwrap_or(now - Duration::days(30)),
            ),
        }
    }
}

/// Parse an ISO-ish timestamp string into a UTC instant.
///
/// Accepts RFC 3339 (`2024-01-05T10:30:00Z`), naive datetimes with `T` or
/// space separators (read as UTC), and bare dates (midnight UTC). Returns
/// `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}

/// Keep the points inside the timeframe window.
///
/// `Daily` passes every point through untouched. For the other timeframes a
/// point survives only if its timestamp parses and lies strictly after the
/// cutoff; unparseable timestamps never compare "after" anything.
pub fn filter_by_timeframe(
    points: &[DataPoint],
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> Vec<DataPoint> {
    match timeframe.cutoff(now) {
        None => points.to_vec(),
        Some(cutoff) => points
            .iter()
            .filter(|p| {
                parse_timestamp(&p.timestamp).map_or(false, |instant| instant > cutoff)
            })
            .cloned()
            .collect(),
    }
}

/// Truncate the filtered points to the first `len / zoom` entries.
///
/// Zoom 1 keeps everything; zoom 2 the first half, and so on. A zoom larger
/// than the point count leaves nothing to display.
pub fn apply_zoom(mut points: Vec<DataPoint>, zoom: u32) -> Vec<DataPoint> {
    let keep = points.len() / zoom.max(1) as usize;
    points.truncate(keep);
    points
}

/// Derive the displayed dataset from the raw dataset, a timeframe, a zoom
/// factor, and a reference instant. Pure: identical inputs yield identical
/// output.
pub fn visible_points(
    points: &[DataPoint],
    timeframe: Timeframe,
    zoom: u32,
    now: DateTime<Utc>,
) -> Vec<DataPoint> {
    apply_zoom(filter_by_timeframe(points, timeframe, now), zoom)
}

/// Decrement the zoom factor, clamped to a minimum of 1.
pub fn zoom_in(zoom: u32) -> u32 {
    zoom.saturating_sub(1).max(1)
}

/// Increment the zoom factor; there is no upper bound.
pub fn zoom_out(zoom: u32) -> u32 {
    zoom.saturating_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn point(timestamp: &str, value: f64) -> DataPoint {
        DataPoint {
            timestamp: timestamp.to_string(),
            value,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    /// Points at fixed offsets (in days) before `fixed_now`.
    fn days_ago_points(offsets: &[i64]) -> Vec<DataPoint> {
        offsets
            .iter()
            .map(|days| {
                let ts = fixed_now() - Duration::days(*days);
                point(&ts.to_rfc3339(), *days as f64)
            })
            .collect()
    }

    #[test]
    fn test_daily_passes_all_points() {
        let mut points = days_ago_points(&[60, 20, 8, 2]);
        points.push(point("not a date", 99.0));

        let visible = visible_points(&points, Timeframe::Daily, 1, fixed_now());
        assert_eq!(visible.len(), points.len());
        assert_eq!(visible, points);
    }

    #[test]
    fn test_weekly_boundary() {
        let points = days_ago_points(&[8, 6, 2]);

        let visible = visible_points(&points, Timeframe::Weekly, 1, fixed_now());
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].value, 6.0);
        assert_eq!(visible[1].value, 2.0);
    }

    #[test]
    fn test_weekly_cutoff_is_strict() {
        let exactly_cutoff = fixed_now() - Duration::days(7);
        let points = vec![point(&exactly_cutoff.to_rfc3339(), 1.0)];

        let visible = filter_by_timeframe(&points, Timeframe::Weekly, fixed_now());
        assert!(visible.is_empty(), "point at the cutoff is not after it");
    }

    #[test]
    fn test_monthly_uses_calendar_month() {
        // One month before Mar 31 clamps to Feb 29 (2024 is a leap year).
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        let points = vec![
            point("2024-02-27", 1.0),
            point("2024-02-29T13:00:00Z", 2.0),
            point("2024-03-15", 3.0),
        ];

        let visible = filter_by_timeframe(&points, Timeframe::Monthly, now);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].value, 2.0);
        assert_eq!(visible[1].value, 3.0);
    }

    #[test]
    fn test_unparseable_timestamps_dropped_by_time_filters() {
        let mut points = days_ago_points(&[2]);
        points.push(point("garbage", 5.0));

        let weekly = filter_by_timeframe(&points, Timeframe::Weekly, fixed_now());
        assert_eq!(weekly.len(), 1);

        let daily = filter_by_timeframe(&points, Timeframe::Daily, fixed_now());
        assert_eq!(daily.len(), 2);
    }

    #[test]
    fn test_zoom_takes_prefix() {
        let points = days_ago_points(&[10, 9, 8, 7, 6, 5, 4, 3, 2, 1]);

        let visible = apply_zoom(points.clone(), 3);
        assert_eq!(visible.len(), 3);
        assert_eq!(visible[..], points[..3]);
    }

    #[test]
    fn test_zoom_one_keeps_everything() {
        let points = days_ago_points(&[3, 2, 1]);
        assert_eq!(apply_zoom(points.clone(), 1), points);
    }

    #[test]
    fn test_zoom_beyond_count_leaves_nothing() {
        let points = days_ago_points(&[3, 2, 1]);
        assert!(apply_zoom(points, 4).is_empty());
    }

    #[test]
    fn test_zoom_length_non_increasing() {
        let points = days_ago_points(&[10, 9, 8, 7, 6, 5, 4, 3, 2, 1]);
        let mut previous = points.len();

        for zoom in 1..=12u32 {
            let count = apply_zoom(points.clone(), zoom).len();
            assert_eq!(count, points.len() / zoom as usize);
            assert!(count <= previous);
            previous = count;
        }
    }

    #[test]
    fn test_zoom_clamp_floor() {
        let mut zoom = 3u32;
        for _ in 0..6 {
            zoom = zoom_in(zoom);
        }
        assert_eq!(zoom, 1);
    }

    #[test]
    fn test_zoom_out_has_no_ceiling() {
        assert_eq!(zoom_out(1), 2);
        assert_eq!(zoom_out(41), 42);
    }

    #[test]
    fn test_empty_dataset_stays_empty() {
        let points: Vec<DataPoint> = Vec::new();
        for timeframe in [Timeframe::Daily, Timeframe::Weekly, Timeframe::Monthly] {
            for zoom in [1u32, 2, 5] {
                assert!(visible_points(&points, timeframe, zoom, fixed_now()).is_empty());
            }
        }
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let points = days_ago_points(&[40, 20, 6, 3, 1]);
        let now = fixed_now();

        let first = visible_points(&points, Timeframe::Weekly, 2, now);
        let second = visible_points(&points, Timeframe::Weekly, 2, now);
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-01-05T10:30:00Z").is_some());
        assert!(parse_timestamp("2024-01-05T10:30:00+02:00").is_some());
        assert!(parse_timestamp("2024-01-05T10:30:00").is_some());
        assert!(parse_timestamp("2024-01-05 10:30:00").is_some());
        assert!(parse_timestamp("2024-01-05").is_some());
        assert!(parse_timestamp("Jan 5, 2024").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_parse_timestamp_normalizes_offsets() {
        let offset = parse_timestamp("2024-01-05T12:00:00+02:00").unwrap();
        let utc = parse_timestamp("2024-01-05T10:00:00Z").unwrap();
        assert_eq!(offset, utc);
    }

    #[test]
    fn test_date_only_parses_to_midnight() {
        let parsed = parse_timestamp("2024-01-05").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());
    }
}
