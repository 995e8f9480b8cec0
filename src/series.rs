use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::payload::RawSeriesPayload;

/// Divisor for converting raw byte counts into megabytes for display.
pub const BYTES_PER_MEGABYTE: f64 = 1_048_576.0;

/// One chart-ready point derived from a time bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

/// One chart-ready point derived from a categorical analysis row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPoint {
    pub name: String,
    pub value: i64,
}

/// Unit types for widget metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Count,
    Percentage,
    Bytes,
    Megabytes,
}

impl Unit {
    /// Divisor applied when normalizing a raw series in this unit.
    pub fn divisor(&self) -> f64 {
        match self {
            Unit::Megabytes => BYTES_PER_MEGABYTE,
            _ => 1.0,
        }
    }
}

/// Extract the single latest value from a payload, for instantaneous gauges.
///
/// Three outcomes are distinguished and must stay distinct:
/// - `None`: no payload at all (fetch pending or returned nothing),
/// - `Some(0)`: payload arrived but the series or its first bucket is empty,
/// - `Some(n)`: floor of the first sample's value.
///
/// Renderers treat `None` as "no data" and `Some(0)` as "measured zero".
pub fn latest_value(payload: Option<&RawSeriesPayload>) -> Option<i64> {
    let payload = payload?;

    let Some(first) = payload.data.first() else {
        return Some(0);
    };

    match first.data.first() {
        Some(sample) => Some(sample.val.floor() as i64),
        None => Some(0),
    }
}

/// Extract a full trend series from a payload.
///
/// Every time bucket yields exactly one point, keeping payload order. Buckets
/// with no sample map to zero. An absent payload maps to an empty series, not
/// an error, so trend charts render "no data yet" as zero points.
pub fn full_series(payload: Option<&RawSeriesPayload>, divisor: f64) -> Vec<ChartPoint> {
    let Some(payload) = payload else {
        return Vec::new();
    };

    payload
        .data
        .iter()
        .map(|point| ChartPoint {
            name: point.valid_from.clone(),
            value: point.data.first().map_or(0.0, |sample| sample.val / divisor),
        })
        .collect()
}

/// Filter analysis rows down to a single coordinate of a two-dimensional
/// dataset.
///
/// `dim` selects which dimension supplies the point names; rows are kept when
/// their value in the other dimension equals `other_value`. The filter is
/// stable: result order is source row order.
pub fn filter_rows(
    rows: &[Vec<String>],
    dim: usize,
    other_value: &str,
) -> Result<Vec<CategoryPoint>, Error> {
    let name_idx = if dim == 0 { 1 } else { 0 };
    let mut points = Vec::new();

    for row in rows {
        if row.get(name_idx).map(String::as_str) != Some(other_value) {
            continue;
        }

        let name = row
            .get(dim)
            .cloned()
            .ok_or_else(|| Error::MalformedPayload(format!("row missing dimension {dim}")))?;

        let raw = row
            .last()
            .ok_or_else(|| Error::MalformedPayload("empty analysis row".to_string()))?;

        points.push(CategoryPoint {
            name,
            value: parse_measurement(raw)?,
        });
    }

    Ok(points)
}

/// Integer-parse a measurement: leading integer digits, fraction discarded.
fn parse_measurement(raw: &str) -> Result<i64, Error> {
    let trimmed = raw.trim();

    let end = trimmed
        .char_indices()
        .take_while(|&(i, c)| c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+')))
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);

    trimmed[..end]
        .parse::<i64>()
        .map_err(|_| Error::MalformedPayload(format!("unparseable measurement: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{Sample, SeriesPoint};

    fn payload(points: Vec<SeriesPoint>) -> RawSeriesPayload {
        RawSeriesPayload { data: points }
    }

    fn point(valid_from: &str, vals: &[f64]) -> SeriesPoint {
        SeriesPoint {
            valid_from: valid_from.to_string(),
            data: vals.iter().map(|v| Sample { val: *v }).collect(),
        }
    }

    #[test]
    fn test_latest_value_absent_vs_empty_vs_present() {
        assert_eq!(latest_value(None), None);
        assert_eq!(latest_value(Some(&payload(vec![]))), Some(0));
        assert_eq!(latest_value(Some(&payload(vec![point("t0", &[])]))), Some(0));
        assert_eq!(
            latest_value(Some(&payload(vec![point("t0", &[42.9])]))),
            Some(42)
        );
        assert_eq!(
            latest_value(Some(&payload(vec![point("t0", &[0.0])]))),
            Some(0)
        );
    }

    #[test]
    fn test_full_series_one_point_per_bucket() {
        let p = payload(vec![
            point("t0", &[5.0]),
            point("t1", &[]),
            point("t2", &[7.5, 9.0]),
        ]);

        let series = full_series(Some(&p), 1.0);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0], ChartPoint { name: "t0".to_string(), value: 5.0 });
        assert_eq!(series[1], ChartPoint { name: "t1".to_string(), value: 0.0 });
        // first sample wins when a bucket has several
        assert_eq!(series[2], ChartPoint { name: "t2".to_string(), value: 7.5 });
    }

    #[test]
    fn test_full_series_absent_payload_is_empty() {
        assert!(full_series(None, 1.0).is_empty());
    }

    #[test]
    fn test_full_series_unit_conversion() {
        let p = payload(vec![point("t0", &[1048576.0])]);
        let series = full_series(Some(&p), BYTES_PER_MEGABYTE);
        assert_eq!(series[0].value, 1.0);

        assert_eq!(Unit::Megabytes.divisor(), 1048576.0);
        assert_eq!(Unit::Percentage.divisor(), 1.0);
    }

    #[test]
    fn test_filter_rows_stable() {
        let rows = vec![
            vec!["A".to_string(), "1".to_string(), "10".to_string()],
            vec!["B".to_string(), "1".to_string(), "20".to_string()],
            vec!["A".to_string(), "2".to_string(), "30".to_string()],
        ];

        let points = filter_rows(&rows, 0, "1").unwrap();
        assert_eq!(
            points,
            vec![
                CategoryPoint { name: "A".to_string(), value: 10 },
                CategoryPoint { name: "B".to_string(), value: 20 },
            ]
        );

        // idempotent: same input, same output
        assert_eq!(filter_rows(&rows, 0, "1").unwrap(), points);
    }

    #[test]
    fn test_filter_rows_other_dimension() {
        let rows = vec![
            vec!["A".to_string(), "1".to_string(), "10".to_string()],
            vec!["A".to_string(), "2".to_string(), "30".to_string()],
        ];

        let points = filter_rows(&rows, 1, "A").unwrap();
        assert_eq!(
            points,
            vec![
                CategoryPoint { name: "1".to_string(), value: 10 },
                CategoryPoint { name: "2".to_string(), value: 30 },
            ]
        );
    }

    #[test]
    fn test_parse_measurement() {
        assert_eq!(parse_measurement("42").unwrap(), 42);
        assert_eq!(parse_measurement("30.7").unwrap(), 30);
        assert_eq!(parse_measurement("-5").unwrap(), -5);
        assert_eq!(parse_measurement(" 12 ").unwrap(), 12);
        assert!(parse_measurement("n/a").is_err());
        assert!(parse_measurement("").is_err());
    }
}
