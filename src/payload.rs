use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Raw metric payload as delivered by the monitoring API.
///
/// The outer sequence holds one entry per time bucket, ordered by `valid_from`
/// ascending. A bucket with no sample has an empty inner sequence; the
/// extraction rules in [`crate::series`] define what that maps to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSeriesPayload {
    pub data: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub valid_from: String,
    pub data: Vec<Sample>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub val: f64,
}

impl RawSeriesPayload {
    /// Single validation entry point for untrusted payload JSON.
    ///
    /// Shape is checked before any extraction rule runs, so downstream code
    /// never hits a missing-field fault on a payload that got this far.
    pub fn from_json(value: &Value) -> Result<Self, Error> {
        let data = value
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::MalformedPayload("missing `data` array".to_string()))?;

        let mut points = Vec::with_capacity(data.len());

        for (i, element) in data.iter().enumerate() {
            let valid_from = element
                .get("valid_from")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    Error::MalformedPayload(format!("element {i} missing `valid_from`"))
                })?
                .to_string();

            let samples = element.get("data").and_then(Value::as_array).ok_or_else(|| {
                Error::MalformedPayload(format!("element {i} missing inner `data` array"))
            })?;

            let mut inner = Vec::with_capacity(samples.len());

            for (j, sample) in samples.iter().enumerate() {
                let val = sample.get("val").and_then(Value::as_f64).ok_or_else(|| {
                    Error::MalformedPayload(format!(
                        "element {i} sample {j} missing numeric `val`"
                    ))
                })?;

                inner.push(Sample { val });
            }

            points.push(SeriesPoint {
                valid_from,
                data: inner,
            });
        }

        for pair in points.windows(2) {
            if pair[1].valid_from < pair[0].valid_from {
                return Err(Error::MalformedPayload(format!(
                    "series points out of order: {:?} after {:?}",
                    pair[1].valid_from, pair[0].valid_from
                )));
            }
        }

        Ok(Self { data: points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_payload() {
        let value = json!({
            "data": [
                { "valid_from": "2026-08-01T00:00:00", "data": [ { "val": 42.9 } ] },
                { "valid_from": "2026-08-01T00:10:00", "data": [] },
            ]
        });

        let payload = RawSeriesPayload::from_json(&value).unwrap();
        assert_eq!(payload.data.len(), 2);
        assert_eq!(payload.data[0].data[0].val, 42.9);
        assert!(payload.data[1].data.is_empty());
    }

    #[test]
    fn test_malformed_payloads() {
        let cases = vec![
            json!({}),
            json!({ "data": "nope" }),
            json!({ "data": [ { "data": [] } ] }),
            json!({ "data": [ { "valid_from": "t0" } ] }),
            json!({ "data": [ { "valid_from": "t0", "data": [ { "val": "high" } ] } ] }),
        ];

        for value in cases {
            let result = RawSeriesPayload::from_json(&value);
            assert!(
                matches!(result, Err(Error::MalformedPayload(_))),
                "expected malformed payload error for: {value}"
            );
        }
    }

    #[test]
    fn test_out_of_order_payload() {
        let value = json!({
            "data": [
                { "valid_from": "2026-08-01T00:10:00", "data": [] },
                { "valid_from": "2026-08-01T00:00:00", "data": [] },
            ]
        });

        assert!(RawSeriesPayload::from_json(&value).is_err());
    }
}
