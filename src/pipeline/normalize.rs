//! Raw candle normalization.

use crate::error::{PipelineError, Result};
use crate::types::{raw_field, Candle, RawCandle};
use chrono::TimeZone;
use chrono_tz::Tz;

/// Fixed display timezone for chart labeling. Presentation only; ordering
/// is always by the raw epoch timestamp.
pub const DISPLAY_TZ: Tz = chrono_tz::Asia::Jakarta;

/// Outcome of normalizing a raw candle batch.
#[derive(Debug)]
pub enum SeriesOutcome {
    /// Sorted, parsed series with at least the minimum candle count.
    Ready(Vec<Candle>),
    /// Too few candles for a meaningful chart. Not an error; the
    /// orchestrator short-circuits before rendering or analysis.
    Insufficient { count: usize, min: usize },
}

fn parse_f64(candle: &RawCandle, idx: usize, name: &str) -> Result<f64> {
    let raw = candle
        .field(idx)
        .ok_or_else(|| PipelineError::MalformedCandle(format!("missing {name} field")))?;
    raw.parse().map_err(|_| {
        PipelineError::MalformedCandle(format!("non-numeric {name} field: {raw:?}"))
    })
}

fn parse_timestamp(candle: &RawCandle) -> Result<i64> {
    let raw = candle
        .field(raw_field::TIME)
        .ok_or_else(|| PipelineError::MalformedCandle("missing time field".to_string()))?;
    raw.parse()
        .map_err(|_| PipelineError::MalformedCandle(format!("non-numeric time field: {raw:?}")))
}

/// Validate and reshape a raw exchange batch into a time-ordered OHLCV
/// series.
///
/// The whole batch fails on any unparseable field; silently dropping
/// candles would corrupt chart continuity. Input order is not trusted:
/// output is sorted ascending by the raw timestamp.
pub fn normalize_series(raw: &[RawCandle], min: usize) -> Result<SeriesOutcome> {
    let mut parsed: Vec<(i64, Candle)> = Vec::with_capacity(raw.len());

    for candle in raw {
        let ts = parse_timestamp(candle)?;
        let time = DISPLAY_TZ
            .timestamp_opt(ts, 0)
            .single()
            .ok_or_else(|| PipelineError::MalformedCandle(format!("invalid timestamp: {ts}")))?;

        parsed.push((
            ts,
            Candle {
                time,
                open: parse_f64(candle, raw_field::OPEN, "open")?,
                high: parse_f64(candle, raw_field::HIGH, "high")?,
                low: parse_f64(candle, raw_field::LOW, "low")?,
                close: parse_f64(candle, raw_field::CLOSE, "close")?,
                volume: parse_f64(candle, raw_field::VOLUME, "volume")?,
            },
        ));
    }

    if parsed.len() < min {
        return Ok(SeriesOutcome::Insufficient {
            count: parsed.len(),
            min,
        });
    }

    parsed.sort_by_key(|(ts, _)| *ts);

    Ok(SeriesOutcome::Ready(
        parsed.into_iter().map(|(_, c)| c).collect(),
    ))
}
