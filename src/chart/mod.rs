//! Candlestick chart rendering.
//!
//! Produces a single in-memory PNG per request: price panel with
//! direction-colored candle bodies and neutral wicks, plus a synchronized
//! volume subplot. The analysis service reasons over these pixels, so the
//! visual contract (colors, title, axis labels) is fixed.

use crate::error::{PipelineError, Result};
use crate::types::{Candle, ChartArtifact, Timeframe};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use plotters::prelude::*;

/// Output raster size, 16:9.
pub const CHART_WIDTH: u32 = 1280;
pub const CHART_HEIGHT: u32 = 720;

const BULL_COLOR: RGBColor = RGBColor(22, 160, 22);
const BEAR_COLOR: RGBColor = RGBColor(204, 41, 41);
const WICK_COLOR: RGBColor = RGBColor(128, 128, 128);

/// Half-width of a candle body in data coordinates.
const BODY_HALF_WIDTH: f64 = 0.3;

fn render_err<E: std::fmt::Display>(e: E) -> PipelineError {
    PipelineError::Render(e.to_string())
}

/// Quote-currency axis label derived from an exchange pair like "BTC-USDT".
fn quote_label(symbol: &str) -> &str {
    symbol.rsplit('-').next().unwrap_or(symbol)
}

/// Render a normalized candle series as a candlestick-with-volume PNG.
pub fn render_chart(series: &[Candle], symbol: &str, timeframe: Timeframe) -> Result<ChartArtifact> {
    if series.is_empty() {
        return Err(PipelineError::Render("empty candle series".to_string()));
    }

    let mut price_lo = f64::INFINITY;
    let mut price_hi = f64::NEG_INFINITY;
    let mut max_volume = 0f64;
    for candle in series {
        price_lo = price_lo.min(candle.low);
        price_hi = price_hi.max(candle.high);
        max_volume = max_volume.max(candle.volume);
    }
    let pad = if price_hi > price_lo {
        (price_hi - price_lo) * 0.05
    } else {
        1.0
    };
    let volume_top = if max_volume > 0.0 { max_volume * 1.1 } else { 1.0 };

    let x_range = -0.5f64..series.len() as f64 - 0.5;
    let time_label = |x: &f64| -> String {
        let idx = x.round();
        if idx < 0.0 {
            return String::new();
        }
        series
            .get(idx as usize)
            .map(|c| c.time.format("%d %b %H:%M").to_string())
            .unwrap_or_default()
    };

    let mut frame = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root =
            BitMapBackend::with_buffer(&mut frame, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let (price_area, volume_area) = root.split_vertically(CHART_HEIGHT * 7 / 10);

        // Price panel
        let mut price_chart = ChartBuilder::on(&price_area)
            .caption(
                format!("{} ({} - KuCoin)", symbol, timeframe.token()),
                ("sans-serif", 28),
            )
            .margin(10)
            .x_label_area_size(0)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range.clone(), (price_lo - pad)..(price_hi + pad))
            .map_err(render_err)?;

        price_chart
            .configure_mesh()
            .light_line_style(WICK_COLOR.mix(0.15))
            .y_desc(quote_label(symbol))
            .draw()
            .map_err(render_err)?;

        price_chart
            .draw_series(series.iter().enumerate().map(|(i, c)| {
                let x = i as f64;
                PathElement::new(vec![(x, c.low), (x, c.high)], WICK_COLOR.stroke_width(1))
            }))
            .map_err(render_err)?;

        price_chart
            .draw_series(series.iter().enumerate().map(|(i, c)| {
                let x = i as f64;
                let color = if c.is_bullish() { BULL_COLOR } else { BEAR_COLOR };
                Rectangle::new(
                    [
                        (x - BODY_HALF_WIDTH, c.open),
                        (x + BODY_HALF_WIDTH, c.close),
                    ],
                    color.filled(),
                )
            }))
            .map_err(render_err)?;

        // Volume subplot, x-synchronized with the price panel
        let mut volume_chart = ChartBuilder::on(&volume_area)
            .margin(10)
            .x_label_area_size(28)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, 0f64..volume_top)
            .map_err(render_err)?;

        volume_chart
            .configure_mesh()
            .light_line_style(WICK_COLOR.mix(0.15))
            .x_labels(8)
            .x_label_formatter(&time_label)
            .y_desc("Volume")
            .draw()
            .map_err(render_err)?;

        volume_chart
            .draw_series(series.iter().enumerate().map(|(i, c)| {
                let x = i as f64;
                let color = if c.is_bullish() { BULL_COLOR } else { BEAR_COLOR };
                Rectangle::new(
                    [
                        (x - BODY_HALF_WIDTH, 0.0),
                        (x + BODY_HALF_WIDTH, c.volume),
                    ],
                    color.mix(0.45).filled(),
                )
            }))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }

    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(&frame, CHART_WIDTH, CHART_HEIGHT, ColorType::Rgb8)
        .map_err(render_err)?;

    Ok(ChartArtifact {
        bytes,
        content_type: "image/png",
    })
}
