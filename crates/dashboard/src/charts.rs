use crate::panel::round_f64;
use chrono::NaiveDate;
use core_types::{AlignedPair, Series};
use serde::Serialize;

/// Whether a day closed above its open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn of(open: f64, close: f64) -> Self {
        if close - open > 0.0 { Self::Up } else { Self::Down }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Colours both the candle and its volume bar.
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlestickChart {
    pub ticker: String,
    pub candles: Vec<Candle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    /// Flat reference lines such as the ETL overlay.
    Dashed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: String,
    pub style: LineStyle,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub y_label: String,
    pub series: Vec<LineSeries>,
}

/// A half-open `[lower, upper)` bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSeries {
    pub name: String,
    pub bins: Vec<Bin>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramChart {
    pub series: Vec<HistogramSeries>,
}

/// Any chart the dashboard can draw, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Chart {
    Candlestick(CandlestickChart),
    Line(LineChart),
    Histogram(HistogramChart),
}

pub fn candlestick(series: &Series) -> CandlestickChart {
    let candles = series
        .iter()
        .map(|o| Candle {
            date: o.date,
            open: o.open,
            high: o.high,
            low: o.low,
            close: o.close,
            volume: o.volume,
            direction: Direction::of(o.open, o.close),
        })
        .collect();

    CandlestickChart {
        ticker: series.ticker.clone(),
        candles,
    }
}

/// Closing prices of a single ticker, unscaled.
pub fn price_line(series: &Series) -> LineChart {
    let points = series
        .iter()
        .map(|o| Point { date: o.date, value: o.close })
        .collect();

    LineChart {
        y_label: "Price".to_string(),
        series: vec![LineSeries {
            name: series.ticker.clone(),
            style: LineStyle::Solid,
            points,
        }],
    }
}

/// Both sides of a pair on a common scale: each starts at 100 on the first
/// shared date.
pub fn rebased_price_line(pair: &AlignedPair) -> LineChart {
    LineChart {
        y_label: "Price (rebased to 100)".to_string(),
        series: vec![rebase(&pair.primary), rebase(&pair.benchmark)],
    }
}

fn rebase(series: &Series) -> LineSeries {
    let factor = series
        .first()
        .and_then(|first| round_f64(100.0 / first.close, 10));

    // A zero or non-finite first close has no rebased form; draw nothing.
    let points = match factor {
        Some(f) => series
            .iter()
            .filter_map(|o| round_f64(o.close * f, 4).map(|value| Point { date: o.date, value }))
            .collect(),
        None => Vec::new(),
    };

    LineSeries {
        name: series.ticker.clone(),
        style: LineStyle::Solid,
        points,
    }
}

/// Daily returns of each series, each followed by its flat ETL overlay.
///
/// The overlay value is supplied by the caller so it can come from a different
/// slice than the one being drawn. A missing ETL draws no overlay.
pub fn returns_line(sides: &[(&Series, Option<f64>)]) -> LineChart {
    let mut lines = Vec::with_capacity(sides.len() * 2);

    for (series, etl) in sides {
        lines.push(LineSeries {
            name: series.ticker.clone(),
            style: LineStyle::Solid,
            points: series
                .iter()
                .map(|o| Point { date: o.date, value: o.daily_return_pct })
                .collect(),
        });

        if let Some(level) = etl.and_then(|v| round_f64(v, 2)) {
            lines.push(LineSeries {
                name: format!("{} ETL 5%", series.ticker),
                style: LineStyle::Dashed,
                points: series
                    .iter()
                    .map(|o| Point { date: o.date, value: level })
                    .collect(),
            });
        }
    }

    LineChart {
        y_label: "Daily Returns %".to_string(),
        series: lines,
    }
}

/// One ticker's returns split at the rounded ETL level into the loss tail
/// (`<=`) and the rest (`>`).
pub fn tail_histogram(series: &Series, etl: Option<f64>) -> HistogramChart {
    let threshold = etl
        .and_then(|v| round_f64(v, 2))
        .and_then(|v| round_f64(v, 0));

    let (tail, body): (Vec<f64>, Vec<f64>) = match threshold {
        Some(t) => series.returns().into_iter().partition(|r| *r <= t),
        None => (Vec::new(), series.returns()),
    };

    HistogramChart {
        series: vec![
            HistogramSeries {
                name: format!("{} lowest 5%", series.ticker),
                bins: unit_bins(&tail),
            },
            HistogramSeries {
                name: format!("{} highest 95%", series.ticker),
                bins: unit_bins(&body),
            },
        ],
    }
}

/// One return distribution per side of an aligned pair.
pub fn pair_histogram(pair: &AlignedPair) -> HistogramChart {
    let side = |series: &Series| HistogramSeries {
        name: format!("{} Daily Returns Frequency", series.ticker),
        bins: unit_bins(&series.returns()),
    };

    HistogramChart {
        series: vec![side(&pair.primary), side(&pair.benchmark)],
    }
}

/// Buckets values into unit-width bins on integer edges. Only occupied bins
/// are returned, in ascending order.
pub fn unit_bins(values: &[f64]) -> Vec<Bin> {
    let mut floors: Vec<f64> = values.iter().filter(|v| v.is_finite()).map(|v| v.floor() + 0.0).collect();
    floors.sort_by(f64::total_cmp);

    let mut bins: Vec<Bin> = Vec::new();
    for lower in floors {
        match bins.last_mut() {
            Some(bin) if bin.lower == lower => bin.count += 1,
            _ => bins.push(Bin {
                lower,
                upper: lower + 1.0,
                count: 1,
            }),
        }
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Observation;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn series(ticker: &str, rows: &[(u32, f64, f64)]) -> Series {
        let observations = rows
            .iter()
            .map(|&(d, open, close)| Observation::new(ticker, day(d), open, open.max(close), open.min(close), close, 1_000.0))
            .collect();
        Series::new(ticker, observations)
    }

    #[test]
    fn candle_direction_follows_close_minus_open() {
        let s = series("AAA", &[(2, 10.0, 11.0), (3, 11.0, 11.0), (4, 11.0, 10.5)]);
        let chart = candlestick(&s);
        let directions: Vec<Direction> = chart.candles.iter().map(|c| c.direction).collect();
        assert_eq!(directions, vec![Direction::Up, Direction::Down, Direction::Down]);
    }

    #[test]
    fn rebased_lines_start_at_one_hundred() {
        let primary = series("AAA", &[(2, 10.0, 40.0), (3, 40.0, 50.0)]);
        let benchmark = series("BBB", &[(2, 10.0, 3.0), (3, 3.0, 6.0)]);
        let chart = rebased_price_line(&AlignedPair::new(primary, benchmark).unwrap());

        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].points[0].value, 100.0);
        assert_eq!(chart.series[0].points[1].value, 125.0);
        assert_eq!(chart.series[1].points[0].value, 100.0);
        assert_eq!(chart.series[1].points[1].value, 200.0);
    }

    #[test]
    fn zero_first_close_is_not_rebased() {
        let primary = series("AAA", &[(2, 10.0, 0.0), (3, 1.0, 5.0)]);
        let benchmark = series("BBB", &[(2, 10.0, 4.0), (3, 4.0, 8.0)]);
        let chart = rebased_price_line(&AlignedPair::new(primary, benchmark).unwrap());

        assert!(chart.series[0].points.is_empty());
        let values: Vec<f64> = chart.series[1].points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![100.0, 200.0]);
    }

    #[test]
    fn returns_line_adds_flat_overlay_per_side() {
        let s = series("AAA", &[(2, 100.0, 101.0), (3, 100.0, 98.0)]);
        let chart = returns_line(&[(&s, Some(-2.004))]);

        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[1].name, "AAA ETL 5%");
        assert_eq!(chart.series[1].style, LineStyle::Dashed);
        assert!(chart.series[1].points.iter().all(|p| p.value == -2.0));

        let without = returns_line(&[(&s, None)]);
        assert_eq!(without.series.len(), 1);
    }

    #[test]
    fn unit_bins_count_occupied_buckets() {
        let bins = unit_bins(&[2.0, -1.5, 0.2, 0.9]);
        let edges: Vec<(f64, f64, usize)> = bins.iter().map(|b| (b.lower, b.upper, b.count)).collect();
        assert_eq!(edges, vec![(-2.0, -1.0, 1), (0.0, 1.0, 2), (2.0, 3.0, 1)]);
        assert!(unit_bins(&[]).is_empty());
        assert!(unit_bins(&[f64::NAN, f64::INFINITY]).is_empty());
    }

    #[test]
    fn unit_bins_handle_extreme_returns() {
        let bins = unit_bins(&[0.0, 1e20, -1e300]);
        assert_eq!(bins.len(), 3);
        assert_eq!(bins[0].lower, -1e300);
        assert_eq!(bins[1].lower, 0.0);
        assert_eq!(bins[2].lower, 1e20);
        assert!(bins.iter().all(|b| b.count == 1));
    }

    #[test]
    fn tail_histogram_splits_at_rounded_etl() {
        // Returns of -5, -1, 0, 1, 2 percent.
        let s = series(
            "AAA",
            &[(2, 100.0, 95.0), (3, 100.0, 99.0), (4, 100.0, 100.0), (5, 100.0, 101.0), (8, 100.0, 102.0)],
        );
        let chart = tail_histogram(&s, Some(-4.6));
        let total = |h: &HistogramSeries| h.bins.iter().map(|b| b.count).sum::<usize>();

        assert_eq!(chart.series[0].name, "AAA lowest 5%");
        assert_eq!(total(&chart.series[0]), 1);
        assert_eq!(chart.series[1].name, "AAA highest 95%");
        assert_eq!(total(&chart.series[1]), 4);
    }

    #[test]
    fn charts_serialize_with_a_type_tag() {
        let s = series("AAA", &[(2, 10.0, 11.0)]);
        let json = serde_json::to_value(Chart::Line(price_line(&s))).unwrap();
        assert_eq!(json["type"], "line");
        assert_eq!(json["series"][0]["points"][0]["date"], "2024-01-02");
    }
}
