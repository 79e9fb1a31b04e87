use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::color::{self, SeriesColor};

// ---------------------------------------------------------------------------
// ChannelRecord – one instrument channel's acceleration trace
// ---------------------------------------------------------------------------

/// A single channel's time-domain acceleration record, as loaded by the
/// caller. Read-only for everything in this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub network: String,
    pub station: String,
    /// Channel code, normally `SEED.LC` (e.g. `HNZ.00`).
    pub channel: String,
    /// Sample interval in seconds.
    pub delta_t: f64,
    pub start_time: DateTime<Utc>,
    pub samples: Vec<f64>,
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub event_time: Option<DateTime<Utc>>,
}

impl ChannelRecord {
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Timestamp of the last sample; equal to `start_time` when the record
    /// holds fewer than two samples.
    pub fn stop_time(&self) -> DateTime<Utc> {
        let span = self.samples.len().saturating_sub(1) as f64 * self.delta_t;
        self.start_time + seconds_to_duration(span)
    }

    /// Split the channel code into its 3-character seed and 2-character
    /// location code. Codes that don't look like `XXX.YY` give two empty
    /// strings.
    pub fn seed_and_location(&self) -> (String, String) {
        split_channel_code(&self.channel)
            .map(|(seed, lcode)| (seed.to_string(), lcode.to_string()))
            .unwrap_or_default()
    }
}

fn split_channel_code(code: &str) -> Option<(&str, &str)> {
    let (seed, lcode) = code.trim().split_once('.')?;
    let word = |s: &str, len: usize| {
        s.len() == len && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    };
    (word(seed, 3) && word(lcode, 2)).then_some((seed, lcode))
}

/// Convert fractional seconds to a `chrono::Duration` with nanosecond
/// resolution.
pub fn seconds_to_duration(seconds: f64) -> Duration {
    Duration::nanoseconds((seconds * 1e9).round() as i64)
}

// ---------------------------------------------------------------------------
// AlignedTimeBase – common time frame across a channel set
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedTimeBase {
    pub earliest_start: DateTime<Utc>,
    pub latest_stop: DateTime<Utc>,
    pub min_delta_t: f64,
}

impl AlignedTimeBase {
    /// Total covered span in seconds.
    pub fn span_seconds(&self) -> f64 {
        let span = self.latest_stop - self.earliest_start;
        span.num_nanoseconds()
            .map(|ns| ns as f64 * 1e-9)
            .unwrap_or_else(|| span.num_milliseconds() as f64 * 1e-3)
    }

    /// Offset of `t` from the earliest start, in seconds.
    pub fn offset_of(&self, t: DateTime<Utc>) -> f64 {
        let d = t - self.earliest_start;
        d.num_nanoseconds()
            .map(|ns| ns as f64 * 1e-9)
            .unwrap_or_else(|| d.num_milliseconds() as f64 * 1e-3)
    }
}

// ---------------------------------------------------------------------------
// SpectralSeries – one channel's amplitude spectrum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumPoint {
    /// Hz.
    pub frequency: f64,
    pub amplitude: f64,
}

/// One channel's one-sided amplitude spectrum, ready for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralSeries {
    /// Ascending in frequency, DC bin excluded.
    pub points: Vec<SpectrumPoint>,
    /// Channel code.
    pub title: String,
    pub description: String,
    pub color: SeriesColor,
    /// Index of the source record in the slice the series was built from.
    pub source: usize,
    pub network: String,
    pub station: String,
}

impl SpectralSeries {
    pub fn max_frequency(&self) -> Option<f64> {
        self.points.last().map(|p| p.frequency)
    }

    /// The point with the largest amplitude.
    pub fn peak(&self) -> Option<SpectrumPoint> {
        self.points
            .iter()
            .copied()
            .max_by(|a, b| a.amplitude.total_cmp(&b.amplitude))
    }
}

impl fmt::Display for SpectralSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} ({} points)",
            self.title,
            color::to_hex(self.color),
            self.description,
            self.points.len()
        )
    }
}

// ---------------------------------------------------------------------------
// FilterRange – accepted band-pass corners
// ---------------------------------------------------------------------------

/// Low/high corner frequencies in Hz. Only obtainable through
/// [`crate::data::range`], so `0 <= low <= high <= x_max` always holds for
/// the `x_max` it was checked against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterRange {
    pub(crate) low: f64,
    pub(crate) high: f64,
}

impl FilterRange {
    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }
}

// ---------------------------------------------------------------------------
// StationTemplate – saved channel ordering / coloring for one station
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateChannel {
    pub channel: String,
    #[serde(default, with = "color::hex_opt", skip_serializing_if = "Option::is_none")]
    pub color: Option<SeriesColor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationTemplate {
    pub network: String,
    pub station: String,
    #[serde(default)]
    pub channels: Vec<TemplateChannel>,
}

impl StationTemplate {
    /// Position of `channel` in the template, first occurrence wins.
    pub fn position_of(&self, channel: &str) -> Option<usize> {
        self.channels.iter().position(|c| c.channel == channel)
    }

    pub fn matches(&self, network: &str, station: &str) -> bool {
        self.network.trim() == network.trim() && self.station.trim() == station.trim()
    }
}
