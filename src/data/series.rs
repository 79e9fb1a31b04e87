use log::{debug, warn};

use super::model::{AlignedTimeBase, ChannelRecord, SpectralSeries};
use super::transform::SpectrumTransform;
use crate::color::DEFAULT_SERIES_COLOR;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Time domain
// ---------------------------------------------------------------------------

/// The record's own samples as `[t, a]` pairs, unpadded, with `t` measured
/// from the earliest start of the aligned time base so channels can be
/// compared on one axis.
pub fn time_points(record: &ChannelRecord, base: &AlignedTimeBase) -> Vec<[f64; 2]> {
    let t0 = base.offset_of(record.start_time);
    record
        .samples
        .iter()
        .enumerate()
        .map(|(i, &a)| [t0 + i as f64 * record.delta_t, a])
        .collect()
}

// ---------------------------------------------------------------------------
// Frequency domain
// ---------------------------------------------------------------------------

/// Build the one-sided amplitude spectrum of one record.
///
/// `index` is the record's position in the caller's record list and becomes
/// the series' `source`. Returns `Ok(None)` when the transform produces no
/// usable bins (e.g. the record has no samples).
pub fn build_spectral_series<T: SpectrumTransform + ?Sized>(
    record: &ChannelRecord,
    index: usize,
    base: &AlignedTimeBase,
    transform: &T,
) -> Result<Option<SpectralSeries>> {
    let full = transform.spectrum(&record.samples, base.min_delta_t)?;

    // bins 1 .. n/2: drop DC and the mirrored half
    let half = full.len() / 2;
    if half < 2 {
        return Ok(None);
    }
    let points = full[1..half].to_vec();

    let (seed, lcode) = record.seed_and_location();
    let description = format!(
        "{} {}.{}.{}.{}",
        record.event_name, record.network, record.station, seed, lcode
    )
    .trim()
    .to_string();

    Ok(Some(SpectralSeries {
        points,
        title: record.channel.clone(),
        description,
        color: DEFAULT_SERIES_COLOR,
        source: index,
        network: record.network.clone(),
        station: record.station.clone(),
    }))
}

/// Build one series per record against a single time base, dropping records
/// whose spectrum comes back empty.
pub fn build_all_series<T: SpectrumTransform + ?Sized>(
    records: &[ChannelRecord],
    base: &AlignedTimeBase,
    transform: &T,
) -> Result<Vec<SpectralSeries>> {
    let mut out = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        match build_spectral_series(rec, i, base, transform)? {
            Some(series) => out.push(series),
            None => warn!("dropping channel {} (record {i}): empty spectrum", rec.channel),
        }
    }
    debug!("built {} of {} spectral series", out.len(), records.len());
    Ok(out)
}

// ---------------------------------------------------------------------------
// Plot / selection bounds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Frequency and amplitude extents across all series; `None` when there are
/// no points at all.
pub fn series_bounds(series: &[SpectralSeries]) -> Option<SeriesBounds> {
    let mut points = series.iter().flat_map(|s| s.points.iter());
    let first = points.next()?;
    let init = SeriesBounds {
        x_min: first.frequency,
        x_max: first.frequency,
        y_min: first.amplitude,
        y_max: first.amplitude,
    };
    Some(points.fold(init, |b, p| SeriesBounds {
        x_min: b.x_min.min(p.frequency),
        x_max: b.x_max.max(p.frequency),
        y_min: b.y_min.min(p.amplitude),
        y_max: b.y_max.max(p.amplitude),
    }))
}
