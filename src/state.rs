use log::{debug, info};

use crate::color::SeriesColor;
use crate::data::model::{AlignedTimeBase, ChannelRecord, FilterRange, SpectralSeries, StationTemplate};
use crate::data::order::order_series;
use crate::data::range::{validate_range_text, RangeCheck};
use crate::data::series::{build_all_series, series_bounds, SeriesBounds};
use crate::data::timebase::align_time_base;
use crate::data::transform::SpectrumTransform;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Corner selection
// ---------------------------------------------------------------------------

/// Which corner a pick on the spectrum plot edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    NoSelection,
    #[default]
    LowActive,
    HighActive,
}

/// Low/high corner text as the reviewer edits it. Both fields are only
/// ever accepted together, through [`Selection::commit`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub state: SelectionState,
    pub low_text: String,
    pub high_text: String,
}

impl Selection {
    pub fn activate(&mut self, state: SelectionState) {
        self.state = state;
    }

    /// Write a picked frequency into the active corner. The text parses back
    /// to exactly `frequency`. Returns `false` when nothing is active.
    pub fn pick(&mut self, frequency: f64) -> bool {
        let text = frequency.to_string();
        match self.state {
            SelectionState::LowActive => self.low_text = text,
            SelectionState::HighActive => self.high_text = text,
            SelectionState::NoSelection => return false,
        }
        true
    }

    /// Frequency at which the marker for the active corner is drawn, if its
    /// text currently parses.
    pub fn active_marker(&self) -> Option<f64> {
        let text = match self.state {
            SelectionState::LowActive => &self.low_text,
            SelectionState::HighActive => &self.high_text,
            SelectionState::NoSelection => return None,
        };
        text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Check both corners together.
    pub fn check(&self, x_max: f64) -> RangeCheck {
        validate_range_text(&self.low_text, &self.high_text, x_max)
    }

    pub fn commit(&self, x_max: f64) -> Result<FilterRange> {
        self.check(x_max).into_range()
    }
}

// ---------------------------------------------------------------------------
// Editor state
// ---------------------------------------------------------------------------

/// Everything derived from one loaded channel set. The time base, series and
/// bounds are rebuilt together and swapped in as a unit.
#[derive(Debug, Clone)]
pub struct Derived {
    pub time_base: AlignedTimeBase,
    pub series: Vec<SpectralSeries>,
    pub bounds: Option<SeriesBounds>,
}

/// The full editor state, independent of rendering.
#[derive(Debug, Default)]
pub struct EditorState {
    pub records: Vec<ChannelRecord>,
    pub template: Option<StationTemplate>,
    pub derived: Option<Derived>,
    pub selection: Selection,
    /// Last accepted range.
    pub range: Option<FilterRange>,
}

impl EditorState {
    /// Ingest a channel set and rebuild all derived data.
    pub fn set_records<T: SpectrumTransform + ?Sized>(
        &mut self,
        records: Vec<ChannelRecord>,
        template: Option<StationTemplate>,
        transform: &T,
        default_color: SeriesColor,
    ) -> Result<()> {
        let derived = derive(&records, template.as_ref(), transform, default_color)?;
        info!(
            "loaded {} records, {} spectral series",
            records.len(),
            derived.series.len()
        );
        self.records = records;
        self.template = template;
        self.derived = Some(derived);
        self.selection = Selection::default();
        self.range = None;
        Ok(())
    }

    /// Recompute time base and series from the current records.
    pub fn reset<T: SpectrumTransform + ?Sized>(
        &mut self,
        transform: &T,
        default_color: SeriesColor,
    ) -> Result<()> {
        let derived = derive(&self.records, self.template.as_ref(), transform, default_color)?;
        debug!("reset: rebuilt {} series", derived.series.len());
        self.derived = Some(derived);
        Ok(())
    }

    /// Highest frequency present in any series, or 0 with nothing loaded.
    pub fn x_max(&self) -> f64 {
        self.derived
            .as_ref()
            .and_then(|d| d.bounds)
            .map(|b| b.x_max)
            .unwrap_or(0.0)
    }

    /// Validate the current selection and remember it when accepted.
    pub fn commit_selection(&mut self) -> Result<FilterRange> {
        let range = self.selection.commit(self.x_max())?;
        self.range = Some(range);
        Ok(range)
    }

    /// The record behind a series.
    pub fn record_for(&self, series: &SpectralSeries) -> Option<&ChannelRecord> {
        self.records.get(series.source)
    }
}

fn derive<T: SpectrumTransform + ?Sized>(
    records: &[ChannelRecord],
    template: Option<&StationTemplate>,
    transform: &T,
    default_color: SeriesColor,
) -> Result<Derived> {
    let time_base = align_time_base(records)?;
    let built = build_all_series(records, &time_base, transform)?;
    let series = order_series(built, template, default_color);
    let bounds = series_bounds(&series);
    Ok(Derived {
        time_base,
        series,
        bounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_SERIES_COLOR;
    use crate::data::model::seconds_to_duration;
    use crate::data::range::RangeViolation;
    use crate::data::transform::FftTransform;
    use crate::error::EditorError;
    use chrono::{TimeZone, Utc};

    fn records() -> Vec<ChannelRecord> {
        let t0 = Utc.with_ymd_and_hms(2014, 8, 24, 10, 20, 44).unwrap();
        ["HNZ.00", "HNN.00", "HNE.00"]
            .iter()
            .enumerate()
            .map(|(i, ch)| ChannelRecord {
                network: "CE".into(),
                station: "24001".into(),
                channel: ch.to_string(),
                delta_t: 0.01,
                start_time: t0 + seconds_to_duration(i as f64 * 0.5),
                samples: (0..400).map(|k| ((k + i) as f64 * 0.2).sin()).collect(),
                event_name: "South Napa".into(),
                event_time: None,
            })
            .collect()
    }

    #[test]
    fn selection_starts_on_low_and_picks_into_active_corner() {
        let mut sel = Selection::default();
        assert_eq!(sel.state, SelectionState::LowActive);
        assert!(sel.pick(0.25));
        sel.activate(SelectionState::HighActive);
        assert!(sel.pick(20.0));
        assert_eq!(sel.low_text, "0.25");
        assert_eq!(sel.active_marker(), Some(20.0));
        sel.activate(SelectionState::NoSelection);
        assert!(!sel.pick(1.0));
        assert_eq!(sel.active_marker(), None);
    }

    #[test]
    fn loading_builds_series_and_bounds_together() {
        let mut state = EditorState::default();
        state
            .set_records(records(), None, &FftTransform, DEFAULT_SERIES_COLOR)
            .unwrap();
        let derived = state.derived.as_ref().unwrap();
        assert_eq!(derived.series.len(), 3);
        assert_eq!(derived.series[0].title, "HNE.00");
        assert!(state.x_max() > 49.0 && state.x_max() < 50.0);
        let first = &derived.series[0];
        assert_eq!(state.record_for(first).unwrap().channel, "HNE.00");
    }

    #[test]
    fn commit_checks_both_corners_against_x_max() {
        let mut state = EditorState::default();
        state
            .set_records(records(), None, &FftTransform, DEFAULT_SERIES_COLOR)
            .unwrap();
        state.selection.low_text = "0.1".into();
        state.selection.high_text = "80".into();
        match state.commit_selection() {
            Err(EditorError::Validation(v)) => assert_eq!(v, [RangeViolation::HighOutOfBounds]),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(state.range, None);

        state.selection.high_text = "25".into();
        let r = state.commit_selection().unwrap();
        assert_eq!((r.low(), r.high()), (0.1, 25.0));
        assert_eq!(state.range, Some(r));
    }

    #[test]
    fn top_plotted_frequency_can_be_picked_as_high_corner() {
        let mut state = EditorState::default();
        state
            .set_records(records(), None, &FftTransform, DEFAULT_SERIES_COLOR)
            .unwrap();
        // 400 samples at 0.01 s: the last bin sits near 49.8047 Hz, which
        // a four-decimal rendering would push above x_max
        let x_max = state.x_max();
        assert!((x_max - 49.8046875).abs() < 1e-9);
        state.selection.low_text = "0.1".into();
        state.selection.activate(SelectionState::HighActive);
        assert!(state.selection.pick(x_max));
        let r = state.commit_selection().unwrap();
        assert_eq!(r.high(), x_max);
    }

    #[test]
    fn reset_rebuilds_from_current_records() {
        let mut state = EditorState::default();
        state
            .set_records(records(), None, &FftTransform, DEFAULT_SERIES_COLOR)
            .unwrap();
        state.records.truncate(1);
        state.reset(&FftTransform, DEFAULT_SERIES_COLOR).unwrap();
        assert_eq!(state.derived.as_ref().unwrap().series.len(), 1);
    }

    #[test]
    fn empty_load_fails_without_touching_state() {
        let mut state = EditorState::default();
        let err = state.set_records(Vec::new(), None, &FftTransform, DEFAULT_SERIES_COLOR);
        assert!(matches!(err, Err(EditorError::InvalidInput(_))));
        assert!(state.derived.is_none());
    }
}
