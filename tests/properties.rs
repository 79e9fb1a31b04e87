use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use filter_editor::data::model::seconds_to_duration;
use filter_editor::{
    align_time_base, build_all_series, order_series, validate_range, ChannelRecord, FftTransform,
    SpectralSeries, SpectrumPoint, StationTemplate, TemplateChannel,
};

fn record(channel: String, dt: f64, offset_ms: i64, n: usize) -> ChannelRecord {
    let t0 = Utc.with_ymd_and_hms(2014, 8, 24, 10, 20, 44).unwrap();
    ChannelRecord {
        network: "CE".into(),
        station: "24001".into(),
        channel,
        delta_t: dt,
        start_time: t0 + seconds_to_duration(offset_ms as f64 / 1000.0),
        samples: (0..n).map(|i| (i as f64 * 0.37).cos()).collect(),
        event_name: String::new(),
        event_time: None,
    }
}

fn arb_record() -> impl Strategy<Value = ChannelRecord> {
    (
        prop::sample::select(vec!["HNZ.00", "HNN.00", "HNE.00", "HN1.10", "bad"]),
        prop::sample::select(vec![0.005, 0.01, 0.02, 0.025]),
        -5_000i64..5_000,
        0usize..300,
    )
        .prop_map(|(ch, dt, off, n)| record(ch.to_string(), dt, off, n))
}

fn arb_series() -> impl Strategy<Value = SpectralSeries> {
    (
        prop::sample::select(vec!["HNZ.00", "HNN.00", "HNE.00", "HN1.10", "HN2.10"]),
        0usize..20,
    )
        .prop_map(|(title, source)| SpectralSeries {
            points: vec![SpectrumPoint { frequency: 1.0, amplitude: source as f64 }],
            title: title.to_string(),
            description: format!("ev CE.24001.{title}"),
            color: palette::Srgb::new(0, 0, 0),
            source,
            network: "CE".into(),
            station: "24001".into(),
        })
}

fn template() -> StationTemplate {
    StationTemplate {
        network: "CE".into(),
        station: "24001".into(),
        channels: vec![
            TemplateChannel { channel: "HN2.10".into(), color: None },
            TemplateChannel { channel: "HNZ.00".into(), color: Some(palette::Srgb::new(255, 0, 0)) },
        ],
    }
}

#[test]
fn three_channel_alignment_example() {
    let records = [
        record("HNZ.00".into(), 0.01, 0, 100),
        record("HNN.00".into(), 0.02, 1000, 100),
        record("HNE.00".into(), 0.01, 500, 100),
    ];
    let base = align_time_base(&records).unwrap();
    assert_eq!(base.min_delta_t, 0.01);
    assert_eq!(base.earliest_start, records[0].start_time);
}

#[test]
fn range_examples() {
    assert!(validate_range(-1.0, 5.0, 10.0)
        .messages()
        .contains(&"low out of bounds".to_string()));
    assert!(validate_range(2.0, 1.0, 10.0)
        .messages()
        .contains(&"low greater than high".to_string()));
    assert!(validate_range(1.0, 5.0, 10.0).is_valid());
}

proptest! {
    #[test]
    fn alignment_bounds_hold(records in prop::collection::vec(arb_record(), 1..8)) {
        let base = align_time_base(&records).unwrap();
        prop_assert!(base.latest_stop >= base.earliest_start);
        for r in &records {
            prop_assert!(base.min_delta_t <= r.delta_t);
            prop_assert!(base.earliest_start <= r.start_time);
            prop_assert!(base.latest_stop >= r.stop_time());
        }
    }

    #[test]
    fn spectra_skip_dc_ascend_and_drop_empty(records in prop::collection::vec(arb_record(), 1..6)) {
        let base = align_time_base(&records).unwrap();
        let series = build_all_series(&records, &base, &FftTransform).unwrap();
        for s in &series {
            prop_assert!(!s.points.is_empty());
            prop_assert!(s.points[0].frequency > 0.0);
            prop_assert!(s.points.windows(2).all(|w| w[0].frequency < w[1].frequency));
            prop_assert!(records[s.source].sample_count() > 0);
        }
        // fewer than three samples leaves no bin between DC and Nyquist
        let kept = records.iter().filter(|r| r.sample_count() >= 3).count();
        prop_assert_eq!(series.len(), kept);
    }

    #[test]
    fn ordering_is_idempotent(list in prop::collection::vec(arb_series(), 0..10), use_template in any::<bool>()) {
        let t = template();
        let t = use_template.then_some(&t);
        let grey = palette::Srgb::new(128, 128, 128);
        let once = order_series(list.clone(), t, grey);
        prop_assert_eq!(once.len(), list.len());
        let twice = order_series(once.clone(), t, grey);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn valid_iff_ordered_and_inside(low in -5.0f64..15.0, high in -5.0f64..15.0) {
        let c = validate_range(low, high, 10.0);
        let expected = (0.0..=10.0).contains(&low) && (0.0..=10.0).contains(&high) && low <= high;
        prop_assert_eq!(c.is_valid(), expected);
    }
}
