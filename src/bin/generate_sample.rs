use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Float64Builder, ListBuilder, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{TimeZone, Utc};
use log::info;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use filter_editor::data::model::{seconds_to_duration, ChannelRecord, StationTemplate, TemplateChannel};

/// Damped sine burst arriving at `onset` seconds.
fn burst(t: f64, onset: f64, freq: f64, decay: f64, amp: f64) -> f64 {
    if t < onset {
        return 0.0;
    }
    let tau = t - onset;
    amp * (-decay * tau).exp() * (2.0 * std::f64::consts::PI * freq * tau).sin()
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(42);
    let noise = Normal::new(0.0, 0.002).context("noise distribution")?;
    let t0 = Utc
        .with_ymd_and_hms(2014, 8, 24, 10, 20, 44)
        .single()
        .context("invalid start time")?;

    // (channel, dt, start offset s, bursts: (onset, freq, decay, amp))
    let channels: [(&str, f64, f64, &[(f64, f64, f64, f64)]); 4] = [
        ("HNZ.00", 0.01, 0.0, &[(2.0, 8.0, 1.5, 0.3), (5.0, 2.5, 0.6, 0.5)]),
        ("HNN.00", 0.01, 0.5, &[(2.0, 6.0, 1.2, 0.4), (5.0, 1.8, 0.5, 0.9)]),
        ("HNE.00", 0.01, 0.5, &[(2.0, 5.0, 1.0, 0.4), (5.0, 1.5, 0.5, 1.1)]),
        ("HN1.10", 0.02, 1.0, &[(5.0, 1.2, 0.4, 0.6)]),
    ];

    let records: Vec<ChannelRecord> = channels
        .iter()
        .map(|&(channel, dt, offset, bursts)| {
            let samples = (0..3000)
                .map(|i| {
                    let t = offset + i as f64 * dt;
                    let signal: f64 = bursts
                        .iter()
                        .map(|&(onset, f, d, a)| burst(t, onset, f, d, a))
                        .sum();
                    signal + noise.sample(&mut rng)
                })
                .collect();
            ChannelRecord {
                network: "CE".into(),
                station: "24001".into(),
                channel: channel.into(),
                delta_t: dt,
                start_time: t0 + seconds_to_duration(offset),
                samples,
                event_name: "Synthetic M6.0".into(),
                event_time: Some(t0),
            }
        })
        .collect();

    // Build Arrow arrays
    let mut samples_builder = ListBuilder::new(Float64Builder::new());
    for rec in &records {
        let values = samples_builder.values();
        for &v in &rec.samples {
            values.append_value(v);
        }
        samples_builder.append(true);
    }
    let samples_array = samples_builder.finish();

    let strings = |f: fn(&ChannelRecord) -> String| {
        StringArray::from(records.iter().map(f).collect::<Vec<_>>())
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("network", DataType::Utf8, false),
        Field::new("station", DataType::Utf8, false),
        Field::new("channel", DataType::Utf8, false),
        Field::new("delta_t", DataType::Float64, false),
        Field::new("start_time", DataType::Utf8, false),
        Field::new(
            "samples",
            DataType::List(Arc::new(Field::new("item", DataType::Float64, true))),
            false,
        ),
        Field::new("event_name", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(strings(|r| r.network.clone())),
            Arc::new(strings(|r| r.station.clone())),
            Arc::new(strings(|r| r.channel.clone())),
            Arc::new(Float64Array::from(
                records.iter().map(|r| r.delta_t).collect::<Vec<_>>(),
            )),
            Arc::new(strings(|r| r.start_time.to_rfc3339())),
            Arc::new(samples_array),
            Arc::new(strings(|r| r.event_name.clone())),
        ],
    )
    .context("creating record batch")?;

    // Write Parquet
    let output_path = "sample_records.parquet";
    let file = std::fs::File::create(output_path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;

    // Same records as JSON, plus a template for the station
    std::fs::write("sample_records.json", serde_json::to_string(&records)?)
        .context("writing sample_records.json")?;
    let template = StationTemplate {
        network: "CE".into(),
        station: "24001".into(),
        channels: vec![
            TemplateChannel { channel: "HNZ.00".into(), color: filter_editor::color::parse_hex("#d62728") },
            TemplateChannel { channel: "HNN.00".into(), color: filter_editor::color::parse_hex("#2ca02c") },
            TemplateChannel { channel: "HNE.00".into(), color: None },
        ],
    };
    std::fs::write("sample_template.json", serde_json::to_string_pretty(&template)?)
        .context("writing sample_template.json")?;

    info!("wrote sample_template.json");
    println!(
        "Wrote {} channel records ({} samples each) to {output_path} and sample_records.json",
        records.len(),
        records[0].samples.len()
    );
    Ok(())
}
