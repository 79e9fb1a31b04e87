use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;

use filter_editor::color;
use filter_editor::config::EditorConfig;
use filter_editor::data::loader::{load_records, load_template};
use filter_editor::data::series::time_points;
use filter_editor::preview::{BandpassFilter, FftBandpass};
use filter_editor::state::EditorState;
use filter_editor::FftTransform;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Inspect channel spectra and check band-pass corner choices",
    long_about = None,
    after_help = "Examples:\n  filter-editor --records napa.parquet\n  filter-editor --records napa.json --template ce24001.json --low 0.1 --high 25 --preview\n"
)]
struct Args {
    /// Channel records (.json, .csv or .parquet)
    #[arg(long, short)]
    records: PathBuf,

    /// Station template with channel order and colors (JSON)
    #[arg(long, short)]
    template: Option<PathBuf>,

    /// Editor preferences (JSON)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Low corner in Hz
    #[arg(long, allow_hyphen_values = true)]
    low: Option<String>,

    /// High corner in Hz
    #[arg(long, allow_hyphen_values = true)]
    high: Option<String>,

    /// Band-pass every record with the accepted corners and report peak acceleration
    #[arg(long)]
    preview: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    let records = load_records(&args.records)
        .with_context(|| format!("loading {}", args.records.display()))?;
    let template = args.template.as_deref().map(load_template).transpose()?;

    let mut state = EditorState::default();
    state.set_records(records, template, &FftTransform, config.default_color)?;
    let Some(derived) = &state.derived else {
        return Ok(());
    };

    let tb = &derived.time_base;
    println!(
        "time base: {} .. {} ({:.3} s), min dt {} s",
        tb.earliest_start.to_rfc3339(),
        tb.latest_stop.to_rfc3339(),
        tb.span_seconds(),
        tb.min_delta_t
    );
    for s in &derived.series {
        let peak = s
            .peak()
            .map(|p| format!("peak {:.4e} at {:.3} Hz", p.amplitude, p.frequency))
            .unwrap_or_default();
        println!("  {s}  {peak}");
    }
    if derived.series.len() < state.records.len() {
        warn!(
            "{} record(s) produced no spectrum",
            state.records.len() - derived.series.len()
        );
    }
    match derived.bounds {
        Some(b) => println!(
            "bounds: {:.4}..{:.4} Hz, amplitude {:.4e}..{:.4e}",
            b.x_min, b.x_max, b.y_min, b.y_max
        ),
        None => println!("bounds: no spectral data"),
    }

    let fmt_opt = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    state.selection.low_text = args.low.clone().unwrap_or_else(|| fmt_opt(config.initial_low_hz));
    state.selection.high_text = args.high.clone().unwrap_or_else(|| fmt_opt(config.initial_high_hz));
    if state.selection.low_text.is_empty() && state.selection.high_text.is_empty() {
        return Ok(());
    }

    let check = state.selection.check(state.x_max());
    if !check.is_valid() {
        println!("range rejected:");
        for msg in check.messages() {
            println!("  - {msg}");
        }
        return Ok(());
    }
    let range = state.commit_selection()?;
    println!("range accepted: {} .. {} Hz", range.low(), range.high());

    if args.preview {
        let filter = FftBandpass {
            taper_hz: config.taper_hz,
        };
        let Some(derived) = &state.derived else {
            return Ok(());
        };
        for s in &derived.series {
            let Some(rec) = state.record_for(s) else { continue };
            let filtered = filter.apply(&rec.samples, rec.delta_t, &range)?;
            let before = time_points(rec, &derived.time_base)
                .iter()
                .map(|p| p[1].abs())
                .fold(0.0, f64::max);
            let after = filtered.iter().map(|v| v.abs()).fold(0.0, f64::max);
            println!(
                "  {} [{}] peak |a| {:.4e} -> {:.4e}",
                s.title,
                color::to_hex(s.color),
                before,
                after
            );
        }
    }

    Ok(())
}
