use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, LargeListArray, ListArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use log::info;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{ChannelRecord, StationTemplate};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load channel records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – one row per channel, `samples` as a list column
/// * `.json`    – `[{ "network": ..., "samples": [...], ... }, ...]`
/// * `.csv`     – one row per channel, `samples` semicolon-separated
pub fn load_records(path: &Path) -> Result<Vec<ChannelRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;
    info!("loaded {} channel records from {}", records.len(), path.display());
    Ok(records)
}

/// Load a station template (JSON).
pub fn load_template(path: &Path) -> Result<StationTemplate> {
    let text = std::fs::read_to_string(path).context("reading template file")?;
    serde_json::from_str(&text).context("parsing template JSON")
}

fn parse_time(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s.trim())
        .with_context(|| format!("'{s}' is not an RFC 3339 timestamp"))?
        .with_timezone(&Utc))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema:
///
/// ```json
/// [
///   {
///     "network": "CE", "station": "24001", "channel": "HNZ.00",
///     "delta_t": 0.01, "start_time": "2014-08-24T10:20:44Z",
///     "samples": [0.0, 0.12, ...],
///     "event_name": "South Napa"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<ChannelRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON channel records")
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with `network`, `station`, `channel`, `delta_t`,
/// `start_time`, `samples` and optionally `event_name`.
/// `samples` holds semicolon-separated floats: `"0.0;0.12;-0.3"`.
fn load_csv(path: &Path) -> Result<Vec<ChannelRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let network_idx = column("network")?;
    let station_idx = column("station")?;
    let channel_idx = column("channel")?;
    let dt_idx = column("delta_t")?;
    let start_idx = column("start_time")?;
    let samples_idx = column("samples")?;
    let event_idx = headers.iter().position(|h| h == "event_name");

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |idx: usize| row.get(idx).unwrap_or("").trim();

        let delta_t = field(dt_idx)
            .parse::<f64>()
            .with_context(|| format!("Row {row_no}: delta_t '{}' is not a number", field(dt_idx)))?;
        let start_time =
            parse_time(field(start_idx)).with_context(|| format!("Row {row_no}: start_time"))?;
        let samples = parse_semicolon_floats(field(samples_idx), row_no)?;

        records.push(ChannelRecord {
            network: field(network_idx).to_string(),
            station: field(station_idx).to_string(),
            channel: field(channel_idx).to_string(),
            delta_t,
            start_time,
            samples,
            event_name: event_idx.map(|i| field(i).to_string()).unwrap_or_default(),
            event_time: None,
        });
    }

    Ok(records)
}

fn parse_semicolon_floats(s: &str, row: usize) -> Result<Vec<f64>> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(';')
        .enumerate()
        .map(|(j, tok)| {
            tok.trim()
                .parse::<f64>()
                .with_context(|| format!("Row {row}, samples[{j}]: '{tok}' is not a number"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing channel records.
///
/// Expected schema:
/// - `network`, `station`, `channel`, `start_time` (RFC 3339): Utf8 / LargeUtf8
/// - `delta_t`: Float64 or Float32
/// - `samples`: List<Float64> or LargeList<Float64>
/// - `event_name`: optional Utf8
fn load_parquet(path: &Path) -> Result<Vec<ChannelRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let network = required_column(&batch, "network")?;
        let station = required_column(&batch, "station")?;
        let channel = required_column(&batch, "channel")?;
        let start = required_column(&batch, "start_time")?;
        let delta_t = required_column(&batch, "delta_t")?;
        let samples = required_column(&batch, "samples")?;
        let event = optional_column(&batch, "event_name");

        for row in 0..batch.num_rows() {
            let start_text = extract_string(start, row)
                .with_context(|| format!("Row {row}: failed to read 'start_time'"))?;
            records.push(ChannelRecord {
                network: extract_string(network, row)
                    .with_context(|| format!("Row {row}: failed to read 'network'"))?,
                station: extract_string(station, row)
                    .with_context(|| format!("Row {row}: failed to read 'station'"))?,
                channel: extract_string(channel, row)
                    .with_context(|| format!("Row {row}: failed to read 'channel'"))?,
                delta_t: extract_f64(delta_t, row)
                    .with_context(|| format!("Row {row}: failed to read 'delta_t'"))?,
                start_time: parse_time(&start_text).with_context(|| format!("Row {row}"))?,
                samples: extract_f64_list(samples, row)
                    .with_context(|| format!("Row {row}: failed to read 'samples'"))?,
                event_name: match event {
                    Some(c) if !c.is_null(row) => extract_string(c, row)?,
                    _ => String::new(),
                },
                event_time: None,
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn optional_column<'a>(batch: &'a RecordBatch, name: &str) -> Option<&'a Arc<dyn Array>> {
    let idx = batch.schema().index_of(name).ok()?;
    Some(batch.column(idx))
}

fn required_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    optional_column(batch, name).with_context(|| format!("Parquet file missing '{name}' column"))
}

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in string column");
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected Utf8 column, got {other:?}"),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in numeric column");
    }
    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        Ok(arr.value(row) as f64)
    } else {
        bail!("Expected Float64 or Float32 column, got {:?}", col.data_type())
    }
}

/// Extract a `Vec<f64>` from a List or LargeList column at the given row.
fn extract_f64_list(col: &Arc<dyn Array>, row: usize) -> Result<Vec<f64>> {
    if col.is_null(row) {
        bail!("null value in list column");
    }

    let values_array = match col.data_type() {
        DataType::List(_) => {
            let list_arr = col
                .as_any()
                .downcast_ref::<ListArray>()
                .context("expected ListArray")?;
            list_arr.value(row)
        }
        DataType::LargeList(_) => {
            let list_arr = col
                .as_any()
                .downcast_ref::<LargeListArray>()
                .context("expected LargeListArray")?;
            list_arr.value(row)
        }
        other => bail!("Expected List or LargeList column, got {other:?}"),
    };

    // The inner array can be Float64 or Float32
    if let Some(f64_arr) = values_array.as_any().downcast_ref::<Float64Array>() {
        Ok(f64_arr.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    } else if let Some(f32_arr) = values_array.as_any().downcast_ref::<Float32Array>() {
        Ok(f32_arr.iter().map(|v| v.unwrap_or(f32::NAN) as f64).collect())
    } else {
        bail!(
            "List inner type is {:?}, expected Float64 or Float32",
            values_array.data_type()
        )
    }
}
