use log::debug;

use super::model::{AlignedTimeBase, ChannelRecord};
use crate::error::{EditorError, Result};

/// Compute the common time frame of a channel set: earliest start, latest
/// stop and the smallest sample interval.
pub fn align_time_base(records: &[ChannelRecord]) -> Result<AlignedTimeBase> {
    let first = records
        .first()
        .ok_or_else(|| EditorError::InvalidInput("no channel records to align".into()))?;

    let mut base = AlignedTimeBase {
        earliest_start: first.start_time,
        latest_stop: first.stop_time(),
        min_delta_t: f64::INFINITY,
    };

    for rec in records {
        if !(rec.delta_t.is_finite() && rec.delta_t > 0.0) {
            return Err(EditorError::InvalidInput(format!(
                "channel {} has unusable sample interval {}",
                rec.channel, rec.delta_t
            )));
        }
        base.earliest_start = base.earliest_start.min(rec.start_time);
        base.latest_stop = base.latest_stop.max(rec.stop_time());
        base.min_delta_t = base.min_delta_t.min(rec.delta_t);
    }

    debug!(
        "aligned {} records: span {:.3}s, min dt {}",
        records.len(),
        base.span_seconds(),
        base.min_delta_t
    );
    Ok(base)
}
