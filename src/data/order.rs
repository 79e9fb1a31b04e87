use std::cmp::Ordering;

use log::{debug, warn};

use super::model::{SpectralSeries, StationTemplate};
use crate::color::{generate_palette, SeriesColor};

/// Default order: channel title, then description, then source index.
fn default_cmp(a: &SpectralSeries, b: &SpectralSeries) -> Ordering {
    a.title
        .cmp(&b.title)
        .then_with(|| a.description.cmp(&b.description))
        .then_with(|| a.source.cmp(&b.source))
}

/// Whether `template` describes the station every series came from.
pub fn template_applies(series: &[SpectralSeries], template: &StationTemplate) -> bool {
    series
        .iter()
        .all(|s| template.matches(&s.network, &s.station))
}

/// Order and color the series for display.
///
/// With a template for the same station: template channels first, in
/// template order and template colors; the rest follow in default order with
/// `default_color`. Without one (or with a template for another station)
/// everything is sorted by default order and painted `default_color`.
pub fn order_series(
    mut series: Vec<SpectralSeries>,
    template: Option<&StationTemplate>,
    default_color: SeriesColor,
) -> Vec<SpectralSeries> {
    let template = match template {
        Some(t) if template_applies(&series, t) => t,
        Some(t) => {
            warn!(
                "template for {}.{} does not match the loaded station, using default order",
                t.network, t.station
            );
            return default_order(series, default_color);
        }
        None => return default_order(series, default_color),
    };

    let palette = generate_palette(template.channels.len());
    series.sort_by(|a, b| {
        let pa = template.position_of(&a.title);
        let pb = template.position_of(&b.title);
        match (pa, pb) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| default_cmp(a, b)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => default_cmp(a, b),
        }
    });
    for s in &mut series {
        s.color = match template.position_of(&s.title) {
            Some(pos) => template.channels[pos].color.unwrap_or(palette[pos]),
            None => default_color,
        };
    }
    debug!(
        "ordered {} series with template {}.{}",
        series.len(),
        template.network,
        template.station
    );
    series
}

fn default_order(mut series: Vec<SpectralSeries>, default_color: SeriesColor) -> Vec<SpectralSeries> {
    series.sort_by(default_cmp);
    for s in &mut series {
        s.color = default_color;
    }
    series
}
