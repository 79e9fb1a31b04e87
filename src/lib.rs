//! Data preparation behind band-pass corner selection for seismic channel
//! records: a common time base, one-sided Fourier amplitude spectra per
//! channel, template-driven ordering, and corner range checks.

pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod preview;
pub mod state;

pub use data::model::{
    AlignedTimeBase, ChannelRecord, FilterRange, SpectralSeries, SpectrumPoint, StationTemplate,
    TemplateChannel,
};
pub use data::order::order_series;
pub use data::range::{validate_range, validate_range_text, RangeCheck, RangeViolation};
pub use data::series::{build_all_series, build_spectral_series, series_bounds, SeriesBounds};
pub use data::timebase::align_time_base;
pub use data::transform::{FftTransform, SpectrumTransform};
pub use error::EditorError;
