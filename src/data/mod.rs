/// Data layer: records, spectra, ordering and range checks.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<ChannelRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ timebase  │  earliest start, latest stop, min dt
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐      ┌───────────┐
///   │  series   │ ───▶ │ transform │  FFT → one-sided amplitude spectrum
///   └──────────┘      └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  order    │  template / default order and colors
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  range    │  check [low, high] against the frequency bounds
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod order;
pub mod range;
pub mod series;
pub mod timebase;
pub mod transform;
