//! Flight log sources.
//!
//! - [`CsvLog`]: decoded frames read from a CSV export
//! - [`SyntheticLog`]: waveforms generated on demand

mod csv;
mod error;
mod synthetic;

pub use csv::CsvLog;
pub use error::LogLoadError;
pub use synthetic::SyntheticLog;
