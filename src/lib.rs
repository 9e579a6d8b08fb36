// Library surface for the binary and the integration tests.
pub mod app_dirs;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod error;
pub mod figure;
pub mod frequency;
pub mod summary;
pub mod util;

pub use error::{FigureError, Result};
pub use figure::{FigureGenerator, OutputFormat, Report};
pub use frequency::FrequencyTable;
