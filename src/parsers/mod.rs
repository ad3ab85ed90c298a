pub mod build_log;

pub use build_log::{summarize_file, LogOptions, Markers};
