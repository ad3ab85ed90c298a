pub mod json;
pub mod text;

pub use json::format_json_summary;
pub use text::format_text_summary;
