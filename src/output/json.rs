use crate::models::Summary;
use serde_json::Result;

pub fn format_json_summary(summary: &Summary) -> Result<String> {
    serde_json::to_string_pretty(summary)
}
