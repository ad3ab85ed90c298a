/// One warning reported by the linter, attributed to the file header above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub file_path: String,
    pub line_number: String,
    pub error_token: String,
}
