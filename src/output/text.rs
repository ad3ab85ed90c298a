use crate::models::{FileWarnings, Summary};

pub fn format_text_summary(summary: &Summary) -> String {
    let mut out = String::new();
    out.push_str("════════════════════════════════════════════════════════════════\n");
    out.push_str("                     Build Warning Summary                      \n");
    out.push_str("════════════════════════════════════════════════════════════════\n\n");

    out.push_str("## Summary\n\n");
    out.push_str(&format!("  Total warnings: {}\n", summary.total_warnings));
    out.push_str(&format!("  Files affected: {}\n\n", summary.file_count()));

    out.push_str("## Files\n\n");
    for (file, warnings) in &summary.result {
        out.push_str(&format_file(file, warnings));
    }

    out
}

fn format_file(file: &str, warnings: &FileWarnings) -> String {
    let count: usize = warnings.values().map(Vec::len).sum();
    let mut s = String::new();
    s.push_str(&format!("  {} ({})\n", file, count));
    for (token, lines) in warnings {
        s.push_str(&format!("    [{}] lines {}\n", token, lines.join(", ")));
    }
    s.push('\n');
    s
}
