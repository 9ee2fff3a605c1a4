//! Named regions inside linked source files.
//!
//! A region starts at a `#region <name>` line and ends at the matching
//! `#endregion`. Markers may be preceded by whitespace and an optional `//`
//! comment prefix. Regions nest; the extracted lines include nested regions
//! verbatim but never the outer region's own marker lines.

use regex::Regex;
use std::sync::OnceLock;

fn region_start() -> &'static Regex {
    static START: OnceLock<Regex> = OnceLock::new();
    START.get_or_init(|| {
        Regex::new(r"^\s*(?://\s*)?#region\s+(\S+)").expect("Invalid region start regex")
    })
}

fn region_end() -> &'static Regex {
    static END: OnceLock<Regex> = OnceLock::new();
    END.get_or_init(|| Regex::new(r"^\s*(?://\s*)?#endregion\b").expect("Invalid region end regex"))
}

/// Extracts the lines of region `name`, or `None` if it isn't opened and
/// closed within `lines`.
pub fn extract(lines: &[String], name: &str) -> Option<Vec<String>> {
    let start = lines.iter().position(|line| {
        region_start()
            .captures(line)
            .is_some_and(|caps| &caps[1] == name)
    })?;

    let mut depth = 0usize;
    for (offset, line) in lines[start + 1..].iter().enumerate() {
        if region_start().is_match(line) {
            depth += 1;
        } else if region_end().is_match(line) {
            if depth == 0 {
                let end = start + 1 + offset;
                return Some(lines[start + 1..end].to_vec());
            }
            depth -= 1;
        }
    }

    None
}
