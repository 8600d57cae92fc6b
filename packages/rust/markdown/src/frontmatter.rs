//! `---` delimited front matter.
//!
//! Documents may open with a small block of `key: value` lines:
//!
//! ```markdown
//! ---
//! title: Pomodoro
//! description: Short timeboxed work sessions
//! ---
//!
//! Body text starts here.
//! ```
//!
//! Parsing is lenient and never fails. Anything that does not look like a
//! complete block (no opening delimiter, or an opening delimiter that is
//! never closed) leaves the whole text as the body.

use std::path::Path;

use topicshelf_shared::{Result, TopicshelfError};

/// Line that opens and closes a front-matter block.
pub const DELIMITER: &str = "---";

/// Parsed front matter plus the remaining body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: String,
    pub description: String,
    pub body: String,
}

/// Split raw document text into front matter and body.
pub fn parse_front_matter(content: &str) -> FrontMatter {
    let lines: Vec<&str> = content.split('\n').collect();

    if lines[0].trim() != DELIMITER {
        return FrontMatter::body_only(content);
    }

    let Some(end) = lines
        .iter()
        .skip(1)
        .position(|line| line.trim() == DELIMITER)
        .map(|offset| offset + 1)
    else {
        return FrontMatter::body_only(content);
    };

    let mut fm = FrontMatter::default();
    for line in &lines[1..end] {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        match key.trim() {
            "title" => fm.title = value.trim().to_string(),
            "description" => fm.description = value.trim().to_string(),
            _ => {}
        }
    }

    fm.body = trim_blank_lines(&lines[end + 1..]);
    fm
}

/// Read a document from disk and parse it. Only the read can fail.
pub fn read_front_matter(path: &Path) -> Result<FrontMatter> {
    let content = std::fs::read_to_string(path).map_err(|e| TopicshelfError::io(path, e))?;
    Ok(parse_front_matter(&content))
}

impl FrontMatter {
    fn body_only(content: &str) -> Self {
        Self {
            body: content.to_string(),
            ..Self::default()
        }
    }
}

/// Join body lines, dropping blank lines at either end.
fn trim_blank_lines(lines: &[&str]) -> String {
    let is_blank = |line: &&str| line.trim().is_empty();

    let Some(first) = lines.iter().position(|l| !is_blank(l)) else {
        return String::new();
    };
    let last = lines.iter().rposition(|l| !is_blank(l)).unwrap_or(first);

    lines[first..=last].join("\n").trim_end().to_string()
}
