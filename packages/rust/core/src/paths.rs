//! Normalization of caller-supplied topic paths.
//!
//! Everything below this module assumes a clean relative path: no leading or
//! trailing slash, no empty or `.` segments, and never `..`.

use std::path::{Path, PathBuf};

use topicshelf_shared::{MARKDOWN_EXTENSION, Result, TopicshelfError};

/// Normalize a raw topic path such as `/focus//pomodoro/`.
///
/// Empty and `.` segments are dropped and backslashes are treated as
/// separators. Parent segments are rejected outright rather than resolved.
pub fn clean_topic_path(raw: &str) -> Result<String> {
    let mut segments = Vec::new();

    for segment in raw.split(['/', '\\']) {
        match segment {
            "" | "." => continue,
            ".." => {
                return Err(TopicshelfError::invalid_path(
                    raw,
                    "parent segments are not allowed",
                ));
            }
            s if s.contains('\0') => {
                return Err(TopicshelfError::invalid_path(raw, "NUL byte in path"));
            }
            s => segments.push(s),
        }
    }

    Ok(segments.join("/"))
}

/// Join a cleaned topic path onto the content root.
pub(crate) fn join_topic(root: &Path, clean: &str) -> PathBuf {
    clean
        .split('/')
        .filter(|s| !s.is_empty())
        .fold(root.to_path_buf(), |acc, segment| acc.join(segment))
}

/// `<root>/<clean>.md`, the document a non-directory topic lives in.
pub(crate) fn document_path(root: &Path, clean: &str) -> PathBuf {
    let mut path = join_topic(root, clean).into_os_string();
    path.push(MARKDOWN_EXTENSION);
    PathBuf::from(path)
}

/// Last segment of a cleaned path; the whole path when it has no slash.
pub(crate) fn last_segment(clean: &str) -> &str {
    clean.rsplit('/').next().unwrap_or(clean)
}
