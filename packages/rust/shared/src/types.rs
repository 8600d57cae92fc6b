//! Wire types handed from the content model to the browsing UI.
//!
//! Field names serialize in camelCase to match the JSON contract the
//! frontend consumes.

use serde::{Deserialize, Serialize};

/// Reserved file holding a directory's own title, description and body.
pub const INDEX_FILE_NAME: &str = "_index.md";

/// [`INDEX_FILE_NAME`] without its extension.
pub const INDEX_STEM: &str = "_index";

/// Extension (with dot) of documents that are listed and searched.
pub const MARKDOWN_EXTENSION: &str = ".md";

// ---------------------------------------------------------------------------
// TopicSummary
// ---------------------------------------------------------------------------

/// One child entry in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    /// File name without extension, or the directory name.
    pub slug: String,
    /// Front-matter title, else the humanized slug.
    pub title: String,
    /// Front-matter description; empty when there is none.
    pub description: String,
    /// Whether the entry is a directory topic.
    pub is_dir: bool,
}

// ---------------------------------------------------------------------------
// TopicDetail
// ---------------------------------------------------------------------------

/// Everything the UI needs to render a single topic page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDetail {
    pub title: String,
    pub description: String,
    /// Rendered body; empty when the document has no body.
    pub content_html: String,
    /// Present only for directory topics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TopicSummary>>,
    pub breadcrumbs: Vec<Breadcrumb>,
}

// ---------------------------------------------------------------------------
// Breadcrumb
// ---------------------------------------------------------------------------

/// One navigable segment of a topic path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub slug: String,
    pub title: String,
    /// Cumulative path up to and including this segment, rooted at `/`.
    pub path: String,
}

// ---------------------------------------------------------------------------
// SearchResult
// ---------------------------------------------------------------------------

/// A matching document, addressed by its topic path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Topic path with a leading `/`; index documents collapse to their directory.
    pub path: String,
    pub title: String,
    pub snippet: String,
}
