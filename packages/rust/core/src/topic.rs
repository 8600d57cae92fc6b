//! Topic resolution against a content root.
//!
//! [`ContentRoot`] is the entry point the HTTP layer and CLI hold on to. It
//! owns nothing but the root path and rendering switches, so it is cheap to
//! share across concurrent requests.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use topicshelf_markdown::{
    FrontMatter, RenderOptions, read_front_matter, render_html, title_or_humanized,
};
use topicshelf_shared::{
    INDEX_FILE_NAME, Result, SearchResult, TopicDetail, TopicSummary, TopicshelfError,
};

use crate::breadcrumbs::build_breadcrumbs;
use crate::listing::list_children;
use crate::paths::{clean_topic_path, document_path, join_topic, last_segment};
use crate::search::{search_files, split_query};

/// A directory tree of markdown topics.
#[derive(Debug, Clone)]
pub struct ContentRoot {
    root: PathBuf,
    render: RenderOptions,
}

impl ContentRoot {
    /// Serve topics from `root` with default rendering.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            render: RenderOptions::default(),
        }
    }

    /// Override markdown rendering options.
    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    /// The content root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Top-level topics.
    pub fn list_root(&self) -> Result<Vec<TopicSummary>> {
        list_children(&self.root)
    }

    /// Children of the directory topic at `raw_path`.
    pub fn list(&self, raw_path: &str) -> Result<Vec<TopicSummary>> {
        let clean = clean_topic_path(raw_path)?;
        let dir = join_topic(&self.root, &clean);
        if !clean.is_empty() && !dir.is_dir() {
            return Err(TopicshelfError::not_found(clean));
        }
        list_children(&dir)
    }

    /// Resolve `raw_path` to a directory or document topic.
    ///
    /// A directory wins over a same-named `.md` file. The empty path is not a
    /// topic; callers list the root instead.
    #[instrument(skip(self))]
    pub fn topic(&self, raw_path: &str) -> Result<TopicDetail> {
        let clean = clean_topic_path(raw_path)?;
        if clean.is_empty() {
            return Err(TopicshelfError::not_found(raw_path));
        }

        let dir = join_topic(&self.root, &clean);
        if dir.is_dir() {
            return Ok(self.directory_topic(&dir, &clean));
        }

        let doc = document_path(&self.root, &clean);
        if doc.is_file() {
            return self.document_topic(&doc, &clean);
        }

        debug!(path = %clean, "no directory or document for topic");
        Err(TopicshelfError::not_found(clean))
    }

    /// Search under the whole tree, or under `scope` when given.
    ///
    /// Fails only when `scope` is not a valid relative path. A blank query
    /// returns nothing without touching the filesystem.
    #[instrument(skip(self))]
    pub fn search(
        &self,
        scope: Option<&str>,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>> {
        let terms = split_query(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let search_dir = match scope {
            Some(scope) => join_topic(&self.root, &clean_topic_path(scope)?),
            None => self.root.clone(),
        };

        Ok(search_files(&search_dir, &terms, &self.root, max_results))
    }

    fn directory_topic(&self, dir: &Path, clean: &str) -> TopicDetail {
        let fm = read_front_matter(&dir.join(INDEX_FILE_NAME)).unwrap_or_else(|e| {
            debug!(error = %e, "directory has no readable index document");
            FrontMatter::default()
        });

        let children = list_children(dir).unwrap_or_else(|e| {
            warn!(error = %e, "failed to list directory children");
            Vec::new()
        });

        TopicDetail {
            title: title_or_humanized(&fm, last_segment(clean)),
            description: fm.description,
            content_html: render_html(&fm.body, &self.render),
            children: Some(children),
            breadcrumbs: build_breadcrumbs(clean),
        }
    }

    fn document_topic(&self, doc: &Path, clean: &str) -> Result<TopicDetail> {
        let fm = read_front_matter(doc)?;

        Ok(TopicDetail {
            title: title_or_humanized(&fm, last_segment(clean)),
            description: fm.description,
            content_html: render_html(&fm.body, &self.render),
            children: None,
            breadcrumbs: build_breadcrumbs(clean),
        })
    }
}
