//! Document-level markdown handling for Topicshelf.
//!
//! - [`parse_front_matter`] splits a document into title, description and body
//! - [`humanize`] derives display titles from slugs
//! - [`render_html`] turns a body into an HTML fragment for the UI

mod frontmatter;
mod humanize;
mod render;

pub use frontmatter::{DELIMITER, FrontMatter, parse_front_matter, read_front_matter};
pub use humanize::humanize;
pub use render::{RenderOptions, render_html};

/// Display title for a document: its front-matter title, else the humanized slug.
pub fn title_or_humanized(fm: &FrontMatter, slug: &str) -> String {
    if fm.title.is_empty() {
        humanize(slug)
    } else {
        fm.title.clone()
    }
}
