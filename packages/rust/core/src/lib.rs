//! Content model for Topicshelf.
//!
//! Turns a directory tree of markdown documents into navigable topics:
//! child listings, topic details with breadcrumbs, and recursive search.
//! Everything here is synchronous and stateless; every call re-reads the
//! filesystem.

pub mod breadcrumbs;
pub mod listing;
pub mod paths;
pub mod search;
pub mod topic;

pub use breadcrumbs::build_breadcrumbs;
pub use listing::list_children;
pub use paths::clean_topic_path;
pub use search::{extract_snippet, search_files, split_query};
pub use topic::ContentRoot;
