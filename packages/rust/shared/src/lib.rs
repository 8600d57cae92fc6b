//! Shared types, error model, and configuration for Topicshelf.
//!
//! This crate is the foundation depended on by all other Topicshelf crates.
//! It provides:
//! - [`TopicshelfError`]: the unified error type
//! - Wire types ([`TopicSummary`], [`TopicDetail`], [`Breadcrumb`], [`SearchResult`])
//! - Configuration ([`AppConfig`], [`ServeConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ContentConfig, RenderConfig, SearchConfig, ServeConfig, ServeOverrides,
    ServerConfig, config_dir, config_file_path, init_config, init_config_at, load_config,
    load_config_from, resolve_content_dir,
};
pub use error::{Result, TopicshelfError};
pub use types::{
    Breadcrumb, INDEX_FILE_NAME, INDEX_STEM, MARKDOWN_EXTENSION, SearchResult, TopicDetail,
    TopicSummary,
};
