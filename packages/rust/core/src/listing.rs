//! Direct-children listing of a directory topic.
//!
//! Each child is either a subdirectory (described by its `_index.md`, if any)
//! or a markdown document. Hidden (`.`) and reserved (`_`) names never appear,
//! which also keeps a directory's own index document out of its listing.

use std::fs::DirEntry;
use std::path::Path;

use tracing::{debug, instrument};

use topicshelf_markdown::{FrontMatter, humanize, read_front_matter, title_or_humanized};
use topicshelf_shared::{
    INDEX_FILE_NAME, MARKDOWN_EXTENSION, Result, TopicSummary, TopicshelfError,
};

/// List the direct children of `dir`, directories first, then by slug.
///
/// Fails only when `dir` itself cannot be read. Unreadable children still
/// appear, titled from their slug.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn list_children(dir: &Path) -> Result<Vec<TopicSummary>> {
    let entries = std::fs::read_dir(dir).map_err(|e| TopicshelfError::io(dir, e))?;

    let mut children: Vec<TopicSummary> = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };

        if let Some(summary) = summarize_entry(&entry) {
            children.push(summary);
        }
    }

    sort_summaries(&mut children);
    debug!(count = children.len(), "listed children");

    Ok(children)
}

/// Directories before files; each group ascending by slug (ordinal compare).
pub fn sort_summaries(children: &mut [TopicSummary]) {
    children.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.slug.cmp(&b.slug)));
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Whether a directory entry name is hidden from listings.
pub(crate) fn is_hidden_or_reserved(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_')
}

fn summarize_entry(entry: &DirEntry) -> Option<TopicSummary> {
    let name = entry.file_name().into_string().ok()?;
    if is_hidden_or_reserved(&name) {
        return None;
    }

    let is_dir = match entry.file_type() {
        Ok(file_type) => file_type.is_dir(),
        Err(e) => {
            debug!(name = %name, error = %e, "skipping entry with unknown file type");
            return None;
        }
    };

    let (slug, document) = if is_dir {
        (name.clone(), entry.path().join(INDEX_FILE_NAME))
    } else {
        let slug = name.strip_suffix(MARKDOWN_EXTENSION)?.to_string();
        (slug, entry.path())
    };

    if slug.is_empty() {
        return None;
    }

    Some(match read_front_matter(&document) {
        Ok(fm) => summary_from(&slug, &fm, is_dir),
        Err(e) => {
            if !is_dir {
                debug!(name = %name, error = %e, "document unreadable, titling from slug");
            }
            TopicSummary {
                title: humanize(&slug),
                slug,
                description: String::new(),
                is_dir,
            }
        }
    })
}

fn summary_from(slug: &str, fm: &FrontMatter, is_dir: bool) -> TopicSummary {
    TopicSummary {
        slug: slug.to_string(),
        title: title_or_humanized(fm, slug),
        description: fm.description.clone(),
        is_dir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, content).expect("write fixture");
    }

    #[test]
    fn lists_directories_before_files_sorted_by_slug() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path();
        write(&root.join("zeta.md"), "---\ntitle: Zeta\n---\n");
        write(&root.join("alpha.md"), "plain body");
        write(
            &root.join("routines/_index.md"),
            "---\ntitle: Routines\ndescription: Daily habits\n---\n",
        );
        fs::create_dir(root.join("focus")).expect("mkdir");

        let children = list_children(root).expect("list");
        let slugs: Vec<&str> = children.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["focus", "routines", "alpha", "zeta"]);

        assert!(children[0].is_dir);
        assert_eq!(children[0].title, "Focus");
        assert_eq!(children[0].description, "");

        assert_eq!(children[1].title, "Routines");
        assert_eq!(children[1].description, "Daily habits");

        assert!(!children[2].is_dir);
        assert_eq!(children[2].title, "Alpha");
        assert_eq!(children[3].title, "Zeta");
    }

    #[test]
    fn skips_hidden_reserved_and_non_markdown_entries() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path();
        write(&root.join("_index.md"), "---\ntitle: Root\n---\n");
        write(&root.join(".secret.md"), "hidden");
        write(&root.join("_drafts/idea.md"), "draft");
        write(&root.join(".git/config"), "");
        write(&root.join("notes.txt"), "not markdown");
        write(&root.join("image.png"), "");
        write(&root.join("kept.md"), "kept");

        let children = list_children(root).expect("list");
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].slug, "kept");
    }

    #[test]
    fn ordering_is_case_sensitive_ordinal() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path();
        write(&root.join("beta.md"), "");
        write(&root.join("Zulu.md"), "");
        write(&root.join("alpha.md"), "");

        let children = list_children(root).expect("list");
        let slugs: Vec<&str> = children.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["Zulu", "alpha", "beta"]);
    }

    #[test]
    fn empty_index_title_falls_back_to_directory_name() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write(
            &tmp.path().join("time-blindness/_index.md"),
            "---\ndescription: Losing track of time\n---\n",
        );

        let children = list_children(tmp.path()).expect("list");
        assert_eq!(children[0].title, "Time Blindness");
        assert_eq!(children[0].description, "Losing track of time");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = list_children(&tmp.path().join("nope")).expect_err("missing dir");
        assert!(matches!(err, TopicshelfError::Io { .. }));
    }

    #[test]
    fn directory_named_like_markdown_is_still_a_directory() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::create_dir(tmp.path().join("odd.md")).expect("mkdir");

        let children = list_children(tmp.path()).expect("list");
        assert_eq!(children[0].slug, "odd.md");
        assert!(children[0].is_dir);
    }

    proptest! {
        #[test]
        fn sort_puts_directories_first_then_slug_order(
            entries in proptest::collection::vec(("[a-zA-Z0-9-]{1,8}", any::<bool>()), 0..30)
        ) {
            let mut summaries: Vec<TopicSummary> = entries
                .into_iter()
                .map(|(slug, is_dir)| TopicSummary {
                    title: humanize(&slug),
                    slug,
                    description: String::new(),
                    is_dir,
                })
                .collect();

            sort_summaries(&mut summaries);

            let first_file = summaries.iter().position(|s| !s.is_dir).unwrap_or(summaries.len());
            prop_assert!(summaries[first_file..].iter().all(|s| !s.is_dir));
            for pair in summaries.windows(2) {
                if pair[0].is_dir == pair[1].is_dir {
                    prop_assert!(pair[0].slug <= pair[1].slug);
                }
            }
        }
    }
}
