//! Recursive full-text search over the content tree.
//!
//! The walk is depth-first pre-order with entries visited in name order, so
//! results are reproducible for a fixed tree. A document matches when every
//! query term occurs, case-insensitively, somewhere in its title, description
//! or body. The walk stops as soon as `max_results` matches are collected.

use std::fs::DirEntry;
use std::path::{Component, Path};

use tracing::{debug, instrument};

use topicshelf_markdown::{read_front_matter, title_or_humanized};
use topicshelf_shared::{INDEX_STEM, MARKDOWN_EXTENSION, SearchResult};

/// Snippet window, in characters.
pub const SNIPPET_LEN: usize = 120;

/// Marker added where a snippet was cut.
pub const ELLIPSIS: &str = "...";

/// Characters of context kept before the match.
const SNIPPET_LEAD: usize = 40;

/// How far past the lead start we look for a space to begin on.
const SNIPPET_SNAP: usize = 20;

/// Split a raw query into terms on whitespace.
pub fn split_query(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_string).collect()
}

/// Search markdown documents under `dir` for documents containing every term.
///
/// Result paths are relative to `base`. Unreadable directories and files are
/// skipped; the search itself never fails.
#[instrument(skip_all, fields(dir = %dir.display(), terms = terms.len(), max_results = max_results))]
pub fn search_files(
    dir: &Path,
    terms: &[String],
    base: &Path,
    max_results: usize,
) -> Vec<SearchResult> {
    let Some(anchor) = terms.first() else {
        return Vec::new();
    };

    let mut walk = SearchWalk {
        terms: terms.iter().map(|t| t.to_lowercase()).collect(),
        anchor,
        base,
        max_results,
        results: Vec::new(),
    };
    walk.search_dir(dir);

    debug!(matches = walk.results.len(), "search complete");
    walk.results
}

// ---------------------------------------------------------------------------
// Walk
// ---------------------------------------------------------------------------

struct SearchWalk<'a> {
    /// Lowercased terms, all required.
    terms: Vec<String>,
    /// First term as typed; anchors the snippet.
    anchor: &'a str,
    base: &'a Path,
    max_results: usize,
    results: Vec<SearchResult>,
}

impl SearchWalk<'_> {
    fn is_full(&self) -> bool {
        self.results.len() >= self.max_results
    }

    fn search_dir(&mut self, dir: &Path) {
        if self.is_full() {
            return;
        }

        let mut entries: Vec<DirEntry> = match std::fs::read_dir(dir) {
            Ok(entries) => entries.filter_map(|entry| entry.ok()).collect(),
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "skipping unreadable directory");
                return;
            }
        };
        entries.sort_by_key(DirEntry::file_name);

        for entry in entries {
            if self.is_full() {
                return;
            }

            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                self.search_dir(&path);
            } else if name.ends_with(MARKDOWN_EXTENSION) {
                self.search_file(&path, name);
            }
        }
    }

    fn search_file(&mut self, path: &Path, name: &str) {
        let fm = match read_front_matter(path) {
            Ok(fm) => fm,
            Err(e) => {
                debug!(error = %e, "skipping unreadable document");
                return;
            }
        };

        let haystack = format!("{} {} {}", fm.title, fm.description, fm.body).to_lowercase();
        if !self.terms.iter().all(|term| haystack.contains(term.as_str())) {
            return;
        }

        let stem = name.strip_suffix(MARKDOWN_EXTENSION).unwrap_or(name);
        self.results.push(SearchResult {
            path: result_path(self.base, path),
            title: title_or_humanized(&fm, stem),
            snippet: extract_snippet(&fm.body, self.anchor, SNIPPET_LEN),
        });
    }
}

/// Topic path of a document: relative to `base`, extension dropped, and a
/// trailing index segment collapsed onto its directory.
fn result_path(base: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(base).unwrap_or(file);

    let mut segments: Vec<&str> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();

    if let Some(last) = segments.pop() {
        let stem = last.strip_suffix(MARKDOWN_EXTENSION).unwrap_or(last);
        if stem != INDEX_STEM {
            segments.push(stem);
        }
    }

    format!("/{}", segments.join("/"))
}

// ---------------------------------------------------------------------------
// Snippets
// ---------------------------------------------------------------------------

/// Excerpt of `text` around the first case-insensitive occurrence of `term`.
///
/// The window opens up to 40 characters before the match and is nudged
/// forward to the next space (within 20 characters) so it does not start
/// mid-word. Cut ends are marked with [`ELLIPSIS`]. When the term does not
/// occur in `text`, the head of the text is returned instead.
pub fn extract_snippet(text: &str, term: &str, max_len: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let folded: Vec<char> = chars.iter().copied().map(fold_case).collect();
    let needle: Vec<char> = term.chars().map(fold_case).collect();

    let Some(idx) = find_subslice(&folded, &needle) else {
        if chars.len() > max_len {
            let mut head: String = chars[..max_len].iter().collect();
            head.push_str(ELLIPSIS);
            return head;
        }
        return text.to_string();
    };

    let mut start = idx.saturating_sub(SNIPPET_LEAD);
    if start > 0 {
        if let Some(space) = chars[start..].iter().take(SNIPPET_SNAP).position(|&c| c == ' ') {
            start += space + 1;
        }
    }
    let end = (start + max_len).min(chars.len());

    let mut snippet = String::with_capacity(max_len + 2 * ELLIPSIS.len());
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.extend(&chars[start..end]);
    if end < chars.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

/// One-to-one lowercase mapping so folded offsets line up with the original.
fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn find_subslice(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|window| window == needle)
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

    fn terms(query: &str) -> Vec<String> {
        split_query(query)
    }

    fn corpus() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path();
        write(
            &root.join("focus/_index.md"),
            "---\ntitle: Focus\ndescription: Staying on task\n---\nTools for attention.",
        );
        write(
            &root.join("focus/pomodoro.md"),
            "---\ntitle: Pomodoro\n---\nA deep work session lasts 25 minutes.",
        );
        write(
            &root.join("focus/body-doubling.md"),
            "---\ntitle: Body Doubling\n---\nWorking next to someone helps focus.",
        );
        write(&root.join("routines/morning.md"), "Start the day with deep breathing.");
        write(&root.join(".hidden/secret.md"), "deep work deep work");
        tmp
    }

    #[test]
    fn split_query_on_whitespace() {
        assert_eq!(split_query("  deep\twork \n"), vec!["deep", "work"]);
        assert!(split_query("   ").is_empty());
    }

    #[test]
    fn all_terms_must_match() {
        let tmp = corpus();
        let results = search_files(tmp.path(), &terms("deep work"), tmp.path(), 20);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, "/focus/pomodoro");
        assert_eq!(results[0].title, "Pomodoro");
    }

    #[test]
    fn matching_is_case_insensitive_across_fields() {
        let tmp = corpus();
        let results = search_files(tmp.path(), &terms("STAYING tools"), tmp.path(), 20);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, "/focus");
    }

    #[test]
    fn unknown_extra_term_drops_all_matches() {
        let tmp = corpus();
        assert!(!search_files(tmp.path(), &terms("deep"), tmp.path(), 20).is_empty());
        assert!(search_files(tmp.path(), &terms("deep zzzqx"), tmp.path(), 20).is_empty());
    }

    #[test]
    fn hidden_entries_are_skipped() {
        let tmp = corpus();
        let results = search_files(tmp.path(), &terms("deep"), tmp.path(), 20);
        assert!(results.iter().all(|r| !r.path.contains("hidden")));
    }

    #[test]
    fn results_follow_name_ordered_preorder() {
        let tmp = corpus();
        let results = search_files(tmp.path(), &terms("e"), tmp.path(), 20);
        let paths: Vec<&str> = results.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/focus", "/focus/body-doubling", "/focus/pomodoro", "/routines/morning"]
        );
    }

    #[test]
    fn cap_bounds_results() {
        let tmp = corpus();
        let results = search_files(tmp.path(), &terms("e"), tmp.path(), 2);
        assert_eq!(results.len(), 2);
        assert!(search_files(tmp.path(), &terms("e"), tmp.path(), 0).is_empty());
    }

    #[test]
    fn paths_are_relative_to_base_not_scope() {
        let tmp = corpus();
        let scope = tmp.path().join("routines");
        let results = search_files(&scope, &terms("breathing"), tmp.path(), 20);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, "/routines/morning");
        assert_eq!(results[0].title, "Morning");
    }

    #[test]
    fn root_index_collapses_to_slash() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write(&tmp.path().join("_index.md"), "Welcome to the shelf.");
        let results = search_files(tmp.path(), &terms("welcome"), tmp.path(), 20);
        assert_eq!(results[0].path, "/");
        assert_eq!(results[0].title, "Index");
    }

    #[test]
    fn missing_root_yields_nothing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let missing = tmp.path().join("nope");
        assert!(search_files(&missing, &terms("x"), tmp.path(), 20).is_empty());
    }

    #[test]
    fn empty_terms_yield_nothing() {
        let tmp = corpus();
        assert!(search_files(tmp.path(), &[], tmp.path(), 20).is_empty());
    }

    #[test]
    fn snippet_anchors_on_first_term_only() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let filler = "lorem ipsum ".repeat(20);
        write(
            &tmp.path().join("doc.md"),
            &format!("alpha starts here. {filler} omega ends here."),
        );

        let results = search_files(tmp.path(), &terms("omega alpha"), tmp.path(), 20);
        assert_eq!(results.len(), 1);
        assert!(results[0].snippet.starts_with(ELLIPSIS));
        assert!(results[0].snippet.contains("omega"));
    }

    // -- extract_snippet ----------------------------------------------------

    #[test]
    fn short_text_returned_whole() {
        assert_eq!(extract_snippet("Short body.", "body", 120), "Short body.");
    }

    #[test]
    fn absent_term_returns_head() {
        let text = "x".repeat(200);
        let snippet = extract_snippet(&text, "missing", 120);
        assert_eq!(snippet, format!("{}...", "x".repeat(120)));
        assert_eq!(extract_snippet("tiny", "missing", 120), "tiny");
    }

    #[test]
    fn start_snaps_to_word_boundary() {
        let text = format!("{} needle and then some trailing words", "word ".repeat(20));
        let snippet = extract_snippet(&text, "needle", 120);
        assert!(snippet.starts_with("...word "));
        assert!(snippet.contains("needle"));
        assert!(!snippet.ends_with(ELLIPSIS));
    }

    #[test]
    fn start_unchanged_without_nearby_space() {
        let text = format!("{}needle", "y".repeat(100));
        let snippet = extract_snippet(&text, "NEEDLE", 120);
        assert_eq!(snippet, format!("...{}needle", "y".repeat(40)));
    }

    #[test]
    fn long_text_is_cut_on_both_sides() {
        let text = format!("{} target {}", "a ".repeat(60), "b ".repeat(100));
        let snippet = extract_snippet(&text, "target", 120);
        assert!(snippet.starts_with(ELLIPSIS));
        assert!(snippet.ends_with(ELLIPSIS));
        assert_eq!(snippet.chars().count(), 120 + 2 * ELLIPSIS.len());
    }

    #[test]
    fn multibyte_text_is_cut_on_char_boundaries() {
        let text = format!("{}ünïcödé match {}", "é".repeat(80), "ß".repeat(200));
        let snippet = extract_snippet(&text, "MATCH", 120);
        assert!(snippet.contains("match"));
        assert!(snippet.chars().count() <= 120 + 2 * ELLIPSIS.len());
    }

    #[test]
    fn result_path_strips_extension_and_index() {
        let base = Path::new("/content");
        assert_eq!(result_path(base, Path::new("/content/a/b.md")), "/a/b");
        assert_eq!(result_path(base, Path::new("/content/a/_index.md")), "/a");
        assert_eq!(result_path(base, Path::new("/content/_index.md")), "/");
    }

    proptest! {
        #[test]
        fn snippet_never_exceeds_window(
            text in "[a-z ]{0,400}",
            term in "[a-z]{1,4}",
        ) {
            let snippet = extract_snippet(&text, &term, SNIPPET_LEN);
            prop_assert!(snippet.chars().count() <= SNIPPET_LEN + 2 * ELLIPSIS.len());
        }

        #[test]
        fn snippet_contains_term_when_it_fits(
            prefix in "[a-p ]{0,200}",
            suffix in "[a-z ]{0,200}",
        ) {
            let text = format!("{prefix}QQQ{suffix}");
            let snippet = extract_snippet(&text, "qqq", SNIPPET_LEN);
            prop_assert!(snippet.contains("QQQ"));
        }
    }
}
