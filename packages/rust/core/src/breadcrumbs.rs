//! Breadcrumb trail for a topic path.

use topicshelf_markdown::humanize;
use topicshelf_shared::Breadcrumb;

/// One breadcrumb per segment of a cleaned path, left to right.
///
/// `"a/b/c"` yields paths `/a`, `/a/b` and `/a/b/c`. The empty path has no
/// breadcrumbs.
pub fn build_breadcrumbs(clean: &str) -> Vec<Breadcrumb> {
    let mut path = String::with_capacity(clean.len() + 1);

    clean
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            path.push('/');
            path.push_str(segment);
            Breadcrumb {
                slug: segment.to_string(),
                title: humanize(segment),
                path: path.clone(),
            }
        })
        .collect()
}
