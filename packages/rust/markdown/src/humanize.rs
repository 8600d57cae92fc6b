//! Display titles derived from filesystem slugs.

/// Turn a slug like `deep-work_tips` into `Deep Work Tips`.
///
/// Only the first character of each word is uppercased; the rest of the
/// word keeps its original casing, so `iOS-apps` becomes `IOS Apps`.
pub fn humanize(slug: &str) -> String {
    slug.replace(['-', '_'], " ")
        .split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
