//! Markdown body → HTML.

use pulldown_cmark::{Event, Options, Parser, html};

/// Switches for [`render_html`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Emit raw HTML blocks verbatim instead of escaping them.
    pub allow_raw_html: bool,
}

/// Render a markdown body to an HTML fragment. An empty body renders to "".
pub fn render_html(body: &str, opts: &RenderOptions) -> String {
    if body.trim().is_empty() {
        return String::new();
    }

    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(body, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) if !opts.allow_raw_html => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(body.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
