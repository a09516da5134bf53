//! Marks top-level headings as chapter boundaries for the e-book stylesheet.

const HEADING: &str = "<h1>";
const CHAPTER_HEADING: &str = r#"<h1 class="chapter">"#;

/// Replaces every literal `<h1>` in `html` with `<h1 class="chapter">`. This
/// is a plain textual substitution: an `<h1` which already carries attributes
/// (e.g., `<h1 id="intro">`) doesn't match and is left as-is.
pub fn tag_chapters(html: &str) -> String {
    html.replace(HEADING, CHAPTER_HEADING)
}
