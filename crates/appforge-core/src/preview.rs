//! Preview assembly: one renderable document from a source bundle.
//!
//! The entry document gets the bundle's stylesheet injected as a `<style>`
//! element just before `</head>` and the script as a `<script>` element just
//! before `</body>`. Injection always adds new elements; inline
//! `<style>`/`<script>` tags already present in the entry document are left
//! untouched. The output is a plain string -- the caller owns writing it to
//! a sandboxed rendering surface and reloading on every bundle change.

use appforge_types::bundle::{ENTRY_FILE, SCRIPT_FILE, SourceBundle, STYLE_FILE};

/// Substitute entry document when the bundle has no entry file.
const EMPTY_DOCUMENT: &str = "<!DOCTYPE html>\n<html>\n<head></head>\n<body></body>\n</html>";

/// Assemble the bundle into a single self-contained document.
///
/// Missing stylesheet/script files are treated as empty; a missing entry
/// file is replaced with a minimal empty document before injection.
pub fn assemble(bundle: &SourceBundle) -> String {
    let entry = bundle.get(ENTRY_FILE).unwrap_or(EMPTY_DOCUMENT);
    let style = bundle.get(STYLE_FILE).unwrap_or("");
    let script = bundle.get(SCRIPT_FILE).unwrap_or("");

    let document = inject_style(entry, style);
    inject_script(&document, script)
}

/// Insert `<style>{style}</style>` immediately before the first `</head>`.
/// Documents without a `<head>` get one synthesized right after the opening
/// `<html>` tag; documents without `<html>` get the head block prepended so
/// a standard parser still hoists the style into a head section.
fn inject_style(document: &str, style: &str) -> String {
    let block = format!("<style>{style}</style>");

    if let Some(at) = document.find("</head>") {
        let mut out = String::with_capacity(document.len() + block.len());
        out.push_str(&document[..at]);
        out.push_str(&block);
        out.push_str(&document[at..]);
        return out;
    }

    if let Some(after_open) = html_open_end(document) {
        let mut out = String::with_capacity(document.len() + block.len() + 13);
        out.push_str(&document[..after_open]);
        out.push_str("<head>");
        out.push_str(&block);
        out.push_str("</head>");
        out.push_str(&document[after_open..]);
        return out;
    }

    format!("<head>{block}</head>{document}")
}

/// Insert `<script>{script}</script>` immediately before `</body>`, or
/// append it at the end when the document has no `</body>`.
fn inject_script(document: &str, script: &str) -> String {
    let block = format!("<script>{script}</script>");

    if let Some(at) = document.find("</body>") {
        let mut out = String::with_capacity(document.len() + block.len());
        out.push_str(&document[..at]);
        out.push_str(&block);
        out.push_str(&document[at..]);
        return out;
    }

    format!("{document}{block}")
}

/// Byte offset just past the opening `<html ...>` tag, if one exists.
fn html_open_end(document: &str) -> Option<usize> {
    let start = document.find("<html")?;
    let rest = &document[start + 5..];
    match rest.chars().next() {
        Some('>') => Some(start + 6),
        Some(c) if c.is_ascii_whitespace() => {
            // Tag carries attributes; skip to its closing bracket.
            let close = rest.find('>')?;
            Some(start + 5 + close + 1)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle_with(entry: &str, style: &str, script: &str) -> SourceBundle {
        let mut bundle = SourceBundle::new();
        bundle.insert(ENTRY_FILE, entry).unwrap();
        bundle.insert(STYLE_FILE, style).unwrap();
        bundle.insert(SCRIPT_FILE, script).unwrap();
        bundle
    }

    #[test]
    fn test_injects_into_head_and_body() {
        let bundle = bundle_with(
            "<html><head><title>t</title></head><body><p>hi</p></body></html>",
            "body { color: red; }",
            "console.log('ready');",
        );
        let out = assemble(&bundle);
        assert_eq!(
            out,
            "<html><head><title>t</title><style>body { color: red; }</style></head>\
             <body><p>hi</p><script>console.log('ready');</script></body></html>"
        );
    }

    #[test]
    fn test_exactly_one_injected_block_each() {
        let bundle = bundle_with(
            "<html><head></head><body></body></html>",
            ".a{}",
            "var x = 1;",
        );
        let out = assemble(&bundle);
        assert_eq!(out.matches("<style>.a{}</style>").count(), 1);
        assert_eq!(out.matches("<script>var x = 1;</script>").count(), 1);
    }

    #[test]
    fn test_style_and_script_text_unmodified() {
        let style = "body{--x:\"</weird>\";}";
        let script = "if (a < b && c > d) { go(); }";
        let bundle = bundle_with("<html><head></head><body></body></html>", style, script);
        let out = assemble(&bundle);
        assert!(out.contains(&format!("<style>{style}</style>")));
        assert!(out.contains(&format!("<script>{script}</script>")));
    }

    #[test]
    fn test_no_head_synthesizes_one_after_html() {
        let bundle = bundle_with("<html><body></body></html>", ".a{}", "");
        let out = assemble(&bundle);
        assert!(out.starts_with("<html><head><style>.a{}</style></head><body>"));
    }

    #[test]
    fn test_html_tag_with_attributes() {
        let bundle = bundle_with("<html lang=\"en\"><body></body></html>", ".a{}", "");
        let out = assemble(&bundle);
        assert!(out.starts_with("<html lang=\"en\"><head><style>.a{}</style></head>"));
    }

    #[test]
    fn test_no_html_at_all_prepends_head() {
        let bundle = bundle_with("<p>fragment</p>", ".a{}", "x();");
        let out = assemble(&bundle);
        assert!(out.starts_with("<head><style>.a{}</style></head><p>fragment</p>"));
        assert!(out.ends_with("<script>x();</script>"));
    }

    #[test]
    fn test_no_body_appends_script_at_end() {
        let bundle = bundle_with("<html><head></head>no body here</html>", "", "x();");
        let out = assemble(&bundle);
        assert!(out.ends_with("<script>x();</script>"));
    }

    #[test]
    fn test_missing_entry_uses_empty_document() {
        let mut bundle = SourceBundle::new();
        bundle.insert(STYLE_FILE, ".a{}").unwrap();
        let out = assemble(&bundle);
        assert!(out.contains("<style>.a{}</style></head>"));
        assert!(out.contains("<body>"));
    }

    #[test]
    fn test_missing_style_and_script_injected_empty() {
        let mut bundle = SourceBundle::new();
        bundle
            .insert(ENTRY_FILE, "<html><head></head><body></body></html>")
            .unwrap();
        let out = assemble(&bundle);
        assert!(out.contains("<style></style>"));
        assert!(out.contains("<script></script>"));
    }

    #[test]
    fn test_existing_inline_tags_not_merged() {
        let bundle = bundle_with(
            "<html><head><style>.old{}</style></head><body><script>old();</script></body></html>",
            ".new{}",
            "fresh();",
        );
        let out = assemble(&bundle);
        // Both the original and the injected blocks survive as separate elements.
        assert!(out.contains("<style>.old{}</style>"));
        assert!(out.contains("<style>.new{}</style>"));
        assert!(out.contains("<script>old();</script>"));
        assert!(out.contains("<script>fresh();</script>"));
        assert_eq!(out.matches("<style>").count(), 2);
        assert_eq!(out.matches("<script>").count(), 2);
    }

    #[test]
    fn test_injection_before_first_head_close() {
        // A stray </head> in a string literal later in the document must not
        // attract the injection; the first close tag wins.
        let entry = "<html><head></head><body><code></head></code></body></html>";
        let bundle = bundle_with(entry, ".a{}", "");
        let out = assemble(&bundle);
        assert!(out.starts_with("<html><head><style>.a{}</style></head>"));
    }
}
