//! Ariadne-based rendering of parse failures for terminal output.

use super::errors::ParserError;
use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use std::io::Cursor;

/// Render a parse error against the query text.
///
/// * `err` - The error to render.
/// * `src` - The full query text.
/// * `name` - Label for the source (e.g. `"<query>"` or a file path).
pub fn render(err: &ParserError, src: &str, name: &str) -> String {
    let Some(span) = err.span() else {
        return format!("[PARSE_ERROR] error: {}", err.message());
    };

    // pest spans are byte offsets, and end-of-input positions point one past
    // the last byte; snap both ends onto char boundaries
    let src_len = src.len();
    let mut start = span.start.min(src_len);
    while !src.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = span.end.min(src_len).max(start);
    while !src.is_char_boundary(end) {
        end += 1;
    }
    if start == end {
        if let Some((prev, _)) = src[..start].char_indices().next_back() {
            start = prev;
        } else if let Some(c) = src[end..].chars().next() {
            end += c.len_utf8();
        } else {
            return format!("[PARSE_ERROR] error: {}", err.message());
        }
    }
    let range = start..end;

    let label = Label::new((name, range.clone()))
        .with_message(err.message())
        .with_color(Color::Red);

    let report = Report::build(ReportKind::Error, (name, range))
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_code("PARSE_ERROR")
        .with_message("invalid traversal query")
        .with_label(label)
        .with_help("traversals look like `pnf*('prov-status','in_service') > pserver`");

    let mut output = Cursor::new(Vec::new());
    if let Err(e) = report
        .finish()
        .write((name, Source::from(src)), &mut output)
    {
        return format!("[Render Error: {e}] PARSE_ERROR: {}", err.message());
    }

    String::from_utf8(output.into_inner())
        .unwrap_or_else(|_| format!("[PARSE_ERROR] {}", err.message()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tdslc::parser::DslParser;

    #[test]
    fn test_render_without_span_is_plain_text() {
        let err = ParserError::from("Empty input");
        assert_eq!(render(&err, "", "<query>"), "[PARSE_ERROR] error: Empty input");
    }

    #[test]
    fn test_render_clamps_span_past_end() {
        let err = ParserError::Syntax {
            message: "expected node type".to_string(),
            span: 10..11,
            line: 1,
            column: 11,
        };
        let rendered = render(&err, "pnf > ", "<query>");
        assert!(rendered.contains("expected node type"));
    }

    #[test]
    fn test_render_byte_span_in_non_ascii_query() {
        for src in ["pnf* > ('é') ", "日本語日本語 > > >"] {
            let err = DslParser::parse_events(src).unwrap_err();
            let rendered = render(&err, src, "<query>");
            assert!(rendered.contains(err.message()), "{src}: {rendered}");
        }
    }

    #[test]
    fn test_render_snaps_span_inside_multibyte_char() {
        let err = ParserError::Syntax {
            message: "expected `>`".to_string(),
            // second byte of `é`
            span: 5..6,
            line: 1,
            column: 5,
        };
        let rendered = render(&err, "pnf* é", "<query>");
        assert!(rendered.contains("expected `>`"));
    }
}
