//! Markdown-lite rendering for prose messages.
//!
//! Deliberately a fixed substitution set, not a markdown parser: heading
//! lines (1-4 `#` plus a space), `***bold italic***`, `**bold**`,
//! `*italic*`, `` `inline code` ``, and newline as an explicit line
//! break. No lists, links, tables, or nesting guarantees; malformed
//! markers fall through as literal text.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::ui::theme::Theme;

/// Renders prose into styled lines. Each source newline starts a new
/// output line, so empty source lines stay visible as spacing.
pub fn render_markdown_lite(text: &str, base_style: Style, theme: &Theme) -> Vec<Line<'static>> {
    text.split('\n')
        .map(|raw_line| render_line(raw_line, base_style, theme))
        .collect()
}

fn render_line(line: &str, base_style: Style, theme: &Theme) -> Line<'static> {
    if let Some((level, rest)) = heading_level(line) {
        return Line::from(Span::styled(
            rest.to_string(),
            theme.heading_style(level),
        ));
    }
    Line::from(render_inline(line, base_style, theme))
}

/// A heading is 1-4 leading `#` characters followed by a space, at line
/// start only. Five or more hashes render literally.
fn heading_level(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if (1..=4).contains(&hashes) {
        if let Some(rest) = line[hashes..].strip_prefix(' ') {
            return Some((hashes as u8, rest));
        }
    }
    None
}

#[derive(Clone, Copy)]
enum InlineKind {
    BoldItalic,
    Bold,
    Italic,
    Code,
}

/// Longest marker first: at the same position `***` wins over `**`,
/// which wins over `*`. That ordering is the substitution precedence.
const DELIMITERS: [(&str, InlineKind); 4] = [
    ("***", InlineKind::BoldItalic),
    ("**", InlineKind::Bold),
    ("*", InlineKind::Italic),
    ("`", InlineKind::Code),
];

fn inline_style(kind: InlineKind, base_style: Style, theme: &Theme) -> Style {
    match kind {
        InlineKind::BoldItalic => base_style.add_modifier(Modifier::BOLD | Modifier::ITALIC),
        InlineKind::Bold => base_style.add_modifier(Modifier::BOLD),
        InlineKind::Italic => base_style.add_modifier(Modifier::ITALIC),
        InlineKind::Code => theme.inline_code_style,
    }
}

fn render_inline(line: &str, base_style: Style, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = line;

    while let Some(found) = next_marker(rest) {
        plain.push_str(&rest[..found.start]);
        if !plain.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut plain), base_style));
        }
        spans.push(Span::styled(
            found.inner.to_string(),
            inline_style(found.kind, base_style, theme),
        ));
        rest = found.rest;
    }

    plain.push_str(rest);
    if !plain.is_empty() || spans.is_empty() {
        spans.push(Span::styled(plain, base_style));
    }
    spans
}

struct Marker<'a> {
    /// Byte offset of the opening delimiter within the searched text.
    start: usize,
    inner: &'a str,
    kind: InlineKind,
    rest: &'a str,
}

/// Earliest opening delimiter that also has a closing partner. Unpaired
/// markers are left for the caller to emit literally.
fn next_marker(text: &str) -> Option<Marker<'_>> {
    let mut best: Option<Marker<'_>> = None;
    for (delimiter, kind) in DELIMITERS {
        let Some(open) = text.find(delimiter) else {
            continue;
        };
        if best.as_ref().is_some_and(|b| b.start <= open) {
            continue;
        }
        let inner_start = open + delimiter.len();
        let Some(close) = text[inner_start..].find(delimiter) else {
            continue;
        };
        best = Some(Marker {
            start: open,
            inner: &text[inner_start..inner_start + close],
            kind,
            rest: &text[inner_start + close + delimiter.len()..],
        });
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> Theme {
        Theme::dark_default()
    }

    fn render(text: &str) -> Vec<Line<'static>> {
        let theme = theme();
        render_markdown_lite(text, theme.bot_text_style, &theme)
    }

    fn span_with_content<'a>(lines: &'a [Line<'static>], content: &str) -> &'a Span<'static> {
        lines
            .iter()
            .flat_map(|line| line.spans.iter())
            .find(|span| span.content == content)
            .unwrap_or_else(|| panic!("no span with content {content:?}"))
    }

    #[test]
    fn bold_italic_code_and_line_breaks() {
        let lines = render("**bold** and *italic* and `code`\nline2");
        assert_eq!(lines.len(), 2, "newline becomes a line break");

        assert!(span_with_content(&lines, "bold")
            .style
            .add_modifier
            .contains(Modifier::BOLD));
        assert!(span_with_content(&lines, "italic")
            .style
            .add_modifier
            .contains(Modifier::ITALIC));
        let theme = theme();
        assert_eq!(
            span_with_content(&lines, "code").style,
            theme.inline_code_style
        );
        assert_eq!(lines[1].spans[0].content, "line2");
    }

    #[test]
    fn triple_emphasis_wins_over_bold() {
        let lines = render("***both*** then **plain bold**");
        let both = span_with_content(&lines, "both");
        assert!(both.style.add_modifier.contains(Modifier::BOLD));
        assert!(both.style.add_modifier.contains(Modifier::ITALIC));
        let bold = span_with_content(&lines, "plain bold");
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
        assert!(!bold.style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn heading_levels_map_one_to_four() {
        let theme = theme();
        for level in 1..=4u8 {
            let source = format!("{} Title", "#".repeat(level as usize));
            let lines = render(&source);
            assert_eq!(lines[0].spans.len(), 1);
            assert_eq!(lines[0].spans[0].content, "Title");
            assert_eq!(lines[0].spans[0].style, theme.heading_style(level));
        }
    }

    #[test]
    fn five_hashes_or_no_space_is_not_a_heading() {
        let lines = render("##### not a heading");
        assert_eq!(lines[0].spans[0].content, "##### not a heading");

        let lines = render("#tag");
        assert_eq!(lines[0].spans[0].content, "#tag");
    }

    #[test]
    fn headings_only_match_at_line_start() {
        let lines = render("see # not a heading");
        assert_eq!(lines[0].spans[0].content, "see # not a heading");
    }

    #[test]
    fn unpaired_markers_render_literally() {
        let lines = render("2 * 3 = 6 and a `tick");
        assert_eq!(lines[0].spans.len(), 1);
        assert_eq!(lines[0].spans[0].content, "2 * 3 = 6 and a `tick");
    }

    #[test]
    fn empty_lines_are_preserved_for_spacing() {
        let lines = render("para one\n\npara two");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].spans[0].content, "");
    }

    #[test]
    fn mixed_emphasis_keeps_source_order() {
        let lines = render("a **b** c *d* e");
        let contents: Vec<&str> = lines[0]
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        assert_eq!(contents, vec!["a ", "b", " c ", "d", " e"]);
    }
}
