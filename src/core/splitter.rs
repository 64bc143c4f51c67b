//! Splits reply text into alternating prose and fenced-code segments.
//!
//! Chunks between triple-backtick markers alternate by position: even
//! indexes are prose, odd indexes are code. An unmatched trailing fence
//! therefore leaves the remainder inside a code segment; there is no
//! fence-balance recovery.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Prose,
    Code,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

const FENCE: &str = "```";

/// Whitespace-only prose is dropped; code is trimmed but always emitted.
pub fn split(response: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    for (index, chunk) in response.split(FENCE).enumerate() {
        if index % 2 == 0 {
            let text = chunk.trim();
            if !text.is_empty() {
                segments.push(Segment {
                    kind: SegmentKind::Prose,
                    text: text.to_string(),
                });
            }
        } else {
            segments.push(Segment {
                kind: SegmentKind::Code,
                text: strip_language_tag(chunk).trim().to_string(),
            });
        }
    }
    segments
}

/// Drops the info string of a multi-line fence (```rust\n...). Single-line
/// chunks are untouched so inline fences keep their content.
fn strip_language_tag(chunk: &str) -> &str {
    match chunk.split_once('\n') {
        Some((first, rest)) if is_language_tag(first) => rest,
        _ => chunk,
    }
}

fn is_language_tag(line: &str) -> bool {
    line.trim_end_matches('\r')
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+' | '#' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prose(text: &str) -> Segment {
        Segment {
            kind: SegmentKind::Prose,
            text: text.to_string(),
        }
    }

    fn code(text: &str) -> Segment {
        Segment {
            kind: SegmentKind::Code,
            text: text.to_string(),
        }
    }

    #[test]
    fn alternates_prose_and_code_in_order() {
        let segments = split("hello ```code1``` world ```code2``` end");
        assert_eq!(
            segments,
            vec![
                prose("hello"),
                code("code1"),
                prose("world"),
                code("code2"),
                prose("end"),
            ]
        );
    }

    #[test]
    fn plain_text_is_a_single_prose_segment() {
        assert_eq!(split("just words"), vec![prose("just words")]);
    }

    #[test]
    fn whitespace_only_prose_is_dropped() {
        let segments = split("```a```   ```b```");
        assert_eq!(segments, vec![code("a"), code("b")]);
    }

    #[test]
    fn empty_code_segments_are_still_emitted() {
        let segments = split("x `````` y");
        assert_eq!(segments, vec![prose("x"), code(""), prose("y")]);
    }

    #[test]
    fn language_tags_are_stripped_from_multiline_fences() {
        let segments = split("intro\n```rust\nfn main() {}\n```\ndone");
        assert_eq!(
            segments,
            vec![prose("intro"), code("fn main() {}"), prose("done")]
        );
    }

    #[test]
    fn first_code_line_survives_when_it_is_not_a_bare_tag() {
        let segments = split("```\nlet x = 1;\nlet y = 2;\n```");
        assert_eq!(segments, vec![code("let x = 1;\nlet y = 2;")]);

        let segments = split("```fn main() {}\nprintln!();\n```");
        assert_eq!(segments, vec![code("fn main() {}\nprintln!();")]);
    }

    #[test]
    fn unmatched_trailing_fence_becomes_code() {
        let segments = split("before ```tail without close");
        assert_eq!(segments, vec![prose("before"), code("tail without close")]);
    }

    #[test]
    fn empty_input_yields_no_segments() {
        assert!(split("").is_empty());
        assert!(split("   \n  ").is_empty());
    }
}
