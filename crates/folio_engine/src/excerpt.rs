use pulldown_cmark::{Event, Parser, TagEnd};

use crate::frontmatter::strip_frontmatter;

const ELLIPSIS: &str = "...";
pub const MAX_EXCERPT_CHARS: usize = 200;

/// Plain-text summary of a post: metadata block and markdown syntax removed,
/// whitespace collapsed, cut at [`MAX_EXCERPT_CHARS`] characters.
pub fn build_excerpt(content: &str) -> String {
    let text = plain_text(strip_frontmatter(content));
    truncate_chars(&text, MAX_EXCERPT_CHARS)
}

fn plain_text(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak | Event::Rule => out.push(' '),
            Event::End(tag) if ends_block(&tag) => out.push(' '),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn ends_block(tag: &TagEnd) -> bool {
    matches!(
        tag,
        TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::Item
            | TagEnd::CodeBlock
            | TagEnd::TableCell
            | TagEnd::TableRow
    )
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}{ELLIPSIS}", text[..end].trim_end()),
        None => text.to_string(),
    }
}
