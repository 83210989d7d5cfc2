//! Leading `---` metadata block of a post.
//!
//! ```text
//! ---
//! title: "Hello"
//! date: 2024-03-01
//! excerpt: 'Short summary'
//! ---
//! body
//! ```
//!
//! Parsing is lenient: a missing or unterminated block yields empty metadata,
//! never an error.

const DELIMITER: &str = "---";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub excerpt: Option<String>,
}

pub fn parse_frontmatter(content: &str) -> Frontmatter {
    let mut meta = Frontmatter::default();
    let Some((block, _)) = split_block(content) else {
        return meta;
    };

    for line in block.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = unquote(value.trim());
        if value.is_empty() {
            continue;
        }
        let slot = match key {
            "title" => &mut meta.title,
            "date" => &mut meta.date,
            "excerpt" => &mut meta.excerpt,
            _ => continue,
        };
        *slot = Some(value.to_string());
    }
    meta
}

/// Body of the post with the metadata block (and the blank lines after it) removed.
pub fn strip_frontmatter(content: &str) -> &str {
    match split_block(content) {
        Some((_, body)) => body.trim_start_matches(['\r', '\n']),
        None => content,
    }
}

/// Splits `content` into the text between the delimiter lines and the rest.
fn split_block(content: &str) -> Option<(&str, &str)> {
    let (first, mut rest) = content.split_once('\n')?;
    if first.trim_end() != DELIMITER {
        return None;
    }

    let block_start = rest;
    let mut block_len = 0;
    loop {
        let (line, remainder) = match rest.split_once('\n') {
            Some((line, remainder)) => (line, Some(remainder)),
            None => (rest, None),
        };
        if line.trim_end() == DELIMITER {
            let block = block_start[..block_len].trim_end_matches(['\r', '\n']);
            return Some((block, remainder.unwrap_or("")));
        }
        let remainder = remainder?;
        block_len += line.len() + 1;
        rest = remainder;
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    value
}
