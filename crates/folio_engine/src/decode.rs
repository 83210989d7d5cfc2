use encoding_rs::{Encoding, UTF_8};

/// Decode a fetched post into text using: BOM -> Content-Type charset -> UTF-8.
///
/// Invalid sequences are replaced rather than rejected; a post with a stray
/// byte still renders.
pub fn decode_document(bytes: &[u8], content_type: Option<&str>) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text.into_owned();
    }

    let encoding = content_type
        .and_then(extract_charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, _) = encoding.decode_without_bom_handling(bytes);
    text.into_owned()
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"').to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_utf8_bom() {
        let bytes = b"\xEF\xBB\xBF---\ntitle: x\n---\n";
        assert_eq!(decode_document(bytes, None), "---\ntitle: x\n---\n");
    }

    #[test]
    fn honours_content_type_charset() {
        // "café" in latin-1
        let bytes = b"caf\xE9";
        assert_eq!(
            decode_document(bytes, Some("text/plain; Charset=\"ISO-8859-1\"")),
            "café"
        );
    }

    #[test]
    fn defaults_to_lossy_utf8() {
        let bytes = b"ok \xFF done";
        assert_eq!(decode_document(bytes, Some("text/plain")), "ok \u{FFFD} done");
    }
}
