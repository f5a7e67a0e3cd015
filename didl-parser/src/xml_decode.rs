//! XML text utilities for ContentDirectory payloads.
//!
//! Browse responses embed DIDL-Lite as XML-escaped text, and the DIDL-Lite
//! vocabulary itself is namespace-prefixed (`dc:title`, `upnp:class`). Both
//! get in the way of a plain serde deserialization, so this module provides
//! the two preprocessing steps: entity unescaping and namespace stripping.

/// Unescape the four entities a ContentDirectory result payload is escaped
/// with: `&lt;`, `&gt;`, `&quot;` and `&amp;`.
///
/// `&amp;` is substituted last so that doubly-escaped input (`&amp;lt;`)
/// unescapes exactly one level instead of collapsing to `<`. Text containing
/// none of the four entities passes through unchanged.
pub fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// Strip namespace prefixes from tag and attribute names so the document
/// can be deserialized into structs with bare element names.
///
/// `<dc:title>` becomes `<title>`, `upnp:class="…"` becomes `class="…"`,
/// and `xmlns`/`xmlns:*` declarations are dropped. Attribute values, text
/// content, and `<?…?>`/`<!…>` constructs are left untouched.
pub fn strip_namespaces(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len());
    let mut rest = xml;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt + 1]);
        rest = &rest[lt + 1..];

        if rest.starts_with('?') || rest.starts_with('!') {
            let end = rest.find('>').map(|i| i + 1).unwrap_or(rest.len());
            out.push_str(&rest[..end]);
            rest = &rest[end..];
            continue;
        }

        let end = tag_span(rest);
        rewrite_tag(&rest[..end], &mut out);
        rest = &rest[end..];
    }

    out.push_str(rest);
    out
}

/// Length of the tag starting just after `<`, up to and including the
/// closing `>`, skipping over quoted attribute values.
fn tag_span(s: &str) -> usize {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return i + 1,
            None => {}
        }
    }
    s.len()
}

fn local_name(name: &str) -> &str {
    match name.find(':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Rewrite one tag (the slice between `<` and `>`, inclusive of the `>`)
/// with prefixes removed and xmlns declarations dropped.
fn rewrite_tag(tag: &str, out: &mut String) {
    let bytes = tag.as_bytes();
    let mut i = 0;

    if bytes.first() == Some(&b'/') {
        out.push('/');
        i += 1;
    }

    let name_start = i;
    while i < bytes.len() && !is_name_end(bytes[i]) {
        i += 1;
    }
    out.push_str(local_name(&tag[name_start..i]));

    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() {
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i >= bytes.len() || bytes[i] == b'>' || bytes[i] == b'/' {
                continue;
            }

            let attr_start = i;
            while i < bytes.len() && bytes[i] != b'=' && !is_name_end(bytes[i]) {
                i += 1;
            }
            let attr_name = &tag[attr_start..i];

            let value_end = attr_value_end(bytes, i);
            if !attr_name.starts_with("xmlns") {
                out.push(' ');
                out.push_str(local_name(attr_name));
                out.push_str(&tag[i..value_end]);
            }
            i = value_end;
        } else {
            out.push(bytes[i] as char);
            i += 1;
        }
    }
}

fn is_name_end(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'>' || b == b'/'
}

/// End index of an attribute's `="value"` part starting at `from` (the
/// byte just past the attribute name). Returns `from` when the attribute
/// has no value.
fn attr_value_end(bytes: &[u8], from: usize) -> usize {
    let mut j = from;
    while j < bytes.len() && bytes[j].is_ascii_whitespace() {
        j += 1;
    }
    if j >= bytes.len() || bytes[j] != b'=' {
        return from;
    }
    j += 1;
    while j < bytes.len() && bytes[j].is_ascii_whitespace() {
        j += 1;
    }
    if j < bytes.len() && (bytes[j] == b'"' || bytes[j] == b'\'') {
        let q = bytes[j];
        j += 1;
        while j < bytes.len() && bytes[j] != q {
            j += 1;
        }
        if j < bytes.len() {
            j += 1;
        }
    } else {
        while j < bytes.len() && !is_name_end(bytes[j]) && bytes[j] != b'=' {
            j += 1;
        }
    }
    j
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("plain text with no entities", "plain text with no entities")]
    #[case("&lt;DIDL-Lite&gt;", "<DIDL-Lite>")]
    #[case("a &quot;quoted&quot; title", "a \"quoted\" title")]
    #[case("Tom &amp; Jerry", "Tom & Jerry")]
    #[case("&amp;lt;", "&lt;")]
    #[case("&amp;amp;", "&amp;")]
    fn unescape_cases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(unescape_entities(input), expected);
    }

    #[test]
    fn unescape_round_trips_escaped_didl() {
        let didl = r#"<DIDL-Lite><item id="1"><res size="10">http://h/p?a=1&amp;b=2</res></item></DIDL-Lite>"#;
        let escaped = didl
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;");
        assert_eq!(unescape_entities(&escaped), didl);
    }

    #[test]
    fn unescape_is_identity_on_entity_free_text() {
        let text = "<container id=\"64\"><title>Photos</title></container>";
        assert_eq!(unescape_entities(text), text);
        assert_eq!(unescape_entities(&unescape_entities(text)), text);
    }

    #[test]
    fn strip_namespaces_basic() {
        let input = "<dc:title>Song</dc:title><upnp:class>object.item</upnp:class>";
        assert_eq!(
            strip_namespaces(input),
            "<title>Song</title><class>object.item</class>"
        );
    }

    #[test]
    fn strip_namespaces_keeps_attributes() {
        let input = r#"<container upnp:id="64" parentID="0">x</container>"#;
        assert_eq!(
            strip_namespaces(input),
            r#"<container id="64" parentID="0">x</container>"#
        );
    }

    #[test]
    fn strip_namespaces_drops_xmlns_declarations() {
        let input = r#"<DIDL-Lite xmlns="urn:x" xmlns:dc="urn:dc"><dc:title>t</dc:title></DIDL-Lite>"#;
        assert_eq!(
            strip_namespaces(input),
            "<DIDL-Lite><title>t</title></DIDL-Lite>"
        );
    }

    #[test]
    fn strip_namespaces_passes_declaration_through() {
        let input = r#"<?xml version="1.0"?><a:b>t</a:b>"#;
        assert_eq!(strip_namespaces(input), r#"<?xml version="1.0"?><b>t</b>"#);
    }

    #[test]
    fn strip_namespaces_leaves_values_and_text_alone() {
        let input = r#"<res protocolInfo="http-get:*:image/jpeg:*">http://10.0.0.1/a:b.jpg</res>"#;
        assert_eq!(strip_namespaces(input), input);
    }

    #[test]
    fn strip_namespaces_self_closing() {
        let input = r#"<upnp:albumArtURI dlna:profileID="JPEG_TN"/>"#;
        assert_eq!(
            strip_namespaces(input),
            r#"<albumArtURI profileID="JPEG_TN"/>"#
        );
    }
}
