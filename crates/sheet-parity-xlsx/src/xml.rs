//! Attribute helpers shared by the part readers

use quick_xml::events::BytesStart;

/// Unescaped value of the attribute whose local name is `key`
///
/// Namespace prefixes are ignored, so `r:id` matches `b"id"`.
pub(crate) fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

/// Attribute parsed with `FromStr`; unparseable values read as absent
pub(crate) fn attr_parse<T: std::str::FromStr>(e: &BytesStart<'_>, key: &[u8]) -> Option<T> {
    attr_value(e, key).and_then(|v| v.trim().parse().ok())
}

/// OOXML boolean attribute ("1"/"true" or "0"/"false")
pub(crate) fn attr_bool(e: &BytesStart<'_>, key: &[u8]) -> Option<bool> {
    attr_value(e, key).and_then(|v| parse_bool(&v))
}

pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s.trim() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
