//! HTML entity handling.
//!
//! Storage format uses HTML named entities (`&nbsp;`, `&mdash;`) that an XML
//! reader rejects. They are rewritten to characters before parsing; the five
//! XML entities are left for the reader.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static NAMED_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&([a-zA-Z][a-zA-Z0-9]*);").expect("invalid entity regex"));

static ANY_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z][a-zA-Z0-9]*);").expect("invalid entity regex")
});

/// Replace named HTML entities with characters, keeping XML ones.
pub(crate) fn convert_html_entities(html: &str) -> Cow<'_, str> {
    NAMED_ENTITY.replace_all(html, |caps: &regex::Captures| {
        html_entity(&caps[1]).map_or_else(|| caps[0].to_owned(), str::to_owned)
    })
}

/// Replace every recognised entity, XML and numeric ones included.
pub(crate) fn decode_all_entities(text: &str) -> Cow<'_, str> {
    ANY_ENTITY.replace_all(text, |caps: &regex::Captures| decode_entity(&caps[1]))
}

/// Decode one entity reference body (`amp`, `#38`, `#x26`).
///
/// Unknown references are returned in their original `&name;` form.
pub(crate) fn decode_entity(entity: &str) -> String {
    let decoded = match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        s if s.starts_with("#x") || s.starts_with("#X") => {
            u32::from_str_radix(&s[2..], 16).ok().and_then(char::from_u32)
        }
        s if s.starts_with('#') => s[1..].parse::<u32>().ok().and_then(char::from_u32),
        s => return html_entity(s).map_or_else(|| format!("&{entity};"), str::to_owned),
    };
    decoded.map_or_else(|| format!("&{entity};"), String::from)
}

fn html_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "nbsp" => "\u{00a0}",
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "thinsp" => "\u{2009}",
        "zwj" => "\u{200d}",
        "zwnj" => "\u{200c}",
        "shy" => "\u{00ad}",

        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "bdquo" => "\u{201e}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "sbquo" => "\u{201a}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",
        "bull" => "\u{2022}",
        "hellip" => "\u{2026}",
        "middot" => "\u{00b7}",

        "rarr" => "\u{2192}",
        "larr" => "\u{2190}",
        "harr" => "\u{2194}",
        "uarr" => "\u{2191}",
        "darr" => "\u{2193}",
        "rArr" => "\u{21d2}",
        "lArr" => "\u{21d0}",

        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "ne" => "\u{2260}",
        "plusmn" => "\u{00b1}",
        "times" => "\u{00d7}",
        "divide" => "\u{00f7}",
        "minus" => "\u{2212}",
        "deg" => "\u{00b0}",
        "micro" => "\u{00b5}",

        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",
        "para" => "\u{00b6}",
        "sect" => "\u{00a7}",
        "dagger" => "\u{2020}",
        "Dagger" => "\u{2021}",

        "euro" => "\u{20ac}",
        "pound" => "\u{00a3}",
        "yen" => "\u{00a5}",
        "cent" => "\u{00a2}",

        "frac14" => "\u{00bc}",
        "frac12" => "\u{00bd}",
        "frac34" => "\u{00be}",
        "sup1" => "\u{00b9}",
        "sup2" => "\u{00b2}",
        "sup3" => "\u{00b3}",

        "auml" => "\u{00e4}",
        "ouml" => "\u{00f6}",
        "uuml" => "\u{00fc}",
        "Auml" => "\u{00c4}",
        "Ouml" => "\u{00d6}",
        "Uuml" => "\u{00dc}",
        "szlig" => "\u{00df}",
        "eacute" => "\u{00e9}",
        "egrave" => "\u{00e8}",
        "aacute" => "\u{00e1}",
        "agrave" => "\u{00e0}",
        "ccedil" => "\u{00e7}",
        "ntilde" => "\u{00f1}",
        "check" => "\u{2713}",

        _ => return None,
    })
}
