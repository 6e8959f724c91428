//! Option strings
//!
//!     The content of a `[...]` option line or of a macro's brackets is a comma separated list
//!     of `key=value` pairs and shortcuts:
//!
//!         `.name`     appends nothing, sets `role`
//!         `#name`     sets `id`
//!         `%name`     appended, space separated, to `options`
//!         `value`     bound to the next positional key, else to the default key
//!
//!     Double quotes protect commas and `=`. The first value of a key wins. After parsing,
//!     `opts` and `options` always hold the same value.

use crate::adoc::ast::Options;

/// Parse an option string.
///
/// A bare value (no `=`, no shortcut prefix) is bound to `fallbacks[n]` where `n` is the number
/// of entries collected so far, when there is such a fallback, otherwise to `default_key`.
/// With `nested`, the value of `opts`/`options` is itself parsed once more as an option string
/// (bare values going to `opts`) and merged.
pub fn parse_options(raw: &str, default_key: &str, nested: bool, fallbacks: &[&str]) -> Options {
    let mut map = Options::new();
    let mut key = String::new();
    let mut value = String::new();
    let mut quoted = false;
    let mut in_key = true;

    // a trailing ',' forces the last segment to be flushed
    for c in raw.chars().chain(std::iter::once(',')) {
        if c == '"' {
            quoted = !quoted;
        } else if quoted {
            (if in_key { &mut key } else { &mut value }).push(c);
        } else if c == '=' && in_key {
            in_key = false;
        } else if c == ',' {
            let segment_key = key.trim();
            if !segment_key.is_empty() {
                let segment_value = value.trim();
                if segment_value.is_empty()
                    && map.len() < fallbacks.len()
                    && !segment_key.starts_with(['.', '%', '#'])
                {
                    let fallback = fallbacks[map.len()];
                    flush_option(default_key, fallback, segment_key, &mut map);
                } else {
                    flush_option(default_key, segment_key, segment_value, &mut map);
                }
            }
            key.clear();
            value.clear();
            in_key = true;
        } else if in_key {
            key.push(c);
        } else {
            value.push(c);
        }
    }

    if nested {
        let nested_options = map.remove("opts").or_else(|| map.remove("options"));
        if let Some(nested_options) = nested_options {
            let parsed = parse_options(&nested_options, "opts", false, &[]);
            map.merge_under(&parsed);
        }
    }

    if let Some(opts) = map.get("opts").map(str::to_string) {
        map.insert_if_absent("options", opts);
    }
    if let Some(options) = map.get("options").map(str::to_string) {
        map.insert_if_absent("opts", options);
    }
    map
}

fn flush_option(default_key: &str, key: &str, value: &str, map: &mut Options) {
    if !value.is_empty() {
        map.insert_if_absent(key, value);
    } else if let Some(role) = key.strip_prefix('.') {
        map.insert_if_absent("role", role);
    } else if let Some(id) = key.strip_prefix('#') {
        map.insert_if_absent("id", id);
    } else if let Some(flag) = key.strip_prefix('%') {
        let flags = match map.get("options") {
            Some(existing) => format!("{} {}", existing, flag),
            None => flag.to_string(),
        };
        map.insert("options", flags);
    } else {
        map.insert_if_absent(default_key, key);
    }
}

/// Block styles whose first positional value selects a role and a default key for the rest.
const STYLED_BLOCKS: [(&str, Option<&str>, &str); 4] = [
    ("source", None, "language"),
    ("example", Some("exampleblock"), ""),
    ("verse", Some("verseblock"), ""),
    ("quote", Some("quoteblock"), "attribution"),
];

/// Parse the options of a block option line (`macro_type` is `None`) or of a macro.
///
/// `[source,java]` binds `java` to `language`, `[quote,Someone]` sets the `quoteblock` role and
/// an `attribution`. `image` macros bind positional values to `alt`, `width` and `height`. A
/// `link` macro label ending with `^` opens in a new window.
pub fn parse_block_options(raw: &str, macro_type: Option<&str>) -> Options {
    let mut result = by_type(raw.trim(), macro_type);
    if macro_type == Some("link") {
        if let Some(label) = result.get("").and_then(|it| it.strip_suffix('^')) {
            let label = label.to_string();
            result.insert("", label);
            result.insert_if_absent("window", "_blank");
        }
    }
    result
}

fn by_type(raw: &str, macro_type: Option<&str>) -> Options {
    if macro_type == Some("image") {
        return parse_options(raw, "", true, &["alt", "width", "height"]);
    }
    for (style, role, default_key) in STYLED_BLOCKS {
        if raw == style {
            return Options::new();
        }
        if let Some(rest) = raw.strip_prefix(style).and_then(|it| it.strip_prefix(',')) {
            let mut options = Options::new();
            if let Some(role) = role {
                options.insert("role", role);
            }
            options.merge(&parse_options(rest.trim(), default_key, true, &[]));
            return options;
        }
    }
    parse_options(raw, "", true, &[])
}
