//! Camel-case helpers for fragment and artifact names.

/// Upper-case the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character.
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `camel_merge("jvm", "release") == "jvmRelease"`; blank sides are dropped.
pub fn camel_merge(base: &str, other: &str) -> String {
    if base.trim().is_empty() {
        other.to_string()
    } else if other.trim().is_empty() {
        base.to_string()
    } else {
        format!("{base}{}", capitalize(other))
    }
}

/// Join words into one lower camel-case identifier.
pub fn camel_join<'a>(words: impl IntoIterator<Item = &'a str>) -> String {
    let joined = words
        .into_iter()
        .fold(String::new(), |acc, word| camel_merge(&acc, word));
    decapitalize(&joined)
}
