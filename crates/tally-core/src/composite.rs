//! Composite key codec
//!
//! A composite key packs a namespace and an ordered list of components into a
//! single state key so that all keys sharing a leading set of components form
//! one contiguous range:
//!
//! ```text
//! U+0000 namespace U+0000 component_0 U+0000 ... component_n U+0000
//! ```
//!
//! The leading delimiter keeps composite keys out of the simple-key space
//! (simple keys may not start with U+0000). `U+10FFFF` is reserved as the
//! exclusive upper bound of partial-key range scans, so neither character may
//! appear inside a namespace or component.

/// Separator between namespace and components; also the leading byte.
pub const COMPOSITE_KEY_DELIMITER: char = '\u{0}';

/// Highest Unicode scalar value, used to close partial-key ranges.
pub const MAX_UNICODE_RUNE: char = '\u{10FFFF}';

/// Errors raised while encoding or decoding composite keys
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompositeKeyError {
    /// Namespace was empty
    #[error("composite key namespace must not be empty")]
    EmptyNamespace,

    /// A namespace or component contains a reserved character
    #[error("{field} contains reserved character U+{code:04X}")]
    ReservedCharacter {
        /// Which input carried the character (`namespace` or `component N`)
        field: String,
        /// Offending code point
        code: u32,
    },

    /// Input is not a well-formed composite key
    #[error("not a composite key: {key:?}")]
    Malformed {
        /// The rejected key
        key: String,
    },
}

fn validate_segment(field: impl FnOnce() -> String, segment: &str) -> Result<(), CompositeKeyError> {
    if let Some(c) = segment
        .chars()
        .find(|c| *c == COMPOSITE_KEY_DELIMITER || *c == MAX_UNICODE_RUNE)
    {
        return Err(CompositeKeyError::ReservedCharacter {
            field: field(),
            code: c as u32,
        });
    }
    Ok(())
}

/// Build a composite key from a namespace and ordered components.
pub fn make_composite_key<S: AsRef<str>>(
    namespace: &str,
    parts: &[S],
) -> Result<String, CompositeKeyError> {
    if namespace.is_empty() {
        return Err(CompositeKeyError::EmptyNamespace);
    }
    validate_segment(|| "namespace".to_string(), namespace)?;

    let capacity = 2 + namespace.len() + parts.iter().map(|p| p.as_ref().len() + 1).sum::<usize>();
    let mut key = String::with_capacity(capacity);
    key.push(COMPOSITE_KEY_DELIMITER);
    key.push_str(namespace);
    key.push(COMPOSITE_KEY_DELIMITER);

    for (index, part) in parts.iter().enumerate() {
        let part = part.as_ref();
        validate_segment(|| format!("component {index}"), part)?;
        key.push_str(part);
        key.push(COMPOSITE_KEY_DELIMITER);
    }

    Ok(key)
}

/// Decompose a composite key into its namespace and components.
pub fn split_composite_key(key: &str) -> Result<(String, Vec<String>), CompositeKeyError> {
    let malformed = || CompositeKeyError::Malformed {
        key: key.to_string(),
    };

    let body = key
        .strip_prefix(COMPOSITE_KEY_DELIMITER)
        .and_then(|rest| rest.strip_suffix(COMPOSITE_KEY_DELIMITER))
        .ok_or_else(malformed)?;

    let mut segments = body.split(COMPOSITE_KEY_DELIMITER);
    let namespace = match segments.next() {
        Some(ns) if !ns.is_empty() => ns.to_string(),
        _ => return Err(malformed()),
    };

    Ok((namespace, segments.map(str::to_string).collect()))
}

/// Half-open `[start, end)` key range covering every composite key that
/// begins with the given namespace and leading components.
pub fn partial_key_range<S: AsRef<str>>(
    namespace: &str,
    parts: &[S],
) -> Result<(String, String), CompositeKeyError> {
    let start = make_composite_key(namespace, parts)?;
    let mut end = start.clone();
    end.push(MAX_UNICODE_RUNE);
    Ok((start, end))
}

/// Whether a state key lives in the composite-key space.
pub fn is_composite_key(key: &str) -> bool {
    key.starts_with(COMPOSITE_KEY_DELIMITER)
}
