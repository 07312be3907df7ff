//! Log sanitization
//!
//! Response bodies can be large (a zone listing) and echo record values back,
//! so logs and error details only ever carry a short single-line prefix.

/// Characters of a body kept in logs.
const MAX_LOGGED_CHARS: usize = 200;

/// Render `body` for a log line.
///
/// Control characters (newlines of pretty-printed JSON included) become
/// spaces. Anything past [`MAX_LOGGED_CHARS`] is cut and replaced by the total
/// length.
pub fn truncate_for_log(body: &str) -> String {
    let flat: String = body
        .trim()
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    let total = flat.chars().count();
    if total <= MAX_LOGGED_CHARS {
        return flat;
    }

    let head: String = flat.chars().take(MAX_LOGGED_CHARS).collect();
    format!("{head}... ({total} chars)")
}
