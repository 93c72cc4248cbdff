//! User identifiers in URL paths.
//!
//! Two separate questions. [`extract_id`] answers "is there a v4 UUID right
//! after `/users/`?"; [`candidate`] answers "did the client put anything
//! there at all?". A path with a candidate but no id carries a malformed id.

/// Literal prefix of every user path.
pub const PREFIX: &str = "/users/";

/// Length of the textual UUID form, `8-4-4-4-12`.
const UUID_LEN: usize = 36;

/// The raw segment right after `/users/`, up to the next `/`.
///
/// `None` when the path is outside `/users/` or the segment is empty.
pub fn candidate(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(PREFIX)?;
    let segment = rest.split('/').next().unwrap_or("");
    (!segment.is_empty()).then_some(segment)
}

/// Returns the UUID that immediately follows `/users/`, ignoring whatever
/// comes after it. `None` when there is no such UUID.
///
/// ```rust
/// use usersvc::users::id::extract_id;
///
/// let id = "0b7e4a4c-5f1d-4c2e-9a3b-1d2e3f4a5b6c";
/// assert_eq!(extract_id(&format!("/users/{id}")), Some(id));
/// assert_eq!(extract_id(&format!("/users/{id}/orders")), Some(id));
/// assert_eq!(extract_id("/users/42"), None);
/// ```
pub fn extract_id(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(PREFIX)?;
    let head = rest.get(..UUID_LEN)?;
    is_uuid_v4(head.as_bytes()).then_some(head)
}

fn is_uuid_v4(b: &[u8]) -> bool {
    if b.len() != UUID_LEN {
        return false;
    }
    b.iter().enumerate().all(|(i, &c)| match i {
        8 | 13 | 18 | 23 => c == b'-',
        14 => c == b'4',
        19 => matches!(c, b'8' | b'9' | b'a' | b'b' | b'A' | b'B'),
        _ => c.is_ascii_hexdigit(),
    })
}
