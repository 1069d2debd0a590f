//! Location resolution.
//!
//! Locations are resolved without any I/O: a part is either the value's
//! own location (empty), a full URL (passed through), an absolute path
//! rooted at the session base, or a path relative to the value itself.

use url::Url;

/// Resolve `part` against a value's base location and own location.
///
/// - an empty part yields `own` unchanged;
/// - a part starting with `http://` or `https://` is returned verbatim;
/// - a part starting with `/` is joined onto the path of `base`;
/// - anything else is joined onto the path of `own`.
///
/// Joining cleans the result path (`..`, `.` and repeated separators are
/// collapsed) and drops any query or fragment carried by the chosen base.
///
/// ```
/// use lpapi::resolve;
///
/// let own = "http://e.c/base/more/foo";
/// assert_eq!(resolve("http://e.c/base/", own, "../bar"), "http://e.c/base/more/bar");
/// assert_eq!(resolve("http://e.c/base/", own, "/bar"), "http://e.c/base/bar");
/// ```
#[must_use]
pub fn resolve(base: &str, own: &str, part: &str) -> String {
    if part.is_empty() {
        return own.to_string();
    }
    if is_absolute_url(part) {
        return part.to_string();
    }

    let chosen = if part.starts_with('/') { base } else { own };

    match Url::parse(chosen) {
        Ok(mut url) if !url.cannot_be_a_base() => {
            let joined = join_paths(url.path(), part);
            url.set_path(&joined);
            url.set_query(None);
            url.set_fragment(None);
            url.to_string()
        }
        _ => join_paths(chosen, part),
    }
}

/// Whether `loc` is a fully qualified HTTP(S) URL.
#[must_use]
pub fn is_absolute_url(loc: &str) -> bool {
    loc.starts_with("http://") || loc.starts_with("https://")
}

fn join_paths(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, true) => String::new(),
        (true, false) => clean_path(right),
        (false, true) => clean_path(left),
        (false, false) => clean_path(&format!("{left}/{right}")),
    }
}

/// Lexically clean a slash-separated path.
fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
