/// Rebases an absolute sandbox path onto the root URL of a file system.
///
/// The root URL normally ends with `/` (e.g. `file:///persistent/`); that separator
/// is dropped before `path` is appended, so `/foo/bar` becomes
/// `file:///persistent/foo/bar`.
pub fn rebase_url(root_url: &str, path: &str) -> String {
    let base = root_url.strip_suffix('/').unwrap_or(root_url);
    format!("{base}{path}")
}
