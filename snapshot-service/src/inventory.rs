//! Filtering of raw subvolume listings down to test snapshots.

/// Filters a raw subvolume listing down to test snapshots.
///
/// Keeps the entries containing the `prefix` token and joins each onto
/// `root` to form a full path. Output order follows input order; no sorting
/// is applied.
///
/// Note that this is a substring match, not a strict prefix match: an entry
/// containing the token anywhere in its path will be kept. This matches the
/// established behavior of the harness and is relied upon by its cleanup
/// sweep, so it is kept as-is.
pub fn filter_test_snapshots(entries: &[String], prefix: &str, root: &str) -> Vec<String> {
    let root = root.trim_end_matches('/');

    entries
        .iter()
        .filter(|entry| entry.contains(prefix))
        .map(|entry| format!("{root}/{entry}"))
        .collect()
}
