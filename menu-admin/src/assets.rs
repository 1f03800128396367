//! Image URL resolution

/// Resolve an image path returned by the backend against the asset origin.
///
/// Absolute `http(s)` URLs pass through; relative paths such as
/// `/uploads/x.png` are joined onto `asset_base`. Empty paths yield `None`.
pub fn resolve_asset_url(asset_base: &str, path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }
    Some(format!(
        "{}/{}",
        asset_base.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

/// File name component of a stored image URL, as the delete endpoint expects
pub fn asset_file_name(url: &str) -> Option<&str> {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    without_query
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
}
