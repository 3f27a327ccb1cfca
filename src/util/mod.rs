const FAVICON_ENDPOINT: &str = "https://www.google.com/s2/favicons";

/// Site icon for a bookmark, derived from the URL's hostname.
///
/// Returns `None` for anything the URL parser rejects or for URLs without a
/// hostname (e.g. `about:blank`); callers render the generic bookmark glyph
/// instead. This must never fail louder than that.
pub(crate) fn favicon_url(bookmark_url: &str) -> Option<String> {
    let parsed = url::Url::parse(bookmark_url).ok()?;
    let host = parsed.host_str()?;
    Some(format!(
        "{FAVICON_ENDPOINT}?domain={}&sz=16",
        urlencoding::encode(host)
    ))
}

/// Case-normalized search query; `None` means "not searching".
pub(crate) fn normalize_query(raw: &str) -> Option<String> {
    let q = raw.trim().to_lowercase();
    if q.is_empty() {
        None
    } else {
        Some(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favicon_url_uses_hostname() {
        let src = favicon_url("https://foo.example/deep/path?x=1").expect("should resolve");
        assert_eq!(
            src,
            "https://www.google.com/s2/favicons?domain=foo.example&sz=16"
        );
    }

    #[test]
    fn favicon_url_rejects_malformed_urls() {
        assert_eq!(favicon_url("not a url"), None);
        assert_eq!(favicon_url(""), None);
        // Parses, but has no hostname to hand to the icon service.
        assert_eq!(favicon_url("about:blank"), None);
    }

    #[test]
    fn normalize_query_lowercases_and_trims() {
        assert_eq!(normalize_query("  FooBar "), Some("foobar".to_string()));
        assert_eq!(normalize_query("   "), None);
        assert_eq!(normalize_query(""), None);
    }
}
