/// Compares two strings for equality ignoring case.
///
/// Registry urls are matched this way when deciding whether two
/// entries refer to the same endpoint. Two empty strings are equal.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Returns `url` with exactly one guaranteed trailing `/`.
pub fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_ignore_case() {
        assert!(eq_ignore_case("taobao", "TAOBAO"));
        assert!(!eq_ignore_case("jd", "tb"));
        assert!(!eq_ignore_case("taobao", ""));
        assert!(eq_ignore_case("", ""));
        assert!(eq_ignore_case(
            "https://Registry.NPMJS.org/",
            "https://registry.npmjs.org/"
        ));
    }

    #[test]
    fn test_with_trailing_slash() {
        assert_eq!(with_trailing_slash("http://x.test"), "http://x.test/");
        assert_eq!(with_trailing_slash("http://x.test/"), "http://x.test/");
    }
}
