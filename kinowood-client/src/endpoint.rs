//! Backend endpoint naming
//!
//! The backend serves video either directly or through a proxy script. Both the
//! detail-payload rewrite and playback URL construction go through this module
//! so the proxy name lives in one place.

use crate::query::encode_component;

/// Script name the backend uses for direct video serving.
pub const DIRECT_ENDPOINT: &str = "kinowood.php";

/// Script name of the playback proxy.
pub const PROXY_ENDPOINT: &str = "proxy.php";

/// Replace every mention of the direct-serve script with the proxy script.
#[must_use]
pub fn rewrite_direct_endpoint(url: &str) -> String {
    url.replace(DIRECT_ENDPOINT, PROXY_ENDPOINT)
}

/// Build a proxy playback URL from stream identifiers and a quality label.
///
/// `api_base` is concatenated verbatim and is expected to end with `/`.
#[must_use]
pub fn proxy_url(api_base: &str, group_id: &str, video_id: &str, quality: &str) -> String {
    format!(
        "{api_base}{PROXY_ENDPOINT}?group_id={}&video_id={}&quality={}",
        encode_component(group_id),
        encode_component(video_id),
        encode_component(quality),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_direct_endpoint() {
        assert_eq!(
            rewrite_direct_endpoint("https://kinowood.ru/kinowood.php?group_id=1&video_id=2"),
            "https://kinowood.ru/proxy.php?group_id=1&video_id=2"
        );
        assert_eq!(
            rewrite_direct_endpoint("https://cdn.example.com/v.mp4"),
            "https://cdn.example.com/v.mp4"
        );
    }

    #[test]
    fn test_proxy_url() {
        assert_eq!(
            proxy_url("https://kinowood.ru/", "42", "99", "1080"),
            "https://kinowood.ru/proxy.php?group_id=42&video_id=99&quality=1080"
        );
    }

    #[test]
    fn test_proxy_url_encodes_values() {
        assert_eq!(
            proxy_url("https://kinowood.ru/", "a b", "x&y", "720"),
            "https://kinowood.ru/proxy.php?group_id=a%20b&video_id=x%26y&quality=720"
        );
    }
}
