//! Link synthesis from ad-hoc URL fields

use crate::config::ApiHost;
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

static URL_SUFFIX: OnceLock<Regex> = OnceLock::new();

/// Relation name for a link-producing field, `None` for ordinary fields
///
/// `blog` links as `blog`; `url` links as `self` when `href` is served by
/// the API host and as `html` otherwise (including when `href` does not
/// parse); `<relation>_url` links as `<relation>`.
pub fn link_relation<'k>(key: &'k str, href: &str, api_host: &ApiHost) -> Option<Cow<'k, str>> {
    match key {
        "blog" => Some(Cow::Borrowed("blog")),
        "url" => Some(Cow::Borrowed(url_relation(href, api_host))),
        _ => URL_SUFFIX
            .get_or_init(|| Regex::new(r"^(.+)_url$").unwrap())
            .captures(key)
            .and_then(|caps| caps.get(1))
            .map(|relation| Cow::Borrowed(relation.as_str())),
    }
}

fn url_relation(href: &str, api_host: &ApiHost) -> &'static str {
    match api_host.owns(href) {
        Ok(true) => "self",
        Ok(false) => "html",
        Err(e) => {
            log::debug!("Classifying url field as external: {}", e);
            "html"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> ApiHost {
        ApiHost::parse("https://api.example.com").unwrap()
    }

    #[test]
    fn test_url_on_api_host_is_self() {
        assert_eq!(
            link_relation("url", "https://api.example.com/x", &host()).as_deref(),
            Some("self")
        );
    }

    #[test]
    fn test_url_elsewhere_is_html() {
        assert_eq!(
            link_relation("url", "https://example.com/x", &host()).as_deref(),
            Some("html")
        );
    }

    #[test]
    fn test_malformed_url_falls_back_to_html() {
        assert_eq!(link_relation("url", "not a url", &host()).as_deref(), Some("html"));
        assert_eq!(link_relation("url", "/users/x", &host()).as_deref(), Some("html"));
    }

    #[test]
    fn test_suffix_relation() {
        assert_eq!(link_relation("blog_url", "http://b", &host()).as_deref(), Some("blog"));
        assert_eq!(
            link_relation("avatar_url", "http://b", &host()).as_deref(),
            Some("avatar")
        );
        assert_eq!(
            link_relation("followers_url", "http://b", &host()).as_deref(),
            Some("followers")
        );
    }

    #[test]
    fn test_blog_is_a_link() {
        assert_eq!(link_relation("blog", "http://b", &host()).as_deref(), Some("blog"));
    }

    #[test]
    fn test_ordinary_fields() {
        assert!(link_relation("login", "octocat", &host()).is_none());
        assert!(link_relation("_url", "x", &host()).is_none());
        assert!(link_relation("url_template", "x", &host()).is_none());
    }
}
