use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

pub const PLACEHOLDER_THUMBNAIL_URL: &str = "https://grasshopperdocs.com/images/search.png";

const MARKETPLACE_APP_URL: &str = "https://www.food4rhino.com/en/app/";
const MARKETPLACE_SEARCH_URL: &str = "https://www.food4rhino.com/en/search?search_api_fulltext=";

const HTML_SUFFIX: &str = ".html";

static HYPHEN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*-\s*").expect("hyphen pattern to compile"));
static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").expect("alphanumeric pattern to compile"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern to compile"));

/// Stable item id: last path segment of the help link, percent-decoded, minus
/// a trailing `.html` in any case. `None` when nothing is left.
pub fn derive_id(help_link: &str) -> Option<String> {
    let url = Url::parse(help_link).ok()?;
    let file = url.path_segments()?.next_back()?;

    if file.is_empty() {
        return None;
    }

    let decoded = urlencoding::decode(file).ok()?;
    let id = strip_html_suffix(&decoded);

    (!id.is_empty()).then(|| id.to_string())
}

fn strip_html_suffix(file: &str) -> &str {
    let Some(split) = file.len().checked_sub(HTML_SUFFIX.len()) else {
        return file;
    };

    match file.get(split..) {
        Some(suffix) if suffix.eq_ignore_ascii_case(HTML_SUFFIX) => &file[..split],
        _ => file,
    }
}

/// Lowercase search tokens from the free-text category, in order of appearance.
pub fn tags_from_category(category: &str) -> Vec<String> {
    let lowered = category.to_lowercase().replace(['&', '/'], " ");
    let spaced = HYPHEN_SEPARATOR.replace_all(&lowered, " ");
    let alphanumeric = NON_ALPHANUMERIC.replace_all(&spaced, " ");
    let collapsed = WHITESPACE_RUN.replace_all(&alphanumeric, " ");

    collapsed
        .trim()
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

pub fn marketplace_app_url(slug: &str) -> String {
    format!("{MARKETPLACE_APP_URL}{}", urlencoding::encode(slug))
}

pub fn marketplace_search_url(name: &str) -> String {
    format!("{MARKETPLACE_SEARCH_URL}{}", urlencoding::encode(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_from_html_file() {
        assert_eq!(
            derive_id("https://x/y/MyPlugin.html").as_deref(),
            Some("MyPlugin")
        );
        assert_eq!(
            derive_id("https://www.grasshopperdocs.com/addons/ladybug.HTML").as_deref(),
            Some("ladybug")
        );
    }

    #[test]
    fn id_is_percent_decoded() {
        assert_eq!(
            derive_id("https://www.grasshopperdocs.com/addons/Human%20UI.html").as_deref(),
            Some("Human UI")
        );
    }

    #[test]
    fn id_without_html_suffix_is_kept_whole() {
        assert_eq!(
            derive_id("https://docs.example.com/plugins/kangaroo2").as_deref(),
            Some("kangaroo2")
        );
        assert_eq!(
            derive_id("https://docs.example.com/a.html/index.htm").as_deref(),
            Some("index.htm")
        );
    }

    #[test]
    fn id_ignores_query_and_fragment() {
        assert_eq!(
            derive_id("https://x/y/Pufferfish.html?ref=feed#top").as_deref(),
            Some("Pufferfish")
        );
    }

    #[test]
    fn no_final_segment_yields_nothing() {
        assert_eq!(derive_id("https://x/y/"), None);
        assert_eq!(derive_id("https://x"), None);
        assert_eq!(derive_id("https://x/.html"), None);
        assert_eq!(derive_id("https://x/y/.HTML"), None);
    }

    #[test]
    fn unparseable_link_yields_nothing() {
        assert_eq!(derive_id("not a url"), None);
        assert_eq!(derive_id("/addons/relative.html"), None);
        assert_eq!(derive_id("mailto:someone@example.com"), None);
    }

    #[test]
    fn malformed_escape_yields_nothing() {
        assert_eq!(derive_id("https://x/y/%FF%FE.html"), None);
    }

    #[test]
    fn suffix_strip_is_byte_safe() {
        assert_eq!(strip_html_suffix("ü"), "ü");
        assert_eq!(strip_html_suffix("βeta.Html"), "βeta");
        assert_eq!(strip_html_suffix("page.html.html"), "page.html");
    }

    #[test]
    fn tags_from_mixed_separators() {
        assert_eq!(
            tags_from_category("Architecture & Design / BIM"),
            vec!["architecture", "design", "bim"]
        );
        assert_eq!(
            tags_from_category("Geometry - Mesh"),
            vec!["geometry", "mesh"]
        );
    }

    #[test]
    fn tags_drop_punctuation_and_blanks() {
        assert_eq!(
            tags_from_category("  Integration - Excel (I/O), CSV!  "),
            vec!["integration", "excel", "i", "o", "csv"]
        );
        assert_eq!(tags_from_category("Math-Graphs"), vec!["math", "graphs"]);
        assert!(tags_from_category("").is_empty());
        assert!(tags_from_category(" - & / ").is_empty());
    }

    #[test]
    fn marketplace_urls_encode_their_input() {
        assert_eq!(
            marketplace_app_url("human-ui"),
            "https://www.food4rhino.com/en/app/human-ui"
        );
        assert_eq!(
            marketplace_search_url("Human UI"),
            "https://www.food4rhino.com/en/search?search_api_fulltext=Human%20UI"
        );
        assert!(Url::parse(&marketplace_search_url("A&B / C?")).is_ok());
    }
}
