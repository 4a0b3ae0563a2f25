//! YouTube recording links.

use std::sync::LazyLock;

use regex::Regex;

static SHORT_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"youtu\.be/([a-zA-Z0-9_-]+)").expect("valid regex"));
static WATCH_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"youtube\.com/watch\?v=([a-zA-Z0-9_-]+)").expect("valid regex"));

/// Extract an embeddable URL from a `youtu.be/<id>` or
/// `youtube.com/watch?v=<id>` link. Any other URL yields `None`.
pub fn youtube_embed_url(url: &str) -> Option<String> {
    [&*SHORT_LINK, &*WATCH_LINK]
        .into_iter()
        .find_map(|re| re.captures(url))
        .map(|caps| format!("https://www.youtube.com/embed/{}", &caps[1]))
}
