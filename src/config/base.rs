//! `[base]` section: who writes the blog and where it lives.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in jotter.toml.
///
/// ```toml
/// [base]
/// title = "Field Notes"
/// description = "Short pieces on whatever I'm reading."
/// author = "Robin"
/// url = "https://notes.example"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    pub title: String,

    /// Shown under the title on the article list.
    pub description: String,

    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Paired with `author` in rss items.
    #[serde(default = "defaults::base::email")]
    #[educe(Default = defaults::base::email())]
    pub email: String,

    /// Public origin for absolute links; required by the feed.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Open Graph image for pages without one of their own.
    #[serde(default = "defaults::base::avatar")]
    #[educe(Default = defaults::base::avatar())]
    pub avatar: String,

    /// Footer text; the author name is shown when empty.
    #[serde(default)]
    pub copyright: String,
}

impl BaseConfig {
    /// `url` without its trailing slash, ready for joining paths.
    pub fn origin(&self) -> Option<&str> {
        self.url.as_deref().map(|url| url.trim_end_matches('/'))
    }

    /// The page's own image, else the avatar.
    pub fn og_image<'a>(&'a self, image: Option<&'a str>) -> &'a str {
        image.filter(|image| !image.is_empty()).unwrap_or(&self.avatar)
    }

    pub fn footer(&self) -> &str {
        if self.copyright.is_empty() {
            &self.author
        } else {
            &self.copyright
        }
    }
}
