//! Article flows on top of the post store.
//!
//! - [`list`]: published index, newest first
//! - [`reader`]: detail page with view count, reading time and navigation
//! - [`update`]: admin-only metadata edits
//! - [`feed`]: rss channel of the published index

pub mod feed;
pub mod list;
pub mod reader;
pub mod reading;
pub mod update;

pub use feed::build_feed;
pub use list::list_articles;
pub use reader::{ArticleView, ReadError, read_article};
pub use update::{UpdateError, update_article};

#[cfg(test)]
pub(crate) mod tests {
    use crate::store::{NewPost, PostStore, SqliteStore};
    use chrono::{DateTime, TimeZone, Utc};

    pub fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 9, 30, 0).unwrap()
    }

    /// alpha (day 1), draft (day 2, unpublished), beta (day 3, 500 words),
    /// gamma (day 5).
    pub fn seeded() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        let posts = [
            ("alpha", 1, true, "short body".to_string()),
            ("draft", 2, false, "not yet".to_string()),
            ("beta", 3, true, vec!["word"; 500].join(" ")),
            ("gamma", 5, true, "first paragraph\n\nsecond <paragraph>".to_string()),
        ];
        for (slug, day, published, content) in posts {
            let mut title = slug.to_string();
            title[..1].make_ascii_uppercase();
            store
                .insert(&NewPost {
                    description: format!("About {slug}"),
                    tag: "notes".into(),
                    published,
                    created_at: at(day),
                    ..NewPost::new(slug, title, content)
                })
                .unwrap();
        }
        store
    }
}
