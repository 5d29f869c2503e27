//! Request dispatch.
//!
//! | Method | Path                  | Handler                          |
//! |--------|-----------------------|----------------------------------|
//! | GET    | `/`, `/articles`      | article list                     |
//! | GET    | `/article/{slug}`     | article detail (counts a view)   |
//! | GET    | `/404`                | not-found page                   |
//! | PATCH  | `/api/article/update` | admin metadata update            |
//! | GET    | `/api/greeting`       | visitor greeting                 |
//! | GET    | `/{feed.path}`        | rss feed, when enabled           |
//!
//! Unknown paths redirect to `/404`; known paths with another method get
//! `405`.

use crate::{
    article::{self, ReadError, UpdateError},
    auth::{HeaderIdentity, IdentityResolver},
    config::SiteConfig,
    greeting::{self, GeoLocator, IpApiClient},
    http::{HttpRequest, HttpResponse, Method, NOT_FOUND_PATH},
    log,
    render,
    store::{PostStore, SqliteStore},
};
use anyhow::{Context, Result};
use serde_json::json;
use std::{borrow::Cow, sync::Arc};

/// Generic body of every 500 response.
const INTERNAL_ERROR: &str = "Something went wrong.";

/// Which handler a path belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Route<'a> {
    List,
    Article(Cow<'a, str>),
    NotFound,
    Update,
    Greeting,
    Feed,
}

impl Route<'_> {
    fn method(&self) -> Method {
        match self {
            Route::Update => Method::Patch,
            _ => Method::Get,
        }
    }
}

/// Everything a request handler needs.
pub struct App {
    config: Arc<SiteConfig>,
    store: Box<dyn PostStore>,
    identity: Box<dyn IdentityResolver>,
    locator: Box<dyn GeoLocator>,
}

impl App {
    pub fn new(
        config: Arc<SiteConfig>,
        store: Box<dyn PostStore>,
        identity: Box<dyn IdentityResolver>,
        locator: Box<dyn GeoLocator>,
    ) -> Self {
        Self {
            config,
            store,
            identity,
            locator,
        }
    }

    /// Production wiring: SQLite store, header identity, ipapi client.
    pub fn open(config: Arc<SiteConfig>) -> Result<Self> {
        let store = SqliteStore::open(&config.database.path).with_context(|| {
            format!("Failed to open database {}", config.database.path.display())
        })?;
        let identity = HeaderIdentity::new(
            config.admin.header.clone(),
            config.serve.trusted_proxies.clone(),
        );
        let locator = IpApiClient::new(&config.greeting.endpoint)?;

        Ok(Self::new(
            config,
            Box::new(store),
            Box::new(identity),
            Box::new(locator),
        ))
    }

    /// Handle one request. Never fails; errors become responses.
    pub fn handle(&self, request: &HttpRequest) -> HttpResponse {
        let Some(route) = self.route(request.path()) else {
            return HttpResponse::not_found_redirect();
        };
        if request.method != route.method() {
            return HttpResponse::method_not_allowed();
        }

        match route {
            Route::List => self.list(),
            Route::Article(slug) => self.article(&slug),
            Route::NotFound => {
                HttpResponse::html(404, render::render_not_found(&self.config))
            }
            Route::Update => self.update(request),
            Route::Greeting => self.greeting(request),
            Route::Feed => self.feed(),
        }
    }

    fn route<'a>(&self, path: &'a str) -> Option<Route<'a>> {
        let route = match path {
            "/" | "/articles" => Route::List,
            NOT_FOUND_PATH => Route::NotFound,
            "/api/article/update" => Route::Update,
            render::GREETING_ENDPOINT => Route::Greeting,
            // `/article` and `/article/` carry an empty slug
            "/article" => Route::Article(Cow::Borrowed("")),
            _ => {
                if let Some(slug) = path.strip_prefix(render::ARTICLE_PREFIX) {
                    let slug = urlencoding::decode(slug).unwrap_or(Cow::Borrowed(slug));
                    Route::Article(slug)
                } else if self.config.feed.enable
                    && path.strip_prefix('/') == Some(self.config.feed.path.as_str())
                {
                    Route::Feed
                } else {
                    return None;
                }
            }
        };
        Some(route)
    }

    fn list(&self) -> HttpResponse {
        match article::list_articles(self.store.as_ref()) {
            Ok(posts) => HttpResponse::html(200, render::render_list(&self.config, &posts)),
            Err(err) => internal_error(&err),
        }
    }

    fn article(&self, slug: &str) -> HttpResponse {
        let words_per_minute = self.config.render.words_per_minute;
        match article::read_article(self.store.as_ref(), slug, words_per_minute) {
            Ok(view) => HttpResponse::html(200, render::render_article(&self.config, &view)),
            Err(ReadError::NotFound) => HttpResponse::not_found_redirect(),
            Err(ReadError::Store(err)) => internal_error(&err),
        }
    }

    fn update(&self, request: &HttpRequest) -> HttpResponse {
        let identity = self.identity.resolve(request);
        let result = article::update_article(
            self.store.as_ref(),
            identity.as_deref(),
            self.config.admin.id.as_deref(),
            &request.body,
        );

        match result {
            Ok(()) => HttpResponse::json(200, &json!({ "status": 200 })),
            Err(UpdateError::Unauthorized) => HttpResponse::text(401, "Unauthorized"),
            Err(err) => internal_error(&err),
        }
    }

    fn greeting(&self, request: &HttpRequest) -> HttpResponse {
        if !self.config.greeting.enable {
            return HttpResponse::no_content();
        }
        let visitor = request.client_ip(&self.config.serve.trusted_proxies);
        match greeting::greet_visitor(self.locator.as_ref(), visitor) {
            Some(message) => HttpResponse::json(200, &json!({ "message": message })),
            None => HttpResponse::no_content(),
        }
    }

    fn feed(&self) -> HttpResponse {
        let xml = article::list_articles(self.store.as_ref())
            .map_err(anyhow::Error::from)
            .and_then(|posts| article::build_feed(&self.config, &posts));
        match xml {
            Ok(xml) => HttpResponse::xml(xml),
            Err(err) => internal_error(&err),
        }
    }
}

fn internal_error(err: &dyn std::fmt::Display) -> HttpResponse {
    log!("error"; "{err}");
    HttpResponse::json(500, INTERNAL_ERROR)
}
