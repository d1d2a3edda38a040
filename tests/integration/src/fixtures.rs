//! Test fixtures: a small host application with two reactable entity types

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use parking_lot::Mutex;
use reaction_core::traits::{Reactable, ReactableLoader, ReactableRegistry, Reactor, RepoResult};
use reaction_core::value_objects::EntityId;

/// Counter for unique test data
static COUNTER: AtomicI64 = AtomicI64::new(0);

/// Get an id that does not repeat across test runs sharing a database
pub fn unique_id() -> i64 {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);
    millis * 1000 + COUNTER.fetch_add(1, Ordering::SeqCst) % 1000
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: i64,
    pub title: String,
}

impl Reactable for Article {
    const REACTABLE_TYPE: &'static str = "article";

    fn reactable_id(&self) -> EntityId {
        EntityId::new(self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: i64,
    pub url: String,
}

impl Reactable for Video {
    const REACTABLE_TYPE: &'static str = "video";

    fn reactable_id(&self) -> EntityId {
        EntityId::new(self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: i64,
    pub name: String,
}

impl Reactor for Member {
    fn reactor_id(&self) -> EntityId {
        EntityId::new(self.id)
    }
}

/// Host-side union returned by the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Article(Article),
    Video(Video),
}

/// In-memory host storage for articles and videos
#[derive(Default)]
pub struct Catalog {
    articles: Mutex<HashMap<i64, Article>>,
    videos: Mutex<HashMap<i64, Video>>,
}

impl Catalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_article(&self, title: &str) -> Article {
        let article = Article {
            id: unique_id(),
            title: title.to_string(),
        };
        self.articles.lock().insert(article.id, article.clone());
        article
    }

    pub fn add_video(&self, url: &str) -> Video {
        let video = Video {
            id: unique_id(),
            url: url.to_string(),
        };
        self.videos.lock().insert(video.id, video.clone());
        video
    }

    pub fn remove_article(&self, id: i64) -> Option<Article> {
        self.articles.lock().remove(&id)
    }
}

struct ArticleLoader(Arc<Catalog>);

#[async_trait]
impl ReactableLoader<Content> for ArticleLoader {
    async fn load(&self, id: EntityId) -> RepoResult<Option<Content>> {
        let articles = self.0.articles.lock();
        Ok(articles.get(&id.into_inner()).cloned().map(Content::Article))
    }
}

struct VideoLoader(Arc<Catalog>);

#[async_trait]
impl ReactableLoader<Content> for VideoLoader {
    async fn load(&self, id: EntityId) -> RepoResult<Option<Content>> {
        let videos = self.0.videos.lock();
        Ok(videos.get(&id.into_inner()).cloned().map(Content::Video))
    }
}

/// Registry resolving `article` and `video` references against `catalog`
pub fn content_registry(catalog: &Arc<Catalog>) -> ReactableRegistry<Content> {
    ReactableRegistry::<Content>::new()
        .register_type::<Article>(Arc::new(ArticleLoader(Arc::clone(catalog))))
        .register_type::<Video>(Arc::new(VideoLoader(Arc::clone(catalog))))
}

/// A member with a fresh id
pub fn member(name: &str) -> Member {
    Member {
        id: unique_id(),
        name: name.to_string(),
    }
}
