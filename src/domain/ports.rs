use crate::domain::model::{Card, Detail, Entry, Status};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn feed_url(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
}

/// Source of the complete, unfiltered feed.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Entry>>;
}

/// The surface the presenter draws on: a status line, a card collection and
/// one detail overlay.
pub trait GalleryView {
    fn set_status(&mut self, status: Status);
    fn clear_gallery(&mut self);
    fn show_cards(&mut self, cards: Vec<Card>);
    fn show_placeholder(&mut self, message: &str);
    fn show_detail(&mut self, detail: Detail);
    fn hide_detail(&mut self);
}
