use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::with_timeout;
use crate::catalog::AnimeDetail;
use crate::error::Result;
use crate::repository::AnimeRepository;

pub struct GetAnimeDetail {
    anime_repository: Arc<dyn AnimeRepository>,
    request_timeout: Duration,
}

impl GetAnimeDetail {
    pub fn new(anime_repository: Arc<dyn AnimeRepository>, request_timeout: Duration) -> Self {
        Self {
            anime_repository,
            request_timeout,
        }
    }

    pub async fn execute(&self, anime_id: u64) -> Result<AnimeDetail> {
        let detail = with_timeout(
            self.request_timeout,
            self.anime_repository.get_anime_detail(anime_id),
        )
        .await?;
        debug!(anime_id, trailers = detail.trailers.len(), "Loaded anime detail");
        Ok(detail)
    }
}
