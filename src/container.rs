use std::sync::Arc;

use tracing::info;

use crate::config::{Backend, Config};
use crate::error::Result;
use crate::remote::{ApiClient, RemoteAnimeRepository};
use crate::repository::{
    AnimeRepository, FakeAnimeRepository, FakeTriviaRepository, FakeUserRepository,
    FavoritesRepository, InMemoryFavorites, TriviaRepository, UserRepository,
};
use crate::state::{AnimeDetailModel, FavoritesModel, HomeModel, TriviaPlay};
use crate::usecase::{GetAnimeDetail, GetHomeContent, HomeOptions};

/// Wires repositories and use cases for one process.
///
/// Only the anime repository has a remote flavor; user data, favorites and
/// trivia progress always live in memory.
pub struct AppContainer {
    pub backend: Backend,
    pub anime_repository: Arc<dyn AnimeRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub favorites_repository: Arc<dyn FavoritesRepository>,
    pub trivia_repository: Arc<dyn TriviaRepository>,
    home_options: HomeOptions,
    detail: Arc<GetAnimeDetail>,
}

impl AppContainer {
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_backend(config, config.general.backend)
    }

    pub fn with_backend(config: &Config, backend: Backend) -> Result<Self> {
        let latency = config.fake_latency();
        let anime_repository: Arc<dyn AnimeRepository> = match backend {
            Backend::Fake => Arc::new(FakeAnimeRepository::new().with_latency(latency)),
            Backend::Remote => {
                let base_url = config.resolve_base_url();
                info!(base_url = %base_url, "Using remote anime backend");
                let api = ApiClient::new(&base_url, config.request_timeout())?;
                Arc::new(RemoteAnimeRepository::new(api, config.api.page_limit))
            }
        };

        Ok(Self::assemble(
            backend,
            anime_repository,
            Arc::new(FakeUserRepository::new().with_latency(latency)),
            Arc::new(InMemoryFavorites::new()),
            Arc::new(FakeTriviaRepository::new().with_latency(latency)),
            config.home_options(),
        ))
    }

    pub fn assemble(
        backend: Backend,
        anime_repository: Arc<dyn AnimeRepository>,
        user_repository: Arc<dyn UserRepository>,
        favorites_repository: Arc<dyn FavoritesRepository>,
        trivia_repository: Arc<dyn TriviaRepository>,
        home_options: HomeOptions,
    ) -> Self {
        let detail = Arc::new(GetAnimeDetail::new(
            anime_repository.clone(),
            home_options.request_timeout,
        ));
        Self {
            backend,
            anime_repository,
            user_repository,
            favorites_repository,
            trivia_repository,
            home_options,
            detail,
        }
    }

    pub fn home_use_case(&self) -> GetHomeContent {
        GetHomeContent::new(self.anime_repository.clone(), self.user_repository.clone())
            .with_options(self.home_options)
    }

    pub fn detail_use_case(&self) -> Arc<GetAnimeDetail> {
        self.detail.clone()
    }

    pub fn home_model(&self) -> HomeModel {
        HomeModel::new(self.home_use_case())
    }

    pub fn detail_model(&self, anime_id: u64) -> AnimeDetailModel {
        AnimeDetailModel::new(anime_id, self.detail_use_case(), self.favorites_repository.clone())
    }

    pub fn favorites_model(&self) -> FavoritesModel {
        FavoritesModel::new(self.favorites_repository.clone())
    }

    pub fn trivia_play(&self, anime_id: u64) -> TriviaPlay {
        TriviaPlay::new(anime_id, self.detail_use_case(), self.trivia_repository.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AnimeDetailState, HomeState};

    #[tokio::test]
    async fn test_fake_container_serves_home_and_shares_favorites() {
        let container = AppContainer::from_config(&Config::default()).unwrap();
        assert_eq!(container.backend, Backend::Fake);

        let mut home = container.home_model();
        match home.load().await {
            HomeState::Success(content) => assert_eq!(content.sections.len(), 3),
            other => panic!("unexpected state: {:?}", other),
        }

        let mut detail = container.detail_model(2);
        detail.load().await;
        detail.toggle_favorite().await.unwrap();
        assert!(container.favorites_repository.is_favorite(2));
        assert!(matches!(detail.state(), AnimeDetailState::Success { is_favorite: true, .. }));
    }

    #[test]
    fn test_home_options_follow_config() {
        let mut config = Config::default();
        config.home.max_sections = 2;
        let container = AppContainer::from_config(&config).unwrap();
        assert_eq!(container.home_use_case().options().max_sections, 2);
    }

    #[test]
    fn test_remote_backend_builds_without_network() {
        let container = AppContainer::with_backend(&Config::default(), Backend::Remote).unwrap();
        assert_eq!(container.backend, Backend::Remote);
    }
}
