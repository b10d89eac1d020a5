use std::sync::Arc;

use crate::catalog::AnimeDetail;
use crate::error::Result;
use crate::repository::FavoritesRepository;
use crate::usecase::GetAnimeDetail;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimeDetailState {
    Loading,
    Success {
        detail: AnimeDetail,
        is_favorite: bool,
    },
    Error(String),
}

impl AnimeDetailState {
    /// Only a loaded detail carries a favorite flag
    pub fn set_favorite(&mut self, favorite: bool) {
        if let AnimeDetailState::Success { is_favorite, .. } = self {
            *is_favorite = favorite;
        }
    }
}

pub struct AnimeDetailModel {
    anime_id: u64,
    use_case: Arc<GetAnimeDetail>,
    favorites: Arc<dyn FavoritesRepository>,
    state: AnimeDetailState,
}

impl AnimeDetailModel {
    pub fn new(
        anime_id: u64,
        use_case: Arc<GetAnimeDetail>,
        favorites: Arc<dyn FavoritesRepository>,
    ) -> Self {
        Self {
            anime_id,
            use_case,
            favorites,
            state: AnimeDetailState::Loading,
        }
    }

    pub fn state(&self) -> &AnimeDetailState {
        &self.state
    }

    pub async fn load(&mut self) -> &AnimeDetailState {
        self.state = AnimeDetailState::Loading;
        self.state = match self.use_case.execute(self.anime_id).await {
            Ok(detail) => AnimeDetailState::Success {
                detail,
                is_favorite: self.favorites.is_favorite(self.anime_id),
            },
            Err(err) => AnimeDetailState::Error(err.to_string()),
        };
        &self.state
    }

    /// Toggle the loaded anime in favorites; a no-op unless loaded
    pub async fn toggle_favorite(&mut self) -> Result<()> {
        let AnimeDetailState::Success { detail, .. } = &self.state else {
            return Ok(());
        };
        let now_favorite = self.favorites.toggle_favorite(detail.anime.clone()).await?;
        self.state.set_favorite(now_favorite);
        Ok(())
    }

    /// Pick up favorite changes made elsewhere
    pub fn sync_favorite(&mut self) {
        let favorite = self.favorites.is_favorite(self.anime_id);
        self.state.set_favorite(favorite);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::repository::{FakeAnimeRepository, InMemoryFavorites};

    fn model(anime_id: u64, favorites: Arc<InMemoryFavorites>) -> AnimeDetailModel {
        let use_case = GetAnimeDetail::new(Arc::new(FakeAnimeRepository::new()), Duration::from_secs(1));
        AnimeDetailModel::new(anime_id, Arc::new(use_case), favorites)
    }

    #[tokio::test]
    async fn test_toggle_favorite_updates_state_and_store() {
        let favorites = Arc::new(InMemoryFavorites::new());
        let mut detail = model(3, favorites.clone());
        detail.load().await;

        detail.toggle_favorite().await.unwrap();
        assert!(matches!(detail.state(), AnimeDetailState::Success { is_favorite: true, .. }));
        assert!(favorites.is_favorite(3));

        favorites.remove_favorite(3).await.unwrap();
        detail.sync_favorite();
        assert!(matches!(detail.state(), AnimeDetailState::Success { is_favorite: false, .. }));
    }

    #[tokio::test]
    async fn test_missing_anime_is_error_and_toggle_is_noop() {
        let favorites = Arc::new(InMemoryFavorites::new());
        let mut detail = model(404, favorites.clone());

        assert!(matches!(detail.load().await, AnimeDetailState::Error(_)));
        detail.toggle_favorite().await.unwrap();
        assert!(favorites.favorites().is_empty());
    }

    #[test]
    fn test_set_favorite_ignored_while_loading() {
        let mut state = AnimeDetailState::Loading;
        state.set_favorite(true);
        assert_eq!(state, AnimeDetailState::Loading);
    }
}
