use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::catalog::Anime;
use crate::error::{Error, Result};
use crate::repository::FavoritesRepository;

/// Favorites list screen, following the repository's change stream
pub struct FavoritesModel {
    favorites: Arc<dyn FavoritesRepository>,
    updates: watch::Receiver<Vec<Anime>>,
}

impl FavoritesModel {
    pub fn new(favorites: Arc<dyn FavoritesRepository>) -> Self {
        let updates = favorites.subscribe();
        Self { favorites, updates }
    }

    /// Current list; marks it as seen
    pub fn items(&mut self) -> Vec<Anime> {
        self.updates.borrow_and_update().clone()
    }

    /// Whether the list changed since `items` was last read
    pub fn has_updates(&self) -> bool {
        self.updates.has_changed().unwrap_or(false)
    }

    pub async fn remove(&self, anime_id: u64) -> Result<()> {
        if !self.favorites.is_favorite(anime_id) {
            return Err(Error::InvalidInput(format!("anime {} is not a favorite", anime_id)));
        }
        self.favorites.remove_favorite(anime_id).await?;
        debug!(anime_id, "Removed from favorites list");
        Ok(())
    }
}
