use tokio::sync::watch;
use tracing::debug;

use super::FavoritesRepository;
use crate::catalog::Anime;
use crate::error::Result;

/// Favorites list kept in memory, observable through `subscribe`
pub struct InMemoryFavorites {
    favorites: watch::Sender<Vec<Anime>>,
}

impl InMemoryFavorites {
    pub fn new() -> Self {
        let (favorites, _) = watch::channel(Vec::new());
        Self { favorites }
    }
}

impl Default for InMemoryFavorites {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl FavoritesRepository for InMemoryFavorites {
    fn favorites(&self) -> Vec<Anime> {
        self.favorites.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Vec<Anime>> {
        self.favorites.subscribe()
    }

    fn is_favorite(&self, anime_id: u64) -> bool {
        self.favorites.borrow().iter().any(|a| a.id == anime_id)
    }

    async fn add_favorite(&self, anime: Anime) -> Result<()> {
        // Only notify subscribers when the list actually changes
        self.favorites.send_if_modified(|list| {
            if list.iter().any(|a| a.id == anime.id) {
                return false;
            }
            debug!(anime_id = anime.id, "Added favorite");
            list.push(anime);
            true
        });
        Ok(())
    }

    async fn remove_favorite(&self, anime_id: u64) -> Result<()> {
        self.favorites.send_if_modified(|list| {
            let before = list.len();
            list.retain(|a| a.id != anime_id);
            list.len() != before
        });
        Ok(())
    }

    async fn toggle_favorite(&self, anime: Anime) -> Result<bool> {
        if self.is_favorite(anime.id) {
            self.remove_favorite(anime.id).await?;
            Ok(false)
        } else {
            self.add_favorite(anime).await?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;

    fn anime(id: u64) -> Anime {
        fixtures::find_anime(id).unwrap().clone()
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let store = InMemoryFavorites::new();
        store.add_favorite(anime(1)).await.unwrap();
        store.add_favorite(anime(1)).await.unwrap();
        store.add_favorite(anime(3)).await.unwrap();

        let ids: Vec<u64> = store.favorites().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_toggle_flips_membership() {
        let store = InMemoryFavorites::new();

        assert!(store.toggle_favorite(anime(2)).await.unwrap());
        assert!(store.is_favorite(2));
        assert!(!store.toggle_favorite(anime(2)).await.unwrap());
        assert!(!store.is_favorite(2));
    }

    #[tokio::test]
    async fn test_subscribers_see_changes_only() {
        let store = InMemoryFavorites::new();
        let mut rx = store.subscribe();

        store.add_favorite(anime(4)).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        // Duplicate add and removing an unknown id are no-ops
        store.add_favorite(anime(4)).await.unwrap();
        store.remove_favorite(42).await.unwrap();
        assert!(!rx.has_changed().unwrap());

        store.remove_favorite(4).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());
    }
}
