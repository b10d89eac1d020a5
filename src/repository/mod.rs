use tokio::sync::watch;

use crate::catalog::{
    Anime, AnimeDetail, Genre, TriviaDifficulty, TriviaProfileStats, TriviaQuestion,
    TriviaSummary, UserProfile, UserSettings,
};
use crate::error::Result;

pub mod fake;
pub mod favorites;
pub mod trivia;

pub use fake::{FakeAnimeRepository, FakeUserRepository};
pub use favorites::InMemoryFavorites;
pub use trivia::FakeTriviaRepository;

#[async_trait::async_trait]
pub trait AnimeRepository: Send + Sync {
    async fn get_hero_recommendation(&self) -> Result<Anime>;
    async fn get_animes_by_genre(&self, genre_id: &str) -> Result<Vec<Anime>>;
    async fn get_anime_detail(&self, anime_id: u64) -> Result<AnimeDetail>;
    async fn search_anime(&self, query: &str) -> Result<Vec<Anime>>;
    async fn get_genres(&self) -> Result<Vec<Genre>>;
}

#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_preferred_genres(&self) -> Result<Vec<Genre>>;
    async fn get_user_settings(&self) -> Result<UserSettings>;
    async fn update_user_settings(&self, settings: UserSettings) -> Result<()>;
    async fn update_preferred_genres(&self, genres: Vec<Genre>) -> Result<()>;
    async fn get_user_profile(&self) -> Result<UserProfile>;
    async fn update_account_info(
        &self,
        name: &str,
        email: &str,
        nickname: &str,
    ) -> Result<UserProfile>;

    /// Subscribe to profile changes; the receiver starts at the current value
    fn watch_profile(&self) -> watch::Receiver<UserProfile>;
}

#[async_trait::async_trait]
pub trait FavoritesRepository: Send + Sync {
    fn favorites(&self) -> Vec<Anime>;
    fn subscribe(&self) -> watch::Receiver<Vec<Anime>>;
    fn is_favorite(&self, anime_id: u64) -> bool;
    async fn add_favorite(&self, anime: Anime) -> Result<()>;
    async fn remove_favorite(&self, anime_id: u64) -> Result<()>;
    /// Returns whether the anime is a favorite afterwards
    async fn toggle_favorite(&self, anime: Anime) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait TriviaRepository: Send + Sync {
    async fn get_trivia_summaries(&self) -> Result<Vec<TriviaSummary>>;
    /// Subscribe to the summary list; a new value follows every recorded result
    fn subscribe_summaries(&self) -> watch::Receiver<Vec<TriviaSummary>>;
    async fn get_questions(
        &self,
        anime_id: u64,
        difficulty: TriviaDifficulty,
    ) -> Result<Vec<TriviaQuestion>>;
    async fn record_result(
        &self,
        anime_id: u64,
        difficulty: TriviaDifficulty,
        score: u32,
        total_questions: u32,
    ) -> Result<()>;
    async fn profile_stats(&self) -> Result<TriviaProfileStats>;
}
