use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use super::{AnimeRepository, UserRepository};
use crate::catalog::fixtures;
use crate::catalog::{Anime, AnimeDetail, DurationType, Genre, UserProfile, UserSettings};
use crate::error::{Error, Result};

/// Anime repository served from the static catalog
#[derive(Debug, Clone, Default)]
pub struct FakeAnimeRepository {
    latency: Duration,
}

impl FakeAnimeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate network latency on every call
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait::async_trait]
impl AnimeRepository for FakeAnimeRepository {
    async fn get_hero_recommendation(&self) -> Result<Anime> {
        self.simulate_latency().await;
        Ok(fixtures::hero_anime().clone())
    }

    async fn get_animes_by_genre(&self, genre_id: &str) -> Result<Vec<Anime>> {
        self.simulate_latency().await;
        let animes = fixtures::animes_by_genre(genre_id);
        debug!(genre_id, count = animes.len(), "Served fake genre listing");
        Ok(animes)
    }

    async fn get_anime_detail(&self, anime_id: u64) -> Result<AnimeDetail> {
        self.simulate_latency().await;
        fixtures::anime_detail(anime_id).ok_or(Error::AnimeNotFound(anime_id))
    }

    async fn search_anime(&self, query: &str) -> Result<Vec<Anime>> {
        self.simulate_latency().await;
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        Ok(fixtures::anime_catalog()
            .iter()
            .filter(|a| {
                a.title.to_lowercase().contains(&needle)
                    || a.original_title
                        .as_ref()
                        .is_some_and(|t| t.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    async fn get_genres(&self) -> Result<Vec<Genre>> {
        self.simulate_latency().await;
        Ok(fixtures::genres().to_vec())
    }
}

/// User settings and profile held in an owned store.
///
/// Each instance starts from the fixture defaults; clones share nothing.
pub struct FakeUserRepository {
    settings: watch::Sender<UserSettings>,
    profile: watch::Sender<UserProfile>,
    latency: Duration,
}

impl FakeUserRepository {
    pub fn new() -> Self {
        Self::with_state(fixtures::default_settings(), fixtures::default_profile())
    }

    pub fn with_state(settings: UserSettings, profile: UserProfile) -> Self {
        let (settings, _) = watch::channel(settings);
        let (profile, _) = watch::channel(profile);
        Self {
            settings,
            profile,
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Edit settings in place; the profile mirror is written under the
    /// settings lock, so new settings are never visible beside a stale profile
    fn modify_settings(&self, update: impl FnOnce(&mut UserSettings)) {
        self.settings.send_modify(|settings| {
            update(settings);

            let preferred_duration = settings
                .preferred_durations
                .first()
                .copied()
                .unwrap_or(DurationType::Medium);
            let favorite_genres = settings.preferred_genres.clone();
            self.profile.send_modify(|profile| {
                profile.favorite_genres = favorite_genres;
                profile.preferred_duration = preferred_duration;
            });
        });
    }
}

impl Default for FakeUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_account_info(name: &str, email: &str, nickname: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidInput("name cannot be empty".to_string()));
    }
    if nickname.trim().is_empty() {
        return Err(Error::InvalidInput("nickname cannot be empty".to_string()));
    }

    let email = email.trim();
    let valid_email = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid_email {
        return Err(Error::InvalidInput(format!("invalid email address: {}", email)));
    }

    Ok(())
}

#[async_trait::async_trait]
impl UserRepository for FakeUserRepository {
    async fn get_preferred_genres(&self) -> Result<Vec<Genre>> {
        self.simulate_latency().await;
        Ok(self.settings.borrow().preferred_genres.clone())
    }

    async fn get_user_settings(&self) -> Result<UserSettings> {
        self.simulate_latency().await;
        Ok(self.settings.borrow().clone())
    }

    async fn update_user_settings(&self, settings: UserSettings) -> Result<()> {
        self.simulate_latency().await;
        self.modify_settings(|current| *current = settings);
        debug!("Updated user settings");
        Ok(())
    }

    async fn update_preferred_genres(&self, genres: Vec<Genre>) -> Result<()> {
        self.simulate_latency().await;
        let count = genres.len();
        self.modify_settings(|current| current.preferred_genres = genres);
        debug!(count, "Updated preferred genres");
        Ok(())
    }

    async fn get_user_profile(&self) -> Result<UserProfile> {
        self.simulate_latency().await;
        Ok(self.profile.borrow().clone())
    }

    async fn update_account_info(
        &self,
        name: &str,
        email: &str,
        nickname: &str,
    ) -> Result<UserProfile> {
        self.simulate_latency().await;
        validate_account_info(name, email, nickname)?;

        self.profile.send_modify(|profile| {
            profile.name = name.trim().to_string();
            profile.email = email.trim().to_string();
            profile.nickname = nickname.trim().to_string();
        });

        Ok(self.profile.borrow().clone())
    }

    fn watch_profile(&self) -> watch::Receiver<UserProfile> {
        self.profile.subscribe()
    }
}
