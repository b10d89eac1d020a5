use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::with_timeout;
use crate::catalog::{AnimeSection, Genre, HomeContent};
use crate::error::Result;
use crate::repository::{AnimeRepository, UserRepository};

/// Upper bound on genre sections, to bound fan-out against the upstream
pub const MAX_HOME_SECTIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeOptions {
    /// Sections built at most; clamped to `1..=MAX_HOME_SECTIONS`
    pub max_sections: usize,
    /// Delay between the starts of consecutive genre fetches
    pub genre_pacing: Duration,
    /// Per repository call
    pub request_timeout: Duration,
}

impl Default for HomeOptions {
    fn default() -> Self {
        Self {
            max_sections: MAX_HOME_SECTIONS,
            genre_pacing: Duration::ZERO,
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Builds the home screen: one hero plus a section per preferred genre.
///
/// The hero and the preferred-genre list are hard dependencies; a failure in
/// either fails the whole call. Genre sections are fetched concurrently and
/// each one fails on its own: a failed or timed-out fetch becomes an empty
/// section marked `Degraded`, in the same position as its genre.
///
/// All fetches run inside the returned future, so dropping it cancels any
/// in-flight section requests.
pub struct GetHomeContent {
    anime_repository: Arc<dyn AnimeRepository>,
    user_repository: Arc<dyn UserRepository>,
    options: HomeOptions,
}

impl GetHomeContent {
    pub fn new(
        anime_repository: Arc<dyn AnimeRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            anime_repository,
            user_repository,
            options: HomeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: HomeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &HomeOptions {
        &self.options
    }

    fn section_cap(&self) -> usize {
        self.options.max_sections.clamp(1, MAX_HOME_SECTIONS)
    }

    pub async fn execute(&self) -> Result<HomeContent> {
        let timeout = self.options.request_timeout;

        let hero_anime = with_timeout(timeout, self.anime_repository.get_hero_recommendation())
            .await
            .inspect_err(|e| warn!(error = %e, "Hero recommendation failed"))?;

        let mut genres = with_timeout(timeout, self.user_repository.get_preferred_genres())
            .await
            .inspect_err(|e| warn!(error = %e, "Preferred genres failed"))?;

        let cap = self.section_cap();
        if genres.len() > cap {
            debug!(requested = genres.len(), cap, "Capping home sections");
            genres.truncate(cap);
        }

        // join_all yields results in input order, whatever order they finish in
        let sections = join_all(
            genres
                .into_iter()
                .enumerate()
                .map(|(index, genre)| self.fetch_section(index, genre)),
        )
        .await;

        let degraded = sections.iter().filter(|s| s.is_degraded()).count();
        info!(
            hero = hero_anime.id,
            sections = sections.len(),
            degraded,
            "Built home content"
        );

        Ok(HomeContent {
            hero_anime,
            sections,
        })
    }

    async fn fetch_section(&self, index: usize, genre: Genre) -> AnimeSection {
        let delay = self.options.genre_pacing.saturating_mul(index as u32);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let call = self.anime_repository.get_animes_by_genre(&genre.id);
        match with_timeout(self.options.request_timeout, call).await {
            Ok(animes) => AnimeSection::loaded(genre, animes),
            Err(err) => {
                warn!(genre = %genre.name, error = %err, "Genre section degraded");
                AnimeSection::degraded(genre)
            }
        }
    }
}
