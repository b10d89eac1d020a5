use std::collections::BTreeSet;

use tracing::info;

use crate::catalog::{DurationType, Genre, UserSettings};
use crate::error::{Error, Result};
use crate::repository::UserRepository;

/// Genre and duration picks, shared by onboarding and the settings screen
#[derive(Debug, Clone)]
pub struct PreferencesForm {
    available_genres: Vec<Genre>,
    selected_genre_ids: BTreeSet<String>,
    selected_durations: BTreeSet<DurationType>,
    base: UserSettings,
    is_saving: bool,
}

impl PreferencesForm {
    /// Settings screen: always prefilled from the stored settings
    pub fn for_settings(available_genres: Vec<Genre>, settings: UserSettings) -> Self {
        let selected_genre_ids = settings
            .preferred_genres
            .iter()
            .map(|g| g.id.clone())
            .collect();
        let selected_durations = settings.preferred_durations.iter().copied().collect();
        Self {
            available_genres,
            selected_genre_ids,
            selected_durations,
            base: settings,
            is_saving: false,
        }
    }

    /// Onboarding: prefilled only when onboarding was completed before
    pub fn for_onboarding(available_genres: Vec<Genre>, settings: UserSettings) -> Self {
        if settings.has_completed_onboarding {
            return Self::for_settings(available_genres, settings);
        }
        Self {
            available_genres,
            selected_genre_ids: BTreeSet::new(),
            selected_durations: BTreeSet::new(),
            base: settings,
            is_saving: false,
        }
    }

    /// Load genres and settings from the repository, then build the form
    pub async fn load(users: &dyn UserRepository, genres: Vec<Genre>, onboarding: bool) -> Result<Self> {
        let settings = users.get_user_settings().await?;
        Ok(if onboarding {
            Self::for_onboarding(genres, settings)
        } else {
            Self::for_settings(genres, settings)
        })
    }

    pub fn available_genres(&self) -> &[Genre] {
        &self.available_genres
    }

    pub fn is_genre_selected(&self, genre_id: &str) -> bool {
        self.selected_genre_ids.contains(genre_id)
    }

    pub fn is_duration_selected(&self, duration: DurationType) -> bool {
        self.selected_durations.contains(&duration)
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn toggle_genre(&mut self, genre_id: &str) {
        if !self.selected_genre_ids.remove(genre_id) {
            self.selected_genre_ids.insert(genre_id.to_string());
        }
    }

    pub fn toggle_duration(&mut self, duration: DurationType) {
        if !self.selected_durations.remove(&duration) {
            self.selected_durations.insert(duration);
        }
    }

    pub fn can_continue(&self) -> bool {
        !self.selected_genre_ids.is_empty() && !self.selected_durations.is_empty() && !self.is_saving
    }

    /// Genres in catalog order, durations in enum order
    pub fn to_settings(&self) -> UserSettings {
        let preferred_genres = self
            .available_genres
            .iter()
            .filter(|g| self.selected_genre_ids.contains(&g.id))
            .cloned()
            .collect();
        let preferred_durations = DurationType::ALL
            .iter()
            .copied()
            .filter(|d| self.selected_durations.contains(d))
            .collect();

        UserSettings {
            preferred_genres,
            preferred_durations,
            has_completed_onboarding: true,
            ..self.base.clone()
        }
    }

    /// Persist the picks through the user repository
    pub async fn save(&mut self, users: &dyn UserRepository) -> Result<UserSettings> {
        if !self.can_continue() {
            return Err(Error::InvalidInput(
                "Select at least one genre and one duration".to_string(),
            ));
        }

        self.is_saving = true;
        let settings = self.to_settings();
        let result = async {
            users.update_user_settings(settings.clone()).await?;
            users
                .update_preferred_genres(settings.preferred_genres.clone())
                .await
        }
        .await;
        self.is_saving = false;

        result?;
        info!(
            genres = settings.preferred_genres.len(),
            durations = settings.preferred_durations.len(),
            "Saved preferences"
        );
        self.base = settings.clone();
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;
    use crate::repository::FakeUserRepository;

    fn onboarding_settings() -> UserSettings {
        fixtures::default_settings()
    }

    #[test]
    fn test_onboarding_starts_empty_until_completed() {
        let form = PreferencesForm::for_onboarding(fixtures::genres().to_vec(), onboarding_settings());
        assert!(!form.is_genre_selected(fixtures::SHONEN));
        assert!(!form.can_continue());

        let completed = UserSettings {
            has_completed_onboarding: true,
            ..onboarding_settings()
        };
        let form = PreferencesForm::for_onboarding(fixtures::genres().to_vec(), completed);
        assert!(form.is_genre_selected(fixtures::SHONEN));
        assert!(form.is_duration_selected(DurationType::Medium));
    }

    #[test]
    fn test_can_continue_needs_genre_and_duration() {
        let mut form = PreferencesForm::for_onboarding(fixtures::genres().to_vec(), onboarding_settings());
        form.toggle_genre(fixtures::DRAMA);
        assert!(!form.can_continue());

        form.toggle_duration(DurationType::Long);
        assert!(form.can_continue());

        form.toggle_genre(fixtures::DRAMA);
        assert!(!form.can_continue());
    }

    #[test]
    fn test_to_settings_orders_selection() {
        let mut form = PreferencesForm::for_onboarding(fixtures::genres().to_vec(), onboarding_settings());
        form.toggle_genre(fixtures::DRAMA);
        form.toggle_genre(fixtures::SHONEN);
        form.toggle_genre(fixtures::MYSTERY);
        form.toggle_duration(DurationType::Long);
        form.toggle_duration(DurationType::Short);

        let settings = form.to_settings();
        let ids: Vec<&str> = settings.preferred_genres.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, [fixtures::SHONEN, fixtures::MYSTERY, fixtures::DRAMA]);
        assert_eq!(settings.preferred_durations, [DurationType::Short, DurationType::Long]);
        assert!(settings.has_completed_onboarding);
        assert!(settings.notifications_enabled);
    }

    #[tokio::test]
    async fn test_save_updates_repository() {
        let users = FakeUserRepository::new();
        let mut form = PreferencesForm::load(&users, fixtures::genres().to_vec(), true)
            .await
            .unwrap();
        form.toggle_genre(fixtures::SEINEN);
        form.toggle_duration(DurationType::Short);

        form.save(&users).await.unwrap();
        assert!(!form.is_saving());

        let genres = users.get_preferred_genres().await.unwrap();
        assert_eq!(genres.len(), 1);
        assert_eq!(genres[0].id, fixtures::SEINEN);

        let settings = users.get_user_settings().await.unwrap();
        assert!(settings.has_completed_onboarding);

        let profile = users.get_user_profile().await.unwrap();
        assert_eq!(profile.preferred_duration, DurationType::Short);
    }

    #[tokio::test]
    async fn test_save_rejects_incomplete_form() {
        let users = FakeUserRepository::new();
        let mut form = PreferencesForm::load(&users, fixtures::genres().to_vec(), true)
            .await
            .unwrap();
        let err = form.save(&users).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
