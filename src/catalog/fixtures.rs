use std::sync::LazyLock;

use super::models::{
    Anime, AnimeDetail, DurationType, EmissionStatus, Genre, Trailer, UserProfile, UserSettings,
};

const TRAILERS_PER_DETAIL: u32 = 8;

pub const SHONEN: &str = "1";
pub const SEINEN: &str = "2";
pub const ADVENTURE: &str = "3";
pub const MYSTERY: &str = "4";
pub const DRAMA: &str = "5";

static GENRES: LazyLock<Vec<Genre>> = LazyLock::new(|| {
    vec![
        Genre::new(SHONEN, "Shonen"),
        Genre::new(SEINEN, "Seinen"),
        Genre::new(ADVENTURE, "Adventure"),
        Genre::new(MYSTERY, "Mystery"),
        Genre::new(DRAMA, "Drama"),
    ]
});

static CATALOG: LazyLock<Vec<Anime>> = LazyLock::new(|| {
    vec![
        Anime {
            id: 1,
            external_api_id: "kimetsu_no_yaiba".to_string(),
            title: "Demon Slayer".to_string(),
            original_title: Some("Kimetsu no Yaiba".to_string()),
            synopsis: "Tanjiro becomes a demon hunter to save his sister and avenge his family."
                .to_string(),
            cover_image_url: "https://cdn.myanimelist.net/images/anime/1286/99889.jpg".to_string(),
            total_episodes: Some(26),
            duration_type: DurationType::Medium,
            emission_status: EmissionStatus::OnAir,
            release_year: Some(2019),
            genres: genres_by_id(&[SHONEN, ADVENTURE]),
        },
        Anime {
            id: 2,
            external_api_id: "vinland_saga".to_string(),
            title: "Vinland Saga".to_string(),
            original_title: Some("Vinland Saga".to_string()),
            synopsis: "Thorfinn seeks revenge in an epic of Viking exploration and honor."
                .to_string(),
            cover_image_url: "https://cdn.myanimelist.net/images/anime/1907/117414.jpg".to_string(),
            total_episodes: Some(48),
            duration_type: DurationType::Long,
            emission_status: EmissionStatus::OnAir,
            release_year: Some(2019),
            genres: genres_by_id(&[SEINEN, ADVENTURE, DRAMA]),
        },
        Anime {
            id: 3,
            external_api_id: "made_in_abyss".to_string(),
            title: "Made in Abyss".to_string(),
            original_title: Some("Made in Abyss".to_string()),
            synopsis: "Riko and Reg descend into an abyss full of strange creatures and old mysteries."
                .to_string(),
            cover_image_url: "https://cdn.myanimelist.net/images/anime/6/86733.jpg".to_string(),
            total_episodes: Some(13),
            duration_type: DurationType::Short,
            emission_status: EmissionStatus::OnAir,
            release_year: Some(2017),
            genres: genres_by_id(&[ADVENTURE, MYSTERY]),
        },
        Anime {
            id: 4,
            external_api_id: "jujutsu_kaisen".to_string(),
            title: "Jujutsu Kaisen".to_string(),
            original_title: Some("Jujutsu Kaisen".to_string()),
            synopsis: "Itadori fights curses to protect the people he loves while learning the occult arts."
                .to_string(),
            cover_image_url: "https://cdn.myanimelist.net/images/anime/1171/109222.jpg".to_string(),
            total_episodes: Some(24),
            duration_type: DurationType::Medium,
            emission_status: EmissionStatus::OnAir,
            release_year: Some(2020),
            genres: genres_by_id(&[SHONEN, MYSTERY]),
        },
        Anime {
            id: 5,
            external_api_id: "monster".to_string(),
            title: "Monster".to_string(),
            original_title: Some("Monster".to_string()),
            synopsis: "Dr. Tenma chases a serial killer in a psychological thriller full of suspense."
                .to_string(),
            cover_image_url: "https://cdn.myanimelist.net/images/anime/10/18793.jpg".to_string(),
            total_episodes: Some(74),
            duration_type: DurationType::Long,
            emission_status: EmissionStatus::Finished,
            release_year: Some(2004),
            genres: genres_by_id(&[SEINEN, MYSTERY, DRAMA]),
        },
        Anime {
            id: 6,
            external_api_id: "fullmetal_alchemist_brotherhood".to_string(),
            title: "Fullmetal Alchemist: Brotherhood".to_string(),
            original_title: Some("Hagane no Renkinjutsushi".to_string()),
            synopsis: "The Elric brothers search for the philosopher's stone to recover what a failed experiment took."
                .to_string(),
            cover_image_url: "https://cdn.myanimelist.net/images/anime/1223/96541.jpg".to_string(),
            total_episodes: Some(64),
            duration_type: DurationType::Long,
            emission_status: EmissionStatus::Finished,
            release_year: Some(2009),
            genres: genres_by_id(&[SHONEN, ADVENTURE, DRAMA]),
        },
    ]
});

fn genres_by_id(ids: &[&str]) -> Vec<Genre> {
    ids.iter()
        .filter_map(|id| GENRES.iter().find(|g| g.id == *id).cloned())
        .collect()
}

pub fn genres() -> &'static [Genre] {
    &GENRES
}

pub fn anime_catalog() -> &'static [Anime] {
    &CATALOG
}

pub fn hero_anime() -> &'static Anime {
    &CATALOG[0]
}

pub fn preferred_genres() -> Vec<Genre> {
    genres_by_id(&[SHONEN, ADVENTURE, SEINEN])
}

pub fn find_anime(id: u64) -> Option<&'static Anime> {
    CATALOG.iter().find(|a| a.id == id)
}

pub fn animes_by_genre(genre_id: &str) -> Vec<Anime> {
    CATALOG
        .iter()
        .filter(|a| a.has_genre(genre_id))
        .cloned()
        .collect()
}

pub fn anime_detail(id: u64) -> Option<AnimeDetail> {
    let anime = find_anime(id)?.clone();
    let release = anime
        .release_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let cultural_notes = vec![
        format!("Cultural influences present in {}", anime.title),
        format!("Historical context of the year {}", release),
        "Food references and festivals shown in the series".to_string(),
    ];

    let trailers = (1..=TRAILERS_PER_DETAIL)
        .map(|number| Trailer {
            number,
            title: format!("{} trailer {}", anime.title, number),
            duration_minutes: 2,
            description: format!(
                "Preview {} of {} with relevant cultural notes.",
                number, anime.title
            ),
            youtube_url: format!(
                "https://www.youtube.com/results?search_query={}",
                urlencoding::encode(&format!("{} trailer {}", anime.title, number))
            ),
        })
        .collect();

    Some(AnimeDetail {
        anime,
        cultural_notes,
        trailers,
    })
}

pub fn default_settings() -> UserSettings {
    UserSettings {
        preferred_genres: preferred_genres(),
        preferred_durations: vec![DurationType::Medium],
        notifications_enabled: true,
        cultural_alerts_enabled: true,
        autoplay_next_episode: true,
        has_completed_onboarding: false,
    }
}

pub fn default_profile() -> UserProfile {
    UserProfile {
        id: "user-001".to_string(),
        name: "Sakura Tanaka".to_string(),
        nickname: "sakura".to_string(),
        email: "sakura@example.com".to_string(),
        avatar_url: "https://example.com/avatars/sakura.png".to_string(),
        knowledge_level: "Otaku in training".to_string(),
        xp_points: 1250,
        biography: "Seinen fan who loves the cultural details behind every series.".to_string(),
        total_animes_watched: 42,
        completed_trivias: 0,
        preferred_duration: DurationType::Medium,
        favorite_genres: preferred_genres(),
        badges: vec!["First trivia".to_string(), "Explorer".to_string()],
        favorite_quote: Some("A lesson without pain is meaningless.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_genres_resolve() {
        for anime in anime_catalog() {
            assert!(!anime.genres.is_empty(), "{} has no genres", anime.title);
        }
        assert_eq!(hero_anime().id, 1);
    }

    #[test]
    fn test_animes_by_genre() {
        let ids: Vec<u64> = animes_by_genre(SHONEN).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 4, 6]);
        assert!(animes_by_genre("999").is_empty());
    }

    #[test]
    fn test_anime_detail() {
        let detail = anime_detail(5).unwrap();
        assert_eq!(detail.anime.title, "Monster");
        assert_eq!(detail.cultural_notes.len(), 3);
        assert_eq!(detail.trailers.len(), 8);
        assert_eq!(detail.trailers[0].number, 1);
        assert_eq!(
            detail.trailers[0].youtube_url,
            "https://www.youtube.com/results?search_query=Monster%20trailer%201"
        );
        assert!(anime_detail(404).is_none());
    }
}
