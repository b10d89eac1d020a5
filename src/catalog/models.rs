use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DurationType {
    Short,
    Medium,
    Long,
}

impl DurationType {
    pub const ALL: [DurationType; 3] = [DurationType::Short, DurationType::Medium, DurationType::Long];

    pub fn as_display(&self) -> &'static str {
        match self {
            DurationType::Short => "Short (<=15 min)",
            DurationType::Medium => "Medium (16-25 min)",
            DurationType::Long => "Long (30+ min)",
        }
    }

    /// Typical episode length in minutes for this class
    pub fn average_minutes(&self) -> u32 {
        match self {
            DurationType::Short => 12,
            DurationType::Medium => 23,
            DurationType::Long => 35,
        }
    }
}

impl std::str::FromStr for DurationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(DurationType::Short),
            "medium" => Ok(DurationType::Medium),
            "long" => Ok(DurationType::Long),
            other => Err(format!("unknown duration '{}' (short, medium, long)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmissionStatus {
    OnAir,
    Finished,
    OnBreak,
}

impl EmissionStatus {
    pub const ALL: [EmissionStatus; 3] = [
        EmissionStatus::OnAir,
        EmissionStatus::Finished,
        EmissionStatus::OnBreak,
    ];

    pub fn as_display(&self) -> &'static str {
        match self {
            EmissionStatus::OnAir => "On air",
            EmissionStatus::Finished => "Finished",
            EmissionStatus::OnBreak => "On break",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: String,
    pub name: String,
}

impl Genre {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anime {
    pub id: u64,
    pub external_api_id: String,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    pub synopsis: String,
    pub cover_image_url: String,
    #[serde(default)]
    pub total_episodes: Option<u32>,
    pub duration_type: DurationType,
    pub emission_status: EmissionStatus,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl Anime {
    pub fn has_genre(&self, genre_id: &str) -> bool {
        self.genres.iter().any(|g| g.id == genre_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trailer {
    pub number: u32,
    pub title: String,
    pub duration_minutes: u32,
    pub description: String,
    pub youtube_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeDetail {
    pub anime: Anime,
    #[serde(default)]
    pub cultural_notes: Vec<String>,
    #[serde(default)]
    pub trailers: Vec<Trailer>,
}

impl AnimeDetail {
    pub fn bare(anime: Anime) -> Self {
        Self {
            anime,
            cultural_notes: Vec::new(),
            trailers: Vec::new(),
        }
    }
}

/// Whether a home section's anime list came back from its fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SectionStatus {
    #[default]
    Loaded,
    /// The fetch failed or timed out; `animes` is empty
    Degraded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeSection {
    pub genre: Genre,
    pub animes: Vec<Anime>,
    #[serde(default)]
    pub status: SectionStatus,
}

impl AnimeSection {
    pub fn loaded(genre: Genre, animes: Vec<Anime>) -> Self {
        Self {
            genre,
            animes,
            status: SectionStatus::Loaded,
        }
    }

    pub fn degraded(genre: Genre) -> Self {
        Self {
            genre,
            animes: Vec::new(),
            status: SectionStatus::Degraded,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.status == SectionStatus::Degraded
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeContent {
    pub hero_anime: Anime,
    pub sections: Vec<AnimeSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub nickname: String,
    pub email: String,
    pub avatar_url: String,
    pub knowledge_level: String,
    pub xp_points: u32,
    pub biography: String,
    pub total_animes_watched: u32,
    pub completed_trivias: u32,
    pub preferred_duration: DurationType,
    pub favorite_genres: Vec<Genre>,
    pub badges: Vec<String>,
    #[serde(default)]
    pub favorite_quote: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub preferred_genres: Vec<Genre>,
    pub preferred_durations: Vec<DurationType>,
    pub notifications_enabled: bool,
    pub cultural_alerts_enabled: bool,
    pub autoplay_next_episode: bool,
    pub has_completed_onboarding: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriviaDifficulty {
    Easy,
    Medium,
    Hard,
}

impl TriviaDifficulty {
    pub const ALL: [TriviaDifficulty; 3] = [
        TriviaDifficulty::Easy,
        TriviaDifficulty::Medium,
        TriviaDifficulty::Hard,
    ];

    pub fn as_display(&self) -> &'static str {
        match self {
            TriviaDifficulty::Easy => "Easy",
            TriviaDifficulty::Medium => "Medium",
            TriviaDifficulty::Hard => "Hard",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TriviaDifficulty::Easy => "Warm-up questions to get started",
            TriviaDifficulty::Medium => "Challenges for viewers who catch the details",
            TriviaDifficulty::Hard => "Deeper cultural and context quizzes",
        }
    }
}

impl std::str::FromStr for TriviaDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(TriviaDifficulty::Easy),
            "medium" => Ok(TriviaDifficulty::Medium),
            "hard" => Ok(TriviaDifficulty::Hard),
            other => Err(format!("unknown difficulty '{}' (easy, medium, hard)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaQuestion {
    pub id: String,
    pub anime_id: u64,
    pub difficulty: TriviaDifficulty,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
    pub feedback: String,
}

impl TriviaQuestion {
    pub fn correct_answer(&self) -> Option<&str> {
        self.options.get(self.correct_answer_index).map(String::as_str)
    }

    pub fn is_correct(&self, answer_index: usize) -> bool {
        self.correct_answer_index == answer_index
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriviaSummary {
    pub anime: Anime,
    pub last_score: Option<u32>,
    pub total_questions: u32,
    pub last_difficulty: Option<TriviaDifficulty>,
    pub best_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriviaProfileStats {
    pub total_answered: u32,
    pub perfect_runs: u32,
    pub mastery_level: String,
    pub scores_by_difficulty: BTreeMap<TriviaDifficulty, u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anime_from_api_json() {
        let json = r#"{
            "id": 7,
            "externalApiId": "frieren",
            "title": "Frieren",
            "synopsis": "An elf mage outlives her party.",
            "coverImageUrl": "https://example.com/frieren.jpg",
            "durationType": "MEDIUM",
            "emissionStatus": "ON_BREAK",
            "genres": [{"id": "3", "name": "Adventure"}]
        }"#;

        let anime: Anime = serde_json::from_str(json).unwrap();
        assert_eq!(anime.id, 7);
        assert_eq!(anime.original_title, None);
        assert_eq!(anime.total_episodes, None);
        assert_eq!(anime.duration_type, DurationType::Medium);
        assert_eq!(anime.emission_status, EmissionStatus::OnBreak);
        assert!(anime.has_genre("3"));
        assert!(!anime.has_genre("1"));
    }

    #[test]
    fn test_detail_keeps_trailers() {
        let json = r#"{
            "anime": {
                "id": 5,
                "externalApiId": "monster",
                "title": "Monster",
                "synopsis": "s",
                "coverImageUrl": "c",
                "durationType": "LONG",
                "emissionStatus": "FINISHED"
            },
            "culturalNotes": ["n1"],
            "trailers": [{
                "number": 1,
                "title": "Teaser",
                "durationMinutes": 2,
                "description": "First look",
                "youtubeUrl": "https://www.youtube.com/watch?v=abc"
            }]
        }"#;

        let detail: AnimeDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.trailers.len(), 1);
        assert_eq!(detail.trailers[0].youtube_url, "https://www.youtube.com/watch?v=abc");

        let reserialized = serde_json::to_string(&detail).unwrap();
        assert!(reserialized.contains(r#""youtubeUrl":"https://www.youtube.com/watch?v=abc""#));
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("EASY".parse::<TriviaDifficulty>(), Ok(TriviaDifficulty::Easy));
        assert_eq!("hard".parse::<TriviaDifficulty>(), Ok(TriviaDifficulty::Hard));
        assert!("extreme".parse::<TriviaDifficulty>().is_err());
        assert_eq!(" Long".parse::<DurationType>(), Ok(DurationType::Long));
        assert!("epic".parse::<DurationType>().is_err());
    }

    #[test]
    fn test_degraded_section_is_empty() {
        let section = AnimeSection::degraded(Genre::new("2", "Seinen"));
        assert!(section.animes.is_empty());
        assert!(section.is_degraded());
    }
}
