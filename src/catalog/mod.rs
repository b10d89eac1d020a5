pub mod fixtures;
pub mod models;

pub use models::{
    Anime, AnimeDetail, AnimeSection, DurationType, EmissionStatus, Genre, HomeContent, SectionStatus,
    Trailer, TriviaDifficulty, TriviaProfileStats, TriviaQuestion, TriviaSummary, UserProfile,
    UserSettings,
};
