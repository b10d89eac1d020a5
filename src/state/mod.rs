//! Screen-level state driven by the use cases and repositories

mod detail;
mod favorites;
mod home;
mod preferences;
mod trivia;

pub use detail::{AnimeDetailModel, AnimeDetailState};
pub use favorites::FavoritesModel;
pub use home::{HomeModel, HomeState};
pub use preferences::PreferencesForm;
pub use trivia::{QuizState, TriviaPlay, TriviaPlayState};
