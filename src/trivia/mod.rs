//! Trivia question generation from catalog data.
//!
//! Every anime gets three questions per difficulty. Options that need
//! shuffling use a seed derived from the question id, so the bank is
//! identical from run to run.

use std::collections::{BTreeMap, HashMap};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::catalog::{Anime, DurationType, EmissionStatus, Genre, TriviaDifficulty, TriviaQuestion};

mod cultural;

pub const QUESTIONS_PER_DIFFICULTY: usize = 3;

const FALLBACK_RELEASE_YEAR: i32 = 2015;
const FALLBACK_EPISODES: u32 = 12;
const EARLIEST_YEAR: i32 = 1990;
const FALLBACK_MISSING_GENRE: &str = "Comedy";

pub type QuestionSet = BTreeMap<TriviaDifficulty, Vec<TriviaQuestion>>;

/// Questions for every anime in `catalog`, keyed by anime id
pub fn build_question_bank(catalog: &[Anime], genres: &[Genre]) -> HashMap<u64, QuestionSet> {
    catalog
        .iter()
        .map(|anime| (anime.id, build_question_set(anime, genres)))
        .collect()
}

pub fn build_question_set(anime: &Anime, genres: &[Genre]) -> QuestionSet {
    let mut set = BTreeMap::new();
    set.insert(
        TriviaDifficulty::Easy,
        vec![
            duration_question(anime),
            status_question(anime),
            food_question(anime),
        ],
    );
    set.insert(
        TriviaDifficulty::Medium,
        vec![
            tradition_question(anime),
            release_year_question(anime),
            episodes_question(anime),
        ],
    );
    set.insert(
        TriviaDifficulty::Hard,
        vec![
            statement_question(anime),
            missing_genre_question(anime, genres),
            binge_time_question(anime),
        ],
    );
    set
}

fn question_seed(id: &str) -> u64 {
    // FNV-1a
    id.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    })
}

/// Shuffle `options` and return them with the new position of `correct`
fn shuffled(id: &str, mut options: Vec<String>, correct: &str) -> (Vec<String>, usize) {
    let mut rng = StdRng::seed_from_u64(question_seed(id));
    options.shuffle(&mut rng);
    let index = options.iter().position(|o| o == correct).unwrap_or(0);
    (options, index)
}

fn dedup_keep_order<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

fn duration_question(anime: &Anime) -> TriviaQuestion {
    let options: Vec<String> = DurationType::ALL
        .iter()
        .map(|d| d.as_display().to_string())
        .collect();
    let correct_answer_index = DurationType::ALL
        .iter()
        .position(|d| *d == anime.duration_type)
        .unwrap_or(0);

    TriviaQuestion {
        id: format!("{}_duration", anime.id),
        anime_id: anime.id,
        difficulty: TriviaDifficulty::Easy,
        question: format!("How long are the episodes of {}?", anime.title),
        options,
        correct_answer_index,
        feedback: format!(
            "The series counts as {} because of the length of each episode.",
            anime.duration_type.as_display()
        ),
    }
}

fn status_question(anime: &Anime) -> TriviaQuestion {
    let options: Vec<String> = EmissionStatus::ALL
        .iter()
        .map(|s| s.as_display().to_string())
        .collect();
    let correct_answer_index = EmissionStatus::ALL
        .iter()
        .position(|s| *s == anime.emission_status)
        .unwrap_or(0);

    TriviaQuestion {
        id: format!("{}_status", anime.id),
        anime_id: anime.id,
        difficulty: TriviaDifficulty::Easy,
        question: format!("What is the current airing status of {}?", anime.title),
        options,
        correct_answer_index,
        feedback: format!(
            "The series is currently {}.",
            anime.emission_status.as_display().to_lowercase()
        ),
    }
}

fn food_question(anime: &Anime) -> TriviaQuestion {
    let pref = cultural::food_preference(anime.id);
    let options: Vec<String> = cultural::FOOD_TYPES.iter().map(|s| s.to_string()).collect();
    let correct_answer_index = cultural::FOOD_TYPES
        .iter()
        .position(|t| *t == pref.food_type)
        .unwrap_or(0);

    TriviaQuestion {
        id: format!("{}_cultural_food", anime.id),
        anime_id: anime.id,
        difficulty: TriviaDifficulty::Easy,
        question: format!(
            "{} in {} loves {}; what kind of Japanese food is it?",
            pref.character, anime.title, pref.item
        ),
        options,
        correct_answer_index,
        feedback: format!(
            "It is {} and reflects how {} {}.",
            pref.food_type.to_lowercase(),
            pref.character,
            pref.context
        ),
    }
}

fn tradition_question(anime: &Anime) -> TriviaQuestion {
    let moment = cultural::tradition_moment(anime.id);
    let id = format!("{}_cultural_tradition", anime.id);
    let options = std::iter::once(moment.concept)
        .chain(moment.distractors)
        .map(str::to_string)
        .collect();
    let (options, correct_answer_index) = shuffled(&id, options, moment.concept);

    TriviaQuestion {
        id,
        anime_id: anime.id,
        difficulty: TriviaDifficulty::Medium,
        question: format!(
            "In {}, {}; which Japanese tradition does it refer to?",
            anime.title, moment.context
        ),
        options,
        correct_answer_index,
        feedback: format!("{}.", moment.detail),
    }
}

fn release_year_question(anime: &Anime) -> TriviaQuestion {
    let year = anime.release_year.unwrap_or(FALLBACK_RELEASE_YEAR);
    let options: Vec<String> = dedup_keep_order(
        [year, year + 1, year - 2, year + 3]
            .into_iter()
            .map(|y| y.max(EARLIEST_YEAR))
            .collect(),
    )
    .into_iter()
    .map(|y| y.to_string())
    .collect();
    let correct_answer_index = options
        .iter()
        .position(|o| *o == year.max(EARLIEST_YEAR).to_string())
        .unwrap_or(0);

    TriviaQuestion {
        id: format!("{}_release", anime.id),
        anime_id: anime.id,
        difficulty: TriviaDifficulty::Medium,
        question: format!("In what year did {} premiere?", anime.title),
        options,
        correct_answer_index,
        feedback: format!("It premiered in {} on Japanese TV.", year),
    }
}

fn episodes_question(anime: &Anime) -> TriviaQuestion {
    let total = anime.total_episodes.unwrap_or(FALLBACK_EPISODES);
    let options: Vec<String> = dedup_keep_order(vec![
        total,
        total + 10,
        total.saturating_sub(8).max(1),
        total + 4,
    ])
    .into_iter()
    .map(|n| format!("{} episodes", n))
    .collect();

    TriviaQuestion {
        id: format!("{}_episodes", anime.id),
        anime_id: anime.id,
        difficulty: TriviaDifficulty::Medium,
        question: format!("How many episodes does {} have?", anime.title),
        options,
        correct_answer_index: 0,
        feedback: format!("So far it has {} published episodes.", total),
    }
}

fn statement_question(anime: &Anime) -> TriviaQuestion {
    let year = anime.release_year.unwrap_or(FALLBACK_RELEASE_YEAR);
    let main_genre = anime
        .genres
        .first()
        .map(|g| g.name.as_str())
        .unwrap_or("action");
    // The true statement always comes first
    let options = vec![
        format!(
            "{} blends {} with historical elements and premiered in {}",
            anime.title, main_genre, year
        ),
        format!("{} ended in 2010 and is remembered as a romantic comedy", anime.title),
        format!("{} has episodes under 10 minutes and premiered in 2022", anime.title),
        format!("{} never aired on TV and only exists as a movie", anime.title),
    ];

    TriviaQuestion {
        id: format!("{}_statement", anime.id),
        anime_id: anime.id,
        difficulty: TriviaDifficulty::Hard,
        question: format!("Pick the correct statement about {}", anime.title),
        options,
        correct_answer_index: 0,
        feedback: format!(
            "Its {} premiere established {} within {}.",
            year, anime.title, main_genre
        ),
    }
}

fn missing_genre_question(anime: &Anime, genres: &[Genre]) -> TriviaQuestion {
    let own: Vec<String> = anime.genres.iter().map(|g| g.name.clone()).collect();
    let extra = genres
        .iter()
        .map(|g| g.name.clone())
        .find(|name| !own.contains(name))
        .unwrap_or_else(|| FALLBACK_MISSING_GENRE.to_string());
    let id = format!("{}_missing_genre", anime.id);
    let mut options = own;
    options.push(extra.clone());
    let (options, correct_answer_index) = shuffled(&id, options, &extra);

    TriviaQuestion {
        id,
        anime_id: anime.id,
        difficulty: TriviaDifficulty::Hard,
        question: format!("Which of these genres is NOT associated with {}?", anime.title),
        options,
        correct_answer_index,
        feedback: format!("{} is not part of the series' main mix.", extra),
    }
}

fn binge_time_question(anime: &Anime) -> TriviaQuestion {
    let episodes = anime.total_episodes.unwrap_or(FALLBACK_EPISODES);
    let minutes = episodes * anime.duration_type.average_minutes();
    let hours = minutes.div_ceil(60);
    let options: Vec<String> = dedup_keep_order(vec![
        hours,
        hours + 4,
        hours.saturating_sub(3).max(1),
        hours + 2,
    ])
    .into_iter()
    .map(|h| format!("{} hours", h))
    .collect();

    TriviaQuestion {
        id: format!("{}_binge", anime.id),
        anime_id: anime.id,
        difficulty: TriviaDifficulty::Hard,
        question: format!(
            "If you watched every episode of {} back to back, roughly how many hours would it take?",
            anime.title
        ),
        options,
        correct_answer_index: 0,
        feedback: format!(
            "That's about {} hours of content across {} episodes.",
            hours, episodes
        ),
    }
}
