use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use super::TriviaRepository;
use crate::catalog::fixtures;
use crate::catalog::{
    Anime, Genre, TriviaDifficulty, TriviaProfileStats, TriviaQuestion, TriviaSummary,
};
use crate::error::{Error, Result};
use crate::trivia::{self, QUESTIONS_PER_DIFFICULTY, QuestionSet};

/// Running totals behind the profile stats
#[derive(Debug, Clone, Default)]
struct Tallies {
    total_answered: u32,
    perfect_runs: u32,
    correct_by_difficulty: BTreeMap<TriviaDifficulty, u32>,
}

fn fresh_summary(anime: Anime) -> TriviaSummary {
    TriviaSummary {
        anime,
        last_score: None,
        total_questions: QUESTIONS_PER_DIFFICULTY as u32,
        last_difficulty: None,
        best_score: 0,
    }
}

/// Trivia backed by a generated question bank and in-memory results.
///
/// The summary list is published through a `watch` channel; every recorded
/// result sends a new list to subscribers.
pub struct FakeTriviaRepository {
    bank: HashMap<u64, QuestionSet>,
    summaries: watch::Sender<Vec<TriviaSummary>>,
    tallies: Mutex<Tallies>,
    latency: Duration,
}

impl FakeTriviaRepository {
    pub fn new() -> Self {
        Self::with_catalog(fixtures::anime_catalog().to_vec(), fixtures::genres())
    }

    pub fn with_catalog(catalog: Vec<Anime>, genres: &[Genre]) -> Self {
        let bank = trivia::build_question_bank(&catalog, genres);
        let (summaries, _) = watch::channel(catalog.into_iter().map(fresh_summary).collect());
        Self {
            bank,
            summaries,
            tallies: Mutex::new(Tallies::default()),
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn tallies(&self) -> std::sync::MutexGuard<'_, Tallies> {
        self.tallies.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for FakeTriviaRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn mastery_level(correct_answers: u32) -> &'static str {
    match correct_answers {
        0..10 => "Rookie",
        10..30 => "Enthusiast",
        30..60 => "Connoisseur",
        _ => "Sensei",
    }
}

#[async_trait::async_trait]
impl TriviaRepository for FakeTriviaRepository {
    async fn get_trivia_summaries(&self) -> Result<Vec<TriviaSummary>> {
        Ok(self.summaries.borrow().clone())
    }

    fn subscribe_summaries(&self) -> watch::Receiver<Vec<TriviaSummary>> {
        self.summaries.subscribe()
    }

    async fn get_questions(
        &self,
        anime_id: u64,
        difficulty: TriviaDifficulty,
    ) -> Result<Vec<TriviaQuestion>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let set = self.bank.get(&anime_id).ok_or_else(|| {
            Error::Trivia(format!("no trivia available for anime {}", anime_id))
        })?;
        let questions = set.get(&difficulty).ok_or_else(|| {
            Error::Trivia(format!(
                "no {} questions for anime {}",
                difficulty.as_display(),
                anime_id
            ))
        })?;

        debug!(anime_id, difficulty = ?difficulty, "Loaded trivia questions");
        Ok(questions.clone())
    }

    async fn record_result(
        &self,
        anime_id: u64,
        difficulty: TriviaDifficulty,
        score: u32,
        total_questions: u32,
    ) -> Result<()> {
        if score > total_questions {
            return Err(Error::InvalidInput(format!(
                "score {} exceeds {} questions",
                score, total_questions
            )));
        }
        if !self.summaries.borrow().iter().any(|s| s.anime.id == anime_id) {
            return Err(Error::Trivia(format!("no trivia available for anime {}", anime_id)));
        }

        {
            let mut tallies = self.tallies();
            tallies.total_answered += total_questions;
            if total_questions > 0 && score == total_questions {
                tallies.perfect_runs += 1;
            }
            *tallies.correct_by_difficulty.entry(difficulty).or_insert(0) += score;
        }

        self.summaries.send_modify(|summaries| {
            if let Some(summary) = summaries.iter_mut().find(|s| s.anime.id == anime_id) {
                summary.last_score = Some(score);
                summary.total_questions = total_questions;
                summary.last_difficulty = Some(difficulty);
                summary.best_score = summary.best_score.max(score);
            }
        });

        info!(anime_id, score, total_questions, "Recorded trivia result");
        Ok(())
    }

    async fn profile_stats(&self) -> Result<TriviaProfileStats> {
        let tallies = self.tallies().clone();
        let correct: u32 = tallies.correct_by_difficulty.values().sum();
        Ok(TriviaProfileStats {
            total_answered: tallies.total_answered,
            perfect_runs: tallies.perfect_runs,
            mastery_level: mastery_level(correct).to_string(),
            scores_by_difficulty: tallies.correct_by_difficulty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_anime_has_no_questions() {
        let repo = FakeTriviaRepository::new();
        let err = repo.get_questions(77, TriviaDifficulty::Easy).await.unwrap_err();
        assert!(matches!(err, Error::Trivia(_)));
    }

    #[tokio::test]
    async fn test_best_score_never_decreases() {
        let repo = FakeTriviaRepository::new();
        repo.record_result(3, TriviaDifficulty::Easy, 3, 3).await.unwrap();
        repo.record_result(3, TriviaDifficulty::Hard, 1, 3).await.unwrap();

        let summaries = repo.get_trivia_summaries().await.unwrap();
        let made_in_abyss = summaries.iter().find(|s| s.anime.id == 3).unwrap();
        assert_eq!(made_in_abyss.last_score, Some(1));
        assert_eq!(made_in_abyss.last_difficulty, Some(TriviaDifficulty::Hard));
        assert_eq!(made_in_abyss.best_score, 3);

        let untouched = summaries.iter().find(|s| s.anime.id == 1).unwrap();
        assert_eq!(untouched.last_score, None);
        assert_eq!(untouched.total_questions, 3);
    }

    #[tokio::test]
    async fn test_profile_stats_accumulate() {
        let repo = FakeTriviaRepository::new();
        repo.record_result(1, TriviaDifficulty::Easy, 3, 3).await.unwrap();
        repo.record_result(2, TriviaDifficulty::Easy, 2, 3).await.unwrap();
        repo.record_result(2, TriviaDifficulty::Medium, 1, 3).await.unwrap();

        let stats = repo.profile_stats().await.unwrap();
        assert_eq!(stats.total_answered, 9);
        assert_eq!(stats.perfect_runs, 1);
        assert_eq!(stats.scores_by_difficulty[&TriviaDifficulty::Easy], 5);
        assert_eq!(stats.scores_by_difficulty[&TriviaDifficulty::Medium], 1);
        assert_eq!(stats.mastery_level, "Rookie");
    }

    #[tokio::test]
    async fn test_subscribers_see_recorded_results() {
        let repo = FakeTriviaRepository::new();
        let mut rx = repo.subscribe_summaries();
        assert!(!rx.has_changed().unwrap());
        assert!(rx.borrow().iter().all(|s| s.last_score.is_none()));

        repo.record_result(6, TriviaDifficulty::Medium, 2, 3).await.unwrap();

        assert!(rx.has_changed().unwrap());
        let summaries = rx.borrow_and_update().clone();
        let fmab = summaries.iter().find(|s| s.anime.id == 6).unwrap();
        assert_eq!(fmab.last_score, Some(2));
        assert_eq!(fmab.last_difficulty, Some(TriviaDifficulty::Medium));

        // Rejected results publish nothing
        let _ = repo.record_result(6, TriviaDifficulty::Medium, 5, 3).await;
        let _ = repo.record_result(404, TriviaDifficulty::Easy, 1, 3).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_score_above_total_rejected() {
        let repo = FakeTriviaRepository::new();
        let err = repo.record_result(1, TriviaDifficulty::Easy, 4, 3).await;
        assert!(matches!(err, Err(Error::InvalidInput(_))));
    }
}
