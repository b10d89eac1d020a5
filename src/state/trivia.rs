use std::sync::Arc;

use tracing::warn;

use crate::catalog::{Anime, TriviaDifficulty, TriviaQuestion};
use crate::error::Result;
use crate::repository::TriviaRepository;
use crate::usecase::GetAnimeDetail;

/// Progress through one quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizState {
    pub anime: Anime,
    pub difficulty: Option<TriviaDifficulty>,
    pub questions: Vec<TriviaQuestion>,
    pub current_index: usize,
    pub selected_answer: Option<usize>,
    pub is_answer_correct: Option<bool>,
    pub score: u32,
    pub finished: bool,
}

impl QuizState {
    pub fn new(anime: Anime) -> Self {
        Self {
            anime,
            difficulty: None,
            questions: Vec::new(),
            current_index: 0,
            selected_answer: None,
            is_answer_correct: None,
            score: 0,
            finished: false,
        }
    }

    pub fn current_question(&self) -> Option<&TriviaQuestion> {
        self.questions.get(self.current_index)
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.total_questions()
    }

    fn reset(&mut self, difficulty: Option<TriviaDifficulty>, questions: Vec<TriviaQuestion>) {
        self.difficulty = difficulty;
        self.questions = questions;
        self.current_index = 0;
        self.selected_answer = None;
        self.is_answer_correct = None;
        self.score = 0;
        self.finished = false;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriviaPlayState {
    Loading,
    Error(String),
    Ready(QuizState),
}

/// Plays a trivia quiz for one anime and records the result when it ends
pub struct TriviaPlay {
    anime_id: u64,
    detail: Arc<GetAnimeDetail>,
    trivia: Arc<dyn TriviaRepository>,
    state: TriviaPlayState,
}

impl TriviaPlay {
    pub fn new(anime_id: u64, detail: Arc<GetAnimeDetail>, trivia: Arc<dyn TriviaRepository>) -> Self {
        Self {
            anime_id,
            detail,
            trivia,
            state: TriviaPlayState::Loading,
        }
    }

    pub fn state(&self) -> &TriviaPlayState {
        &self.state
    }

    fn quiz_mut(&mut self) -> Option<&mut QuizState> {
        match &mut self.state {
            TriviaPlayState::Ready(quiz) => Some(quiz),
            _ => None,
        }
    }

    pub async fn load(&mut self) -> &TriviaPlayState {
        self.state = TriviaPlayState::Loading;
        self.state = match self.detail.execute(self.anime_id).await {
            Ok(detail) => TriviaPlayState::Ready(QuizState::new(detail.anime)),
            Err(err) => TriviaPlayState::Error(err.to_string()),
        };
        &self.state
    }

    /// Load questions for `difficulty` and start over from the first one
    pub async fn select_difficulty(&mut self, difficulty: TriviaDifficulty) -> &TriviaPlayState {
        let TriviaPlayState::Ready(current) = &self.state else {
            return &self.state;
        };
        let mut quiz = current.clone();

        self.state = TriviaPlayState::Loading;
        self.state = match self.trivia.get_questions(self.anime_id, difficulty).await {
            Ok(questions) => {
                quiz.reset(Some(difficulty), questions);
                TriviaPlayState::Ready(quiz)
            }
            Err(err) => TriviaPlayState::Error(err.to_string()),
        };
        &self.state
    }

    /// Answer the current question; only the first answer counts
    pub fn answer(&mut self, answer_index: usize) {
        let Some(quiz) = self.quiz_mut() else {
            return;
        };
        if quiz.selected_answer.is_some() || quiz.finished {
            return;
        }
        let Some(question) = quiz.current_question() else {
            return;
        };

        let correct = question.is_correct(answer_index);
        quiz.selected_answer = Some(answer_index);
        quiz.is_answer_correct = Some(correct);
        if correct {
            quiz.score += 1;
        }
    }

    /// Move past an answered question, finishing the quiz after the last one
    pub async fn next(&mut self) -> Result<()> {
        let Some(quiz) = self.quiz_mut() else {
            return Ok(());
        };
        if quiz.selected_answer.is_none() || quiz.finished {
            return Ok(());
        }

        if !quiz.is_last_question() {
            quiz.current_index += 1;
            quiz.selected_answer = None;
            quiz.is_answer_correct = None;
            return Ok(());
        }

        quiz.finished = true;
        let Some(difficulty) = quiz.difficulty else {
            return Ok(());
        };
        let (score, total) = (quiz.score, quiz.total_questions() as u32);

        self.trivia
            .record_result(self.anime_id, difficulty, score, total)
            .await
            .inspect_err(|e| warn!(anime_id = self.anime_id, error = %e, "Could not record trivia result"))
    }

    /// Back to difficulty selection with progress cleared
    pub fn restart(&mut self) {
        if let Some(quiz) = self.quiz_mut() {
            quiz.reset(None, Vec::new());
        }
    }
}
