use crate::catalog::HomeContent;
use crate::error::Result;
use crate::usecase::GetHomeContent;

const DEFAULT_ERROR: &str = "Something unexpected went wrong";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeState {
    Loading,
    Success(HomeContent),
    Error(String),
}

impl HomeState {
    pub fn from_result(result: Result<HomeContent>) -> Self {
        match result {
            Ok(content) => HomeState::Success(content),
            Err(err) => {
                let message = err.to_string();
                if message.trim().is_empty() {
                    HomeState::Error(DEFAULT_ERROR.to_string())
                } else {
                    HomeState::Error(message)
                }
            }
        }
    }
}

/// Home screen state, refreshed through the aggregator
pub struct HomeModel {
    use_case: GetHomeContent,
    state: HomeState,
}

impl HomeModel {
    pub fn new(use_case: GetHomeContent) -> Self {
        Self {
            use_case,
            state: HomeState::Loading,
        }
    }

    pub fn state(&self) -> &HomeState {
        &self.state
    }

    /// Replace the current state with a fresh aggregation
    pub async fn load(&mut self) -> &HomeState {
        self.state = HomeState::Loading;
        self.state = HomeState::from_result(self.use_case.execute().await);
        &self.state
    }
}
