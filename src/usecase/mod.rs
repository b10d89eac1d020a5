mod detail;
mod home;

pub use detail::GetAnimeDetail;
pub use home::{GetHomeContent, HomeOptions, MAX_HOME_SECTIONS};

use std::future::Future;
use std::time::Duration;

use crate::error::{Error, Result};

/// Bound a repository call so one hung upstream can't block the caller
pub(crate) async fn with_timeout<T>(
    limit: Duration,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout(limit)),
    }
}
