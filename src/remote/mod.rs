mod client;

pub use client::{ApiClient, ApiResponse, Meta};

use std::future::Future;

use tracing::{debug, warn};

use crate::catalog::{Anime, AnimeDetail, Genre};
use crate::error::{Error, Result};
use crate::repository::AnimeRepository;

/// HTTP statuses that send a request to its fallback endpoint
const FALLBACK_STATUSES: &[u16] = &[404, 408, 429, 500, 502, 503, 504];

const HERO_ERROR: &str = "Could not load the featured anime. Try again later.";
const GENRE_ERROR: &str = "Could not load anime for the requested genre.";
const DETAIL_ERROR: &str = "Could not load the anime details.";
const SEARCH_ERROR: &str = "Search is not available right now.";
const GENRES_ERROR: &str = "Could not load the genre list.";

/// Whether a failed primary request should be retried against the fallback endpoint
pub fn should_fall_back(err: &Error) -> bool {
    match err {
        Error::Api { status } => FALLBACK_STATUSES.contains(status),
        Error::Network(_) | Error::Json(_) | Error::Timeout(_) => true,
        _ => false,
    }
}

/// Anime repository backed by the REST API
pub struct RemoteAnimeRepository {
    api: ApiClient,
    page_limit: u32,
}

impl RemoteAnimeRepository {
    pub fn new(api: ApiClient, page_limit: u32) -> Self {
        Self { api, page_limit }
    }

    async fn fetch_with_fallback<T>(
        &self,
        what: &str,
        primary: impl Future<Output = Result<T>>,
        fallback: impl Future<Output = Result<T>>,
        message: &str,
    ) -> Result<T> {
        match primary.await {
            Ok(value) => Ok(value),
            Err(err) if should_fall_back(&err) => {
                warn!(what, error = %err, "Primary endpoint failed, using fallback");
                fallback.await.map_err(|err| {
                    warn!(what, error = %err, "Fallback endpoint failed");
                    Error::Remote(message.to_string())
                })
            }
            Err(err) => {
                warn!(what, error = %err, "Request failed");
                Err(Error::Remote(message.to_string()))
            }
        }
    }

    async fn safe_call<T>(&self, what: &str, call: impl Future<Output = Result<T>>, message: &str) -> Result<T> {
        call.await.map_err(|err| {
            warn!(what, error = %err, "Request failed");
            Error::Remote(message.to_string())
        })
    }

    async fn top(&self, limit: u32) -> Result<Vec<Anime>> {
        self.api
            .get("anime/top", &[("limit", limit.to_string())])
            .await
    }
}

#[async_trait::async_trait]
impl AnimeRepository for RemoteAnimeRepository {
    async fn get_hero_recommendation(&self) -> Result<Anime> {
        let fallback = async {
            self.top(1)
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| Error::Remote("No featured anime found.".to_string()))
        };

        self.fetch_with_fallback("hero", self.api.get("anime/hero", &[]), fallback, HERO_ERROR)
            .await
    }

    async fn get_animes_by_genre(&self, genre_id: &str) -> Result<Vec<Anime>> {
        let path = format!("anime/by-genre/{}", urlencoding::encode(genre_id));
        let query = [("limit", self.page_limit.to_string())];
        let primary = self.api.get(&path, &query);

        let animes = self
            .fetch_with_fallback("by_genre", primary, self.top(self.page_limit), GENRE_ERROR)
            .await?;
        debug!(genre_id, count = animes.len(), "Fetched genre listing");
        Ok(animes)
    }

    async fn get_anime_detail(&self, anime_id: u64) -> Result<AnimeDetail> {
        let detail_path = format!("anime/{}/detail", anime_id);
        let anime_path = format!("anime/{}", anime_id);
        let fallback = async {
            let anime: Anime = self.api.get(&anime_path, &[]).await?;
            Ok(AnimeDetail::bare(anime))
        };

        self.fetch_with_fallback("detail", self.api.get(&detail_path, &[]), fallback, DETAIL_ERROR)
            .await
    }

    async fn search_anime(&self, query: &str) -> Result<Vec<Anime>> {
        let params = [
            ("q", query.to_string()),
            ("limit", self.page_limit.to_string()),
        ];
        let call = self.api.get("anime/search", &params);
        self.safe_call("search", call, SEARCH_ERROR).await
    }

    async fn get_genres(&self) -> Result<Vec<Genre>> {
        let params = [("includeAdult", "false".to_string())];
        let call = self.api.get("genres", &params);
        self.safe_call("genres", call, GENRES_ERROR).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    type Routes = HashMap<&'static str, (u16, String)>;

    /// Minimal HTTP/1.1 responder: serves canned bodies by request path
    /// (query string stripped) and records every path it was asked for.
    async fn serve(routes: Routes) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(Mutex::new(Vec::new()));
        let seen = hits.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let mut buf = vec![0u8; 8192];
                let mut read = 0;
                while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf[read..]).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    read += n;
                }
                let request = String::from_utf8_lossy(&buf[..read]).to_string();
                let target = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                let path = target.split('?').next().unwrap_or("/").to_string();
                seen.lock().unwrap().push(path.clone());

                let (status, body) = routes
                    .get(path.as_str())
                    .cloned()
                    .unwrap_or((404, r#"{"error":"not found"}"#.to_string()));
                let response = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}", addr), hits)
    }

    fn anime_json(id: u64, title: &str) -> String {
        format!(
            r#"{{"id":{id},"externalApiId":"x{id}","title":"{title}","synopsis":"s","coverImageUrl":"c","durationType":"SHORT","emissionStatus":"FINISHED","genres":[]}}"#
        )
    }

    fn repo(base_url: &str) -> RemoteAnimeRepository {
        RemoteAnimeRepository::new(ApiClient::new(base_url, Duration::from_secs(5)).unwrap(), 10)
    }

    #[test]
    fn test_fallback_classification() {
        for status in [404, 408, 429, 500, 502, 503, 504] {
            assert!(should_fall_back(&Error::Api { status }), "{status}");
        }
        for status in [400, 401, 403, 422] {
            assert!(!should_fall_back(&Error::Api { status }), "{status}");
        }
        assert!(should_fall_back(&Error::Timeout(Duration::from_secs(1))));
        assert!(!should_fall_back(&Error::AnimeNotFound(1)));
    }

    #[tokio::test]
    async fn test_hero_primary() {
        let mut routes = Routes::new();
        routes.insert("/anime/hero", (200, format!(r#"{{"data":{}}}"#, anime_json(9, "Frieren"))));
        let (base, hits) = serve(routes).await;

        let hero = repo(&base).get_hero_recommendation().await.unwrap();
        assert_eq!(hero.id, 9);
        assert_eq!(*hits.lock().unwrap(), vec!["/anime/hero".to_string()]);
    }

    #[tokio::test]
    async fn test_hero_falls_back_to_top_on_rate_limit() {
        let mut routes = Routes::new();
        routes.insert("/anime/hero", (429, "{}".to_string()));
        routes.insert(
            "/anime/top",
            (200, format!(r#"{{"data":[{}],"meta":{{"limit":1}}}}"#, anime_json(3, "Abyss"))),
        );
        let (base, hits) = serve(routes).await;

        let hero = repo(&base).get_hero_recommendation().await.unwrap();
        assert_eq!(hero.title, "Abyss");
        assert_eq!(
            *hits.lock().unwrap(),
            vec!["/anime/hero".to_string(), "/anime/top".to_string()]
        );
    }

    #[tokio::test]
    async fn test_forbidden_does_not_fall_back() {
        let mut routes = Routes::new();
        routes.insert("/anime/by-genre/1", (403, "{}".to_string()));
        routes.insert("/anime/top", (200, r#"{"data":[]}"#.to_string()));
        let (base, hits) = serve(routes).await;

        let err = repo(&base).get_animes_by_genre("1").await.unwrap_err();
        assert!(matches!(err, Error::Remote(ref m) if m == GENRE_ERROR));
        assert_eq!(*hits.lock().unwrap(), vec!["/anime/by-genre/1".to_string()]);
    }

    #[tokio::test]
    async fn test_genre_id_is_percent_encoded() {
        let mut routes = Routes::new();
        routes.insert(
            "/anime/by-genre/slice%20of%20life",
            (200, format!(r#"{{"data":[{}]}}"#, anime_json(4, "Yuru Camp"))),
        );
        let (base, _) = serve(routes).await;

        let animes = repo(&base).get_animes_by_genre("slice of life").await.unwrap();
        assert_eq!(animes.len(), 1);
    }

    #[tokio::test]
    async fn test_detail_falls_back_to_bare_anime() {
        let mut routes = Routes::new();
        routes.insert("/anime/5/detail", (500, "{}".to_string()));
        routes.insert("/anime/5", (200, format!(r#"{{"data":{}}}"#, anime_json(5, "Monster"))));
        let (base, _) = serve(routes).await;

        let detail = repo(&base).get_anime_detail(5).await.unwrap();
        assert_eq!(detail.anime.title, "Monster");
        assert!(detail.cultural_notes.is_empty());
        assert!(detail.trailers.is_empty());
    }

    #[tokio::test]
    async fn test_detail_primary_keeps_trailers() {
        let body = format!(
            r#"{{"data":{{"anime":{},"culturalNotes":["Onsen etiquette"],"trailers":[{{"number":1,"title":"PV","durationMinutes":2,"description":"First look","youtubeUrl":"https://www.youtube.com/watch?v=pv1"}}]}}}}"#,
            anime_json(5, "Monster")
        );
        let mut routes = Routes::new();
        routes.insert("/anime/5/detail", (200, body));
        let (base, hits) = serve(routes).await;

        let detail = repo(&base).get_anime_detail(5).await.unwrap();
        assert_eq!(detail.cultural_notes, vec!["Onsen etiquette".to_string()]);
        assert_eq!(detail.trailers.len(), 1);
        assert_eq!(detail.trailers[0].title, "PV");
        assert_eq!(detail.trailers[0].youtube_url, "https://www.youtube.com/watch?v=pv1");
        assert_eq!(*hits.lock().unwrap(), vec!["/anime/5/detail".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_fallback_reports_call_message() {
        let (base, _) = serve(Routes::new()).await;

        let err = repo(&base).get_hero_recommendation().await.unwrap_err();
        assert_eq!(err.to_string(), HERO_ERROR);
    }

    #[tokio::test]
    async fn test_search_has_no_fallback() {
        let mut routes = Routes::new();
        routes.insert("/anime/search", (503, "{}".to_string()));
        let (base, hits) = serve(routes).await;

        let err = repo(&base).search_anime("monster").await.unwrap_err();
        assert_eq!(err.to_string(), SEARCH_ERROR);
        assert_eq!(hits.lock().unwrap().len(), 1);
    }
}
