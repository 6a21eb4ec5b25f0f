use std::{collections::HashSet, future::Future, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use reqwest::Client;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("trusted list request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("trusted list fetch returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Where the raw newline-delimited list text comes from.
pub trait ListSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<String, FetchError>> + Send;
}

pub struct HttpListSource {
    http: Client,
    url: Url,
}

impl HttpListSource {
    pub fn new(http: Client, url: Url) -> Self {
        Self { http, url }
    }
}

impl ListSource for HttpListSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        let response = self.http.get(self.url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }
        Ok(response.text().await?)
    }
}

/// The curated set of maximally reputable handles, replaced wholesale on
/// every successful refresh.
#[derive(Debug, Clone)]
pub struct TrustedList {
    pub accounts: HashSet<String>,
    pub fetched_at: DateTime<Utc>,
}

impl TrustedList {
    pub fn contains(&self, handle: &str) -> bool {
        self.accounts.contains(&handle.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

pub struct TrustedListCache<S> {
    source: S,
    ttl: Duration,
    current: RwLock<Option<Arc<TrustedList>>>,
    refresh: tokio::sync::Mutex<()>,
}

impl<S: ListSource> TrustedListCache<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            current: RwLock::new(None),
            refresh: tokio::sync::Mutex::new(()),
        }
    }

    /// Returns the cached list when it is younger than the TTL, otherwise
    /// refreshes it. A failed refresh falls back to the stale list with its
    /// timestamp untouched, so the next call retries instead of waiting out
    /// another TTL; with nothing cached yet it yields an empty list.
    pub async fn get(&self) -> Arc<TrustedList> {
        if let Some(list) = self.fresh() {
            return list;
        }

        // At most one refresh in flight. A caller that finds a refresh
        // already running keeps serving the previous list instead of queueing
        // behind the fetch; only the first-ever fetch has nothing to fall
        // back on and must wait.
        let _guard = match self.refresh.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                if let Some(stale) = self.current.read().clone() {
                    return stale;
                }
                self.refresh.lock().await
            }
        };
        if let Some(list) = self.fresh() {
            return list;
        }

        match self.source.fetch().await {
            Ok(body) => {
                let list = Arc::new(TrustedList {
                    accounts: parse_handles(&body),
                    fetched_at: Utc::now(),
                });
                tracing::info!(
                    target: "trust",
                    accounts = list.len(),
                    "trusted list refreshed"
                );
                *self.current.write() = Some(list.clone());
                list
            }
            Err(err) => {
                tracing::warn!(target: "trust", error = %err, "trusted list refresh failed");
                match self.current.read().clone() {
                    Some(stale) => stale,
                    None => Arc::new(TrustedList {
                        accounts: HashSet::new(),
                        fetched_at: Utc::now(),
                    }),
                }
            }
        }
    }

    fn fresh(&self) -> Option<Arc<TrustedList>> {
        let guard = self.current.read();
        let list = guard.as_ref()?;
        let age = Utc::now().signed_duration_since(list.fetched_at);
        // A negative age means clock skew; treat the entry as fresh.
        let within_ttl = age.to_std().map(|age| age < self.ttl).unwrap_or(true);
        within_ttl.then(|| list.clone())
    }
}

/// Trims, drops blanks, lower-cases, and deduplicates one handle per line.
pub fn parse_handles(body: &str) -> HashSet<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use parking_lot::Mutex;
    use reqwest::StatusCode;

    use super::*;

    struct ScriptedSource {
        calls: AtomicUsize,
        responses: Mutex<VecDeque<Result<String, FetchError>>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<String, FetchError>>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                responses: Mutex::new(responses.into()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ListSource for ScriptedSource {
        async fn fetch(&self) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR)))
        }
    }

    fn failure() -> Result<String, FetchError> {
        Err(FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR))
    }

    #[test]
    fn parse_handles_cleans_input() {
        let parsed = parse_handles("  Alice \n\nBOB\nalice\n   \ncarol  ");
        let expected: HashSet<String> = ["alice", "bob", "carol"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(parsed, expected);
    }

    #[tokio::test]
    async fn fresh_cache_is_reused_without_refetch() {
        let cache = TrustedListCache::new(
            ScriptedSource::new(vec![Ok("alice\nbob".to_string())]),
            Duration::from_secs(3600),
        );
        let first = cache.get().await;
        let second = cache.get().await;
        assert_eq!(first.accounts, second.accounts);
        assert_eq!(cache.source.calls(), 1);
    }

    #[tokio::test]
    async fn expired_cache_refetches() {
        let cache = TrustedListCache::new(
            ScriptedSource::new(vec![Ok("alice".to_string()), Ok("alice\nbob".to_string())]),
            Duration::ZERO,
        );
        assert_eq!(cache.get().await.len(), 1);
        assert_eq!(cache.get().await.len(), 2);
        assert_eq!(cache.source.calls(), 2);
    }

    #[tokio::test]
    async fn failed_refresh_returns_stale_list_and_retries_next_call() {
        let cache = TrustedListCache::new(
            ScriptedSource::new(vec![
                Ok("alice\nbob".to_string()),
                failure(),
                Ok("carol".to_string()),
            ]),
            Duration::ZERO,
        );
        let initial = cache.get().await;
        assert!(initial.contains("Alice"));

        let stale = cache.get().await;
        assert_eq!(stale.accounts, initial.accounts);

        // The stale fallback did not touch the timestamp, so this retries.
        let refreshed = cache.get().await;
        assert!(refreshed.contains("carol"));
        assert_eq!(cache.source.calls(), 3);
    }

    struct SlowRefreshSource {
        calls: AtomicUsize,
    }

    impl ListSource for SlowRefreshSource {
        async fn fetch(&self) -> Result<String, FetchError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                return Ok("alice".to_string());
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok("alice\nbob".to_string())
        }
    }

    #[tokio::test]
    async fn reader_gets_stale_list_while_refresh_is_in_flight() {
        let cache = Arc::new(TrustedListCache::new(
            SlowRefreshSource {
                calls: AtomicUsize::new(0),
            },
            Duration::ZERO,
        ));
        assert_eq!(cache.get().await.len(), 1);

        let refresher = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.get().await })
        };
        // Let the spawned call take the refresh lock and park in the fetch.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let stale = tokio::time::timeout(Duration::from_millis(300), cache.get())
            .await
            .expect("reader must not wait behind the in-flight refresh");
        assert_eq!(stale.len(), 1);
        assert!(stale.contains("alice"));

        let refreshed = refresher.await.expect("refresh task should finish");
        assert_eq!(refreshed.len(), 2);
    }

    #[tokio::test]
    async fn failure_without_prior_cache_yields_empty_list() {
        let cache = TrustedListCache::new(
            ScriptedSource::new(vec![failure(), Ok("alice".to_string())]),
            Duration::from_secs(3600),
        );
        assert!(cache.get().await.is_empty());

        // The empty fallback is not cached; the next call fetches again.
        assert_eq!(cache.get().await.len(), 1);
        assert_eq!(cache.source.calls(), 2);
    }
}
