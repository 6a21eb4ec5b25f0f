use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::time::sleep;

use crate::{
    config::AppConfig,
    domain::{AnalysisOutcome, StreamEvent},
    infrastructure::{directories::ResolvedPaths, shutdown::Shutdown},
    trigger,
    trust::{reply, HttpListSource, ProfileAnalyzer, TrustedListCache},
    x::{types::TweetObject, XApiClient, XApiError},
};

const RECONNECT_DELAY: Duration = Duration::from_secs(15);

pub struct RugGuardApp {
    _paths: ResolvedPaths,
    client: XApiClient,
    analyzer: Arc<ProfileAnalyzer<XApiClient, HttpListSource>>,
    config: Arc<AppConfig>,
    shutdown: Shutdown,
}

impl RugGuardApp {
    pub fn initialize(config: AppConfig, paths: ResolvedPaths, shutdown: Shutdown) -> Result<Self> {
        let config = Arc::new(config);

        let http = Client::builder()
            .user_agent(format!("rugguard-bot/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let client = XApiClient::new(http.clone(), config.x_api.clone());
        let trusted = Arc::new(TrustedListCache::new(
            HttpListSource::new(http, config.trust.list_url.clone()),
            config.trust.cache_ttl,
        ));
        let analyzer = Arc::new(ProfileAnalyzer::new(client.clone(), trusted));

        Ok(Self {
            _paths: paths,
            client,
            analyzer,
            config,
            shutdown,
        })
    }

    pub async fn run(self) -> Result<()> {
        tracing::info!("RUGGUARD trust bot starting");

        let rule = format!(
            "@{} {}",
            self.config.bot.username, self.config.bot.trigger_phrase
        );
        self.client
            .reset_stream_rules(&rule)
            .await
            .context("failed to configure stream filter rules")?;

        let app = Arc::new(self);
        let mut shutdown = app.shutdown.subscribe();

        loop {
            if shutdown.is_triggered() {
                break;
            }

            let connected = tokio::select! {
                res = app.client.connect_stream() => res,
                _ = shutdown.notified() => break,
            };
            let mut stream = match connected {
                Ok(stream) => stream,
                Err(err) => {
                    tracing::error!(
                        target: "stream",
                        error = %err,
                        "failed to connect filtered stream"
                    );
                    tokio::select! {
                        _ = sleep(RECONNECT_DELAY) => continue,
                        _ = shutdown.notified() => break,
                    }
                }
            };
            tracing::info!(target: "stream", "filtered stream connected");

            loop {
                tokio::select! {
                    event = stream.next_event() => match event {
                        Ok(Some(event)) => app.dispatch(event),
                        Ok(None) => {
                            tracing::warn!(target: "stream", "stream closed by server; reconnecting");
                            break;
                        }
                        Err(err) => {
                            tracing::warn!(target: "stream", error = %err, "stream read failed; reconnecting");
                            break;
                        }
                    },
                    _ = shutdown.notified() => break,
                }
            }

            if shutdown.is_triggered() {
                break;
            }
            tokio::select! {
                _ = sleep(RECONNECT_DELAY) => {}
                _ = shutdown.notified() => break,
            }
        }

        tracing::info!("RUGGUARD trust bot stopped");
        Ok(())
    }

    fn dispatch(self: &Arc<Self>, event: StreamEvent) {
        let Some(parent_id) = trigger::detect(&event, &self.config.bot.trigger_phrase) else {
            return;
        };
        tracing::info!(
            target: "stream",
            event_id = %event.id,
            author_id = event.author_id.as_deref().unwrap_or("-"),
            parent_id = %parent_id,
            "trigger phrase detected"
        );

        // One task per trigger; a failing event never takes the bot down.
        let app = self.clone();
        tokio::spawn(async move {
            if let Err(err) = app.handle_trigger(&event, &parent_id).await {
                tracing::error!(
                    target: "analysis",
                    error = %err,
                    event_id = %event.id,
                    "failed to process trigger"
                );
            }
        });
    }

    async fn handle_trigger(&self, event: &StreamEvent, parent_id: &str) -> Result<()> {
        let outcome = match resolve_parent_author(self.client.get_tweet(parent_id).await, parent_id)
        {
            Ok(author_id) => self.analyzer.analyze(&author_id).await,
            Err(failure) => failure,
        };
        let text = reply::render(&outcome, self.config.trust.min_trusted_followers);

        self.client
            .post_reply(&text, &event.id)
            .await
            .context("failed to post analysis reply")?;
        tracing::info!(target: "x", in_reply_to = %event.id, "analysis reply posted");
        Ok(())
    }
}

/// A parent post that is gone (or has no resolvable author) and a failed
/// lookup both still get a reply, as a failure outcome.
fn resolve_parent_author(
    lookup: Result<Option<TweetObject>, XApiError>,
    parent_id: &str,
) -> Result<String, AnalysisOutcome> {
    match lookup {
        Ok(parent) => match parent.and_then(|tweet| tweet.author_id) {
            Some(author_id) => Ok(author_id),
            None => {
                tracing::warn!(
                    target: "analysis",
                    parent_id,
                    "could not resolve the original post's author"
                );
                Err(AnalysisOutcome::Failure("Original post not found.".to_string()))
            }
        },
        Err(err) => {
            tracing::warn!(
                target: "analysis",
                parent_id,
                error = %err,
                "original post lookup failed"
            );
            Err(AnalysisOutcome::Failure(format!(
                "Failed to fetch the original post from X. (Error: {err})"
            )))
        }
    }
}
