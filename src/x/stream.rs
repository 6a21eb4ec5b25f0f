use std::pin::Pin;

use bytes::Bytes;
use futures::{Stream, StreamExt};

use crate::domain::StreamEvent;

use super::{
    client::{XApiClient, XApiError, API_BASE},
    types::{AddRulesRequest, DeleteRulesRequest, RuleIds, RuleSpec, RulesResponse, StreamPayload},
};

impl XApiClient {
    /// Replaces whatever filter rules a previous run left behind with the
    /// single rule this bot listens on.
    pub async fn reset_stream_rules(&self, rule_value: &str) -> Result<(), XApiError> {
        let rules_url = format!("{API_BASE}/tweets/search/stream/rules");

        let response = self
            .http
            .get(&rules_url)
            .bearer_auth(&self.config.bearer_token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(XApiError::Status(response.status()));
        }
        let existing: RulesResponse = response.json().await?;

        if !existing.data.is_empty() {
            for rule in &existing.data {
                tracing::debug!(target: "stream", rule = %rule.value, "removing stale filter rule");
            }
            let ids: Vec<String> = existing.data.into_iter().map(|rule| rule.id).collect();
            tracing::info!(target: "stream", count = ids.len(), "deleting old filter rules");
            let response = self
                .http
                .post(&rules_url)
                .bearer_auth(&self.config.bearer_token)
                .json(&DeleteRulesRequest {
                    delete: RuleIds { ids },
                })
                .send()
                .await?;
            if !response.status().is_success() {
                return Err(XApiError::Status(response.status()));
            }
        }

        let response = self
            .http
            .post(&rules_url)
            .bearer_auth(&self.config.bearer_token)
            .json(&AddRulesRequest {
                add: vec![RuleSpec {
                    value: rule_value.to_string(),
                }],
            })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(XApiError::Status(response.status()));
        }

        tracing::info!(target: "stream", rule = rule_value, "filter rule installed");
        Ok(())
    }

    /// Opens the long-lived filtered stream connection.
    pub async fn connect_stream(&self) -> Result<EventStream, XApiError> {
        let response = self
            .http
            .get(format!("{API_BASE}/tweets/search/stream"))
            .bearer_auth(&self.config.bearer_token)
            .query(&[
                ("tweet.fields", "referenced_tweets,author_id"),
                ("expansions", "author_id"),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(XApiError::Status(response.status()));
        }

        Ok(EventStream {
            bytes: Box::pin(response.bytes_stream()),
            buffer: Vec::new(),
        })
    }
}

/// Decodes the newline-delimited JSON body of a filtered stream response
/// into events, skipping keep-alive blank lines.
pub struct EventStream {
    bytes: Pin<Box<dyn Stream<Item = reqwest::Result<Bytes>> + Send>>,
    buffer: Vec<u8>,
}

impl EventStream {
    /// The next decoded event, or `None` once the server closed the stream.
    pub async fn next_event(&mut self) -> Result<Option<StreamEvent>, XApiError> {
        loop {
            while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = self.buffer.drain(..=pos).collect();
                if let Some(event) = decode_line(&String::from_utf8_lossy(&line)) {
                    return Ok(Some(event));
                }
            }

            match self.bytes.next().await {
                Some(Ok(chunk)) => self.buffer.extend_from_slice(&chunk),
                Some(Err(err)) => return Err(XApiError::Request(err)),
                None => return Ok(None),
            }
        }
    }
}

fn decode_line(line: &str) -> Option<StreamEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str::<StreamPayload>(line) {
        Ok(payload) => Some(payload.data),
        Err(err) => {
            tracing::warn!(target: "stream", error = %err, "skipping undecodable stream line");
            None
        }
    }
}
