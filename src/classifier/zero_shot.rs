//! Zero-shot text classification over HTTP.
//!
//! Speaks the Hugging Face inference API shape:
//!
//! ```text
//! POST <endpoint>
//! Authorization: Bearer <token>
//! {"inputs": "<text>", "parameters": {"candidate_labels": ["...", "..."]}}
//! ```
//!
//! and accepts either of the response shapes providers return:
//! `{"labels": [...], "scores": [...]}` or `[{"label": "...", "score": 0.9}]`.

use super::{rank_descending, Classifier, ClassifierFailure, LabelScore};
use crate::config::ClassifierSettings;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [String],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Parallel { labels: Vec<String>, scores: Vec<f64> },
    Pairs(Vec<LabelScore>),
}

/// Blocking zero-shot classifier client
#[derive(Debug, Clone)]
pub struct ZeroShotClassifier {
    client: Client,
    endpoint: String,
    token: String,
}

impl ZeroShotClassifier {
    /// Build a client with an explicit timeout
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClassifierFailure> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(ClassifierFailure::NotConfigured(
                "classifier endpoint is empty".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifierFailure::Service(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            token: token.into(),
        })
    }

    /// Build a client from configuration, reading the token from the
    /// environment variable named in the settings.
    pub fn from_settings(settings: &ClassifierSettings) -> Result<Self, ClassifierFailure> {
        let token = settings.token().ok_or_else(|| {
            ClassifierFailure::NotConfigured(format!("{} is not set", settings.token_env))
        })?;
        Self::new(settings.endpoint.clone(), token, settings.timeout())
    }
}

impl Classifier for ZeroShotClassifier {
    fn classify(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<Vec<LabelScore>, ClassifierFailure> {
        info!("Classifying requirement against {} labels", labels.len());
        let request = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels: labels,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .map_err(|e| {
                warn!("Classification request failed: {}", e);
                ClassifierFailure::from_transport(&e)
            })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ClassifierFailure::from_transport(&e))?;

        if !status.is_success() {
            warn!("Classifier returned HTTP {}", status.as_u16());
            return Err(ClassifierFailure::from_status(status.as_u16(), &body));
        }

        let ranking = parse_response(&body)?;
        debug!("Classifier ranking: {:?}", ranking);
        Ok(ranking)
    }
}

/// Parse a zero-shot response body into a ranking, highest score first.
pub fn parse_response(body: &str) -> Result<Vec<LabelScore>, ClassifierFailure> {
    let parsed: ZeroShotResponse = serde_json::from_str(body)
        .map_err(|e| ClassifierFailure::Malformed(format!("unexpected response body: {}", e)))?;

    let mut ranking = match parsed {
        ZeroShotResponse::Parallel { labels, scores } => {
            if labels.len() != scores.len() {
                return Err(ClassifierFailure::Malformed(format!(
                    "{} labels but {} scores",
                    labels.len(),
                    scores.len()
                )));
            }
            labels
                .into_iter()
                .zip(scores)
                .map(|(label, score)| LabelScore { label, score })
                .collect::<Vec<_>>()
        }
        ZeroShotResponse::Pairs(pairs) => pairs,
    };

    if ranking.is_empty() {
        return Err(ClassifierFailure::Malformed("empty ranking".to_string()));
    }

    rank_descending(&mut ranking);
    Ok(ranking)
}
