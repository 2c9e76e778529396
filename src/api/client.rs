//! HTTP client for the vocabulary backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use tracing::{debug, info, instrument, warn};

use crate::game::{Level, Word};
use crate::hints::HintGrant;
use crate::progress::ProgressStats;
use crate::session::RoundReport;

use super::error::ApiError;
use super::service::WordService;
use super::types::{
    FeedbackPayload, HintPayload, LevelPayload, LogGameBody, PlacementSubmitBody, UseHintBody,
    WordPayload,
};

/// Timeout applied to every backend call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the backend endpoints. Cheap to clone; the inner HTTP client
/// is reference-counted.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    token: Option<String>,
}

impl ApiClient {
    /// Builds a client for the given backend and learner.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] when the underlying HTTP client cannot
    /// be constructed.
    #[instrument(skip(token))]
    pub fn new(base_url: &str, username: &str, token: Option<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::network)?;
        info!(
            base_url,
            username,
            authenticated = token.is_some(),
            "API client ready"
        );
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            token,
        })
    }

    /// Learner this client submits as.
    pub fn username(&self) -> &str {
        &self.username
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn transport(error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::network("request timed out")
        } else {
            ApiError::network(error)
        }
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!("Backend rejected credentials");
                Err(ApiError::AuthRequired)
            }
            status => {
                warn!(%status, "Backend returned an error status");
                Err(ApiError::network(format!("server returned {status}")))
            }
        }
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(ApiError::validation)
    }

    /// Fetches instructor feedback, if any was left for this learner.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, auth, or parse failure.
    #[instrument(skip(self))]
    pub async fn fetch_feedback(&self) -> Result<Option<String>, ApiError> {
        let response = self
            .authorize(self.client.get(self.endpoint("/api/feedback")))
            .send()
            .await
            .map_err(Self::transport)?;
        let payload: FeedbackPayload = Self::parse(Self::check(response).await?).await?;
        Ok(payload.feedback)
    }
}

#[async_trait]
impl WordService for ApiClient {
    #[instrument(skip(self))]
    async fn fetch_word(&self, level: Level, adaptive: bool) -> Result<Word, ApiError> {
        let response = self
            .authorize(self.client.get(self.endpoint("/api/word")))
            .query(&[
                ("level", level.to_string()),
                ("use_model", adaptive.to_string()),
                ("username", self.username.clone()),
            ])
            .send()
            .await
            .map_err(Self::transport)?;
        let payload: WordPayload = Self::parse(Self::check(response).await?).await?;
        let word = Word::try_from(payload).map_err(ApiError::validation)?;
        debug!(word = %word.text(), "Word fetched");
        Ok(word)
    }

    #[instrument(skip(self, report))]
    async fn log_result(&self, report: &RoundReport) -> Result<(), ApiError> {
        let body = LogGameBody::from(report);
        let response = self
            .authorize(self.client.post(self.endpoint("/api/log_game")))
            .json(&body)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check(response).await?;
        debug!(word = %body.word, won = body.won, "Round logged");
        Ok(())
    }

    #[instrument(skip(self, guessed))]
    async fn consume_hint(&self, word: &str, guessed: &[char]) -> Result<HintGrant, ApiError> {
        let body = UseHintBody {
            word: word.to_string(),
            guessed_letters: guessed.to_vec(),
        };
        let response = self
            .authorize(self.client.post(self.endpoint("/api/use_hint")))
            .json(&body)
            .send()
            .await
            .map_err(Self::transport)?;
        let payload: HintPayload = Self::parse(Self::check(response).await?).await?;
        let letter = payload
            .revealed_letter
            .chars()
            .next()
            .ok_or_else(|| ApiError::validation("hint response carried no letter"))?;
        debug!(%letter, balance = payload.hint_credits, "Hint granted");
        Ok(HintGrant::new(letter, payload.hint_credits))
    }

    #[instrument(skip(self))]
    async fn fetch_stats(&self) -> Result<ProgressStats, ApiError> {
        let response = self
            .authorize(self.client.get(self.endpoint("/api/statistics")))
            .send()
            .await
            .map_err(Self::transport)?;
        Self::parse(Self::check(response).await?).await
    }

    #[instrument(skip(self))]
    async fn fetch_placement_questions(&self) -> Result<Vec<Word>, ApiError> {
        let response = self
            .authorize(self.client.get(self.endpoint("/api/placement_questions")))
            .send()
            .await
            .map_err(Self::transport)?;
        let payloads: Vec<WordPayload> = Self::parse(Self::check(response).await?).await?;
        let words = payloads
            .into_iter()
            .map(|payload| Word::try_from(payload).map_err(ApiError::validation))
            .collect::<Result<Vec<_>, _>>()?;
        info!(count = words.len(), "Placement questions fetched");
        Ok(words)
    }

    #[instrument(skip(self))]
    async fn submit_placement(
        &self,
        username: &str,
        correct: u32,
        total: u32,
    ) -> Result<Level, ApiError> {
        let body = PlacementSubmitBody {
            username: username.to_string(),
            correct_answers: correct,
            total_questions: total,
        };
        let response = self
            .authorize(self.client.post(self.endpoint("/api/placement_submit")))
            .json(&body)
            .send()
            .await
            .map_err(Self::transport)?;
        let payload: LevelPayload = Self::parse(Self::check(response).await?).await?;
        let level = payload.level.parse::<Level>().map_err(|_| {
            ApiError::validation(format!("unknown proficiency level '{}'", payload.level))
        })?;
        info!(%level, correct, total, "Placement submitted");
        Ok(level)
    }
}
