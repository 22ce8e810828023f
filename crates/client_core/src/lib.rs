use async_trait::async_trait;
use reqwest::{multipart, Client};
use shared::{
    domain::Feature,
    protocol::{
        ErrorBody, HealthResponse, PredictResponse, PredictionInput, PredictionOutcome,
        TrainReport, TrainingOutcome,
    },
};
use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

pub mod error;
pub mod form;
pub mod presenter;
pub mod training;
pub mod workflow;

pub use error::WorkflowError;
pub use form::PredictionForm;
pub use presenter::{present, DisplayResult};
pub use training::{DatasetUpload, TrainingPayload, DATASET_PART_NAME};
pub use workflow::{TrainingPhase, WorkflowController, WorkflowState};

/// Shown when a training failure body carries no usable server message.
const TRAINING_FALLBACK_ERROR: &str = "an unknown error occurred during training";
/// Shown when a prediction failure body carries no usable server message.
const PREDICTION_FALLBACK_ERROR: &str = "prediction failed";

/// Checks that a configured server URL is something requests can be built
/// against. Trailing slashes are trimmed so path joining stays uniform.
pub fn validate_server_url(raw: &str) -> Result<String, WorkflowError> {
    let parsed = url::Url::parse(raw)
        .map_err(|err| WorkflowError::Validation(format!("invalid server url '{raw}': {err}")))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(WorkflowError::Validation(format!(
            "server url must start with http:// or https://, got '{raw}'"
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

/// The two-endpoint surface of the remote training/inference service, plus
/// its liveness probe. The orchestrator never touches HTTP directly; it
/// only sees this seam.
#[async_trait]
pub trait InferenceApi: Send + Sync {
    async fn train(&self, payload: TrainingPayload) -> Result<TrainReport, WorkflowError>;
    async fn predict(&self, input: &PredictionInput) -> Result<PredictResponse, WorkflowError>;
    async fn health(&self) -> Result<HealthResponse, WorkflowError>;
}

pub struct MissingInferenceApi;

#[async_trait]
impl InferenceApi for MissingInferenceApi {
    async fn train(&self, _payload: TrainingPayload) -> Result<TrainReport, WorkflowError> {
        Err(WorkflowError::Transport(
            "inference backend is unavailable".to_string(),
        ))
    }

    async fn predict(&self, _input: &PredictionInput) -> Result<PredictResponse, WorkflowError> {
        Err(WorkflowError::Transport(
            "inference backend is unavailable".to_string(),
        ))
    }

    async fn health(&self) -> Result<HealthResponse, WorkflowError> {
        Err(WorkflowError::Transport(
            "inference backend is unavailable".to_string(),
        ))
    }
}

/// `reqwest`-backed implementation of [`InferenceApi`].
pub struct HttpInferenceApi {
    http: Client,
    server_url: String,
}

impl HttpInferenceApi {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            server_url: server_url.into(),
        }
    }
}

fn transport(err: reqwest::Error) -> WorkflowError {
    WorkflowError::Transport(err.to_string())
}

/// Decodes a non-2xx response into the server's own `{error}` message,
/// falling back to a generic string when the body is absent or unusable.
async fn decode_failure(response: reqwest::Response, fallback: &str) -> WorkflowError {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) if !body.error.is_empty() => WorkflowError::Server(body.error),
        _ => {
            warn!(%status, "server failure without a usable error body");
            WorkflowError::Server(fallback.to_string())
        }
    }
}

#[async_trait]
impl InferenceApi for HttpInferenceApi {
    async fn train(&self, payload: TrainingPayload) -> Result<TrainReport, WorkflowError> {
        let part = multipart::Part::bytes(payload.dataset.bytes)
            .file_name(payload.dataset.filename);
        let form = multipart::Form::new().part(DATASET_PART_NAME, part);
        let response = self
            .http
            .post(format!("{}/train", self.server_url))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(decode_failure(response, TRAINING_FALLBACK_ERROR).await);
        }
        response
            .json::<TrainReport>()
            .await
            .map_err(|err| WorkflowError::Server(format!("invalid training response body: {err}")))
    }

    async fn predict(&self, input: &PredictionInput) -> Result<PredictResponse, WorkflowError> {
        let response = self
            .http
            .post(format!("{}/predict", self.server_url))
            .json(input)
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(decode_failure(response, PREDICTION_FALLBACK_ERROR).await);
        }
        response
            .json::<PredictResponse>()
            .await
            .map_err(|err| {
                WorkflowError::Server(format!("invalid prediction response body: {err}"))
            })
    }

    async fn health(&self) -> Result<HealthResponse, WorkflowError> {
        let response = self
            .http
            .get(format!("{}/health", self.server_url))
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(decode_failure(response, "health check failed").await);
        }
        response
            .json::<HealthResponse>()
            .await
            .map_err(|err| WorkflowError::Server(format!("invalid health response body: {err}")))
    }
}

/// Session notifications for anything driving a front end on top of the
/// client. Resolutions are broadcast as messages rather than delivered
/// through callbacks.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    TrainingResolved(TrainingOutcome),
    PredictionResolved(PredictionOutcome),
}

/// Orchestrates the two-phase train/predict workflow against one server.
///
/// Owns the session's [`WorkflowState`] (behind the controller) and the
/// prediction form; both are mutated only through the named transitions on
/// this type. Training and prediction track their in-flight state
/// independently, so one of each may be pending at the same time, but never
/// two of either.
pub struct EvaluatorClient<A: InferenceApi> {
    api: A,
    workflow: Mutex<WorkflowController>,
    form: Mutex<PredictionForm>,
    events: broadcast::Sender<ClientEvent>,
}

impl EvaluatorClient<HttpInferenceApi> {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_api(HttpInferenceApi::new(server_url))
    }
}

impl<A: InferenceApi> EvaluatorClient<A> {
    pub fn with_api(api: A) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            api,
            workflow: Mutex::new(WorkflowController::new()),
            form: Mutex::new(PredictionForm::new()),
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    pub async fn state(&self) -> WorkflowState {
        self.workflow.lock().await.state()
    }

    pub async fn prediction_input(&self) -> PredictionInput {
        self.form.lock().await.input().clone()
    }

    /// Updates one prediction form field; out-of-domain values are rejected
    /// and leave the form untouched.
    pub async fn set_field(
        &self,
        feature: Feature,
        value: &str,
    ) -> Result<PredictionInput, WorkflowError> {
        self.form.lock().await.set_field(feature, value)
    }

    /// Runs one training attempt: validates the selected dataset, marks the
    /// attempt pending, uploads, and applies the resolution to the session
    /// state. The resolution is also broadcast as a [`TrainingOutcome`].
    pub async fn train(
        &self,
        dataset: Option<DatasetUpload>,
    ) -> Result<TrainReport, WorkflowError> {
        let payload = TrainingPayload::build(dataset)?;
        self.workflow.lock().await.submit_training()?;
        info!(
            filename = %payload.dataset.filename,
            size_bytes = payload.dataset.bytes.len(),
            "training: request submitted"
        );

        let result = self.api.train(payload).await;
        let outcome = match &result {
            Ok(report) => TrainingOutcome::Completed {
                accuracy: report.accuracy,
            },
            Err(err) => TrainingOutcome::Failed {
                error: err.message().to_string(),
            },
        };
        self.workflow.lock().await.apply(&outcome);
        match &outcome {
            TrainingOutcome::Completed { accuracy } => {
                info!(accuracy, "training: completed");
            }
            TrainingOutcome::Failed { error } => {
                warn!(error = %error, "training: failed");
            }
        }
        let _ = self.events.send(ClientEvent::TrainingResolved(outcome));
        result
    }

    /// Runs one prediction attempt with the form's current selections. The
    /// gate requires the workflow to be in the `Trained` phase; failures
    /// surface to the caller and never mutate the session state.
    pub async fn predict(&self) -> Result<DisplayResult, WorkflowError> {
        let input = {
            let workflow = self.workflow.lock().await;
            let mut form = self.form.lock().await;
            form.submit(workflow.predict_allowed())?
        };

        let result = self.api.predict(&input).await;
        self.form.lock().await.resolve();
        match result {
            Ok(response) => {
                info!(prediction = %response.prediction, "prediction: resolved");
                let display = presenter::present(&response.prediction);
                let _ = self.events.send(ClientEvent::PredictionResolved(
                    PredictionOutcome::Labeled {
                        label: response.prediction,
                    },
                ));
                Ok(display)
            }
            Err(err) => {
                warn!(error = %err.message(), "prediction: failed");
                let _ = self.events.send(ClientEvent::PredictionResolved(
                    PredictionOutcome::Failed {
                        error: err.message().to_string(),
                    },
                ));
                Err(err)
            }
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, WorkflowError> {
        self.api.health().await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
