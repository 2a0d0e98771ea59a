use super::dto::{AnalysisResponse, ErrorResponse, EventResponse, StartupResponse};
use super::model::{AnalysisRequest, Event, EventQuery, Startup};
use async_trait::async_trait;
use reqwest::{Client, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::RetryTransientMiddleware;
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

const STARTUPS_PATH: &str = "/api/startups";
const EVENT_NAMES_PATH: &str = "/api/event_names";
const EVENT_DATES_PATH: &str = "/api/event_dates";
const EVENTS_PATH: &str = "/api/events";
const ANALYSIS_PATH: &str = "/api/gemini_analysis";

pub const UNKNOWN_SERVER_ERROR: &str = "Unknown server error";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),
    #[error("{message} (HTTP {status})")]
    Http { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// The backend the dashboard talks to.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn get_startups(&self) -> Result<Vec<Startup>, ApiError>;

    async fn get_event_names(&self) -> Result<Vec<String>, ApiError>;

    async fn get_event_dates(&self) -> Result<Vec<String>, ApiError>;

    async fn get_events(&self, query: &EventQuery) -> Result<Vec<Event>, ApiError>;

    async fn request_analysis(&self, request: &AnalysisRequest) -> Result<String, ApiError>;
}

pub struct HttpDashboardApi {
    client: ClientWithMiddleware,
    base_url: String,
}

impl HttpDashboardApi {
    /**
    * max_retries: 0 makes every failure terminal
    */
    pub fn new(base_url: &str, max_retries: u32) -> Self {
        let mut builder = ClientBuilder::new(Client::new());

        if max_retries > 0 {
            builder = builder.with(RetryTransientMiddleware::new_with_policy(
                ExponentialBackoff::builder().build_with_max_retries(max_retries),
            ));
        }

        Self {
            client: builder.build(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|err| {
                error!("Error sending request to {}: {:?}", path, err);
                ApiError::Network(err.to_string())
            })?;

        Self::read_json(path, response).await
    }

    async fn read_json<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await.map_err(|err| {
            error!("Error reading response of {}: {:?}", path, err);
            ApiError::Network(err.to_string())
        })?;

        if !status.is_success() {
            return Err(http_error(status.as_u16(), &body));
        }

        serde_json::from_str::<T>(&body).map_err(|err| {
            error!("Response parse failed for {}: {:?}", path, err);
            ApiError::InvalidResponse(err.to_string())
        })
    }
}

/// Builds the error for a non-success status out of the backend's `{error}` body
pub fn http_error(status: u16, body: &str) -> ApiError {
    let response = ErrorResponse::parse(body);

    if let Some(details) = &response.details {
        warn!("Backend error details (HTTP {}): {}", status, details);
    }

    ApiError::Http {
        status,
        message: response
            .error
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string()),
    }
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    #[tracing::instrument(skip(self))]
    async fn get_startups(&self) -> Result<Vec<Startup>, ApiError> {
        let startups = self
            .get_json::<Vec<StartupResponse>>(STARTUPS_PATH, &[])
            .await?;

        info!("Got {} startups", startups.len());

        Ok(startups.iter().map(StartupResponse::to_model).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn get_event_names(&self) -> Result<Vec<String>, ApiError> {
        self.get_json(EVENT_NAMES_PATH, &[]).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_event_dates(&self) -> Result<Vec<String>, ApiError> {
        self.get_json(EVENT_DATES_PATH, &[]).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_events(&self, query: &EventQuery) -> Result<Vec<Event>, ApiError> {
        let events = self
            .get_json::<Vec<EventResponse>>(EVENTS_PATH, &query.params)
            .await?;

        info!("Got {} events", events.len());

        Ok(events.iter().map(EventResponse::to_model).collect())
    }

    #[tracing::instrument(skip(self, request), fields(event = %request.event_name))]
    async fn request_analysis(&self, request: &AnalysisRequest) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.url(ANALYSIS_PATH))
            .json(request)
            .send()
            .await
            .map_err(|err| {
                error!("Error sending analysis request: {:?}", err);
                ApiError::Network(err.to_string())
            })?;

        let analysis = Self::read_json::<AnalysisResponse>(ANALYSIS_PATH, response).await?;

        Ok(analysis.analysis)
    }
}
