//! HTTP client for the tracker server's two endpoints

use futures::future::BoxFuture;
use reqwest::{Client, Response, Url};
use tracing::debug;

use crate::{
    api::responses::{ErrorResponse, StudentsResponse},
    error::ClientError,
    models::LogEntry,
};

/// Where the view sends finished intervals.
///
/// The returned future owns everything it needs so the view can run it
/// detached.
pub trait LogSink: Send + Sync {
    fn submit(&self, entry: LogEntry) -> BoxFuture<'static, Result<(), ClientError>>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    students_url: Url,
    log_url: Url,
}

impl ApiClient {
    pub fn new(server: &str) -> Result<Self, ClientError> {
        let base = Url::parse(server).map_err(|e| ClientError::Url(format!("{}: {}", server, e)))?;
        let join = |path: &str| {
            base.join(path)
                .map_err(|e| ClientError::Url(format!("{}{}: {}", server, path, e)))
        };

        Ok(Self {
            http: Client::new(),
            students_url: join("/api/get-students")?,
            log_url: join("/api/log-behavior")?,
        })
    }

    /// Fetch the roster from `GET /api/get-students`
    pub async fn fetch_students(&self) -> Result<Vec<String>, ClientError> {
        debug!("Fetching roster from {}", self.students_url);
        let response = self.http.get(self.students_url.clone()).send().await?;
        let body: StudentsResponse = check_status(response).await?.json().await?;
        Ok(body.students)
    }

    /// Send one entry to `POST /api/log-behavior`
    pub async fn log_behavior(&self, entry: &LogEntry) -> Result<(), ClientError> {
        debug!("Posting interval for {} to {}", entry.student(), self.log_url);
        let response = self.http.post(self.log_url.clone()).json(entry).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

impl LogSink for ApiClient {
    fn submit(&self, entry: LogEntry) -> BoxFuture<'static, Result<(), ClientError>> {
        let client = self.clone();
        Box::pin(async move { client.log_behavior(&entry).await })
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => "no error message".to_string(),
    };
    Err(ClientError::Status { status, message })
}
