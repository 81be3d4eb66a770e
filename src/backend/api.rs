//! HTTP client for the Python recommendation backend

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::path::Path;

use super::types::{
    BatchRequest, ErrorBody, HealthResponse, RecommendRequest, ResponseEnvelope,
};
use crate::error::AppError;

/// Client for the recommendation API. Cheap to clone; every in-flight
/// request owns its own copy.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

/// Both CSV files read from disk, ready to go out as a multipart form.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub cvs_name: String,
    pub cvs_bytes: Vec<u8>,
    pub jobs_name: String,
    pub jobs_bytes: Vec<u8>,
    pub top_n: u32,
}

impl FileUpload {
    /// Read the CVs and Jobs files from local paths.
    pub async fn read(
        cvs_path: String,
        jobs_path: String,
        top_n: u32,
    ) -> Result<Self, AppError> {
        let (cvs_name, cvs_bytes) = read_file(&cvs_path).await?;
        let (jobs_name, jobs_bytes) = read_file(&jobs_path).await?;
        Ok(Self {
            cvs_name,
            cvs_bytes,
            jobs_name,
            jobs_bytes,
            top_n,
        })
    }
}

async fn read_file(path: &str) -> Result<(String, Vec<u8>), AppError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::Transport(format!("Could not read {}: {}", path, e)))?;
    let name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.csv".to_string());
    Ok((name, bytes))
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Check whether the recommendation pipeline is loaded.
    pub async fn health(&self) -> Result<HealthResponse, AppError> {
        let url = format!("{}/api/health", self.base_url);
        let response = self.client.get(&url).send().await.map_err(transport)?;
        decode(response).await
    }

    /// Score manually entered candidates against one job.
    pub async fn recommend(
        &self,
        request: &RecommendRequest,
    ) -> Result<ResponseEnvelope, AppError> {
        let url = format!("{}/api/recommend", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    /// Upload CVs and Jobs CSV files for scoring.
    pub async fn recommend_file(
        &self,
        upload: FileUpload,
    ) -> Result<ResponseEnvelope, AppError> {
        let url = format!("{}/api/recommend/file", self.base_url);
        let form = Form::new()
            .part(
                "cvs_file",
                Part::bytes(upload.cvs_bytes).file_name(upload.cvs_name),
            )
            .part(
                "jobs_file",
                Part::bytes(upload.jobs_bytes).file_name(upload.jobs_name),
            )
            .text("top_n", upload.top_n.to_string());
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    /// Score many jobs against many candidates in one call.
    pub async fn batch_recommend(
        &self,
        request: &BatchRequest,
    ) -> Result<ResponseEnvelope, AppError> {
        let url = format!("{}/api/batch/recommend", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }
}

fn transport(error: reqwest::Error) -> AppError {
    AppError::Transport(error.to_string())
}

/// Non-2xx responses carry `{error: string}`; surface that message when
/// present, a generic one otherwise.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        return Err(AppError::Request(message));
    }
    response
        .json()
        .await
        .map_err(|e| AppError::Transport(e.to_string()))
}
