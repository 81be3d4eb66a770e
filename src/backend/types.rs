//! Wire types for the recommendation API

use serde::{Deserialize, Serialize};

/// Job description assembled from the manual-input tab.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobQuery {
    pub required_skills: String,
    pub experience_required: String,
    pub education_required: String,
    pub job_description: String,
}

impl JobQuery {
    /// A query is usable only if it carries skills or a description.
    pub fn has_query_text(&self) -> bool {
        !self.required_skills.is_empty() || !self.job_description.is_empty()
    }
}

/// One candidate profile sent to the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateInput {
    pub candidate_id: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
    pub cv_text: String,
}

impl CandidateInput {
    /// Candidates without skills and without CV text are dropped from
    /// requests.
    pub fn has_content(&self) -> bool {
        !self.skills.is_empty() || !self.cv_text.is_empty()
    }
}

/// Body of `POST /api/recommend`.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendRequest {
    pub job: JobQuery,
    pub candidates: Vec<CandidateInput>,
    pub top_n: u32,
}

/// Body of `POST /api/batch/recommend`. The arrays come straight from the
/// user's JSON text areas, so they stay untyped.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRequest {
    pub jobs: serde_json::Value,
    pub candidates: serde_json::Value,
    pub top_n: u32,
}

/// One scored candidate as returned by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecommendationResult {
    pub candidate_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub rank: u32,
    pub similarity_score: f64,
    #[serde(default)]
    pub match_percentage: Option<f64>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl RecommendationResult {
    /// Display percentage, derived from the similarity score when the
    /// backend did not send one. Never written back into the record.
    pub fn match_percent(&self) -> f64 {
        self.match_percentage
            .unwrap_or(self.similarity_score * 100.0)
    }
}

/// One job with its ranked candidate list (current response format).
#[derive(Debug, Clone, Deserialize)]
pub struct JobResult {
    pub job_id: String,
    pub job_title: String,
    #[serde(default)]
    pub candidates: Vec<RecommendationResult>,
}

/// Response body shared by all three recommendation endpoints. The backend
/// has two historical shapes: `jobs` (current) and a flat `recommendations`
/// list (legacy). Both are accepted and normalized in `results`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub jobs: Option<Vec<JobResult>>,
    #[serde(default)]
    pub total_jobs: Option<usize>,
    #[serde(default)]
    pub total_candidates: Option<usize>,
    #[serde(default)]
    pub recommendations: Option<Vec<RecommendationResult>>,
}

/// `GET /api/health` response.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub pipeline_loaded: bool,
}

/// Error convention for non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_accepts_current_format() {
        let json = r#"{
            "jobs": [{"job_id": "J1", "job_title": "Eng", "candidates": [
                {"candidate_id": "C1", "rank": 1, "similarity_score": 0.8}
            ]}],
            "total_jobs": 1,
            "total_candidates": 1
        }"#;
        let envelope: ResponseEnvelope = serde_json::from_str(json).unwrap();
        let jobs = envelope.jobs.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].candidates[0].candidate_id, "C1");
        assert_eq!(envelope.total_candidates, Some(1));
    }

    #[test]
    fn envelope_accepts_legacy_format() {
        let json = r#"{"recommendations": [
            {"candidate_id": "C1", "rank": 1, "similarity_score": 0.5}
        ]}"#;
        let envelope: ResponseEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.jobs.is_none());
        assert_eq!(envelope.recommendations.unwrap().len(), 1);
    }

    #[test]
    fn match_percent_derives_from_score_when_absent() {
        let result = RecommendationResult {
            candidate_id: "C1".into(),
            name: None,
            rank: 1,
            similarity_score: 0.8,
            match_percentage: None,
            summary: None,
        };
        assert!((result.match_percent() - 80.0).abs() < 1e-9);

        let explicit = RecommendationResult {
            match_percentage: Some(75.5),
            ..result
        };
        assert!((explicit.match_percent() - 75.5).abs() < 1e-9);
    }
}
