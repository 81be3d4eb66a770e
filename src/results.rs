//! Response normalization
//!
//! The backend answers in two shapes: the current per-job format and a
//! legacy flat recommendation list. Both are normalized here, right at the
//! network boundary, into one display model; rendering and CSV export never
//! see the raw envelope.

use crate::backend::types::{RecommendationResult, ResponseEnvelope};

/// One flattened row of the last rendered result set. This is what CSV
/// export consumes; rows from the per-job format carry their parent job's
/// id and title, legacy rows do not.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub candidate_id: String,
    pub name: Option<String>,
    pub rank: u32,
    pub similarity_score: f64,
    pub match_percentage: Option<f64>,
    pub summary: Option<String>,
    pub job_id: Option<String>,
    pub job_title: Option<String>,
}

impl ResultRow {
    fn from_candidate(
        candidate: &RecommendationResult,
        job_id: Option<&str>,
        job_title: Option<&str>,
    ) -> Self {
        Self {
            candidate_id: candidate.candidate_id.clone(),
            name: candidate.name.clone(),
            rank: candidate.rank,
            similarity_score: candidate.similarity_score,
            match_percentage: candidate.match_percentage,
            summary: candidate.summary.clone(),
            job_id: job_id.map(str::to_string),
            job_title: job_title.map(str::to_string),
        }
    }
}

/// One rendered group of candidate cards. Legacy responses produce a single
/// group with no job header.
#[derive(Debug, Clone)]
pub struct JobGroup {
    pub job_id: Option<String>,
    pub job_title: Option<String>,
    pub candidates: Vec<RecommendationResult>,
}

/// Everything the results section renders, plus the flattened export rows.
#[derive(Debug, Clone)]
pub struct ResultsView {
    pub total_jobs: usize,
    pub total_candidates: usize,
    pub total_matches: usize,
    pub groups: Vec<JobGroup>,
    pub rows: Vec<ResultRow>,
}

/// Normalized outcome of a backend response.
#[derive(Debug, Clone)]
pub enum Normalized {
    /// No jobs and no legacy recommendations. Rendered as a single
    /// placeholder, no stat cards.
    Empty,
    Results(ResultsView),
}

pub fn normalize(envelope: ResponseEnvelope) -> Normalized {
    let jobs = envelope.jobs.unwrap_or_default();

    if !jobs.is_empty() {
        let total_matches = jobs.iter().map(|job| job.candidates.len()).sum();
        let rows = jobs
            .iter()
            .flat_map(|job| {
                job.candidates.iter().map(|candidate| {
                    ResultRow::from_candidate(
                        candidate,
                        Some(job.job_id.as_str()),
                        Some(job.job_title.as_str()),
                    )
                })
            })
            .collect();
        let groups = jobs
            .into_iter()
            .map(|job| JobGroup {
                job_id: Some(job.job_id),
                job_title: Some(job.job_title),
                candidates: job.candidates,
            })
            .collect::<Vec<_>>();

        return Normalized::Results(ResultsView {
            // Zero counts from the backend fall back like missing ones.
            total_jobs: envelope
                .total_jobs
                .filter(|&n| n > 0)
                .unwrap_or(groups.len()),
            total_candidates: envelope.total_candidates.unwrap_or(0),
            total_matches,
            groups,
            rows,
        });
    }

    match envelope.recommendations {
        Some(recommendations) if !recommendations.is_empty() => {
            let rows = recommendations
                .iter()
                .map(|candidate| ResultRow::from_candidate(candidate, None, None))
                .collect();
            Normalized::Results(ResultsView {
                total_jobs: envelope.total_jobs.filter(|&n| n > 0).unwrap_or(1),
                total_candidates: envelope.total_candidates.unwrap_or(0),
                total_matches: recommendations.len(),
                groups: vec![JobGroup {
                    job_id: None,
                    job_title: None,
                    candidates: recommendations,
                }],
                rows,
            })
        }
        _ => Normalized::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::types::JobResult;

    fn candidate(id: &str, rank: u32, score: f64) -> RecommendationResult {
        RecommendationResult {
            candidate_id: id.to_string(),
            name: None,
            rank,
            similarity_score: score,
            match_percentage: None,
            summary: None,
        }
    }

    #[test]
    fn current_format_flattens_with_job_columns() {
        let envelope = ResponseEnvelope {
            jobs: Some(vec![JobResult {
                job_id: "J1".to_string(),
                job_title: "Eng".to_string(),
                candidates: vec![candidate("C1", 1, 0.8)],
            }]),
            total_jobs: Some(1),
            total_candidates: Some(1),
            recommendations: None,
        };

        let view = match normalize(envelope) {
            Normalized::Results(view) => view,
            Normalized::Empty => panic!("expected results"),
        };

        assert_eq!(view.total_jobs, 1);
        assert_eq!(view.total_candidates, 1);
        assert_eq!(view.total_matches, 1);
        assert_eq!(view.groups.len(), 1);
        assert_eq!(view.groups[0].job_title.as_deref(), Some("Eng"));

        let row = &view.rows[0];
        assert_eq!(row.job_id.as_deref(), Some("J1"));
        assert!((row.similarity_score - 0.8).abs() < 1e-9);
        assert_eq!(format!("{:.4}", row.similarity_score), "0.8000");
        assert!((view.groups[0].candidates[0].match_percent() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn total_matches_sums_across_jobs() {
        let envelope = ResponseEnvelope {
            jobs: Some(vec![
                JobResult {
                    job_id: "J1".to_string(),
                    job_title: "Eng".to_string(),
                    candidates: vec![candidate("C1", 1, 0.9), candidate("C2", 2, 0.7)],
                },
                JobResult {
                    job_id: "J2".to_string(),
                    job_title: "Data".to_string(),
                    candidates: vec![candidate("C3", 1, 0.6)],
                },
            ]),
            total_jobs: None,
            total_candidates: None,
            recommendations: None,
        };

        let view = match normalize(envelope) {
            Normalized::Results(view) => view,
            Normalized::Empty => panic!("expected results"),
        };
        assert_eq!(view.total_matches, 3);
        // Missing total_jobs falls back to the group count.
        assert_eq!(view.total_jobs, 2);
        assert_eq!(view.total_candidates, 0);
    }

    #[test]
    fn legacy_format_becomes_single_unlabeled_group() {
        let envelope = ResponseEnvelope {
            jobs: None,
            total_jobs: None,
            total_candidates: None,
            recommendations: Some(vec![candidate("C1", 1, 0.5)]),
        };

        let view = match normalize(envelope) {
            Normalized::Results(view) => view,
            Normalized::Empty => panic!("expected results"),
        };
        assert_eq!(view.total_jobs, 1);
        assert_eq!(view.total_matches, 1);
        assert_eq!(view.groups.len(), 1);
        assert!(view.groups[0].job_id.is_none());
        assert!(view.rows[0].job_id.is_none());
        assert!(view.rows[0].job_title.is_none());
    }

    #[test]
    fn empty_jobs_without_recommendations_is_the_no_results_case() {
        let envelope = ResponseEnvelope {
            jobs: Some(Vec::new()),
            total_jobs: Some(0),
            total_candidates: Some(0),
            recommendations: None,
        };
        assert!(matches!(normalize(envelope), Normalized::Empty));
    }

    #[test]
    fn empty_legacy_list_is_also_empty() {
        let envelope = ResponseEnvelope {
            jobs: None,
            total_jobs: None,
            total_candidates: None,
            recommendations: Some(Vec::new()),
        };
        assert!(matches!(normalize(envelope), Normalized::Empty));
    }
}
