//! Application state and Iced update/view implementation
//!
//! One tab is active at a time (manual input, file upload, batch JSON); each
//! submit assembles a request, fires it as a task, and the completion message
//! normalizes and renders the response. Overlapping requests are not guarded
//! against: the last response to resolve is the one rendered.

use iced::widget::{
    button, column, container, progress_bar, row, scrollable, text, text_editor,
    text_input, Space,
};
use iced::widget::scrollable::RelativeOffset;
use iced::{Alignment, Background, Border, Color, Element, Length, Padding, Task, Theme};
use std::time::Duration;

use crate::backend::api::{BackendClient, FileUpload};
use crate::backend::types::{
    BatchRequest, HealthResponse, JobQuery, RecommendRequest, RecommendationResult,
    ResponseEnvelope,
};
use crate::error::AppError;
use crate::export;
use crate::forms::{CandidateForm, CandidateForms};
use crate::results::{self, JobGroup, Normalized};
use crate::ui::theme;

const DEFAULT_TOP_N: u32 = 5;
const BANNER_TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// UI State Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Manual,
    Files,
    Batch,
}

#[derive(Debug, Clone, Copy)]
pub enum JobField {
    RequiredSkills,
    ExperienceRequired,
    EducationRequired,
    Description,
}

#[derive(Debug, Clone, Copy)]
pub enum CandidateField {
    CandidateId,
    Skills,
    Experience,
    Education,
    CvText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BannerKind {
    Error,
    Warning,
    Success,
}

/// Transient notification. The id lets the auto-dismiss timer of an old
/// banner expire without taking a newer banner down with it.
#[derive(Debug, Clone)]
struct Banner {
    id: u64,
    kind: BannerKind,
    message: String,
}

// ============================================================================
// Application State
// ============================================================================

pub struct CvMatch {
    tab: Tab,
    // Manual tab
    job: JobQuery,
    candidates: CandidateForms,
    top_n: String,
    // File tab
    cvs_path: String,
    jobs_path: String,
    file_top_n: String,
    // Batch tab
    batch_jobs: text_editor::Content,
    batch_candidates: text_editor::Content,
    batch_top_n: String,
    // Results: `None` means the section is hidden. The flattened rows are
    // the export cache; they survive tab switches and are replaced wholesale
    // on every completed request.
    results: Option<Normalized>,
    rows: Vec<results::ResultRow>,
    loading: bool,
    banner: Option<Banner>,
    banner_seq: u64,
    backend: BackendClient,
}

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(Tab),
    // Manual tab
    JobFieldChanged(JobField, String),
    AddCandidate,
    RemoveCandidate(u32),
    CandidateFieldChanged(u32, CandidateField, String),
    TopNChanged(String),
    SubmitManual,
    // File tab
    CvsPathChanged(String),
    JobsPathChanged(String),
    FileTopNChanged(String),
    SubmitFiles,
    // Batch tab
    BatchJobsEdited(text_editor::Action),
    BatchCandidatesEdited(text_editor::Action),
    BatchTopNChanged(String),
    SubmitBatch,
    // Async completions and notifications
    HealthChecked(Result<HealthResponse, AppError>),
    RequestFinished(Result<ResponseEnvelope, AppError>),
    ExportResults,
    DismissBanner(u64),
}

impl CvMatch {
    pub fn new(base_url: &str) -> (Self, Task<Message>) {
        let backend = BackendClient::new(base_url);
        let mut candidates = CandidateForms::new();
        // One empty candidate block by default.
        candidates.add();

        let app = Self {
            tab: Tab::Manual,
            job: JobQuery::default(),
            candidates,
            top_n: DEFAULT_TOP_N.to_string(),
            cvs_path: String::new(),
            jobs_path: String::new(),
            file_top_n: DEFAULT_TOP_N.to_string(),
            batch_jobs: text_editor::Content::new(),
            batch_candidates: text_editor::Content::new(),
            batch_top_n: DEFAULT_TOP_N.to_string(),
            results: None,
            rows: Vec::new(),
            loading: false,
            banner: None,
            banner_seq: 0,
            backend: backend.clone(),
        };

        let health = Task::perform(
            async move { backend.health().await },
            Message::HealthChecked,
        );
        (app, health)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.tab = tab;
                // Stale results from another tab must not stay visible. The
                // export cache is left intact.
                self.results = None;
                Task::none()
            }

            Message::JobFieldChanged(field, value) => {
                match field {
                    JobField::RequiredSkills => self.job.required_skills = value,
                    JobField::ExperienceRequired => self.job.experience_required = value,
                    JobField::EducationRequired => self.job.education_required = value,
                    JobField::Description => self.job.job_description = value,
                }
                Task::none()
            }

            Message::AddCandidate => {
                self.candidates.add();
                Task::none()
            }

            Message::RemoveCandidate(id) => {
                self.candidates.remove(id);
                Task::none()
            }

            Message::CandidateFieldChanged(id, field, value) => {
                if let Some(block) = self.candidates.get_mut(id) {
                    match field {
                        CandidateField::CandidateId => block.candidate_id = value,
                        CandidateField::Skills => block.skills = value,
                        CandidateField::Experience => block.experience = value,
                        CandidateField::Education => block.education = value,
                        CandidateField::CvText => block.cv_text = value,
                    }
                }
                Task::none()
            }

            Message::TopNChanged(value) => {
                self.top_n = digits_only(&value);
                Task::none()
            }

            Message::SubmitManual => {
                self.banner = None;

                if !self.job.has_query_text() {
                    return self.show_app_error(AppError::Validation(
                        "Please provide at least job skills or job description".to_string(),
                    ));
                }
                let candidates = self.candidates.filled_inputs();
                if candidates.is_empty() {
                    return self.show_app_error(AppError::Validation(
                        "Please add at least one candidate with skills or CV text"
                            .to_string(),
                    ));
                }

                let request = RecommendRequest {
                    job: self.job.clone(),
                    candidates,
                    top_n: parse_top_n(&self.top_n),
                };
                tracing::info!(
                    "Requesting recommendations for {} candidates",
                    request.candidates.len()
                );
                self.loading = true;
                let client = self.backend.clone();
                Task::perform(
                    async move { client.recommend(&request).await },
                    Message::RequestFinished,
                )
            }

            Message::CvsPathChanged(value) => {
                self.cvs_path = value;
                Task::none()
            }

            Message::JobsPathChanged(value) => {
                self.jobs_path = value;
                Task::none()
            }

            Message::FileTopNChanged(value) => {
                self.file_top_n = digits_only(&value);
                Task::none()
            }

            Message::SubmitFiles => {
                self.banner = None;

                if self.cvs_path.trim().is_empty() || self.jobs_path.trim().is_empty() {
                    return self.show_app_error(AppError::Validation(
                        "Please select both CVs and Jobs CSV files".to_string(),
                    ));
                }

                let top_n = parse_top_n(&self.file_top_n);
                let cvs_path = self.cvs_path.clone();
                let jobs_path = self.jobs_path.clone();
                tracing::info!("Uploading {} and {}", cvs_path, jobs_path);
                self.loading = true;
                let client = self.backend.clone();
                Task::perform(
                    async move {
                        let upload = FileUpload::read(cvs_path, jobs_path, top_n).await?;
                        client.recommend_file(upload).await
                    },
                    Message::RequestFinished,
                )
            }

            Message::BatchJobsEdited(action) => {
                self.batch_jobs.perform(action);
                Task::none()
            }

            Message::BatchCandidatesEdited(action) => {
                self.batch_candidates.perform(action);
                Task::none()
            }

            Message::BatchTopNChanged(value) => {
                self.batch_top_n = digits_only(&value);
                Task::none()
            }

            Message::SubmitBatch => {
                self.banner = None;

                let jobs_text = self.batch_jobs.text();
                let candidates_text = self.batch_candidates.text();
                if jobs_text.trim().is_empty() || candidates_text.trim().is_empty() {
                    return self.show_app_error(AppError::Validation(
                        "Please provide both jobs and candidates JSON data".to_string(),
                    ));
                }

                let jobs = match serde_json::from_str(&jobs_text) {
                    Ok(value) => value,
                    Err(e) => return self.show_app_error(AppError::Parse(e.to_string())),
                };
                let candidates = match serde_json::from_str(&candidates_text) {
                    Ok(value) => value,
                    Err(e) => return self.show_app_error(AppError::Parse(e.to_string())),
                };

                let request = BatchRequest {
                    jobs,
                    candidates,
                    top_n: parse_top_n(&self.batch_top_n),
                };
                tracing::info!("Submitting batch request");
                self.loading = true;
                let client = self.backend.clone();
                Task::perform(
                    async move { client.batch_recommend(&request).await },
                    Message::RequestFinished,
                )
            }

            Message::HealthChecked(Ok(health)) => {
                if health.pipeline_loaded {
                    tracing::info!("Backend healthy, pipeline loaded");
                    Task::none()
                } else {
                    self.show_banner(
                        BannerKind::Warning,
                        "Warning: Recommendation pipeline not fully loaded. \
                         Some features may not work."
                            .to_string(),
                    )
                }
            }

            Message::HealthChecked(Err(error)) => {
                // Advisory only, never fatal to the UI.
                tracing::warn!("Health check failed: {}", error);
                Task::none()
            }

            Message::RequestFinished(Ok(envelope)) => {
                self.loading = false;
                let normalized = results::normalize(envelope);
                self.rows = match &normalized {
                    Normalized::Results(view) => view.rows.clone(),
                    Normalized::Empty => Vec::new(),
                };
                tracing::info!("Rendered {} result rows", self.rows.len());
                self.results = Some(normalized);
                scrollable::snap_to(scroll_id(), RelativeOffset::END)
            }

            Message::RequestFinished(Err(error)) => {
                self.loading = false;
                tracing::error!("Request failed: {}", error);
                self.show_banner(BannerKind::Error, format!("Error: {}", error))
            }

            Message::ExportResults => {
                self.banner = None;
                match export::export_rows(&self.rows) {
                    Ok(path) => self.show_banner(
                        BannerKind::Success,
                        format!("Exported to {}", path.display()),
                    ),
                    Err(error) => self.show_app_error(error),
                }
            }

            Message::DismissBanner(id) => {
                if self.banner.as_ref().map(|banner| banner.id) == Some(id) {
                    self.banner = None;
                }
                Task::none()
            }
        }
    }

    fn show_banner(&mut self, kind: BannerKind, message: String) -> Task<Message> {
        self.banner_seq += 1;
        let id = self.banner_seq;
        self.banner = Some(Banner { id, kind, message });
        Task::perform(
            async move { tokio::time::sleep(BANNER_TIMEOUT).await },
            move |_| Message::DismissBanner(id),
        )
    }

    fn show_app_error(&mut self, error: AppError) -> Task<Message> {
        tracing::warn!("{}", error);
        self.show_banner(BannerKind::Error, error.to_string())
    }

    // ========================================================================
    // View
    // ========================================================================

    pub fn view(&self) -> Element<'_, Message> {
        let header = column![
            text("Candidate Recommendation System").size(26).color(theme::TEXT),
            text("Match candidates to jobs with semantic similarity scoring")
                .size(14)
                .color(theme::TEXT_MUTED),
        ]
        .spacing(4);

        let tabs = row![
            tab_button("Manual Input", Tab::Manual, self.tab == Tab::Manual),
            tab_button("File Upload", Tab::Files, self.tab == Tab::Files),
            tab_button("Batch Process", Tab::Batch, self.tab == Tab::Batch),
        ]
        .spacing(8);

        let body = match self.tab {
            Tab::Manual => self.view_manual_tab(),
            Tab::Files => self.view_file_tab(),
            Tab::Batch => self.view_batch_tab(),
        };

        let mut page = column![header, tabs]
            .spacing(16)
            .padding(24)
            .push_maybe(self.banner.as_ref().map(banner_view))
            .push(body);

        if self.loading {
            page = page.push(loading_view());
        }
        page = page.push_maybe(self.results.as_ref().map(results_section));

        container(scrollable(page).id(scroll_id()).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Background::Color(theme::BACKGROUND)),
                ..Default::default()
            })
            .into()
    }

    fn view_manual_tab(&self) -> Element<'_, Message> {
        let job_section = container(
            column![
                text("Job Requirements").size(18).color(theme::TEXT),
                labeled_input(
                    "Required Skills *",
                    "e.g., Python, Java, Machine Learning",
                    &self.job.required_skills,
                    |value| Message::JobFieldChanged(JobField::RequiredSkills, value),
                ),
                labeled_input(
                    "Experience Required",
                    "e.g., 3+ years in software development",
                    &self.job.experience_required,
                    |value| Message::JobFieldChanged(JobField::ExperienceRequired, value),
                ),
                labeled_input(
                    "Education Required",
                    "e.g., BS in Computer Science",
                    &self.job.education_required,
                    |value| Message::JobFieldChanged(JobField::EducationRequired, value),
                ),
                labeled_input(
                    "Job Description *",
                    "Full job description",
                    &self.job.job_description,
                    |value| Message::JobFieldChanged(JobField::Description, value),
                ),
            ]
            .spacing(12),
        )
        .padding(16)
        .width(Length::Fill)
        .style(surface_style);

        let mut candidates = column![row![
            text("Candidates").size(18).color(theme::TEXT),
            Space::with_width(Length::Fill),
            button(text("Add Candidate").size(13))
                .padding(Padding::from([8.0, 14.0]))
                .style(secondary_button_style)
                .on_press(Message::AddCandidate),
        ]
        .align_y(Alignment::Center)]
        .spacing(12);
        for block in self.candidates.iter() {
            candidates = candidates.push(candidate_block(block));
        }
        let candidates_section = container(candidates)
            .padding(16)
            .width(Length::Fill)
            .style(surface_style);

        column![
            job_section,
            candidates_section,
            self.controls_row(&self.top_n, Message::TopNChanged, "Get Recommendations", Message::SubmitManual),
        ]
        .spacing(16)
        .into()
    }

    fn view_file_tab(&self) -> Element<'_, Message> {
        container(
            column![
                text("Upload CSV Files").size(18).color(theme::TEXT),
                text("Point to local CSV files with candidate CVs and job postings. Both are required.")
                    .size(13)
                    .color(theme::TEXT_MUTED),
                labeled_input(
                    "CVs File Path *",
                    "/path/to/cvs.csv",
                    &self.cvs_path,
                    Message::CvsPathChanged,
                ),
                labeled_input(
                    "Jobs File Path *",
                    "/path/to/jobs.csv",
                    &self.jobs_path,
                    Message::JobsPathChanged,
                ),
                self.controls_row(&self.file_top_n, Message::FileTopNChanged, "Upload & Process", Message::SubmitFiles),
            ]
            .spacing(12),
        )
        .padding(16)
        .width(Length::Fill)
        .style(surface_style)
        .into()
    }

    fn view_batch_tab(&self) -> Element<'_, Message> {
        container(
            column![
                text("Batch Processing").size(18).color(theme::TEXT),
                text("Jobs JSON *").size(13).color(theme::TEXT_MUTED),
                text(r#"e.g. [{"job_id": "J001", "job_title": "Backend Engineer", "required_skills": "Rust, SQL"}]"#)
                    .size(12)
                    .color(theme::TEXT_PLACEHOLDER),
                text_editor(&self.batch_jobs)
                    .on_action(Message::BatchJobsEdited)
                    .height(140)
                    .style(editor_style),
                text("Candidates JSON *").size(13).color(theme::TEXT_MUTED),
                text(r#"e.g. [{"candidate_id": "C001", "skills": "Rust, SQL", "cv_text": "..."}]"#)
                    .size(12)
                    .color(theme::TEXT_PLACEHOLDER),
                text_editor(&self.batch_candidates)
                    .on_action(Message::BatchCandidatesEdited)
                    .height(140)
                    .style(editor_style),
                self.controls_row(&self.batch_top_n, Message::BatchTopNChanged, "Process Batch", Message::SubmitBatch),
            ]
            .spacing(12),
        )
        .padding(16)
        .width(Length::Fill)
        .style(surface_style)
        .into()
    }

    /// Top-N input plus the submit button. Submitting is disabled while a
    /// request is in flight.
    fn controls_row<'a>(
        &self,
        top_n: &'a str,
        on_top_n: impl Fn(String) -> Message + 'a,
        submit_label: &'a str,
        submit: Message,
    ) -> Element<'a, Message> {
        row![
            container(labeled_input("Top N Results", "5", top_n, on_top_n)).width(160),
            Space::with_width(Length::Fill),
            button(text(submit_label).size(15))
                .padding(Padding::from([10.0, 20.0]))
                .style(primary_button_style)
                .on_press_maybe((!self.loading).then_some(submit)),
        ]
        .spacing(12)
        .align_y(Alignment::End)
        .into()
    }
}

// ============================================================================
// View helpers
// ============================================================================

fn scroll_id() -> scrollable::Id {
    scrollable::Id::new("page")
}

fn labeled_input<'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    on_input: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    column![
        text(label).size(13).color(theme::TEXT_MUTED),
        text_input(placeholder, value)
            .on_input(on_input)
            .padding(10)
            .size(14)
            .style(input_style),
    ]
    .spacing(6)
    .into()
}

fn candidate_block(block: &CandidateForm) -> Element<'_, Message> {
    let id = block.id;
    container(
        column![
            row![
                text(format!("Candidate {}", id)).size(15).color(theme::TEXT),
                Space::with_width(Length::Fill),
                button(text("Remove").size(12))
                    .padding(Padding::from([6.0, 12.0]))
                    .style(danger_button_style)
                    .on_press(Message::RemoveCandidate(id)),
            ]
            .align_y(Alignment::Center),
            labeled_input("Candidate ID *", "C001", &block.candidate_id, move |value| {
                Message::CandidateFieldChanged(id, CandidateField::CandidateId, value)
            }),
            labeled_input(
                "Skills *",
                "e.g., Python, Java, Machine Learning",
                &block.skills,
                move |value| Message::CandidateFieldChanged(id, CandidateField::Skills, value),
            ),
            labeled_input(
                "Experience",
                "e.g., 3 years as Software Developer",
                &block.experience,
                move |value| {
                    Message::CandidateFieldChanged(id, CandidateField::Experience, value)
                },
            ),
            labeled_input(
                "Education",
                "e.g., BS in Computer Science",
                &block.education,
                move |value| {
                    Message::CandidateFieldChanged(id, CandidateField::Education, value)
                },
            ),
            labeled_input(
                "CV Text / Additional Info",
                "Full CV text or additional information",
                &block.cv_text,
                move |value| Message::CandidateFieldChanged(id, CandidateField::CvText, value),
            ),
        ]
        .spacing(10),
    )
    .padding(12)
    .width(Length::Fill)
    .style(|_theme| container::Style {
        background: Some(Background::Color(theme::SURFACE_HIGHLIGHT)),
        border: Border {
            color: theme::BORDER,
            width: 1.0,
            radius: 10.0.into(),
        },
        ..Default::default()
    })
    .into()
}

fn banner_view(banner: &Banner) -> Element<'_, Message> {
    let color = match banner.kind {
        BannerKind::Error => theme::DANGER,
        BannerKind::Warning => theme::WARNING,
        BannerKind::Success => theme::SUCCESS,
    };
    container(text(&banner.message).size(14).color(color))
        .padding(12)
        .width(Length::Fill)
        .style(move |_theme| container::Style {
            background: Some(Background::Color(Color { a: 0.12, ..color })),
            border: Border {
                color,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        })
        .into()
}

fn loading_view() -> Element<'static, Message> {
    container(
        text("Processing... please wait")
            .size(15)
            .color(theme::PRIMARY),
    )
    .padding(16)
    .width(Length::Fill)
    .center_x(Length::Fill)
    .style(surface_style)
    .into()
}

fn results_section(normalized: &Normalized) -> Element<'_, Message> {
    match normalized {
        Normalized::Empty => container(
            text("No recommendations found")
                .size(15)
                .color(theme::TEXT_MUTED),
        )
        .padding(24)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .style(surface_style)
        .into(),

        Normalized::Results(view) => {
            let header = row![
                text("Results").size(20).color(theme::TEXT),
                Space::with_width(Length::Fill),
                button(text("Export CSV").size(13))
                    .padding(Padding::from([8.0, 14.0]))
                    .style(secondary_button_style)
                    .on_press(Message::ExportResults),
            ]
            .align_y(Alignment::Center);

            let stats = row![
                stat_card(
                    view.total_jobs.to_string(),
                    if view.total_jobs > 1 {
                        "Jobs Processed"
                    } else {
                        "Job Processed"
                    },
                ),
                stat_card(view.total_candidates.to_string(), "Total Candidates"),
                stat_card(view.total_matches.to_string(), "Total Matches"),
            ]
            .spacing(12);

            let mut section = column![header, stats].spacing(16);
            for group in &view.groups {
                section = section.push(job_group(group));
            }
            section.into()
        }
    }
}

fn stat_card(value: String, label: &str) -> Element<'_, Message> {
    container(
        column![
            text(value).size(28).color(theme::PRIMARY),
            text(label).size(13).color(theme::TEXT_MUTED),
        ]
        .spacing(4)
        .align_x(Alignment::Center),
    )
    .padding(16)
    .width(Length::Fill)
    .center_x(Length::Fill)
    .style(surface_style)
    .into()
}

fn job_group(group: &JobGroup) -> Element<'_, Message> {
    let mut content = column![].spacing(12);

    if let (Some(job_id), Some(job_title)) = (&group.job_id, &group.job_title) {
        let count = group.candidates.len();
        content = content.push(
            row![
                text(job_title).size(18).color(theme::TEXT),
                text(format!("Job ID: {}", job_id))
                    .size(12)
                    .color(theme::TEXT_MUTED),
                Space::with_width(Length::Fill),
                text(format!(
                    "{} Candidate{} Matched",
                    count,
                    if count != 1 { "s" } else { "" }
                ))
                .size(12)
                .color(theme::TEXT_MUTED),
            ]
            .spacing(12)
            .align_y(Alignment::Center),
        );
    }

    // Cards stay in backend rank order; no re-sorting here.
    for candidate in &group.candidates {
        content = content.push(candidate_card(candidate));
    }

    container(content)
        .padding(16)
        .width(Length::Fill)
        .style(surface_style)
        .into()
}

fn candidate_card(candidate: &RecommendationResult) -> Element<'_, Message> {
    let percent = candidate.match_percent();
    let color = theme::score_color(percent);
    let display_name = candidate
        .name
        .clone()
        .unwrap_or_else(|| candidate.candidate_id.clone());

    column![
        row![
            container(
                text(format!("Rank {}", candidate.rank))
                    .size(12)
                    .color(Color::WHITE)
            )
            .padding(Padding::from([4.0, 10.0]))
            .style(|_theme| container::Style {
                background: Some(Background::Color(theme::PRIMARY)),
                border: Border::default().rounded(10),
                ..Default::default()
            }),
            text(display_name).size(16).color(theme::TEXT),
            Space::with_width(Length::Fill),
            text(format!("ID: {}", candidate.candidate_id))
                .size(12)
                .color(theme::TEXT_MUTED),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
        progress_bar(0.0..=100.0, percent as f32)
            .height(10)
            .style(move |_theme| progress_bar::Style {
                background: Background::Color(theme::SURFACE_HIGHLIGHT),
                bar: Background::Color(color),
                border: Border::default().rounded(5),
            }),
        row![
            text(format!("{:.2}%", percent)).size(14).color(color),
            text("Match Score").size(12).color(theme::TEXT_MUTED),
            Space::with_width(Length::Fill),
            text(format!(
                "Cosine Similarity: {:.4}",
                candidate.similarity_score
            ))
            .size(12)
            .color(theme::TEXT_MUTED),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    ]
    .push_maybe(
        candidate
            .summary
            .as_deref()
            .map(|summary| text(summary).size(13).color(theme::TEXT_MUTED)),
    )
    .spacing(8)
    .into()
}

fn tab_button(label: &str, tab: Tab, active: bool) -> Element<'_, Message> {
    button(text(label).size(15))
        .padding(Padding::from([8.0, 16.0]))
        .style(move |_theme, _status| button::Style {
            background: Some(Background::Color(if active {
                theme::PRIMARY
            } else {
                theme::SURFACE
            })),
            text_color: if active { Color::WHITE } else { theme::TEXT_MUTED },
            border: Border {
                color: theme::BORDER,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        })
        .on_press(Message::TabSelected(tab))
        .into()
}

// ============================================================================
// Styles
// ============================================================================

fn surface_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(theme::SURFACE)),
        border: Border {
            color: theme::BORDER,
            width: 1.0,
            radius: 12.0.into(),
        },
        ..Default::default()
    }
}

fn input_style(_theme: &Theme, _status: text_input::Status) -> text_input::Style {
    text_input::Style {
        background: Background::Color(theme::SURFACE),
        border: Border {
            color: theme::BORDER,
            width: 1.0,
            radius: 8.0.into(),
        },
        icon: theme::TEXT_MUTED,
        placeholder: theme::TEXT_PLACEHOLDER,
        value: theme::TEXT,
        selection: theme::PRIMARY,
    }
}

fn editor_style(_theme: &Theme, _status: text_editor::Status) -> text_editor::Style {
    text_editor::Style {
        background: Background::Color(theme::SURFACE),
        border: Border {
            color: theme::BORDER,
            width: 1.0,
            radius: 8.0.into(),
        },
        icon: theme::TEXT_MUTED,
        placeholder: theme::TEXT_PLACEHOLDER,
        value: theme::TEXT,
        selection: theme::PRIMARY,
    }
}

fn primary_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Disabled => theme::SURFACE_HIGHLIGHT,
        button::Status::Hovered | button::Status::Pressed => Color {
            a: 0.85,
            ..theme::PRIMARY
        },
        button::Status::Active => theme::PRIMARY,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: Color::WHITE,
        border: Border::default().rounded(8),
        ..Default::default()
    }
}

fn secondary_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => theme::SURFACE_HIGHLIGHT,
        _ => theme::SURFACE,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: theme::PRIMARY,
        border: Border {
            color: theme::PRIMARY,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

fn danger_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => Color {
            a: 0.15,
            ..theme::DANGER
        },
        _ => Color::TRANSPARENT,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: theme::DANGER,
        border: Border {
            color: theme::DANGER,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

fn parse_top_n(value: &str) -> u32 {
    value.trim().parse().unwrap_or(DEFAULT_TOP_N)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> CvMatch {
        // The backend is never actually contacted in these tests.
        CvMatch::new("http://127.0.0.1:9").0
    }

    fn banner_message(app: &CvMatch) -> &str {
        app.banner.as_ref().map(|b| b.message.as_str()).unwrap_or("")
    }

    #[test]
    fn switching_tabs_hides_results_but_keeps_export_cache() {
        let mut app = test_app();
        app.results = Some(Normalized::Empty);
        app.rows = vec![crate::results::ResultRow {
            candidate_id: "C1".to_string(),
            name: None,
            rank: 1,
            similarity_score: 0.5,
            match_percentage: None,
            summary: None,
            job_id: None,
            job_title: None,
        }];

        let _ = app.update(Message::TabSelected(Tab::Files));

        assert!(app.results.is_none());
        assert_eq!(app.rows.len(), 1);
    }

    #[test]
    fn manual_submit_without_job_text_is_rejected_locally() {
        let mut app = test_app();
        let _ = app.update(Message::SubmitManual);

        assert!(!app.loading);
        assert_eq!(
            banner_message(&app),
            "Please provide at least job skills or job description"
        );
    }

    #[test]
    fn manual_submit_without_candidates_is_rejected_locally() {
        let mut app = test_app();
        let _ = app.update(Message::JobFieldChanged(
            JobField::RequiredSkills,
            "Rust".to_string(),
        ));
        let _ = app.update(Message::SubmitManual);

        assert!(!app.loading);
        assert_eq!(
            banner_message(&app),
            "Please add at least one candidate with skills or CV text"
        );
    }

    #[test]
    fn file_submit_requires_both_paths() {
        let mut app = test_app();
        let _ = app.update(Message::CvsPathChanged("/tmp/cvs.csv".to_string()));
        let _ = app.update(Message::SubmitFiles);

        assert!(!app.loading);
        assert_eq!(banner_message(&app), "Please select both CVs and Jobs CSV files");
    }

    #[test]
    fn export_with_empty_cache_shows_error() {
        let mut app = test_app();
        let _ = app.update(Message::ExportResults);

        assert_eq!(banner_message(&app), "No results to export");
    }

    #[test]
    fn successful_response_replaces_cache_and_shows_results() {
        let mut app = test_app();
        let envelope: ResponseEnvelope = serde_json::from_str(
            r#"{"jobs": [{"job_id": "J1", "job_title": "Eng", "candidates": [
                {"candidate_id": "C1", "rank": 1, "similarity_score": 0.8}
            ]}], "total_jobs": 1, "total_candidates": 1}"#,
        )
        .unwrap();

        let _ = app.update(Message::RequestFinished(Ok(envelope)));

        assert!(!app.loading);
        assert!(matches!(app.results, Some(Normalized::Results(_))));
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].job_id.as_deref(), Some("J1"));
    }

    #[test]
    fn empty_response_clears_cache() {
        let mut app = test_app();
        app.rows = vec![crate::results::ResultRow {
            candidate_id: "old".to_string(),
            name: None,
            rank: 1,
            similarity_score: 0.1,
            match_percentage: None,
            summary: None,
            job_id: None,
            job_title: None,
        }];

        let envelope: ResponseEnvelope =
            serde_json::from_str(r#"{"jobs": [], "total_jobs": 0, "total_candidates": 0}"#)
                .unwrap();
        let _ = app.update(Message::RequestFinished(Ok(envelope)));

        assert!(matches!(app.results, Some(Normalized::Empty)));
        assert!(app.rows.is_empty());
    }

    #[test]
    fn stale_dismiss_does_not_clear_a_newer_banner() {
        let mut app = test_app();
        let _ = app.show_banner(BannerKind::Error, "first".to_string());
        let first_id = app.banner.as_ref().unwrap().id;
        let _ = app.show_banner(BannerKind::Error, "second".to_string());

        let _ = app.update(Message::DismissBanner(first_id));
        assert_eq!(banner_message(&app), "second");

        let second_id = app.banner.as_ref().unwrap().id;
        let _ = app.update(Message::DismissBanner(second_id));
        assert!(app.banner.is_none());
    }

    #[test]
    fn batch_submit_rejects_malformed_json() {
        let mut app = test_app();
        // Type some broken JSON into the jobs editor.
        app.batch_jobs = text_editor::Content::with_text("[{not json");
        app.batch_candidates = text_editor::Content::with_text("[]");

        let _ = app.update(Message::SubmitBatch);

        assert!(!app.loading);
        assert!(banner_message(&app).starts_with("Invalid JSON format"));
    }
}
