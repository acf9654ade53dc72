//! Submission Controller — sequences Query Builder → Score Client → Result
//! Normalizer and owns the lifecycle state the presentation layer reads.
//!
//! One submission is in flight at most: `submit` refuses re-entry while
//! `Loading`, and every transition replaces the whole published value instead
//! of mutating it in place.

use tracing::{debug, error, info};

use crate::form::JobFormInput;
use crate::models::candidate::CandidateView;
use crate::normalize::normalize_ranking;
use crate::query::ScoreQuery;
use crate::score_client::ScoreBackend;

/// Lifecycle of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failed,
}

/// The one value the presentation layer consumes: current phase, the ranked
/// views, and an optional inline error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub phase: Phase,
    pub results: Vec<CandidateView>,
    pub error: Option<String>,
}

impl Published {
    pub fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            results: Vec::new(),
            error: None,
        }
    }

    /// The `* → Loading` transition. Returns `None` while a submission is
    /// already in flight; the current state is left untouched in that case.
    /// Entering `Loading` discards prior results so stale rows are never
    /// shown against a new query.
    fn begin(&self) -> Option<Published> {
        match self.phase {
            Phase::Loading => None,
            _ => Some(Published {
                phase: Phase::Loading,
                results: Vec::new(),
                error: None,
            }),
        }
    }

    fn succeed(results: Vec<CandidateView>) -> Published {
        Published {
            phase: Phase::Success,
            results,
            error: None,
        }
    }

    fn fail(message: String) -> Published {
        Published {
            phase: Phase::Failed,
            results: Vec::new(),
            error: Some(message),
        }
    }
}

/// What one `submit` call did.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Ranking received, normalized, and published.
    Completed,
    /// The call failed; the same message is published inline.
    Failed(String),
    /// A submission was already in flight; published state is unchanged.
    Refused,
}

pub struct SubmissionController<B> {
    backend: B,
    published: Published,
}

impl<B: ScoreBackend> SubmissionController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            published: Published::idle(),
        }
    }

    pub fn published(&self) -> &Published {
        &self.published
    }

    /// Runs one full submission cycle.
    pub async fn submit(&mut self, form: &JobFormInput) -> SubmissionOutcome {
        let Some(loading) = self.published.begin() else {
            debug!("已有筛选进行中，忽略新的提交");
            return SubmissionOutcome::Refused;
        };
        self.published = loading;

        let query = ScoreQuery::new(&form.job_title, &form.requirements, form.top_n);
        match self.backend.fetch_ranking(&query).await {
            Ok(records) => {
                let views = normalize_ranking(&records);
                info!("成功获取到 {} 条结果", views.len());
                self.published = Published::succeed(views);
                SubmissionOutcome::Completed
            }
            Err(err) => {
                let message = err.to_string();
                error!("获取评分结果时出错: {message}");
                self.published = Published::fail(message.clone());
                SubmissionOutcome::Failed(message)
            }
        }
    }

    /// The `Failed → Idle` transition, taken once the operator has
    /// acknowledged the failure. The inline message stays visible until the
    /// next submission replaces it.
    pub fn acknowledge_failure(&mut self) {
        if self.published.phase == Phase::Failed {
            self.published = Published {
                phase: Phase::Idle,
                results: Vec::new(),
                error: self.published.error.clone(),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::models::candidate::RawCandidate;
    use crate::score_client::ScoreError;

    struct CannedBackend {
        records: Vec<RawCandidate>,
    }

    #[async_trait]
    impl ScoreBackend for CannedBackend {
        async fn fetch_ranking(
            &self,
            _query: &ScoreQuery,
        ) -> Result<Vec<RawCandidate>, ScoreError> {
            Ok(self.records.clone())
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl ScoreBackend for FailingBackend {
        async fn fetch_ranking(
            &self,
            _query: &ScoreQuery,
        ) -> Result<Vec<RawCandidate>, ScoreError> {
            Err(ScoreError::Backend {
                status: 500,
                body: "搜索/评分失败".to_string(),
            })
        }
    }

    /// Records the query it was handed, for asserting what the controller
    /// actually sends.
    struct CapturingBackend {
        seen: Arc<Mutex<Option<ScoreQuery>>>,
    }

    #[async_trait]
    impl ScoreBackend for CapturingBackend {
        async fn fetch_ranking(
            &self,
            query: &ScoreQuery,
        ) -> Result<Vec<RawCandidate>, ScoreError> {
            *self.seen.lock().unwrap() = Some(query.clone());
            Ok(Vec::new())
        }
    }

    fn form(top_n: i64) -> JobFormInput {
        JobFormInput {
            job_title: "高级数据科学家".to_string(),
            requirements: "要求: 5年以上经验".to_string(),
            top_n,
        }
    }

    #[tokio::test]
    async fn test_successful_submission_publishes_ordered_views() {
        let backend = CannedBackend {
            records: vec![
                RawCandidate {
                    resume_index: Some(7),
                    summary_score: Some(91.2),
                    ..RawCandidate::default()
                },
                RawCandidate::default(),
            ],
        };
        let mut controller = SubmissionController::new(backend);

        let outcome = controller.submit(&form(5)).await;

        assert_eq!(outcome, SubmissionOutcome::Completed);
        let published = controller.published();
        assert_eq!(published.phase, Phase::Success);
        assert_eq!(published.error, None);
        let ids: Vec<i64> = published.results.iter().map(|v| v.id).collect();
        assert_eq!(ids, [7, 1]);
    }

    #[tokio::test]
    async fn test_failed_submission_publishes_message_and_no_results() {
        let mut controller = SubmissionController::new(FailingBackend);

        let outcome = controller.submit(&form(5)).await;

        let expected = "后端返回错误: 500 - 搜索/评分失败".to_string();
        assert_eq!(outcome, SubmissionOutcome::Failed(expected.clone()));
        let published = controller.published();
        assert_eq!(published.phase, Phase::Failed);
        assert!(published.results.is_empty());
        assert_eq!(published.error.as_deref(), Some(expected.as_str()));
    }

    #[tokio::test]
    async fn test_resubmission_replaces_prior_results() {
        let backend = CannedBackend {
            records: vec![RawCandidate::default()],
        };
        let mut controller = SubmissionController::new(backend);

        controller.submit(&form(5)).await;
        assert_eq!(controller.published().results.len(), 1);

        controller.submit(&form(5)).await;
        assert_eq!(controller.published().results.len(), 1);
        assert_eq!(controller.published().phase, Phase::Success);
    }

    #[tokio::test]
    async fn test_controller_clamps_top_n_before_dispatch() {
        let seen = Arc::new(Mutex::new(None));
        let backend = CapturingBackend {
            seen: Arc::clone(&seen),
        };
        let mut controller = SubmissionController::new(backend);

        controller.submit(&form(500)).await;

        // Success with zero records still publishes an empty Success state.
        assert_eq!(controller.published().phase, Phase::Success);
        let query = seen.lock().unwrap().clone().expect("backend was called");
        assert_eq!(query.top_n, 50);
        assert_eq!(query.job_title, "高级数据科学家");
    }

    #[tokio::test]
    async fn test_acknowledged_failure_returns_to_idle_and_keeps_inline_message() {
        let mut controller = SubmissionController::new(FailingBackend);
        controller.submit(&form(5)).await;

        controller.acknowledge_failure();

        let published = controller.published();
        assert_eq!(published.phase, Phase::Idle);
        assert!(published.error.is_some());

        // Ready again: a retry is accepted and clears the inline message.
        let outcome = controller.submit(&form(5)).await;
        assert!(matches!(outcome, SubmissionOutcome::Failed(_)));
    }

    #[test]
    fn test_begin_is_refused_while_loading() {
        let loading = Published {
            phase: Phase::Loading,
            results: Vec::new(),
            error: None,
        };
        assert!(loading.begin().is_none());
    }

    #[test]
    fn test_begin_discards_prior_results_and_error() {
        let success = Published::succeed(vec![CandidateView {
            id: 1,
            score: "90.00".to_string(),
            years_experience: "5.0年".to_string(),
            core_skills: "Python".to_string(),
            reasoning: "匹配".to_string(),
        }]);
        let loading = success.begin().expect("not loading, must begin");
        assert_eq!(loading.phase, Phase::Loading);
        assert!(loading.results.is_empty());
        assert_eq!(loading.error, None);
    }
}
