//! Tests for the placement exam flow: resume, persistence, and submission.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use tempfile::tempdir;

use wortspiel::{
    ApiError, AttemptStore, HintGrant, Level, PlacementAttempt, PlacementError, PlacementFlow,
    PlacementPhase, ProgressStats, RoundReport, Word, WordService,
};

/// In-memory service covering the two calls the flow makes.
struct StubService {
    questions: Vec<Word>,
    assigned: Level,
    submit_calls: AtomicU32,
    fail_submit: AtomicBool,
    last_correct: AtomicU32,
    last_total: AtomicU32,
}

impl StubService {
    fn new(questions: Vec<Word>) -> Self {
        Self {
            questions,
            assigned: Level::A2,
            submit_calls: AtomicU32::new(0),
            fail_submit: AtomicBool::new(false),
            last_correct: AtomicU32::new(0),
            last_total: AtomicU32::new(0),
        }
    }

    fn submit_calls(&self) -> u32 {
        self.submit_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WordService for StubService {
    async fn fetch_word(&self, _level: Level, _adaptive: bool) -> Result<Word, ApiError> {
        Err(ApiError::validation("stub serves placement questions only"))
    }

    async fn log_result(&self, _report: &RoundReport) -> Result<(), ApiError> {
        Ok(())
    }

    async fn consume_hint(&self, _word: &str, _guessed: &[char]) -> Result<HintGrant, ApiError> {
        Err(ApiError::validation("stub serves placement questions only"))
    }

    async fn fetch_stats(&self) -> Result<ProgressStats, ApiError> {
        Ok(ProgressStats::default())
    }

    async fn fetch_placement_questions(&self) -> Result<Vec<Word>, ApiError> {
        Ok(self.questions.clone())
    }

    async fn submit_placement(
        &self,
        _username: &str,
        correct: u32,
        total: u32,
    ) -> Result<Level, ApiError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.last_correct.store(correct, Ordering::SeqCst);
        self.last_total.store(total, Ordering::SeqCst);
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(ApiError::network("submission rejected"));
        }
        Ok(self.assigned)
    }
}

fn question(text: &str) -> Word {
    Word::new(text, "noun", None, [], []).expect("Word construction failed")
}

fn three_questions() -> Vec<Word> {
    vec![question("haus"), question("baum"), question("zug")]
}

#[tokio::test]
async fn test_fresh_flow_starts_at_first_question() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = AttemptStore::new(dir.path()).expect("Failed to open store");
    let service = StubService::new(three_questions());

    let flow = PlacementFlow::start("anna", &service, &store)
        .await
        .expect("Start failed");
    assert_eq!(flow.question_number(), 1);
    assert_eq!(flow.current_question().expect("No question").text(), "haus");
    assert!(!flow.is_complete());
    let progress = flow.progress();
    assert_eq!(*progress.answered(), 0);
    assert_eq!(*progress.total(), 3);
}

#[tokio::test]
async fn test_record_result_advances_in_order() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = AttemptStore::new(dir.path()).expect("Failed to open store");
    let service = StubService::new(three_questions());

    let mut flow = PlacementFlow::start("anna", &service, &store)
        .await
        .expect("Start failed");
    flow.record_result(true, &store).expect("Record failed");
    assert_eq!(flow.current_question().expect("No question").text(), "baum");
    assert_eq!(flow.question_number(), 2);
    assert_eq!(*flow.progress().correct(), 1);
}

#[tokio::test]
async fn test_every_answer_is_persisted_immediately() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = AttemptStore::new(dir.path()).expect("Failed to open store");
    let service = StubService::new(three_questions());

    let mut flow = PlacementFlow::start("anna", &service, &store)
        .await
        .expect("Start failed");
    flow.record_result(false, &store).expect("Record failed");

    // A second handle over the same directory sees the answer already.
    let reader = AttemptStore::new(dir.path()).expect("Failed to open store");
    let attempt = reader
        .load("anna")
        .expect("Load failed")
        .expect("Attempt missing");
    assert!(attempt.has_answered("haus"));
    assert_eq!(*attempt.correct_count(), 0);
}

#[tokio::test]
async fn test_flow_resumes_where_it_stopped() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = AttemptStore::new(dir.path()).expect("Failed to open store");
    let service = StubService::new(three_questions());

    let mut first = PlacementFlow::start("anna", &service, &store)
        .await
        .expect("Start failed");
    first.record_result(true, &store).expect("Record failed");
    first.record_result(false, &store).expect("Record failed");
    drop(first);

    let resumed = PlacementFlow::start("anna", &service, &store)
        .await
        .expect("Resume failed");
    assert_eq!(resumed.question_number(), 3);
    assert_eq!(resumed.current_question().expect("No question").text(), "zug");
    let progress = resumed.progress();
    assert_eq!(*progress.answered(), 2);
    assert_eq!(*progress.correct(), 1);
    assert!(!resumed.is_complete());
}

#[tokio::test]
async fn test_submit_before_completion_is_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = AttemptStore::new(dir.path()).expect("Failed to open store");
    let service = StubService::new(three_questions());

    let mut flow = PlacementFlow::start("anna", &service, &store)
        .await
        .expect("Start failed");
    flow.record_result(true, &store).expect("Record failed");

    let result = flow.submit(&service, &store).await;
    assert_eq!(result, Err(PlacementError::Incomplete));
    assert_eq!(service.submit_calls(), 0);
}

#[tokio::test]
async fn test_submit_reports_score_and_clears_attempt() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = AttemptStore::new(dir.path()).expect("Failed to open store");
    let service = StubService::new(three_questions());

    let mut flow = PlacementFlow::start("anna", &service, &store)
        .await
        .expect("Start failed");
    flow.record_result(true, &store).expect("Record failed");
    flow.record_result(false, &store).expect("Record failed");
    flow.record_result(true, &store).expect("Record failed");

    let level = flow.submit(&service, &store).await.expect("Submit failed");
    assert_eq!(level, Level::A2);
    assert_eq!(*flow.phase(), PlacementPhase::Done(Level::A2));
    assert_eq!(service.last_correct.load(Ordering::SeqCst), 2);
    assert_eq!(service.last_total.load(Ordering::SeqCst), 3);
    assert!(store.load("anna").expect("Load failed").is_none());
}

#[tokio::test]
async fn test_repeat_submit_skips_the_network() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = AttemptStore::new(dir.path()).expect("Failed to open store");
    let service = StubService::new(vec![question("haus")]);

    let mut flow = PlacementFlow::start("anna", &service, &store)
        .await
        .expect("Start failed");
    flow.record_result(true, &store).expect("Record failed");

    assert_eq!(
        flow.submit(&service, &store).await.expect("Submit failed"),
        Level::A2
    );
    assert_eq!(
        flow.submit(&service, &store).await.expect("Submit failed"),
        Level::A2
    );
    assert_eq!(service.submit_calls(), 1);
}

#[tokio::test]
async fn test_failed_submit_keeps_attempt_for_retry() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = AttemptStore::new(dir.path()).expect("Failed to open store");
    let service = StubService::new(vec![question("haus")]);
    service.fail_submit.store(true, Ordering::SeqCst);

    let mut flow = PlacementFlow::start("anna", &service, &store)
        .await
        .expect("Start failed");
    flow.record_result(true, &store).expect("Record failed");

    let result = flow.submit(&service, &store).await;
    assert!(matches!(
        result,
        Err(PlacementError::Api(ApiError::Network { .. }))
    ));
    assert_eq!(*flow.phase(), PlacementPhase::Active);
    assert!(store.load("anna").expect("Load failed").is_some());

    service.fail_submit.store(false, Ordering::SeqCst);
    assert_eq!(
        flow.submit(&service, &store).await.expect("Retry failed"),
        Level::A2
    );
    assert_eq!(service.submit_calls(), 2);
    assert!(store.load("anna").expect("Load failed").is_none());
}

#[tokio::test]
async fn test_resumed_complete_attempt_needs_no_questions() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = AttemptStore::new(dir.path()).expect("Failed to open store");
    let service = StubService::new(three_questions());

    let mut first = PlacementFlow::start("anna", &service, &store)
        .await
        .expect("Start failed");
    for won in [true, true, false] {
        first.record_result(won, &store).expect("Record failed");
    }
    drop(first);

    let mut resumed = PlacementFlow::start("anna", &service, &store)
        .await
        .expect("Resume failed");
    assert!(resumed.is_complete());
    assert!(resumed.current_question().is_none());
    assert_eq!(
        resumed.submit(&service, &store).await.expect("Submit failed"),
        Level::A2
    );
    assert_eq!(service.last_correct.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_unknown_persisted_ids_are_dropped() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = AttemptStore::new(dir.path()).expect("Failed to open store");
    let service = StubService::new(three_questions());

    // A record written against an older question list.
    let mut stale = PlacementAttempt::new("anna");
    stale.record("bahnhof", true);
    store.save(&stale).expect("Save failed");

    let flow = PlacementFlow::start("anna", &service, &store)
        .await
        .expect("Start failed");
    assert_eq!(flow.question_number(), 1);
    let progress = flow.progress();
    assert_eq!(*progress.answered(), 0);
    assert_eq!(*progress.correct(), 0);
}

#[tokio::test]
async fn test_empty_question_list_is_an_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = AttemptStore::new(dir.path()).expect("Failed to open store");
    let service = StubService::new(Vec::new());

    let result = PlacementFlow::start("anna", &service, &store).await;
    assert!(matches!(
        result,
        Err(PlacementError::Api(ApiError::Validation { .. }))
    ));
}

#[tokio::test]
async fn test_attempts_do_not_leak_between_users() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = AttemptStore::new(dir.path()).expect("Failed to open store");
    let service = StubService::new(three_questions());

    let mut anna = PlacementFlow::start("anna", &service, &store)
        .await
        .expect("Start failed");
    anna.record_result(true, &store).expect("Record failed");
    anna.record_result(true, &store).expect("Record failed");

    let ben = PlacementFlow::start("ben", &service, &store)
        .await
        .expect("Start failed");
    assert_eq!(ben.question_number(), 1);
    assert_eq!(*ben.progress().answered(), 0);
}

#[tokio::test]
async fn test_record_without_pending_question_is_harmless() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = AttemptStore::new(dir.path()).expect("Failed to open store");
    let service = StubService::new(vec![question("haus")]);

    let mut flow = PlacementFlow::start("anna", &service, &store)
        .await
        .expect("Start failed");
    flow.record_result(true, &store).expect("Record failed");
    flow.record_result(true, &store).expect("Record should be a no-op");
    assert_eq!(*flow.progress().answered(), 1);
}
