//! Tests for the HTTP backend client, against a local mock server.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wortspiel::{ApiClient, ApiError, GameSession, Level, SessionMode, Word, WordService};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), "anna", None).expect("Failed to build client")
}

#[tokio::test]
async fn test_fetch_word_sends_identity_and_parses_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/word"))
        .and(query_param("level", "a1"))
        .and(query_param("use_model", "true"))
        .and(query_param("username", "anna"))
        .and(header("authorization", "Bearer token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "word": "Tisch",
            "type": "noun",
            "category": "wohnen",
            "pre_revealed_letters": ["T", "q"],
            "excluded_letters": ["x"]
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri(), "anna", Some("token-123".to_string()))
        .expect("Failed to build client");
    let word = client
        .fetch_word(Level::A1, true)
        .await
        .expect("Fetch failed");
    assert_eq!(word.text(), "tisch");
    assert_eq!(word.category().as_deref(), Some("wohnen"));
    assert!(word.pre_revealed().contains(&'t'));
    assert!(!word.pre_revealed().contains(&'q'));
    assert!(word.excluded().contains(&'x'));
}

#[tokio::test]
async fn test_rejected_credentials_surface_as_auth_required() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/word"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_word(Level::A1, false)
        .await
        .expect_err("Fetch should fail");
    assert_eq!(err, ApiError::AuthRequired);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_server_error_is_a_retryable_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/word"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_word(Level::A1, false)
        .await
        .expect_err("Fetch should fail");
    assert!(matches!(err, ApiError::Network { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_malformed_body_is_a_validation_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/word"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_word(Level::A1, false)
        .await
        .expect_err("Fetch should fail");
    assert!(matches!(err, ApiError::Validation { .. }));
}

#[tokio::test]
async fn test_letterless_word_payload_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/word"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "word": "1234",
            "type": "noun"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_word(Level::A1, false)
        .await
        .expect_err("Fetch should fail");
    assert!(matches!(err, ApiError::Validation { .. }));
}

#[tokio::test]
async fn test_log_result_sends_wire_casing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/log_game"))
        .and(body_partial_json(json!({
            "word": "zug",
            "wordType": "verb",
            "won": false,
            "wrongGuessCount": 6,
            "wrongLetters": ["a", "b", "c", "d", "e", "f"]
        })))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let mut session = GameSession::new(
        Word::new("zug", "verb", None, [], []).expect("word"),
        SessionMode::FreePlay,
    );
    for miss in ['a', 'b', 'c', 'd', 'e', 'f'] {
        session.guess(miss);
    }
    let report = session.take_end_report().expect("Round should be over");

    client_for(&server)
        .log_result(&report)
        .await
        .expect("Log failed");
}

#[tokio::test]
async fn test_consume_hint_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/use_hint"))
        .and(body_partial_json(json!({
            "word": "haus",
            "guessedLetters": ["a", "h"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "revealed_letter": "u",
            "hint_credits": 4
        })))
        .mount(&server)
        .await;

    let grant = client_for(&server)
        .consume_hint("haus", &['a', 'h'])
        .await
        .expect("Hint failed");
    assert_eq!(*grant.letter(), 'u');
    assert_eq!(*grant.balance(), 4);
}

#[tokio::test]
async fn test_hint_without_letter_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/use_hint"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "revealed_letter": "",
            "hint_credits": 4
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .consume_hint("haus", &[])
        .await
        .expect_err("Hint should fail");
    assert!(matches!(err, ApiError::Validation { .. }));
}

#[tokio::test]
async fn test_fetch_stats_parses_full_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "wins": 12,
            "losses": 3,
            "hint_credits": 5,
            "failed_words": ["gespenst"],
            "problem_letters": ["ü"]
        })))
        .mount(&server)
        .await;

    let stats = client_for(&server).fetch_stats().await.expect("Fetch failed");
    assert_eq!(*stats.wins(), 12);
    assert_eq!(*stats.losses(), 3);
    assert_eq!(*stats.hint_credits(), 5);
    assert_eq!(*stats.failed_words(), vec!["gespenst".to_string()]);
    assert_eq!(*stats.problem_letters(), vec!['ü']);
    assert!((stats.win_rate() - 80.0).abs() < 0.001);
}

#[tokio::test]
async fn test_fetch_stats_fills_missing_lists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "wins": 0,
            "losses": 0,
            "hint_credits": 3
        })))
        .mount(&server)
        .await;

    let stats = client_for(&server).fetch_stats().await.expect("Fetch failed");
    assert!(stats.failed_words().is_empty());
    assert!(stats.problem_letters().is_empty());
    assert_eq!(stats.win_rate(), 0.0);
}

#[tokio::test]
async fn test_placement_questions_parse_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/placement_questions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"word": "Haus", "type": "noun"},
            {"word": "laufen", "type": "verb"}
        ])))
        .mount(&server)
        .await;

    let questions = client_for(&server)
        .fetch_placement_questions()
        .await
        .expect("Fetch failed");
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].id(), "haus");
    assert_eq!(questions[1].id(), "laufen");
}

#[tokio::test]
async fn test_submit_placement_parses_assigned_level() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/placement_submit"))
        .and(body_partial_json(json!({
            "username": "anna",
            "correctAnswers": 7,
            "totalQuestions": 10
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"level": "b1"})))
        .mount(&server)
        .await;

    let level = client_for(&server)
        .submit_placement("anna", 7, 10)
        .await
        .expect("Submit failed");
    assert_eq!(level, Level::B1);
}

#[tokio::test]
async fn test_unknown_assigned_level_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/placement_submit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"level": "z9"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .submit_placement("anna", 7, 10)
        .await
        .expect_err("Submit should fail");
    assert!(matches!(err, ApiError::Validation { .. }));
}

#[tokio::test]
async fn test_feedback_absent_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/feedback"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"feedback": null})))
        .mount(&server)
        .await;

    let feedback = client_for(&server).fetch_feedback().await.expect("Fetch failed");
    assert!(feedback.is_none());
}

#[tokio::test]
async fn test_feedback_round_trips() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/feedback"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"feedback": "Üb die Artikel!"})),
        )
        .mount(&server)
        .await;

    let feedback = client_for(&server).fetch_feedback().await.expect("Fetch failed");
    assert_eq!(feedback.as_deref(), Some("Üb die Artikel!"));
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_failure() {
    let client = ApiClient::new("http://127.0.0.1:9", "anna", None).expect("Failed to build client");
    let err = client.fetch_stats().await.expect_err("Fetch should fail");
    assert!(matches!(err, ApiError::Network { .. }));
    assert!(err.is_retryable());
}
