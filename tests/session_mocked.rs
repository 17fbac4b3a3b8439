/// Integration tests with a mocked scoring service.
/// Exercises the full session workflow without hitting a real server.
use lead_intake::config::Config;
use lead_intake::consent::CONSENT_MESSAGE;
use lead_intake::scoring_client::ScoringClient;
use lead_intake::session::{LeadSession, SubmissionState, SubmitStart};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper function to create a session pointed at the mock server.
fn create_test_session(base_url: String) -> LeadSession {
    let config = Config {
        scoring_api_url: base_url,
        request_timeout_secs: 5,
        max_retries: 0,
        retry_backoff_ms: 0,
    };
    LeadSession::new(ScoringClient::new(&config).unwrap())
}

/// Fills the draft with the reference intake scenario.
fn fill_draft(session: &mut LeadSession) {
    let draft = session.draft_mut();
    draft.phone_number = "555-1234".to_string();
    draft.email = "a@b.com".to_string();
    draft.credit_score = "700".to_string();
    draft.income = "50000".to_string();
    draft.comments = "test".to_string();
    draft.consent = true;
}

fn scored_lead_json(email: &str, initial: f64, reranked: f64) -> serde_json::Value {
    serde_json::json!({
        "phone_number": "555-1234",
        "email": email,
        "credit_score": 700,
        "age_group": "18-25",
        "family_background": "Single",
        "income": 50000,
        "comments": "test",
        "consent": true,
        "initial_score": initial,
        "reranked_score": reranked
    })
}

#[tokio::test]
async fn test_startup_fetch_populates_collection_once() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!([
        scored_lead_json("first@x.com", 0.60, 0.65),
        scored_lead_json("second@x.com", 0.40, 0.35),
    ]);

    Mock::given(method("GET"))
        .and(path("/leads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut session = create_test_session(mock_server.uri());
    session.load_leads().await.unwrap();

    assert_eq!(session.leads().len(), 2);
    let emails: Vec<_> = session
        .leads()
        .iter()
        .map(|e| e.lead.email.clone())
        .collect();
    assert_eq!(emails, ["first@x.com", "second@x.com"]);

    // The load is one-shot: a second call must not issue another request
    // (the mock's expect(1) is verified when the server drops).
    session.load_leads().await.unwrap();
    assert_eq!(session.leads().len(), 2);
}

#[tokio::test]
async fn test_startup_fetch_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/leads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let mut session = create_test_session(mock_server.uri());
    session.load_leads().await.unwrap();

    assert!(session.leads().is_empty());
    assert!(session.leads().rows().is_empty());
    assert_eq!(session.error(), None);
}

#[tokio::test]
async fn test_submit_success_appends_and_resets_draft() {
    let mock_server = MockServer::start().await;

    let expected_request = serde_json::json!({
        "phone_number": "555-1234",
        "email": "a@b.com",
        "credit_score": 700,
        "age_group": "18-25",
        "family_background": "Single",
        "income": 50000,
        "comments": "test",
        "consent": true
    });

    Mock::given(method("POST"))
        .and(path("/score"))
        .and(body_json(&expected_request))
        .respond_with(ResponseTemplate::new(200).set_body_json(scored_lead_json("a@b.com", 0.72, 0.81)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut session = create_test_session(mock_server.uri());
    fill_draft(&mut session);

    let state = session.submit().await;
    assert_eq!(*state, SubmissionState::Idle);

    assert_eq!(session.leads().len(), 1);
    let tail = session.leads().last().unwrap();
    assert_eq!(tail.lead.email, "a@b.com");
    assert_eq!(tail.lead.initial_score, 0.72);

    let rows = session.leads().rows();
    assert_eq!(rows[0].reranked_score, "0.81");

    // Draft is back to defaults, consent included.
    assert!(session.draft().is_default());
    assert!(!session.draft().consent);
}

#[tokio::test]
async fn test_consent_block_makes_no_network_call() {
    let mock_server = MockServer::start().await;

    // Zero calls expected; verified when the server drops.
    Mock::given(method("POST"))
        .and(path("/score"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut session = create_test_session(mock_server.uri());
    fill_draft(&mut session);
    session.draft_mut().consent = false;

    session.submit().await;

    assert_eq!(session.error(), Some(CONSENT_MESSAGE));
    assert!(session.leads().is_empty());
    assert_eq!(session.draft().email, "a@b.com");
}

#[tokio::test]
async fn test_missing_field_blocks_before_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/score"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut session = create_test_session(mock_server.uri());
    fill_draft(&mut session);
    session.draft_mut().phone_number.clear();

    session.submit().await;

    assert_eq!(session.error(), Some("Phone number is required"));
    assert!(session.leads().is_empty());
}

#[tokio::test]
async fn test_server_detail_is_surfaced_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/score"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"detail": "Invalid credit score"})),
        )
        .mount(&mock_server)
        .await;

    let mut session = create_test_session(mock_server.uri());
    fill_draft(&mut session);

    session.submit().await;

    assert_eq!(session.error(), Some("Invalid credit score"));
    // Draft is preserved so the user can correct and resubmit.
    assert_eq!(session.draft().credit_score, "700");
    assert!(session.leads().is_empty());
    // The session is back out of Submitting: another attempt may start.
    assert!(matches!(session.begin_submit(), SubmitStart::Started(_)));
}

#[tokio::test]
async fn test_generic_message_when_detail_missing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/score"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let mut session = create_test_session(mock_server.uri());
    fill_draft(&mut session);

    session.submit().await;

    assert_eq!(session.error(), Some("An error occurred"));
}

#[tokio::test]
async fn test_fetch_failure_never_touches_submission_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/leads"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/score"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scored_lead_json("a@b.com", 0.72, 0.81)))
        .mount(&mock_server)
        .await;

    let mut session = create_test_session(mock_server.uri());

    // The fetch error is reported to the caller but not surfaced in the
    // submission error slot.
    let result = session.load_leads().await;
    assert!(result.is_err());
    assert_eq!(session.error(), None);
    assert_eq!(*session.state(), SubmissionState::Idle);
    assert!(session.leads().is_empty());

    // Submission still works normally afterwards.
    fill_draft(&mut session);
    session.submit().await;
    assert_eq!(session.leads().len(), 1);
}

#[tokio::test]
async fn test_transport_failure_with_retries_enabled() {
    // Grab a free port, then release it so connections are refused.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = Config {
        scoring_api_url: format!("http://127.0.0.1:{}", port),
        request_timeout_secs: 1,
        max_retries: 2,
        retry_backoff_ms: 1,
    };
    let mut session = LeadSession::new(ScoringClient::new(&config).unwrap());

    let result = session.load_leads().await;
    assert!(result.is_err());

    fill_draft(&mut session);
    session.submit().await;
    assert_eq!(session.error(), Some("An error occurred"));
    assert!(session.leads().is_empty());
}
