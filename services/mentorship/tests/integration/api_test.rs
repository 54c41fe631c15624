use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::{TestResponse, TestServer};
use chrono::{Duration, Utc};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{Value, json};
use uuid::Uuid;

use mentorship_domain::relation::RelationState;
use mentorship_migration::{Migrator, MigratorTrait};
use mentorship_service::domain::repository::RelationRepository;
use mentorship_service::infra::db::DbRelationRepository;
use mentorship_service::router::build_router;
use mentorship_service::state::AppState;
use mentorship_testing::auth::MockAuth;
use mentorship_testing::fixture::Fixture;

struct Harness {
    db: DatabaseConnection,
    server: TestServer,
    mentor: MockAuth,
    mentee: MockAuth,
}

async fn harness() -> Harness {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let server = TestServer::new(build_router(AppState { db: db.clone() })).unwrap();
    let mentor = create_user(&server, "mentor", false, true).await;
    let mentee = create_user(&server, "mentee", true, false).await;
    Harness {
        db,
        server,
        mentor: MockAuth::member(mentor),
        mentee: MockAuth::member(mentee),
    }
}

async fn create_user(
    server: &TestServer,
    username: &str,
    need_mentoring: bool,
    available_to_mentor: bool,
) -> Uuid {
    let [id_header, role_header] = MockAuth::service().header_pairs();
    let response = server
        .post("/users")
        .add_header(id_header.0, id_header.1)
        .add_header(role_header.0, role_header.1)
        .json(&json!({
            "name": username,
            "username": username,
            "email": format!("{username}@example.com"),
            "need_mentoring": need_mentoring,
            "available_to_mentor": available_to_mentor,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap()
}

impl Harness {
    async fn call(
        &self,
        method: &str,
        path: &str,
        auth: &MockAuth,
        body: Option<Value>,
    ) -> TestResponse {
        let mut request = match method {
            "GET" => self.server.get(path),
            "POST" => self.server.post(path),
            "PUT" => self.server.put(path),
            "DELETE" => self.server.delete(path),
            other => panic!("unsupported method {other}"),
        };
        for (name, value) in auth.header_pairs() {
            request = request.add_header(name, value);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }
        request.await
    }

    /// Mentor proposes a six-week relation to the mentee and returns its id.
    async fn send_request(&self) -> Uuid {
        self.send_request_to(&self.mentee).await
    }

    async fn send_request_to(&self, mentee: &MockAuth) -> Uuid {
        let body = json!({
            "mentor_id": self.mentor.user_id,
            "mentee_id": mentee.user_id,
            "end_date": (Utc::now() + Duration::weeks(6)).to_rfc3339(),
            "notes": "description of a good mentorship relation",
        });
        let response = self
            .call("POST", "/mentorship_relation/send_request", &self.mentor, Some(body))
            .await;
        assert_contract(&response, "contracts/http/mentorship/send_request_ok.json");

        let listed = self.list(mentee).await;
        listed[0]["id"].as_str().and_then(|s| s.parse().ok()).unwrap()
    }

    async fn list(&self, auth: &MockAuth) -> Vec<Value> {
        let response = self.call("GET", "/mentorship_relations", auth, None).await;
        response.assert_status_ok();
        response.json::<Vec<Value>>()
    }

    fn relations(&self) -> DbRelationRepository {
        DbRelationRepository {
            db: self.db.clone(),
        }
    }
}

/// Error bodies are always a single `message` string.
fn assert_message_body(response: &TestResponse) {
    let body = response.json::<Value>();
    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 1, "unexpected body {body}");
    assert!(object["message"].is_string(), "unexpected body {body}");
}

fn assert_contract(response: &TestResponse, fixture: &str) {
    let expected = Fixture::load(fixture);
    assert_eq!(
        u64::from(response.status_code().as_u16()),
        expected["status"].as_u64().unwrap(),
        "status mismatch for {fixture}"
    );
    assert_eq!(response.json::<Value>(), expected["body"], "body mismatch for {fixture}");
}

// ── DELETE /mentorship_relation/{id} ─────────────────────────────────────────

#[tokio::test]
async fn should_delete_pending_request_sent_by_caller() {
    let h = harness().await;
    let id = h.send_request().await;

    let response = h
        .call("DELETE", &format!("/mentorship_relation/{id}"), &h.mentor, None)
        .await;
    assert_contract(&response, "contracts/http/mentorship/delete_relation_ok.json");

    assert!(h.relations().find_by_id(id).await.unwrap().is_none());
    assert!(h.list(&h.mentor).await.is_empty());
    assert!(h.list(&h.mentee).await.is_empty());
}

#[tokio::test]
async fn should_refuse_delete_by_request_receiver() {
    let h = harness().await;
    let id = h.send_request().await;

    let response = h
        .call("DELETE", &format!("/mentorship_relation/{id}"), &h.mentee, None)
        .await;
    assert_contract(
        &response,
        "contracts/http/mentorship/delete_relation_not_creator.json",
    );

    let stored = h.relations().find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.state, RelationState::Pending);
    assert_eq!(stored.action_user_id, h.mentor.user_id);

    let listed = h.list(&h.mentor).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], json!(id.to_string()));
    assert_eq!(listed[0]["state"], json!(1));
}

#[tokio::test]
async fn should_return_not_found_for_unknown_relation() {
    let h = harness().await;
    let response = h
        .call(
            "DELETE",
            &format!("/mentorship_relation/{}", Uuid::now_v7()),
            &h.mentor,
            None,
        )
        .await;
    assert_contract(
        &response,
        "contracts/http/mentorship/delete_relation_not_found.json",
    );
}

#[tokio::test]
async fn should_refuse_delete_after_acceptance() {
    let h = harness().await;
    let id = h.send_request().await;
    h.call("PUT", &format!("/mentorship_relation/{id}/accept"), &h.mentee, None)
        .await
        .assert_status_ok();

    let response = h
        .call("DELETE", &format!("/mentorship_relation/{id}"), &h.mentor, None)
        .await;
    assert_contract(
        &response,
        "contracts/http/mentorship/delete_relation_not_pending.json",
    );

    let stored = h.relations().find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.state, RelationState::Accepted);
}

#[tokio::test]
async fn should_answer_malformed_relation_id_with_message_body() {
    let h = harness().await;
    let response = h
        .call("DELETE", "/mentorship_relation/not-a-uuid", &h.mentor, None)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_message_body(&response);
}

// ── Accept / current ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_make_accepted_relation_current() {
    let h = harness().await;

    let none = h
        .call("GET", "/mentorship_relations/current", &h.mentee, None)
        .await;
    assert_contract(&none, "contracts/http/mentorship/current_relation_none.json");

    let id = h.send_request().await;
    let accepted = h
        .call("PUT", &format!("/mentorship_relation/{id}/accept"), &h.mentee, None)
        .await;
    assert_contract(&accepted, "contracts/http/mentorship/accept_relation_ok.json");

    let current = h
        .call("GET", "/mentorship_relations/current", &h.mentee, None)
        .await;
    current.assert_status_ok();
    let body = current.json::<Value>();
    assert_eq!(body["id"], json!(id.to_string()));
    assert_eq!(body["state"], json!(2));
    assert_eq!(body["sent_by_me"], json!(false));
    assert!(body["accept_date"].is_string());
}

#[tokio::test]
async fn should_filter_listing_by_relation_state() {
    let h = harness().await;
    h.send_request().await;

    let pending = h
        .call("GET", "/mentorship_relations?relation_state=1", &h.mentee, None)
        .await;
    pending.assert_status_ok();
    assert_eq!(pending.json::<Vec<Value>>().len(), 1);

    let accepted = h
        .call("GET", "/mentorship_relations?relation_state=2", &h.mentee, None)
        .await;
    accepted.assert_status_ok();
    assert!(accepted.json::<Vec<Value>>().is_empty());

    let invalid = h
        .call("GET", "/mentorship_relations?relation_state=9", &h.mentee, None)
        .await;
    invalid.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        invalid.json::<Value>(),
        json!({ "message": "Mentorship relation state is invalid." })
    );

    let unparsable = h
        .call("GET", "/mentorship_relations?relation_state=abc", &h.mentee, None)
        .await;
    unparsable.assert_status(StatusCode::BAD_REQUEST);
    assert_message_body(&unparsable);
}

#[tokio::test]
async fn should_answer_malformed_request_body_with_message_body() {
    let h = harness().await;
    let response = h
        .call(
            "POST",
            "/mentorship_relation/send_request",
            &h.mentor,
            Some(json!({ "mentor_id": "x" })),
        )
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_message_body(&response);
    assert!(h.list(&h.mentor).await.is_empty());
}

#[tokio::test]
async fn should_accept_only_one_of_two_requests_from_same_mentor() {
    let h = harness().await;
    let other = MockAuth::member(create_user(&h.server, "mentee2", true, false).await);
    let first = h.send_request().await;
    let second = h.send_request_to(&other).await;

    let first_path = format!("/mentorship_relation/{first}/accept");
    let second_path = format!("/mentorship_relation/{second}/accept");
    let (a, b) = tokio::join!(
        h.call("PUT", &first_path, &h.mentee, None),
        h.call("PUT", &second_path, &other, None),
    );
    let mut statuses = [a.status_code(), b.status_code()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::BAD_REQUEST]);

    let refused = if a.status_code() == StatusCode::OK { &b } else { &a };
    assert_eq!(
        refused.json::<Value>(),
        json!({ "message": "Sender is currently involved in a mentorship relation." })
    );

    let accepted = h
        .list(&h.mentor)
        .await
        .into_iter()
        .filter(|r| r["state"] == json!(2))
        .count();
    assert_eq!(accepted, 1);
}

// ── Identity and request id ──────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_request_without_identity_headers() {
    let h = harness().await;
    let response = h.server.get("/mentorship_relations").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert!(response.text().is_empty());
}

#[tokio::test]
async fn should_forbid_user_creation_by_member() {
    let h = harness().await;
    let response = h
        .call(
            "POST",
            "/users",
            &h.mentor,
            Some(json!({
                "name": "someone",
                "username": "someone",
                "email": "someone@example.com",
            })),
        )
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_attach_request_id_to_every_response() {
    let h = harness().await;
    let generated = h.server.get("/healthz").await;
    let value = generated.header("x-request-id");
    assert!(value.to_str().unwrap().parse::<Uuid>().is_ok());

    let echoed = h
        .server
        .get("/mentorship_relations")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("trace-me"),
        )
        .await;
    assert_eq!(echoed.header("x-request-id"), "trace-me");
}

#[tokio::test]
async fn should_report_ready_when_database_answers() {
    let h = harness().await;
    h.server.get("/readyz").await.assert_status_ok();
}
