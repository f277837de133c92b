use reqwest::{header, Client, Method};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use backend_bootstrap::{build_router_with_layers, AppContext};
use backend_infrastructure::{AppConfig, SqliteStore};

const ALICE: &str = "alice@example.com";
const BOB: &str = "bob@example.com";

struct TestServer {
    base_url: String,
    client: Client,
    token: Option<&'static str>,
}

struct Reply {
    status: u16,
    body: String,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

async fn spawn_app(token: Option<&'static str>) -> TestServer {
    let config = AppConfig {
        api_token: token.map(ToString::to_string),
        ..AppConfig::default()
    };
    let store = SqliteStore::open_in_memory().await.unwrap();
    let context = AppContext::with_store(&config, store);
    let app = build_router_with_layers(context.state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestServer {
        base_url: format!("http://{}", addr),
        client: Client::new(),
        token,
    }
}

impl TestServer {
    fn without_token(&self) -> TestServer {
        TestServer {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            token: None,
        }
    }

    fn request(&self, method: Method, path: &str, user: Option<&str>) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.token {
            request = request.bearer_auth(token);
        }
        if let Some(user) = user {
            request = request.header("X-User-Email", user);
        }
        request
    }

    async fn send(request: reqwest::RequestBuilder) -> Reply {
        let response = request.send().await.unwrap();
        let status = response.status().as_u16();
        let body = response.text().await.unwrap();
        Reply { status, body }
    }

    async fn call(&self, method: Method, path: &str, user: Option<&str>, body: Option<Value>) -> Reply {
        let mut request = self.request(method, path, user);
        if let Some(body) = body {
            request = request.json(&body);
        }
        Self::send(request).await
    }

    async fn call_raw(&self, method: Method, path: &str, user: &str, body: &'static str) -> Reply {
        let request = self
            .request(method, path, Some(user))
            .header(header::CONTENT_TYPE, "application/json")
            .body(body);
        Self::send(request).await
    }

    async fn create_event(&self, creator: &str, name: &str) -> Uuid {
        let created = self
            .call(
                Method::POST,
                "/v1/events",
                Some(creator),
                Some(event_body(name, "PARTY")),
            )
            .await;
        assert_eq!(created.status, 201, "{}", created.body);
        created.json()["id"].as_str().unwrap().parse().unwrap()
    }
}

fn event_body(name: &str, event_type: &str) -> Value {
    json!({
        "name": name,
        "description": "bring something",
        "eventDate": "2026-12-31T20:00:00Z",
        "location": "Rooftop",
        "type": event_type,
    })
}

fn resources_path(event_id: Uuid) -> String {
    format!("/v1/events/{}/resources", event_id)
}

fn contributions_path(event_id: Uuid, resource_id: &str) -> String {
    format!("/v1/events/{}/resources/{}/contributions", event_id, resource_id)
}

#[tokio::test]
async fn contribution_lifecycle_over_http() {
    let server = spawn_app(None).await;
    let event_id = server.create_event(ALICE, "New year").await;

    let created = server
        .call(
            Method::POST,
            &resources_path(event_id),
            Some(ALICE),
            Some(json!({"name": "Wine", "category": "drink", "quantity": 2})),
        )
        .await;
    assert_eq!(created.status, 201, "{}", created.body);
    let resource = created.json();
    assert_eq!(resource["currentQuantity"], 2);
    assert_eq!(resource["suggestedQuantity"], 2);
    assert_eq!(resource["version"], 2);
    let resource_id = resource["id"].as_str().unwrap().to_string();
    let contributions = contributions_path(event_id, &resource_id);
    let reduce = format!("{}/reduce", contributions);

    let added = server
        .call(Method::POST, &contributions, Some(BOB), Some(json!({"quantity": 3})))
        .await;
    assert_eq!(added.status, 200, "{}", added.body);
    assert_eq!(added.json()["quantity"], 3);

    let listed = server
        .call(Method::GET, &resources_path(event_id), None, None)
        .await;
    assert_eq!(listed.status, 200);
    let listed = listed.json();
    assert_eq!(listed[0]["currentQuantity"], 5);
    assert_eq!(listed[0]["contributors"].as_array().unwrap().len(), 2);

    let too_much = server
        .call(Method::POST, &reduce, Some(ALICE), Some(json!({"quantity": 5})))
        .await;
    assert_eq!(too_much.status, 400);
    assert_eq!(too_much.json()["type"], "INSUFFICIENT_CONTRIBUTION");

    let partial = server
        .call(Method::POST, &reduce, Some(BOB), Some(json!({"quantity": 1})))
        .await;
    assert_eq!(partial.status, 200);
    assert_eq!(partial.json()["quantity"], 2);

    let emptied = server
        .call(Method::POST, &reduce, Some(ALICE), Some(json!({"quantity": 2})))
        .await;
    assert_eq!(emptied.status, 204);

    for _ in 0..2 {
        let deleted = server
            .call(Method::DELETE, &contributions, Some(BOB), None)
            .await;
        assert_eq!(deleted.status, 204);
    }

    let remaining = server.call(Method::GET, &contributions, None, None).await;
    assert_eq!(remaining.status, 200);
    assert_eq!(remaining.json(), json!([]));

    let metrics = server
        .call(Method::GET, "/v1/ops/metrics/prometheus", None, None)
        .await;
    assert!(metrics
        .body
        .contains("happyrow_contributions_deleted_total 1\n"));
}

#[tokio::test]
async fn contributions_are_scoped_to_their_event() {
    let server = spawn_app(None).await;
    let event_a = server.create_event(ALICE, "Picnic").await;
    let event_b = server.create_event(BOB, "Brunch").await;

    let created = server
        .call(
            Method::POST,
            &resources_path(event_a),
            Some(ALICE),
            Some(json!({"name": "Cider", "category": "DRINK", "quantity": 1})),
        )
        .await;
    let resource_id = created.json()["id"].as_str().unwrap().to_string();

    let own = server
        .call(Method::GET, &contributions_path(event_a, &resource_id), None, None)
        .await;
    assert_eq!(own.status, 200);
    assert_eq!(own.json().as_array().unwrap().len(), 1);

    let foreign = server
        .call(Method::GET, &contributions_path(event_b, &resource_id), None, None)
        .await;
    assert_eq!(foreign.status, 404, "{}", foreign.body);
    assert!(foreign.json()["error"].is_string());
}

#[tokio::test]
async fn rejected_contribution_requests() {
    let server = spawn_app(None).await;
    let event_id = server.create_event(ALICE, "Barbecue").await;
    let missing = contributions_path(event_id, &Uuid::new_v4().to_string());

    let anonymous = server
        .call(Method::POST, &missing, None, Some(json!({"quantity": 1})))
        .await;
    assert_eq!(anonymous.status, 401);

    let zero = server
        .call(Method::POST, &missing, Some(ALICE), Some(json!({"quantity": 0})))
        .await;
    assert_eq!(zero.status, 400);

    let not_found = server
        .call(Method::POST, &missing, Some(ALICE), Some(json!({"quantity": 1})))
        .await;
    assert_eq!(not_found.status, 404);

    let bad_category = server
        .call(
            Method::POST,
            &resources_path(event_id),
            Some(ALICE),
            Some(json!({"name": "Stuff", "category": "furniture", "quantity": 1})),
        )
        .await;
    assert_eq!(bad_category.status, 400);

    let no_event = server
        .call(
            Method::POST,
            &resources_path(Uuid::new_v4()),
            Some(ALICE),
            Some(json!({"name": "Stuff", "category": "other", "quantity": 1})),
        )
        .await;
    assert_eq!(no_event.status, 404);
}

#[tokio::test]
async fn undecodable_bodies_answer_with_json_errors() {
    let server = spawn_app(None).await;
    let event_id = server.create_event(ALICE, "Tasting").await;
    let created = server
        .call(
            Method::POST,
            &resources_path(event_id),
            Some(ALICE),
            Some(json!({"name": "Cheese", "category": "food"})),
        )
        .await;
    let resource_id = created.json()["id"].as_str().unwrap().to_string();
    let contributions = contributions_path(event_id, &resource_id);

    for body in [r#"{"quantity":"lots"}"#, r#"{"quantity":4294967296}"#, "{oops"] {
        let reply = server
            .call_raw(Method::POST, &contributions, BOB, body)
            .await;
        assert_eq!(reply.status, 400, "{}", reply.body);
        assert!(reply.json()["error"].is_string());
    }
}

#[tokio::test]
async fn event_lifecycle_over_http() {
    let server = spawn_app(None).await;

    let created = server
        .call(
            Method::POST,
            "/v1/events",
            Some(ALICE),
            Some(event_body("  Birthday bash ", "birthday")),
        )
        .await;
    assert_eq!(created.status, 201, "{}", created.body);
    let event = created.json();
    assert_eq!(event["name"], "Birthday bash");
    assert_eq!(event["creator"], ALICE);
    assert_eq!(event["type"], "BIRTHDAY");
    let event_id: Uuid = event["id"].as_str().unwrap().parse().unwrap();
    let event_path = format!("/v1/events/{}", event_id);

    let duplicate = server
        .call(
            Method::POST,
            "/v1/events",
            Some(ALICE),
            Some(event_body("Birthday bash", "PARTY")),
        )
        .await;
    assert_eq!(duplicate.status, 409);

    let bad_type = server
        .call(
            Method::POST,
            "/v1/events",
            Some(ALICE),
            Some(event_body("Wedding", "WEDDING")),
        )
        .await;
    assert_eq!(bad_type.status, 400);

    let mine = server.call(Method::GET, "/v1/events", Some(ALICE), None).await;
    assert_eq!(mine.json().as_array().unwrap().len(), 1);
    let theirs = server.call(Method::GET, "/v1/events", Some(BOB), None).await;
    assert_eq!(theirs.json(), json!([]));

    let updated = server
        .call(
            Method::PUT,
            &event_path,
            Some(ALICE),
            Some(event_body("Surprise party", "party")),
        )
        .await;
    assert_eq!(updated.status, 200, "{}", updated.body);
    assert_eq!(updated.json()["name"], "Surprise party");
    assert_eq!(updated.json()["type"], "PARTY");

    let unknown = server
        .call(
            Method::PUT,
            &format!("/v1/events/{}", Uuid::new_v4()),
            Some(ALICE),
            Some(event_body("Ghost", "party")),
        )
        .await;
    assert_eq!(unknown.status, 404);

    let participants = server
        .call(
            Method::GET,
            &format!("/v1/events/{}/participants", event_id),
            None,
            None,
        )
        .await;
    assert_eq!(participants.json()[0]["userEmail"], ALICE);

    let resource = server
        .call(
            Method::POST,
            &resources_path(event_id),
            Some(ALICE),
            Some(json!({"name": "Cake", "category": "food", "quantity": 1})),
        )
        .await
        .json();
    let resource_id = resource["id"].as_str().unwrap().to_string();
    let contributions = contributions_path(event_id, &resource_id);
    server
        .call(Method::POST, &contributions, Some(BOB), Some(json!({"quantity": 2})))
        .await;

    let forbidden = server
        .call(Method::DELETE, &event_path, Some(BOB), None)
        .await;
    assert_eq!(forbidden.status, 403);
    assert_eq!(forbidden.json()["type"], "UNAUTHORIZED_DELETE");

    let deleted = server
        .call(Method::DELETE, &event_path, Some(ALICE), None)
        .await;
    assert_eq!(deleted.status, 204);

    let resources = server
        .call(Method::GET, &resources_path(event_id), None, None)
        .await;
    assert_eq!(resources.json(), json!([]));
    let gone = server.call(Method::GET, &contributions, None, None).await;
    assert_eq!(gone.status, 404);
    let participants = server
        .call(
            Method::GET,
            &format!("/v1/events/{}/participants", event_id),
            None,
            None,
        )
        .await;
    assert_eq!(participants.json(), json!([]));

    let again = server
        .call(Method::DELETE, &event_path, Some(ALICE), None)
        .await;
    assert_eq!(again.status, 404);
}

#[tokio::test]
async fn participants_over_http() {
    let server = spawn_app(None).await;
    let event_id = server.create_event(ALICE, "Game night").await;
    let participants = format!("/v1/events/{}/participants", event_id);

    let creator_again = server
        .call(Method::POST, &participants, Some(ALICE), Some(json!({})))
        .await;
    assert_eq!(creator_again.status, 409);

    let invited = server
        .call(
            Method::POST,
            &participants,
            Some(ALICE),
            Some(json!({"userEmail": BOB, "status": "INVITED"})),
        )
        .await;
    assert_eq!(invited.status, 201, "{}", invited.body);
    assert_eq!(invited.json()["userEmail"], BOB);
    assert_eq!(invited.json()["status"], "INVITED");

    let updated = server
        .call(
            Method::PUT,
            &format!("{}/me", participants),
            Some(BOB),
            Some(json!({"status": "MAYBE"})),
        )
        .await;
    assert_eq!(updated.status, 200);
    assert_eq!(updated.json()["status"], "MAYBE");

    let stranger = server
        .call(
            Method::PUT,
            &format!("{}/me", participants),
            Some("carol@example.com"),
            Some(json!({"status": "DECLINED"})),
        )
        .await;
    assert_eq!(stranger.status, 404);

    let listed = server.call(Method::GET, &participants, None, None).await;
    assert_eq!(listed.json().as_array().unwrap().len(), 2);

    let no_event = server
        .call(
            Method::POST,
            &format!("/v1/events/{}/participants", Uuid::new_v4()),
            Some(ALICE),
            Some(json!({})),
        )
        .await;
    assert_eq!(no_event.status, 404);
}

#[tokio::test]
async fn api_token_guards_everything_but_health() {
    let guarded = spawn_app(Some("s3cret")).await;
    let open = guarded.without_token();
    let event_id = Uuid::new_v4();

    let denied = open
        .call(Method::GET, &resources_path(event_id), Some(ALICE), None)
        .await;
    assert_eq!(denied.status, 401);

    let allowed = guarded
        .call(Method::GET, &resources_path(event_id), Some(ALICE), None)
        .await;
    assert_eq!(allowed.status, 200);

    let events = open.call(Method::GET, "/v1/events", Some(ALICE), None).await;
    assert_eq!(events.status, 401);

    let live = open
        .call(Method::GET, "/v1/ops/health/live", None, None)
        .await;
    assert_eq!(live.status, 200);
    let ready = open
        .call(Method::GET, "/v1/ops/health/ready", None, None)
        .await;
    assert_eq!(ready.status, 200);
}
