//! End-to-End Test Suite: Service base over the real HTTP transport
//!
//! Drives `ServiceBase` through the reqwest-backed client against a wiremock
//! server: URL resolution from configuration, verb round trips, opt-in basic
//! auth, status handling and timing.

use std::{sync::Arc, time::Duration};

use apiprobe_http::{shared_client, HttpConfig, HttpError, StatusCode};
use apiprobe_service::{
    ApiResponse, ConfigError, MapProvider, ServiceBase, BASE_URL_KEY, PASSWORD_KEY, USERNAME_KEY,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct User {
    id: u64,
    name: String,
}

/// What a suite author writes on top of the base
struct UsersService {
    base: ServiceBase,
}

impl UsersService {
    fn new(base: ServiceBase) -> Self {
        Self { base }
    }

    async fn list(&self) -> apiprobe_http::Result<ApiResponse<Vec<User>>> {
        self.base.get(self.base.url(), None).await
    }

    async fn create(&self, user: &User) -> apiprobe_http::Result<ApiResponse<User>> {
        let auth = self
            .base
            .authenticate()
            .expect("credentials configured for this suite");
        self.base.post(self.base.url(), user, Some(&auth)).await
    }

    async fn rename(&self, id: u64, name: &str) -> apiprobe_http::Result<ApiResponse<User>> {
        let url = format!("{}/{id}", self.base.url());
        self.base.patch(&url, &json!({ "name": name }), None).await
    }

    async fn remove(&self, id: u64) -> apiprobe_http::Result<ApiResponse<()>> {
        let url = format!("{}/{id}", self.base.url());
        self.base.delete(&url, None).await
    }
}

fn provider(server: &MockServer) -> MapProvider {
    MapProvider::new()
        .with(BASE_URL_KEY, server.uri())
        .with(USERNAME_KEY, "alice")
        .with(PASSWORD_KEY, "secret")
}

fn users_service(server: &MockServer, config: HttpConfig) -> UsersService {
    let client = shared_client(config).expect("Failed to build HTTP client");
    UsersService::new(ServiceBase::new("/users", client, Arc::new(provider(server))))
}

/// Full CRUD flow: list, create with basic auth, rename, delete.
#[tokio::test]
async fn test_users_crud_workflow() {
    let server = MockServer::start().await;
    let alice = User {
        id: 1,
        name: "alice".to_string(),
    };

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-total-count", "1")
                .set_body_json(json!([alice])),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("authorization", "Basic YWxpY2U6c2VjcmV0"))
        .and(body_json(json!({"id": 2, "name": "bob"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 2, "name": "bob"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/users/2"))
        .and(body_json(json!({"name": "robert"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 2, "name": "robert"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/users/2"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let users = users_service(&server, HttpConfig::default());

    let listed = users.list().await.unwrap();
    assert_eq!(listed.status(), 200);
    assert_eq!(listed.headers().get("x-total-count").unwrap(), "1");
    assert_eq!(listed.data(), &vec![alice]);

    let bob = User {
        id: 2,
        name: "bob".to_string(),
    };
    let created = users.create(&bob).await.unwrap();
    assert_eq!(created.status(), 201);
    assert_eq!(created.into_data(), bob);

    let renamed = users.rename(2, "robert").await.unwrap();
    assert_eq!(renamed.data().name, "robert");

    let removed = users.remove(2).await.unwrap();
    assert_eq!(removed.status(), 204);
}

#[tokio::test]
async fn test_head_put_and_options_through_service() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).insert_header("etag", "\"v1\""))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/users/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5, "name": "eve"})))
        .mount(&server)
        .await;
    Mock::given(method("OPTIONS"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(204).insert_header("allow", "GET, POST"))
        .mount(&server)
        .await;

    let base = users_service(&server, HttpConfig::default()).base;

    let head: ApiResponse<()> = base.head(base.url(), None).await.unwrap();
    assert_eq!(head.headers().get("etag").unwrap(), "\"v1\"");

    let put: ApiResponse<User> = base
        .put(
            &format!("{}/5", base.url()),
            &User {
                id: 5,
                name: "eve".to_string(),
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(put.data().id, 5);

    let options: ApiResponse<Value> = base.options(base.url(), None).await.unwrap();
    assert_eq!(options.status(), 204);
    assert_eq!(options.data(), &Value::Null);
    assert_eq!(options.headers().get("allow").unwrap(), "GET, POST");
}

/// Error statuses fail by default and pass through when the transport is lenient.
#[tokio::test]
async fn test_error_status_handling_follows_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "down"})))
        .mount(&server)
        .await;

    let strict = users_service(&server, HttpConfig::default());
    match strict.base.get::<Value>(strict.base.url(), None).await {
        Err(HttpError::HttpStatus { status, .. }) => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE)
        }
        other => panic!("expected HttpStatus error, got {other:?}"),
    }

    let lenient = users_service(&server, HttpConfig::default().with_error_for_status(false));
    let response = lenient
        .base
        .get::<Value>(lenient.base.url(), None)
        .await
        .unwrap();
    assert_eq!(response.status(), 503);
    assert_eq!(response.data(), &json!({"error": "down"}));
}

#[tokio::test]
async fn test_response_time_covers_server_delay() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(120))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let users = users_service(&server, HttpConfig::default());
    let response = users.list().await.unwrap();

    assert!(response.response_time() >= 120);
    assert!(response.data().is_empty());
}

#[tokio::test]
async fn test_missing_credentials_stop_before_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = shared_client(HttpConfig::default()).unwrap();
    let provider = MapProvider::new().with(BASE_URL_KEY, server.uri());
    let base = ServiceBase::new("/users", client, Arc::new(provider));

    assert_eq!(
        base.authenticate(),
        Err(ConfigError::MissingCredentials {
            missing: vec![USERNAME_KEY, PASSWORD_KEY]
        })
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let client = shared_client(HttpConfig::fast()).unwrap();
    let provider = MapProvider::new().with(BASE_URL_KEY, "http://127.0.0.1:1");
    let base = ServiceBase::new("/users", client, Arc::new(provider));

    let result = base.get::<Value>(base.url(), None).await;

    assert!(matches!(result, Err(HttpError::RequestFailed(_))));
}
