//! Common test utilities and fixtures for integration tests
//!
//! Every `TestApp` owns a fresh in-memory store, so tests are isolated
//! without a database.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use orgauth_app::{build_app, Stores};
use orgauth_auth::AuthConfig;
use orgauth_common::PasswordHasher;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_only";

pub const DEFAULT_PASSWORD: &str = "Secret123!";

/// Router plus the auth configuration it validates tokens with
pub struct TestApp {
    pub router: Router,
    pub auth_config: AuthConfig,
}

/// Status code and parsed JSON body (`Null` for non-JSON bodies)
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// A user registered through the API
#[derive(Debug, Clone)]
pub struct UserFixture {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Self {
        let auth_config = AuthConfig::with_secret(TEST_JWT_SECRET);
        let hasher = PasswordHasher::with_params(1024, 1, 1).unwrap();
        let router = build_app(auth_config.clone(), Stores::in_memory(), hasher);
        Self {
            router,
            auth_config,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.post_raw(uri, token, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, token: Option<&str>, body: String) -> TestResponse {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// Register a user and return its id and token
    pub async fn register(&self, first_name: &str, last_name: &str, email: &str) -> UserFixture {
        let response = self
            .post_json(
                "/auth/register",
                None,
                json!({
                    "firstName": first_name,
                    "lastName": last_name,
                    "email": email,
                    "password": DEFAULT_PASSWORD,
                }),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "registration failed: {}",
            response.body
        );

        let data = &response.body["data"];
        UserFixture {
            user_id: data["user"]["userId"].as_str().unwrap().parse().unwrap(),
            email: data["user"]["email"].as_str().unwrap().to_string(),
            first_name: first_name.to_string(),
            token: data["accessToken"].as_str().unwrap().to_string(),
        }
    }

    /// Organisations visible to `user`, as returned by the list endpoint
    pub async fn organisations_of(&self, user: &UserFixture) -> Vec<Value> {
        let response = self.get("/api/organisations", Some(&user.token)).await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["data"]["organisations"]
            .as_array()
            .cloned()
            .unwrap_or_default()
    }

    /// Id of the organisation created for `user` at registration
    pub async fn default_org_id(&self, user: &UserFixture) -> Uuid {
        let expected = format!("{}'s Organisation", user.first_name);
        self.organisations_of(user)
            .await
            .iter()
            .find(|org| org["name"] == expected.as_str())
            .and_then(|org| org["orgId"].as_str())
            .unwrap()
            .parse()
            .unwrap()
    }

    /// Member ids of `org_id` as seen by `user`
    pub async fn members(&self, user: &UserFixture, org_id: Uuid) -> Vec<String> {
        let response = self
            .get(&format!("/api/organisations/{}", org_id), Some(&user.token))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["data"]["members"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m.as_str().unwrap().to_string())
            .collect()
    }

    pub async fn add_member(&self, actor: &UserFixture, org_id: Uuid, target: Uuid) -> TestResponse {
        self.post_json(
            &format!("/api/organisations/{}/users", org_id),
            Some(&actor.token),
            json!({ "userId": target.to_string() }),
        )
        .await
    }
}

pub mod assertions {
    use super::*;

    /// Assert an error envelope with the given status and message
    pub fn assert_error(response: &TestResponse, status: StatusCode, message: &str) {
        assert_eq!(response.status, status, "unexpected body: {}", response.body);
        assert_eq!(response.body["status"], "error");
        assert_eq!(response.body["message"], message);
    }

    /// Assert a 422 that names `field`
    pub fn assert_field_error(response: &TestResponse, field: &str) {
        assert_eq!(
            response.status,
            StatusCode::UNPROCESSABLE_ENTITY,
            "unexpected body: {}",
            response.body
        );
        let errors = response.body["errors"].as_array().unwrap();
        assert!(
            errors.iter().any(|e| e["field"] == field),
            "no error for {} in {}",
            field,
            response.body
        );
    }

    /// Assert that no credential material leaked into a JSON body
    pub fn assert_no_password_fields(value: &Value) {
        let text = value.to_string();
        assert!(!text.contains("password"), "password field exposed: {}", text);
        assert!(!text.contains("argon2"), "password hash exposed: {}", text);
    }
}
