//! Registration and login endpoint integration tests
//!
//! - POST /auth/register
//! - POST /auth/login

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{assertions, TestApp, DEFAULT_PASSWORD};

mod test_register {
    use super::*;

    #[tokio::test]
    async fn test_register_success() {
        let app = TestApp::new();

        let response = app
            .post_json(
                "/auth/register",
                None,
                json!({
                    "firstName": "Jane",
                    "lastName": "Smith",
                    "email": "jane@x.com",
                    "password": "Secret123!",
                    "phone": "+44 20 7946 0958",
                }),
            )
            .await;

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["status"], "success");
        assert_eq!(response.body["message"], "Registration successful");

        let data = &response.body["data"];
        assert!(!data["accessToken"].as_str().unwrap().is_empty());
        assert_eq!(data["user"]["firstName"], "Jane");
        assert_eq!(data["user"]["lastName"], "Smith");
        assert_eq!(data["user"]["email"], "jane@x.com");
        assert_eq!(data["user"]["phone"], "+44 20 7946 0958");
        assert!(data["user"]["userId"].as_str().unwrap().parse::<uuid::Uuid>().is_ok());
        assertions::assert_no_password_fields(&data["user"]);
    }

    #[tokio::test]
    async fn test_register_then_fetch_own_profile() {
        let app = TestApp::new();
        let jane = app.register("Jane", "Smith", "jane@x.com").await;

        let response = app
            .get(&format!("/api/users/{}", jane.user_id), Some(&jane.token))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["message"], "User found");
        assert_eq!(response.body["data"]["userId"], jane.user_id.to_string());
        assert_eq!(response.body["data"]["email"], "jane@x.com");
    }

    #[tokio::test]
    async fn test_register_creates_default_organisation() {
        let app = TestApp::new();
        let jane = app.register("Jane", "Smith", "jane@x.com").await;

        let organisations = app.organisations_of(&jane).await;
        assert_eq!(organisations.len(), 1);
        assert_eq!(organisations[0]["name"], "Jane's Organisation");

        let org_id = app.default_org_id(&jane).await;
        assert_eq!(app.members(&jane, org_id).await, vec![jane.user_id.to_string()]);
    }

    #[tokio::test]
    async fn test_register_first_name_length_bounded_by_default_organisation() {
        let app = TestApp::new();
        let longest = "a".repeat(235);
        let user = app.register(&longest, "Smith", "long@x.com").await;

        let organisations = app.organisations_of(&user).await;
        let name = organisations[0]["name"].as_str().unwrap();
        assert_eq!(name.chars().count(), 250);

        let response = app
            .post_json(
                "/auth/register",
                None,
                json!({
                    "firstName": "a".repeat(236),
                    "lastName": "Smith",
                    "email": "longer@x.com",
                    "password": DEFAULT_PASSWORD,
                }),
            )
            .await;
        assertions::assert_field_error(&response, "firstName");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let app = TestApp::new();
        let jane = app.register("Jane", "Smith", "jane@x.com").await;

        let response = app
            .post_json(
                "/auth/register",
                None,
                json!({
                    "firstName": "Janet",
                    "lastName": "Smyth",
                    "email": "Jane@X.com",
                    "password": DEFAULT_PASSWORD,
                }),
            )
            .await;

        assertions::assert_field_error(&response, "email");
        assert_eq!(
            response.body["errors"][0]["message"],
            "User with this email has been created"
        );

        // The original account still logs in and nothing else was created
        let login = app
            .post_json(
                "/auth/login",
                None,
                json!({ "email": "jane@x.com", "password": DEFAULT_PASSWORD }),
            )
            .await;
        assert_eq!(login.status, StatusCode::OK);
        assert_eq!(login.body["data"]["user"]["userId"], jane.user_id.to_string());
        assert_eq!(app.organisations_of(&jane).await.len(), 1);
    }

    #[tokio::test]
    async fn test_register_reports_every_missing_field() {
        let app = TestApp::new();

        let response = app.post_json("/auth/register", None, json!({})).await;

        for field in ["firstName", "lastName", "email", "password"] {
            assertions::assert_field_error(&response, field);
        }
        assert_eq!(response.body["errors"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_register_weak_password_and_bad_email() {
        let app = TestApp::new();

        let response = app
            .post_json(
                "/auth/register",
                None,
                json!({
                    "firstName": "Jane",
                    "lastName": "Smith",
                    "email": "not-an-email",
                    "password": "1234",
                }),
            )
            .await;

        assertions::assert_field_error(&response, "email");
        assertions::assert_field_error(&response, "password");
        assert!(response.body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_register_malformed_json() {
        let app = TestApp::new();

        let response = app
            .post_raw("/auth/register", None, "{not json".to_string())
            .await;

        assertions::assert_error(&response, StatusCode::BAD_REQUEST, "Client error");
    }
}

mod test_login {
    use super::*;

    #[tokio::test]
    async fn test_login_success() {
        let app = TestApp::new();
        let jane = app.register("Jane", "Smith", "jane@x.com").await;

        let response = app
            .post_json(
                "/auth/login",
                None,
                json!({ "email": "JANE@x.com", "password": DEFAULT_PASSWORD }),
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["message"], "Login successful");
        assert_eq!(response.body["data"]["user"]["userId"], jane.user_id.to_string());

        // The fresh token authenticates
        let token = response.body["data"]["accessToken"].as_str().unwrap();
        let profile = app
            .get(&format!("/api/users/{}", jane.user_id), Some(token))
            .await;
        assert_eq!(profile.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_email_look_the_same() {
        let app = TestApp::new();
        app.register("Jane", "Smith", "jane@x.com").await;

        let wrong_password = app
            .post_json(
                "/auth/login",
                None,
                json!({ "email": "jane@x.com", "password": "Wrong123!" }),
            )
            .await;
        let unknown_email = app
            .post_json(
                "/auth/login",
                None,
                json!({ "email": "nobody@x.com", "password": DEFAULT_PASSWORD }),
            )
            .await;

        assertions::assert_error(&wrong_password, StatusCode::UNAUTHORIZED, "Invalid credentials");
        assertions::assert_error(&unknown_email, StatusCode::UNAUTHORIZED, "Invalid credentials");
        assert_eq!(wrong_password.body, unknown_email.body);
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let app = TestApp::new();

        let response = app.post_json("/auth/login", None, json!({})).await;

        assertions::assert_error(&response, StatusCode::UNAUTHORIZED, "Invalid credentials");
    }
}
