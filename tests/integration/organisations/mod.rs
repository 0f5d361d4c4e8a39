//! Organisation endpoint integration tests
//!
//! - GET /api/organisations
//! - POST /api/organisations
//! - GET /api/organisations/{org_id}
//! - POST /api/organisations/{org_id}/users

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::common::{assertions, TestApp};

const ADD_DENIED: &str = "You do not have permission to add user";

mod test_create_organisation {
    use super::*;

    #[tokio::test]
    async fn test_create_organisation_success() {
        let app = TestApp::new();
        let jane = app.register("Jane", "Smith", "jane@x.com").await;

        let response = app
            .post_json(
                "/api/organisations",
                Some(&jane.token),
                json!({ "name": "Acme", "description": "Widgets" }),
            )
            .await;

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["message"], "Organisation created successfully");
        assert_eq!(response.body["data"]["name"], "Acme");
        assert_eq!(response.body["data"]["description"], "Widgets");

        let org_id: Uuid = response.body["data"]["orgId"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(app.members(&jane, org_id).await, vec![jane.user_id.to_string()]);

        let names: Vec<String> = app
            .organisations_of(&jane)
            .await
            .iter()
            .map(|o| o["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Acme", "Jane's Organisation"]);
    }

    #[tokio::test]
    async fn test_create_organisation_blank_name() {
        let app = TestApp::new();
        let jane = app.register("Jane", "Smith", "jane@x.com").await;

        let response = app
            .post_json("/api/organisations", Some(&jane.token), json!({ "name": "" }))
            .await;

        assertions::assert_field_error(&response, "name");
        assert_eq!(app.organisations_of(&jane).await.len(), 1);
    }
}

mod test_get_organisation {
    use super::*;

    #[tokio::test]
    async fn test_member_sees_organisation() {
        let app = TestApp::new();
        let jane = app.register("Jane", "Smith", "jane@x.com").await;
        let org_id = app.default_org_id(&jane).await;

        let response = app
            .get(&format!("/api/organisations/{}", org_id), Some(&jane.token))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["message"], "Organisation found");
        assert_eq!(response.body["data"]["orgId"], org_id.to_string());
        assert_eq!(response.body["data"]["name"], "Jane's Organisation");
    }

    #[tokio::test]
    async fn test_non_member_is_forbidden() {
        let app = TestApp::new();
        let jane = app.register("Jane", "Smith", "jane@x.com").await;
        let bob = app.register("Bob", "Jones", "bob@x.com").await;
        let org_id = app.default_org_id(&jane).await;

        let response = app
            .get(&format!("/api/organisations/{}", org_id), Some(&bob.token))
            .await;

        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_unknown_organisation() {
        let app = TestApp::new();
        let jane = app.register("Jane", "Smith", "jane@x.com").await;

        let unknown = app
            .get(&format!("/api/organisations/{}", Uuid::new_v4()), Some(&jane.token))
            .await;
        assertions::assert_error(&unknown, StatusCode::NOT_FOUND, "Organisation not found");

        let malformed = app.get("/api/organisations/acme", Some(&jane.token)).await;
        assert_eq!(malformed.status, StatusCode::NOT_FOUND);
    }
}

mod test_add_member {
    use super::*;

    #[tokio::test]
    async fn test_member_adds_user() {
        let app = TestApp::new();
        let jane = app.register("Jane", "Smith", "jane@x.com").await;
        let bob = app.register("Bob", "Jones", "bob@x.com").await;
        let org_id = app.default_org_id(&jane).await;

        let response = app.add_member(&jane, org_id, bob.user_id).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["status"], "success");
        assert_eq!(response.body["message"], "User added to organisation successfully");

        // Bob now sees the organisation too
        let bob_orgs = app.organisations_of(&bob).await;
        assert!(bob_orgs.iter().any(|o| o["orgId"] == org_id.to_string().as_str()));
    }

    #[tokio::test]
    async fn test_non_member_cannot_add() {
        let app = TestApp::new();
        let jane = app.register("Jane", "Smith", "jane@x.com").await;
        let bob = app.register("Bob", "Jones", "bob@x.com").await;
        let org_id = app.default_org_id(&jane).await;

        let response = app.add_member(&bob, org_id, bob.user_id).await;

        assertions::assert_error(&response, StatusCode::FORBIDDEN, ADD_DENIED);
        assert_eq!(app.members(&jane, org_id).await, vec![jane.user_id.to_string()]);
    }

    #[tokio::test]
    async fn test_non_member_learns_nothing_about_targets() {
        let app = TestApp::new();
        let jane = app.register("Jane", "Smith", "jane@x.com").await;
        let bob = app.register("Bob", "Jones", "bob@x.com").await;
        let org_id = app.default_org_id(&jane).await;

        let response = app.add_member(&bob, org_id, Uuid::new_v4()).await;

        assertions::assert_error(&response, StatusCode::FORBIDDEN, ADD_DENIED);
    }

    #[tokio::test]
    async fn test_adding_twice_is_idempotent() {
        let app = TestApp::new();
        let jane = app.register("Jane", "Smith", "jane@x.com").await;
        let bob = app.register("Bob", "Jones", "bob@x.com").await;
        let org_id = app.default_org_id(&jane).await;

        assert_eq!(app.add_member(&jane, org_id, bob.user_id).await.status, StatusCode::OK);
        let before = app.members(&jane, org_id).await;

        assert_eq!(app.add_member(&jane, org_id, bob.user_id).await.status, StatusCode::OK);
        let after = app.members(&jane, org_id).await;

        assert_eq!(before, after);
        assert_eq!(after.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_target_or_organisation() {
        let app = TestApp::new();
        let jane = app.register("Jane", "Smith", "jane@x.com").await;
        let org_id = app.default_org_id(&jane).await;

        let unknown_user = app.add_member(&jane, org_id, Uuid::new_v4()).await;
        assertions::assert_error(&unknown_user, StatusCode::NOT_FOUND, "User not found");

        let unknown_org = app.add_member(&jane, Uuid::new_v4(), jane.user_id).await;
        assertions::assert_error(&unknown_org, StatusCode::NOT_FOUND, "Organisation not found");

        let malformed_user = app
            .post_json(
                &format!("/api/organisations/{}/users", org_id),
                Some(&jane.token),
                json!({ "userId": "bob" }),
            )
            .await;
        assertions::assert_error(&malformed_user, StatusCode::NOT_FOUND, "User not found");
    }

    #[tokio::test]
    async fn test_malformed_user_id_from_non_member_is_forbidden() {
        let app = TestApp::new();
        let jane = app.register("Jane", "Smith", "jane@x.com").await;
        let bob = app.register("Bob", "Jones", "bob@x.com").await;
        let org_id = app.default_org_id(&jane).await;

        let response = app
            .post_json(
                &format!("/api/organisations/{}/users", org_id),
                Some(&bob.token),
                json!({ "userId": "not-a-uuid" }),
            )
            .await;

        assertions::assert_error(&response, StatusCode::FORBIDDEN, ADD_DENIED);
    }

    #[tokio::test]
    async fn test_missing_user_id() {
        let app = TestApp::new();
        let jane = app.register("Jane", "Smith", "jane@x.com").await;
        let org_id = app.default_org_id(&jane).await;

        let response = app
            .post_json(
                &format!("/api/organisations/{}/users", org_id),
                Some(&jane.token),
                json!({}),
            )
            .await;

        assertions::assert_field_error(&response, "userId");
    }
}
