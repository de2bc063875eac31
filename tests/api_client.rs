use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bizcore_tui::api::{ApiClient, ApiError};
use bizcore_tui::app::actions::{perform, Request};
use bizcore_tui::app::state::{AppMessage, NoticeLevel, Resource};
use bizcore_tui::models::{AuthResponse, RoleRequest};
use bizcore_tui::session::SessionContext;

fn client(server: &MockServer) -> ApiClient {
    let base = format!("{}/api", server.uri());
    ApiClient::new(&base, Duration::from_secs(5), SessionContext::new()).unwrap()
}

fn sign_in(api: &ApiClient, company_id: i64) {
    let auth: AuthResponse = serde_json::from_value(json!({
        "success": true,
        "token": "secret-token",
        "company": {"id": company_id, "code": "ACME", "name": "Acme"},
        "user": {"username": "admin", "permissions": ["USER_VIEW"], "roles": ["ADMIN"]}
    }))
    .unwrap();
    api.session().create(auth).unwrap();
}

#[tokio::test]
async fn sends_bearer_token_when_signed_in() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/company/7"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "username": "ann", "active": true}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    sign_in(&api, 7);
    let users = api.users_by_company(7).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "ann");
}

#[tokio::test]
async fn unauthorized_clears_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/roles/company/7"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let api = client(&server);
    sign_in(&api, 7);
    let err = api.roles_by_company(7).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(!api.session().is_authenticated());
}

#[tokio::test]
async fn error_message_comes_from_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/roles"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"message": "Role name already taken"})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/roles/3"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let api = client(&server);
    let request = RoleRequest {
        name: "Support".into(),
        ..Default::default()
    };
    match api.create_role(&request).await.unwrap_err() {
        ApiError::Status { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "Role name already taken");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = api.delete_role(3).await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP error 500");
}

#[tokio::test]
async fn no_content_is_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/users/4/deactivate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    api.delete_user(4).await.unwrap();
    api.deactivate_user(4).await.unwrap();
}

#[tokio::test]
async fn listings_accept_bare_and_paged_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/permissions/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [
                {"id": 1, "code": "USER_VIEW", "name": "View users", "moduleName": "Users"},
                {"id": 2, "code": "ROLE_VIEW", "name": "View roles"}
            ],
            "totalElements": 2
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/roles/company/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 5, "name": "ADMIN", "systemRole": true, "permissions": ["USER_VIEW"]}
        ])))
        .mount(&server)
        .await;

    let api = client(&server);
    let perms = api.all_permissions().await.unwrap();
    assert_eq!(perms.len(), 2);
    assert_eq!(perms[1].module(), "Other");

    let roles = api.roles_by_company(1).await.unwrap();
    assert!(roles[0].system_role);
    assert!(!roles[0].is_editable());
}

#[tokio::test]
async fn login_request_creates_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "admin", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": "abc",
            "user": {"id": 1, "username": "admin", "permissions": ["USER_VIEW"], "roles": ["ADMIN"]},
            "company": {"id": 9, "code": "ACME", "name": "Acme"}
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let msg = perform(
        &api,
        None,
        Request::Login {
            username: "admin".into(),
            password: "pw".into(),
        },
    )
    .await;
    assert!(matches!(msg, AppMessage::LoggedIn));
    assert_eq!(api.session().token().as_deref(), Some("abc"));
    assert_eq!(api.session().company_id(), Some(9));
}

#[tokio::test]
async fn rejected_login_becomes_a_notice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Invalid credentials"
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let msg = perform(
        &api,
        None,
        Request::Login {
            username: "admin".into(),
            password: "bad".into(),
        },
    )
    .await;
    match msg {
        AppMessage::Notice(notice) => assert!(notice.text.contains("Invalid credentials")),
        other => panic!("unexpected message: {other:?}"),
    }
    assert!(!api.session().is_authenticated());
}

#[tokio::test]
async fn expired_token_during_load_reports_session_expired() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/company/7"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let api = client(&server);
    sign_in(&api, 7);
    let msg = perform(&api, Some(7), Request::Load(Resource::Users)).await;
    assert!(matches!(msg, AppMessage::SessionExpired));
}

#[tokio::test]
async fn missing_catalog_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/translations/uz"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let api = client(&server);
    let msg = perform(&api, None, Request::LoadCatalog("uz".into())).await;
    match msg {
        AppMessage::Notice(notice) => assert_eq!(notice.level, NoticeLevel::Info),
        other => panic!("unexpected message: {other:?}"),
    }
}
