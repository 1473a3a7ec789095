mod common;

use axum::http::StatusCode;
use common::{visitor_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();
    let (status, body) = app.request("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_protected_routes_need_a_valid_token() {
    let app = TestApp::new();

    let (status, body) = app.request("GET", "/api/visitors", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = app
        .request("GET", "/api/visitors", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login() {
    let app = TestApp::new();

    let (status, body) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "admin", "password": "wrong-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, body) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "admin", "password": common::ADMIN_PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    assert!(body["expires_at"].is_string());
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_current_user_has_location() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let hq = app.create_location(&admin, "HQ", "NBO").await;
    let clerk = app.create_user(&admin, "clerk", "data_entry", Some(hq)).await;

    let (status, body) = app.request("GET", "/api/auth/me", Some(&clerk), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "clerk");
    assert_eq!(body["location_id"], hq);
    assert_eq!(body["location"]["code"], "NBO");
}

#[tokio::test]
async fn test_visitor_visibility_follows_home_location() {
    let app = TestApp::new();
    let admin = app.admin_token().await;

    let hq = app.create_location(&admin, "HQ", "NBO").await;
    assert_eq!(hq, 1);
    let port = app.create_location(&admin, "Port", "MBA").await;

    let clerk = app.create_user(&admin, "clerk", "data_entry", Some(hq)).await;
    let desk = app
        .create_user(&admin, "desk", "dashboard_visitor", Some(port))
        .await;

    // The clerk's home location wins over whatever the body says.
    let mut body = visitor_body("John Doe");
    body["location_id"] = json!(port);
    let (status, visitor) = app
        .request("POST", "/api/visitors", Some(&clerk), Some(body))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(visitor["location_id"], hq);
    assert_eq!(visitor["status"], "signed_in");
    let visitor_id = visitor["id"].as_u64().unwrap();

    // Bound elsewhere, asking for HQ explicitly still yields nothing.
    let (status, list) = app
        .request("GET", "/api/visitors?location_id=1", Some(&desk), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 0);

    let (_, list) = app.request("GET", "/api/visitors", Some(&admin), None).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["location"]["code"], "NBO");

    let (_, list) = app
        .request("GET", "/api/visitors?location_id=2", Some(&admin), None)
        .await;
    assert_eq!(list.as_array().unwrap().len(), 0);

    let uri = format!("/api/visitors/{}/signout", visitor_id);
    let (status, signed_out) = app.request("POST", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(signed_out["status"], "signed_out");
    assert!(signed_out["sign_out_time"].is_string());

    let (status, body) = app.request("POST", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let (_, list) = app
        .request("GET", "/api/visitors?status=signed_in", Some(&admin), None)
        .await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_sign_in_reactivates_visitor() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let hq = app.create_location(&admin, "HQ", "NBO").await;
    let desk = app
        .create_user(&admin, "desk", "dashboard_visitor", Some(hq))
        .await;

    let mut body = visitor_body("Jane Smith");
    body["location_id"] = json!(hq);
    let (_, visitor) = app
        .request("POST", "/api/visitors", Some(&admin), Some(body))
        .await;
    let id = visitor["id"].as_u64().unwrap();

    let (status, _) = app
        .request("POST", &format!("/api/visitors/{}/signout", id), Some(&desk), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, visitor) = app
        .request(
            "POST",
            &format!("/api/visitors/{}/signin", id),
            Some(&desk),
            Some(json!({ "badge_number": "B077" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(visitor["status"], "signed_in");
    assert_eq!(visitor["badge_number"], "B077");
    assert!(visitor["sign_out_time"].is_null());
}

#[tokio::test]
async fn test_unbound_admin_must_pick_a_location() {
    let app = TestApp::new();
    let admin = app.admin_token().await;

    let (status, _) = app
        .request("POST", "/api/visitors", Some(&admin), Some(visitor_body("John Doe")))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut body = visitor_body("John Doe");
    body["location_id"] = json!(42);
    let (status, _) = app
        .request("POST", "/api/visitors", Some(&admin), Some(body))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_role_permissions() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let hq = app.create_location(&admin, "HQ", "NBO").await;
    let clerk = app.create_user(&admin, "clerk", "data_entry", Some(hq)).await;
    let desk = app
        .create_user(&admin, "desk", "dashboard_visitor", Some(hq))
        .await;
    let cargo_desk = app
        .create_user(&admin, "cargo_desk", "dashboard_cargo", Some(hq))
        .await;

    let (status, body) = app
        .request("POST", "/api/visitors", Some(&desk), Some(visitor_body("John Doe")))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].is_string());

    let (status, _) = app.request("GET", "/api/users", Some(&clerk), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.request("GET", "/api/locations", Some(&desk), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request("DELETE", "/api/visitors/1", Some(&clerk), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Denied before the record is even looked up.
    let (status, _) = app
        .request("POST", "/api/visitors/999/signout", Some(&cargo_desk), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.request("GET", "/api/cargo", Some(&cargo_desk), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_cargo_flow() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let hq = app.create_location(&admin, "HQ", "NBO").await;
    let clerk = app.create_user(&admin, "clerk", "data_entry", Some(hq)).await;

    let cargo = json!({
        "category": "unknown",
        "seal_number": "",
        "description": "Loose parcels",
        "awb_number": "AWB123456",
        "uld_numbers": "AKE12345AA",
        "driver_name": "Mike Johnson",
        "company": "Fast Logistics Inc",
        "vehicle_registration": "ABC-1234",
    });
    let (status, created) = app
        .request("POST", "/api/cargo", Some(&clerk), Some(cargo.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["location_id"], hq);
    assert!(created["seal_number"].is_null());
    let id = created["id"].as_u64().unwrap();

    let (_, list) = app
        .request("GET", "/api/cargo?category=known", Some(&clerk), None)
        .await;
    assert_eq!(list.as_array().unwrap().len(), 0);

    let (status, _) = app
        .request("PUT", &format!("/api/cargo/{}", id), Some(&clerk), Some(cargo.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let mut update = cargo;
    update["category"] = json!("known");
    let (status, updated) = app
        .request("PUT", &format!("/api/cargo/{}", id), Some(&admin), Some(update))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["category"], "known");
    assert_eq!(updated["time_in"], created["time_in"]);

    let (status, body) = app
        .request("DELETE", &format!("/api/cargo/{}", id), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, _) = app
        .request("GET", &format!("/api/cargo/{}", id), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let app = TestApp::new();
    let admin = app.admin_token().await;

    let body = json!({
        "username": "admin",
        "password": "secret1",
        "role": "data_entry",
        "full_name": "Impostor",
    });
    let (status, _) = app.request("POST", "/api/users", Some(&admin), Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, users) = app.request("GET", "/api/users", Some(&admin), None).await;
    assert_eq!(users.as_array().unwrap().len(), 1);

    let short = json!({
        "username": "clerk",
        "password": "abc",
        "role": "data_entry",
        "full_name": "Clerk",
    });
    let (status, _) = app.request("POST", "/api/users", Some(&admin), Some(short)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_management() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let hq = app.create_location(&admin, "HQ", "NBO").await;
    let clerk = app.create_user(&admin, "clerk", "data_entry", Some(hq)).await;

    let (status, _) = app
        .request(
            "PUT",
            "/api/users/2",
            Some(&admin),
            Some(json!({ "username": "admin", "role": "data_entry" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Promote and unbind; takes effect on the clerk's next request.
    let (status, user) = app
        .request(
            "PUT",
            "/api/users/2",
            Some(&admin),
            Some(json!({ "role": "admin", "location_id": null })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["role"], "admin");
    assert!(user["location_id"].is_null());

    let (status, _) = app.request("GET", "/api/users", Some(&clerk), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.request("DELETE", "/api/users/1", Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.request("DELETE", "/api/users/2", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    // The token outlives the account, but the account is gone.
    let (status, _) = app.request("GET", "/api/auth/me", Some(&clerk), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_location_management() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let hq = app.create_location(&admin, "HQ", "NBO").await;

    let (status, _) = app
        .request(
            "POST",
            "/api/locations",
            Some(&admin),
            Some(json!({ "name": "Other", "code": "NBO" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, location) = app
        .request(
            "PUT",
            &format!("/api/locations/{}", hq),
            Some(&admin),
            Some(json!({ "name": "Nairobi HQ", "code": "" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(location["name"], "Nairobi HQ");
    assert_eq!(location["code"], "NBO");

    let (status, _) = app
        .request("DELETE", &format!("/api/locations/{}", hq), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    // Ids are never reused.
    let next = app.create_location(&admin, "Port", "MBA").await;
    assert_eq!(next, 2);
}

#[tokio::test]
async fn test_fitness_check_in_once_per_session() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let hq = app.create_location(&admin, "HQ", "NBO").await;
    let clerk = app.create_user(&admin, "clerk", "data_entry", Some(hq)).await;
    let desk = app
        .create_user(&admin, "desk", "dashboard_visitor", Some(hq))
        .await;

    let member = json!({
        "name": "Alice",
        "id_number": "ID-1",
        "phone_number": "0700000000",
        "company": "Acme",
    });
    let (status, created) = app
        .request("POST", "/api/fitness/members", Some(&clerk), Some(member.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let member_id = created["id"].as_u64().unwrap();

    let (status, _) = app
        .request("POST", "/api/fitness/members", Some(&clerk), Some(member))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let check_in = json!({ "member_id": member_id, "session": "morning" });
    let (status, attendance) = app
        .request("POST", "/api/fitness/checkin", Some(&desk), Some(check_in.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(attendance["member"]["name"], "Alice");
    let attendance_id = attendance["id"].as_u64().unwrap();

    let (status, _) = app
        .request("POST", "/api/fitness/checkin", Some(&clerk), Some(check_in))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .request(
            "POST",
            "/api/fitness/checkin",
            Some(&clerk),
            Some(json!({ "member_id": member_id, "session": "evening" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .request(
            "POST",
            "/api/fitness/checkin",
            Some(&clerk),
            Some(json!({ "member_id": 999, "session": "morning" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = app
        .request("GET", "/api/fitness/attendance?session=morning", Some(&desk), None)
        .await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let checkout = json!({ "attendance_id": attendance_id });
    let (status, out) = app
        .request("POST", "/api/fitness/checkout", Some(&desk), Some(checkout.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(out["check_out"].is_string());

    let (status, _) = app
        .request("POST", "/api/fitness/checkout", Some(&desk), Some(checkout))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/api/fitness/attendance/{}", attendance_id),
            Some(&clerk),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_user_update_without_location_keeps_home_site() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let hq = app.create_location(&admin, "HQ", "NBO").await;
    let port = app.create_location(&admin, "Port", "MBA").await;

    let mut body = visitor_body("John Doe");
    body["location_id"] = json!(port);
    let (status, _) = app
        .request("POST", "/api/visitors", Some(&admin), Some(body))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let desk = app
        .create_user(&admin, "desk", "dashboard_visitor", Some(hq))
        .await;
    let (_, list) = app.request("GET", "/api/visitors", Some(&desk), None).await;
    assert_eq!(list.as_array().unwrap().len(), 0);

    // Password reset only; the home location is not part of the request.
    let (status, user) = app
        .request(
            "PUT",
            "/api/users/2",
            Some(&admin),
            Some(json!({ "role": "dashboard_visitor", "password": "newpass1" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["location_id"], hq);

    let (_, list) = app.request("GET", "/api/visitors", Some(&desk), None).await;
    assert_eq!(list.as_array().unwrap().len(), 0);

    let desk = app.login("desk", "newpass1").await;
    let (_, me) = app.request("GET", "/api/auth/me", Some(&desk), None).await;
    assert_eq!(me["location"]["code"], "NBO");

    // An explicit location moves the user.
    let (status, user) = app
        .request(
            "PUT",
            "/api/users/2",
            Some(&admin),
            Some(json!({ "role": "dashboard_visitor", "location_id": port })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["location_id"], port);

    let (_, list) = app.request("GET", "/api/visitors", Some(&desk), None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_status_changes_are_not_location_scoped() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let hq = app.create_location(&admin, "HQ", "NBO").await;
    let port = app.create_location(&admin, "Port", "MBA").await;
    let desk = app
        .create_user(&admin, "desk", "dashboard_visitor", Some(hq))
        .await;

    let mut body = visitor_body("Jane Smith");
    body["location_id"] = json!(port);
    let (_, visitor) = app
        .request("POST", "/api/visitors", Some(&admin), Some(body))
        .await;
    let id = visitor["id"].as_u64().unwrap();

    let (status, fetched) = app
        .request("GET", &format!("/api/visitors/{}", id), Some(&desk), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["location_id"], port);

    let (status, _) = app
        .request("POST", &format!("/api/visitors/{}/signout", id), Some(&desk), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}
