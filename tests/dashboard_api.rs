use std::net::SocketAddr;

use actix_web::http::{StatusCode, header};
use actix_web::web::Data;
use actix_web::{App, test};
use hrms_lite::backend::BackendClient;
use hrms_lite::config::Config;
use hrms_lite::routes::{self, Limiters};
use hrms_lite::state::Workspace;
use serde_json::{Value, json};
use wiremock::matchers::{header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "Bearer admin-token";

fn peer() -> SocketAddr {
    "127.0.0.1:40000".parse().unwrap()
}

fn test_config(server: &MockServer, require_auth: bool) -> Config {
    let base = server.uri();
    Config::from_lookup(move |key| match key {
        "HRMS_API_BASE" => Some(base.clone()),
        "REQUIRE_AUTH" => Some(require_auth.to_string()),
        "REQUEST_TIMEOUT_SECS" => Some("5".into()),
        _ => None,
    })
    .unwrap()
}

macro_rules! dashboard_app {
    ($server:expr, $require_auth:expr) => {{
        let config = test_config(&$server, $require_auth);
        let limiters = Limiters::from_config(&config).unwrap();
        let client = BackendClient::new(config.api_base.clone(), config.request_timeout).unwrap();
        test::init_service(
            App::new()
                .app_data(Data::new(client))
                .app_data(Data::new(Workspace::default()))
                .app_data(Data::new(config))
                .configure(move |cfg| routes::configure(cfg, &limiters)),
        )
        .await
    }};
}

async fn mount_json(server: &MockServer, verb: &str, route: &str, status: u16, body: Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

fn staff() -> Value {
    json!([
        { "_id": "e1", "employeeId": "EMP001", "fullName": "Grace Hopper", "email": "grace@corp.io", "department": "Engineering" },
        { "_id": "e2", "employeeId": "EMP002", "fullName": "Alan Turing", "email": "alan@corp.io", "department": "Engineering" },
        { "_id": "e3", "employeeId": "EMP003", "fullName": "Ada Lovelace", "email": "ada@corp.io", "department": null }
    ])
}

#[actix_web::test]
async fn dashboard_degrades_when_one_collection_fails() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/api/employees", 200, staff()).await;
    mount_json(&server, "GET", "/api/attendance", 500, json!({ "message": "attendance store offline" })).await;
    mount_json(
        &server,
        "GET",
        "/api/leaves",
        200,
        json!([
            { "_id": "l1", "employeeId": "EMP001", "fromDate": "2024-02-13", "toDate": "2024-02-15", "status": "Approved" },
            { "_id": "l2", "employeeId": "EMP002", "fromDate": "2024-02-14", "toDate": "2024-02-14", "status": "Pending" },
            { "_id": "l3", "employeeId": "EMP003", "fromDate": "2024-02-01", "toDate": "2024-02-28", "status": "pending" }
        ]),
    )
    .await;

    let app = dashboard_app!(server, true);
    let req = test::TestRequest::get()
        .uri("/dashboard?today=2024-02-14")
        .insert_header((header::AUTHORIZATION, TOKEN))
        .peer_addr(peer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["today"], "2024-02-14");
    assert_eq!(body["stats"]["totalEmployees"], 3);
    assert_eq!(body["stats"]["presentToday"], 0);
    assert_eq!(body["stats"]["onLeaveToday"], 1);
    assert_eq!(body["stats"]["leavesPending"], 1);
    assert_eq!(body["stats"]["departments"][0], json!({ "name": "Engineering", "count": 2 }));
    assert_eq!(body["stats"]["departments"][1], json!({ "name": "Unknown", "count": 1 }));
    assert_eq!(body["monthly"]["points"].as_array().unwrap().len(), 29);
    assert_eq!(body["departmentBars"].as_array().unwrap().len(), 2);

    assert_eq!(body["attendance"]["error"], "attendance store offline");
    assert_eq!(body["attendance"]["count"], 0);
    assert_eq!(body["employees"]["error"], Value::Null);
    assert_eq!(body["leaves"]["count"], 3);
}

#[actix_web::test]
async fn anonymous_dashboard_only_refreshes_employees() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/api/employees", 200, staff()).await;
    Mock::given(method("GET"))
        .and(path("/api/attendance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/leaves"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let app = dashboard_app!(server, true);
    let req = test::TestRequest::get()
        .uri("/dashboard?today=2024-02-14")
        .peer_addr(peer())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["stats"]["totalEmployees"], 3);
    assert_eq!(body["stats"]["onLeaveToday"], 0);
}

#[actix_web::test]
async fn attendance_requires_token_only_when_configured() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "GET",
        "/api/attendance",
        200,
        json!([{ "_id": "a1", "employeeId": "EMP001", "date": "2024-02-14T09:00:00Z", "status": "Present" }]),
    )
    .await;

    let gated = dashboard_app!(server, true);
    let req = test::TestRequest::get().uri("/attendance").peer_addr(peer()).to_request();
    let resp = test::call_service(&gated, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/leaves")
        .peer_addr(peer())
        .to_request();
    assert_eq!(test::call_service(&gated, req).await.status(), StatusCode::UNAUTHORIZED);

    let open = dashboard_app!(server, false);
    let req = test::TestRequest::get().uri("/attendance").peer_addr(peer()).to_request();
    let body: Value = test::call_and_read_body_json(&open, req).await;
    assert_eq!(body["data"][0]["date"], "2024-02-14");
    assert_eq!(body["error"], Value::Null);
}

#[actix_web::test]
async fn creating_an_employee_refetches_the_collection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/employees"))
        .and(header_eq("authorization", TOKEN))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "created" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(staff()))
        .expect(1)
        .mount(&server)
        .await;

    let app = dashboard_app!(server, true);
    let req = test::TestRequest::post()
        .uri("/employees")
        .insert_header((header::AUTHORIZATION, TOKEN))
        .peer_addr(peer())
        .set_json(json!({
            "employeeId": " EMP003 ",
            "fullName": "Ada Lovelace",
            "email": "ada@corp.io",
            "department": "Engineering"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let requests = server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["employeeId"], "EMP003");
}

#[actix_web::test]
async fn employee_search_filters_the_fetched_list() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/api/employees", 200, staff()).await;

    let app = dashboard_app!(server, true);
    let req = test::TestRequest::get()
        .uri("/employees?search=TURING")
        .peer_addr(peer())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["employeeId"], "EMP002");
}

#[actix_web::test]
async fn upstream_rejection_is_reported_with_its_status() {
    let server = MockServer::start().await;
    mount_json(&server, "POST", "/api/leaves", 400, json!({ "message": "toDate must not be before fromDate" })).await;

    let app = dashboard_app!(server, true);
    let req = test::TestRequest::post()
        .uri("/leaves")
        .insert_header((header::AUTHORIZATION, TOKEN))
        .peer_addr(peer())
        .set_json(json!({
            "employeeId": "EMP001",
            "fromDate": "2024-02-10",
            "toDate": "2024-02-01",
            "reason": "Trip"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "toDate must not be before fromDate");
}

#[actix_web::test]
async fn department_chart_is_served_as_svg() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/api/employees", 200, staff()).await;

    let app = dashboard_app!(server, true);
    let req = test::TestRequest::get()
        .uri("/dashboard/charts/departments.svg")
        .peer_addr(peer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/svg+xml"
    );

    let body = test::read_body(resp).await;
    let svg = std::str::from_utf8(&body).unwrap();
    assert_eq!(svg.matches("<rect").count(), 2);
    assert!(svg.contains("Engineerin…"));
}

#[actix_web::test]
async fn empty_month_renders_empty_state() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/api/attendance", 200, json!([])).await;

    let app = dashboard_app!(server, true);
    let req = test::TestRequest::get()
        .uri("/dashboard/charts/attendance.svg?today=2024-03-05")
        .insert_header((header::AUTHORIZATION, TOKEN))
        .peer_addr(peer())
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let svg = std::str::from_utf8(&body).unwrap();
    assert!(svg.contains("No attendance marked for March yet."));
}

#[actix_web::test]
async fn login_returns_token_and_loads_everything() {
    let server = MockServer::start().await;
    mount_json(&server, "POST", "/api/auth/login", 200, json!({ "token": "admin-token" })).await;
    for route in ["/api/employees", "/api/attendance", "/api/leaves"] {
        Mock::given(method("GET"))
            .and(path(route))
            .and(header_eq("authorization", TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
    }

    let app = dashboard_app!(server, true);
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .peer_addr(peer())
        .set_json(json!({ "email": "admin@test.com", "password": "123456" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["token"], "admin-token");
}

#[actix_web::test]
async fn failed_login_passes_backend_message() {
    let server = MockServer::start().await;
    mount_json(&server, "POST", "/api/auth/login", 401, json!({ "message": "Invalid credentials" })).await;

    let app = dashboard_app!(server, true);
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .peer_addr(peer())
        .set_json(json!({ "email": "admin@test.com", "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid credentials");
}

async fn mount_for_token(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header_eq("authorization", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[actix_web::test]
async fn anonymous_dashboard_after_login_sees_no_protected_data() {
    let server = MockServer::start().await;
    mount_json(&server, "POST", "/api/auth/login", 200, json!({ "token": "admin-token" })).await;
    mount_json(&server, "GET", "/api/employees", 200, staff()).await;
    mount_for_token(
        &server,
        "/api/attendance",
        json!([{ "_id": "a1", "employeeId": "EMP001", "date": "2024-02-14", "status": "Present" }]),
    )
    .await;
    mount_for_token(
        &server,
        "/api/leaves",
        json!([
            { "_id": "l1", "employeeId": "EMP002", "fromDate": "2024-02-13", "toDate": "2024-02-15", "status": "Approved" },
            { "_id": "l2", "employeeId": "EMP003", "fromDate": "2024-03-01", "toDate": "2024-03-02", "status": "Pending" }
        ]),
    )
    .await;

    let app = dashboard_app!(server, true);
    let login = test::TestRequest::post()
        .uri("/auth/login")
        .peer_addr(peer())
        .set_json(json!({ "email": "admin@test.com", "password": "123456" }))
        .to_request();
    assert_eq!(test::call_service(&app, login).await.status(), StatusCode::OK);

    let anonymous = test::TestRequest::get()
        .uri("/dashboard?today=2024-02-14")
        .peer_addr(peer())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, anonymous).await;

    assert_eq!(body["stats"]["totalEmployees"], 3);
    assert_eq!(body["stats"]["presentToday"], 0);
    assert_eq!(body["stats"]["onLeaveToday"], 0);
    assert_eq!(body["stats"]["leavesPending"], 0);
    assert_eq!(body["monthly"]["monthTotalPresent"], 0);
    assert_eq!(body["attendance"]["count"], 0);
    assert_eq!(body["attendance"]["loaded"], false);
    assert_eq!(body["leaves"]["count"], 0);
    assert_eq!(body["leaves"]["loaded"], false);

    let admin = test::TestRequest::get()
        .uri("/dashboard?today=2024-02-14")
        .insert_header((header::AUTHORIZATION, TOKEN))
        .peer_addr(peer())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, admin).await;
    assert_eq!(body["stats"]["presentToday"], 1);
    assert_eq!(body["stats"]["onLeaveToday"], 1);
    assert_eq!(body["stats"]["leavesPending"], 1);
    assert_eq!(body["attendance"]["loaded"], true);
}

#[actix_web::test]
async fn rejected_employee_fetch_does_not_return_earlier_data() {
    let server = MockServer::start().await;
    mount_for_token(&server, "/api/employees", staff()).await;
    mount_json(&server, "GET", "/api/employees", 401, json!({ "message": "Not authorized" })).await;

    let app = dashboard_app!(server, true);
    let admin = test::TestRequest::get()
        .uri("/employees")
        .insert_header((header::AUTHORIZATION, TOKEN))
        .peer_addr(peer())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, admin).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let anonymous = test::TestRequest::get().uri("/employees").peer_addr(peer()).to_request();
    let body: Value = test::call_and_read_body_json(&app, anonymous).await;
    assert_eq!(body["error"], "Not authorized");
    assert_eq!(body["loaded"], false);
    assert!(body["data"].as_array().unwrap().is_empty());
}

async fn mount_counted(server: &MockServer, route: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(times)
        .mount(server)
        .await;
}

#[actix_web::test]
async fn refreshing_a_tab_fetches_only_its_collection() {
    for (tab, domain) in [
        ("employees", "employees"),
        ("attendance", "attendance"),
        ("leaves", "leaves"),
    ] {
        let server = MockServer::start().await;
        for other in ["employees", "attendance", "leaves"] {
            let times = if other == domain { 1 } else { 0 };
            mount_counted(&server, &format!("/api/{other}"), times).await;
        }

        let app = dashboard_app!(server, true);
        let req = test::TestRequest::post()
            .uri(&format!("/refresh/{tab}"))
            .insert_header((header::AUTHORIZATION, TOKEN))
            .peer_addr(peer())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body[domain]["loaded"], true, "tab {tab}");
        server.verify().await;
    }
}

#[actix_web::test]
async fn guarded_refresh_skips_protected_collections() {
    let server = MockServer::start().await;
    mount_counted(&server, "/api/employees", 1).await;
    mount_counted(&server, "/api/attendance", 0).await;
    mount_counted(&server, "/api/leaves", 0).await;

    let app = dashboard_app!(server, true);
    for tab in ["attendance", "leaves", "dashboard"] {
        let req = test::TestRequest::post()
            .uri(&format!("/refresh/{tab}"))
            .peer_addr(peer())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["attendance"]["loaded"], false);
        assert_eq!(body["leaves"]["loaded"], false);
    }
}

#[actix_web::test]
async fn open_deployment_refreshes_dashboard_without_token() {
    let server = MockServer::start().await;
    mount_counted(&server, "/api/employees", 1).await;
    mount_counted(&server, "/api/attendance", 1).await;
    mount_counted(&server, "/api/leaves", 1).await;

    let app = dashboard_app!(server, false);
    let req = test::TestRequest::post()
        .uri("/refresh/dashboard")
        .peer_addr(peer())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    for domain in ["employees", "attendance", "leaves"] {
        assert_eq!(body[domain]["loaded"], true);
    }
}

#[actix_web::test]
async fn unknown_tab_is_not_found() {
    let server = MockServer::start().await;

    let app = dashboard_app!(server, true);
    let req = test::TestRequest::post()
        .uri("/refresh/payroll")
        .peer_addr(peer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unknown tab payroll");
}
