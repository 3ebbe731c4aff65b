use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use reqwest::StatusCode;
use serde_json::{json, Value};

use jobboard_api::app::{build_app, AppServices};
use jobboard_trash::RetentionPolicy;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port.
        let services = Arc::new(AppServices::in_memory(RetentionPolicy::default()));
        let app = build_app(services);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create_company(client: &reqwest::Client, srv: &TestServer, name: &str) -> String {
    let res = client
        .post(srv.url("/api/companies"))
        .json(&json!({ "name": name, "location": "Pune" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    body["id"].as_str().unwrap().to_string()
}

async fn create_job(client: &reqwest::Client, srv: &TestServer, title: &str, company_id: &str) -> String {
    let res = client
        .post(srv.url("/api/jobs"))
        .json(&json!({
            "title": title,
            "location": "Remote",
            "skills": "rust",
            "closingDate": Utc::now() + ChronoDuration::days(30),
            "experienceLevel": "fresher",
            "companyId": company_id,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    body["id"].as_str().unwrap().to_string()
}

async fn active_job_ids(client: &reqwest::Client, srv: &TestServer, user: &str) -> Vec<String> {
    let res = client
        .get(srv.url("/api/jobs"))
        .header("user-id", user)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    body.as_array()
        .unwrap()
        .iter()
        .map(|j| j["id"].as_str().unwrap().to_string())
        .collect()
}

async fn soft_delete(client: &reqwest::Client, srv: &TestServer, job_id: &str, user: &str) -> Value {
    let res = client
        .post(srv.url(&format!("/api/jobs/{job_id}/soft-delete")))
        .json(&json!({ "userId": user }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

async fn apply(client: &reqwest::Client, srv: &TestServer, user: &str, job_id: &str) -> reqwest::Response {
    client
        .post(srv.url("/api/applications"))
        .json(&json!({ "userId": user, "jobId": job_id }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn soft_delete_moves_job_into_the_users_trash() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let company = create_company(&client, &srv, "Acme").await;
    let job = create_job(&client, &srv, "Backend Engineer", &company).await;

    let body = soft_delete(&client, &srv, &job, "u1").await;
    assert_eq!(body["success"], true);
    assert_eq!(body["alreadyDeleted"], false);
    assert_eq!(body["deletedPost"]["originalId"], job.as_str());

    let res = client
        .get(srv.url("/api/deleted-posts/user/u1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let trash: Value = res.json().await.unwrap();
    let trash = trash.as_array().unwrap();
    assert_eq!(trash.len(), 1);
    assert_eq!(trash[0]["originalId"], job.as_str());
    assert_eq!(trash[0]["daysLeft"], 5);
    assert_eq!(trash[0]["expired"], false);
    assert_eq!(trash[0]["job"]["title"], "Backend Engineer");
    assert_eq!(trash[0]["job"]["company"]["name"], "Acme");

    assert!(!active_job_ids(&client, &srv, "u1").await.contains(&job));
    assert!(active_job_ids(&client, &srv, "u2").await.contains(&job));
}

#[tokio::test]
async fn soft_delete_twice_reports_already_deleted() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let company = create_company(&client, &srv, "Acme").await;
    let job = create_job(&client, &srv, "Analyst", &company).await;

    let first = soft_delete(&client, &srv, &job, "u1").await;
    let second = soft_delete(&client, &srv, &job, "u1").await;

    assert_eq!(second["alreadyDeleted"], true);
    assert_eq!(first["deletedPost"]["id"], second["deletedPost"]["id"]);

    let trash: Value = client
        .get(srv.url("/api/deleted-posts/user/u1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(trash.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn soft_delete_takes_user_from_header_and_validates_input() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let company = create_company(&client, &srv, "Acme").await;
    let job = create_job(&client, &srv, "Designer", &company).await;

    let res = client
        .post(srv.url(&format!("/api/jobs/{job}/soft-delete")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .post(srv.url("/api/jobs/missing/soft-delete"))
        .header("user-id", "u1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");

    let res = client
        .post(srv.url(&format!("/api/jobs/{job}/soft-delete")))
        .header("user-id", "u1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(!active_job_ids(&client, &srv, "u1").await.contains(&job));
}

#[tokio::test]
async fn restore_brings_job_back_and_allows_a_fresh_application() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let company = create_company(&client, &srv, "Acme").await;
    let job = create_job(&client, &srv, "Data Engineer", &company).await;

    assert_eq!(apply(&client, &srv, "u1", &job).await.status(), StatusCode::CREATED);
    assert_eq!(apply(&client, &srv, "u1", &job).await.status(), StatusCode::CONFLICT);
    assert_eq!(apply(&client, &srv, "u2", &job).await.status(), StatusCode::CREATED);

    let deleted = soft_delete(&client, &srv, &job, "u1").await;
    let deleted_id = deleted["deletedPost"]["id"].as_str().unwrap();

    let res = client
        .post(srv.url(&format!("/api/deleted-posts/{deleted_id}/restore")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["job"]["id"], job.as_str());
    assert_eq!(body["removedApplications"].as_array().unwrap().len(), 1);

    assert!(active_job_ids(&client, &srv, "u1").await.contains(&job));

    let apps: Value = client
        .get(srv.url("/api/applications/user/u1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(apps.as_array().unwrap().is_empty());

    // u2's application is untouched.
    let apps: Value = client
        .get(srv.url("/api/applications/user/u2"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(apps.as_array().unwrap().len(), 1);
    assert_eq!(apps[0]["job"]["id"], job.as_str());

    assert_eq!(apply(&client, &srv, "u1", &job).await.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn permanent_delete_then_restore_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let company = create_company(&client, &srv, "Acme").await;
    let job = create_job(&client, &srv, "QA", &company).await;
    let deleted = soft_delete(&client, &srv, &job, "u1").await;
    let deleted_id = deleted["deletedPost"]["id"].as_str().unwrap();

    let res = client
        .delete(srv.url(&format!("/api/deleted-posts/{deleted_id}/permanent")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Post permanently deleted");

    let res = client
        .post(srv.url(&format!("/api/deleted-posts/{deleted_id}/restore")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn concurrent_permanent_deletes_have_exactly_one_winner() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let company = create_company(&client, &srv, "Acme").await;
    let job = create_job(&client, &srv, "SRE", &company).await;
    let deleted = soft_delete(&client, &srv, &job, "u1").await;
    let url = srv.url(&format!(
        "/api/deleted-posts/{}/permanent",
        deleted["deletedPost"]["id"].as_str().unwrap()
    ));

    let (a, b) = tokio::join!(client.delete(&url).send(), client.delete(&url).send());
    let mut statuses = vec![a.unwrap().status(), b.unwrap().status()];
    statuses.sort();

    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::NOT_FOUND]);
}

#[tokio::test]
async fn unknown_users_get_an_empty_trash() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/api/deleted-posts/user/nobody")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn job_listing_filters() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let company = create_company(&client, &srv, "Globex").await;
    create_job(&client, &srv, "Rust Developer", &company).await;
    create_job(&client, &srv, "Accountant", &company).await;

    let res = client
        .get(srv.url("/api/jobs?search=globex&experienceLevel=fresher"))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["company"]["name"], "Globex");

    let body: Value = client
        .get(srv.url("/api/jobs?search=account"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);

    let res = client
        .get(srv.url("/api/jobs?experienceLevel=wizard"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn company_trash_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let company = create_company(&client, &srv, "Initech").await;

    let res = client
        .post(srv.url(&format!("/api/companies/{company}/soft-delete")))
        .header("user-id", "admin")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["deletedCompany"]["deletedBy"], "admin");
    let deleted_id = body["deletedCompany"]["id"].as_str().unwrap().to_string();

    let res = client
        .get(srv.url(&format!("/api/companies/{company}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let listed: Value = client
        .get(srv.url("/api/deleted-companies"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["daysLeft"], 5);

    let res = client
        .put(srv.url(&format!("/api/deleted-companies/{deleted_id}")))
        .json(&json!({ "name": "Initech Labs", "location": "Austin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .put(srv.url(&format!("/api/deleted-companies/{deleted_id}")))
        .json(&json!({ "name": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .post(srv.url(&format!("/api/deleted-companies/{deleted_id}/restore")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["company"]["id"], company.as_str());
    assert_eq!(body["company"]["name"], "Initech Labs");

    let res = client
        .delete(srv.url(&format!("/api/deleted-companies/{deleted_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn errors_use_the_json_envelope() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/deleted-posts/nope/restore"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
    assert!(body["message"].as_str().unwrap().contains("nope"));

    let res = client
        .post(srv.url("/api/applications"))
        .json(&json!({ "userId": "", "jobId": "job-1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}
