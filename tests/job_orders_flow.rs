mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

async fn create_job_order(
    app: &axum::Router,
    auth: &str,
    title: &str,
    description: &str,
    client_id: Uuid,
) -> serde_json::Value {
    let (status, created) = common::request(
        app,
        Method::POST,
        "/job-orders",
        Some(auth),
        Some(json!({
            "title": title,
            "description": description,
            "requirements": ["5y exp"],
            "clientId": client_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    created
}

#[tokio::test]
async fn create_requires_at_least_one_requirement() {
    let _guard = common::acquire_db_lock().await;
    let Some((app, pool)) = common::db_app().await else {
        return;
    };
    let client_id = common::seed_user(&pool, "Cora", "Lane", "CLIENT").await;
    let auth = common::bearer_token("RECRUITER");

    let (status, _) = common::request(
        &app,
        Method::POST,
        "/job-orders",
        Some(&auth),
        Some(json!({
            "title": "Backend Eng",
            "description": "Build services",
            "requirements": [],
            "clientId": client_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let created = create_job_order(&app, &auth, "Backend Eng", "Build services", client_id).await;
    assert_eq!(created["status"], "OPEN");
    assert_eq!(created["client"]["id"], json!(client_id));
    assert_eq!(created["submittals"], json!([]));
}

#[tokio::test]
async fn search_matches_title_or_description_case_insensitively() {
    let _guard = common::acquire_db_lock().await;
    let Some((app, pool)) = common::db_app().await else {
        return;
    };
    let client_id = common::seed_user(&pool, "Cora", "Lane", "CLIENT").await;
    let auth = common::bearer_token("RECRUITER");

    create_job_order(&app, &auth, "Senior Rust Engineer", "Systems work", client_id).await;
    create_job_order(&app, &auth, "Data Analyst", "Rust pipelines and SQL", client_id).await;
    create_job_order(&app, &auth, "Office Manager", "Front desk", client_id).await;

    let titles = |body: &serde_json::Value| -> Vec<String> {
        let mut titles: Vec<String> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|j| j["title"].as_str().unwrap().to_string())
            .collect();
        titles.sort();
        titles
    };

    let (_, matched) =
        common::request(&app, Method::GET, "/job-orders?search=RUST", Some(&auth), None).await;
    assert_eq!(
        titles(&matched),
        vec!["Data Analyst", "Senior Rust Engineer"]
    );

    let (_, matched) =
        common::request(&app, Method::GET, "/job-orders?search=front", Some(&auth), None).await;
    assert_eq!(titles(&matched), vec!["Office Manager"]);

    let (_, unmatched) = common::request(
        &app,
        Method::GET,
        "/job-orders?search=astronaut",
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(unmatched.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn stats_count_per_status() {
    let _guard = common::acquire_db_lock().await;
    let Some((app, pool)) = common::db_app().await else {
        return;
    };
    let client_id = common::seed_user(&pool, "Cora", "Lane", "CLIENT").await;
    let auth = common::bearer_token("RECRUITER");

    let first = create_job_order(&app, &auth, "A", "a", client_id).await;
    create_job_order(&app, &auth, "B", "b", client_id).await;
    create_job_order(&app, &auth, "C", "c", client_id).await;

    let first_id = first["id"].as_str().unwrap();
    let (status, _) = common::request(
        &app,
        Method::PATCH,
        &format!("/job-orders/{first_id}"),
        Some(&auth),
        Some(json!({ "status": "ON_HOLD" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, stats) =
        common::request(&app, Method::GET, "/job-orders/stats", Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["open"], 2);
    assert_eq!(stats["closed"], 0);
    assert_eq!(stats["onHold"], 1);
}

#[tokio::test]
async fn update_is_partial_and_delete_cascades_submittals() {
    let _guard = common::acquire_db_lock().await;
    let Some((app, pool)) = common::db_app().await else {
        return;
    };
    let client_id = common::seed_user(&pool, "Cora", "Lane", "CLIENT").await;
    let recruiter_id = common::seed_user(&pool, "Rita", "Vega", "RECRUITER").await;
    let recruiter_auth = common::bearer_token("RECRUITER");
    let admin_auth = common::bearer_token("ADMIN");

    let job_order =
        create_job_order(&app, &recruiter_auth, "Backend Eng", "Build services", client_id).await;
    let job_order_id = job_order["id"].as_str().unwrap().to_string();

    let (status, updated) = common::request(
        &app,
        Method::PATCH,
        &format!("/job-orders/{job_order_id}"),
        Some(&recruiter_auth),
        Some(json!({ "status": "CLOSED" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "CLOSED");
    assert_eq!(updated["title"], "Backend Eng");
    assert_eq!(updated["requirements"], json!(["5y exp"]));

    // Hang a submittal off the job order, then delete the parent.
    let (_, candidate) = common::request(
        &app,
        Method::POST,
        "/candidates",
        Some(&recruiter_auth),
        Some(json!({
            "firstName": "Ana",
            "lastName": "Gomez",
            "email": "a@x.com",
            "skills": [],
            "experience": 0,
            "recruiterId": recruiter_id,
        })),
    )
    .await;
    let (status, submittal) = common::request(
        &app,
        Method::POST,
        "/submittals",
        Some(&recruiter_auth),
        Some(json!({
            "jobOrderId": job_order_id,
            "candidateId": candidate["id"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let submittal_id = submittal["id"].as_str().unwrap().to_string();

    let (status, snapshot) = common::request(
        &app,
        Method::DELETE,
        &format!("/job-orders/{job_order_id}"),
        Some(&admin_auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["client"]["id"], json!(client_id));
    assert!(snapshot.get("submittals").is_none());

    let (status, _) = common::request(
        &app,
        Method::GET,
        &format!("/job-orders/{job_order_id}"),
        Some(&recruiter_auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = common::request(
        &app,
        Method::GET,
        &format!("/submittals/{submittal_id}"),
        Some(&recruiter_auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_unknown_job_order_is_not_found() {
    let _guard = common::acquire_db_lock().await;
    let Some((app, _pool)) = common::db_app().await else {
        return;
    };
    let auth = common::bearer_token("RECRUITER");

    let (status, _) = common::request(
        &app,
        Method::GET,
        &format!("/job-orders/{}", Uuid::new_v4()),
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
