mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn newest_project_lists_first() -> Result<()> {
    let app = common::TestApp::new()?;
    app.create_org("Acme", "acme").await?;
    app.create_project("acme", "First").await?;
    let newest = app.create_project("acme", "Second").await?;

    let (_, body) = app.get("/api/projects", Some("acme")).await?;

    assert_eq!(body["data"][0]["id"], newest);
    assert_eq!(body["data"][1]["name"], "First");
    Ok(())
}

#[tokio::test]
async fn status_patch_leaves_other_fields() -> Result<()> {
    let app = common::TestApp::new()?;
    app.create_org("Acme", "acme").await?;
    let (_, created) = app
        .post(
            "/api/projects",
            Some("acme"),
            json!({ "name": "Site", "status": "ACTIVE", "description": "Relaunch", "due_date": "2026-05-01" }),
        )
        .await?;
    let id = created["data"]["project"]["id"].as_i64().unwrap();
    let uri = format!("/api/projects/{}", id);

    let (status, once) = app.patch(&uri, Some("acme"), json!({ "status": "ON_HOLD" })).await?;
    let (_, twice) = app.patch(&uri, Some("acme"), json!({ "status": "ON_HOLD" })).await?;

    assert_eq!(status, StatusCode::OK);
    let project = &once["data"]["project"];
    assert_eq!(project["status"], "ON_HOLD");
    assert_eq!(project["name"], "Site");
    assert_eq!(project["description"], "Relaunch");
    assert_eq!(project["due_date"], "2026-05-01");
    assert_eq!(once, twice);
    Ok(())
}

#[tokio::test]
async fn invalid_status_is_rejected() -> Result<()> {
    let app = common::TestApp::new()?;
    app.create_org("Acme", "acme").await?;

    let (status, body) = app
        .post("/api/projects", Some("acme"), json!({ "name": "Site", "status": "ARCHIVED" }))
        .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["status"].is_string());
    let (_, listed) = app.get("/api/projects", Some("acme")).await?;
    assert_eq!(listed["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn task_counts_follow_status() -> Result<()> {
    let app = common::TestApp::new()?;
    app.create_org("Acme", "acme").await?;
    let project = app.create_project("acme", "Site").await?;
    let done = app.create_task("acme", project, "Ship it").await?;
    app.create_task("acme", project, "Write docs").await?;

    let (status, body) = app
        .patch(&format!("/api/tasks/{}", done), Some("acme"), json!({ "status": "DONE" }))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["task"]["status"], "DONE");
    assert_eq!(body["data"]["task"]["title"], "Ship it");

    let (_, body) = app.get("/api/projects", Some("acme")).await?;
    assert_eq!(body["data"][0]["task_count"], 2);
    assert_eq!(body["data"][0]["completed_tasks"], 1);

    let (_, body) = app.get(&format!("/api/projects/{}/tasks", project), Some("acme")).await?;
    assert_eq!(body["data"][0]["title"], "Write docs");
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_reported() -> Result<()> {
    let app = common::TestApp::new()?;
    app.create_org("Acme", "acme").await?;

    let (status, body) = app
        .post("/api/projects", Some("acme"), json!({ "status": "ACTIVE" }))
        .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON");
    Ok(())
}
