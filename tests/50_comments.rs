mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn owner_comments_other_tenant_cannot() -> Result<()> {
    let app = common::TestApp::new()?;
    app.create_org("Acme", "acme").await?;
    app.create_org("Globex", "globex").await?;
    let project = app.create_project("acme", "Site").await?;
    let task = app.create_task("acme", project, "Review copy").await?;
    let uri = format!("/api/tasks/{}/comments", task);

    let (status, body) = app
        .post(&uri, Some("acme"), json!({ "content": "Looks good", "author_email": "kim@acme.test" }))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["comment"]["content"], "Looks good");

    let (status, body) = app
        .post(&uri, Some("globex"), json!({ "content": "Hi", "author_email": "eve@globex.test" }))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (_, body) = app.get(&uri, Some("globex")).await?;
    assert_eq!(body["data"], json!([]));
    let (_, body) = app.get(&uri, Some("acme")).await?;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn tasks_carry_comments_newest_first() -> Result<()> {
    let app = common::TestApp::new()?;
    app.create_org("Acme", "acme").await?;
    let project = app.create_project("acme", "Site").await?;
    let task = app.create_task("acme", project, "Review copy").await?;
    let uri = format!("/api/tasks/{}/comments", task);

    for content in ["first", "second"] {
        app.post(&uri, Some("acme"), json!({ "content": content, "author_email": "kim@acme.test" }))
            .await?;
    }

    let (_, body) = app.get(&format!("/api/projects/{}/tasks", project), Some("acme")).await?;
    let comments = &body["data"][0]["comments"];
    assert_eq!(comments[0]["content"], "second");
    assert_eq!(comments[1]["content"], "first");
    Ok(())
}

#[tokio::test]
async fn empty_comment_is_rejected() -> Result<()> {
    let app = common::TestApp::new()?;
    app.create_org("Acme", "acme").await?;
    let project = app.create_project("acme", "Site").await?;
    let task = app.create_task("acme", project, "Review copy").await?;

    let (status, body) = app
        .post(
            &format!("/api/tasks/{}/comments", task),
            Some("acme"),
            json!({ "content": "   ", "author_email": "kim@acme.test" }),
        )
        .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["content"].is_string());
    Ok(())
}
