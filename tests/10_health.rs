mod common;

use anyhow::Result;
use axum::http::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let app = common::TestApp::new()?;

    let (status, body) = app.get("/health", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_describes_tenant_header() -> Result<()> {
    let app = common::TestApp::new()?;

    let (status, body) = app.get("/", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "orgtrack-api");
    assert_eq!(body["data"]["tenant_header"], "x-org-slug");
    Ok(())
}
