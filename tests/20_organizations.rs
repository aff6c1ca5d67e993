mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn organizations_list_by_name() -> Result<()> {
    let app = common::TestApp::new()?;
    app.create_org("Zeta Corp", "zeta").await?;
    app.create_org("Acme", "acme").await?;
    app.create_org("Midway", "midway").await?;

    let (status, body) = app.get("/api/organizations", None).await?;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Acme", "Midway", "Zeta Corp"]);
    Ok(())
}

#[tokio::test]
async fn slug_derived_from_name() -> Result<()> {
    let app = common::TestApp::new()?;

    let (status, body) = app
        .post(
            "/api/organizations",
            None,
            json!({ "name": "Acme Rocket Co.", "contact_email": "ops@acme.test" }),
        )
        .await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["ok"], true);
    assert_eq!(body["data"]["organization"]["slug"], "acme-rocket-co");
    Ok(())
}

#[tokio::test]
async fn accented_names_keep_base_letters() -> Result<()> {
    let app = common::TestApp::new()?;

    let (status, body) = app
        .post("/api/organizations", None, json!({ "name": "Café Zürich", "contact_email": "hallo@cafe.test" }))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["organization"]["slug"], "cafe-zurich");

    // Different name without the accents is a different tenant
    let (status, body) = app
        .post("/api/organizations", None, json!({ "name": "Caf Zrich", "contact_email": "ops@caf.test" }))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["organization"]["slug"], "caf-zrich");

    let (status, body) = app.get("/api/organizations/current", Some("cafe-zurich")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Café Zürich");
    Ok(())
}

#[tokio::test]
async fn duplicate_slug_conflicts() -> Result<()> {
    let app = common::TestApp::new()?;
    app.create_org("Acme", "acme").await?;

    let (status, body) = app
        .post(
            "/api/organizations",
            None,
            json!({ "name": "ACME", "contact_email": "other@acme.test" }),
        )
        .await?;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (_, listed) = app.get("/api/organizations", None).await?;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn invalid_contact_email_is_field_error() -> Result<()> {
    let app = common::TestApp::new()?;

    let (status, body) = app
        .post("/api/organizations", None, json!({ "name": "Acme", "contact_email": "nope" }))
        .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["contact_email"].is_string());
    Ok(())
}

#[tokio::test]
async fn current_reflects_header() -> Result<()> {
    let app = common::TestApp::new()?;
    app.create_org("Acme", "acme").await?;

    let (status, body) = app.get("/api/organizations/current", Some("acme")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["slug"], "acme");

    let (status, body) = app.get("/api/organizations/current", Some("nobody")).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_null());

    let (_, body) = app.get("/api/organizations/current", None).await?;
    assert!(body["data"].is_null());
    Ok(())
}
