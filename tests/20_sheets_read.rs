mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::FakeGoogle;
use utm_desk::models::Department;
use utm_desk::sheets::{Error, ErrorKind, SheetError};

#[tokio::test]
async fn empty_range_reads_as_no_rows() -> Result<()> {
    let fake = FakeGoogle::spawn().await?;
    let repo = fake.repository();

    let rows = repo.client().fetch_range("Campaigns!A2:C").await?;
    assert!(rows.is_empty());

    assert!(repo.get_campaigns().await?.is_empty());
    assert!(repo.get_source_types().await?.is_empty());
    assert!(repo.get_utm_records().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn campaigns_and_source_types_map_positionally() -> Result<()> {
    let fake = FakeGoogle::spawn().await?;
    fake.seed("Campaigns", &[&["C1709294400000", "Spring Sale", "acme"], &["C1709294400001", "Launch"]]);
    fake.seed("SourceTypes", &[&["ST1709294400000", "Paid Social", "PS", "instagram"]]);
    let repo = fake.repository();

    let campaigns = repo.get_campaigns().await?;
    assert_eq!(campaigns.len(), 2);
    assert_eq!(campaigns[0].name, "Spring Sale");
    assert_eq!(campaigns[0].client_id, "acme");
    assert_eq!(campaigns[1].client_id, "");

    let source_types = repo.get_source_types().await?;
    assert_eq!(source_types[0].abbr, "PS");
    assert_eq!(source_types[0].source, "instagram");
    Ok(())
}

#[tokio::test]
async fn utm_rows_default_department_and_number_by_position() -> Result<()> {
    let fake = FakeGoogle::spawn().await?;
    fake.seed(
        "UTMRecords",
        &[
            &[
                "https://shop.example",
                "acme",
                "Spring Sale",
                "instagram",
                "Paid Social",
                "I1PS1",
                "https://shop.example/?utm_source=instagram&utm_content=I1PS1",
                "2024-03-01T12:00:00.000Z",
            ],
            &[
                "https://shop.example",
                "acme",
                "Spring Sale",
                "linkedin",
                "Outreach",
                "L1OR1",
                "https://shop.example/?utm_source=linkedin&utm_content=L1OR1",
                "2024-03-02T12:00:00.000Z",
                "sales",
            ],
        ],
    );

    let records = fake.repository().get_utm_records().await?;

    assert_eq!(records[0].utm_id, "utm-1");
    assert_eq!(records[0].department, Department::Marketing);
    assert_eq!(records[1].utm_id, "utm-2");
    assert_eq!(records[1].department, Department::Sales);
    Ok(())
}

#[tokio::test]
async fn provider_message_is_kept_on_sheet_errors() -> Result<()> {
    let fake = FakeGoogle::spawn().await?;
    fake.reply_to_sheets_with(
        StatusCode::FORBIDDEN,
        json!({ "error": { "code": 403, "message": "The caller does not have permission", "status": "PERMISSION_DENIED" } }),
    );

    let err = fake.repository().get_campaigns().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Sheet);
    match err {
        Error::Sheet(SheetError::Status { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "The caller does not have permission");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn token_failures_surface_as_auth_errors() -> Result<()> {
    let fake = FakeGoogle::spawn().await?;
    fake.reply_to_token_with(
        StatusCode::UNAUTHORIZED,
        json!({ "error": "invalid_client", "error_description": "The OAuth client was not found." }),
    );

    let err = fake.repository().get_utm_records().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Auth);
    assert!(err.to_string().contains("The OAuth client was not found."));
    Ok(())
}

#[tokio::test]
async fn rows_wider_than_the_range_are_malformed() -> Result<()> {
    let fake = FakeGoogle::spawn().await?;
    fake.seed("Campaigns", &[&["C1", "Spring Sale", "acme", "unexpected"]]);

    let err = fake.repository().get_campaigns().await.unwrap_err();

    match err {
        Error::Sheet(SheetError::MalformedRow { range, row, .. }) => {
            assert_eq!(range, "Campaigns!A2:C");
            assert_eq!(row, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn check_utm_url_exists_matches_exactly() -> Result<()> {
    let fake = FakeGoogle::spawn().await?;
    fake.seed(
        "UTMRecords",
        &[&["u", "c", "cp", "s", "st", "id", "https://shop.example/?utm_source=instagram", "t", "social"]],
    );
    let repo = fake.repository();

    assert!(repo.check_utm_url_exists("https://shop.example/?utm_source=instagram").await?);
    assert!(!repo.check_utm_url_exists("https://shop.example/?utm_source=Instagram").await?);
    assert!(!repo.check_utm_url_exists("https://shop.example/").await?);
    Ok(())
}
