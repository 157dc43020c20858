mod common;

use std::str::FromStr;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal rendered as string")).unwrap()
}

#[tokio::test]
async fn quote_annual_and_semi_annual() {
    let app = common::spawn_app().await;

    let (status, body) = app
        .post(
            "/api/v1/terms/quote",
            None,
            json!({ "category": "ANNUAL", "principal": "10000" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["durationMonths"], 12);
    assert_eq!(decimal(&body["returnRate"]), dec!(0.30));
    assert_eq!(decimal(&body["expectedReturn"]), dec!(3000));

    let (status, body) = app
        .post(
            "/api/v1/terms/quote",
            None,
            json!({ "category": "SEMI_ANNUAL", "principal": "5000" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["durationMonths"], 6);
    assert_eq!(decimal(&body["expectedReturn"]), dec!(750));
}

#[tokio::test]
async fn quote_rejects_bad_input() {
    let app = common::spawn_app().await;

    let (status, body) = app
        .post(
            "/api/v1/terms/quote",
            None,
            json!({ "category": "QUARTERLY", "principal": "100" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, _) = app
        .post(
            "/api/v1/terms/quote",
            None,
            json!({ "category": "ANNUAL", "principal": "0" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/v1/terms/quote",
            None,
            json!({ "category": "ANNUAL", "principal": "-10" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn schedule_spaces_payments_thirty_days_apart() {
    let app = common::spawn_app().await;
    let (status, body) = app
        .post(
            "/api/v1/terms/schedule",
            None,
            json!({
                "totalAmount": "1200",
                "installments": 3,
                "startDate": "2024-01-31T00:00:00Z"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["installmentCount"], 3);

    let payments = body["payments"].as_array().unwrap();
    assert_eq!(payments.len(), 3);
    let due: Vec<DateTime<Utc>> = payments
        .iter()
        .map(|p| p["dueDate"].as_str().unwrap().parse().unwrap())
        .collect();
    assert_eq!(due[0].to_rfc3339(), "2024-03-01T00:00:00+00:00");
    for pair in due.windows(2) {
        assert_eq!((pair[1] - pair[0]).num_seconds(), 2_592_000);
    }
    for payment in payments {
        assert_eq!(decimal(&payment["amount"]), dec!(400));
    }
}

#[tokio::test]
async fn schedule_rejects_non_positive_count() {
    let app = common::spawn_app().await;
    for installments in [0, -2] {
        let (status, _) = app
            .post(
                "/api/v1/terms/schedule",
                None,
                json!({ "totalAmount": "1200", "installments": installments }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn schedule_rejects_start_date_at_end_of_range() {
    let app = common::spawn_app().await;
    let (status, body) = app
        .post(
            "/api/v1/terms/schedule",
            None,
            json!({
                "totalAmount": "1200",
                "installments": 1,
                "startDate": "+262142-12-30T23:59:59.999999999Z"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, _) = app.get("/api/v1/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
}
