use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{unknown_session, TestApp};

#[tokio::test]
async fn should_get_metrics() {
    let app = TestApp::new();
    let cookie = app.register_dummy().await;

    for (name, on_diet) in [
        ("Some meal name", true),
        ("Some second meal name", true),
        ("Some third meal name", true),
        ("Some fourth meal name", false),
        ("Some fifth meal name", true),
        ("Some sixth meal name", true),
    ] {
        app.create_meal(&cookie, name, on_diet).await;
    }

    let resp = app.get("/metrics", Some(&cookie)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.body["metrics"],
        json!({
            "mealsQuantity": 6,
            "onDietMealsQuantity": 5,
            "outDietMealsQuantity": 1,
            "bestSequence": 3,
            "actualSequence": 2,
        })
    );
}

#[tokio::test]
async fn should_report_zeros_without_meals() {
    let app = TestApp::new();
    let cookie = app.register_dummy().await;

    let resp = app.get("/metrics", Some(&cookie)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.body["metrics"],
        json!({
            "mealsQuantity": 0,
            "onDietMealsQuantity": 0,
            "outDietMealsQuantity": 0,
            "bestSequence": 0,
            "actualSequence": 0,
        })
    );
}

#[tokio::test]
async fn should_follow_meal_updates() {
    let app = TestApp::new();
    let cookie = app.register_dummy().await;
    app.create_meal(&cookie, "one", true).await;
    app.create_meal(&cookie, "two", true).await;
    let last = app.create_meal(&cookie, "three", false).await;

    let before = app.get("/metrics", Some(&cookie)).await.body["metrics"].clone();
    assert_eq!(before["actualSequence"], 0);
    assert_eq!(before["bestSequence"], 2);

    let uri = format!("/meals/{}", last["mealId"].as_str().unwrap());
    app.put(&uri, Some(&cookie), json!({"isOnDiet": true})).await;

    let after = app.get("/metrics", Some(&cookie)).await.body["metrics"].clone();
    assert_eq!(after["actualSequence"], 3);
    assert_eq!(after["bestSequence"], 3);
    assert_eq!(after["outDietMealsQuantity"], 0);
}

#[tokio::test]
async fn should_only_count_own_meals() {
    let app = TestApp::new();
    let mine = app.register_dummy().await;
    app.create_meal(&mine, "mine", true).await;

    let other = app
        .post(
            "/users",
            None,
            json!({"email": "other@mail.com", "password": "password123", "name": "Other"}),
        )
        .await
        .session_cookie()
        .unwrap();
    app.create_meal(&other, "theirs", false).await;

    let resp = app.get("/metrics", Some(&mine)).await;
    assert_eq!(resp.body["metrics"]["mealsQuantity"], 1);
    assert_eq!(resp.body["metrics"]["actualSequence"], 1);
}

#[tokio::test]
async fn should_require_login() {
    let app = TestApp::new();

    let missing = app.get("/metrics", None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["kind"], "UNAUTHORIZED");

    let unknown = app.get("/metrics", Some(&unknown_session())).await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body["kind"], "NOT_LOGGED_IN");
    assert_eq!(unknown.body["message"], "not logged in");
}
