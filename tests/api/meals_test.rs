use axum::http::{header, StatusCode};
use serde_json::json;

use crate::helpers::{unknown_session, TestApp};

#[tokio::test]
async fn should_register_a_meal() {
    let app = TestApp::new();
    let cookie = app.register_dummy().await;

    let resp = app
        .post(
            "/meals",
            Some(&cookie),
            json!({"name": "Some meal name", "description": "Some description", "isOnDiet": true}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);

    let meal = &resp.body["meal"];
    assert_eq!(meal["name"], "Some meal name");
    assert_eq!(meal["isOnDiet"], true);
    let location = resp.headers.get(header::LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, format!("/meals/{}", meal["mealId"].as_str().unwrap()));
}

#[tokio::test]
async fn should_list_all_meals_in_creation_order() {
    let app = TestApp::new();
    let cookie = app.register_dummy().await;
    app.create_meal(&cookie, "Breakfast", true).await;
    app.create_meal(&cookie, "Lunch", false).await;

    let resp = app.get("/meals", Some(&cookie)).await;
    assert_eq!(resp.status, StatusCode::OK);
    let meals = resp.body["meals"].as_array().unwrap();
    assert_eq!(meals.len(), 2);
    assert_eq!(meals[0]["name"], "Breakfast");
    assert_eq!(meals[0]["description"], "Some description");
    assert_eq!(meals[0]["isOnDiet"], true);
    assert_eq!(meals[1]["name"], "Lunch");
    assert_eq!(meals[1]["isOnDiet"], false);
}

#[tokio::test]
async fn should_get_a_specific_meal() {
    let app = TestApp::new();
    let cookie = app.register_dummy().await;
    let created = app.create_meal(&cookie, "Some meal name", true).await;
    let id = created["mealId"].as_str().unwrap();

    let resp = app.get(&format!("/meals/{id}"), Some(&cookie)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["meal"]["name"], "Some meal name");
    assert_eq!(resp.body["meal"]["isOnDiet"], true);
    assert_eq!(resp.body["meal"]["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn should_update_a_specific_meal() {
    let app = TestApp::new();
    let cookie = app.register_dummy().await;
    let created = app.create_meal(&cookie, "Some meal name", true).await;
    let uri = format!("/meals/{}", created["mealId"].as_str().unwrap());

    let resp = app
        .put(
            &uri,
            Some(&cookie),
            json!({"name": "Some new meal name", "description": "Some new description", "isOnDiet": false}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!({"message": "Meal successfully updated"}));

    let meal = app.get(&uri, Some(&cookie)).await.body["meal"].clone();
    assert_eq!(meal["name"], "Some new meal name");
    assert_eq!(meal["description"], "Some new description");
    assert_eq!(meal["isOnDiet"], false);
}

#[tokio::test]
async fn should_apply_partial_meal_update() {
    let app = TestApp::new();
    let cookie = app.register_dummy().await;
    let created = app.create_meal(&cookie, "Soup", true).await;
    let uri = format!("/meals/{}", created["mealId"].as_str().unwrap());

    let resp = app.put(&uri, Some(&cookie), json!({"isOnDiet": false})).await;
    assert_eq!(resp.status, StatusCode::OK);

    let meal = app.get(&uri, Some(&cookie)).await.body["meal"].clone();
    assert_eq!(meal["name"], "Soup");
    assert_eq!(meal["description"], "Some description");
    assert_eq!(meal["isOnDiet"], false);
    assert_eq!(meal["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn should_delete_a_specific_meal() {
    let app = TestApp::new();
    let cookie = app.register_dummy().await;
    let created = app.create_meal(&cookie, "Some meal name", true).await;
    let uri = format!("/meals/{}", created["mealId"].as_str().unwrap());

    assert_eq!(app.delete(&uri, Some(&cookie)).await.status, StatusCode::NO_CONTENT);
    let resp = app.get(&uri, Some(&cookie)).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body["kind"], "MEAL_NOT_FOUND");
    assert_eq!(app.delete(&uri, Some(&cookie)).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_hide_meals_of_other_users() {
    let app = TestApp::new();
    let owner = app.register_dummy().await;
    let created = app.create_meal(&owner, "Private", true).await;
    let uri = format!("/meals/{}", created["mealId"].as_str().unwrap());

    let intruder = app
        .post(
            "/users",
            None,
            json!({"email": "intruder@mail.com", "password": "password123", "name": "Eve"}),
        )
        .await
        .session_cookie()
        .unwrap();

    assert_eq!(app.get(&uri, Some(&intruder)).await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        app.put(&uri, Some(&intruder), json!({"name": "mine"})).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(app.delete(&uri, Some(&intruder)).await.status, StatusCode::NOT_FOUND);
    let listed = app.get("/meals", Some(&intruder)).await;
    assert_eq!(listed.body["meals"], json!([]));

    // untouched for the owner
    let meal = app.get(&uri, Some(&owner)).await.body["meal"].clone();
    assert_eq!(meal["name"], "Private");
}

#[tokio::test]
async fn should_distinguish_missing_and_unknown_sessions() {
    let app = TestApp::new();

    let missing = app.get("/meals", None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let unknown = unknown_session();
    assert_eq!(app.get("/meals", Some(&unknown)).await.status, StatusCode::FORBIDDEN);
    let resp = app
        .post(
            "/meals",
            Some(&unknown),
            json!({"name": "x", "description": "y", "isOnDiet": true}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
    assert_eq!(resp.body["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_validate_meal_input() {
    let app = TestApp::new();
    let cookie = app.register_dummy().await;

    let resp = app
        .post("/meals", Some(&cookie), json!({"name": "x", "description": "y"}))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["kind"], "VALIDATION");

    let resp = app.get("/meals/not-a-uuid", Some(&cookie)).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_drop_meals_with_their_owner() {
    let app = TestApp::new();
    let cookie = app.register_dummy().await;
    app.create_meal(&cookie, "Gone", true).await;
    app.delete("/users", Some(&cookie)).await;

    let fresh = app.register_dummy().await;
    let resp = app.get("/meals", Some(&fresh)).await;
    assert_eq!(resp.body["meals"], json!([]));
}
