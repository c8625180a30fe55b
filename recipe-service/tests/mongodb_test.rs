//! Runs against a live server: `TEST_MONGODB_URI=... cargo test -- --ignored`.

mod common;

use common::{tea, unissued_id, TestApp};
use serde_json::{json, Value};

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn recipe_lifecycle_against_mongodb() {
    let app = TestApp::spawn_with_mongodb().await;

    let created = app.create_recipe(&tea()).await;
    let id = created["id"].as_str().unwrap().to_string();

    let fetched: Value = app.get_recipe(&id).await.json().await.unwrap();
    assert_eq!(fetched, created);

    let response = app.put_recipe(&id, &json!({ "title": "Black tea" })).await;
    assert_eq!(response.status().as_u16(), 200);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["title"], "Black tea");
    assert_eq!(updated["ingredients"], json!([]));

    let listed: Vec<Value> = app
        .client
        .get(app.recipes_url())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.iter().any(|r| r["id"] == id.as_str()));

    assert_eq!(app.delete_recipe(&id).await.status().as_u16(), 200);
    assert_eq!(app.get_recipe(&id).await.status().as_u16(), 404);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn mongodb_store_reports_misses_and_bad_ids() {
    let app = TestApp::spawn_with_mongodb().await;

    assert_eq!(app.get_recipe(&unissued_id()).await.status().as_u16(), 404);
    assert_eq!(app.get_recipe("not-an-id").await.status().as_u16(), 500);

    let mut body = tea();
    body.as_object_mut().unwrap().remove("ingredients");
    assert_eq!(app.post_recipe(&body).await.status().as_u16(), 400);

    let response = app
        .client
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    app.cleanup().await;
}
