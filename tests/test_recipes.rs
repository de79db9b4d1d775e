mod common;

use common::{soup, titled, TestServer};
use pretty_assertions::assert_eq;
use recipe_catalog::validation::{
    COOKING_TIME_MIN, INGREDIENTS_REQUIRED, INSTRUCTIONS_REQUIRED, SERVINGS_MIN, TITLE_REQUIRED,
};
use recipe_catalog::RecipeInput;
use serde_json::{json, Value};

#[tokio::test]
async fn test_create_and_retrieve_recipe() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let client = server.client();

    let input = RecipeInput {
        cooking_time: Some(30),
        servings: Some(4),
        image_url: Some("https://example.com/soup.jpg".to_string()),
        ..soup()
    };
    let created = client.create_recipe(&input).await.expect("Recipe creation should succeed");

    assert_eq!(created.title, "Soup");
    assert_eq!(created.ingredients, vec!["Water", "Salt"]);
    assert_eq!(created.instructions, vec!["Boil water", "Add salt"]);
    assert_eq!(created.cooking_time, Some(30));
    assert_eq!(created.servings, Some(4));
    assert_eq!(created.image_url.as_deref(), Some("https://example.com/soup.jpg"));
    assert!(!created.id.is_empty(), "Should have an assigned id");

    let retrieved = client.get_recipe(&created.id).await.expect("Should retrieve recipe");
    assert_eq!(retrieved, created);
}

#[tokio::test]
async fn test_soup_scenario_over_raw_http() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let http = reqwest::Client::new();

    let response = http
        .post(server.url("/api/recipes"))
        .json(&json!({
            "title": "Soup",
            "ingredients": ["Water", "Salt"],
            "instructions": ["Boil water", "Add salt"]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    let id = body["data"]["_id"].as_str().expect("generated id").to_string();
    let recipe_url = server.url(&format!("/api/recipes/{id}"));

    let body: Value = http.get(&recipe_url).send().await.unwrap().json().await.unwrap();
    assert_eq!(body["data"]["title"], "Soup");
    assert_eq!(body["data"]["ingredients"], json!(["Water", "Salt"]));
    assert_eq!(body["data"]["instructions"], json!(["Boil water", "Add salt"]));

    let response = http.delete(&recipe_url).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = http.get(&recipe_url).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn test_duplicate_title_fails() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let client = server.client();

    client.create_recipe(&soup()).await.expect("First create should succeed");
    let err = client.create_recipe(&soup()).await.expect_err("Second create should fail");

    assert_eq!(
        err.server_messages(),
        Some(&["A recipe with this title already exists.".to_string()][..])
    );
    assert_eq!(client.list_recipes().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_required_fields_are_enumerated() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let client = server.client();

    let err = client
        .create_recipe(&RecipeInput {
            ingredients: Some(vec![]),
            instructions: Some(vec![]),
            ..Default::default()
        })
        .await
        .expect_err("Create should fail validation");

    match err {
        recipe_catalog::client::ClientError::Api { status, messages } => {
            assert_eq!(status, 400);
            assert_eq!(messages, vec![TITLE_REQUIRED, INGREDIENTS_REQUIRED, INSTRUCTIONS_REQUIRED]);
        }
        other => panic!("Expected API error, got {other}"),
    }
}

#[tokio::test]
async fn test_zero_cooking_time_and_servings_fail() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let client = server.client();

    let err = client
        .create_recipe(&RecipeInput {
            cooking_time: Some(0),
            servings: Some(0),
            ..soup()
        })
        .await
        .expect_err("Create should fail validation");

    assert_eq!(
        err.server_messages().map(<[String]>::to_vec),
        Some(vec![COOKING_TIME_MIN.to_string(), SERVINGS_MIN.to_string()])
    );
}

#[tokio::test]
async fn test_get_recipe_not_found() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let client = server.client();

    let err = client
        .get_recipe("000000000000000000000000")
        .await
        .expect_err("Should fail for non-existent recipe");
    assert!(err.is_not_found());
    assert_eq!(err.user_message("fallback"), "Recipe not found");
}

#[tokio::test]
async fn test_delete_missing_recipe_does_not_mutate() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let client = server.client();
    client.create_recipe(&soup()).await.unwrap();

    let err = client
        .delete_recipe("000000000000000000000000")
        .await
        .expect_err("Delete of a missing recipe should fail");
    assert!(err.is_not_found());
    assert_eq!(server.store.find().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_then_read_back() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let client = server.client();
    let created = client.create_recipe(&soup()).await.unwrap();

    let changes = RecipeInput {
        title: Some("Tomato Soup".to_string()),
        ingredients: Some(vec!["Tomatoes".to_string(), "Water".to_string()]),
        cooking_time: Some(25),
        ..soup()
    };
    let updated = client.update_recipe(&created.id, &changes).await.expect("Update should succeed");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Tomato Soup");
    assert_eq!(updated.cooking_time, Some(25));
    assert_eq!(updated.created_at, created.created_at);

    let fetched = client.get_recipe(&created.id).await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_requires_full_document() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let client = server.client();
    let created = client.create_recipe(&soup()).await.unwrap();

    let partial = RecipeInput {
        title: Some("Renamed".to_string()),
        ..Default::default()
    };
    let err = client.update_recipe(&created.id, &partial).await.expect_err("Partial update should fail");
    assert_eq!(
        err.server_messages().map(<[String]>::to_vec),
        Some(vec![INGREDIENTS_REQUIRED.to_string(), INSTRUCTIONS_REQUIRED.to_string()])
    );

    let unchanged = client.get_recipe(&created.id).await.unwrap();
    assert_eq!(unchanged, created);
}

#[tokio::test]
async fn test_update_missing_recipe_is_not_found() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let client = server.client();

    let err = client
        .update_recipe("000000000000000000000000", &soup())
        .await
        .expect_err("Update of a missing recipe should fail");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_update_into_existing_title_is_rejected() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let client = server.client();
    client.create_recipe(&soup()).await.unwrap();
    let bread = client.create_recipe(&titled("Bread")).await.unwrap();

    let err = client.update_recipe(&bread.id, &soup()).await.expect_err("Title collision should fail");
    assert_eq!(err.user_message("fallback"), "A recipe with this title already exists.");
}

#[tokio::test]
async fn test_delete_is_permanent() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let client = server.client();
    let created = client.create_recipe(&soup()).await.unwrap();

    client.delete_recipe(&created.id).await.expect("Delete should succeed");

    let err = client.get_recipe(&created.id).await.expect_err("Recipe should be gone");
    assert!(err.is_not_found());
    assert!(client.list_recipes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_returns_recipes_in_creation_order() {
    let server = TestServer::start().await.expect("Failed to start test server");
    let client = server.client();
    for title in ["Soup", "Bread", "Salad"] {
        client.create_recipe(&titled(title)).await.unwrap();
    }

    let titles: Vec<String> = client
        .list_recipes()
        .await
        .unwrap()
        .into_iter()
        .map(|recipe| recipe.title)
        .collect();
    assert_eq!(titles, vec!["Soup", "Bread", "Salad"]);
}

#[tokio::test]
async fn test_unknown_route_is_not_an_envelope() {
    let server = TestServer::start().await.expect("Failed to start test server");

    let response = reqwest::get(server.url("/api/ingredients")).await.unwrap();
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(response.text().await.unwrap(), "API route not found");
}
