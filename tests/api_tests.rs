// End-to-end scenarios against a running server. Start the server and run the
// seed binary first, then: cargo test -- --ignored

use serde_json::{Value, json};
use uuid::Uuid;

mod unit;

const BASE_URL: &str = "http://127.0.0.1:8000";

fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("failed to build client")
}

/// Registers a fresh user and logs in; the returned client carries the
/// session cookie.
async fn register_and_login(username: &str) -> (reqwest::Client, String) {
    let client = client();
    let email = format!("{}@example.com", username);

    let response = client
        .post(format!("{}/register/", BASE_URL))
        .json(&json!({
            "username": username,
            "email": email,
            "password": "StrongP4ss!",
            "password_confirm": "StrongP4ss!",
        }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/login/", BASE_URL))
        .json(&json!({ "email": email, "password": "StrongP4ss!" }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(response.status(), 200);

    (client, email)
}

async fn first_roadmap_item(client: &reqwest::Client) -> Uuid {
    let body: Value = client
        .get(format!("{}/roadmap/", BASE_URL))
        .send()
        .await
        .expect("roadmap request failed")
        .json()
        .await
        .expect("invalid roadmap response");

    let items = body["data"].as_array().expect("data is not an array");
    assert!(!items.is_empty(), "run the seed binary before these tests");
    items[0]["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("item id is not a uuid")
}

async fn post_comment(
    client: &reqwest::Client,
    item: Uuid,
    content: &str,
    parent: Option<Uuid>,
) -> reqwest::Response {
    client
        .post(format!("{}/roadmap/{}/comments/", BASE_URL, item))
        .json(&json!({ "content": content, "parent": parent }))
        .send()
        .await
        .expect("comment request failed")
}

#[tokio::test]
#[ignore = "requires running server"]
async fn test_duplicate_registration_rejected() {
    let username = unique("dup");
    let (_, email) = register_and_login(&username).await;

    let response = client()
        .post(format!("{}/register/", BASE_URL))
        .json(&json!({
            "username": username,
            "email": email,
            "password": "StrongP4ss!",
            "password_confirm": "StrongP4ss!",
        }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("invalid response");
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn test_login_rejects_wrong_password() {
    let username = unique("badpw");
    let (_, email) = register_and_login(&username).await;

    let response = client()
        .post(format!("{}/login/", BASE_URL))
        .json(&json!({ "email": email, "password": "WrongP4ss!" }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn test_catalog_is_public_but_comments_are_not() {
    let anon = client();
    let response = anon
        .get(format!("{}/roadmap/", BASE_URL))
        .send()
        .await
        .expect("roadmap request failed");
    assert_eq!(response.status(), 200);

    let item = first_roadmap_item(&anon).await;
    let response = anon
        .get(format!("{}/roadmap/{}/comments/", BASE_URL, item))
        .send()
        .await
        .expect("comments request failed");
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn test_reply_depth_is_capped() {
    let (client, _) = register_and_login(&unique("depth")).await;
    let item = first_roadmap_item(&client).await;

    let mut parent: Option<Uuid> = None;
    // root, reply, reply-to-reply are all accepted
    for content in ["c0", "c1", "c2"] {
        let response = post_comment(&client, item, content, parent).await;
        assert_eq!(response.status(), 201, "comment {} rejected", content);
        let body: Value = response.json().await.expect("invalid response");
        parent = body["data"]["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok());
        assert!(parent.is_some());
    }

    // a fourth level is not
    let response = post_comment(&client, item, "c3", parent).await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("invalid response");
    assert_eq!(
        body["message"],
        "Cannot reply to comments nested more than 2 levels deep"
    );
}

#[tokio::test]
#[ignore = "requires running server"]
async fn test_duplicate_upvote_rejected() {
    let (client, _) = register_and_login(&unique("vote")).await;
    let item = first_roadmap_item(&client).await;

    let before: Value = client
        .get(format!("{}/roadmap/{}/", BASE_URL, item))
        .send()
        .await
        .expect("detail request failed")
        .json()
        .await
        .expect("invalid response");
    let count_before = before["data"]["upvote_count"]
        .as_i64()
        .expect("missing upvote_count");

    let response = client
        .post(format!("{}/upvote/", BASE_URL))
        .json(&json!({ "roadmap_item": item }))
        .send()
        .await
        .expect("upvote request failed");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/upvote/", BASE_URL))
        .json(&json!({ "roadmap_item": item }))
        .send()
        .await
        .expect("upvote request failed");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("invalid response");
    assert_eq!(body["message"], "You have already upvoted this item");

    let detail: Value = client
        .get(format!("{}/roadmap/{}/", BASE_URL, item))
        .send()
        .await
        .expect("detail request failed")
        .json()
        .await
        .expect("invalid response");
    assert_eq!(detail["data"]["user_has_upvoted"], true);
    // exactly one row for this user: the rejected duplicate added nothing
    assert_eq!(detail["data"]["upvote_count"], count_before + 1);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn test_foreign_comments_are_invisible() {
    let (owner, _) = register_and_login(&unique("owner")).await;
    let item = first_roadmap_item(&owner).await;

    let response = post_comment(&owner, item, "mine", None).await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("invalid response");
    let comment_id = body["data"]["id"].as_str().expect("missing id").to_string();

    // the author can fetch and edit it
    let response = owner
        .get(format!("{}/comments/{}/", BASE_URL, comment_id))
        .send()
        .await
        .expect("comment request failed");
    assert_eq!(response.status(), 200);

    // anyone else gets a 404, for reads and writes alike
    let (other, _) = register_and_login(&unique("other")).await;
    let response = other
        .get(format!("{}/comments/{}/", BASE_URL, comment_id))
        .send()
        .await
        .expect("comment request failed");
    assert_eq!(response.status(), 404);

    let response = other
        .delete(format!("{}/comments/{}/", BASE_URL, comment_id))
        .send()
        .await
        .expect("delete request failed");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn test_logout_ends_the_session() {
    let (client, _) = register_and_login(&unique("logout")).await;

    let response = client
        .get(format!("{}/profile/", BASE_URL))
        .send()
        .await
        .expect("profile request failed");
    assert_eq!(response.status(), 200);

    let response = client
        .post(format!("{}/logout/", BASE_URL))
        .send()
        .await
        .expect("logout request failed");
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/profile/", BASE_URL))
        .send()
        .await
        .expect("profile request failed");
    assert_eq!(response.status(), 401);
}
