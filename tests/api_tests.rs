use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

async fn spawn_server() -> String {
    let (_, addr) = egg::get_random_free_port();
    tokio::spawn(egg::run_app(egg::make_router(), addr));
    let base = format!("http://{}", addr);
    let client = Client::new();
    for _ in 0..50 {
        if client
            .get(format!("{base}/check_health"))
            .send()
            .await
            .is_ok()
        {
            return base;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("server did not come up on {base}");
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

async fn register(client: &Client, base: &str, email: &str, username: &str) -> (String, i64) {
    let response = client
        .post(format!("{base}/api/auth/register"))
        .json(&json!({ "email": email, "username": username, "password": "password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    (
        body["token"].as_str().unwrap().to_string(),
        body["userId"].as_i64().unwrap(),
    )
}

async fn create_post(
    client: &Client,
    base: &str,
    token: &str,
    user_id: i64,
    content: &str,
) -> i64 {
    let response = client
        .post(format!("{base}/api/posts/create"))
        .header("Authorization", bearer(token))
        .json(&json!({ "content": content, "userId": user_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    body["post"]["id"].as_i64().unwrap()
}

async fn get_feed(client: &Client, base: &str, token: Option<&str>) -> Value {
    let mut request = client.get(format!("{base}/api/posts"));
    if let Some(token) = token {
        request = request.header("Authorization", bearer(token));
    }
    let response = request.send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.unwrap()
}

#[tokio::test]
async fn register_login_and_read_profile() {
    let base = spawn_server().await;
    let client = Client::new();
    let (_, alice) = register(&client, &base, "alice@egg.io", "alice").await;

    let response = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({ "email": "alice@egg.io", "password": "password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["userId"].as_i64().unwrap(), alice);
    assert_eq!(body["user"]["displayName"], "alice");

    let response = client
        .get(format!("{base}/api/users/{alice}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["email"], "alice@egg.io");
    assert_eq!(body["user"]["followerCount"], 0);
    assert_eq!(body["user"]["postCount"], 0);
    // the password never goes out on the wire
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let base = spawn_server().await;
    let client = Client::new();
    register(&client, &base, "alice@egg.io", "alice").await;

    let response = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({ "email": "alice@egg.io", "password": "wrong!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn duplicate_email_registration_fails() {
    let base = spawn_server().await;
    let client = Client::new();
    register(&client, &base, "alice@egg.io", "alice").await;

    let response = client
        .post(format!("{base}/api/auth/register"))
        .json(&json!({ "email": "alice@egg.io", "username": "other", "password": "password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn short_password_registration_fails() {
    let base = spawn_server().await;
    let client = Client::new();
    let response = client
        .post(format!("{base}/api/auth/register"))
        .json(&json!({ "email": "alice@egg.io", "username": "alice", "password": "12345" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn feed_shows_own_and_followed_posts_only() {
    let base = spawn_server().await;
    let client = Client::new();
    let (alice_token, alice) = register(&client, &base, "alice@egg.io", "alice").await;
    let (bob_token, _) = register(&client, &base, "bob@egg.io", "bob").await;
    let (carol_token, _) = register(&client, &base, "carol@egg.io", "carol").await;

    let response = client
        .post(format!("{base}/api/users/{alice}/follow"))
        .header("Authorization", bearer(&bob_token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    create_post(&client, &base, &alice_token, alice, "hi").await;

    let bobs = get_feed(&client, &base, Some(&bob_token)).await;
    assert_eq!(bobs["count"], 1);
    assert_eq!(bobs["posts"][0]["content"], "hi");

    let alices = get_feed(&client, &base, Some(&alice_token)).await;
    assert_eq!(alices["count"], 1);
    assert_eq!(alices["posts"][0]["id"], bobs["posts"][0]["id"]);

    let carols = get_feed(&client, &base, Some(&carol_token)).await;
    assert_eq!(carols["count"], 0);

    let anonymous = get_feed(&client, &base, None).await;
    assert_eq!(anonymous["count"], 0);
}

#[tokio::test]
async fn follow_counters_survive_repeat_calls() {
    let base = spawn_server().await;
    let client = Client::new();
    let (_, alice) = register(&client, &base, "alice@egg.io", "alice").await;
    let (bob_token, bob) = register(&client, &base, "bob@egg.io", "bob").await;

    for _ in 0..3 {
        client
            .post(format!("{base}/api/users/{alice}/follow"))
            .header("Authorization", bearer(&bob_token))
            .send()
            .await
            .unwrap();
    }

    let body: Value = client
        .get(format!("{base}/api/users/{alice}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["user"]["followerCount"], 1);

    for _ in 0..3 {
        client
            .post(format!("{base}/api/users/{alice}/unfollow"))
            .header("Authorization", bearer(&bob_token))
            .send()
            .await
            .unwrap();
    }

    let body: Value = client
        .get(format!("{base}/api/users/{alice}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["user"]["followerCount"], 0);

    let body: Value = client
        .get(format!("{base}/api/users/{bob}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["user"]["followingCount"], 0);
}

#[tokio::test]
async fn follow_requires_a_token_and_a_real_followee() {
    let base = spawn_server().await;
    let client = Client::new();
    let (bob_token, _) = register(&client, &base, "bob@egg.io", "bob").await;

    let response = client
        .post(format!("{base}/api/users/1/follow"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client
        .post(format!("{base}/api/users/999/follow"))
        .header("Authorization", bearer(&bob_token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn likes_are_idempotent_per_user() {
    let base = spawn_server().await;
    let client = Client::new();
    let (alice_token, alice) = register(&client, &base, "alice@egg.io", "alice").await;
    let (bob_token, _) = register(&client, &base, "bob@egg.io", "bob").await;
    let post = create_post(&client, &base, &alice_token, alice, "hi").await;

    for _ in 0..2 {
        let body: Value = client
            .post(format!("{base}/api/posts/{post}/like"))
            .header("Authorization", bearer(&bob_token))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["likes"], 1);
    }

    let body: Value = client
        .post(format!("{base}/api/posts/{post}/unlike"))
        .header("Authorization", bearer(&bob_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["likes"], 0);

    // unliking again stays floored at zero
    let body: Value = client
        .post(format!("{base}/api/posts/{post}/unlike"))
        .header("Authorization", bearer(&bob_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["likes"], 0);
}

#[tokio::test]
async fn post_mutation_is_author_only() {
    let base = spawn_server().await;
    let client = Client::new();
    let (alice_token, alice) = register(&client, &base, "alice@egg.io", "alice").await;
    let (bob_token, _) = register(&client, &base, "bob@egg.io", "bob").await;
    let post = create_post(&client, &base, &alice_token, alice, "hi").await;

    let response = client
        .put(format!("{base}/api/posts/{post}"))
        .header("Authorization", bearer(&bob_token))
        .json(&json!({ "content": "hacked" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = client
        .delete(format!("{base}/api/posts/{post}"))
        .header("Authorization", bearer(&bob_token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // the failed mutations changed nothing
    let body: Value = client
        .get(format!("{base}/api/posts/{post}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["post"]["content"], "hi");
    assert!(body["post"]["updatedAt"].is_null());

    let response = client
        .put(format!("{base}/api/posts/{post}"))
        .header("Authorization", bearer(&alice_token))
        .json(&json!({ "content": "edited" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["post"]["content"], "edited");
    assert!(!body["post"]["updatedAt"].is_null());
}

#[tokio::test]
async fn deleting_a_post_updates_the_author_count_but_not_comments() {
    let base = spawn_server().await;
    let client = Client::new();
    let (alice_token, alice) = register(&client, &base, "alice@egg.io", "alice").await;
    let (bob_token, _) = register(&client, &base, "bob@egg.io", "bob").await;
    let post = create_post(&client, &base, &alice_token, alice, "hi").await;

    client
        .post(format!("{base}/api/posts/{post}/comment"))
        .header("Authorization", bearer(&bob_token))
        .json(&json!({ "content": "nice" }))
        .send()
        .await
        .unwrap();

    let response = client
        .delete(format!("{base}/api/posts/{post}"))
        .header("Authorization", bearer(&alice_token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = client
        .get(format!("{base}/api/users/{alice}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["user"]["postCount"], 0);

    // deletes do not cascade: the comment is orphaned but still listed
    let body: Value = client
        .get(format!("{base}/api/posts/{post}/comments"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn comment_lifecycle_and_authorization() {
    let base = spawn_server().await;
    let client = Client::new();
    let (alice_token, alice) = register(&client, &base, "alice@egg.io", "alice").await;
    let (bob_token, _) = register(&client, &base, "bob@egg.io", "bob").await;
    let post = create_post(&client, &base, &alice_token, alice, "hi").await;

    let response = client
        .post(format!("{base}/api/posts/{post}/comment"))
        .header("Authorization", bearer(&bob_token))
        .json(&json!({ "content": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{base}/api/posts/{post}/comment"))
        .header("Authorization", bearer(&bob_token))
        .json(&json!({ "content": "nice egg" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    let comment = body["comment"]["id"].as_i64().unwrap();
    assert_eq!(body["comment"]["author"], "bob");

    // alice did not write it, so she may not delete it
    let response = client
        .delete(format!("{base}/api/comments/{comment}"))
        .header("Authorization", bearer(&alice_token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = client
        .delete(format!("{base}/api/comments/{comment}"))
        .header("Authorization", bearer(&bob_token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = client
        .get(format!("{base}/api/posts/{post}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["post"]["commentCount"], 0);
}

#[tokio::test]
async fn empty_profile_fields_do_not_overwrite() {
    let base = spawn_server().await;
    let client = Client::new();
    let (token, alice) = register(&client, &base, "alice@egg.io", "alice").await;

    client
        .put(format!("{base}/api/users/{alice}"))
        .header("Authorization", bearer(&token))
        .json(&json!({ "bio": "hello there" }))
        .send()
        .await
        .unwrap();

    // sending an empty bio leaves the stored value in place
    let response = client
        .put(format!("{base}/api/users/{alice}"))
        .header("Authorization", bearer(&token))
        .json(&json!({ "bio": "", "location": "cairo" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["bio"], "hello there");
    assert_eq!(body["user"]["location"], "cairo");
}

#[tokio::test]
async fn profile_update_by_someone_else_is_forbidden() {
    let base = spawn_server().await;
    let client = Client::new();
    let (_, alice) = register(&client, &base, "alice@egg.io", "alice").await;
    let (bob_token, _) = register(&client, &base, "bob@egg.io", "bob").await;

    let response = client
        .put(format!("{base}/api/users/{alice}"))
        .header("Authorization", bearer(&bob_token))
        .json(&json!({ "bio": "defaced" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_post_requires_matching_identity() {
    let base = spawn_server().await;
    let client = Client::new();
    let (alice_token, alice) = register(&client, &base, "alice@egg.io", "alice").await;
    let (_, bob) = register(&client, &base, "bob@egg.io", "bob").await;

    // no token at all
    let response = client
        .post(format!("{base}/api/posts/create"))
        .json(&json!({ "content": "hi", "userId": alice }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // token does not match the author named in the body
    let response = client
        .post(format!("{base}/api/posts/create"))
        .header("Authorization", bearer(&alice_token))
        .json(&json!({ "content": "hi", "userId": bob }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // empty content is a validation failure
    let response = client
        .post(format!("{base}/api/posts/create"))
        .header("Authorization", bearer(&alice_token))
        .json(&json!({ "content": "  ", "userId": alice }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn user_posts_are_public() {
    let base = spawn_server().await;
    let client = Client::new();
    let (alice_token, alice) = register(&client, &base, "alice@egg.io", "alice").await;
    create_post(&client, &base, &alice_token, alice, "one").await;
    create_post(&client, &base, &alice_token, alice, "two").await;

    let body: Value = client
        .get(format!("{base}/api/posts/user/{alice}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["count"], 2);
    assert_eq!(body["posts"][0]["content"], "two");
    assert_eq!(body["posts"][1]["content"], "one");
}

#[tokio::test]
async fn unknown_routes_get_a_json_404() {
    let base = spawn_server().await;
    let client = Client::new();
    let response = client
        .get(format!("{base}/api/nowhere"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn garbage_tokens_resolve_to_no_identity() {
    let base = spawn_server().await;
    let client = Client::new();
    register(&client, &base, "alice@egg.io", "alice").await;

    // an undecodable token is treated as anonymous, so the feed is empty
    // rather than an error
    let body: Value = client
        .get(format!("{base}/api/posts"))
        .header("Authorization", "Bearer !!not-base64!!")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 0);

    // but like still demands a resolvable identity
    let response = client
        .post(format!("{base}/api/posts/1/like"))
        .header("Authorization", "Bearer !!not-base64!!")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
