//! HTTP API integration tests.
//!
//! Tests for REST API endpoints (health check, rooms, emission factors, publish).

mod fixtures;
use fixtures::{PUBLISH_TOKEN, TestServer, assert_no_event, next_event, room_ids};
use serde_json::json;

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /api/health エンドポイントが正常に動作する
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/health", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_rooms_list_endpoint() {
    // テスト項目: /api/rooms は接続のあるルームだけを返す
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let empty: Vec<serde_json::Value> = client
        .get(format!("{}/api/rooms", server.base_url()))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");
    let _ws = server.connect("token-a").await;

    // when (操作):
    let response = client
        .get(format!("{}/api/rooms", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert!(empty.is_empty(), "No rooms exist before anyone connects");
    assert_eq!(response.status(), 200);

    let rooms: Vec<serde_json::Value> = response.json().await.expect("Failed to parse JSON");
    assert_eq!(room_ids(&rooms), vec!["user_alice"]);
    assert_eq!(rooms[0]["member_count"], 1);
}

#[tokio::test]
async fn test_room_detail_endpoint_success() {
    // テスト項目: /api/rooms/{room_id} がメンバーの詳細を返す
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let _ws1 = server.connect("token-a").await;
    let _ws2 = server.connect_with_query("token-a").await;

    // when (操作):
    let response = client
        .get(format!("{}/api/rooms/user_alice", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["id"], "user_alice");
    let members = body["members"].as_array().expect("members is an array");
    assert_eq!(members.len(), 2);
    for member in members {
        assert_eq!(member["user_id"], "alice");
        assert_eq!(member["display_name"], "Alice");
        assert!(member["connection_id"].is_string());
        assert!(member["connected_at"].is_string());
    }
}

#[tokio::test]
async fn test_room_detail_endpoint_not_found() {
    // テスト項目: 存在しないルームは 404 を返す
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/rooms/webinar_404", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_emission_factors_endpoint() {
    // テスト項目: /api/emission-factors が有効な係数表を返す
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/emission-factors", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["transportation"]["car_km"], 0.2);
    assert_eq!(body["energy"]["kwh"], 0.5);
}

#[tokio::test]
async fn test_publish_to_user_scope() {
    // テスト項目: ユーザースコープへの公開はそのユーザーの全接続にだけ届く
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let mut alice1 = server.connect("token-a").await;
    let mut alice2 = server.connect("token-a").await;
    let mut bob = server.connect("token-b").await;

    // when (操作):
    let response = client
        .post(format!("{}/api/events", server.base_url()))
        .json(&json!({
            "type": "comment.created",
            "data": {"post_id": 7, "text": "Nice!"},
            "scope": {"type": "user", "user_id": "alice"}
        }))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 202);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["recipients"], 2);
    assert_eq!(body["delivered"], 2);

    for ws in [&mut alice1, &mut alice2] {
        let event = next_event(ws).await;
        assert_eq!(event["type"], "comment.created");
        assert_eq!(event["data"]["post_id"], 7);
        assert!(event["timestamp"].is_i64());
    }
    assert_no_event(&mut bob).await;
}

#[tokio::test]
async fn test_publish_global_and_empty_room() {
    // テスト項目: グローバル公開は全員に届き、空のルームへの公開は誰にも届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let mut alice = server.connect("token-a").await;
    let mut bob = server.connect("token-b").await;

    // when (操作):
    let global = client
        .post(format!("{}/api/events", server.base_url()))
        .json(&json!({"type": "post.created", "data": {"id": 1}, "scope": {"type": "global"}}))
        .send()
        .await
        .expect("Failed to send request");
    let empty_room = client
        .post(format!("{}/api/events", server.base_url()))
        .json(&json!({"type": "post.updated", "scope": {"type": "room", "room_id": "webinar_9"}}))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    let global: serde_json::Value = global.json().await.expect("Failed to parse JSON");
    assert_eq!(global["recipients"], 2);
    let empty_room: serde_json::Value = empty_room.json().await.expect("Failed to parse JSON");
    assert_eq!(empty_room["recipients"], 0);

    assert_eq!(next_event(&mut alice).await["type"], "post.created");
    assert_eq!(next_event(&mut bob).await["type"], "post.created");
    assert_no_event(&mut alice).await;
    assert_no_event(&mut bob).await;
}

#[tokio::test]
async fn test_publish_rejects_invalid_requests() {
    // テスト項目: 不正なスコープは 400、未知のイベント種別は 4xx
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let bad_scope = client
        .post(format!("{}/api/events", server.base_url()))
        .json(&json!({"type": "post.created", "scope": {"type": "user", "user_id": ""}}))
        .send()
        .await
        .expect("Failed to send request");
    let bad_type = client
        .post(format!("{}/api/events", server.base_url()))
        .json(&json!({"type": "post.exploded", "scope": {"type": "global"}}))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(bad_scope.status(), 400);
    assert!(bad_type.status().is_client_error());
}

#[tokio::test]
async fn test_publish_rejects_error_events() {
    // テスト項目: error イベントは公開できず 400、接続中のクライアントには何も届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let mut alice = server.connect("token-a").await;
    let mut bob = server.connect("token-b").await;

    // when (操作):
    let response = client
        .post(format!("{}/api/events", server.base_url()))
        .json(&json!({
            "type": "error",
            "data": {"message": "quantity must be positive"},
            "scope": {"type": "global"}
        }))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 400);
    assert_no_event(&mut alice).await;
    assert_no_event(&mut bob).await;
}

#[tokio::test]
async fn test_publish_requires_token_when_configured() {
    // テスト項目: publish token が設定されていればトークンなし・誤りは 401
    // given (前提条件):
    let server = TestServer::start_with_publish_token(Some(PUBLISH_TOKEN)).await;
    let client = reqwest::Client::new();
    let body = json!({"type": "post.created", "scope": {"type": "global"}});

    // when (操作):
    let missing = client
        .post(format!("{}/api/events", server.base_url()))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let wrong = client
        .post(format!("{}/api/events", server.base_url()))
        .bearer_auth("not-the-token")
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let accepted = client
        .post(format!("{}/api/events", server.base_url()))
        .bearer_auth(PUBLISH_TOKEN)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(missing.status(), 401);
    assert_eq!(wrong.status(), 401);
    assert_eq!(accepted.status(), 202);
}
