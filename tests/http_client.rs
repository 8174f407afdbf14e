mod common;

use common::StubServer;
use community_hub::model::NewPost;
use community_hub::{ApiError, CommunityApi};
use serde_json::json;

#[tokio::test]
async fn test_list_communities_without_token() {
    let server = StubServer::start().await;
    server.respond(
        "GET",
        "/communities/all",
        200,
        json!([
            {"id": 1, "name": "Chess Club"},
            {"id": 2, "name": "Robotics", "imageUrl": "r.png", "memberCount": 12, "description": "Bots"}
        ]),
    );

    let communities = server.api(None).list_communities().await.unwrap();
    assert_eq!(communities.len(), 2);
    assert_eq!(communities[1].member_count, Some(12));
    assert_eq!(communities[1].image_url.as_deref(), Some("r.png"));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/communities/all");
    assert!(request.authorization.is_none());
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    assert!(request.request_id.is_some());
}

#[tokio::test]
async fn test_bearer_header_when_token_present() {
    let server = StubServer::start().await;
    server.respond("GET", "/communities/user/communities/joined", 200, json!([]));

    let joined = server
        .api(Some("tok-123"))
        .list_joined_communities()
        .await
        .unwrap();
    assert!(joined.is_empty());
    assert_eq!(
        server.requests()[0].authorization.as_deref(),
        Some("Bearer tok-123")
    );
}

#[tokio::test]
async fn test_mutation_requests() {
    let server = StubServer::start().await;
    server.respond("POST", "/communities/user/communities/join", 200, json!({}));
    server.respond_raw("DELETE", "/communities/user/communities/leave/7", 204, "");
    server.respond(
        "POST",
        "/communities/communities/7/posts",
        201,
        json!({"id": 99, "title": "Hi", "content": "There"}),
    );

    let api = server.api(Some("t"));
    api.join_community(7).await.unwrap();
    api.leave_community(7).await.unwrap();
    api.create_post(
        7,
        &NewPost {
            title: "Hi".into(),
            content: "There".into(),
        },
    )
    .await
    .unwrap();

    let requests = server.requests();
    assert_eq!(
        server.request_lines(),
        vec![
            "POST /communities/user/communities/join",
            "DELETE /communities/user/communities/leave/7",
            "POST /communities/communities/7/posts",
        ]
    );
    assert_eq!(requests[0].body, Some(json!({"communityId": 7})));
    assert!(requests[1].body.is_none());
    assert_eq!(requests[2].body, Some(json!({"title": "Hi", "content": "There"})));
}

#[tokio::test]
async fn test_detail_paths() {
    let server = StubServer::start().await;
    server.respond(
        "GET",
        "/communities/communities/3/posts",
        200,
        json!([{"id": 5, "title": "Hello"}]),
    );
    server.respond(
        "GET",
        "/communities/communities/3/announcements",
        200,
        json!([{"id": 1, "title": "Welcome"}]),
    );
    server.respond(
        "GET",
        "/communities/communities/3/members",
        200,
        json!([{"name": "Ana", "role": "Admin"}]),
    );

    let api = server.api(None);
    let posts = api.community_posts(3).await.unwrap();
    let announcements = api.community_announcements(3).await.unwrap();
    let members = api.community_members(3).await.unwrap();

    assert_eq!(posts[0].title, "Hello");
    assert_eq!(announcements[0].title, "Welcome");
    assert_eq!(members[0].role, "Admin");
}

#[tokio::test]
async fn test_error_status_carries_server_message() {
    let server = StubServer::start().await;
    server.respond(
        "POST",
        "/communities/user/communities/join",
        409,
        json!({"message": "Already a member"}),
    );

    let err = server.api(None).join_community(1).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 409,
            status_text: "Conflict".into(),
            message: Some("Already a member".into()),
        }
    );
    assert_eq!(err.reason(), "Already a member");
}

#[tokio::test]
async fn test_error_status_without_json_body() {
    let server = StubServer::start().await;
    server.respond_raw("GET", "/communities/all", 500, "<html>oops</html>");

    let err = server.api(None).list_communities().await.unwrap_err();
    assert!(!err.is_transport());
    assert_eq!(err.reason(), "Internal Server Error");
}

#[tokio::test]
async fn test_null_list_reads_as_empty() {
    let server = StubServer::start().await;
    server.respond_raw("GET", "/posts/all", 200, "null");

    let posts = server.api(None).all_posts().await.unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = StubServer::start().await;
    server.respond("GET", "/communities/all", 200, json!({"not": "a list"}));

    let err = server.api(None).list_communities().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_dashboard_endpoints() {
    let server = StubServer::start().await;
    server.respond(
        "GET",
        "/user/profile",
        200,
        json!({"name": "Dana", "profilePic": "dana.png"}),
    );
    server.respond("GET", "/announcements/count", 200, json!({"count": 3}));

    let api = server.api(Some("t"));
    let profile = api.user_profile().await.unwrap();
    let count = api.announcement_count().await.unwrap();

    assert_eq!(profile.name.as_deref(), Some("Dana"));
    assert_eq!(profile.profile_pic.as_deref(), Some("dana.png"));
    assert_eq!(count.count, Some(3));
    assert_eq!(
        server.request_lines(),
        vec!["GET /user/profile", "GET /announcements/count"]
    );
}
