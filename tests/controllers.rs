mod common;

use std::sync::Arc;

use common::StubServer;
use community_hub::client::FileTokenStore;
use community_hub::model::RoleColor;
use community_hub::view::render;
use community_hub::{ClickTarget, CommunityBrowser, DashboardView, ListKind, Selection, Tab};
use serde_json::json;
use tempfile::tempdir;

#[tokio::test]
async fn test_browser_join_flow_over_http() {
    let server = StubServer::start().await;
    server.respond("GET", "/communities/all", 200, json!([{"id": 1, "name": "Chess Club"}]));
    server.respond("GET", "/communities/user/communities/joined", 200, json!([]));
    server.respond("POST", "/communities/user/communities/join", 200, json!({}));

    let browser = CommunityBrowser::new(Arc::new(server.api(Some("tok"))));
    browser.fetch_and_render_communities().await;

    let text = render::render_community_lists(&browser.snapshot().await);
    assert!(text.contains("[Join]"));
    assert!(text.contains("No joined communities."));

    server.respond(
        "GET",
        "/communities/user/communities/joined",
        200,
        json!([{"id": 1, "name": "Chess Club"}]),
    );
    server.clear_requests();
    browser.click_row(ListKind::All, 1, ClickTarget::Button).await;

    assert_eq!(
        server.request_lines(),
        vec![
            "POST /communities/user/communities/join",
            "GET /communities/all",
            "GET /communities/user/communities/joined",
        ]
    );
    assert_eq!(server.requests()[0].body, Some(json!({"communityId": 1})));
    assert_eq!(browser.take_alerts().await, vec!["Successfully joined Chess Club!"]);

    // The refreshed cache now blocks a second join locally
    server.clear_requests();
    browser.add_to_joined_communities(1, "Chess Club").await;
    assert!(server.requests().is_empty());
    assert_eq!(
        browser.take_alerts().await,
        vec!["You have already joined Chess Club."]
    );
}

#[tokio::test]
async fn test_browser_detail_and_post_over_http() {
    let server = StubServer::start().await;
    server.respond(
        "GET",
        "/communities/communities/4/posts",
        200,
        json!([{"id": 5, "title": "Hello"}]),
    );
    server.respond_raw("GET", "/communities/communities/4/announcements", 200, "null");
    server.respond(
        "GET",
        "/communities/communities/4/members",
        503,
        json!({"message": "Maintenance"}),
    );
    server.respond(
        "POST",
        "/communities/communities/4/posts",
        400,
        json!({"message": "Title too long"}),
    );

    let browser = CommunityBrowser::new(Arc::new(server.api(None)));
    browser.load_community_data(4, "Robotics").await;

    let snap = browser.snapshot().await;
    assert_eq!(snap.selection, Selection::Loaded);
    assert_eq!(snap.active_tab, Tab::Posts);
    assert_eq!(snap.posts.items()[0].title, "Hello");
    assert_eq!(
        snap.announcements.placeholder(),
        Some("No announcements found for this community.")
    );
    assert_eq!(snap.members.placeholder(), Some("Failed to load members."));

    browser.set_post_title("A very long title").await;
    browser.set_post_content("Body").await;
    browser.submit_post().await;
    assert_eq!(
        browser.take_alerts().await,
        vec!["Failed to create post: Title too long"]
    );
}

#[tokio::test]
async fn test_dashboard_guest_fallback_over_http() {
    let server = StubServer::start().await;
    server.respond("GET", "/user/profile", 401, json!({"message": "Missing token"}));
    server.respond("GET", "/communities/all", 200, json!([]));
    server.respond(
        "GET",
        "/posts/all",
        200,
        json!([{"id": 10, "title": "Welcome", "content": "Hi all", "communityId": 2}]),
    );
    // No /announcements/count route: the stub answers 404

    let dashboard = DashboardView::new(Arc::new(server.api(None)));
    dashboard.init().await;

    let snap = dashboard.snapshot().await;
    assert_eq!(snap.profile.greeting, "Welcome, Guest!");
    assert_eq!(snap.profile.avatar, "default-profile.png");
    assert_eq!(snap.communities.placeholder(), Some("No communities available."));
    assert_eq!(snap.feed.items()[0].join_label(), "Join Community");
    assert_eq!(snap.announcement_badge, "0");
    assert_eq!(
        server.request_lines(),
        vec![
            "GET /user/profile",
            "GET /communities/all",
            "GET /posts/all",
            "GET /announcements/count",
        ]
    );
}

#[tokio::test]
async fn test_feed_join_over_http() {
    let server = StubServer::start().await;
    server.respond(
        "GET",
        "/posts/all",
        200,
        json!([{"id": 10, "title": "Welcome", "content": "Hi all", "communityId": 2}]),
    );
    server.respond("POST", "/communities/user/communities/join", 200, json!({}));

    let dashboard = DashboardView::new(Arc::new(server.api(Some("t"))));
    dashboard.fetch_posts().await;
    dashboard.toggle_join(10).await;

    assert_eq!(dashboard.snapshot().await.feed.items()[0].join_label(), "Joined");
    let join = server
        .requests()
        .into_iter()
        .find(|r| r.method == "POST")
        .unwrap();
    assert_eq!(join.body, Some(json!({"communityId": 2})));
    assert_eq!(join.authorization.as_deref(), Some("Bearer t"));
}

#[tokio::test]
async fn test_token_file_is_read_per_request() {
    let server = StubServer::start().await;
    server.respond("GET", "/communities/all", 200, json!([]));
    server.respond("GET", "/communities/user/communities/joined", 200, json!([]));

    let dir = tempdir().unwrap();
    let store = FileTokenStore::new(dir.path().join("token"));
    let browser = CommunityBrowser::new(Arc::new(server.api_with(Arc::new(store.clone()))));

    browser.render_all().await;
    store.save("fresh").unwrap();
    browser.render_joined().await;

    let requests = server.requests();
    assert!(requests[0].authorization.is_none());
    assert_eq!(requests[1].authorization.as_deref(), Some("Bearer fresh"));
}

#[tokio::test]
async fn test_null_fields_do_not_fail_lists() {
    let server = StubServer::start().await;
    server.respond("GET", "/communities/communities/3/posts", 200, json!([]));
    server.respond("GET", "/communities/communities/3/announcements", 200, json!([]));
    server.respond(
        "GET",
        "/communities/communities/3/members",
        200,
        json!([{"name": "Ana", "role": null}, {"name": "Bo", "role": "Admin"}]),
    );
    server.respond(
        "GET",
        "/posts/all",
        200,
        json!([{"id": 1, "title": "Hi", "content": null, "imageUrl": null, "communityId": null}]),
    );

    let browser = CommunityBrowser::new(Arc::new(server.api(None)));
    browser.load_community_data(3, "Debate").await;

    let snap = browser.snapshot().await;
    assert_eq!(snap.members.placeholder(), None);
    let members = snap.members.items();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].color, RoleColor::Gray);
    assert_eq!(members[1].color, RoleColor::Red);

    let dashboard = DashboardView::new(Arc::new(server.api(None)));
    dashboard.fetch_posts().await;

    let feed = dashboard.snapshot().await.feed;
    assert_eq!(feed.placeholder(), None);
    assert_eq!(feed.items().len(), 1);
    assert_eq!(feed.items()[0].title, "Hi");
    assert_eq!(feed.items()[0].content, "");
}
