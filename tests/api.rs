//! End-to-end flows: session drivers over the real HTTP client against a
//! mock collection server.

use std::sync::Arc;

use httpmock::MockServer;

use foglio::application::collection::CollectionClient;
use foglio::application::list_sync::Phase;
use foglio::application::session::{AdminSession, ListSession};
use foglio::infra::api::HttpCollection;

fn client(server: &MockServer) -> Arc<dyn CollectionClient> {
    Arc::new(HttpCollection::new(&server.base_url()).expect("client"))
}

fn envelope(ids: &[i64], current_page: u32, last_page: u32, links: &str) -> String {
    let data = ids
        .iter()
        .map(|id| format!(r#"{{"id": {id}, "title": "Post {id}", "content": "body"}}"#))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        r#"{{"data": [{data}], "current_page": {current_page}, "last_page": {last_page}, "links": [{links}]}}"#
    )
}

#[tokio::test]
async fn public_listing_loads_and_follows_next_link() {
    let server = MockServer::start();
    let links = format!(
        concat!(
            r#"{{"url": null, "label": "&laquo; Previous", "active": false}}, "#,
            r#"{{"url": "{base}/blogs?page=1", "label": "1", "active": true}}, "#,
            r#"{{"url": "{base}/blogs?page=2", "label": "2", "active": false}}, "#,
            r#"{{"url": "{base}/blogs?page=2", "label": "Next &raquo;", "active": false}}"#
        ),
        base = server.base_url()
    );
    let page_one = server.mock(|when, then| {
        when.method("GET").path("/blogs").query_param("page", "1");
        then.status(200)
            .header("content-type", "application/json")
            .body(envelope(&[1, 2], 1, 2, &links));
    });
    let page_two = server.mock(|when, then| {
        when.method("GET").path("/blogs").query_param("page", "2");
        then.status(200)
            .header("content-type", "application/json")
            .body(envelope(&[3], 2, 2, ""));
    });

    let mut session = ListSession::new(client(&server));
    session.load().await;
    assert_eq!(session.list().phase(), &Phase::Ready);
    assert_eq!(session.list().posts().len(), 2);
    assert_eq!(session.list().window().links.len(), 4);

    // the trailing "Next" link resolves via its page query parameter
    session.follow_link(3).await;
    assert_eq!(session.list().window().current_page, 2);
    assert_eq!(session.list().posts()[0].id, 3);

    page_one.assert();
    page_two.assert();
}

#[tokio::test]
async fn search_change_on_a_deep_page_resets_to_page_one() {
    let server = MockServer::start();
    let deep = server.mock(|when, then| {
        when.method("GET")
            .path("/blogs")
            .query_param("page", "3")
            .query_param_missing("search");
        then.status(200)
            .header("content-type", "application/json")
            .body(envelope(&[7], 3, 5, ""));
    });
    let filtered = server.mock(|when, then| {
        when.method("GET")
            .path("/blogs")
            .query_param("page", "1")
            .query_param("search", "cat");
        then.status(200)
            .header("content-type", "application/json")
            .body(envelope(&[9], 1, 1, ""));
    });

    let mut session = ListSession::with_query(client(&server), 3, "");
    session.load().await;
    session.search("cat").await;

    assert_eq!(session.list().window().current_page, 1);
    assert_eq!(session.list().search(), "cat");
    deep.assert();
    filtered.assert();
}

#[tokio::test]
async fn fetch_failure_enters_error_and_next_trigger_recovers() {
    let server = MockServer::start();
    let mut failing = server.mock(|when, then| {
        when.method("GET").path("/blogs");
        then.status(503);
    });

    let mut session = ListSession::new(client(&server));
    session.load().await;
    match session.list().phase() {
        Phase::Error(message) => assert!(message.contains("failed to load posts")),
        other => panic!("expected error phase, got {other:?}"),
    }

    failing.delete();
    server.mock(|when, then| {
        when.method("GET").path("/blogs");
        then.status(200)
            .header("content-type", "application/json")
            .body(envelope(&[1], 1, 1, ""));
    });

    session.go_to_page(1).await;
    assert_eq!(session.list().phase(), &Phase::Ready);
    assert_eq!(session.list().posts().len(), 1);
}

#[tokio::test]
async fn malformed_envelope_does_not_corrupt_loaded_state() {
    let server = MockServer::start();
    let mut good = server.mock(|when, then| {
        when.method("GET").path("/blogs").query_param("page", "1");
        then.status(200)
            .header("content-type", "application/json")
            .body(envelope(&[1, 2], 1, 2, ""));
    });

    let mut session = ListSession::new(client(&server));
    session.load().await;
    assert_eq!(session.list().posts().len(), 2);
    good.delete();

    server.mock(|when, then| {
        when.method("GET").path("/blogs").query_param("page", "2");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"current_page": 2, "last_page": 2}"#);
    });
    session.go_to_page(2).await;

    match session.list().phase() {
        Phase::Error(message) => assert!(message.contains("data")),
        other => panic!("expected error phase, got {other:?}"),
    }
    // the last good post set is still there for the surface to fall back on
    assert_eq!(session.list().posts().len(), 2);
}

#[tokio::test]
async fn failed_submit_keeps_typed_draft_and_visible_list() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/blogs");
        then.status(200)
            .header("content-type", "application/json")
            .body(envelope(&[1], 1, 1, ""));
    });
    server.mock(|when, then| {
        when.method("POST").path("/blogs");
        then.status(422)
            .header("content-type", "application/json")
            .body(r#"{"message": "The title field is invalid."}"#);
    });

    let mut session = AdminSession::new(client(&server));
    session.load().await;
    session.form_mut().draft_mut().title = "My Draft".to_string();
    session.form_mut().draft_mut().content = "typed content".to_string();

    assert!(!session.submit().await);
    let notice = session.notice().expect("notice");
    assert!(notice.is_error());
    assert!(notice.message().contains("The title field is invalid."));
    assert_eq!(session.form().draft().content, "typed content");
    assert_eq!(session.list().phase(), &Phase::Ready);
}

#[tokio::test]
async fn delete_with_items_remaining_refetches_same_page() {
    let server = MockServer::start();
    let page_two = server.mock(|when, then| {
        when.method("GET").path("/blogs").query_param("page", "2");
        then.status(200)
            .header("content-type", "application/json")
            .body(envelope(&[5, 6], 2, 2, ""));
    });
    let deleted = server.mock(|when, then| {
        when.method("DELETE").path("/blogs/5");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"message": "deleted"}"#);
    });

    let mut session = AdminSession::with_query(client(&server), 2, "");
    session.load().await;
    session.request_delete(5);
    assert!(session.confirm_delete().await);

    assert_eq!(session.list().window().current_page, 2);
    deleted.assert();
    page_two.assert_hits(2);
}

#[tokio::test]
async fn deleting_sole_item_on_trailing_page_lands_on_previous_page() {
    let server = MockServer::start();
    let page_two = server.mock(|when, then| {
        when.method("GET").path("/blogs").query_param("page", "2");
        then.status(200)
            .header("content-type", "application/json")
            .body(envelope(&[42], 2, 2, ""));
    });
    let deleted = server.mock(|when, then| {
        when.method("DELETE").path("/blogs/42");
        then.status(204);
    });
    let page_one = server.mock(|when, then| {
        when.method("GET").path("/blogs").query_param("page", "1");
        then.status(200)
            .header("content-type", "application/json")
            .body(envelope(&[1, 2], 1, 1, ""));
    });

    let mut session = AdminSession::with_query(client(&server), 2, "");
    session.load().await;
    session.request_delete(42);
    assert!(session.confirm_delete().await);

    assert_eq!(session.list().window().current_page, 1);
    assert_eq!(session.list().posts().len(), 2);
    page_two.assert();
    deleted.assert();
    page_one.assert();
}
