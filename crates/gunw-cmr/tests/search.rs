//! Granule search against a mock CMR.

use gunw_cmr::search::SEARCH_AFTER_HEADER;
use gunw_cmr::{CmrClient, CmrError, Collection, IdentifierField, SearchQuery};
use gunw_core::retry::RetryPolicy;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn feed(ids: &[&str], field: &str) -> serde_json::Value {
    let entries: Vec<_> = ids.iter().map(|id| json!({ field: id, "id": "G1-ASF" })).collect();
    json!({ "feed": { "entry": entries } })
}

fn concept_query() -> SearchQuery {
    SearchQuery::new(Collection::ConceptId("C1595422627-ASF".to_string()))
}

#[tokio::test]
async fn follows_search_after_across_two_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/granules.json"))
        .and(header(SEARCH_AFTER_HEADER, "[\"token-1\"]"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(feed(&["S1-GUNW-C", "S1-GUNW-D"], "producer_granule_id")),
        )
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/granules.json"))
        .and(query_param("provider", "ASF"))
        .and(query_param("collection_concept_id", "C1595422627-ASF"))
        .and(query_param("page_size", "2000"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(SEARCH_AFTER_HEADER, "[\"token-1\"]")
                .set_body_json(feed(&["S1-GUNW-A", "S1-GUNW-B"], "producer_granule_id")),
        )
        .with_priority(5)
        .expect(1)
        .mount(&server)
        .await;

    let client = CmrClient::new(&server.uri(), RetryPolicy::none()).unwrap();
    let ids = client.product_ids(&concept_query()).await.unwrap();

    assert_eq!(ids, vec!["S1-GUNW-A", "S1-GUNW-B", "S1-GUNW-C", "S1-GUNW-D"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn short_name_and_title_variant() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/granules.json"))
        .and(query_param("short_name", "ARIA_S1_GUNW"))
        .and(query_param("provider", "ASF"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed(&["S1-GUNW-T"], "title")))
        .expect(1)
        .mount(&server)
        .await;

    let client = CmrClient::new(&server.uri(), RetryPolicy::none()).unwrap();
    let mut query = SearchQuery::new(Collection::ShortName("ARIA_S1_GUNW".to_string()));
    query.identifier = IdentifierField::Title;

    let ids = client.product_ids(&query).await.unwrap();
    assert_eq!(ids, vec!["S1-GUNW-T"]);
}

#[tokio::test]
async fn empty_feed_yields_no_ids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/granules.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "feed": { "entry": [] } })))
        .mount(&server)
        .await;

    let client = CmrClient::new(&server.uri(), RetryPolicy::none()).unwrap();
    assert!(client.product_ids(&concept_query()).await.unwrap().is_empty());
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/granules.json"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad collection"))
        .expect(1)
        .mount(&server)
        .await;

    let client = CmrClient::new(&server.uri(), RetryPolicy::none().with_max_attempts(3)).unwrap();
    let err = client.product_ids(&concept_query()).await.unwrap_err();

    assert!(matches!(err, CmrError::HttpStatus { status: 400, .. }));
}

#[tokio::test]
async fn failure_on_second_page_discards_first() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/granules.json"))
        .and(header(SEARCH_AFTER_HEADER, "next"))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/granules.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(SEARCH_AFTER_HEADER, "next")
                .set_body_json(feed(&["S1-GUNW-A"], "producer_granule_id")),
        )
        .with_priority(5)
        .mount(&server)
        .await;

    let client = CmrClient::new(&server.uri(), RetryPolicy::none()).unwrap();
    let err = client.product_ids(&concept_query()).await.unwrap_err();

    assert!(matches!(err, CmrError::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn entry_without_identifier_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/granules.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed(&["S1-GUNW-A"], "title")))
        .mount(&server)
        .await;

    let client = CmrClient::new(&server.uri(), RetryPolicy::none()).unwrap();
    let err = client.product_ids(&concept_query()).await.unwrap_err();

    assert!(matches!(
        err,
        CmrError::MissingIdentifier {
            field: "producer_granule_id"
        }
    ));
}

#[tokio::test]
async fn server_error_is_retried_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/granules.json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/granules.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(feed(&["S1-GUNW-A", "S1-GUNW-B"], "producer_granule_id")),
        )
        .with_priority(5)
        .mount(&server)
        .await;

    let client = CmrClient::new(&server.uri(), RetryPolicy::none().with_max_attempts(3)).unwrap();
    let ids = client.product_ids(&concept_query()).await.unwrap();

    assert_eq!(ids, vec!["S1-GUNW-A", "S1-GUNW-B"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn server_error_gives_up_after_max_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/granules.json"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let client = CmrClient::new(&server.uri(), RetryPolicy::none().with_max_attempts(3)).unwrap();
    let err = client.product_ids(&concept_query()).await.unwrap_err();

    assert!(matches!(err, CmrError::HttpStatus { status: 503, .. }));
}
