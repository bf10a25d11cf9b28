use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jackalpin::{ErrorKind, FileUploadRequest, JackalPin, JackalPinError};

fn client_for(server: &MockServer) -> JackalPin {
    JackalPin::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .build()
}

#[tokio::test]
async fn queue_size_works_without_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/queue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"size": 3})))
        .expect(1)
        .mount(&server)
        .await;

    let client = JackalPin::builder().base_url(server.uri()).build();
    let queue = client.get_queue_size().await.expect("queue should succeed");
    assert_eq!(queue.size, 3);

    // No credential set, so no auth header may go out on the wire.
    let requests = server.received_requests().await.expect("requests recorded");
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn missing_key_fails_before_any_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = JackalPin::builder().base_url(server.uri()).build();
    let err = client.list_files(None, None, None).await.unwrap_err();

    assert!(matches!(err, JackalPinError::MissingApiKey));
    assert_eq!(err.kind(), ErrorKind::Auth);
    assert!(
        server
            .received_requests()
            .await
            .expect("requests recorded")
            .is_empty()
    );
}

#[tokio::test]
async fn bearer_header_is_attached_to_authenticated_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/test"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "key is valid"})))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).test_key().await.expect("test_key");
    assert_eq!(response.message, "key is valid");
}

#[tokio::test]
async fn rejected_credential_surfaces_as_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/test"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "invalid or expired key"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).test_key().await.unwrap_err();
    match err {
        JackalPinError::Unauthorized { ref message, .. } => {
            assert_eq!(message, "invalid or expired key");
        }
        other => panic!("expected Unauthorized, got {other:?}"),
    }
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn create_then_list_keys_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/keys/deploy-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": "deploy-key", "key": "jwt-secret"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/keys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "keys": [{"name": "deploy-key", "created_at": "2024-01-01T00:00:00Z"}],
            "count": 1
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client.create_key("deploy-key").await.expect("create_key");
    assert_eq!(created.name, "deploy-key");
    assert_eq!(created.key, "jwt-secret");

    let listed = client.list_keys(None, None).await.expect("list_keys");
    let matching = listed
        .keys
        .iter()
        .filter(|k| k.name == created.name)
        .count();
    assert_eq!(matching, 1, "created key should appear exactly once");
}

#[tokio::test]
async fn key_names_are_percent_encoded_in_the_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/keys/ci%20key"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .delete_key("ci key")
        .await
        .expect("delete_key");
}

#[tokio::test]
async fn list_files_sends_pagination_and_filter_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .and(query_param("page", "0"))
        .and(query_param("limit", "10"))
        .and(query_param("name", "report.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [{
                "id": 7,
                "file_name": "report.pdf",
                "cid": "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi",
                "size": 2048,
                "created_at": "2024-03-01T12:00:00Z"
            }],
            "count": 37
        })))
        .mount(&server)
        .await;

    let page = client_for(&server)
        .list_files(Some(0), Some(10), Some("report.pdf"))
        .await
        .expect("list_files");

    assert_eq!(page.files.len(), 1);
    assert_eq!(page.files[0].file_name, "report.pdf");
    // Total comes from the server, never from the page length.
    assert_eq!(page.count, 37);
}

#[tokio::test]
async fn list_files_omits_unset_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"files": [], "count": 0})),
        )
        .mount(&server)
        .await;

    client_for(&server)
        .list_files(None, None, None)
        .await
        .expect("list_files");

    let requests = server.received_requests().await.expect("requests recorded");
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn upload_returns_non_empty_cid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "hello.txt",
            "cid": "bafkreibm6jg3ux5qumhcn2b3flc3tyu6dmlb4xa7u5bf44yegnrjhc4yeq",
            "merkle": "0a1b2c"
        })))
        .mount(&server)
        .await;

    let upload = client_for(&server)
        .upload_file(&FileUploadRequest::new(b"hello".to_vec(), "hello.txt"))
        .await
        .expect("upload_file");

    assert!(!upload.cid.is_empty());
    assert_eq!(upload.name, "hello.txt");
    assert_eq!(upload.id, None);
}

#[tokio::test]
async fn upload_files_accepts_single_object_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "a.txt",
            "cid": "bafkreia",
            "merkle": "aa",
            "id": 12
        })))
        .mount(&server)
        .await;

    let uploads = client_for(&server)
        .upload_files(&[FileUploadRequest::new(b"a".to_vec(), "a.txt")])
        .await
        .expect("upload_files");

    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].id, Some(12));
}

#[tokio::test]
async fn upload_files_accepts_list_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "a.txt", "cid": "bafkreia", "merkle": "aa"},
            {"name": "b.txt", "cid": "bafkreib", "merkle": "bb"}
        ])))
        .mount(&server)
        .await;

    let uploads = client_for(&server)
        .upload_files(&[
            FileUploadRequest::new(b"a".to_vec(), "a.txt"),
            FileUploadRequest::new(b"b".to_vec(), "b.txt"),
        ])
        .await
        .expect("upload_files");

    assert_eq!(uploads.len(), 2);
    assert_eq!(uploads[1].cid, "bafkreib");
}

#[tokio::test]
async fn deleting_unknown_file_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/files/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "file not found"})))
        .mount(&server)
        .await;

    let err = client_for(&server).delete_file(42).await.unwrap_err();
    assert!(matches!(err, JackalPinError::NotFound { .. }));
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
}

#[tokio::test]
async fn clone_sends_link_in_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/clone"))
        .and(body_json(json!({"link": "https://example.com/a.png"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "a.png",
            "cid": "bafkreic",
            "merkle": "cc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cloned = client_for(&server)
        .clone_file("https://example.com/a.png")
        .await
        .expect("clone_file");
    assert_eq!(cloned.cid, "bafkreic");
}

#[tokio::test]
async fn pin_by_cid_posts_to_pin_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pin/bafkreid"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .pin_by_cid("bafkreid")
        .await
        .expect("pin_by_cid");
}

#[tokio::test]
async fn collection_membership_operations_hit_exact_paths() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/collections/7/9"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/collections/7/9"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/collections/7/c/8"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.add_file_to_collection(7, 9).await.expect("add file");
    client
        .remove_file_from_collection(7, 9)
        .await
        .expect("remove file");
    client
        .add_collection_reference(7, 8)
        .await
        .expect("add reference");
}

#[tokio::test]
async fn get_collection_decodes_nested_contents() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collections/7"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [{
                "id": 9,
                "file_name": "notes.md",
                "cid": "bafkreie",
                "size": 100,
                "created_at": "2024-03-02T08:30:00Z"
            }],
            "count": 1,
            "collections": [{"name": "nested", "id": 8, "cid": "bafkreif"}],
            "name": "docs",
            "cid": "bafkreig"
        })))
        .mount(&server)
        .await;

    let detail = client_for(&server)
        .get_collection(7, None, Some(5))
        .await
        .expect("get_collection");

    assert_eq!(detail.name, "docs");
    assert_eq!(detail.files[0].file_name, "notes.md");
    assert_eq!(detail.collections[0].id, 8);
}

#[tokio::test]
async fn checkout_sends_count_and_returns_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payment/checkout/price_monthly_1tb"))
        .and(query_param("count", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "cs_test_123"})))
        .expect(1)
        .mount(&server)
        .await;

    let session = client_for(&server)
        .create_checkout_session("price_monthly_1tb", 2)
        .await
        .expect("create_checkout_session");
    assert!(!session.id.is_empty());
}

#[tokio::test]
async fn checkout_omits_count_of_one() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payment/checkout/price_monthly_1tb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "cs_test_456"})))
        .mount(&server)
        .await;

    client_for(&server)
        .create_checkout_session("price_monthly_1tb", 1)
        .await
        .expect("create_checkout_session");

    let requests = server.received_requests().await.expect("requests recorded");
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn checkout_payment_required_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payment/checkout/price_monthly_1tb"))
        .respond_with(
            ResponseTemplate::new(402).set_body_json(json!({"message": "payment required"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_checkout_session("price_monthly_1tb", 2)
        .await
        .unwrap_err();

    assert!(matches!(err, JackalPinError::Api { status: 402, .. }));
    assert_eq!(err.status_code(), Some(402));
}

#[tokio::test]
async fn server_errors_are_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/usage"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"message": "maintenance"})))
        .mount(&server)
        .await;

    let err = client_for(&server).get_usage().await.unwrap_err();
    assert!(matches!(err, JackalPinError::Server { status: 503, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn account_endpoints_decode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts/usage"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"bytes_allowed": 1_000_000, "bytes_used": 2048})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts/id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "acct_hash"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/payment/manage"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"url": "https://billing.stripe.com/p/session"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.create_account().await.expect("create_account");

    let usage = client.get_usage().await.expect("get_usage");
    assert_eq!(usage.bytes_used, 2048);
    assert!(usage.bytes_used <= usage.bytes_allowed);

    let account = client.get_account_id().await.expect("get_account_id");
    assert_eq!(account.id, "acct_hash");

    let portal = client
        .get_billing_portal_url()
        .await
        .expect("get_billing_portal_url");
    assert!(portal.url.starts_with("https://"));
}

#[tokio::test]
async fn undecodable_success_body_is_unexpected_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/queue"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = JackalPin::builder().base_url(server.uri()).build();
    let err = client.get_queue_size().await.unwrap_err();
    assert!(matches!(err, JackalPinError::UnexpectedResponse(_)));
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    // Port 1 is never listening.
    let client = JackalPin::builder()
        .api_key("test-key")
        .base_url("http://127.0.0.1:1")
        .build();

    let err = client.test_key().await.unwrap_err();
    assert!(matches!(err, JackalPinError::ReqwestError(_)));
    assert_eq!(err.status_code(), None);
    assert_eq!(err.kind(), ErrorKind::Network);
}
