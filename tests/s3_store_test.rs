use std::collections::HashMap;

use httpmock::prelude::*;
use httpmock::Method::HEAD;
use storegate::{DataFormat, S3Config, S3Store, StoreBackend, StoreError, UploadOptions};
use tempfile::TempDir;

// The endpoint override switches the client to path-style addressing, so
// every object lands under /test-bucket/{name} on the mock server.
fn store_for(server: &MockServer) -> S3Store {
    S3Store::new(S3Config {
        access_key: "test-access".to_string(),
        secret_key: "test-secret".to_string(),
        bucket: "test-bucket".to_string(),
        region: "us-west-2".to_string(),
        endpoint: Some(server.base_url()),
    })
    .unwrap()
}

#[tokio::test]
async fn test_put_text_writes_object_with_plain_content_type() {
    let server = MockServer::start();
    let put_mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/test-bucket/report.json")
            .header("content-type", "text/plain")
            .body("{\"total\":7}");
        then.status(200);
    });

    let store = store_for(&server);
    store.put_text("report.json", "{\"total\":7}").await.unwrap();

    put_mock.assert();
}

#[tokio::test]
async fn test_get_text_returns_object_body() {
    let server = MockServer::start();
    let get_mock = server.mock(|when, then| {
        when.method(GET).path("/test-bucket/notes.txt");
        then.status(200).body("hello world");
    });

    let store = store_for(&server);
    // This backend stores text either way; the format only matters to the
    // central decoder.
    let text = store.get_text("notes.txt", DataFormat::Text).await.unwrap();

    assert_eq!(text, "hello world");
    get_mock.assert();
}

#[tokio::test]
async fn test_get_text_rejects_non_utf8_objects() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/test-bucket/blob.bin");
        then.status(200).body([0xffu8, 0xfe, 0xfd]);
    });

    let store = store_for(&server);
    let err = store
        .get_text("blob.bin", DataFormat::Text)
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(
        message.starts_with("[Store Get Error]"),
        "unexpected message: {message}"
    );
    assert!(
        message.contains("invalid utf-8"),
        "unexpected message: {message}"
    );
}

#[tokio::test]
async fn test_missing_objects_fail_with_the_service_code() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/test-bucket/absent.txt");
        then.status(404)
            .header("content-type", "application/xml")
            .body(concat!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>",
                "<Error><Code>NoSuchKey</Code>",
                "<Message>The specified key does not exist.</Message></Error>",
            ));
    });

    let store = store_for(&server);
    let err = store
        .get_text("absent.txt", DataFormat::Text)
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(
        message.starts_with("[Store Get Error]"),
        "unexpected message: {message}"
    );
    assert!(
        message.contains("NoSuchKey"),
        "unexpected message: {message}"
    );
}

#[tokio::test]
async fn test_upload_file_forwards_acl_content_type_and_metadata() {
    let temp_dir = TempDir::new().unwrap();
    let local_path = temp_dir.path().join("photo.png");
    std::fs::write(&local_path, "png bytes").unwrap();

    let server = MockServer::start();
    let upload_mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/test-bucket/img/photo.png")
            .header("content-type", "image/png")
            .header("x-amz-acl", "public-read")
            .header("x-amz-meta-owner", "watchdog")
            .body("png bytes");
        then.status(200);
    });

    let store = store_for(&server);
    let options = UploadOptions {
        content_type: Some("image/png".to_string()),
        acl: Some("public-read".to_string()),
        metadata: HashMap::from([("owner".to_string(), "watchdog".to_string())]),
    };
    store
        .upload_file_with(local_path.to_str().unwrap(), "img/photo.png", options)
        .await
        .unwrap();

    upload_mock.assert();
}

#[tokio::test]
async fn test_upload_file_fails_when_local_file_is_missing() {
    let server = MockServer::start();
    let store = store_for(&server);

    let err = store
        .upload_file("/definitely/not/here.bin", "here.bin")
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("[Store Upload Error]"));
}

#[tokio::test]
async fn test_download_file_writes_object_and_creates_parents() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/test-bucket/backup.json");
        then.status(200).body("{\"restored\":true}");
    });

    let temp_dir = TempDir::new().unwrap();
    let local_path = temp_dir.path().join("nested/dir/backup.json");

    let store = store_for(&server);
    store
        .download_file("backup.json", local_path.to_str().unwrap())
        .await
        .unwrap();

    let content = std::fs::read_to_string(&local_path).unwrap();
    assert_eq!(content, "{\"restored\":true}");
}

#[tokio::test]
async fn test_head_distinguishes_absence_from_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(HEAD).path("/test-bucket/there.txt");
        then.status(200);
    });
    server.mock(|when, then| {
        when.method(HEAD).path("/test-bucket/missing.txt");
        then.status(404);
    });
    server.mock(|when, then| {
        when.method(HEAD).path("/test-bucket/flaky.txt");
        then.status(500);
    });

    let store = store_for(&server);
    assert_eq!(store.head("there.txt").await.unwrap(), true);
    assert_eq!(store.head("missing.txt").await.unwrap(), false);

    let err = store.head("flaky.txt").await.unwrap_err();
    assert!(err.to_string().starts_with("[Store Head Error]"));
    // exists() collapses the failure into "not there".
    assert!(!store.exists("flaky.txt").await);
}

#[tokio::test]
async fn test_new_rejects_blank_credentials_and_bad_bucket_names() {
    let config = S3Config {
        access_key: "test-access".to_string(),
        secret_key: "test-secret".to_string(),
        bucket: "test-bucket".to_string(),
        region: "us-west-2".to_string(),
        endpoint: None,
    };

    let blank_key = S3Config {
        access_key: "   ".to_string(),
        ..config.clone()
    };
    let err = S3Store::new(blank_key).unwrap_err();
    assert!(matches!(err, StoreError::InvalidConfigValue { .. }));
    assert!(err.is_config());

    let bad_bucket = S3Config {
        bucket: "Bad_Bucket".to_string(),
        ..config
    };
    assert!(S3Store::new(bad_bucket).is_err());
}
