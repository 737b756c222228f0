//! Fetcher against a wiremock image host.

use reel_scout::agent::fetcher::Fetcher;
use reel_scout::agent::types::{CandidatePool, ImageCandidate, ProviderKind};
use std::path::Path;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

fn candidate(server: &MockServer, id: &str) -> ImageCandidate {
    ImageCandidate {
        provider: ProviderKind::Pexels,
        id: id.to_string(),
        url: format!("{}/img/{id}", server.uri()),
        width: 1080,
        height: 1920,
        photographer: None,
        page_url: None,
    }
}

fn pool(server: &MockServer, ids: &[&str]) -> CandidatePool {
    let mut pool = CandidatePool::with_cap(ids.len());
    for id in ids {
        pool.offer(candidate(server, id));
    }
    pool
}

async fn mount_body(server: &MockServer, id: &str, content_type: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(format!("/img/{id}")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", content_type)
                .set_body_bytes(body),
        )
        .mount(server)
        .await;
}

fn exists(dir: &Path, name: &str) -> bool {
    dir.join(name).is_file()
}

#[tokio::test]
async fn test_oversized_image_is_rejected_and_absent() {
    let server = MockServer::start().await;
    let out = tempfile::tempdir().unwrap();

    mount_body(&server, "1", "image/jpeg", JPEG.to_vec()).await;
    let mut oversized = JPEG.to_vec();
    oversized.resize(4096, 0);
    mount_body(&server, "2", "image/jpeg", oversized).await;
    mount_body(&server, "3", "image/jpeg", JPEG.to_vec()).await;

    let fetcher = Fetcher::new(Duration::from_secs(5), 2).unwrap().with_max_bytes(1024);
    let results = fetcher
        .fetch_all(&pool(&server, &["1", "2", "3"]), out.path())
        .await
        .unwrap();

    let indices: Vec<usize> = results.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
    assert!(results[0].succeeded());
    assert!(results[2].succeeded());
    let failure = results[1].failure.as_deref().unwrap();
    assert!(failure.contains("too large"), "unexpected failure: {failure}");

    assert!(exists(out.path(), "01_pexels_1.jpg"));
    assert!(!exists(out.path(), "02_pexels_2.jpg"));
    assert!(exists(out.path(), "03_pexels_3.jpg"));
    let leftovers: Vec<_> = std::fs::read_dir(out.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_extension_follows_content_type() {
    let server = MockServer::start().await;
    let out = tempfile::tempdir().unwrap();

    mount_body(&server, "w", "image/webp", b"RIFF\0\0\0\0WEBPVP8 ".to_vec()).await;
    mount_body(&server, "o", "application/octet-stream", JPEG.to_vec()).await;

    let fetcher = Fetcher::new(Duration::from_secs(5), 4).unwrap();
    let results = fetcher
        .fetch_all(&pool(&server, &["w", "o"]), out.path())
        .await
        .unwrap();

    assert!(results.iter().all(|r| r.succeeded()));
    assert!(exists(out.path(), "01_pexels_w.webp"));
    assert!(exists(out.path(), "02_pexels_o.jpg"));
    assert_eq!(results[0].bytes, 16);
    assert!(results[0].sha256.is_some());
}

#[tokio::test]
async fn test_executable_payload_is_rejected() {
    let server = MockServer::start().await;
    let out = tempfile::tempdir().unwrap();

    mount_body(&server, "x", "image/jpeg", b"MZ\x90\0\x03".to_vec()).await;

    let fetcher = Fetcher::new(Duration::from_secs(5), 1).unwrap();
    let results = fetcher.fetch_all(&pool(&server, &["x"]), out.path()).await.unwrap();

    assert!(!results[0].succeeded());
    assert!(!exists(out.path(), "01_pexels_x.jpg"));
}
