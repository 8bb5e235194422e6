//! Tests for `NetworkAssets` against a throwaway local HTTP server.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use flag_assets::{AssetConfig, NetworkAssets};
use renderer::png::create_png_rgb;
use renderer::{AssetProvider, RenderAssets};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

// ============================================================================
// Helper functions
// ============================================================================

/// Serve every connection with the same status line and body.
async fn serve_fixed(status: &'static str, body: Vec<u8>) -> SocketAddr {
    serve_counted(status, body).await.0
}

/// Like [`serve_fixed`], also counting accepted connections.
async fn serve_counted(status: &'static str, body: Vec<u8>) -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&accepted);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            counter.fetch_add(1, Ordering::SeqCst);
            let body = body.clone();
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let head = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    body.len()
                );
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(&body).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, accepted)
}

fn config_for(addr: SocketAddr, font_dir: &std::path::Path) -> AssetConfig {
    AssetConfig {
        font_url: format!("http://{}/font.ttf", addr),
        icon_url_template: format!("http://{}/icons/{{code}}.png", addr),
        font_dir: Some(font_dir.to_path_buf()),
        font_file_name: "flag-test-font.ttf".to_string(),
        icon_timeout: Duration::from_secs(2),
        font_timeout: Duration::from_secs(2),
        ..AssetConfig::default()
    }
}

fn small_png() -> Vec<u8> {
    let pixels: Vec<u8> = (0..6 * 4).flat_map(|_| [40u8, 90, 200]).collect();
    create_png_rgb(&pixels, 6, 4).unwrap()
}

// ============================================================================
// Icons
// ============================================================================

#[tokio::test]
async fn test_icon_fetched_and_decoded() {
    let addr = serve_fixed("200 OK", small_png()).await;
    let dir = test_utils::temp_dir();
    let assets = NetworkAssets::new(config_for(addr, dir.path()));

    let icon = assets.icon("1f54a").await.expect("icon should be served");
    assert_eq!(icon.dimensions(), (6, 4));
    assert_eq!(icon.get_pixel(0, 0).0, [40, 90, 200, 255]);
}

#[tokio::test]
async fn test_icon_error_status_is_unavailable() {
    let addr = serve_fixed("404 Not Found", b"missing".to_vec()).await;
    let dir = test_utils::temp_dir();
    let assets = NetworkAssets::new(config_for(addr, dir.path()));
    assert!(assets.icon("1f54a").await.is_none());
}

#[tokio::test]
async fn test_icon_garbage_is_unavailable() {
    let addr = serve_fixed("200 OK", b"not an image".to_vec()).await;
    let dir = test_utils::temp_dir();
    let assets = NetworkAssets::new(config_for(addr, dir.path()));
    assert!(assets.icon("1f54a").await.is_none());
}

#[tokio::test]
async fn test_icon_unreachable_host_is_unavailable() {
    // Bind and drop to get a port nothing listens on
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let dir = test_utils::temp_dir();
    let assets = NetworkAssets::new(config_for(addr, dir.path()));
    assert!(assets.icon("1f54a").await.is_none());
}

// ============================================================================
// Font
// ============================================================================

#[tokio::test]
async fn test_unparseable_font_download_is_not_persisted() {
    let addr = serve_fixed("200 OK", b"not a font".to_vec()).await;
    let dir = test_utils::temp_dir();
    let assets = NetworkAssets::new(config_for(addr, dir.path()));

    assert!(assets.font().await.is_none());
    assert!(!dir.path().join("flag-test-font.ttf").exists());
}

#[tokio::test]
async fn test_failed_font_download_is_retried() {
    let (addr, accepted) = serve_counted("200 OK", b"not a font".to_vec()).await;
    let dir = test_utils::temp_dir();
    let assets = NetworkAssets::new(config_for(addr, dir.path()));

    assert!(assets.font().await.is_none());
    assert!(assets.font().await.is_none());
    assert_eq!(accepted.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_font_found_after_earlier_failure() {
    let Some(system_font) = test_utils::system_font() else {
        eprintln!("skipping: no TrueType font installed");
        return;
    };
    let (addr, accepted) = serve_counted("503 Service Unavailable", Vec::new()).await;
    let dir = test_utils::temp_dir();
    let assets = NetworkAssets::new(config_for(addr, dir.path()));

    assert!(assets.font().await.is_none());

    let placed = dir.path().join("flag-test-font.ttf");
    std::fs::copy(&system_font, &placed).unwrap();
    let face = assets.font().await.expect("font on disk should be picked up");
    assert!(!face.is_builtin());

    // Resolved once, the face no longer depends on the file
    std::fs::remove_file(&placed).unwrap();
    assert!(assets.font().await.is_some());
    assert_eq!(accepted.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_offline_falls_back_to_builtin() {
    let dir = test_utils::temp_dir();
    let config = AssetConfig {
        font_dir: Some(dir.path().to_path_buf()),
        font_file_name: "flag-test-font.ttf".to_string(),
        ..AssetConfig::offline(Some(dir.path().join("missing.ttf")))
    };
    let assets = NetworkAssets::new(config);

    let resolved = RenderAssets::resolve(&assets, "1f54a").await;
    assert!(resolved.typeface.is_builtin());
    assert!(resolved.badge.is_none());
}
