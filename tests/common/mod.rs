#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use image::{ImageFormat, Rgba, RgbaImage};
use musiclist::clients::entities::MusicRecord;
use tokio::sync::Notify;

/// Serve `router` on an ephemeral local port.
pub async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// An address nothing listens on.
pub async fn dead_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// An address that accepts connections and never answers.
pub async fn hung_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr
}

pub fn png(shade: u8) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbaImage::from_pixel(2, 2, Rgba([shade, shade, shade, 255]))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

pub fn record(song: &str, image_url: Option<String>) -> MusicRecord {
    MusicRecord {
        song_name: Some(song.to_string()),
        image_url,
        ..Default::default()
    }
}

/// Fake iTunes search endpoint plus an artwork host.
#[derive(Default)]
pub struct FakeItunes {
    /// Canned JSON bodies by search term. Unknown terms echo the term back.
    pub bodies: HashMap<String, String>,
    /// Artwork bytes by file name.
    pub artwork: HashMap<String, Vec<u8>>,
    /// Artwork requests that wait for a notification before answering.
    pub gates: HashMap<String, Arc<Notify>>,
    pub search_hits: AtomicUsize,
}

impl FakeItunes {
    pub fn router(self: Arc<Self>) -> Router {
        Router::new()
            .route("/search", get(search))
            .route("/empty", get(|| async { StatusCode::OK }))
            .route("/garbage", get(|| async { "<html>maintenance</html>" }))
            .route("/broken", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route("/art/{name}", get(artwork))
            .with_state(self)
    }

    pub async fn start(self) -> (SocketAddr, Arc<Self>) {
        let fake = Arc::new(self);
        let addr = serve(Arc::clone(&fake).router()).await;
        (addr, fake)
    }

    pub fn hits(&self) -> usize {
        self.search_hits.load(Ordering::SeqCst)
    }
}

async fn search(
    State(fake): State<Arc<FakeItunes>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    fake.search_hits.fetch_add(1, Ordering::SeqCst);
    if params.get("media").map(String::as_str) != Some("music") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    let Some(term) = params.get("term") else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let body = match fake.bodies.get(term) {
        Some(body) => body.clone(),
        None => serde_json::json!({
            "resultCount": 1,
            "results": [{ "trackName": term }],
        })
        .to_string(),
    };
    ([(header::CONTENT_TYPE, "text/javascript")], body).into_response()
}

async fn artwork(State(fake): State<Arc<FakeItunes>>, Path(name): Path<String>) -> Response {
    if let Some(gate) = fake.gates.get(&name) {
        gate.notified().await;
    }
    match fake.artwork.get(&name) {
        Some(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
