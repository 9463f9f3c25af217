// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Web front-end for the gallery

pub mod templates;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use minijinja::{context, Environment, Value};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{debug, error, info};

use crate::catalog::{Catalog, CatalogProvider, Category, ImageDescriptor};
use crate::config::AppConfig;
use crate::navigator::{self, Position};
use crate::share::{self, ShareLinks};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub catalog: CatalogProvider,
    templates: Environment<'static>,
}

impl AppState {
    pub fn new(config: AppConfig) -> crate::Result<Self> {
        Ok(Self {
            catalog: CatalogProvider::new(config.images_root.clone()),
            templates: templates::environment()?,
            config,
        })
    }

    fn render<S: Serialize>(&self, name: &str, ctx: S) -> crate::Result<String> {
        let template = self.templates.get_template(name)?;
        Ok(template.render(ctx)?)
    }

    fn page<S: Serialize>(&self, name: &str, ctx: S) -> Response {
        self.page_with_status(StatusCode::OK, name, ctx)
    }

    /// Render a page with `status`; a render failure is always a 500
    fn page_with_status<S: Serialize>(&self, status: StatusCode, name: &str, ctx: S) -> Response {
        match self.render(name, ctx) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                error!("Failed to render {}: {}", name, e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }

    fn not_found(&self) -> Response {
        self.page_with_status(
            StatusCode::NOT_FOUND,
            "not_found.html",
            context! { site_title => &self.config.gallery.site_title },
        )
    }

    /// Scheme and host share links are built against
    fn base_url(&self, headers: &HeaderMap) -> String {
        if let Some(url) = &self.config.web.public_url {
            return url.clone();
        }
        match headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
            Some(host) if is_valid_host(host) => format!("http://{}", host),
            Some(host) => {
                debug!("Ignoring malformed Host header {:?}", host);
                format!("http://{}", self.config.bind_addr())
            }
            None => {
                debug!("No Host header, using bind address for share links");
                format!("http://{}", self.config.bind_addr())
            }
        }
    }

    fn empty_text(&self, category: Category) -> String {
        format!(
            "No {} images yet. Add images to {}/",
            category,
            self.catalog.location(category).display()
        )
    }
}

/// Accept `host`, `host:port`, IPv4 and bracketed IPv6 authorities only
fn is_valid_host(host: &str) -> bool {
    !host.is_empty()
        && host.len() <= 255
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '[' | ']'))
}

/// Percent-encoded URL, marked safe so auto-escaping leaves its slashes alone
fn url_value(url: String) -> Value {
    Value::from_safe_string(url)
}

/// Create the web application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let images = ServeDir::new(state.config.images_root.clone());

    Router::new()
        // Pages
        .route("/", get(index_page))
        .route("/sphere", get(sphere_page))
        .route("/panorama", get(panorama_page))
        .route("/view/:category/:filename", get(view_page))
        .route("/download/:category/:filename", get(download_image))
        // API endpoints
        .route("/api/images", get(api_get_images))
        .route("/api/images/:category", get(api_get_category))
        .route("/api/view/:category/:filename", get(api_get_view))
        // Static files
        .nest_service("/images", images)
        .fallback(fallback_page)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// === View Models ===

#[derive(Serialize)]
struct Card<'a> {
    image: &'a ImageDescriptor,
    label: &'static str,
    src: Value,
    view_url: Value,
    download_url: Value,
    share_text: String,
}

impl<'a> Card<'a> {
    fn new(image: &'a ImageDescriptor) -> Self {
        Self {
            image,
            label: image.category.label(),
            src: url_value(share::image_url(image)),
            view_url: url_value(share::view_url(image)),
            download_url: url_value(share::download_url(image)),
            share_text: share::share_text(&image.filename),
        }
    }
}

#[derive(Serialize)]
struct Section<'a> {
    category: Category,
    heading: &'static str,
    blurb: &'static str,
    cards: Vec<Card<'a>>,
    empty_text: String,
}

fn cards(catalog: &Catalog, limit: usize) -> Vec<Card<'_>> {
    catalog.iter().take(limit).map(Card::new).collect()
}

fn listing_intro(category: Category, count: usize) -> String {
    match category {
        Category::Sphere => format!("Explore all {} immersive 360° sphere photos captured by drone", count),
        Category::Panorama => format!("Explore all {} panoramic photos captured by drone", count),
    }
}

// === Page Handlers ===

async fn index_page(State(state): State<Arc<AppState>>) -> Response {
    let sphere = state.catalog.images(Category::Sphere);
    let panorama = state.catalog.images(Category::Panorama);
    let limit = state.config.gallery.preview_limit;

    let sections: Vec<Section> = [&sphere, &panorama]
        .into_iter()
        .map(|catalog| Section {
            category: catalog.category(),
            heading: catalog.category().heading(),
            blurb: catalog.category().blurb(),
            cards: cards(catalog, limit),
            empty_text: state.empty_text(catalog.category()),
        })
        .collect();

    state.page("home.html", context! {
        site_title => &state.config.gallery.site_title,
        hero => sphere.iter().next().map(Card::new),
        sphere_total => sphere.len(),
        panorama_total => panorama.len(),
        sections => sections,
    })
}

async fn sphere_page(State(state): State<Arc<AppState>>) -> Response {
    listing_page(&state, Category::Sphere)
}

async fn panorama_page(State(state): State<Arc<AppState>>) -> Response {
    listing_page(&state, Category::Panorama)
}

fn listing_page(state: &AppState, category: Category) -> Response {
    let catalog = state.catalog.images(category);

    state.page("listing.html", context! {
        site_title => &state.config.gallery.site_title,
        heading => category.heading(),
        intro => listing_intro(category, catalog.len()),
        cards => cards(&catalog, usize::MAX),
        empty_text => state.empty_text(category),
    })
}

async fn view_page(
    State(state): State<Arc<AppState>>,
    Path((category, filename)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let Ok(category) = category.parse::<Category>() else {
        return state.not_found();
    };
    let catalog = state.catalog.images(category);
    let Some(position) = Position::resolve(catalog.images(), &filename) else {
        debug!("No {} image named {:?}", category, filename);
        return state.not_found();
    };

    let url = share::absolute_url(&state.base_url(&headers), &share::view_url(position.current));
    let links = ShareLinks::new(&url, &filename);

    state.page("viewer.html", context! {
        site_title => &state.config.gallery.site_title,
        title => share::page_title(category, &filename),
        description => share::page_description(category),
        image_src => url_value(share::image_url(position.current)),
        download_url => url_value(share::download_url(position.current)),
        close_url => url_value(format!("/{}", category)),
        previous_url => position.previous.map(|d| url_value(share::view_url(d))),
        next_url => position.next.map(|d| url_value(share::view_url(d))),
        facebook_url => url_value(links.facebook.clone()),
        whatsapp_url => url_value(links.whatsapp.clone()),
        telegram_url => url_value(links.telegram.clone()),
        share => links,
        position => position,
    })
}

async fn download_image(
    State(state): State<Arc<AppState>>,
    Path((category, filename)): Path<(String, String)>,
) -> Response {
    let Ok(category) = category.parse::<Category>() else {
        return state.not_found();
    };
    let catalog = state.catalog.images(category);
    let Some(index) = navigator::locate(catalog.images(), &filename) else {
        return state.not_found();
    };

    let image = &catalog.images()[index];
    let path = state.catalog.location(category).join(&image.filename);
    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, image.mime_type().to_string()),
                (header::CONTENT_DISPOSITION, content_disposition(&image.filename)),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            error!("Download failed for {:?}: {}", path, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn fallback_page(State(state): State<Arc<AppState>>) -> Response {
    state.not_found()
}

/// Attachment header with an ASCII fallback name and the exact UTF-8 name
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(filename)
    )
}

// === API Handlers ===

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn api_not_found(message: String) -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorResponse { error: message })).into_response()
}

async fn api_get_images(State(state): State<Arc<AppState>>) -> Json<Vec<ImageDescriptor>> {
    Json(state.catalog.all_images())
}

async fn api_get_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Response {
    match category.parse::<Category>() {
        Ok(category) => Json(state.catalog.images(category)).into_response(),
        Err(e) => api_not_found(e.to_string()),
    }
}

#[derive(Serialize)]
struct ViewResponse<'a> {
    #[serde(flatten)]
    position: Position<'a>,
    view_url: String,
    download_url: String,
    title: String,
    description: &'static str,
    share: ShareLinks,
}

async fn api_get_view(
    State(state): State<Arc<AppState>>,
    Path((category, filename)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let category = match category.parse::<Category>() {
        Ok(c) => c,
        Err(e) => return api_not_found(e.to_string()),
    };
    let catalog = state.catalog.images(category);
    let Some(position) = Position::resolve(catalog.images(), &filename) else {
        return api_not_found(format!("No {} image named {}", category, filename));
    };

    let view_url = share::view_url(position.current);
    let url = share::absolute_url(&state.base_url(&headers), &view_url);

    Json(ViewResponse {
        view_url,
        download_url: share::download_url(position.current),
        title: share::page_title(category, &filename),
        description: share::page_description(category),
        share: ShareLinks::new(&url, &filename),
        position,
    })
    .into_response()
}

/// Start the web server with the given config
pub async fn start_server(config: AppConfig) -> crate::Result<()> {
    let addr = config.bind_addr();
    info!("Serving images from {:?}", config.images_root);

    let state = Arc::new(AppState::new(config)?);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Gallery available at http://{}", addr);

    let router = create_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| crate::GalleryError::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use std::fs;
    use tempfile::{tempdir, TempDir};
    use tower::ServiceExt;

    fn gallery(sphere: &[&str], panorama: Option<&[&str]>) -> (TempDir, Router) {
        let root = tempdir().unwrap();
        let sphere_dir = root.path().join("sphere");
        fs::create_dir(&sphere_dir).unwrap();
        for name in sphere {
            fs::write(sphere_dir.join(name), name.as_bytes()).unwrap();
        }
        if let Some(names) = panorama {
            let dir = root.path().join("panorama");
            fs::create_dir(&dir).unwrap();
            for name in names {
                fs::write(dir.join(name), name.as_bytes()).unwrap();
            }
        }

        let config = AppConfig {
            images_root: root.path().to_path_buf(),
            ..AppConfig::default()
        };
        let router = create_router(Arc::new(AppState::new(config).unwrap()));
        (root, router)
    }

    async fn get(router: &Router, uri: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
        let response = router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body.to_vec())
    }

    fn text(body: &[u8]) -> String {
        String::from_utf8_lossy(body).into_owned()
    }

    #[tokio::test]
    async fn test_api_category_listing() {
        let (_root, router) = gallery(&["a.jpg", "b.png", "notes.txt"], None);

        let (status, _, body) = get(&router, "/api/images/sphere").await;
        assert_eq!(status, StatusCode::OK);
        let images: Vec<ImageDescriptor> = serde_json::from_slice(&body).unwrap();
        let mut paths: Vec<String> = images.into_iter().map(|d| d.relative_path).collect();
        paths.sort();
        assert_eq!(paths, vec!["/images/sphere/a.jpg", "/images/sphere/b.png"]);

        let (status, _, body) = get(&router, "/api/images/panorama").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text(&body), "[]");
    }

    #[tokio::test]
    async fn test_api_invalid_category() {
        let (_root, router) = gallery(&["a.jpg"], None);
        let (status, _, body) = get(&router, "/api/images/videos").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(text(&body).contains("Invalid category"));
    }

    #[tokio::test]
    async fn test_api_all_images() {
        let (_root, router) = gallery(&["s.jpg"], Some(&["p.webp"][..]));
        let (_, _, body) = get(&router, "/api/images").await;
        let images: Vec<ImageDescriptor> = serde_json::from_slice(&body).unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].category, Category::Sphere);
        assert_eq!(images[1].category, Category::Panorama);
    }

    #[tokio::test]
    async fn test_api_view_single_image() {
        let (_root, router) = gallery(&["only.jpg"], None);
        let (status, _, body) = get(&router, "/api/view/sphere/only.jpg").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["index"], 0);
        assert_eq!(json["total"], 1);
        assert_eq!(json["current"]["id"], "sphere-only.jpg");
        assert!(json["previous"].is_null());
        assert!(json["next"].is_null());
        assert_eq!(json["title"], "360° Sphere - only.jpg");
        assert_eq!(json["share"]["url"], "http://127.0.0.1:3000/view/sphere/only.jpg");
    }

    #[tokio::test]
    async fn test_api_view_neighbours_consistent() {
        let (_root, router) = gallery(&["x.jpg", "y.jpg", "z.jpg"], None);
        let (_, _, body) = get(&router, "/api/view/sphere/y.jpg").await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        let index = json["index"].as_u64().unwrap();
        assert_eq!(json["total"], 3);
        assert_eq!(json["previous"].is_null(), index == 0);
        assert_eq!(json["next"].is_null(), index == 2);
    }

    #[tokio::test]
    async fn test_api_view_miss() {
        let (_root, router) = gallery(&["x.jpg"], None);
        let (status, _, _) = get(&router, "/api/view/sphere/missing.jpg").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_view_page() {
        let (_root, router) = gallery(&["my shot.jpg"], None);
        let (status, _, body) = get(&router, "/view/sphere/my%20shot.jpg").await;
        assert_eq!(status, StatusCode::OK);

        let html = text(&body);
        assert!(html.contains("<title>360° Sphere - my shot.jpg</title>"));
        assert!(html.contains("src=\"/images/sphere/my%20shot.jpg\""));
        assert!(html.contains("href=\"/download/sphere/my%20shot.jpg\""));
        assert!(html.contains("href=\"/sphere\" title=\"Close\""));
        assert!(html.contains("href=\"https://www.facebook.com/sharer/sharer.php?u="));
        assert!(!html.contains("&#x2f;"));
        assert!(!html.contains("title=\"Previous Image\""));
        assert!(!html.contains("title=\"Next Image\""));
    }

    #[tokio::test]
    async fn test_view_page_neighbour_link_unescaped() {
        let (_root, router) = gallery(&["x.jpg", "y.jpg"], None);

        for (current, other) in [("x.jpg", "y.jpg"), ("y.jpg", "x.jpg")] {
            let (status, _, body) = get(&router, &format!("/view/sphere/{}", current)).await;
            assert_eq!(status, StatusCode::OK);

            let html = text(&body);
            assert!(html.contains(&format!("href=\"/view/sphere/{}\"", other)));
            assert!(!html.contains(&format!("href=\"/view/sphere/{}\"", current)));
        }
    }

    #[tokio::test]
    async fn test_listing_card_urls_unescaped() {
        let (_root, router) = gallery(&["it's.jpg"], None);
        let (_, _, body) = get(&router, "/sphere").await;

        let html = text(&body);
        assert!(html.contains("href=\"/view/sphere/it's.jpg\""));
        assert!(html.contains("src=\"/images/sphere/it's.jpg\""));
        assert!(html.contains("href=\"/download/sphere/it's.jpg\""));
        assert!(!html.contains("&#x2f;"));
    }

    #[tokio::test]
    async fn test_view_page_escapes_filename() {
        let (_root, router) = gallery(&["<b>.jpg"], None);
        let (status, _, body) = get(&router, "/view/sphere/%3Cb%3E.jpg").await;
        assert_eq!(status, StatusCode::OK);

        let html = text(&body);
        assert!(html.contains("&lt;b&gt;.jpg"));
        assert!(!html.contains("<b>.jpg"));
    }

    #[tokio::test]
    async fn test_view_page_not_found() {
        let (_root, router) = gallery(&["x.jpg"], None);

        let (status, _, body) = get(&router, "/view/sphere/missing.jpg").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(text(&body).contains("404"));

        let (status, _, _) = get(&router, "/view/videos/x.jpg").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = get(&router, "/view/sphere/X.JPG").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_download() {
        let (_root, router) = gallery(&["a.png"], None);
        let (status, headers, body) = get(&router, "/download/sphere/a.png").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "image/png");
        assert!(headers[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .starts_with("attachment; filename=\"a.png\""));
        assert_eq!(body, b"a.png");

        let (status, _, _) = get(&router, "/download/sphere/notes.txt").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_static_images() {
        let (_root, router) = gallery(&["a.jpg"], None);
        let (status, _, body) = get(&router, "/images/sphere/a.jpg").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"a.jpg");
    }

    #[tokio::test]
    async fn test_home_page() {
        let (_root, router) = gallery(&["hero.jpg"], None);
        let (status, _, body) = get(&router, "/").await;
        assert_eq!(status, StatusCode::OK);

        let html = text(&body);
        assert!(html.contains("360° Sphere Images"));
        assert!(html.contains("1 spheres · 0 panoramas"));
        assert!(html.contains("href=\"/sphere\""));
        assert!(html.contains("No panorama images yet."));
    }

    #[tokio::test]
    async fn test_home_page_preview_limit() {
        let names: Vec<String> = (0..15).map(|i| format!("s{:02}.jpg", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let (_root, router) = gallery(&refs, None);

        let (_, _, body) = get(&router, "/").await;
        assert_eq!(text(&body).matches("class=\"card\"").count(), 10);

        let (_, _, body) = get(&router, "/sphere").await;
        let html = text(&body);
        assert_eq!(html.matches("class=\"card\"").count(), 15);
        assert!(html.contains("Explore all 15 immersive 360° sphere photos"));
    }

    #[tokio::test]
    async fn test_listing_empty_state() {
        let (_root, router) = gallery(&[], None);
        let (status, _, body) = get(&router, "/panorama").await;
        assert_eq!(status, StatusCode::OK);
        assert!(text(&body).contains("No panorama images yet."));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (_root, router) = gallery(&[], None);
        let (status, _, _) = get(&router, "/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    fn state_with(config: AppConfig) -> AppState {
        AppState::new(config).unwrap()
    }

    #[test]
    fn test_base_url_sources() {
        let state = state_with(AppConfig::default());

        let mut headers = HeaderMap::new();
        assert_eq!(state.base_url(&headers), "http://127.0.0.1:3000");

        headers.insert(header::HOST, "gallery.local:8080".parse().unwrap());
        assert_eq!(state.base_url(&headers), "http://gallery.local:8080");

        headers.insert(header::HOST, "[::1]:3000".parse().unwrap());
        assert_eq!(state.base_url(&headers), "http://[::1]:3000");

        headers.insert(header::HOST, "evil.example/phish?x=".parse().unwrap());
        assert_eq!(state.base_url(&headers), "http://127.0.0.1:3000");

        let mut config = AppConfig::default();
        config.web.public_url = Some("https://photos.example".to_string());
        let state = state_with(config);
        assert_eq!(state.base_url(&headers), "https://photos.example");
    }

    #[test]
    fn test_not_found_render_failure_is_server_error() {
        let state = state_with(AppConfig::default());
        assert_eq!(state.not_found().status(), StatusCode::NOT_FOUND);

        let broken = AppState {
            templates: Environment::new(),
            ..state
        };
        assert_eq!(broken.not_found().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_content_disposition() {
        assert_eq!(
            content_disposition("a b.jpg"),
            "attachment; filename=\"a b.jpg\"; filename*=UTF-8''a%20b.jpg"
        );
        assert_eq!(
            content_disposition("été.jpg"),
            "attachment; filename=\"_t_.jpg\"; filename*=UTF-8''%C3%A9t%C3%A9.jpg"
        );
    }
}
