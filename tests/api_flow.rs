mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use common::{chart, game_of_thrones, FakeTmdb, Reply};
use moviefinder::app::{build_router, AppState};
use moviefinder::models::ChartKind;
use moviefinder::preferences::MemoryBackend;
use moviefinder::Store;
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

fn app_with(fake: FakeTmdb) -> (Router, Arc<Store>, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    let store = Arc::new(Store::new(backend.clone()));
    let state = AppState::new(Arc::new(fake), store.clone());
    (build_router(state), store, backend)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn json_body(res: Response) -> Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_answers_ok() {
    let (app, _, _) = app_with(FakeTmdb::new());
    let res = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn title_route_falls_back_to_series() {
    let (app, store, _) = app_with(
        FakeTmdb::new()
            .with("/movie/1399", Reply::NotFound)
            .with("/tv/1399", Reply::Json(game_of_thrones())),
    );

    let res = app.oneshot(get("/titles/1399")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["kind"], "Series");
    assert_eq!(body["title"], "Game of Thrones");
    assert_eq!(body["runtimeStr"], "");
    assert!(store.selected_title().ready().is_some());
}

#[tokio::test]
async fn unknown_title_maps_to_not_found() {
    let (app, _, _) = app_with(FakeTmdb::new());
    let res = app.oneshot(get("/titles/424242")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = json_body(res).await;
    assert!(body["error"].as_str().unwrap().contains("424242"));
}

#[tokio::test]
async fn provider_outage_maps_to_bad_gateway() {
    let (app, _, _) = app_with(
        FakeTmdb::new()
            .with("/movie/5", Reply::Unavailable)
            .with("/tv/5", Reply::Unavailable),
    );
    let res = app.oneshot(get("/titles/5")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn rate_limited_provider_is_not_a_missing_title() {
    let (app, _, _) = app_with(
        FakeTmdb::new()
            .with("/movie/27205", Reply::Status(429))
            .with("/tv/27205", Reply::Status(429)),
    );
    let res = app.oneshot(get("/titles/27205")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn empty_search_is_a_bad_request() {
    let (app, _, _) = app_with(FakeTmdb::new());
    let res = app.oneshot(get("/search?q=")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_scope_and_chart_are_bad_requests() {
    let (app, _, _) = app_with(FakeTmdb::new());
    let res = app
        .clone()
        .oneshot(get("/search?q=dune&scope=podcasts"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.oneshot(get("/charts/box-office")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chart_route_returns_ranked_summaries() {
    let (app, store, _) = app_with(FakeTmdb::new().with(
        ChartKind::TopMovies.path(),
        Reply::Json(chart(&[(238, "The Godfather"), (278, "The Shawshank Redemption")])),
    ));

    let res = app.oneshot(get("/charts/top-movies")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body[0]["rank"], 1);
    assert_eq!(body[1]["rank"], 2);
    assert_eq!(body[1]["title"], "The Shawshank Redemption");
    assert_eq!(store.chart(ChartKind::TopMovies).ready().map(Vec::len), Some(2));
}

#[tokio::test]
async fn home_reports_each_chart_slot_independently() {
    let (app, _, _) = app_with(FakeTmdb::new().with(
        ChartKind::TopMovies.path(),
        Reply::Json(chart(&[(238, "The Godfather")])),
    ));

    let res = app.oneshot(get("/home")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["top-movies"]["status"], "ready");
    assert_eq!(body["top-movies"]["value"][0]["title"], "The Godfather");
    assert_eq!(body["upcoming"]["status"], "failed");
    assert_eq!(body["top-series"]["status"], "failed");
}

#[tokio::test]
async fn adding_a_favorite_twice_is_idempotent() {
    let (app, store, backend) = app_with(FakeTmdb::new());

    let put = || Request::put("/favorites/27205").body(Body::empty()).unwrap();
    let res = app.clone().oneshot(put()).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["changed"], true);
    assert_eq!(body["favorite"], true);

    let res = app.clone().oneshot(put()).await.unwrap();
    let body = json_body(res).await;
    assert_eq!(body["changed"], false);
    assert_eq!(store.favorites().len(), 1);

    let res = app.oneshot(get("/favorites")).await.unwrap();
    let body = json_body(res).await;
    assert_eq!(body, serde_json::json!(["27205"]));
    assert!(backend.raw().unwrap().contains("27205"));
}

#[tokio::test]
async fn removing_an_absent_favorite_changes_nothing() {
    let (app, store, backend) = app_with(FakeTmdb::new());
    store.add_favorite("1399").unwrap();
    let before = backend.raw();

    let req = Request::delete("/favorites/27205").body(Body::empty()).unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["changed"], false);
    assert_eq!(body["favorite"], false);
    assert!(store.is_favorite("1399"));
    assert_eq!(backend.raw(), before);
}

#[tokio::test]
async fn theme_toggle_is_persisted() {
    let (app, _, backend) = app_with(FakeTmdb::new());

    let toggle = || {
        Request::post("/preferences/theme/toggle")
            .body(Body::empty())
            .unwrap()
    };
    let res = app.clone().oneshot(toggle()).await.unwrap();
    assert_eq!(json_body(res).await["darkMode"], true);

    let reopened = Store::new(backend.clone());
    assert!(reopened.dark_mode());

    let res = app.clone().oneshot(toggle()).await.unwrap();
    assert_eq!(json_body(res).await["darkMode"], false);

    let res = app.oneshot(get("/preferences")).await.unwrap();
    let body = json_body(res).await;
    assert_eq!(body["darkMode"], false);
    assert_eq!(body["favorites"], serde_json::json!([]));
}
