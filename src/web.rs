use std::sync::{Mutex, MutexGuard};

use actix_files::Files;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{Config, SharedBacking};
use crate::display::{render_itinerary, RenderMode};
use crate::export::write_schedule_csv;
use crate::schedule::days::{days_until_departure, next_day, previous_day};
use crate::schedule::{
    day_info, maps_search_link, normalize_time_label, Confirmation, DayInfo, Direction, EntryPatch,
    NewEntry, ScheduleEntry, ScheduleStore, DAYS,
};

/// The one schedule store, shared by all workers.
pub struct AppState {
    pub store: Mutex<ScheduleStore<SharedBacking>>,
}

impl AppState {
    pub fn new(store: ScheduleStore<SharedBacking>) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }
}

#[derive(Serialize)]
pub struct DaysResponse {
    days: &'static [DayInfo],
    days_until_departure: Option<i64>,
}

#[derive(Serialize)]
pub struct DayResponse<'a> {
    day: &'a str,
    info: Option<&'static DayInfo>,
    previous: Option<&'static str>,
    next: Option<&'static str>,
    entries: &'a [ScheduleEntry],
}

#[derive(Serialize)]
pub struct ChangeResponse<'a> {
    changed: bool,
    entries: &'a [ScheduleEntry],
}

#[derive(Deserialize)]
pub struct MoveRequest {
    index: usize,
    direction: Direction,
}

#[derive(Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    confirm: bool,
}

fn lock_store(state: &web::Data<AppState>) -> Result<MutexGuard<'_, ScheduleStore<SharedBacking>>> {
    state
        .store
        .lock()
        .map_err(|_| actix_web::error::ErrorInternalServerError("Schedule store unavailable"))
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
}

// Labels are stored as canonical "HH:MM", as the CLI stores them
fn canonical_time(input: &str) -> std::result::Result<String, HttpResponse> {
    normalize_time_label(input)
        .ok_or_else(|| bad_request(format!("Invalid time {:?}: expected HH:MM (24-hour)", input)))
}

fn changed(changed: bool, entries: &[ScheduleEntry]) -> HttpResponse {
    HttpResponse::Ok().json(ChangeResponse { changed, entries })
}

async fn get_days() -> Result<HttpResponse> {
    let today = Local::now().date_naive();
    Ok(HttpResponse::Ok().json(DaysResponse {
        days: &DAYS,
        days_until_departure: days_until_departure(today),
    }))
}

async fn get_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let store = lock_store(&state)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "loaded": store.is_loaded(),
        "days": *store.snapshot(),
    })))
}

async fn get_day(day: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let store = lock_store(&state)?;
    let day = day.as_str();
    Ok(HttpResponse::Ok().json(DayResponse {
        day,
        info: day_info(day),
        previous: previous_day(day),
        next: next_day(day),
        entries: store.day(day),
    }))
}

async fn add_item(
    day: web::Path<String>,
    req: web::Json<NewEntry>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut entry = req.into_inner();
    if !entry.time.trim().is_empty() {
        match canonical_time(&entry.time) {
            Ok(time) => entry.time = time,
            Err(resp) => return Ok(resp),
        }
    }
    // Places added without a link get a map search for their title
    if entry.link.as_deref().map_or(true, |l| l.trim().is_empty()) {
        entry.link = maps_search_link(&entry.title);
    }

    let mut store = lock_store(&state)?;
    match store.add_item(&day, entry) {
        Ok(id) => Ok(HttpResponse::Created().json(serde_json::json!({
            "id": id,
            "entries": store.day(&day),
        }))),
        Err(e) => Ok(bad_request(e.to_string())),
    }
}

async fn update_item(
    path: web::Path<(String, String)>,
    req: web::Json<EntryPatch>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (day, id) = path.into_inner();
    let mut patch = req.into_inner();
    if patch.sets_time() {
        let loose = patch.time.take().unwrap_or_default();
        match canonical_time(&loose) {
            Ok(time) => patch.time = Some(time),
            Err(resp) => return Ok(resp),
        }
    }
    let mut store = lock_store(&state)?;
    let updated = store.update_item(&day, &id, &patch);
    Ok(changed(updated, store.day(&day)))
}

async fn delete_item(path: web::Path<(String, String)>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let (day, id) = path.into_inner();
    let mut store = lock_store(&state)?;
    let deleted = store.delete_item(&day, &id);
    Ok(changed(deleted, store.day(&day)))
}

async fn move_item(
    day: web::Path<String>,
    req: web::Json<MoveRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut store = lock_store(&state)?;
    let moved = store.move_item(&day, req.index, req.direction);
    Ok(changed(moved, store.day(&day)))
}

async fn reset(req: web::Json<ResetRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    if !req.confirm {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Reset discards all edits; resend with {\"confirm\": true}"
        })));
    }
    let mut store = lock_store(&state)?;
    store.reset_to_default(Confirmation::from(req.confirm));
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "reset": true,
        "days": *store.snapshot(),
    })))
}

async fn print_view(state: web::Data<AppState>) -> Result<HttpResponse> {
    let snapshot = lock_store(&state)?.snapshot();
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(render_itinerary(&snapshot, RenderMode::Print)))
}

async fn export_csv(state: web::Data<AppState>) -> Result<HttpResponse> {
    let snapshot = lock_store(&state)?.snapshot();
    let mut buf = Vec::new();
    write_schedule_csv(&snapshot, &mut buf)
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Failed to export CSV: {}", e)))?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(("Content-Disposition", "attachment; filename=\"itinerary.csv\""))
        .body(buf))
}

// HTML page handler
async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html; charset=utf-8").body(html))
}

/// Routes shared by the server and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/days", web::get().to(get_days))
        .route("/api/schedule", web::get().to(get_schedule))
        .route("/api/schedule/{day}", web::get().to(get_day))
        .route("/api/schedule/{day}/items", web::post().to(add_item))
        .route("/api/schedule/{day}/items/{id}", web::patch().to(update_item))
        .route("/api/schedule/{day}/items/{id}", web::delete().to(delete_item))
        .route("/api/schedule/{day}/move", web::post().to(move_item))
        .route("/api/reset", web::post().to(reset))
        .route("/api/print", web::get().to(print_view))
        .route("/api/export.csv", web::get().to(export_csv));
}

pub async fn start_server(config: &Config) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(config.open_store()));

    info!("Access the itinerary at http://{}:{}", config.bind, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", "static"))
            .configure(configure)
    })
    .bind((config.bind.as_str(), config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use crate::schedule::slot_utils::is_time_ordered;
    use crate::schedule::{default_schedule, DEFAULT_STORAGE_KEY};
    use crate::storage::MemoryStore;

    fn state() -> web::Data<AppState> {
        let backing: SharedBacking = Box::new(MemoryStore::new());
        web::Data::new(AppState::new(ScheduleStore::load(backing, DEFAULT_STORAGE_KEY)))
    }

    #[actix_web::test]
    async fn serves_day_with_navigation() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/schedule/day2").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["previous"], "day1");
        assert_eq!(body["next"], "day3");
        assert_eq!(body["info"]["headline"], "京都：清水寺 & 祇園");
        assert_eq!(body["entries"][0]["time"], "05:30");
    }

    #[actix_web::test]
    async fn add_synthesizes_map_link_and_sorts() {
        let data = state();
        let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/schedule/day2/items")
            .set_json(serde_json::json!({"time": "06:30", "title": "🍵 Tea House", "description": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let store = data.store.lock().unwrap();
        let day = store.day("day2");
        assert_eq!(day[2].title, "🍵 Tea House");
        assert_eq!(
            day[2].link.as_deref(),
            Some("https://www.google.com/maps/search/?api=1&query=Tea+House")
        );
    }

    #[actix_web::test]
    async fn add_without_title_is_rejected() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/schedule/day1/items")
            .set_json(serde_json::json!({"time": "06:30", "title": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn loose_times_are_stored_canonically() {
        let data = state();
        let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;

        let req = test::TestRequest::patch()
            .uri("/api/schedule/day4/items/d4-8")
            .set_json(serde_json::json!({"time": "9:00"}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["changed"], true);
        let moved = body["entries"]
            .as_array()
            .unwrap()
            .iter()
            .position(|e| e["id"] == "d4-8")
            .unwrap();
        assert_eq!(body["entries"][moved]["time"], "09:00");
        assert_eq!(body["entries"][moved + 1]["time"], "10:30");

        let req = test::TestRequest::post()
            .uri("/api/schedule/day4/items")
            .set_json(serde_json::json!({"time": " 7:05", "title": "Coffee"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let store = data.store.lock().unwrap();
        assert!(store.day("day4").iter().any(|e| e.title == "Coffee" && e.time == "07:05"));
        assert!(is_time_ordered(store.day("day4")));
    }

    #[actix_web::test]
    async fn invalid_time_is_rejected() {
        let data = state();
        let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;

        let req = test::TestRequest::patch()
            .uri("/api/schedule/day4/items/d4-8")
            .set_json(serde_json::json!({"time": "25:00"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/schedule/day4/items")
            .set_json(serde_json::json!({"time": "noon", "title": "Lunch"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(*data.store.lock().unwrap().snapshot(), default_schedule());
    }

    #[actix_web::test]
    async fn index_binds_controls_without_inline_handlers() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("data-id="));
        assert!(html.contains("addEventListener"));
        assert!(!html.contains("onclick=\""));
    }

    #[actix_web::test]
    async fn move_reports_boundary_noop() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/schedule/day2/move")
            .set_json(serde_json::json!({"index": 0, "direction": "up"}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["changed"], false);

        let req = test::TestRequest::post()
            .uri("/api/schedule/day2/move")
            .set_json(serde_json::json!({"index": 1, "direction": "up"}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["changed"], true);
        assert_eq!(body["entries"][0]["time"], "05:30");
        assert_eq!(body["entries"][0]["id"], "d2-2");
    }

    #[actix_web::test]
    async fn patch_and_delete_items() {
        let data = state();
        let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;

        let req = test::TestRequest::patch()
            .uri("/api/schedule/day3/items/d3-1")
            .set_json(serde_json::json!({"time": "12:15"}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["changed"], true);
        assert_eq!(body["entries"][0]["id"], "d3-2");

        let req = test::TestRequest::delete()
            .uri("/api/schedule/day3/items/d3-1")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["changed"], true);

        let req = test::TestRequest::delete()
            .uri("/api/schedule/day3/items/d3-1")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["changed"], false);
        assert_eq!(data.store.lock().unwrap().day("day3").len(), 6);
    }

    #[actix_web::test]
    async fn reset_requires_confirm_flag() {
        let data = state();
        data.store.lock().unwrap().delete_item("day1", "d1-1");
        let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/reset")
            .set_json(serde_json::json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_ne!(*data.store.lock().unwrap().snapshot(), default_schedule());

        let req = test::TestRequest::post()
            .uri("/api/reset")
            .set_json(serde_json::json!({"confirm": true}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(*data.store.lock().unwrap().snapshot(), default_schedule());
    }

    #[actix_web::test]
    async fn print_view_is_plain_text_without_handles() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/print").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("DAY 1"));
        assert!(!text.contains("(id:"));
    }
}
