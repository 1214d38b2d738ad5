mod common;

use common::{Harness, Scripted, NO_CAMERAS, TWO_CAMERAS};
use lookout_core::{
    controller::refresh::RefreshLoop,
    data::{ApiError, MediaKind, Route},
    webapi::Method,
};

const STATE: &str = "/client/state";

#[test]
fn camera_route_selects_camera() {
    let server = Scripted::new();
    server.reply(STATE, 200, TWO_CAMERAS);
    let mut h = Harness::new(server);

    h.dashboard.activate(Route::parse("/camera/c2"));
    assert!(h.dashboard.refresh.waiting.is_waiting());
    h.settle();

    let d = &h.dashboard;
    assert!(!d.refresh.waiting.is_waiting());
    assert!(d.refresh.is_active());
    assert_eq!(d.store.service_name(), "Backyard");
    assert_eq!(d.store.cameras().len(), 2);
    assert_eq!(d.store.current_camera().id, "c2");
    assert_eq!(d.store.current_camera().name, "Yard");
    assert_eq!(d.history.current(), &Route::Camera("c2".into()));
}

#[test]
fn root_redirects_to_first_camera_once() {
    let server = Scripted::new();
    server.reply(STATE, 200, TWO_CAMERAS);
    let mut h = Harness::new(server.clone());

    h.dashboard.activate(Route::Root);
    h.settle();

    let d = &h.dashboard;
    assert_eq!(d.history.current(), &Route::Camera("c1".into()));
    assert_eq!(d.history.len(), 1);
    assert_eq!(d.store.current_camera().id, "c1");
    // The redirect restarts the loop, which refreshes once more.
    assert_eq!(server.requests(Method::Get, STATE).len(), 2);
}

#[test]
fn root_without_cameras_redirects_to_placeholder() {
    let server = Scripted::new();
    server.reply(STATE, 200, NO_CAMERAS);
    let mut h = Harness::new(server);

    h.dashboard.activate(Route::Root);
    h.settle();

    assert_eq!(h.dashboard.history.current(), &Route::NoCameras);
    assert!(h.dashboard.store.current_camera().is_none());
}

#[test]
fn late_state_after_teardown_is_discarded() {
    let server = Scripted::new();
    server.reply(STATE, 200, TWO_CAMERAS);
    let mut h = Harness::new(server);

    h.dashboard.activate(Route::parse("/camera/c1"));
    h.dashboard.teardown();
    h.dashboard.teardown();
    assert_eq!(h.settle(), 1);

    let d = &h.dashboard;
    assert!(!d.refresh.is_active());
    assert!(!d.refresh.waiting.is_waiting());
    assert!(!d.store.is_loaded());
    assert!(d.store.cameras().is_empty());
}

#[test]
fn stopping_idle_loop_does_nothing() {
    let mut refresh = RefreshLoop::new(RefreshLoop::DEFAULT_INTERVAL);
    refresh.stop();
    refresh.stop();
    assert!(!refresh.is_active());
    assert_eq!(refresh.epoch(), None);
}

#[test]
fn ticks_of_replaced_loop_are_ignored() {
    let server = Scripted::new();
    server.reply(STATE, 200, TWO_CAMERAS);
    let mut h = Harness::new(server.clone());

    h.dashboard.activate(Route::parse("/camera/c1"));
    h.settle();
    let first = h.dashboard.refresh.epoch().unwrap();

    h.dashboard.select_camera("c2");
    h.settle();
    let second = h.dashboard.refresh.epoch().unwrap();
    assert_ne!(first, second);
    assert_eq!(h.dashboard.store.current_camera().id, "c2");

    let before = server.requests(Method::Get, STATE).len();
    h.dashboard.refresh_tick(first);
    assert_eq!(server.requests(Method::Get, STATE).len(), before);
    h.dashboard.refresh_tick(second);
    assert_eq!(server.requests(Method::Get, STATE).len(), before + 1);
}

#[test]
fn error_envelope_on_ok_status_is_fatal() {
    let server = Scripted::new();
    server.reply(
        STATE,
        200,
        r#"{"Error": {"Message": "Server is not configured.", "Extra": "Ask an admin.", "IsRecoverable": false}}"#,
    );
    let mut h = Harness::new(server);

    h.dashboard.activate(Route::Root);
    h.settle();

    let error = h.dashboard.errors.current().unwrap().clone();
    assert_eq!(error.status, 200);
    assert_eq!(error.message, "Server is not configured.");
    assert_eq!(error.extra, "Ask an admin.");
    assert!(!error.recoverable);

    h.dashboard.dismiss_errors();
    assert!(h.dashboard.errors.is_fatal());
    // Nothing loaded, so no redirect either.
    assert_eq!(h.dashboard.history.current(), &Route::Root);
}

#[test]
fn recoverable_error_can_be_dismissed() {
    let server = Scripted::new();
    server.reply(
        STATE,
        503,
        r#"{"Error": {"Message": "Busy.", "Recoverable": true}}"#,
    );
    let mut h = Harness::new(server);

    h.dashboard.activate(Route::Root);
    h.settle();
    assert!(h.dashboard.errors.is_recoverable());
    assert_eq!(h.dashboard.errors.current().unwrap().status, 503);

    h.dashboard.dismiss_errors();
    assert!(!h.dashboard.errors.is_active());
}

#[test]
fn unreachable_server_shows_general_error() {
    let mut h = Harness::new(Scripted::new());

    h.dashboard.activate(Route::Root);
    h.settle();

    let error = h.dashboard.errors.current().unwrap();
    assert_eq!(error.status, 0);
    assert_eq!(error.message, ApiError::GENERAL_MESSAGE);
    assert_eq!(error.extra, ApiError::GENERAL_EXTRA);
    assert!(!h.dashboard.refresh.waiting.is_waiting());
}

#[test]
fn gallery_pages_through_listing() {
    const LISTING: &str = "/client/images/c1/collected";

    let server = Scripted::new();
    server.reply(STATE, 200, TWO_CAMERAS);
    server.reply(
        LISTING,
        200,
        r#"{"Artifact": {"Images": [{"Handle": "h1"}, {"Handle": "h2"}], "Camera": "Porch", "Total": 20}}"#,
    );
    let mut h = Harness::new(server.clone());

    h.dashboard.activate(Route::parse("/camera/c1/recent"));
    assert!(h.dashboard.gallery.waiting.is_waiting());
    h.settle();

    let gallery = &h.dashboard.gallery;
    assert!(!gallery.waiting.is_waiting());
    assert_eq!(gallery.kind(), Some(MediaKind::Recent));
    assert_eq!(gallery.camera(), "Porch");
    assert_eq!(gallery.results(), 20);
    assert_eq!(gallery.pages(), 3);
    assert_eq!(gallery.image_list().len(), 2);
    assert!(gallery.has_next());
    assert!(!gallery.has_previous());

    h.dashboard.gallery_page(2);
    h.settle();
    h.dashboard.gallery_next();
    h.settle();
    assert_eq!(h.dashboard.gallery.cursor.current, 3);
    assert!(!h.dashboard.gallery.has_next());
    h.dashboard.gallery_next();
    h.settle();

    let urls = server.requests(Method::Get, LISTING);
    assert_eq!(
        urls,
        [
            "http://cams.test/client/images/c1/collected?skip=0&per=9",
            "http://cams.test/client/images/c1/collected?skip=9&per=9",
            "http://cams.test/client/images/c1/collected?skip=18&per=9",
        ]
    );
}

#[test]
fn page_past_the_end_shows_last_page() {
    const LISTING: &str = "/client/images/c1/collected";

    let server = Scripted::new();
    server.reply(STATE, 200, TWO_CAMERAS);
    server.reply(LISTING, 200, r#"{"Artifact": {"Images": [], "Total": 20}}"#);
    let mut h = Harness::new(server.clone());

    h.dashboard.activate(Route::parse("/camera/c1/recent"));
    h.settle();
    h.dashboard.gallery_page(usize::MAX);
    h.settle();

    assert_eq!(h.dashboard.gallery.cursor.current, 3);
    let urls = server.requests(Method::Get, LISTING);
    assert_eq!(
        urls.last().map(String::as_str),
        Some("http://cams.test/client/images/c1/collected?skip=18&per=9")
    );
}

#[test]
fn gallery_starts_over_for_another_kind() {
    let server = Scripted::new();
    server.reply(STATE, 200, TWO_CAMERAS);
    server.reply(
        "/client/images/c1/collected",
        200,
        r#"{"Artifact": {"Images": [], "Camera": "Porch", "Total": 30}}"#,
    );
    server.reply(
        "/client/images/c1/motion",
        200,
        r#"{"Artifact": {"Images": [], "Camera": "Porch", "Total": 4}}"#,
    );
    let mut h = Harness::new(server.clone());

    h.dashboard.activate(Route::parse("/camera/c1/recent"));
    h.settle();
    h.dashboard.gallery_page(3);
    h.settle();
    assert_eq!(h.dashboard.gallery.cursor.current, 3);

    h.dashboard.navigate(Route::parse("/camera/c1/motion"));
    assert_eq!(h.dashboard.gallery.cursor.current, 1);
    h.settle();
    assert_eq!(h.dashboard.gallery.results(), 4);
    assert_eq!(
        server.requests(Method::Get, "/client/images/c1/motion"),
        ["http://cams.test/client/images/c1/motion?skip=0&per=9"]
    );
}

#[test]
fn pinning_marks_open_image() {
    let server = Scripted::new();
    server.reply(STATE, 200, TWO_CAMERAS);
    server.reply(
        "/client/imagemeta/h1",
        200,
        r#"{"Artifact": {"Date": "2024-05-01", "Time": "12:00", "Camera": "Porch", "IsPinned": false}}"#,
    );
    server.reply("/client/pin/h1", 200, r#"{"Artifact": true}"#);
    let mut h = Harness::new(server.clone());

    h.dashboard.activate(Route::parse("/image/h1"));
    h.settle();
    let meta = h.dashboard.lightbox.meta.resolved().unwrap();
    assert_eq!(meta.handle, "h1");
    assert_eq!(meta.is_pinned, Some(false));

    h.dashboard.pin_image();
    h.settle();
    assert_eq!(h.dashboard.lightbox.meta.resolved().unwrap().is_pinned, Some(true));
    assert_eq!(server.requests(Method::Put, "/client/pin/h1").len(), 1);
}

#[test]
fn invalid_settings_never_reach_server() {
    let server = Scripted::new();
    server.reply(STATE, 200, TWO_CAMERAS);
    server.reply(
        "/api/config",
        200,
        r#"{"Artifact": {"ServiceName": "Backyard", "ClientLimit": 4, "IssuedCertDuration": 30, "WhitelistedDomains": ["a.example"]}}"#,
    );
    let mut h = Harness::new(server.clone());

    h.dashboard.activate(Route::parse("/camera/c1"));
    h.settle();
    h.dashboard.navigate(Route::Settings);
    h.settle();
    assert_eq!(h.dashboard.settings.form.client_limit, "4");
    assert_eq!(h.dashboard.settings.form.whitelisted_domains, "a.example");

    h.dashboard.settings.form.client_limit = "lots".into();
    h.dashboard.submit_settings();
    h.settle();
    let error = h.dashboard.settings.error.current().unwrap();
    assert_eq!(error.message, "Max clients must be a number.");
    assert!(error.recoverable);
    assert!(server.requests(Method::Put, "/api/config").is_empty());
    assert_eq!(h.dashboard.history.current(), &Route::Settings);

    h.dashboard.cancel_settings();
    h.settle();
    assert_eq!(h.dashboard.history.current(), &Route::Camera("c2".into()));
    assert!(!h.dashboard.settings.error.is_active());
    assert!(server.requests(Method::Put, "/api/config").is_empty());
}

#[test]
fn failed_save_after_teardown_is_discarded() {
    let server = Scripted::new();
    server.reply(STATE, 200, TWO_CAMERAS);
    server.reply("/api/config", 200, r#"{"Artifact": {"ServiceName": "Backyard"}}"#);
    let mut h = Harness::new(server.clone());

    h.dashboard.activate(Route::Settings);
    h.settle();
    server.reply("/api/config", 500, r#"{"Error": {"Message": "boom"}}"#);
    h.dashboard.settings.form.client_limit = "4".into();
    h.dashboard.settings.form.cert_duration = "30".into();
    h.dashboard.submit_settings();
    h.dashboard.teardown();
    h.settle();

    assert_eq!(server.requests(Method::Put, "/api/config").len(), 1);
    assert!(!h.dashboard.settings.error.is_active());
    assert!(!h.dashboard.settings.waiting.is_waiting());
}

#[test]
fn save_outcome_is_ignored_on_another_page() {
    let server = Scripted::new();
    server.reply(STATE, 200, TWO_CAMERAS);
    server.reply("/api/config", 200, r#"{"Artifact": {"ServiceName": "Backyard"}}"#);
    let mut h = Harness::new(server.clone());

    h.dashboard.activate(Route::Settings);
    h.settle();
    h.dashboard.settings.form.client_limit = "4".into();
    h.dashboard.settings.form.cert_duration = "30".into();
    server.reply("/api/config", 500, r#"{"Error": {"Message": "boom"}}"#);
    h.dashboard.submit_settings();
    h.dashboard.select_camera("c1");
    server.reply("/api/config", 200, r#"{"Artifact": {"ServiceName": "Front"}}"#);
    h.dashboard.navigate(Route::Settings);
    h.settle();

    // The failed save belonged to the first visit.
    assert!(!h.dashboard.settings.error.is_active());
    assert_eq!(h.dashboard.settings.form.service_name, "Front");
    assert_eq!(h.dashboard.history.current(), &Route::Settings);
}

#[test]
fn keep_failure_for_closed_image_is_discarded() {
    let server = Scripted::new();
    server.reply(STATE, 200, TWO_CAMERAS);
    server.reply("/client/imagemeta/h1", 200, r#"{"Artifact": {"Camera": "Porch"}}"#);
    server.reply("/client/pin/h1", 500, r#"{"Error": {"Message": "boom"}}"#);
    let mut h = Harness::new(server.clone());

    h.dashboard.activate(Route::parse("/image/h1"));
    h.settle();
    h.dashboard.pin_image();
    h.dashboard.select_camera("c1");
    h.settle();

    assert_eq!(server.requests(Method::Put, "/client/pin/h1").len(), 1);
    assert!(!h.dashboard.lightbox.error.is_active());
    assert!(h.dashboard.lightbox.meta.resolved().is_none());
}

#[test]
fn saved_settings_return_to_default_page() {
    let server = Scripted::new();
    server.reply(STATE, 200, TWO_CAMERAS);
    server.reply(
        "/api/config",
        200,
        r#"{"Artifact": {"ServiceName": "Backyard", "ClientLimit": 4, "IssuedCertDuration": 30}}"#,
    );
    let mut h = Harness::new(server.clone());

    h.dashboard.activate(Route::parse("/camera/c1"));
    h.settle();
    h.dashboard.navigate(Route::Settings);
    h.settle();

    h.dashboard.settings.form.service_name = "Front".into();
    h.dashboard.submit_settings();
    assert!(h.dashboard.settings.waiting.is_waiting());
    h.settle();

    assert_eq!(server.requests(Method::Put, "/api/config").len(), 1);
    assert_eq!(h.dashboard.history.current(), &Route::Camera("c2".into()));
    assert_eq!(h.dashboard.store.current_camera().id, "c2");
    assert!(!h.dashboard.settings.waiting.is_waiting());
}

#[test]
fn back_returns_to_previous_view() {
    let server = Scripted::new();
    server.reply(STATE, 200, TWO_CAMERAS);
    let mut h = Harness::new(server);

    h.dashboard.activate(Route::parse("/camera/c1"));
    h.settle();
    h.dashboard.select_camera("c2");
    h.settle();
    assert_eq!(h.dashboard.store.current_camera().id, "c2");

    h.dashboard.back();
    h.settle();
    assert_eq!(h.dashboard.history.current(), &Route::Camera("c1".into()));
    assert_eq!(h.dashboard.store.current_camera().id, "c1");
}
