use crate::data::{Camera, History, Route, Store};

/// Where the application root should send the user, given the cameras we
/// know about.  `None` for any other route.
pub fn default_redirect(route: &Route, cameras: &[Camera]) -> Option<Route> {
    if !route.is_root() {
        return None;
    }
    Some(match cameras.first() {
        Some(camera) => Route::Camera(camera.id.clone()),
        None => Route::NoCameras,
    })
}

/// Brings the current camera in line with the current location.  The root
/// redirect only happens once the store holds server state, and it replaces
/// the current history entry.  Returns the redirect target, if any.
pub fn resolve(store: &mut Store, history: &mut History) -> Option<Route> {
    let mut redirect = None;
    if store.is_loaded() {
        if let Some(target) = default_redirect(history.current(), &store.cameras()) {
            log::info!("redirecting {} to {}", history.current(), target);
            history.replace(target.clone());
            redirect = Some(target);
        }
    }
    store.set_current_camera(history.current().camera());
    redirect
}
