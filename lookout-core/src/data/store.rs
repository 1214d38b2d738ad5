use std::sync::Arc;

use crate::data::{Camera, ClientState};

pub const DEFAULT_SERVICE_NAME: &str = "Lookout";

/// Process-wide view of the server state.  Every field is replaced
/// wholesale; readers get snapshots that the next refresh supersedes.
#[derive(Clone, Debug)]
pub struct Store {
    service_name: Arc<str>,
    default_path: Arc<str>,
    default_image: Arc<str>,
    cameras: Arc<[Camera]>,
    current_camera: Camera,
    loaded: bool,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.into(),
            default_path: "".into(),
            default_image: "".into(),
            cameras: Vec::<Camera>::new().into(),
            current_camera: Camera::none(),
            loaded: false,
        }
    }
}

impl Store {
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn default_path(&self) -> &str {
        &self.default_path
    }

    pub fn default_image(&self) -> &str {
        &self.default_image
    }

    pub fn cameras(&self) -> Arc<[Camera]> {
        Arc::clone(&self.cameras)
    }

    pub fn current_camera(&self) -> &Camera {
        &self.current_camera
    }

    /// True once the server state has been applied at least once.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn camera(&self, id: &str) -> Option<&Camera> {
        self.cameras.iter().find(|camera| camera.id == id)
    }

    /// Replaces the camera list.  The current camera is re-resolved against
    /// the new list, so it never points into an old snapshot.
    pub fn set_cameras(&mut self, cameras: Vec<Camera>) {
        self.cameras = cameras.into();
        let id = self.current_camera.id.clone();
        self.set_current_camera((!id.is_empty()).then_some(id.as_str()));
    }

    pub fn set_service_name(&mut self, name: &str) {
        self.service_name = name.into();
    }

    pub fn set_default_image(&mut self, image: &str) {
        self.default_image = image.into();
    }

    pub fn set_default_path(&mut self, path: &str) {
        self.default_path = path.into();
    }

    /// Selects the first camera with a matching id, or the placeholder.
    pub fn set_current_camera(&mut self, id: Option<&str>) {
        self.current_camera = id
            .and_then(|id| self.camera(id))
            .cloned()
            .unwrap_or_else(Camera::none);
    }

    /// Applies a whole state artifact in one go.
    pub fn apply(&mut self, state: ClientState) {
        self.set_cameras(state.cameras);
        self.set_service_name(&state.service_name);
        self.set_default_image(&state.default_image);
        self.set_default_path(&state.default_path);
        self.loaded = true;
        log::info!(
            "{}: {} camera(s), current {:?}",
            self.service_name,
            self.cameras.len(),
            self.current_camera.name
        );
    }
}
