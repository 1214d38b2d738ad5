use serde::{Deserialize, Serialize};

use crate::data::MediaKind;

pub const NO_CAMERA_NAME: &str = "No camera";

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Camera {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    pub aspect_ratio: String,
    pub local_time: String,
    pub local_date: String,
    pub sleeping: bool,
    pub message: String,
    pub offline: bool,
    pub latest_handle: String,
    pub latest_time: String,
    pub latest_date: String,
    pub recent: Vec<ImageRef>,
    #[serde(alias = "Pinned")]
    pub saved: Vec<ImageRef>,
    pub motion: Vec<ImageRef>,
    pub timelapse: Vec<ImageRef>,
}

impl Camera {
    /// The placeholder selected when navigation names no known camera.
    pub fn none() -> Self {
        Self {
            name: NO_CAMERA_NAME.to_string(),
            ..Self::default()
        }
    }

    pub fn is_none(&self) -> bool {
        self.id.is_empty()
    }

    pub fn slot(&self, kind: MediaKind) -> &[ImageRef] {
        match kind {
            MediaKind::Recent => &self.recent,
            MediaKind::Timelapse => &self.timelapse,
            MediaKind::Saved => &self.saved,
            MediaKind::Motion => &self.motion,
        }
    }
}

/// A captured image (and possibly video), as referenced by the server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageRef {
    pub handle: String,
    pub has_video: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
}

/// Artifact of `GET /client/state`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ClientState {
    pub cameras: Vec<Camera>,
    pub service_name: String,
    pub default_image: String,
    pub default_path: String,
}

/// Artifact of `GET /client/images/{camera}/{kind}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageList {
    pub images: Vec<ImageRef>,
    pub camera: String,
    pub total: usize,
}

/// Artifact of `GET /api/config`, payload of `PUT /api/config`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServiceConfig {
    pub service_name: String,
    pub client_limit: i64,
    pub issued_cert_duration: i64,
    pub whitelisted_domains: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_state() {
        let state: ClientState = serde_json::from_str(
            r#"{
                "Cameras": [
                    {"ID": "c1", "Name": "Porch", "Recent": [{"Handle": "h1", "HasVideo": true}],
                     "Pinned": [{"Handle": "h2"}]},
                    {"ID": "c2", "Name": "Garage"}
                ],
                "ServiceName": "Home",
                "DefaultImage": "/static/default.jpg"
            }"#,
        )
        .unwrap();
        assert_eq!(state.cameras.len(), 2);
        assert_eq!(state.cameras[0].recent[0].handle, "h1");
        assert!(state.cameras[0].recent[0].has_video);
        assert_eq!(state.cameras[0].slot(MediaKind::Saved)[0].handle, "h2");
        assert!(state.cameras[1].motion.is_empty());
        assert_eq!(state.default_path, "");
    }

    #[test]
    fn placeholder_camera() {
        let none = Camera::none();
        assert!(none.is_none());
        assert_eq!(none.name, NO_CAMERA_NAME);
    }
}
