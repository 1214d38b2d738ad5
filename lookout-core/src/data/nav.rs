use std::fmt;

use crate::data::MediaKind;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    NoCameras,
    Camera(String),
    Gallery { camera: String, kind: MediaKind },
    Lightbox(String),
    Player(String),
    Settings,
    Unknown(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::Root,
            ["nocameras"] => Self::NoCameras,
            ["settings"] => Self::Settings,
            ["camera", camera] => Self::Camera(camera.to_string()),
            ["camera", camera, kind] => match MediaKind::from_segment(kind) {
                Some(kind) => Self::Gallery {
                    camera: camera.to_string(),
                    kind,
                },
                None => Self::Unknown(path.to_string()),
            },
            ["image", handle] => Self::Lightbox(handle.to_string()),
            ["player", handle] => Self::Player(handle.to_string()),
            _ => Self::Unknown(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Root => "/".to_string(),
            Self::NoCameras => "/nocameras".to_string(),
            Self::Settings => "/settings".to_string(),
            Self::Camera(camera) => format!("/camera/{}", camera),
            Self::Gallery { camera, kind } => {
                format!("/camera/{}/{}", camera, kind.route_segment())
            }
            Self::Lightbox(handle) => format!("/image/{}", handle),
            Self::Player(handle) => format!("/player/{}", handle),
            Self::Unknown(path) => path.clone(),
        }
    }

    /// The `camera` path parameter, if the route has one.
    pub fn camera(&self) -> Option<&str> {
        match self {
            Self::Camera(camera) | Self::Gallery { camera, .. } => Some(camera),
            _ => None,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    pub fn title(&self) -> String {
        match self {
            Self::Root => "Home".to_string(),
            Self::NoCameras => "No cameras".to_string(),
            Self::Settings => "Settings".to_string(),
            Self::Camera(camera) => camera.clone(),
            Self::Gallery { camera, kind } => format!("{} “{}”", kind, camera),
            Self::Lightbox(_) => "Image".to_string(),
            Self::Player(_) => "Video".to_string(),
            Self::Unknown(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Navigation entries, most recent last.  `replace` rewrites the current
/// entry so that it cannot be navigated back to.
#[derive(Clone, Debug)]
pub struct History {
    entries: Vec<Route>,
}

impl History {
    pub fn new(initial: Route) -> Self {
        Self {
            entries: vec![initial],
        }
    }

    pub fn current(&self) -> &Route {
        // `entries` is never empty.
        &self.entries[self.entries.len() - 1]
    }

    pub fn push(&mut self, route: Route) {
        self.entries.push(route);
    }

    pub fn replace(&mut self, route: Route) {
        let last = self.entries.len() - 1;
        self.entries[last] = route;
    }

    /// Returns false if there is nothing to go back to.
    pub fn back(&mut self) -> bool {
        if self.entries.len() > 1 {
            self.entries.pop();
            true
        } else {
            false
        }
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::Root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_routes() {
        assert_eq!(Route::parse(""), Route::Root);
        assert_eq!(Route::parse("/"), Route::Root);
        assert_eq!(Route::parse("/nocameras"), Route::NoCameras);
        assert_eq!(Route::parse("/camera/c2"), Route::Camera("c2".into()));
        assert_eq!(
            Route::parse("/camera/c2/motion"),
            Route::Gallery {
                camera: "c2".into(),
                kind: MediaKind::Motion
            }
        );
        assert_eq!(
            Route::parse("/camera/c2/generated"),
            Route::Gallery {
                camera: "c2".into(),
                kind: MediaKind::Timelapse
            }
        );
        assert_eq!(Route::parse("/image/abc"), Route::Lightbox("abc".into()));
        assert_eq!(Route::parse("/player/abc"), Route::Player("abc".into()));
        assert_eq!(Route::parse("/settings/"), Route::Settings);
        assert_eq!(
            Route::parse("/camera/c2/bogus"),
            Route::Unknown("/camera/c2/bogus".into())
        );
    }

    #[test]
    fn path_parses_back() {
        let routes = [
            Route::Root,
            Route::NoCameras,
            Route::Settings,
            Route::Camera("c1".into()),
            Route::Gallery {
                camera: "c1".into(),
                kind: MediaKind::Saved,
            },
            Route::Lightbox("h".into()),
            Route::Player("h".into()),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn camera_param() {
        assert_eq!(Route::parse("/camera/c1").camera(), Some("c1"));
        assert_eq!(Route::parse("/camera/c1/recent").camera(), Some("c1"));
        assert_eq!(Route::parse("/settings").camera(), None);
    }

    #[test]
    fn replace_does_not_record() {
        let mut history = History::default();
        history.push(Route::Settings);
        history.replace(Route::NoCameras);
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), &Route::NoCameras);
        assert!(history.back());
        assert_eq!(history.current(), &Route::Root);
        assert!(!history.back());
    }
}
