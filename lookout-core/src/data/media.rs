//! Media URIs for image references.  A missing handle resolves to the
//! server's placeholder image.

use crate::data::ImageRef;

pub fn image_uri(handle: Option<&str>, default_image: &str) -> String {
    match handle {
        Some(handle) if !handle.is_empty() => format!("/client/image/{}", handle),
        _ => default_image.to_string(),
    }
}

pub fn video_uri(handle: Option<&str>, default_image: &str) -> String {
    match handle {
        Some(handle) if !handle.is_empty() => format!("/client/video/{}", handle),
        _ => default_image.to_string(),
    }
}

impl ImageRef {
    pub fn image_uri(&self, default_image: &str) -> String {
        image_uri(Some(&self.handle), default_image)
    }

    /// `None` if the server recorded no video for this image.
    pub fn video_uri(&self, default_image: &str) -> Option<String> {
        self.has_video
            .then(|| video_uri(Some(&self.handle), default_image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_build_uris() {
        assert_eq!(image_uri(Some("abc"), "/none.jpg"), "/client/image/abc");
        assert_eq!(video_uri(Some("abc"), "/none.jpg"), "/client/video/abc");
    }

    #[test]
    fn missing_handle_falls_back() {
        assert_eq!(image_uri(None, "/none.jpg"), "/none.jpg");
        assert_eq!(image_uri(Some(""), "/none.jpg"), "/none.jpg");
        assert_eq!(video_uri(None, "/none.jpg"), "/none.jpg");
    }

    #[test]
    fn video_only_when_recorded() {
        let mut image = ImageRef {
            handle: "abc".to_string(),
            ..ImageRef::default()
        };
        assert_eq!(image.video_uri("/none.jpg"), None);
        image.has_video = true;
        assert_eq!(
            image.video_uri("/none.jpg").as_deref(),
            Some("/client/video/abc")
        );
    }
}
