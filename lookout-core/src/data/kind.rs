use std::fmt;

/// Which slot of a camera a gallery lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Recent,
    Timelapse,
    Saved,
    Motion,
}

impl MediaKind {
    pub const ALL: [MediaKind; 4] = [Self::Recent, Self::Timelapse, Self::Saved, Self::Motion];

    /// Accepts our own route segments as well as the server's names.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "recent" | "collected" => Some(Self::Recent),
            "timelapse" | "generated" => Some(Self::Timelapse),
            "saved" | "pinned" => Some(Self::Saved),
            "motion" => Some(Self::Motion),
            _ => None,
        }
    }

    pub fn route_segment(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Timelapse => "timelapse",
            Self::Saved => "saved",
            Self::Motion => "motion",
        }
    }

    pub fn endpoint_segment(self) -> &'static str {
        match self {
            Self::Recent => "collected",
            Self::Timelapse => "generated",
            Self::Saved => "pinned",
            Self::Motion => "motion",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Recent => "Recent",
            Self::Timelapse => "Timelapse",
            Self::Saved => "Saved",
            Self::Motion => "Motion",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_segments_parse_back() {
        for kind in MediaKind::ALL {
            assert_eq!(MediaKind::from_segment(kind.route_segment()), Some(kind));
            assert_eq!(MediaKind::from_segment(kind.endpoint_segment()), Some(kind));
        }
    }

    #[test]
    fn unknown_segment() {
        assert_eq!(MediaKind::from_segment("thumbnails"), None);
        assert_eq!(MediaKind::from_segment(""), None);
    }
}
