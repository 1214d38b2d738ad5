use crate::{
    dashboard::Dashboard,
    data::{ApiError, ErrorSurface, ImageList, ImageRef, MediaKind, Waiting},
    orchestrator::{Call, Orchestrator},
};

pub const PAGE_SIZE: usize = 9;

/// One-based page position inside a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub current: usize,
    per: usize,
}

impl Cursor {
    pub fn new(per: usize) -> Self {
        Self {
            current: 1,
            per: per.max(1),
        }
    }

    pub fn per(&self) -> usize {
        self.per
    }

    pub fn skip(&self) -> usize {
        (self.current.max(1) - 1).saturating_mul(self.per)
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageQuery {
    pub camera: String,
    pub kind: MediaKind,
    pub skip: usize,
    pub per: usize,
}

/// Paginated listing of one camera's images of one kind.
#[derive(Default)]
pub struct Gallery {
    params: Option<(String, MediaKind)>,
    pub cursor: Cursor,
    image_list: Vec<ImageRef>,
    camera: String,
    results: usize,
    pending: Option<PageQuery>,
    pub waiting: Waiting,
    pub error: ErrorSurface,
}

impl Gallery {
    pub fn is_active(&self) -> bool {
        self.params.is_some()
    }

    pub fn kind(&self) -> Option<MediaKind> {
        self.params.as_ref().map(|(_, kind)| *kind)
    }

    pub fn label(&self) -> &'static str {
        self.kind().map_or("", MediaKind::label)
    }

    pub fn image_list(&self) -> &[ImageRef] {
        &self.image_list
    }

    /// Camera display name, as reported by the last listing.
    pub fn camera(&self) -> &str {
        &self.camera
    }

    pub fn results(&self) -> usize {
        self.results
    }

    pub fn pages(&self) -> usize {
        self.results.div_ceil(self.cursor.per())
    }

    pub fn has_next(&self) -> bool {
        self.cursor.current < self.pages()
    }

    pub fn has_previous(&self) -> bool {
        self.cursor.current > 1
    }

    /// Shows `camera`'s `kind` listing.  Entering with different parameters
    /// starts over from page one.
    pub fn enter(&mut self, ctx: &Orchestrator<Dashboard>, camera: String, kind: MediaKind) {
        let params = (camera, kind);
        if self.params.as_ref() != Some(&params) {
            self.cursor.reset();
            self.image_list.clear();
            self.camera.clear();
            self.results = 0;
            self.error.reset();
            self.params = Some(params);
        }
        self.update(ctx, None);
    }

    pub fn leave(&mut self) {
        self.params = None;
        self.pending = None;
        self.error.reset();
    }

    /// Fetches `page`, or the current page again.
    pub fn update(&mut self, ctx: &Orchestrator<Dashboard>, page: Option<usize>) {
        let Some((camera, kind)) = self.params.clone() else {
            log::warn!("no gallery to update");
            return;
        };
        if let Some(page) = page {
            self.cursor.current = match self.pages() {
                0 => page.max(1),
                last => page.clamp(1, last),
            };
        }
        let query = PageQuery {
            camera,
            kind,
            skip: self.cursor.skip(),
            per: self.cursor.per(),
        };
        self.pending = Some(query.clone());

        let request = query.clone();
        let on_error = query.clone();
        ctx.call(
            &mut self.waiting,
            Call::new(gallery_waiting, move |api| {
                api.get_image_list(&request.camera, request.kind, request.skip, request.per)
            })
            .on_success(move |d: &mut Dashboard, list| d.gallery.receive(&query, list))
            .on_error(move |d: &mut Dashboard, status, error| {
                d.gallery.fail(&on_error, status, error)
            }),
        );
    }

    pub fn next(&mut self, ctx: &Orchestrator<Dashboard>) {
        if self.has_next() {
            self.update(ctx, Some(self.cursor.current + 1));
        }
    }

    pub fn previous(&mut self, ctx: &Orchestrator<Dashboard>) {
        if self.has_previous() {
            self.update(ctx, Some(self.cursor.current - 1));
        }
    }

    fn is_pending(&self, query: &PageQuery) -> bool {
        if self.pending.as_ref() == Some(query) {
            true
        } else {
            log::debug!("discarding superseded listing {:?}", query);
            false
        }
    }

    fn receive(&mut self, query: &PageQuery, list: ImageList) {
        if self.is_pending(query) {
            self.pending = None;
            self.image_list = list.images;
            self.camera = list.camera;
            self.results = list.total;
        }
    }

    fn fail(&mut self, query: &PageQuery, status: u16, error: ApiError) {
        if self.is_pending(query) {
            self.pending = None;
            self.error.set(status, error);
        }
    }
}

fn gallery_waiting(d: &mut Dashboard) -> &mut Waiting {
    &mut d.gallery.waiting
}
