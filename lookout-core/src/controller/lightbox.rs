use crate::{
    dashboard::Dashboard,
    data::{ErrorSurface, ImageRef, Promise, Waiting},
    error::Error,
    orchestrator::{Call, Orchestrator},
    webapi::{Ack, WebApi},
};

/// Full-size view of one image or clip, with its metadata.
#[derive(Default)]
pub struct Lightbox {
    pub meta: Promise<ImageRef, String>,
    pub waiting: Waiting,
    pub error: ErrorSurface,
}

impl Lightbox {
    pub fn handle(&self) -> Option<&str> {
        self.meta
            .deferred()
            .or_else(|| self.meta.resolved().map(|meta| &meta.handle))
            .map(String::as_str)
    }

    pub fn enter(&mut self, ctx: &Orchestrator<Dashboard>, handle: String) {
        if self.handle() == Some(handle.as_str()) && self.meta.is_resolved() {
            return;
        }
        self.error.reset();
        self.meta.defer(handle.clone());

        let request = handle.clone();
        let on_error = handle.clone();
        ctx.call(
            &mut self.waiting,
            Call::new(lightbox_waiting, move |api| api.get_image_meta(&request))
                .on_success(move |d: &mut Dashboard, mut meta: ImageRef| {
                    meta.handle = handle.clone();
                    d.lightbox.meta.update((handle, Ok(meta)));
                })
                .on_error(move |d: &mut Dashboard, status, error| {
                    if d.lightbox.meta.update((on_error, Err(error.clone()))) {
                        d.lightbox.error.set(status, error);
                    }
                }),
        );
    }

    pub fn leave(&mut self) {
        self.meta.clear();
        self.error.reset();
    }

    pub fn pin(&mut self, ctx: &Orchestrator<Dashboard>) {
        self.keep(ctx, WebApi::pin_image);
    }

    pub fn save(&mut self, ctx: &Orchestrator<Dashboard>) {
        self.keep(ctx, WebApi::save_image);
    }

    fn keep(
        &mut self,
        ctx: &Orchestrator<Dashboard>,
        endpoint: fn(&WebApi, &str) -> Result<Ack, Error>,
    ) {
        let Some(handle) = self.handle().map(str::to_string) else {
            log::warn!("nothing to keep, no image is open");
            return;
        };
        let request = handle.clone();
        let on_error = handle.clone();
        ctx.call(
            &mut self.waiting,
            Call::new(lightbox_waiting, move |api| endpoint(api, &request))
                .on_success(move |d: &mut Dashboard, _| d.lightbox.mark_pinned(&handle))
                .on_error(move |d: &mut Dashboard, status, error| {
                    if d.is_mounted() && d.lightbox.handle() == Some(on_error.as_str()) {
                        d.lightbox.error.set(status, error);
                    } else {
                        log::debug!("{} is no longer open", on_error);
                    }
                }),
        );
    }

    fn mark_pinned(&mut self, handle: &str) {
        match self.meta.resolved_mut() {
            Some(meta) if meta.handle == handle => meta.is_pinned = Some(true),
            _ => log::debug!("{} is no longer open", handle),
        }
    }
}

fn lightbox_waiting(d: &mut Dashboard) -> &mut Waiting {
    &mut d.lightbox.waiting
}
