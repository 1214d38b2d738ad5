use std::sync::Arc;

use crate::{
    controller::{
        gallery::Gallery,
        lightbox::Lightbox,
        nav,
        refresh::{Epoch, RefreshLoop},
        settings::Settings,
    },
    data::{ApiError, ClientState, Config, ErrorSurface, History, Route, Store},
    orchestrator::Orchestrator,
    runtime::{Executor, Sink},
    webapi::WebApi,
};

/// Everything the dashboard shows, owned by the dispatcher thread.  All
/// mutation happens in jobs applied by the dispatcher, so no part of it is
/// ever touched concurrently.
pub struct Dashboard {
    pub store: Store,
    pub history: History,
    pub refresh: RefreshLoop,
    pub errors: ErrorSurface,
    pub gallery: Gallery,
    pub lightbox: Lightbox,
    pub settings: Settings,
    ctx: Orchestrator<Dashboard>,
    mounted: bool,
}

impl Dashboard {
    pub fn new(
        config: &Config,
        api: Arc<WebApi>,
        executor: Arc<dyn Executor>,
        sink: Sink<Dashboard>,
    ) -> Self {
        Self {
            store: Store::default(),
            history: History::default(),
            refresh: RefreshLoop::new(config.refresh_interval()),
            errors: ErrorSurface::default(),
            gallery: Gallery::default(),
            lightbox: Lightbox::default(),
            settings: Settings::default(),
            ctx: Orchestrator::new(api, executor, sink),
            mounted: false,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Mounts the dashboard at `route` and starts refreshing.
    pub fn activate(&mut self, route: Route) {
        log::info!("activating at {}", route);
        self.mounted = true;
        self.history.replace(route);
        self.location_changed();
    }

    /// Stops the refresh loop and closes every view.  Responses still in
    /// flight are discarded when they land.  Safe to call more than once.
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        log::info!("tearing down");
        self.mounted = false;
        self.refresh.stop();
        self.gallery.leave();
        self.lightbox.leave();
        self.settings.leave();
        self.errors.reset();
    }

    pub fn navigate(&mut self, route: Route) {
        log::info!("navigating to {}", route);
        self.history.push(route);
        self.location_changed();
    }

    pub fn back(&mut self) {
        if self.history.back() {
            self.location_changed();
        } else {
            log::debug!("no history to go back to");
        }
    }

    pub fn select_camera(&mut self, id: &str) {
        self.navigate(Route::Camera(id.to_string()));
    }

    /// Route of the server's default page, or the root.
    pub fn default_route(&self) -> Route {
        match self.store.default_path() {
            "" => Route::Root,
            path => Route::parse(path),
        }
    }

    pub fn gallery_page(&mut self, page: usize) {
        self.gallery.update(&self.ctx, Some(page));
    }

    pub fn gallery_next(&mut self) {
        self.gallery.next(&self.ctx);
    }

    pub fn gallery_previous(&mut self) {
        self.gallery.previous(&self.ctx);
    }

    pub fn pin_image(&mut self) {
        self.lightbox.pin(&self.ctx);
    }

    pub fn save_image(&mut self) {
        self.lightbox.save(&self.ctx);
    }

    pub fn submit_settings(&mut self) {
        self.settings.submit(&self.ctx);
    }

    pub fn cancel_settings(&mut self) {
        let route = self.default_route();
        self.navigate(route);
    }

    /// Dismisses every recoverable error on screen.
    pub fn dismiss_errors(&mut self) {
        self.errors.clear();
        self.gallery.error.clear();
        self.lightbox.error.clear();
        self.settings.error.clear();
    }

    fn location_changed(&mut self) {
        if !self.mounted {
            return;
        }
        nav::resolve(&mut self.store, &mut self.history);
        self.enter_view();
        self.refresh.start(&self.ctx);
    }

    fn enter_view(&mut self) {
        match self.history.current().clone() {
            Route::Gallery { camera, kind } => {
                self.lightbox.leave();
                self.settings.leave();
                self.gallery.enter(&self.ctx, camera, kind);
            }
            Route::Lightbox(handle) | Route::Player(handle) => {
                self.gallery.leave();
                self.settings.leave();
                self.lightbox.enter(&self.ctx, handle);
            }
            Route::Settings => {
                self.gallery.leave();
                self.lightbox.leave();
                self.settings.enter(&self.ctx);
            }
            _ => {
                self.gallery.leave();
                self.lightbox.leave();
                self.settings.leave();
            }
        }
    }

    /// Timer callback of the refresh loop started under `epoch`.
    pub fn refresh_tick(&mut self, epoch: Epoch) {
        if self.refresh.accepts(epoch) {
            self.refresh.refresh(&self.ctx, epoch);
        } else {
            log::debug!("ignoring tick of stale refresh loop {}", epoch);
        }
    }

    pub(crate) fn apply_refresh(&mut self, epoch: Epoch, state: ClientState) {
        if !self.refresh.accepts(epoch) {
            log::debug!("discarding state from stale refresh loop {}", epoch);
            return;
        }
        self.store.apply(state);
        if nav::resolve(&mut self.store, &mut self.history).is_some() {
            self.enter_view();
            self.refresh.start(&self.ctx);
        }
    }

    pub(crate) fn refresh_failed(&mut self, epoch: Epoch, status: u16, error: ApiError) {
        if self.refresh.accepts(epoch) {
            self.errors.set(status, error);
        } else {
            log::debug!("discarding error from stale refresh loop {}", epoch);
        }
    }

    pub(crate) fn settings_saved(&mut self) {
        log::info!("settings saved");
        if !self.mounted {
            return;
        }
        let route = self.default_route();
        self.navigate(route);
    }
}
