use itertools::Itertools;

use crate::{
    dashboard::Dashboard,
    data::{ApiError, ErrorSurface, Promise, ServiceConfig, Waiting},
    orchestrator::{Call, Orchestrator},
    util::Sequence,
};

/// The settings form as typed, before validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsForm {
    pub service_name: String,
    pub client_limit: String,
    pub cert_duration: String,
    pub whitelisted_domains: String,
}

impl SettingsForm {
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            service_name: config.service_name.clone(),
            client_limit: config.client_limit.to_string(),
            cert_duration: config.issued_cert_duration.to_string(),
            whitelisted_domains: config.whitelisted_domains.iter().join(" "),
        }
    }

    pub fn validate(&self) -> Result<ServiceConfig, ApiError> {
        let client_limit = self
            .client_limit
            .trim()
            .parse::<i64>()
            .map_err(|_| ApiError::validation("Max clients must be a number."))?;
        let issued_cert_duration = self
            .cert_duration
            .trim()
            .parse::<i64>()
            .map_err(|_| ApiError::validation("Refresh period must be a number."))?;
        Ok(ServiceConfig {
            service_name: self.service_name.trim().to_string(),
            client_limit,
            issued_cert_duration,
            whitelisted_domains: self
                .whitelisted_domains
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        })
    }
}

/// Settings page.  Each visit is numbered so that responses meant for an
/// earlier visit are dropped.
#[derive(Default)]
pub struct Settings {
    pub form: SettingsForm,
    pub loaded: Promise<ServiceConfig, u64>,
    pub waiting: Waiting,
    pub error: ErrorSurface,
    visits: Sequence<u64>,
    visit: Option<u64>,
}

impl Settings {
    pub fn is_active(&self) -> bool {
        self.visit.is_some()
    }

    fn is_visit(&self, visit: u64) -> bool {
        self.visit == Some(visit)
    }

    pub fn enter(&mut self, ctx: &Orchestrator<Dashboard>) {
        let visit = self.visits.advance();
        self.visit = Some(visit);
        self.error.reset();
        self.loaded.defer(visit);
        ctx.call(
            &mut self.waiting,
            Call::new(settings_waiting, |api| api.get_config())
                .on_success(move |d: &mut Dashboard, config: ServiceConfig| {
                    let form = SettingsForm::from_config(&config);
                    if d.settings.loaded.update((visit, Ok(config))) {
                        d.settings.form = form;
                    }
                })
                .on_error(move |d: &mut Dashboard, status, error| {
                    if d.settings.loaded.update((visit, Err(error.clone()))) {
                        d.settings.error.set(status, error);
                    }
                }),
        );
    }

    pub fn leave(&mut self) {
        self.visit = None;
        self.loaded.clear();
        self.form = SettingsForm::default();
        self.error.reset();
    }

    /// Validates the form locally and saves it.  Invalid input never reaches
    /// the server.
    pub fn submit(&mut self, ctx: &Orchestrator<Dashboard>) {
        let Some(visit) = self.visit else {
            log::warn!("settings are not open");
            return;
        };
        let config = match self.form.validate() {
            Ok(config) => config,
            Err(error) => {
                self.error.set(0, error);
                return;
            }
        };
        self.error.clear();
        ctx.call(
            &mut self.waiting,
            Call::new(settings_waiting, move |api| api.put_config(&config))
                .on_success(move |d: &mut Dashboard, _| {
                    if d.settings.is_visit(visit) {
                        d.settings_saved();
                    } else {
                        log::debug!("settings saved after leaving the page");
                    }
                })
                .on_error(move |d: &mut Dashboard, status, error| {
                    if d.settings.is_visit(visit) {
                        d.settings.error.set(status, error);
                    }
                }),
        );
    }
}

fn settings_waiting(d: &mut Dashboard) -> &mut Waiting {
    &mut d.settings.waiting
}
