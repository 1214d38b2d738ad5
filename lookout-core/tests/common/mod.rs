#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use serde_json::Value;
use url::Url;

use lookout_core::{
    data::Config,
    error::Error,
    runtime::{Dispatcher, Immediate},
    webapi::{Method, Response, Transport, WebApi},
    Dashboard,
};

pub const BASE_URL: &str = "http://cams.test/";

pub const TWO_CAMERAS: &str = r#"{"Artifact": {
    "Cameras": [{"ID": "c1", "Name": "Porch"}, {"ID": "c2", "Name": "Yard"}],
    "ServiceName": "Backyard",
    "DefaultImage": "/static/none.jpg",
    "DefaultPath": "/camera/c2"
}}"#;

pub const NO_CAMERAS: &str = r#"{"Artifact": {"Cameras": [], "ServiceName": "Backyard"}}"#;

/// Answers by URL path.  Unknown paths fail as if the server was down.
#[derive(Default)]
pub struct Scripted {
    routes: Mutex<HashMap<String, (u16, String)>>,
    seen: Mutex<Vec<(Method, String)>>,
}

impl Scripted {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, path: &str, status: u16, body: &str) {
        self.routes
            .lock()
            .insert(path.to_string(), (status, body.to_string()));
    }

    /// Full URLs of every request made to `path`.
    pub fn requests(&self, method: Method, path: &str) -> Vec<String> {
        self.seen
            .lock()
            .iter()
            .filter(|(m, url)| *m == method && Url::parse(url).is_ok_and(|u| u.path() == path))
            .map(|(_, url)| url.clone())
            .collect()
    }
}

impl Transport for Scripted {
    fn send(&self, method: Method, url: &Url, _body: Option<&Value>) -> Result<Response, Error> {
        self.seen.lock().push((method, url.to_string()));
        match self.routes.lock().get(url.path()) {
            Some((status, body)) => Ok(Response {
                status: *status,
                body: body.clone().into_bytes(),
            }),
            None => Err(Error::Transport("connection refused".into())),
        }
    }
}

pub fn api(server: &Arc<Scripted>) -> Arc<WebApi> {
    Arc::new(WebApi::with_transport(BASE_URL, Arc::clone(server)).unwrap())
}

pub struct Harness {
    pub dispatcher: Dispatcher<Dashboard>,
    pub dashboard: Dashboard,
    pub server: Arc<Scripted>,
}

impl Harness {
    pub fn new(server: Arc<Scripted>) -> Self {
        let dispatcher = Dispatcher::new();
        let config = Config {
            refresh_interval_ms: 60_000,
            ..Config::default()
        };
        let dashboard =
            Dashboard::new(&config, api(&server), Arc::new(Immediate), dispatcher.sink());
        Self {
            dispatcher,
            dashboard,
            server,
        }
    }

    /// Applies every completion that has landed so far.
    pub fn settle(&mut self) -> usize {
        self.dispatcher.run_pending(&mut self.dashboard)
    }
}
