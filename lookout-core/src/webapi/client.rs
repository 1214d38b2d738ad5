use std::{fmt, sync::Arc};

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use ureq::Agent;
use url::Url;

use crate::{
    data::{ApiError, ClientState, ImageList, ImageRef, MediaKind, ServiceConfig},
    error::Error,
    util::default_ureq_agent_builder,
};

use super::cache::WebApiCache;

/// Acknowledgement artifact, only its presence matters.
pub type Ack = Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Put => f.write_str("PUT"),
        }
    }
}

/// Raw HTTP answer, before envelope decoding.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends one HTTP request.  Returns `Err` only when no response arrived.
pub trait Transport: Send + Sync {
    fn send(&self, method: Method, url: &Url, body: Option<&Value>) -> Result<Response, Error>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, method: Method, url: &Url, body: Option<&Value>) -> Result<Response, Error> {
        (**self).send(method, url, body)
    }
}

pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(proxy_url: Option<&str>) -> Self {
        Self {
            agent: default_ureq_agent_builder(proxy_url).build().into(),
        }
    }
}

impl Transport for UreqTransport {
    fn send(&self, method: Method, url: &Url, body: Option<&Value>) -> Result<Response, Error> {
        let mut response = match (method, body) {
            (Method::Get, _) => self
                .agent
                .get(url.as_str())
                .header("Accept", "application/json")
                .call()?,
            (Method::Put, Some(body)) => self.agent.put(url.as_str()).send_json(body)?,
            (Method::Put, None) => self.agent.put(url.as_str()).send_empty()?,
        };
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_vec()?;
        Ok(Response { status, body })
    }
}

pub struct WebApi {
    base: Url,
    transport: Box<dyn Transport>,
    cache: WebApiCache,
}

impl WebApi {
    pub fn new(base_url: &str, proxy_url: Option<&str>) -> Result<Self, Error> {
        Self::with_transport(base_url, UreqTransport::new(proxy_url))
    }

    pub fn with_transport(
        base_url: &str,
        transport: impl Transport + 'static,
    ) -> Result<Self, Error> {
        let mut base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(Error::ConfigError(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            base,
            transport: Box::new(transport),
            cache: WebApiCache::new(),
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Send a request and decode the artifact of the response envelope.
    fn load<T: DeserializeOwned>(&self, request: &RequestBuilder) -> Result<T, Error> {
        let url = request.build(&self.base)?;
        log::debug!("{} {}", request.method, url);
        let response = self
            .transport
            .send(request.method, &url, request.body.as_ref())?;
        decode_envelope(response.status, &response.body)
    }
}

/// Client endpoints.
impl WebApi {
    // https://<server>/client/state
    pub fn get_state(&self) -> Result<ClientState, Error> {
        let request = RequestBuilder::new(Method::Get, ["client", "state"]);
        self.load(&request)
    }

    // https://<server>/client/images/{camera}/{kind}?skip=N&per=M
    pub fn get_image_list(
        &self,
        camera: &str,
        kind: MediaKind,
        skip: usize,
        per: usize,
    ) -> Result<ImageList, Error> {
        let request = RequestBuilder::new(
            Method::Get,
            ["client", "images", camera, kind.endpoint_segment()],
        )
        .query("skip", skip)
        .query("per", per);
        self.load(&request)
    }

    // https://<server>/client/imagemeta/{handle}
    pub fn get_image_meta(&self, handle: &str) -> Result<ImageRef, Error> {
        if let Some(meta) = self.cache.get_image_meta(handle) {
            return Ok(meta);
        }
        let request = RequestBuilder::new(Method::Get, ["client", "imagemeta", handle]);
        let meta: ImageRef = self.load(&request)?;
        self.cache.set_image_meta(handle.to_string(), meta.clone());
        Ok(meta)
    }

    // https://<server>/client/pin/{handle}
    pub fn pin_image(&self, handle: &str) -> Result<Ack, Error> {
        let request = RequestBuilder::new(Method::Put, ["client", "pin", handle]);
        let ack = self.load(&request)?;
        self.cache.forget_image_meta(handle);
        Ok(ack)
    }

    // https://<server>/client/save/{handle}
    pub fn save_image(&self, handle: &str) -> Result<Ack, Error> {
        let request = RequestBuilder::new(Method::Put, ["client", "save", handle]);
        let ack = self.load(&request)?;
        self.cache.forget_image_meta(handle);
        Ok(ack)
    }
}

/// Admin endpoints.
impl WebApi {
    // https://<server>/api/config
    pub fn get_config(&self) -> Result<ServiceConfig, Error> {
        let request = RequestBuilder::new(Method::Get, ["api", "config"]);
        self.load(&request)
    }

    // https://<server>/api/config
    pub fn put_config(&self, config: &ServiceConfig) -> Result<Ack, Error> {
        let request = RequestBuilder::new(Method::Put, ["api", "config"])
            .body(serde_json::to_value(config)?);
        self.load(&request)
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "Artifact", default)]
    artifact: Option<Value>,
    #[serde(rename = "Error", default)]
    error: Option<ApiError>,
}

/// A 2xx response with an artifact is a success; everything else becomes
/// `Error::Api`, carrying the server's error payload if there was one.
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, Error> {
    let envelope: Envelope = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(err) => {
            log::warn!("malformed response body (status {}): {}", status, err);
            return Err(Error::Api {
                status,
                error: None,
            });
        }
    };
    match envelope.artifact {
        Some(artifact) if (200..300).contains(&status) => {
            serde_json::from_value(artifact).map_err(|err| {
                log::warn!("malformed artifact (status {}): {}", status, err);
                Error::Api {
                    status,
                    error: None,
                }
            })
        }
        _ => Err(Error::Api {
            status,
            error: envelope.error,
        }),
    }
}

#[derive(Debug, Clone)]
struct RequestBuilder {
    method: Method,
    segments: Vec<String>,
    queries: Vec<(String, String)>,
    body: Option<Value>,
}

impl RequestBuilder {
    fn new<I>(method: Method, segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        Self {
            method,
            segments: segments.into_iter().map(|s| s.to_string()).collect(),
            queries: Vec::new(),
            body: None,
        }
    }

    fn query(mut self, key: impl fmt::Display, value: impl fmt::Display) -> Self {
        self.queries.push((key.to_string(), value.to_string()));
        self
    }

    fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    fn build(&self, base: &Url) -> Result<Url, Error> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::ConfigError(format!("{} cannot be used as a base URL", base)))?
            .pop_if_empty()
            .extend(&self.segments);
        if !self.queries.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.queries);
        }
        Ok(url)
    }
}
