mod api_error;
mod camera;
mod config;
mod kind;
pub mod media;
mod nav;
mod promise;
mod status;
mod store;

pub use crate::data::{
    api_error::ApiError,
    camera::{Camera, ClientState, ImageList, ImageRef, ServiceConfig, NO_CAMERA_NAME},
    config::Config,
    kind::MediaKind,
    nav::{History, Route},
    promise::Promise,
    status::{ActiveError, ErrorSurface, Waiting},
    store::{Store, DEFAULT_SERVICE_NAME},
};
