mod cache;
mod client;

pub use client::{decode_envelope, Ack, Method, Response, Transport, UreqTransport, WebApi};
