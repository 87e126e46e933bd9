//! # groundwork-http
//!
//! Outbound HTTP for Groundwork. A [`ClientRegistry`] holds one configured
//! `reqwest` client per downstream service; its builder walks the caller
//! through client, URI, method and content type before the optional auth,
//! header, query and path settings, producing a [`Communicator`] that sends
//! one request and decodes the reply.

#![warn(missing_docs)]

pub mod body;
pub mod client;
pub mod communicator;
pub mod content_type;
pub mod context;
pub mod uri;

pub use body::{Reply, RequestBody};
pub use client::{ClientRegistry, NamedClient};
pub use communicator::{
    ClientStep, Communicator, CommunicatorBuilder, ContentTypeStep, MethodStep, UriStep,
};
pub use context::InboundContext;
pub use reqwest::Method;
