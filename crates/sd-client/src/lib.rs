//! # sd-client
//!
//! REST transport for sprintdesk.
//!
//! [`HttpTransport`] is the single path to the backend: it attaches the
//! bearer credential and recovers a 401 with exactly one credential refresh.
//! [`ApiClient`] layers typed list/get/create/update/delete endpoints for
//! every [`sd_core::Resource`] on top of any [`Transport`], plus the sprint
//! actions and the login/registration calls.

pub mod api;
pub mod error;
mod http;
pub mod transport;

pub use api::{ApiClient, ListFilter};
pub use error::ClientError;
pub use transport::{ApiRequest, HttpTransport, Method, Transport, TransportEvent};
