//! Dokploy REST API client.
//!
//! - **[`DokployClient`]** — authenticated `GET`/`POST` with status mapping,
//!   sign-in and token verification
//! - **[`resources`]** — projects, servers, SSH keys and deployments
//! - **[`rpc`]** — the batched RPC request/response envelope
//! - **[`transport`]** — the HTTP seam, backed by `ureq`
//!
//! Every call is blocking and is attempted exactly once.

mod client;
pub mod resources;
pub mod rpc;
mod settings;
pub mod transport;

pub use client::{ApiResponse, AuthScheme, DokployClient, RequestOptions};
pub use resources::{Project, Server, ServerSpec, SshKey};
pub use settings::ClientSettings;
pub use transport::{HttpRequest, HttpResponse, Method, Transport, UreqTransport};
