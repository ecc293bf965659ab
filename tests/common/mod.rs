// Shared helpers for integration tests.
//
// Provides a temporary project directory with a fluent builder for the files
// the helpers read (dokploy.toml, defaults, .env, Dockerfile) and a scripted
// HTTP transport so API tests never touch the network.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use dokploy_ci::api::{DokployClient, HttpRequest, HttpResponse, Transport};

/// An isolated project directory backed by a [`tempfile::TempDir`].
///
/// The directory is deleted when dropped.
pub struct ProjectFixture {
    /// Temporary directory standing in for a repository checkout.
    pub root: tempfile::TempDir,
}

impl ProjectFixture {
    /// Create an empty project directory.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Path to the project root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path of a file inside the project (may not exist).
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    /// Write `content` to `name` inside the project.
    pub fn with_file(self, name: &str, content: &str) -> Self {
        std::fs::write(self.path(name), content).expect("write fixture file");
        self
    }

    /// Write the project config.
    pub fn with_project_config(self, content: &str) -> Self {
        self.with_file("dokploy.toml", content)
    }

    /// Write a shared defaults file.
    pub fn with_defaults(self, content: &str) -> Self {
        self.with_file("defaults.toml", content)
    }

    /// Write the env file.
    pub fn with_env(self, content: &str) -> Self {
        self.with_file(".env", content)
    }

    /// Write the Dockerfile.
    pub fn with_dockerfile(self, content: &str) -> Self {
        self.with_file("Dockerfile", content)
    }
}

/// Transport that replays canned responses in order and records requests.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    /// Queue a response.
    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(HttpResponse {
                status,
                body: body.to_string(),
            });
        self
    }

    /// Shared handle to the recorded requests.
    pub fn recorder(&self) -> Arc<Mutex<Vec<HttpRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl Transport for ScriptedTransport {
    fn execute(
        &self,
        request: &HttpRequest,
    ) -> Result<HttpResponse, Box<dyn std::error::Error + Send + Sync>> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| "no scripted response left".into())
    }
}

/// Build a client over `transport`, returning it with the request recorder.
pub fn scripted_client(
    transport: ScriptedTransport,
) -> (DokployClient, Arc<Mutex<Vec<HttpRequest>>>) {
    let recorder = transport.recorder();
    let client =
        DokployClient::new("https://dokploy.example.com/", "test-token", None).with_transport(transport);
    (client, recorder)
}

/// Snapshot of the requests recorded so far.
pub fn recorded(recorder: &Arc<Mutex<Vec<HttpRequest>>>) -> Vec<HttpRequest> {
    recorder
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
