//! Typed wrappers for projects, servers, SSH keys and deployments.
//!
//! Listings are plain `GET`s. Mutations on servers and SSH keys go through
//! the batched RPC routes, so their payloads are wrapped with
//! [`rpc::wrap_batch`] and their answers unwrapped with
//! [`rpc::unwrap_result`]. Listings bypass the envelope on purpose: they are
//! served as bare JSON arrays, and unwrapping one would keep only its first
//! entry. Lookups by name always fetch the full listing.
//!
//! Listing entries are decoded one by one. An entry that does not fit the
//! expected shape is skipped with a warning, so one odd record cannot hide
//! the rest; only a listing that is not an array is an error.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

use super::client::{DokployClient, RequestOptions};
use super::rpc;
use crate::constants::{DEFAULT_SSH_PORT, DEFAULT_SSH_USER, DEPLOY_TIMEOUT, Endpoints};
use crate::error::ApiError;

/// A Dokploy project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project identifier.
    pub project_id: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

fn default_ssh_port() -> u16 {
    DEFAULT_SSH_PORT
}

fn default_ssh_user() -> String {
    DEFAULT_SSH_USER.to_string()
}

// Dokploy sends `null` for unset columns; treat it like an absent field.
fn ssh_port_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    Ok(Option::<u16>::deserialize(deserializer)?.unwrap_or(DEFAULT_SSH_PORT))
}

fn ssh_user_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_ssh_user))
}

fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A remote server registered in Dokploy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /// Server identifier.
    #[serde(alias = "id")]
    pub server_id: String,
    /// Unique display name.
    pub name: String,
    /// Public or tailnet IP address.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub ip_address: String,
    /// SSH port.
    #[serde(default = "default_ssh_port", deserialize_with = "ssh_port_or_default")]
    pub port: u16,
    /// SSH user.
    #[serde(default = "default_ssh_user", deserialize_with = "ssh_user_or_default")]
    pub username: String,
    /// `deploy` or `build`.
    #[serde(default)]
    pub server_type: Option<String>,
    /// SSH key used to reach the server.
    #[serde(default)]
    pub ssh_key_id: Option<String>,
}

/// Fields for registering or updating a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSpec {
    /// Unique display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// IP address Dokploy connects to.
    pub ip_address: String,
    /// SSH port.
    pub port: u16,
    /// SSH user.
    pub username: String,
    /// SSH key used to reach the server.
    pub ssh_key_id: String,
    /// `deploy` or `build`.
    pub server_type: String,
}

impl ServerSpec {
    /// A deploy server reached as `root` on port 22.
    #[must_use]
    pub fn new(name: &str, ip_address: &str, ssh_key_id: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            ip_address: ip_address.to_string(),
            port: DEFAULT_SSH_PORT,
            username: DEFAULT_SSH_USER.to_string(),
            ssh_key_id: ssh_key_id.to_string(),
            server_type: "deploy".to_string(),
        }
    }

    fn payload(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "ipAddress": self.ip_address,
            "port": self.port,
            "username": self.username,
            "sshKeyId": self.ssh_key_id,
            "serverType": self.server_type,
        })
    }
}

/// An SSH key stored in Dokploy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SshKey {
    /// Key identifier.
    #[serde(alias = "id")]
    pub ssh_key_id: String,
    /// Unique display name.
    pub name: String,
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, ApiError> {
    let raw = value.to_string();
    serde_json::from_value(value).map_err(|e| ApiError::InvalidResponse {
        message: format!("Unexpected {what} response: {e}"),
        body: Some(raw),
    })
}

fn decode_listing<T: DeserializeOwned>(value: Value, what: &str) -> Result<Vec<T>, ApiError> {
    let Value::Array(entries) = value else {
        return Err(ApiError::InvalidResponse {
            message: format!("Unexpected {what} response: expected an array"),
            body: Some(value.to_string()),
        });
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("skipping {what} entry {index}: {e}");
                None
            }
        })
        .collect())
}

impl DokployClient {
    /// `POST` a payload through the batched RPC envelope and unwrap the result.
    ///
    /// # Errors
    ///
    /// See [`post`](Self::post).
    pub fn rpc_call(&self, endpoint: &str, payload: Value) -> Result<Value, ApiError> {
        let response = self.post(
            endpoint,
            Some(&rpc::wrap_batch(payload)),
            RequestOptions::default(),
        )?;
        Ok(rpc::unwrap_result(response))
    }

    /// List all projects.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the listing is not an array.
    pub fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let value = self.get(Endpoints::PROJECT_ALL, &[], RequestOptions::default())?;
        decode_listing(value, "project listing")
    }

    /// List all registered servers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the listing is not an array.
    pub fn list_servers(&self) -> Result<Vec<Server>, ApiError> {
        let value = self.get(Endpoints::SERVER_ALL, &[], RequestOptions::default())?;
        decode_listing(value, "server listing")
    }

    /// Find the first server whose name equals `name` exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be fetched.
    pub fn get_server_by_name(&self, name: &str) -> Result<Option<Server>, ApiError> {
        Ok(self.list_servers()?.into_iter().find(|s| s.name == name))
    }

    /// Register a new server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the created server cannot be
    /// decoded.
    pub fn create_server(&self, spec: &ServerSpec) -> Result<Server, ApiError> {
        tracing::info!("creating server {} ({})", spec.name, spec.ip_address);
        let created = self.rpc_call(Endpoints::SERVER_CREATE, spec.payload())?;
        decode(created, "server create")
    }

    /// Overwrite the settings of server `server_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub fn update_server(&self, server_id: &str, spec: &ServerSpec) -> Result<Value, ApiError> {
        tracing::info!("updating server {} ({server_id})", spec.name);
        let mut payload = spec.payload();
        if let Value::Object(fields) = &mut payload {
            fields.insert("serverId".to_string(), Value::String(server_id.to_string()));
        }
        self.rpc_call(Endpoints::SERVER_UPDATE, payload)
    }

    /// List all SSH keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the listing is not an array.
    pub fn list_ssh_keys(&self) -> Result<Vec<SshKey>, ApiError> {
        let value = self.get(Endpoints::SSH_KEY_ALL, &[], RequestOptions::default())?;
        decode_listing(value, "SSH key listing")
    }

    /// Find the first SSH key whose name equals `name` exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be fetched.
    pub fn get_ssh_key_by_name(&self, name: &str) -> Result<Option<SshKey>, ApiError> {
        Ok(self.list_ssh_keys()?.into_iter().find(|k| k.name == name))
    }

    /// Store a new SSH key pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub fn create_ssh_key(
        &self,
        name: &str,
        private_key: &str,
        public_key: &str,
    ) -> Result<Value, ApiError> {
        tracing::info!("creating SSH key {name}");
        self.rpc_call(
            Endpoints::SSH_KEY_CREATE,
            json!({
                "name": name,
                "description": "",
                "privateKey": private_key,
                "publicKey": public_key,
            }),
        )
    }

    /// Queue a deployment of application `application_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub fn deploy_application(&self, application_id: &str) -> Result<Value, ApiError> {
        tracing::info!("deploying application {application_id}");
        self.post(
            Endpoints::APPLICATION_DEPLOY,
            Some(&json!({ "applicationId": application_id })),
            RequestOptions::new().timeout(DEPLOY_TIMEOUT),
        )
    }

    /// Queue a deployment of compose stack `compose_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub fn deploy_compose(&self, compose_id: &str) -> Result<Value, ApiError> {
        tracing::info!("deploying compose {compose_id}");
        self.post(
            Endpoints::COMPOSE_DEPLOY,
            Some(&json!({ "composeId": compose_id })),
            RequestOptions::new().timeout(DEPLOY_TIMEOUT),
        )
    }
}
