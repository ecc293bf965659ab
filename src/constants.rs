//! Static values shared across the crate: API endpoints, defaults, file and
//! environment variable names.

use std::time::Duration;

/// Dokploy API endpoint paths, relative to the instance URL.
#[derive(Debug)]
pub struct Endpoints;

impl Endpoints {
    /// Email/password sign-in.
    pub const AUTH_SIGN_IN: &'static str = "/api/auth/sign-in/email";

    /// List all projects.
    pub const PROJECT_ALL: &'static str = "/api/project.all";
    /// Fetch a single project.
    pub const PROJECT_ONE: &'static str = "/api/project.one";
    /// Create a project.
    pub const PROJECT_CREATE: &'static str = "/api/project.create";

    /// Create an environment inside a project.
    pub const ENVIRONMENT_CREATE: &'static str = "/api/environment.create";

    /// Create an application.
    pub const APPLICATION_CREATE: &'static str = "/api/application.create";
    /// Update an application.
    pub const APPLICATION_UPDATE: &'static str = "/api/application.update";
    /// Delete an application.
    pub const APPLICATION_DELETE: &'static str = "/api/application.delete";
    /// Trigger an application deployment.
    pub const APPLICATION_DEPLOY: &'static str = "/api/application.deploy";

    /// Create a compose stack.
    pub const COMPOSE_CREATE: &'static str = "/api/compose.create";
    /// Update a compose stack.
    pub const COMPOSE_UPDATE: &'static str = "/api/compose.update";
    /// Delete a compose stack.
    pub const COMPOSE_DELETE: &'static str = "/api/compose.delete";
    /// Trigger a compose deployment.
    pub const COMPOSE_DEPLOY: &'static str = "/api/compose.deploy";

    /// Attach a domain.
    pub const DOMAIN_CREATE: &'static str = "/api/domain.create";
    /// List domains of a compose stack.
    pub const DOMAIN_BY_COMPOSE_ID: &'static str = "/api/domain.byComposeId";
    /// List domains of an application.
    pub const DOMAIN_BY_APPLICATION_ID: &'static str = "/api/domain.byApplicationId";

    /// Create a volume or bind mount.
    pub const MOUNT_CREATE: &'static str = "/api/mounts.create";

    /// List remote servers.
    pub const SERVER_ALL: &'static str = "/api/server.all";
    /// Register a remote server (batched RPC).
    pub const SERVER_CREATE: &'static str = "/api/trpc/server.create?batch=1";
    /// Update a remote server (batched RPC).
    pub const SERVER_UPDATE: &'static str = "/api/trpc/server.update?batch=1";

    /// List SSH keys.
    pub const SSH_KEY_ALL: &'static str = "/api/sshKey.all";
    /// Create an SSH key (batched RPC).
    pub const SSH_KEY_CREATE: &'static str = "/api/trpc/sshKey.create?batch=1";
}

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Timeout for deploy calls, which block until the build is queued.
pub const DEPLOY_TIMEOUT: Duration = Duration::from_secs(60);

/// Port used when nothing else specifies one.
pub const DEFAULT_APP_PORT: u16 = 3000;
/// Default SSH port for registered servers.
pub const DEFAULT_SSH_PORT: u16 = 22;
/// Default SSH user for registered servers.
pub const DEFAULT_SSH_USER: &str = "root";
/// Name of the SSH key CI registers servers with.
pub const DEFAULT_SSH_KEY_NAME: &str = "nextnode-dokploy-ci";

/// Server hosting Dokploy and Traefik.
pub const TRAEFIK_SERVER: &str = "admin-dokploy";
/// Worker for development and preview deployments.
pub const DEV_SERVER: &str = "dev-worker";
/// Worker for production deployments.
pub const PROD_SERVER: &str = "prod-worker";

/// Public registry host.
pub const REGISTRY_HOST: &str = "registry.nextnode.fr";
/// Registry port.
pub const REGISTRY_PORT: u16 = 5000;
/// Registry host as seen from inside the cluster.
pub const REGISTRY_INTERNAL_HOST: &str = "admin-dokploy";

/// Memory reservation for production and staging.
pub const DEFAULT_MEMORY: &str = "512Mi";
/// Memory limit for production and staging.
pub const DEFAULT_MEMORY_LIMIT: &str = "1Gi";
/// CPU reservation for production and staging.
pub const DEFAULT_CPU: f64 = 0.5;
/// CPU limit for production and staging.
pub const DEFAULT_CPU_LIMIT: f64 = 1.0;
/// Memory reservation for development and previews.
pub const DEV_MEMORY: &str = "128Mi";
/// Memory limit for development and previews.
pub const DEV_MEMORY_LIMIT: &str = "256Mi";
/// CPU reservation for development and previews.
pub const DEV_CPU: f64 = 0.1;
/// CPU limit for development and previews.
pub const DEV_CPU_LIMIT: f64 = 0.25;
/// Replica count when none is configured.
pub const DEFAULT_REPLICAS: u32 = 1;

/// Idle time before Sablier scales an app to zero.
pub const SABLIER_IDLE_TIMEOUT: &str = "30m";
/// Session length granted by a Sablier wake-up.
pub const SABLIER_SESSION_DURATION: &str = "30m";
/// Maximum wait for a scaled-down app to start.
pub const SABLIER_STARTUP_TIMEOUT: &str = "2m";
/// Waiting page theme.
pub const SABLIER_DEFAULT_THEME: &str = "hacker-terminal";

/// Project config file name.
pub const DEFAULT_CONFIG_FILE: &str = "dokploy.toml";
/// Env file consulted for the app port.
pub const DEFAULT_ENV_FILE: &str = ".env";
/// Dockerfile consulted for the app port.
pub const DEFAULT_DOCKERFILE: &str = "Dockerfile";
/// Compose file for compose-based projects.
pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yml";

/// Variable carrying the application port in `.env` and Dockerfile `ARG`s.
pub const APP_PORT_VAR: &str = "APP_PORT";
/// Dokploy instance URL.
pub const DOKPLOY_URL_VAR: &str = "DOKPLOY_URL";
/// Dokploy API token.
pub const DOKPLOY_TOKEN_VAR: &str = "DOKPLOY_TOKEN";
/// Request timeout override in seconds.
pub const DOKPLOY_TIMEOUT_VAR: &str = "DOKPLOY_TIMEOUT";
/// `OWNER/REPO` identifier set by GitHub Actions.
pub const GITHUB_REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";
/// Step output file set by GitHub Actions.
pub const GITHUB_OUTPUT_VAR: &str = "GITHUB_OUTPUT";
/// Set to `true` when running inside GitHub Actions.
pub const GITHUB_ACTIONS_VAR: &str = "GITHUB_ACTIONS";

/// Scheme prepended to computed domains.
pub const URL_SCHEME_HTTPS: &str = "https://";
/// Prefix for development domains.
pub const DEV_DOMAIN_PREFIX: &str = "dev.";
/// Prefix for preview domains.
pub const PREVIEW_DOMAIN_PREFIX: &str = "pr-";
