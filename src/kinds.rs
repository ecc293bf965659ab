//! Closed sets of names accepted by the Dokploy API.
//!
//! Each type round-trips through the exact string Dokploy expects, parses
//! case-insensitively, and serializes as that string.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Declares an enum with `ALL`, `as_str`, `Display` and `FromStr`.
///
/// ```ignore
/// closed_set! {
///     /// Doc for the enum.
///     pub enum Flavor("flavor") {
///         /// Doc for the variant.
///         Vanilla => "vanilla",
///     }
/// }
/// ```
macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        pub enum $name:ident($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $value)] $variant ),+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Name as sent to the API.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|member| member.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| ConfigError::UnknownKind {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

closed_set! {
    /// Where an application's code comes from.
    pub enum SourceType("source type") {
        /// Prebuilt image from a registry.
        Docker => "docker",
        /// GitHub repository.
        Github => "github",
        /// GitLab repository.
        Gitlab => "gitlab",
        /// Bitbucket repository.
        Bitbucket => "bitbucket",
        /// Inline compose file.
        Raw => "raw",
    }
}

closed_set! {
    /// How Dokploy builds an application image.
    pub enum BuildType("build type") {
        /// `docker build` with the project Dockerfile.
        Dockerfile => "dockerfile",
        /// Nixpacks autodetection.
        Nixpacks => "nixpacks",
        /// Heroku buildpacks.
        Heroku => "heroku",
        /// Paketo buildpacks.
        Paketo => "paketo",
        /// Static file server.
        Static => "static",
    }
}

closed_set! {
    /// Orchestration mode of a compose stack.
    pub enum ComposeType("compose type") {
        /// Plain `docker compose`.
        DockerCompose => "docker-compose",
        /// Docker Swarm stack.
        Stack => "stack",
    }
}

closed_set! {
    /// TLS certificate provisioning for a domain.
    pub enum CertificateType("certificate type") {
        /// Issued through Let's Encrypt.
        Letsencrypt => "letsencrypt",
        /// Plain HTTP or externally terminated TLS.
        None => "none",
    }
}
