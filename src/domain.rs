//! Environment-specific domain, URL and application name computation.
//!
//! | environment   | domain               | app name                |
//! |---------------|----------------------|-------------------------|
//! | `production`  | `{base}`             | `{project}`             |
//! | `development` | `dev.{base}`         | `{project}-development` |
//! | `preview`     | `pr-{pr}.dev.{base}` | `{project}-pr-{pr}`     |
//! | other         | `{env}.{base}`       | `{project}-{env}`       |
//!
//! Environment names are compared case-sensitively and are not validated.

use crate::constants::{DEV_DOMAIN_PREFIX, PREVIEW_DOMAIN_PREFIX, URL_SCHEME_HTTPS};

/// Compute the domain for `environment`.
///
/// Returns an empty string when `base_domain` is empty, and for a preview
/// without a PR number.
#[must_use]
pub fn compute_domain(base_domain: &str, environment: &str, pr_number: &str) -> String {
    if base_domain.is_empty() {
        return String::new();
    }

    match environment {
        "production" => base_domain.to_string(),
        "development" => format!("{DEV_DOMAIN_PREFIX}{base_domain}"),
        "preview" if pr_number.is_empty() => String::new(),
        "preview" => format!("{PREVIEW_DOMAIN_PREFIX}{pr_number}.{DEV_DOMAIN_PREFIX}{base_domain}"),
        other => format!("{other}.{base_domain}"),
    }
}

/// Prefix `domain` with `https://`, or return an empty string for no domain.
#[must_use]
pub fn compute_url(domain: &str) -> String {
    if domain.is_empty() {
        return String::new();
    }
    format!("{URL_SCHEME_HTTPS}{domain}")
}

/// Compute the Dokploy application or compose name.
///
/// A preview without a PR number falls through to `{project}-preview`.
#[must_use]
pub fn compute_app_name(project_name: &str, environment: &str, pr_number: &str) -> String {
    match environment {
        "production" => project_name.to_string(),
        "preview" if !pr_number.is_empty() => format!("{project_name}-pr-{pr_number}"),
        other => format!("{project_name}-{other}"),
    }
}

/// Whether `domain` has three or more labels (two or more dots).
///
/// Wildcard certificates only cover one level, so such domains cannot sit
/// behind a proxied DNS record.
#[must_use]
pub fn is_sub_subdomain(domain: &str) -> bool {
    domain.matches('.').count() >= 2
}
