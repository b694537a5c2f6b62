// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as vars, namespaces, polling};
use crate::error::{E2eError, Result};
use std::env;
use std::sync::OnceLock;
use std::time::Duration;

/// Recognized `NAMESPACE` values and the namespace each one selects.
pub const NAMESPACE_ALIASES: &[(&str, &str)] = &[
    ("opendatahub", namespaces::OPENDATAHUB),
    ("redhat-ods-applications", namespaces::RHOAI),
    ("kueue-system", namespaces::KUEUE),
];

/// Map the raw value of the `NAMESPACE` setting to the namespace Kueue runs in.
pub fn resolve_namespace(raw: Option<&str>) -> Result<&'static str> {
    let Some(value) = raw else {
        return Err(E2eError::MissingConfiguration(vars::NAMESPACE.to_string()));
    };

    NAMESPACE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == value)
        .map(|(_, namespace)| *namespace)
        .ok_or_else(|| E2eError::UnrecognizedValue {
            var: vars::NAMESPACE.to_string(),
            value: value.to_string(),
        })
}

/// Resolve the Kueue namespace from the process environment
pub fn namespace_from_env() -> Result<&'static str> {
    let raw = env::var(vars::NAMESPACE).ok();
    resolve_namespace(raw.as_deref())
}

static KUEUE_NAMESPACE: OnceLock<&'static str> = OnceLock::new();

/// Kueue namespace resolved from the environment on first successful use.
///
/// Later calls return the cached value without reading `NAMESPACE` again.
/// Failures are not cached.
pub fn kueue_namespace() -> Result<&'static str> {
    if let Some(namespace) = KUEUE_NAMESPACE.get() {
        return Ok(*namespace);
    }
    let namespace = namespace_from_env()?;
    Ok(*KUEUE_NAMESPACE.get_or_init(|| namespace))
}

/// Timeout and fixed interval of a readiness poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub timeout: Duration,
    pub interval: Duration,
}

impl PollSettings {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(polling::STARTUP_TIMEOUT_SECS),
            interval: Duration::from_millis(polling::INTERVAL_MILLIS),
        }
    }
}

/// Wait binary configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace Kueue is installed into
    pub namespace: &'static str,
    /// Kubeconfig context, empty for the inferred one
    pub kube_context: String,
    pub wait_for_jobset: bool,
    pub poll: PollSettings,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let namespace = namespace_from_env()?;
        let kube_context = env::var(vars::KUBE_CONTEXT).unwrap_or_default();
        let wait_for_jobset: bool = env::var(vars::WAIT_FOR_JOBSET)
            .unwrap_or("false".to_string())
            .parse()
            .unwrap_or(false);

        let mut poll = PollSettings::default();
        if let Some(secs) = parse_override(vars::STARTUP_TIMEOUT_SECS)? {
            poll.timeout = Duration::from_secs(secs);
        }
        if let Some(millis) = parse_override(vars::POLL_INTERVAL_MILLIS)? {
            poll.interval = Duration::from_millis(millis);
        }

        Ok(Config {
            namespace,
            kube_context,
            wait_for_jobset,
            poll,
        })
    }
}

fn parse_override(var: &str) -> Result<Option<u64>> {
    match env::var(var) {
        Ok(value) => value.trim().parse().map(Some).map_err(|e| {
            E2eError::InvalidConfiguration(format!(
                "{} must be an integer, got {:?}: {}",
                var, value, e
            ))
        }),
        Err(_) => Ok(None),
    }
}
