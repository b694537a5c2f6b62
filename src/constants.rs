// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Environment variables read by the helper
pub mod env {
    /// Namespace where Kueue is installed
    pub const NAMESPACE: &str = "NAMESPACE";
    /// Kubeconfig context used by the wait binary
    pub const KUBE_CONTEXT: &str = "KUBE_CONTEXT";
    /// When set to "true", the wait binary also waits for JobSet
    pub const WAIT_FOR_JOBSET: &str = "WAIT_FOR_JOBSET";
    pub const STARTUP_TIMEOUT_SECS: &str = "STARTUP_TIMEOUT_SECS";
    pub const POLL_INTERVAL_MILLIS: &str = "POLL_INTERVAL_MILLIS";
}

/// Namespaces Kueue may be installed into
pub mod namespaces {
    /// Open Data Hub installation
    pub const OPENDATAHUB: &str = "opendatahub";
    /// Red Hat OpenShift AI installation
    pub const RHOAI: &str = "redhat-ods-applications";
    /// Upstream default
    pub const KUEUE: &str = "kueue-system";
    pub const JOBSET: &str = "jobset-system";
}

/// Control-plane deployments verified before tests run
pub mod components {
    pub const KUEUE_CONTROLLER_MANAGER: &str = "kueue-controller-manager";
    pub const JOBSET_CONTROLLER_MANAGER: &str = "jobset-controller-manager";
}

/// Startup polling configuration
pub mod polling {
    /// How long a control-plane component may take to become available
    pub const STARTUP_TIMEOUT_SECS: u64 = 300;
    /// Fixed delay between readiness checks
    pub const INTERVAL_MILLIS: u64 = 250;
}

/// API groups of the custom resources under test
pub mod groups {
    pub const KUEUE: &str = "kueue.x-k8s.io";
    pub const VISIBILITY: &str = "visibility.kueue.x-k8s.io";
    pub const JOBSET: &str = "jobset.x-k8s.io";
}
