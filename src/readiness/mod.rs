// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Readiness checks for the control-plane components tests depend on.

pub mod accessor;
pub mod condition;
pub mod poller;

pub use accessor::{ClusterAccessor, ComponentIdentity, Member, ObservedDeployment};
pub use condition::{is_deployment_available, matches, ConditionStatus, StatusCondition};
pub use poller::{poll_until, PollOutcome, WaitTimeout};

use crate::config::{kueue_namespace, PollSettings};
use crate::constants::{components, namespaces};
use crate::error::{E2eError, Result};
use std::fmt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Why a single readiness tick did not succeed
#[derive(Debug)]
pub enum Mismatch {
    /// The deployment could not be read (not created yet, API hiccup)
    DeploymentUnavailable(E2eError),
    /// Pods matching the deployment's selector could not be listed
    MembersUnavailable(E2eError),
    /// Both reads succeeded but the expected condition is absent
    ConditionNotMet { observed: Vec<StatusCondition> },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::DeploymentUnavailable(e) => write!(f, "failed to get deployment: {}", e),
            Mismatch::MembersUnavailable(e) => write!(f, "failed to list pods: {}", e),
            Mismatch::ConditionNotMet { observed } => {
                let conditions: Vec<String> = observed.iter().map(ToString::to_string).collect();
                write!(f, "conditions [{}]", conditions.join(", "))
            }
        }
    }
}

/// Run one readiness tick: deployment read, pod listing and condition match
/// all against the same snapshot.
async fn check_available<A: ClusterAccessor + ?Sized>(
    accessor: &A,
    identity: &ComponentIdentity,
    expected: &StatusCondition,
) -> std::result::Result<(), Mismatch> {
    let deployment = accessor
        .get_deployment(identity)
        .await
        .map_err(Mismatch::DeploymentUnavailable)?;

    // The pod count is not asserted; the listing only has to succeed.
    let members = accessor
        .list_members(&identity.namespace, &deployment.selector)
        .await
        .map_err(Mismatch::MembersUnavailable)?;

    if !matches(expected, &deployment.conditions) {
        return Err(Mismatch::ConditionNotMet {
            observed: deployment.conditions,
        });
    }

    debug!(pods = members.len(), "Deployment {} is available", identity);
    Ok(())
}

/// Wait until the deployment identified by `identity` reports `Available=True`
/// and its pods can be listed.
///
/// Lookup failures count as "not ready yet". Returns `E2eError::Timeout` with
/// the last observation when `settings.timeout` runs out, and
/// `E2eError::Cancelled` as soon as `cancel` fires.
#[instrument(skip(accessor, cancel), fields(deployment = %identity))]
pub async fn wait_for_component_available<A: ClusterAccessor + ?Sized>(
    accessor: &A,
    identity: &ComponentIdentity,
    settings: PollSettings,
    cancel: &CancellationToken,
) -> Result<()> {
    let expected = StatusCondition::available();

    let outcome = poll_until(settings, cancel, || async {
        let result = check_available(accessor, identity, &expected).await;
        if let Err(mismatch) = &result {
            debug!("Deployment {} not ready: {}", identity, mismatch);
        }
        result
    })
    .await;

    match outcome {
        PollOutcome::Ready { attempts } => {
            info!("Deployment {} is available after {} attempts", identity, attempts);
            Ok(())
        }
        PollOutcome::TimedOut {
            attempts,
            elapsed,
            last_mismatch,
        } => {
            let last_observed = last_mismatch
                .map(|m| m.to_string())
                .unwrap_or_else(|| "no check completed before the deadline".to_string());
            warn!(
                "Deployment {} did not become available within {:?}: {}",
                identity, settings.timeout, last_observed
            );
            Err(E2eError::Timeout(Box::new(WaitTimeout {
                target: format!("deployment {}", identity),
                expected: format!("condition {}", expected),
                last_observed,
                attempts,
                elapsed,
                timeout: settings.timeout,
            })))
        }
        PollOutcome::Cancelled { attempts } => {
            info!("Wait for deployment {} cancelled", identity);
            Err(E2eError::Cancelled { attempts })
        }
    }
}

/// Identity of the Kueue controller manager in the given namespace
pub fn kueue_identity(namespace: &str) -> ComponentIdentity {
    ComponentIdentity::new(namespace, components::KUEUE_CONTROLLER_MANAGER)
}

/// Identity of the JobSet controller manager
pub fn jobset_identity() -> ComponentIdentity {
    ComponentIdentity::new(namespaces::JOBSET, components::JOBSET_CONTROLLER_MANAGER)
}

/// Wait for the Kueue controller manager in the namespace named by `NAMESPACE`.
///
/// The namespace is resolved once per process; see [`kueue_namespace`].
pub async fn wait_for_kueue_availability<A: ClusterAccessor + ?Sized>(
    accessor: &A,
    cancel: &CancellationToken,
) -> Result<()> {
    let namespace = kueue_namespace()?;
    wait_for_component_available(accessor, &kueue_identity(namespace), PollSettings::default(), cancel)
        .await
}

/// Wait for the JobSet controller manager in `jobset-system`
pub async fn wait_for_jobset_availability<A: ClusterAccessor + ?Sized>(
    accessor: &A,
    cancel: &CancellationToken,
) -> Result<()> {
    wait_for_component_available(accessor, &jobset_identity(), PollSettings::default(), cancel).await
}
