// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Status conditions and the matcher that compares them.

use k8s_openapi::api::apps::v1::{Deployment, DeploymentCondition};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use kube::runtime::wait::Condition;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl ConditionStatus {
    /// Anything other than "True" or "False" is reported as Unknown.
    pub fn parse(value: &str) -> Self {
        match value {
            "True" => ConditionStatus::True,
            "False" => ConditionStatus::False,
            _ => ConditionStatus::Unknown,
        }
    }
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConditionStatus::True => "True",
            ConditionStatus::False => "False",
            ConditionStatus::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// A status condition as reported on a workload object.
///
/// `reason`, `message` and both timestamps are volatile and never take part
/// in matching.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusCondition {
    pub condition_type: String,
    pub status: ConditionStatus,
    pub reason: Option<String>,
    pub message: Option<String>,
    pub last_transition_time: Option<Time>,
    pub last_update_time: Option<Time>,
}

impl StatusCondition {
    pub fn new(condition_type: impl Into<String>, status: ConditionStatus) -> Self {
        Self {
            condition_type: condition_type.into(),
            status,
            reason: None,
            message: None,
            last_transition_time: None,
            last_update_time: None,
        }
    }

    /// The condition a control-plane deployment reports once it serves traffic
    pub fn available() -> Self {
        Self::new("Available", ConditionStatus::True)
    }

    fn same_state(&self, other: &StatusCondition) -> bool {
        self.condition_type == other.condition_type && self.status == other.status
    }
}

impl From<&DeploymentCondition> for StatusCondition {
    fn from(c: &DeploymentCondition) -> Self {
        Self {
            condition_type: c.type_.clone(),
            status: ConditionStatus::parse(&c.status),
            reason: c.reason.clone(),
            message: c.message.clone(),
            last_transition_time: c.last_transition_time.clone(),
            last_update_time: c.last_update_time.clone(),
        }
    }
}

impl fmt::Display for StatusCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.condition_type, self.status)?;
        if let Some(reason) = &self.reason {
            write!(f, " ({})", reason)?;
        }
        Ok(())
    }
}

/// True iff `observed` holds a condition with the same type and status as `expected`.
pub fn matches(expected: &StatusCondition, observed: &[StatusCondition]) -> bool {
    observed.iter().any(|c| c.same_state(expected))
}

/// Condition for `kube::runtime::wait::await_condition` that holds once the
/// deployment reports `Available=True`.
pub fn is_deployment_available() -> impl Condition<Deployment> {
    |obj: Option<&Deployment>| {
        let Some(conditions) = obj
            .and_then(|d| d.status.as_ref())
            .and_then(|s| s.conditions.as_ref())
        else {
            return false;
        };

        let observed: Vec<StatusCondition> = conditions.iter().map(StatusCondition::from).collect();
        matches(&StatusCondition::available(), &observed)
    }
}
