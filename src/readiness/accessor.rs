// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Read-only cluster access used by readiness checks.

use crate::error::Result;
use crate::readiness::condition::StatusCondition;
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Pod;
use kube::{api::ListParams, Api, Client, ResourceExt};
use std::collections::BTreeMap;
use std::fmt;
use tracing::instrument;

/// Namespace and name of the deployment backing a control-plane component
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentIdentity {
    pub namespace: String,
    pub name: String,
}

impl ComponentIdentity {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ComponentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Snapshot of a deployment's pod selector and status conditions
#[derive(Debug, Clone, Default)]
pub struct ObservedDeployment {
    pub selector: BTreeMap<String, String>,
    pub conditions: Vec<StatusCondition>,
}

impl From<&Deployment> for ObservedDeployment {
    fn from(deployment: &Deployment) -> Self {
        let selector = deployment
            .spec
            .as_ref()
            .and_then(|s| s.selector.match_labels.clone())
            .unwrap_or_default();

        let conditions = deployment
            .status
            .as_ref()
            .and_then(|s| s.conditions.as_ref())
            .map(|cs| cs.iter().map(StatusCondition::from).collect())
            .unwrap_or_default();

        Self {
            selector,
            conditions,
        }
    }
}

/// A pod selected by a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub labels: BTreeMap<String, String>,
}

impl From<Pod> for Member {
    fn from(pod: Pod) -> Self {
        Self {
            name: pod.name_any(),
            labels: pod.metadata.labels.unwrap_or_default(),
        }
    }
}

/// Render `matchLabels` as a label selector string ("a=b,c=d")
pub fn label_selector(labels: &BTreeMap<String, String>) -> String {
    labels
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(",")
}

/// Reads the objects a readiness check needs. Implementations never write.
#[async_trait]
pub trait ClusterAccessor: Send + Sync {
    async fn get_deployment(&self, identity: &ComponentIdentity) -> Result<ObservedDeployment>;

    async fn list_members(
        &self,
        namespace: &str,
        selector: &BTreeMap<String, String>,
    ) -> Result<Vec<Member>>;
}

#[async_trait]
impl ClusterAccessor for Client {
    #[instrument(skip(self), fields(deployment = %identity))]
    async fn get_deployment(&self, identity: &ComponentIdentity) -> Result<ObservedDeployment> {
        let deployments: Api<Deployment> = Api::namespaced(self.clone(), &identity.namespace);
        let deployment = deployments.get(&identity.name).await?;
        Ok(ObservedDeployment::from(&deployment))
    }

    #[instrument(skip(self, selector), fields(selector = %label_selector(selector)))]
    async fn list_members(
        &self,
        namespace: &str,
        selector: &BTreeMap<String, String>,
    ) -> Result<Vec<Member>> {
        let pods: Api<Pod> = Api::namespaced(self.clone(), namespace);
        let lp = ListParams::default().labels(&label_selector(selector));
        let pod_list = pods.list(&lp).await?;
        Ok(pod_list.items.into_iter().map(Member::from).collect())
    }
}
