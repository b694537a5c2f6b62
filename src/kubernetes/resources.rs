// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! API handles for the Kueue and JobSet custom resources used by e2e suites

use crate::constants::groups;
use crate::error::{E2eError, Result};
use kube::{
    api::{ApiResource, DynamicObject, GroupVersionKind},
    Api, Client,
};

/// Custom resource kinds e2e suites create and inspect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KueueKind {
    ClusterQueue,
    LocalQueue,
    Workload,
    ResourceFlavor,
    AdmissionCheck,
    WorkloadPriorityClass,
    Topology,
    Cohort,
    JobSet,
}

impl KueueKind {
    pub const ALL: [KueueKind; 9] = [
        KueueKind::ClusterQueue,
        KueueKind::LocalQueue,
        KueueKind::Workload,
        KueueKind::ResourceFlavor,
        KueueKind::AdmissionCheck,
        KueueKind::WorkloadPriorityClass,
        KueueKind::Topology,
        KueueKind::Cohort,
        KueueKind::JobSet,
    ];

    fn group_version_kind(self) -> (&'static str, &'static str, &'static str) {
        match self {
            KueueKind::ClusterQueue => (groups::KUEUE, "v1beta1", "ClusterQueue"),
            KueueKind::LocalQueue => (groups::KUEUE, "v1beta1", "LocalQueue"),
            KueueKind::Workload => (groups::KUEUE, "v1beta1", "Workload"),
            KueueKind::ResourceFlavor => (groups::KUEUE, "v1beta1", "ResourceFlavor"),
            KueueKind::AdmissionCheck => (groups::KUEUE, "v1beta1", "AdmissionCheck"),
            KueueKind::WorkloadPriorityClass => (groups::KUEUE, "v1beta1", "WorkloadPriorityClass"),
            KueueKind::Topology => (groups::KUEUE, "v1alpha1", "Topology"),
            KueueKind::Cohort => (groups::KUEUE, "v1alpha1", "Cohort"),
            KueueKind::JobSet => (groups::JOBSET, "v1alpha2", "JobSet"),
        }
    }

    pub fn is_namespaced(self) -> bool {
        matches!(
            self,
            KueueKind::LocalQueue | KueueKind::Workload | KueueKind::JobSet
        )
    }

    pub fn api_resource(self) -> ApiResource {
        let (group, version, kind) = self.group_version_kind();
        ApiResource::from_gvk(&GroupVersionKind::gvk(group, version, kind))
    }
}

/// Typed-by-kind access to the custom resources registered for e2e suites
#[derive(Clone)]
pub struct KueueApis {
    client: Client,
}

impl KueueApis {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// API for a cluster-scoped kind such as ClusterQueue
    pub fn cluster_scoped(&self, kind: KueueKind) -> Result<Api<DynamicObject>> {
        if kind.is_namespaced() {
            return Err(E2eError::InvalidResource(format!(
                "{:?} is namespaced, use namespaced()",
                kind
            )));
        }
        Ok(Api::all_with(self.client.clone(), &kind.api_resource()))
    }

    /// API for a namespaced kind such as LocalQueue
    pub fn namespaced(&self, kind: KueueKind, namespace: &str) -> Result<Api<DynamicObject>> {
        if !kind.is_namespaced() {
            return Err(E2eError::InvalidResource(format!(
                "{:?} is cluster-scoped, use cluster_scoped()",
                kind
            )));
        }
        Ok(Api::namespaced_with(
            self.client.clone(),
            namespace,
            &kind.api_resource(),
        ))
    }
}
