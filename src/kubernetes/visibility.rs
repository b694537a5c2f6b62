// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client for the Kueue visibility API (pending workloads)

use crate::constants::groups;
use crate::error::{E2eError, Result};
use crate::kubernetes::client::create_impersonating_client;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const VERSION: &str = "v1alpha1";

/// A workload waiting for admission
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PendingWorkload {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub local_queue_name: String,
    #[serde(default)]
    pub position_in_cluster_queue: i32,
    #[serde(default)]
    pub position_in_local_queue: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PendingWorkloadsSummary {
    #[serde(default)]
    pub items: Vec<PendingWorkload>,
}

/// Paging for pending workload queries; unset fields use the server defaults
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingWorkloadOptions {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PendingWorkloadOptions {
    fn query(&self) -> String {
        let params: Vec<String> = [("limit", self.limit), ("offset", self.offset)]
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| format!("{}={}", k, v)))
            .collect();

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// Reject anything that is not a DNS-1123 subdomain, so names can be placed
/// into a request path as-is.
fn validate_name(what: &str, value: &str) -> Result<()> {
    let bytes = value.as_bytes();
    let alphanumeric = |b: &u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    let valid = !bytes.is_empty()
        && bytes.len() <= 253
        && bytes.iter().all(|b| alphanumeric(b) || *b == b'-' || *b == b'.')
        && bytes.first().is_some_and(alphanumeric)
        && bytes.last().is_some_and(alphanumeric);

    if !valid {
        return Err(E2eError::InvalidResource(format!(
            "Invalid {} name {:?}",
            what, value
        )));
    }
    Ok(())
}

/// Reads pending workloads through the visibility aggregated API
#[derive(Clone)]
pub struct VisibilityClient {
    client: Client,
}

/// Create a visibility client for the inferred cluster, impersonating `user`
/// when one is given.
pub async fn create_visibility_client(user: Option<&str>) -> Result<VisibilityClient> {
    let client = create_impersonating_client(user).await?;
    Ok(VisibilityClient::new(client))
}

impl VisibilityClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn pending_workloads_for_cluster_queue(
        &self,
        name: &str,
        options: PendingWorkloadOptions,
    ) -> Result<PendingWorkloadsSummary> {
        validate_name("ClusterQueue", name)?;
        let path = format!(
            "/apis/{}/{}/clusterqueues/{}/pendingworkloads{}",
            groups::VISIBILITY,
            VERSION,
            name,
            options.query()
        );
        self.get(&path).await
    }

    #[instrument(skip(self))]
    pub async fn pending_workloads_for_local_queue(
        &self,
        namespace: &str,
        name: &str,
        options: PendingWorkloadOptions,
    ) -> Result<PendingWorkloadsSummary> {
        validate_name("namespace", namespace)?;
        validate_name("LocalQueue", name)?;
        let path = format!(
            "/apis/{}/{}/namespaces/{}/localqueues/{}/pendingworkloads{}",
            groups::VISIBILITY,
            VERSION,
            namespace,
            name,
            options.query()
        );
        self.get(&path).await
    }

    async fn get(&self, path: &str) -> Result<PendingWorkloadsSummary> {
        debug!("GET {}", path);
        let request = http::Request::get(path)
            .body(Vec::new())
            .map_err(|e| E2eError::InvalidResource(format!("Invalid request path {}: {}", path, e)))?;

        Ok(self.client.request::<PendingWorkloadsSummary>(request).await?)
    }
}
