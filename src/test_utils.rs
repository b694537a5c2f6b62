// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use crate::error::{E2eError, Result};
use crate::readiness::{ClusterAccessor, ComponentIdentity, Member, ObservedDeployment, StatusCondition};
use async_trait::async_trait;
use http::{Request, Response};
use kube::client::Body;
use kube::core::ErrorResponse;
use kube::Client;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tower::Service;

type Scripted = (u16, String);

/// A mock HTTP service that returns predefined responses based on request paths.
///
/// Each path holds a queue of responses; the last one repeats once the queue
/// is drained, so a path can walk through several states before settling.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), VecDeque<Scripted>>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the response for GET requests matching the path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.responses.lock().unwrap().insert(
            ("GET".to_string(), path.to_string()),
            VecDeque::from([(status, body.to_string())]),
        );
        self
    }

    /// Queue a further response for GET requests matching the path
    pub fn then_get(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(("GET".to_string(), path.to_string()))
            .or_default()
            .push_back((status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// URIs (path and query) of every request served so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn next_response(&self, method: &str, path: &str) -> Option<Scripted> {
        let mut responses = self.responses.lock().unwrap();

        // Exact match first, then prefix match
        let exact = (method.to_string(), path.to_string());
        let key = if responses.contains_key(&exact) {
            exact
        } else {
            responses
                .keys()
                .find(|(m, p)| m == method && path.starts_with(p.as_str()))
                .cloned()?
        };
        let queue = responses.get_mut(&key)?;

        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let uri = req
            .uri()
            .path_and_query()
            .map(|pq| pq.to_string())
            .unwrap_or_else(|| path.clone());

        self.requests.lock().unwrap().push(uri);
        let response = self.next_response(&method, &path);

        Box::pin(async move {
            let (status, body) =
                response.unwrap_or_else(|| (404, not_found_json("resource", &path)));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a mock deployment JSON response with a single Available condition
pub fn deployment_json(namespace: &str, name: &str, available: &str) -> String {
    serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": "test-uid"
        },
        "spec": {
            "selector": {
                "matchLabels": { "control-plane": "controller-manager" }
            },
            "template": {
                "metadata": {
                    "labels": { "control-plane": "controller-manager" }
                }
            }
        },
        "status": {
            "conditions": [{
                "type": "Available",
                "status": available,
                "reason": "MinimumReplicasAvailable",
                "message": "Deployment has minimum availability.",
                "lastTransitionTime": "2026-01-01T00:00:00Z",
                "lastUpdateTime": "2026-01-01T00:00:00Z"
            }]
        }
    })
    .to_string()
}

/// Create a mock pod list JSON response
pub fn pod_list_json(names: &[&str]) -> String {
    let items: Vec<_> = names
        .iter()
        .map(|name| {
            serde_json::json!({
                "apiVersion": "v1",
                "kind": "Pod",
                "metadata": {
                    "name": name,
                    "labels": { "control-plane": "controller-manager" }
                }
            })
        })
        .collect();

    serde_json::json!({
        "apiVersion": "v1",
        "kind": "PodList",
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

fn not_found_error(name: &str) -> E2eError {
    E2eError::KubeError(kube::Error::Api(ErrorResponse {
        status: "Failure".to_string(),
        message: format!("\"{}\" not found", name),
        reason: "NotFound".to_string(),
        code: 404,
    }))
}

/// Scripted in-memory accessor. `Err(())` entries become 404 errors; the last
/// entry of each script repeats.
pub struct FakeAccessor {
    deployments: Mutex<VecDeque<std::result::Result<Vec<StatusCondition>, ()>>>,
    members: Mutex<VecDeque<std::result::Result<usize, ()>>>,
    deployment_reads: AtomicU32,
    member_lists: AtomicU32,
    read_identities: Mutex<Vec<ComponentIdentity>>,
    listed_namespaces: Mutex<Vec<String>>,
    read_delay: Option<Duration>,
}

impl FakeAccessor {
    pub fn new() -> Self {
        Self {
            deployments: Mutex::new(VecDeque::new()),
            members: Mutex::new(VecDeque::new()),
            deployment_reads: AtomicU32::new(0),
            member_lists: AtomicU32::new(0),
            read_identities: Mutex::new(Vec::new()),
            listed_namespaces: Mutex::new(Vec::new()),
            read_delay: None,
        }
    }

    pub fn deployment(self, conditions: std::result::Result<Vec<StatusCondition>, ()>) -> Self {
        self.deployments.lock().unwrap().push_back(conditions);
        self
    }

    /// Script a pod listing; `Ok(n)` lists `n` pods. Defaults to one pod.
    pub fn members(self, count: std::result::Result<usize, ()>) -> Self {
        self.members.lock().unwrap().push_back(count);
        self
    }

    /// Make every deployment read take `delay` before answering
    pub fn read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    pub fn deployment_reads(&self) -> u32 {
        self.deployment_reads.load(Ordering::SeqCst)
    }

    pub fn member_lists(&self) -> u32 {
        self.member_lists.load(Ordering::SeqCst)
    }

    pub fn read_identities(&self) -> Vec<ComponentIdentity> {
        self.read_identities.lock().unwrap().clone()
    }

    pub fn listed_namespaces(&self) -> Vec<String> {
        self.listed_namespaces.lock().unwrap().clone()
    }

    fn next<T: Clone>(queue: &Mutex<VecDeque<T>>) -> Option<T> {
        let mut queue = queue.lock().unwrap();
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Default for FakeAccessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClusterAccessor for FakeAccessor {
    async fn get_deployment(&self, identity: &ComponentIdentity) -> Result<ObservedDeployment> {
        self.deployment_reads.fetch_add(1, Ordering::SeqCst);
        self.read_identities.lock().unwrap().push(identity.clone());
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }

        match Self::next(&self.deployments) {
            Some(Ok(conditions)) => {
                let mut selector = BTreeMap::new();
                selector.insert("control-plane".to_string(), "controller-manager".to_string());
                Ok(ObservedDeployment {
                    selector,
                    conditions,
                })
            }
            _ => Err(not_found_error(&identity.name)),
        }
    }

    async fn list_members(
        &self,
        namespace: &str,
        selector: &BTreeMap<String, String>,
    ) -> Result<Vec<Member>> {
        self.member_lists.fetch_add(1, Ordering::SeqCst);
        self.listed_namespaces.lock().unwrap().push(namespace.to_string());

        match Self::next(&self.members).unwrap_or(Ok(1)) {
            Ok(count) => Ok((0..count)
                .map(|i| Member {
                    name: format!("pod-{}", i),
                    labels: selector.clone(),
                })
                .collect()),
            Err(()) => Err(not_found_error(namespace)),
        }
    }
}
