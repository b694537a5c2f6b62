// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client construction and custom resource APIs for e2e suites.

pub mod client;
pub mod resources;
pub mod visibility;

pub use client::{create_client_using_cluster, create_impersonating_client};
pub use resources::{KueueApis, KueueKind};
pub use visibility::{create_visibility_client, VisibilityClient};
