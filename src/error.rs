// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::readiness::WaitTimeout;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Expected environment variable {0} is unset, please use it to specify in which namespace Kueue is installed")]
    MissingConfiguration(String),

    #[error("Environment variable {var} contains an unrecognized value {value:?}")]
    UnrecognizedValue { var: String, value: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid API resource request: {0}")]
    InvalidResource(String),

    #[error("{0}")]
    Timeout(Box<WaitTimeout>),

    #[error("Wait cancelled after {attempts} attempts")]
    Cancelled { attempts: u32 },
}

impl E2eError {
    /// Setup errors that indicate a broken test environment; never retried.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            E2eError::KubeconfigError(_)
                | E2eError::MissingConfiguration(_)
                | E2eError::UnrecognizedValue { .. }
                | E2eError::InvalidConfiguration(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, E2eError>;
