// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Transform engine: the single entry point for advancing cluster state.

use std::fmt;
use std::sync::Arc;

use crate::config::StateConfig;
use crate::error::{Result, StateError};
use crate::mutation::SignedMutation;
use crate::registry::{Registry, Transformer};
use crate::signing::SignatureVerifier;
use crate::types::cluster::Cluster;

/// Routes a signed mutation to the transform registered for its type.
///
/// The engine holds no state of its own between calls: every transform reads
/// an input cluster and returns a new one. It is `Send + Sync` and can be
/// shared to transform independent clusters concurrently.
pub struct Engine {
    registry: Registry,
    verifier: Arc<dyn SignatureVerifier>,
    config: StateConfig,
}

impl Engine {
    /// Engine with all builtin mutation types registered.
    pub fn new(verifier: impl SignatureVerifier + 'static, config: StateConfig) -> Self {
        Self::with_registry(Registry::with_builtins(), Arc::new(verifier), config)
    }

    pub fn with_registry(registry: Registry, verifier: Arc<dyn SignatureVerifier>, config: StateConfig) -> Self {
        Self {
            registry,
            verifier,
            config,
        }
    }

    /// Registers an additional (or replacement) mutation type.
    pub fn register(&mut self, tag: impl Into<String>, transformer: impl Transformer + 'static) {
        let tag = tag.into();
        tracing::debug!("Registering transform for mutation type {:?}", tag);
        self.registry.register(tag, transformer);
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn verifier(&self) -> &dyn SignatureVerifier {
        self.verifier.as_ref()
    }

    pub fn config(&self) -> &StateConfig {
        &self.config
    }

    /// Applies `signed` to `cluster` and returns the next cluster.
    ///
    /// All validation lives in the type-specific transform; the engine only
    /// routes. On error the input cluster is untouched and no successor exists.
    pub fn transform(&self, cluster: &Cluster, signed: &SignedMutation) -> Result<Cluster> {
        let tag = signed.kind();
        let transformer = self
            .registry
            .get(tag)
            .ok_or_else(|| StateError::UnknownType(tag.to_string()))?;

        tracing::trace!("Dispatching {} mutation", tag);

        match transformer.transform(self, cluster, signed) {
            Ok(next) => {
                tracing::debug!(
                    "Applied {} mutation ({} validators)",
                    tag,
                    next.validators.len()
                );
                Ok(next)
            }
            Err(e) => {
                tracing::debug!("Rejected {} mutation: {}", tag, e);
                Err(e)
            }
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
