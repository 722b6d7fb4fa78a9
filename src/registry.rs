// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Mutation type registry.
//!
//! Maps a type tag to the transform that applies mutations of that type.
//! The builtin tags are registered by [`Registry::with_builtins`]; further
//! types plug in through [`Registry::register`] without touching the engine.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::engine::Engine;
use crate::error::Result;
use crate::mutation::{add_validators, gen_validators, node_approvals, MutationType, SignedMutation};
use crate::types::cluster::Cluster;

/// Applies one mutation to a cluster, producing its successor.
///
/// The engine is passed in so composite transforms can dispatch their
/// children through the same registry.
pub trait Transformer: Send + Sync {
    fn transform(&self, engine: &Engine, cluster: &Cluster, signed: &SignedMutation) -> Result<Cluster>;
}

impl<F> Transformer for F
where
    F: Fn(&Engine, &Cluster, &SignedMutation) -> Result<Cluster> + Send + Sync,
{
    fn transform(&self, engine: &Engine, cluster: &Cluster, signed: &SignedMutation) -> Result<Cluster> {
        self(engine, cluster, signed)
    }
}

#[derive(Default)]
pub struct Registry {
    transformers: FxHashMap<String, Box<dyn Transformer>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every builtin [`MutationType`] registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(MutationType::GenValidators.as_str(), gen_validators::transform_gen_validators);
        registry.register(MutationType::AddValidators.as_str(), add_validators::transform_add_validators);
        registry.register(MutationType::NodeApproval.as_str(), node_approvals::transform_node_approval);
        registry.register(MutationType::NodeApprovals.as_str(), node_approvals::transform_node_approvals);
        registry
    }

    /// Registers `transformer` for `tag`, returning the one it replaces.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        transformer: impl Transformer + 'static,
    ) -> Option<Box<dyn Transformer>> {
        self.transformers.insert(tag.into(), Box::new(transformer))
    }

    pub fn get(&self, tag: &str) -> Option<&dyn Transformer> {
        self.transformers.get(tag).map(|t| t.as_ref())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.transformers.contains_key(tag)
    }

    /// Registered tags in sorted order.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.transformers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("tags", &self.tags()).finish()
    }
}
