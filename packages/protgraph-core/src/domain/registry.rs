//! Identity registry: alias → node handle
//!
//! Every accession, primary id and cross-reference of every node shares one
//! flat namespace. The first node to claim an alias keeps it.

use rustc_hash::FxHashMap;

use super::NodeId;

#[derive(Debug, Clone, Default)]
pub struct IdentityRegistry {
    aliases: FxHashMap<String, NodeId>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map each alias to `node` unless the alias is already taken.
    ///
    /// Returns the number of aliases newly claimed.
    pub fn register<'a, I>(&mut self, node: NodeId, aliases: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut claimed = 0;
        for alias in aliases {
            if alias.is_empty() || self.aliases.contains_key(alias) {
                continue;
            }
            self.aliases.insert(alias.to_string(), node);
            claimed += 1;
        }
        claimed
    }

    pub fn resolve(&self, alias: &str) -> Option<NodeId> {
        self.aliases.get(alias).copied()
    }

    pub fn has(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }

    /// First alias (in the given order) that is registered
    pub fn resolve_any<'a, I>(&self, aliases: I) -> Option<NodeId>
    where
        I: IntoIterator<Item = &'a str>,
    {
        aliases.into_iter().find_map(|alias| self.resolve(alias))
    }

    /// Drop every alias that points at `node`
    pub fn purge(&mut self, node: NodeId) -> usize {
        let before = self.aliases.len();
        self.aliases.retain(|_, target| *target != node);
        before - self.aliases.len()
    }

    /// All aliases, sorted
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.aliases.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// All aliases claimed by `node`, sorted
    pub fn aliases_of(&self, node: NodeId) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .aliases
            .iter()
            .filter(|(_, target)| **target == node)
            .map(|(alias, _)| alias.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
