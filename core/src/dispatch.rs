//! Handler tables keyed by node kind.
//!
//! A pass registers one handler per node kind it cares about. Kinds that are
//! interchangeable for that pass (e.g. `Import` and `ImportFrom`) are aliased
//! to the same handler instead of getting a copy of it.

use hashbrown::HashMap;

use crate::Vec;
use crate::ast::NodeKind;
use crate::errors::Error;

#[derive(Debug, Clone)]
pub struct DispatchTable<H> {
    slots: HashMap<NodeKind, H>,
}

impl<H: Copy> DispatchTable<H> {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Bind `kind` to `handler`, replacing any previous binding.
    pub fn register(&mut self, kind: NodeKind, handler: H) -> &mut Self {
        self.slots.insert(kind, handler);
        self
    }

    /// Bind every kind in `also` to the handler already registered for `primary`.
    pub fn alias(&mut self, primary: NodeKind, also: &[NodeKind]) -> Result<&mut Self, Error> {
        let handler = self.get(primary).ok_or(Error::UnregisteredAlias { primary })?;
        for kind in also {
            self.slots.insert(*kind, handler);
        }
        Ok(self)
    }

    pub fn get(&self, kind: NodeKind) -> Option<H> {
        self.slots.get(&kind).copied()
    }

    pub fn contains(&self, kind: NodeKind) -> bool {
        self.slots.contains_key(&kind)
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<NodeKind> {
        let mut kinds: Vec<NodeKind> = self.slots.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }
}

impl<H: Copy> Default for DispatchTable<H> {
    fn default() -> Self {
        Self::new()
    }
}
