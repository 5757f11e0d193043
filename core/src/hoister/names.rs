//! Sources of fresh identifiers for hoisted constants.

use bumpalo::Bump;
use core::fmt::Write;
use hashbrown::HashSet;

use crate::String;
use crate::options::HoistOptions;

/// A freshly generated identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration<'a> {
    pub name: &'a str,
}

/// Hands out identifiers that are unique for the lifetime of one pass.
pub trait DeclarationSource<'a> {
    fn next_declaration(&mut self) -> Declaration<'a>;
}

/// Counter-based [`DeclarationSource`].
///
/// Names are `prefix` + counter, allocated in the arena. Names passed to
/// [`NameGenerator::reserve`] are never produced.
pub struct NameGenerator<'a> {
    arena: &'a Bump,
    prefix: String,
    next: u64,
    reserved: HashSet<&'a str>,
}

impl<'a> NameGenerator<'a> {
    pub fn new(arena: &'a Bump, options: &HoistOptions) -> Self {
        Self {
            arena,
            prefix: options.prefix.clone(),
            next: u64::from(options.first_index),
            reserved: HashSet::new(),
        }
    }

    /// Exclude `names` from the generated sequence.
    pub fn reserve<I>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.reserved.extend(names);
        self
    }

    fn candidate(&mut self) -> String {
        let mut name = self.prefix.clone();
        let _ = write!(name, "{}", self.next);
        self.next += 1;
        name
    }
}

impl<'a> DeclarationSource<'a> for NameGenerator<'a> {
    fn next_declaration(&mut self) -> Declaration<'a> {
        loop {
            let name = self.candidate();
            if !self.reserved.contains(name.as_str()) {
                let name: &'a str = self.arena.alloc_str(&name);
                self.reserved.insert(name);
                return Declaration { name };
            }
            tracing::trace!(candidate = %name, "skipping reserved name");
        }
    }
}
