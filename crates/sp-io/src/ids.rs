use std::collections::HashSet;

use sp_core::{FormatError, Map, MapReadError};
use sp_parser::StartElement;

use crate::attrs::{get_attribute, malformed, missing_recommended, parse_integer};
use crate::warning::Warnings;

/// Identifiers claimed so far in one document. Ids are never released.
#[derive(Debug, Clone, Default)]
pub struct IdRegistry {
    claimed: HashSet<i32>,
    reserved: HashSet<i32>,
    next_candidate: i32,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that already knows every id in `map`, for code that adds
    /// fixtures to a loaded map.
    pub fn from_map(map: &Map) -> Self {
        let mut registry = Self::new();
        registry.claimed.extend(map.all_ids());
        registry
    }

    /// Keeps [`IdRegistry::create_id`] away from `id` without claiming it, so
    /// an element further on in the document can still register it.
    pub fn reserve(&mut self, id: i32) {
        self.reserved.insert(id);
    }

    pub fn is_claimed(&self, id: i32) -> bool {
        self.claimed.contains(&id)
    }

    /// Claims `id` for `element`. A collision is reported through the policy
    /// and answered with a fresh id.
    pub fn register(
        &mut self,
        warnings: &mut Warnings,
        element: &StartElement,
        id: i32,
    ) -> Result<i32, MapReadError> {
        if id < 0 {
            return Err(malformed(element, "id", &id.to_string()).into());
        }
        if self.claimed.insert(id) {
            return Ok(id);
        }
        warnings.report(FormatError::DuplicateId {
            tag: element.tag().to_string(),
            id,
            line: element.line(),
        })?;
        Ok(self.create_id())
    }

    /// The smallest free id above every id this registry generated before.
    pub fn create_id(&mut self) -> i32 {
        let mut candidate = self.next_candidate;
        while self.claimed.contains(&candidate) || self.reserved.contains(&candidate) {
            candidate += 1;
        }
        self.claimed.insert(candidate);
        self.next_candidate = candidate + 1;
        candidate
    }

    pub fn get_or_generate(
        &mut self,
        warnings: &mut Warnings,
        element: &StartElement,
    ) -> Result<i32, MapReadError> {
        match get_attribute(element, "id") {
            Some(raw) => {
                let id = parse_integer(element, "id", raw)?;
                self.register(warnings, element, id)
            }
            None => {
                warnings.report(missing_recommended(element, "id"))?;
                Ok(self.create_id())
            }
        }
    }
}
