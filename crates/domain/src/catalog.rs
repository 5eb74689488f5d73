// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::DomainError;
use crate::types::{ShiftCode, ShiftType, ShiftValue};

/// The active set of shift types plus the rename map.
///
/// When a type's code changes, assignments already stored under the old
/// code are never rewritten; instead the rename is recorded here and reads
/// resolve through it. The map is kept transitively closed on every rename,
/// so resolution is always a single lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCatalog {
    types: Vec<ShiftType>,
    code_map: BTreeMap<String, String>,
}

impl ShiftCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            types: Vec::new(),
            code_map: BTreeMap::new(),
        }
    }

    /// Creates the catalog seeded when a backing store holds no types yet.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            types: vec![
                ShiftType::new("成", "成田969", "#3B82F6", Some("12:00-17:00")),
                ShiftType::new("富", "富里802", "#16A34A", Some("9:00-17:30")),
                ShiftType::new("楽", "楽々パーキング", "#CA8A04", Some("8:00-12:00")),
                ShiftType::new("植", "成田969植栽管理", "#DC2626", Some("13:00-18:00")),
                ShiftType::new("長", "稲毛長沼", "#7C3AED", Some("9:00-17:00")),
                ShiftType::new("他", "その他", "#BE185D", Some("9:00-18:00")),
            ],
            code_map: BTreeMap::new(),
        }
    }

    /// Builds a catalog from already-validated parts, e.g. loaded from a
    /// backing store.
    #[must_use]
    pub fn from_parts(types: Vec<ShiftType>, renames: BTreeMap<String, String>) -> Self {
        Self {
            types,
            code_map: renames,
        }
    }

    /// Returns the active shift types in display order.
    #[must_use]
    pub fn types(&self) -> &[ShiftType] {
        &self.types
    }

    /// Returns true when no types are defined.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns the recorded renames (old code to current code).
    #[must_use]
    pub const fn renames(&self) -> &BTreeMap<String, String> {
        &self.code_map
    }

    /// Looks up a type by its current code.
    #[must_use]
    pub fn find(&self, code: &ShiftCode) -> Option<&ShiftType> {
        self.types.iter().find(|t| &t.code == code)
    }

    /// Adds a new shift type.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is empty or already in use.
    pub fn add(&mut self, shift_type: ShiftType) -> Result<(), DomainError> {
        if shift_type.code.value().is_empty() {
            return Err(DomainError::EmptyShiftCode);
        }
        if self.find(&shift_type.code).is_some() {
            return Err(DomainError::DuplicateShiftCode(
                shift_type.code.value().to_string(),
            ));
        }
        self.types.push(shift_type);
        Ok(())
    }

    /// Replaces the definition stored under `code`.
    ///
    /// A changed code records a rename: every existing mapping that targets
    /// the old code is rewritten to target the new one, then the old code
    /// itself maps to the new one. Identity mappings are dropped, so a
    /// rename cycled back to its origin leaves no entry behind.
    ///
    /// # Errors
    ///
    /// Returns an error if `code` is unknown, the replacement code is
    /// empty, or the replacement code collides with another type.
    pub fn update(&mut self, code: &ShiftCode, replacement: ShiftType) -> Result<(), DomainError> {
        if replacement.code.value().is_empty() {
            return Err(DomainError::EmptyShiftCode);
        }

        let position: usize = self
            .types
            .iter()
            .position(|t| &t.code == code)
            .ok_or_else(|| DomainError::ShiftTypeNotFound(code.value().to_string()))?;

        if replacement.code != *code && self.find(&replacement.code).is_some() {
            return Err(DomainError::DuplicateShiftCode(
                replacement.code.value().to_string(),
            ));
        }

        if replacement.code != *code {
            let old: String = code.value().to_string();
            let new: String = replacement.code.value().to_string();

            let mut rewritten: BTreeMap<String, String> = BTreeMap::new();
            for (origin, target) in &self.code_map {
                let target: String = if *target == old { new.clone() } else { target.clone() };
                if *origin != target {
                    rewritten.insert(origin.clone(), target);
                }
            }
            rewritten.insert(old, new);
            self.code_map = rewritten;
        }

        self.types[position] = replacement;
        Ok(())
    }

    /// Resolves a code through the rename map.
    #[must_use]
    pub fn resolve_code(&self, code: &ShiftCode) -> ShiftCode {
        self.code_map
            .get(code.value())
            .map_or_else(|| code.clone(), |current| ShiftCode::new(current))
    }

    /// Resolves a cell value through the rename map. Unset passes through.
    #[must_use]
    pub fn resolve(&self, value: &ShiftValue) -> ShiftValue {
        match value {
            ShiftValue::Unset => ShiftValue::Unset,
            ShiftValue::Code(code) => ShiftValue::Code(self.resolve_code(code)),
        }
    }
}
