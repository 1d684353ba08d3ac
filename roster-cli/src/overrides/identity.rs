//! Stable record identities (key derivation v1)
//!
//! Overrides are persisted against these identities, so every derivation
//! here is a compatibility contract: changing one orphans or misapplies
//! existing overrides. Any change must bump the storage key (see
//! `store::OVERRIDES_KEY`), which wipes the store.

use crate::types::{DepartureRecord, InventoryRecord, LeaveRecord, ProcessRecord};

/// Upper-case and collapse whitespace runs to underscores.
pub fn normalize_key(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_space = false;
    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('_');
                in_space = true;
            }
        } else {
            for upper in ch.to_uppercase() {
                out.push(upper);
            }
            in_space = false;
        }
    }
    out
}

/// A record with a derived stable identity.
pub trait HasIdentity {
    fn identity(&self) -> String;
}

impl HasIdentity for InventoryRecord {
    /// v1: `NAME_CATEGORY`
    fn identity(&self) -> String {
        normalize_key(&format!("{} {}", self.full_name.trim(), self.category.trim()))
    }
}

impl HasIdentity for ProcessRecord {
    /// v1: tracking number, else application number, else name — suffixed
    /// `_PROCESS`
    fn identity(&self) -> String {
        let key = if !self.s_nu.is_missing() {
            self.s_nu.to_string()
        } else if !self.app_no.is_missing() {
            self.app_no.to_string()
        } else {
            self.full_name.clone()
        };
        format!("{}_PROCESS", normalize_key(&key))
    }
}

impl HasIdentity for LeaveRecord {
    /// v1: `NAME_TYPE_LEAVE`
    fn identity(&self) -> String {
        format!(
            "{}_LEAVE",
            normalize_key(&format!("{} {}", self.full_name.trim(), self.leave_type.trim()))
        )
    }
}

impl HasIdentity for DepartureRecord {
    /// v1: `NAME_DEPARTURE`
    fn identity(&self) -> String {
        format!("{}_DEPARTURE", normalize_key(&self.full_name))
    }
}
