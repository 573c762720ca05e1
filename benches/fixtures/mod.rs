// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halimede-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halimede and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use halimede::model::{Attribute, AttributeId, AttributeValue, ValueId};
use halimede::reconcile::Reconciler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogParams {
    pub attributes: usize,
    pub values_per_attribute: usize,
    pub label_len: usize,
}

impl CatalogParams {
    pub const fn new(attributes: usize, values_per_attribute: usize, label_len: usize) -> Self {
        Self {
            attributes,
            values_per_attribute,
            label_len,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    MediumDense,
    LargeWide,
}

impl Case {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::MediumDense => "medium_dense",
            Self::LargeWide => "large_wide",
        }
    }

    pub const fn params(self) -> CatalogParams {
        match self {
            Self::Small => CatalogParams::new(4, 8, 12),
            Self::MediumDense => CatalogParams::new(16, 32, 12),
            Self::LargeWide => CatalogParams::new(64, 128, 24),
        }
    }
}

fn ascii_repeat_to_len(prefix: &str, fill: char, target_len: usize) -> String {
    if prefix.len() >= target_len {
        return prefix[..target_len].to_owned();
    }

    let mut out = String::with_capacity(target_len);
    out.push_str(prefix);
    while out.len() < target_len {
        out.push(fill);
    }
    out
}

pub fn attribute_id(idx: usize) -> AttributeId {
    AttributeId::new(idx as u64 + 1)
}

/// Value IDs are disjoint across attributes and stable across runs.
pub fn value_id(attribute_id: AttributeId, idx: usize) -> ValueId {
    ValueId::new(attribute_id.value() * 100_000 + idx as u64)
}

pub fn catalog(params: CatalogParams) -> Vec<Attribute> {
    (0..params.attributes)
        .map(|idx| {
            Attribute::new_with(
                attribute_id(idx),
                format!("attr_{idx:03}"),
                "STRING",
                "ACTIVE",
            )
        })
        .collect()
}

/// Fetch payload for one attribute, cycling through the three literal kinds.
pub fn values_for(params: CatalogParams, attribute_id: AttributeId) -> Vec<AttributeValue> {
    (0..params.values_per_attribute)
        .map(|idx| {
            let id = value_id(attribute_id, idx);
            match idx % 3 {
                0 => {
                    let base = format!("val_{attribute_id}_{idx:04}_");
                    AttributeValue::string(id, ascii_repeat_to_len(&base, 'x', params.label_len))
                }
                1 => AttributeValue::number(id, idx as f64),
                _ => AttributeValue::boolean(id, idx % 2 == 0),
            }
        })
        .collect()
}

/// Flat assigned-ID list for rehydration: the first half of every attribute's
/// values, with an unknown (stale) ID spliced in after every fourth attribute.
pub fn assigned_ids(params: CatalogParams) -> Vec<ValueId> {
    let mut ids = Vec::new();
    let per_attribute = (params.values_per_attribute / 2).max(1);
    for attr_idx in 0..params.attributes {
        let owner = attribute_id(attr_idx);
        for value_idx in 0..per_attribute {
            ids.push(value_id(owner, value_idx));
        }
        if attr_idx % 4 == 3 {
            ids.push(ValueId::new(900_000_000 + attr_idx as u64));
        }
    }
    ids
}

/// A `Ready` reconciler with every attribute's values already cached.
pub fn warmed_reconciler(case: Case) -> Reconciler {
    let params = case.params();
    let mut reconciler = Reconciler::new();
    let tickets = reconciler.open_blank(catalog(params));
    for ticket in tickets {
        let values = values_for(params, ticket.attribute_id());
        reconciler.complete_values(ticket, Ok(values));
    }
    reconciler
}

pub fn checksum_flat(reconciler: &Reconciler) -> u64 {
    let mut acc = 0u64;
    for id in reconciler.flat_selection() {
        acc = acc.wrapping_mul(131).wrapping_add(id.value());
    }
    acc.wrapping_mul(131)
        .wrapping_add(reconciler.selection().group_count() as u64)
}
