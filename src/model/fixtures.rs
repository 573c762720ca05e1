// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halimede-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halimede and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::attribute::{Attribute, AttributeValue};
use super::ids::{AttributeId, ValueId};

pub(crate) fn aid(value: u64) -> AttributeId {
    AttributeId::new(value)
}

pub(crate) fn vid(value: u64) -> ValueId {
    ValueId::new(value)
}

/// Two-attribute catalog: Color (Red, Blue) and Size (38).
pub(crate) fn color_size_attributes() -> Vec<Attribute> {
    vec![
        Attribute::new(aid(1), "Color"),
        Attribute::new(aid(2), "Size"),
    ]
}

/// Wire-shaped value lists for [`color_size_attributes`]; no owning attribute
/// stamped, exactly as the fetch collaborator returns them.
pub(crate) fn color_size_values() -> BTreeMap<AttributeId, Vec<AttributeValue>> {
    let mut values = BTreeMap::new();
    values.insert(
        aid(1),
        vec![
            AttributeValue::string(vid(10), "Red"),
            AttributeValue::string(vid(11), "Blue"),
        ],
    );
    values.insert(aid(2), vec![AttributeValue::number(vid(20), 38.0)]);
    values
}
