// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halimede-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halimede and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Submission-boundary encoding of the flat value-ID list.
//!
//! The host form sends `attributeValueIds` as one comma-joined form-data
//! field (`"1,2,3"`). The array-of-IDs alternative is plain serde on
//! [`ValueId`]; no other wire format exists at this boundary.

use std::fmt;

use crate::model::ValueId;

/// Renders the comma-joined field. The empty iterator renders the empty
/// string.
pub fn join_ids(ids: impl IntoIterator<Item = ValueId>) -> String {
    let mut out = String::new();
    let mut buffer = itoa::Buffer::new();
    for (index, id) in ids.into_iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        out.push_str(buffer.format(id.value()));
    }
    out
}

/// Parses a comma-joined field back into IDs.
///
/// Tolerates surrounding whitespace and blank segments; an empty or
/// whitespace-only input parses to the empty list. Duplicates are preserved
/// (rehydration collapses them).
pub fn parse_ids(raw: &str) -> Result<Vec<ValueId>, ParseIdListError> {
    let mut ids = Vec::new();
    let mut offset = 0usize;
    for segment in raw.split(',') {
        let trimmed = segment.trim();
        if !trimmed.is_empty() {
            let value: u64 = trimmed.parse().map_err(|_| ParseIdListError {
                segment: trimmed.to_owned(),
                offset,
            })?;
            ids.push(ValueId::new(value));
        }
        offset += segment.len() + 1;
    }
    Ok(ids)
}

/// A segment of the comma-joined field that is not an unsigned integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdListError {
    pub segment: String,
    pub offset: usize,
}

impl fmt::Display for ParseIdListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid value id '{}' at offset {}",
            self.segment, self.offset
        )
    }
}

impl std::error::Error for ParseIdListError {}
