// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halimede-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halimede and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core catalog model types.
//!
//! Attributes and their values arrive from the fetch collaborator and are
//! immutable once fetched; the selection types are per-dialog editing state
//! and are never persisted.

pub mod attribute;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod selection;
pub mod session;

pub use attribute::{Attribute, AttributeValue, ValueLiteral};
pub use ids::{AttributeId, Id, ParseIdError, ValueId};
pub use selection::SelectionMap;
pub use session::EditSession;
