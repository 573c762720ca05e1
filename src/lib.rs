// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halimede-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halimede and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Halimede — multi-valued attribute selection for record edit screens.
//!
//! The [`reconcile::Reconciler`] state machine keeps a grouped selection, a
//! picker staging area, and a per-attribute value cache consistent across
//! open/edit/close cycles without performing I/O itself; [`screen`] wraps it
//! in an async facade over a [`source::CatalogSource`].

pub mod cache;
pub mod model;
pub mod reconcile;
pub mod screen;
pub mod source;
pub mod submission;
pub mod validate;
