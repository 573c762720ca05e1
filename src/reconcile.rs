// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halimede-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halimede and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Picker state machine for the attribute-value selection dialog.
//!
//! The [`Reconciler`] is sans-I/O: it never awaits. Where a collaborator fetch
//! must run it hands out a [`ValueFetch`] ticket and the caller feeds the
//! result back through [`Reconciler::complete_values`]. Relevance of a
//! completion is decided explicitly from the ticket's token and session epoch,
//! never from closure capture, so a late response for a stale attribute can
//! write the cache but cannot repaint the picker.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexSet;
use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::cache::{FetchState, FetchToken, ValueCache};
use crate::model::{
    Attribute, AttributeId, AttributeValue, EditSession, SelectionMap, ValueId,
};
use crate::source::FetchError;

/// Editing-session lifecycle.
///
/// `Loading` tracks a rehydration in progress: the assigned flat list is
/// parked until every outstanding attribute's values have landed (or failed),
/// then the grouping pass runs and the session becomes `Ready`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Closed,
    Loading {
        assigned: Vec<ValueId>,
        outstanding: BTreeSet<AttributeId>,
    },
    Ready,
}

/// Ticket for one collaborator value fetch the caller must run.
///
/// Carries the attribute it was issued for, the cache token, and the session
/// epoch at issue time; all three are checked at completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueFetch {
    attribute_id: AttributeId,
    token: FetchToken,
    epoch: u64,
}

impl ValueFetch {
    fn new(attribute_id: AttributeId, token: FetchToken, epoch: u64) -> Self {
        Self {
            attribute_id,
            token,
            epoch,
        }
    }

    pub fn attribute_id(&self) -> AttributeId {
        self.attribute_id
    }

    pub fn token(&self) -> FetchToken {
        self.token
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// What a completion did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Values were cached; no picker-visible state changed.
    Stored,
    /// Values were cached and the active picker was primed from them.
    Primed,
    /// This completion retired the last outstanding attribute; the grouping
    /// pass ran and the session is now `Ready`.
    SessionReady,
    /// The ticket predates the current session; only the cache was written.
    Stale,
    /// The fetch failed; a warning was queued and the in-flight marker
    /// cleared so a retry can issue again.
    Failed,
}

/// Invalid picker operation. Surfaced as a user-facing validation message;
/// never mutates state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    /// `commit` was called with no attribute selected.
    NoActiveAttribute,
    /// The edit session is closed or still rehydrating.
    NotReady,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActiveAttribute => f.write_str("select an attribute first"),
            Self::NotReady => f.write_str("edit session is not ready"),
        }
    }
}

impl std::error::Error for SelectionError {}

/// User-facing advisory queued when a value fetch fails.
///
/// The host drains these with [`Reconciler::take_warnings`] and renders them
/// as toasts; they never abort the surrounding session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchWarning {
    attribute_id: AttributeId,
    message: String,
}

impl FetchWarning {
    pub fn attribute_id(&self) -> AttributeId {
        self.attribute_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FetchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not load values for attribute {}: {}",
            self.attribute_id, self.message
        )
    }
}

/// Batch of fetch tickets returned from a session open; attribute counts are
/// small.
pub type FetchBatch = SmallVec<[ValueFetch; 4]>;

/// Owns the value cache and the per-dialog edit session, and keeps the two
/// consistent with the single active picker.
///
/// The cache outlives edit sessions: [`close`](Self::close) discards the
/// session but keeps fetched values, so reopening the dialog does not refetch.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    attributes: Vec<Attribute>,
    cache: ValueCache,
    session: EditSession,
    phase: Phase,
    epoch: u64,
    /// The `(attribute, token)` completion that should prime the picker.
    display: Option<(AttributeId, FetchToken)>,
    active_values: Vec<AttributeValue>,
    warnings: Vec<FetchWarning>,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Closed
    }
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an edit session for a new record: nothing to rehydrate, so the
    /// session is `Ready` immediately.
    ///
    /// Still returns warm-up tickets for every uncached attribute, mirroring
    /// the dialog's eager value load; callers may drop them and rely on the
    /// lazy per-attribute path instead.
    pub fn open_blank(&mut self, attributes: Vec<Attribute>) -> FetchBatch {
        self.session.reset();
        self.attributes = attributes;
        self.display = None;
        self.active_values.clear();
        self.phase = Phase::Ready;
        let (tickets, _outstanding) = self.request_all();
        tickets
    }

    /// Opens an edit session for an existing record, rehydrating the grouped
    /// selection from the record's flat `assigned` ID list.
    ///
    /// Returns the fetches still needed; the session stays `Loading` until
    /// each returned (or coalesced-upon) fetch has been completed. If every
    /// attribute is already cached the grouping pass runs synchronously and
    /// no tickets are returned.
    ///
    /// May be called from `Ready` to switch to a different record; the active
    /// attribute survives and its pending picks are resynchronized after the
    /// grouping pass.
    pub fn open_record(&mut self, attributes: Vec<Attribute>, assigned: &[ValueId]) -> FetchBatch {
        let active = self.session.active_attribute_id();
        self.session.reset();
        self.session.set_active_attribute_id(active);
        self.attributes = attributes;
        self.display = None;
        self.active_values.clear();

        let (tickets, outstanding) = self.request_all();
        if outstanding.is_empty() {
            self.phase = Phase::Ready;
            self.group_assigned(assigned);
        } else {
            self.phase = Phase::Loading {
                assigned: assigned.to_vec(),
                outstanding,
            };
        }
        tickets
    }

    /// Closes the dialog. The session is discarded, the cache retained.
    ///
    /// Bumps the session epoch: completions of pre-close tickets may still
    /// land in the cache but can no longer touch picker-visible state.
    pub fn close(&mut self) {
        self.session.reset();
        self.active_values.clear();
        self.display = None;
        self.warnings.clear();
        self.phase = Phase::Closed;
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Sets (or clears) the active attribute in the picker.
    ///
    /// With cached values the pending picks are primed from the committed
    /// group immediately, so reopening a picker shows confirmed choices, not
    /// last-edited transient ones. Otherwise the picker is blanked and primed
    /// when the fetch lands, if this attribute is still the active one.
    pub fn select_attribute(
        &mut self,
        attribute_id: Option<AttributeId>,
    ) -> Result<Option<ValueFetch>, SelectionError> {
        self.ensure_ready()?;

        let Some(attribute_id) = attribute_id else {
            self.session.set_active_attribute_id(None);
            self.session.pending_mut().clear();
            self.active_values.clear();
            self.display = None;
            return Ok(None);
        };

        self.session.set_active_attribute_id(Some(attribute_id));
        match self.cache.request(attribute_id) {
            FetchState::Cached => {
                self.prime_active(attribute_id);
                self.display = None;
                Ok(None)
            }
            FetchState::Pending(token) => {
                self.session.pending_mut().clear();
                self.active_values.clear();
                self.display = Some((attribute_id, token));
                Ok(None)
            }
            FetchState::Issue(token) => {
                self.session.pending_mut().clear();
                self.active_values.clear();
                self.display = Some((attribute_id, token));
                Ok(Some(ValueFetch::new(attribute_id, token, self.epoch)))
            }
        }
    }

    /// Replaces the pending picker selection wholesale.
    ///
    /// Toggling with no open picker has nothing to write to and is ignored.
    pub fn update_pending(
        &mut self,
        ids: impl IntoIterator<Item = ValueId>,
    ) -> Result<(), SelectionError> {
        self.ensure_ready()?;
        if self.session.active_attribute_id().is_none() {
            return Ok(());
        }
        self.session.set_pending(ids);
        Ok(())
    }

    /// Merges the pending picks into the active attribute's committed group
    /// as a set union, then clears the pending set.
    pub fn commit(&mut self) -> Result<(), SelectionError> {
        self.ensure_ready()?;
        let attribute_id = self
            .session
            .active_attribute_id()
            .ok_or(SelectionError::NoActiveAttribute)?;

        let picked: Vec<ValueId> = self.session.pending().iter().copied().collect();
        self.session.selection_mut().merge(attribute_id, picked);
        self.session.pending_mut().clear();
        self.session.sync_flat();
        Ok(())
    }

    /// Removes one ID from the attribute's committed group.
    ///
    /// Removing an ID that is not present is a silent no-op. If the attribute
    /// is the active one, the pending set is refreshed to the confirmed group
    /// so the picker display stays in step.
    pub fn remove_value(
        &mut self,
        attribute_id: AttributeId,
        value_id: ValueId,
    ) -> Result<(), SelectionError> {
        self.ensure_ready()?;
        self.session.selection_mut().remove(attribute_id, value_id);
        self.session.sync_flat();
        if self.session.active_attribute_id() == Some(attribute_id) {
            self.refresh_pending(attribute_id);
        }
        Ok(())
    }

    /// Removes the attribute's entire committed group.
    pub fn clear_attribute(&mut self, attribute_id: AttributeId) -> Result<(), SelectionError> {
        self.ensure_ready()?;
        self.session.selection_mut().clear_group(attribute_id);
        self.session.sync_flat();
        if self.session.active_attribute_id() == Some(attribute_id) {
            self.session.pending_mut().clear();
        }
        Ok(())
    }

    /// Single completion entry point for display and rehydration fetches.
    ///
    /// The cache write always lands (last write wins). Rehydration
    /// bookkeeping keys off the attribute, not the ticket, so a coalesced or
    /// pre-close fetch that delivers the right data still retires the
    /// outstanding attribute. Picker-visible state only changes when the
    /// ticket's epoch and display token are both current.
    pub fn complete_values(
        &mut self,
        fetch: ValueFetch,
        result: Result<Vec<AttributeValue>, FetchError>,
    ) -> FetchOutcome {
        let attribute_id = fetch.attribute_id();
        match result {
            Ok(values) => {
                self.cache.store(attribute_id, fetch.token(), values);
                let retired = self.retire_outstanding(attribute_id);
                let finished = retired && self.try_finish_rehydration();
                if fetch.epoch() != self.epoch {
                    return FetchOutcome::Stale;
                }
                if finished {
                    return FetchOutcome::SessionReady;
                }
                if retired {
                    return FetchOutcome::Stored;
                }
                if self.display == Some((attribute_id, fetch.token())) {
                    self.display = None;
                    self.prime_active(attribute_id);
                    return FetchOutcome::Primed;
                }
                FetchOutcome::Stored
            }
            Err(err) => {
                self.cache.abandon(attribute_id, fetch.token());
                // A failure still retires the attribute: rehydration groups
                // what it has rather than waiting forever.
                if self.retire_outstanding(attribute_id) {
                    self.try_finish_rehydration();
                }
                if fetch.epoch() != self.epoch {
                    return FetchOutcome::Stale;
                }
                if self.display == Some((attribute_id, fetch.token())) {
                    self.display = None;
                }
                self.warnings.push(FetchWarning {
                    attribute_id,
                    message: err.message().to_owned(),
                });
                FetchOutcome::Failed
            }
        }
    }

    /// Drains the queued user-facing warnings.
    pub fn take_warnings(&mut self) -> Vec<FetchWarning> {
        std::mem::take(&mut self.warnings)
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn selection(&self) -> &SelectionMap {
        self.session.selection()
    }

    pub fn pending(&self) -> &IndexSet<ValueId> {
        self.session.pending()
    }

    pub fn active_attribute_id(&self) -> Option<AttributeId> {
        self.session.active_attribute_id()
    }

    /// The flat, deduplicated ID list the submission payload reads.
    pub fn flat_selection(&self) -> &IndexSet<ValueId> {
        self.session.flat()
    }

    /// The picker listbox contents for the active attribute.
    pub fn active_values(&self) -> &[AttributeValue] {
        &self.active_values
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn cache(&self) -> &ValueCache {
        &self.cache
    }

    /// Display name for an attribute, with a placeholder for unknown IDs.
    pub fn attribute_name(&self, attribute_id: AttributeId) -> SmolStr {
        self.attributes
            .iter()
            .find(|attribute| attribute.id() == attribute_id)
            .map(|attribute| SmolStr::new(attribute.name()))
            .unwrap_or_else(|| SmolStr::new(format!("attribute #{attribute_id}")))
    }

    /// Chip label for a cached value; `None` if the attribute's values were
    /// never loaded.
    pub fn value_label(&self, attribute_id: AttributeId, value_id: ValueId) -> Option<SmolStr> {
        self.cache
            .find(attribute_id, value_id)
            .map(AttributeValue::label)
    }

    fn ensure_ready(&self) -> Result<(), SelectionError> {
        if matches!(self.phase, Phase::Ready) {
            Ok(())
        } else {
            Err(SelectionError::NotReady)
        }
    }

    fn request_all(&mut self) -> (FetchBatch, BTreeSet<AttributeId>) {
        let mut tickets = FetchBatch::new();
        let mut outstanding = BTreeSet::new();
        for attribute in &self.attributes {
            match self.cache.request(attribute.id()) {
                FetchState::Cached => {}
                FetchState::Pending(_) => {
                    outstanding.insert(attribute.id());
                }
                FetchState::Issue(token) => {
                    outstanding.insert(attribute.id());
                    tickets.push(ValueFetch::new(attribute.id(), token, self.epoch));
                }
            }
        }
        (tickets, outstanding)
    }

    fn retire_outstanding(&mut self, attribute_id: AttributeId) -> bool {
        match &mut self.phase {
            Phase::Loading { outstanding, .. } => outstanding.remove(&attribute_id),
            _ => false,
        }
    }

    /// Runs the grouping pass once the last outstanding attribute retires.
    fn try_finish_rehydration(&mut self) -> bool {
        match &self.phase {
            Phase::Loading { outstanding, .. } if outstanding.is_empty() => {}
            _ => return false,
        }
        if let Phase::Loading { assigned, .. } = std::mem::replace(&mut self.phase, Phase::Ready) {
            self.group_assigned(&assigned);
        }
        true
    }

    /// Groups the assigned flat list by owning attribute, replacing any prior
    /// selection content.
    fn group_assigned(&mut self, assigned: &[ValueId]) {
        let mut selection = SelectionMap::new();
        for &value_id in assigned {
            // IDs that no longer resolve reflect values deleted since the
            // record was saved; they are dropped, not reported.
            if let Some(attribute_id) = self.cache.owner_of(value_id) {
                selection.insert(attribute_id, value_id);
            }
        }
        self.session.set_selection(selection);
        self.session.sync_flat();
        if let Some(attribute_id) = self.session.active_attribute_id() {
            self.prime_active(attribute_id);
        }
    }

    /// Loads the picker listbox from the cache and the pending set from the
    /// committed group.
    fn prime_active(&mut self, attribute_id: AttributeId) {
        let values = self
            .cache
            .values(attribute_id)
            .map(<[AttributeValue]>::to_vec)
            .unwrap_or_default();
        self.active_values = values;
        self.refresh_pending(attribute_id);
    }

    fn refresh_pending(&mut self, attribute_id: AttributeId) {
        let confirmed = self
            .session
            .selection()
            .group(attribute_id)
            .cloned()
            .unwrap_or_default();
        *self.session.pending_mut() = confirmed;
    }
}
