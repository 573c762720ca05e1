// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halimede-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halimede and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Async facade driving a [`CatalogSource`] against the reconciler.
//!
//! Hosts with their own event loop use the [`Reconciler`] ticket API
//! directly; this facade runs the fetches itself, so every method returns
//! with the session settled.

use std::sync::Arc;

use indexmap::IndexSet;
use tokio::task::JoinSet;

use crate::model::{AttributeId, AttributeValue, SelectionMap, ValueId};
use crate::reconcile::{FetchBatch, FetchWarning, Phase, Reconciler, SelectionError};
use crate::source::{CatalogSource, FetchError};
use crate::submission;

pub struct PickerScreen<S> {
    source: Arc<S>,
    reconciler: Reconciler,
}

impl<S: CatalogSource + 'static> PickerScreen<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            reconciler: Reconciler::new(),
        }
    }

    /// Opens the edit dialog for a new record, warming the value cache.
    pub async fn open_blank(&mut self) -> Result<(), FetchError> {
        let attributes = self.source.fetch_attributes().await?;
        let tickets = self.reconciler.open_blank(attributes);
        self.run_fetches(tickets).await;
        Ok(())
    }

    /// Opens the edit dialog for an existing record and rehydrates the
    /// grouped selection from its flat `assigned` ID list.
    ///
    /// Only the attribute-list fetch is a hard failure; per-attribute value
    /// fetch failures are queued as warnings and the remaining attributes are
    /// grouped regardless.
    pub async fn open_record(&mut self, assigned: &[ValueId]) -> Result<(), FetchError> {
        let attributes = self.source.fetch_attributes().await?;
        let tickets = self.reconciler.open_record(attributes, assigned);
        self.run_fetches(tickets).await;
        Ok(())
    }

    /// Runs the outstanding fetches concurrently, applying completions in
    /// arrival order.
    async fn run_fetches(&mut self, tickets: FetchBatch) {
        let mut fetches = JoinSet::new();
        for ticket in tickets {
            let source = Arc::clone(&self.source);
            fetches.spawn(async move {
                let result = source.fetch_values(ticket.attribute_id()).await;
                (ticket, result)
            });
        }
        while let Some(joined) = fetches.join_next().await {
            if let Ok((ticket, result)) = joined {
                self.reconciler.complete_values(ticket, result);
            }
        }
    }

    pub async fn select_attribute(
        &mut self,
        attribute_id: Option<AttributeId>,
    ) -> Result<(), SelectionError> {
        if let Some(ticket) = self.reconciler.select_attribute(attribute_id)? {
            let result = self.source.fetch_values(ticket.attribute_id()).await;
            self.reconciler.complete_values(ticket, result);
        }
        Ok(())
    }

    pub fn update_pending(
        &mut self,
        ids: impl IntoIterator<Item = ValueId>,
    ) -> Result<(), SelectionError> {
        self.reconciler.update_pending(ids)
    }

    pub fn commit(&mut self) -> Result<(), SelectionError> {
        self.reconciler.commit()
    }

    pub fn remove_value(
        &mut self,
        attribute_id: AttributeId,
        value_id: ValueId,
    ) -> Result<(), SelectionError> {
        self.reconciler.remove_value(attribute_id, value_id)
    }

    pub fn clear_attribute(&mut self, attribute_id: AttributeId) -> Result<(), SelectionError> {
        self.reconciler.clear_attribute(attribute_id)
    }

    pub fn close(&mut self) {
        self.reconciler.close();
    }

    /// The `attributeValueIds` form-data field for the save request.
    pub fn submission_field(&self) -> String {
        submission::join_ids(self.reconciler.flat_selection().iter().copied())
    }

    pub fn take_warnings(&mut self) -> Vec<FetchWarning> {
        self.reconciler.take_warnings()
    }

    pub fn selection(&self) -> &SelectionMap {
        self.reconciler.selection()
    }

    pub fn pending(&self) -> &IndexSet<ValueId> {
        self.reconciler.pending()
    }

    pub fn active_attribute_id(&self) -> Option<AttributeId> {
        self.reconciler.active_attribute_id()
    }

    pub fn flat_selection(&self) -> &IndexSet<ValueId> {
        self.reconciler.flat_selection()
    }

    pub fn active_values(&self) -> &[AttributeValue] {
        self.reconciler.active_values()
    }

    pub fn phase(&self) -> &Phase {
        self.reconciler.phase()
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }
}
