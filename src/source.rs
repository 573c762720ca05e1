// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halimede-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halimede and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Fetch collaborator contract.
//!
//! The HTTP transport is external to this crate; consumers implement
//! [`CatalogSource`] over their client. [`InMemorySource`] serves tests and
//! the demo binary, with per-attribute failure injection, optional artificial
//! latency, and fetch counters.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::model::{Attribute, AttributeId, AttributeValue, ValueId};

/// Failure reported by the fetch collaborator.
///
/// Carries the backend's message when one exists; the reconciler surfaces it
/// on the warning queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FetchError {}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_attributes(&self) -> Result<Vec<Attribute>, FetchError>;

    async fn fetch_values(
        &self,
        attribute_id: AttributeId,
    ) -> Result<Vec<AttributeValue>, FetchError>;
}

/// Fixed-data source for tests and the demo binary.
#[derive(Debug, Default)]
pub struct InMemorySource {
    attributes: Vec<Attribute>,
    values: BTreeMap<AttributeId, Vec<AttributeValue>>,
    failing: BTreeSet<AttributeId>,
    latency: Option<Duration>,
    attribute_fetches: AtomicUsize,
    value_fetches: Mutex<BTreeMap<AttributeId, usize>>,
}

impl InMemorySource {
    pub fn new(
        attributes: Vec<Attribute>,
        values: BTreeMap<AttributeId, Vec<AttributeValue>>,
    ) -> Self {
        Self {
            attributes,
            values,
            ..Self::default()
        }
    }

    /// The built-in demo catalog: Color, Size, and Waterproof.
    pub fn demo() -> Self {
        let attributes = vec![
            Attribute::new_with(AttributeId::new(1), "Color", "STRING", "ACTIVO"),
            Attribute::new_with(AttributeId::new(2), "Size", "NUMBER", "ACTIVO"),
            Attribute::new_with(AttributeId::new(3), "Waterproof", "BOOLEAN", "ACTIVO"),
        ];

        let mut values = BTreeMap::new();
        values.insert(
            AttributeId::new(1),
            vec![
                AttributeValue::string(ValueId::new(10), "Red"),
                AttributeValue::string(ValueId::new(11), "Blue"),
                AttributeValue::string(ValueId::new(12), "Green"),
            ],
        );
        values.insert(
            AttributeId::new(2),
            vec![
                AttributeValue::number(ValueId::new(20), 38.0),
                AttributeValue::number(ValueId::new(21), 40.0),
                AttributeValue::number(ValueId::new(22), 42.0),
            ],
        );
        values.insert(
            AttributeId::new(3),
            vec![
                AttributeValue::boolean(ValueId::new(30), true),
                AttributeValue::boolean(ValueId::new(31), false),
            ],
        );

        Self::new(attributes, values)
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Marks the attribute's value fetch as failing.
    pub fn fail_values_for(mut self, attribute_id: AttributeId) -> Self {
        self.failing.insert(attribute_id);
        self
    }

    pub fn attribute_fetches(&self) -> usize {
        self.attribute_fetches.load(Ordering::Relaxed)
    }

    /// How many value fetches were issued for the attribute; used to assert
    /// request coalescing.
    pub fn value_fetches(&self, attribute_id: AttributeId) -> usize {
        self.value_fetches
            .lock()
            .map(|counts| counts.get(&attribute_id).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

#[async_trait]
impl CatalogSource for InMemorySource {
    async fn fetch_attributes(&self) -> Result<Vec<Attribute>, FetchError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.attribute_fetches.fetch_add(1, Ordering::Relaxed);
        Ok(self.attributes.clone())
    }

    async fn fetch_values(
        &self,
        attribute_id: AttributeId,
    ) -> Result<Vec<AttributeValue>, FetchError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if let Ok(mut counts) = self.value_fetches.lock() {
            *counts.entry(attribute_id).or_insert(0) += 1;
        }
        if self.failing.contains(&attribute_id) {
            return Err(FetchError::new(format!(
                "values for attribute {attribute_id} are unavailable"
            )));
        }
        Ok(self.values.get(&attribute_id).cloned().unwrap_or_default())
    }
}
