// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halimede-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halimede and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-attribute store of fetched values.
//!
//! The cache performs no I/O. Callers ask for a fetch ticket via
//! [`ValueCache::request`] and feed results back through
//! [`ValueCache::store`] or [`ValueCache::abandon`]; overlapping requests for
//! the same attribute coalesce onto the in-flight token instead of issuing a
//! second fetch. Entries are never evicted within a screen lifetime.

use std::collections::BTreeMap;

use crate::model::{AttributeId, AttributeValue, ValueId};

/// Opaque ticket identifying one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchToken(u64);

/// Outcome of asking the cache for an attribute's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    /// Values are cached; no fetch is needed.
    Cached,
    /// A fetch for this attribute is already in flight; its completion covers
    /// this request too.
    Pending(FetchToken),
    /// No fetch is in flight; the caller must run one under this token.
    Issue(FetchToken),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueCache {
    values: BTreeMap<AttributeId, Vec<AttributeValue>>,
    in_flight: BTreeMap<AttributeId, FetchToken>,
    next_token: u64,
}

impl ValueCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, attribute_id: AttributeId) -> bool {
        self.values.contains_key(&attribute_id)
    }

    pub fn attribute_count(&self) -> usize {
        self.values.len()
    }

    /// Cached values for the attribute, or `None` if never loaded. Never
    /// triggers a fetch.
    pub fn values(&self, attribute_id: AttributeId) -> Option<&[AttributeValue]> {
        self.values.get(&attribute_id).map(Vec::as_slice)
    }

    /// Label lookup within one cached group. Never triggers a fetch.
    pub fn find(&self, attribute_id: AttributeId, value_id: ValueId) -> Option<&AttributeValue> {
        self.values
            .get(&attribute_id)?
            .iter()
            .find(|value| value.id() == value_id)
    }

    /// The attribute a cached value belongs to.
    ///
    /// Linear scan over all cached groups; attribute and value counts in this
    /// domain stay in the tens.
    pub fn owner_of(&self, value_id: ValueId) -> Option<AttributeId> {
        self.values
            .iter()
            .find(|(_, values)| values.iter().any(|value| value.id() == value_id))
            .map(|(attribute_id, _)| *attribute_id)
    }

    pub fn request(&mut self, attribute_id: AttributeId) -> FetchState {
        if self.values.contains_key(&attribute_id) {
            return FetchState::Cached;
        }
        if let Some(token) = self.in_flight.get(&attribute_id) {
            return FetchState::Pending(*token);
        }
        self.next_token += 1;
        let token = FetchToken(self.next_token);
        self.in_flight.insert(attribute_id, token);
        FetchState::Issue(token)
    }

    /// Records a completed fetch, stamping the owning attribute onto each
    /// value.
    ///
    /// Last write wins on the data. The in-flight marker only clears when the
    /// completing token is the current one, so a newer fetch's marker survives
    /// an older completion and its result still overwrites this one when it
    /// lands.
    pub fn store(
        &mut self,
        attribute_id: AttributeId,
        token: FetchToken,
        mut values: Vec<AttributeValue>,
    ) {
        for value in &mut values {
            value.set_attribute_id(Some(attribute_id));
        }
        self.values.insert(attribute_id, values);
        if self.in_flight.get(&attribute_id) == Some(&token) {
            self.in_flight.remove(&attribute_id);
        }
    }

    /// Clears the in-flight marker after a failed fetch so a later retry can
    /// issue again.
    pub fn abandon(&mut self, attribute_id: AttributeId, token: FetchToken) {
        if self.in_flight.get(&attribute_id) == Some(&token) {
            self.in_flight.remove(&attribute_id);
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.in_flight.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{FetchState, ValueCache};
    use crate::model::fixtures::{aid, vid};
    use crate::model::AttributeValue;

    #[test]
    fn request_coalesces_onto_the_inflight_token() {
        let mut cache = ValueCache::new();

        let FetchState::Issue(token) = cache.request(aid(1)) else {
            panic!("expected a fresh fetch to be issued");
        };
        assert_eq!(cache.request(aid(1)), FetchState::Pending(token));

        cache.store(aid(1), token, vec![AttributeValue::string(vid(10), "Red")]);
        assert_eq!(cache.request(aid(1)), FetchState::Cached);
    }

    #[test]
    fn store_stamps_the_owning_attribute() {
        let mut cache = ValueCache::new();
        let FetchState::Issue(token) = cache.request(aid(1)) else {
            panic!("expected a fresh fetch to be issued");
        };

        cache.store(aid(1), token, vec![AttributeValue::string(vid(10), "Red")]);
        let value = cache.find(aid(1), vid(10)).expect("cached value");
        assert_eq!(value.attribute_id(), Some(aid(1)));
        assert_eq!(cache.owner_of(vid(10)), Some(aid(1)));
        assert_eq!(cache.owner_of(vid(99)), None);
    }

    #[test]
    fn stale_store_overwrites_data_but_keeps_newer_marker() {
        let mut cache = ValueCache::new();
        let FetchState::Issue(old_token) = cache.request(aid(1)) else {
            panic!("expected a fresh fetch to be issued");
        };

        // Abandon and re-issue: the old ticket is now stale.
        cache.abandon(aid(1), old_token);
        let FetchState::Issue(new_token) = cache.request(aid(1)) else {
            panic!("expected a fresh fetch to be issued");
        };
        assert_ne!(old_token, new_token);

        cache.store(aid(1), old_token, vec![AttributeValue::string(vid(10), "Red")]);
        assert!(cache.contains(aid(1)));

        // Cached data now hides the marker from `request`, but the newer
        // fetch's completion must still be accepted as the current one.
        cache.store(aid(1), new_token, vec![AttributeValue::string(vid(11), "Blue")]);
        assert!(cache.find(aid(1), vid(11)).is_some());
        assert!(cache.find(aid(1), vid(10)).is_none());
    }

    #[test]
    fn find_never_fetches() {
        let cache = ValueCache::new();
        assert!(cache.find(aid(1), vid(10)).is_none());
        assert_eq!(cache.values(aid(1)), None);
        assert_eq!(cache.attribute_count(), 0);
    }
}
