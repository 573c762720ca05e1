// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halimede-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halimede and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::ids::{AttributeId, ValueId};

/// A named product characteristic category (e.g. "Color").
///
/// Immutable once fetched. `data_type` and `status` are backend-owned strings
/// carried as opaque fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    id: AttributeId,
    name: SmolStr,
    #[serde(default)]
    data_type: SmolStr,
    #[serde(default)]
    status: SmolStr,
}

impl Attribute {
    pub fn new(id: AttributeId, name: impl Into<SmolStr>) -> Self {
        Self {
            id,
            name: name.into(),
            data_type: SmolStr::default(),
            status: SmolStr::default(),
        }
    }

    pub fn new_with(
        id: AttributeId,
        name: impl Into<SmolStr>,
        data_type: impl Into<SmolStr>,
        status: impl Into<SmolStr>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            data_type: data_type.into(),
            status: status.into(),
        }
    }

    pub fn id(&self) -> AttributeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

/// One concrete value under an attribute, carrying exactly one typed literal.
///
/// Wire payloads do not name the owning attribute; the value cache stamps
/// `attribute_id` on when a fetch result is stored, so cached instances always
/// carry `Some`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeValue {
    id: ValueId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attribute_id: Option<AttributeId>,
    #[serde(default, skip_serializing_if = "SmolStr::is_empty")]
    value_string: SmolStr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value_number: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value_boolean: Option<bool>,
}

impl AttributeValue {
    pub fn string(id: ValueId, value: impl Into<SmolStr>) -> Self {
        Self {
            id,
            attribute_id: None,
            value_string: value.into(),
            value_number: None,
            value_boolean: None,
        }
    }

    pub fn number(id: ValueId, value: f64) -> Self {
        Self {
            id,
            attribute_id: None,
            value_string: SmolStr::default(),
            value_number: Some(value),
            value_boolean: None,
        }
    }

    pub fn boolean(id: ValueId, value: bool) -> Self {
        Self {
            id,
            attribute_id: None,
            value_string: SmolStr::default(),
            value_number: None,
            value_boolean: Some(value),
        }
    }

    pub fn id(&self) -> ValueId {
        self.id
    }

    pub fn attribute_id(&self) -> Option<AttributeId> {
        self.attribute_id
    }

    pub fn set_attribute_id(&mut self, attribute_id: Option<AttributeId>) {
        self.attribute_id = attribute_id;
    }

    pub fn value_string(&self) -> &str {
        &self.value_string
    }

    pub fn value_number(&self) -> Option<f64> {
        self.value_number
    }

    pub fn value_boolean(&self) -> Option<bool> {
        self.value_boolean
    }

    /// The populated literal payload.
    ///
    /// Well-formed backend rows populate exactly one field; if several are
    /// populated the string wins over the number, which wins over the boolean.
    pub fn literal(&self) -> Option<ValueLiteral> {
        if !self.value_string.is_empty() {
            return Some(ValueLiteral::String(self.value_string.clone()));
        }
        if let Some(number) = self.value_number {
            return Some(ValueLiteral::Number(number));
        }
        self.value_boolean.map(ValueLiteral::Boolean)
    }

    /// Human-readable chip text for the selection display.
    pub fn label(&self) -> SmolStr {
        match self.literal() {
            Some(ValueLiteral::String(value)) => value,
            Some(ValueLiteral::Number(value)) => SmolStr::new(value.to_string()),
            Some(ValueLiteral::Boolean(true)) => SmolStr::new_static("True"),
            Some(ValueLiteral::Boolean(false)) => SmolStr::new_static("False"),
            None => SmolStr::new(format!("#{}", self.id)),
        }
    }
}

/// The typed literal carried by an [`AttributeValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum ValueLiteral {
    String(SmolStr),
    Number(f64),
    Boolean(bool),
}
