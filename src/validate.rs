// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halimede-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halimede and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Plain-text length validation for rich-text descriptions.
//!
//! The description editor produces HTML; the length limits apply to the
//! visible text, so tags are stripped and whitespace collapsed before
//! counting.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag pattern"))
}

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern"))
}

/// Strips tags, collapses whitespace runs to single spaces, and trims.
pub fn plain_text(html: &str) -> String {
    let stripped = tag_pattern().replace_all(html, "");
    let collapsed = whitespace_pattern().replace_all(&stripped, " ");
    collapsed.trim().to_owned()
}

/// Visible-text length bounds for a rich-text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainTextBounds {
    min: usize,
    max: usize,
}

impl Default for PlainTextBounds {
    /// The description field's bounds: 10 to 4000 visible characters.
    fn default() -> Self {
        Self { min: 10, max: 4000 }
    }
}

impl PlainTextBounds {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Visible-text length of `html`, as the live counter under the editor
    /// shows it.
    pub fn measure(&self, html: &str) -> usize {
        plain_text(html).chars().count()
    }

    pub fn check(&self, html: &str) -> Result<(), PlainTextError> {
        let len = self.measure(html);
        if len < self.min {
            return Err(PlainTextError::TooShort { len, min: self.min });
        }
        if len > self.max {
            return Err(PlainTextError::TooLong { len, max: self.max });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlainTextError {
    TooShort { len: usize, min: usize },
    TooLong { len: usize, max: usize },
}

impl fmt::Display for PlainTextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { len, min } => {
                write!(f, "description is too short ({len} of at least {min} characters)")
            }
            Self::TooLong { len, max } => {
                write!(f, "description is too long ({len} of at most {max} characters)")
            }
        }
    }
}

impl std::error::Error for PlainTextError {}
