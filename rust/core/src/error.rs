// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for survey document reading.
//!
//! Only malformed markup is fatal. Problems with individual records (missing
//! attributes, unresolved references) are reported as
//! [`Diagnostic`](crate::Diagnostic) values instead.

use thiserror::Error;

/// Result type alias for document reading.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort reading a survey document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Markup could not be tokenized at the given byte offset.
    #[error("syntax error at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// A comment, CDATA section, processing instruction or declaration
    /// was never terminated.
    #[error("unterminated {construct} starting at byte {offset}")]
    Unterminated {
        construct: &'static str,
        offset: usize,
    },

    /// A closing tag did not match the innermost open element.
    #[error("mismatched closing tag at byte {offset}: expected </{expected}>, found </{found}>")]
    MismatchedTag {
        expected: String,
        found: String,
        offset: usize,
    },

    /// A closing tag appeared with no open element.
    #[error("unexpected closing tag </{name}> at byte {offset}")]
    UnexpectedClose { name: String, offset: usize },

    /// The input ended while an element was still open.
    #[error("element <{name}> opened at byte {offset} is never closed")]
    UnclosedElement { name: String, offset: usize },

    /// The input contains no element at all.
    #[error("document has no root element")]
    NoRootElement,
}
