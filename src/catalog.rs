// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reading a catalog file into records.
//!
//! Two shapes are accepted: a bare JSON array of records, or an object with
//! the records under `extensions`.

use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::Record;

pub fn parse_catalog(text: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(text)?;
    let items = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => map
            .remove("extensions")
            .ok_or_else(|| Error::catalog("expected an array or an object with `extensions`"))?,
        _ => return Err(Error::catalog("expected an array or an object with `extensions`")),
    };
    serde_json::from_value(items).map_err(|e| Error::catalog(format!("invalid record: {}", e)))
}

pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| Error::catalog(format!("cannot read {}: {}", path.display(), e)))?;
    parse_catalog(&text)
}
