// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod transactions;
pub mod goals;
pub mod insights;
pub mod profile;
pub mod budgets;
pub mod reports;
pub mod exporter;

/// Views render from whatever could be loaded; a failed fetch shows as empty.
pub(crate) fn fetch_or_empty<T>(what: &str, fetched: crate::error::Result<Vec<T>>) -> Vec<T> {
    fetched.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not load {}; showing none", what);
        Vec::new()
    })
}
