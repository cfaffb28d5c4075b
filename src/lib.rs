// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod budget;
pub mod cli;
pub mod commands;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod goals;
pub mod insights;
pub mod ledger;
pub mod models;
pub mod store;
pub mod utils;
pub mod validate;
pub mod window;

pub use error::{Error, Result};
