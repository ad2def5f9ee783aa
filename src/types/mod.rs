// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for type safety across gasfee.
//!
//! This module provides newtype wrappers for the quantities that flow through
//! an estimate, plus the snapshot records produced by the fetchers:
//! - Gas units and gas prices in gwei
//! - Token prices and USD values
//! - Gas and token price readings
//! - The final cost estimate

pub mod estimate;
pub mod gas;
pub mod price;

// Note: Public types are re-exported from lib.rs, not here
