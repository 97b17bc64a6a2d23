// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Route computation core.
//!
//! This crate holds the pieces a single network element needs to compute
//! its routing state from already-known candidate routes:
//!
//! - vendor-specific administrative distance tables ([`distance`]),
//! - a longest-prefix-match index over announced prefixes and next-hop
//!   host routes, used to find recursive routes whose resolution must be
//!   re-checked when the underlying topology changes ([`resolution`]),
//! - candidate route ranking ([`bestpath`]).
//!
//! Everything here is synchronous and owned by one element's computation
//! session. The distance tables are immutable after construction and may
//! be shared freely across sessions.

pub mod bestpath;
pub mod distance;
pub mod error;
pub mod protocol;
pub mod resolution;
pub mod types;

pub use error::Error;
pub use protocol::{RoutingProtocolKind, VendorDialect};
pub use resolution::ResolutionTrie;
pub use types::{Community, Origin, Prefix4, Route};
