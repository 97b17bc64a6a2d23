// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! This crate contains the routesim route policy engine. A policy is an
//! ordered sequence of match/set statements applied to a candidate route:
//! metric arithmetic, community-set manipulation, and terminal
//! permit/deny actions. Evaluation walks the statements in order against
//! an accumulating candidate (initially a copy of the input route) and
//! halts at the first terminal action; a policy that falls off its end
//! denies by default.
//!
//! Policies are named and resolved through a [`PolicyRegistry`], as are
//! named community lists. A dangling reference to either is a
//! configuration error surfaced to the caller, never an implicit deny:
//! the surrounding conversion stage must abort the referencing element
//! with a diagnostic naming the missing definition.
//!
//! Statement definitions are produced by vendor-specific configuration
//! converters, which are also responsible for rejecting policies that
//! reference themselves transitively before this engine runs.

pub mod error;
pub mod eval;
pub mod statement;

pub use error::Error;
pub use eval::{PolicyRegistry, PolicyResult};
pub use statement::{
    CommunityMatch, Disposition, MetricOp, RoutePolicy, Statement,
};
