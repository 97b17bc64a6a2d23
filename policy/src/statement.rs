// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rib::types::Community;
use serde::{Deserialize, Serialize};

/// A named, ordered policy definition.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct RoutePolicy {
    pub name: String,
    pub statements: Vec<Statement>,
}

/// Metric arithmetic. Additive and subtractive forms compute in unsigned
/// 32-bit arithmetic and saturate at the representable bounds: past
/// `u32::MAX` the metric pegs at `u32::MAX`, below zero it pegs at zero.
/// Neither wraps, neither is an error.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum MetricOp {
    Set(u32),
    Add(u32),
    Subtract(u32),
}

/// Predicate selecting community values for deletion.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum CommunityMatch {
    Exact(Community),
    /// Matched against the community's `high:low` textual rendering.
    Regex(String),
    /// A named community list; resolution failure is a configuration
    /// error, not a non-match.
    List(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum Statement {
    SetMetric(MetricOp),
    /// Discard the existing community set and replace it wholesale.
    SetCommunities(Vec<Community>),
    /// Union with the existing set; first-appearance order preserved,
    /// duplicates collapsed.
    AddCommunities(Vec<Community>),
    /// Remove every community matched by the predicate; unmatched values
    /// keep their original relative order.
    DeleteCommunities(CommunityMatch),
    /// Evaluate the named sub-policy against the candidate. A deny
    /// terminal in the callee denies the whole evaluation; a permit
    /// terminal (or fall-through) continues at the caller's next
    /// statement.
    Call(String),
    Continue,
    Permit,
    Deny,
}

/// Control flow yielded by one statement: keep going, or stop with a
/// terminal disposition. Returned explicitly rather than signalled by
/// early returns so it composes with the ordered-statement loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Disposition {
    Continue,
    Permit,
    Deny,
}
