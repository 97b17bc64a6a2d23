// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::protocol::{RoutingProtocolKind, VendorDialect};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The protocol has no administrative distance on the given vendor.
    /// This is an expected condition, not a defect: callers exclude the
    /// protocol from consideration on that device.
    #[error("no administrative distance for protocol '{protocol}' on vendor '{vendor}'")]
    UnsupportedCombination {
        protocol: RoutingProtocolKind,
        vendor: VendorDialect,
    },

    #[error("no routing protocol with name '{0}'")]
    UnknownProtocolName(String),

    #[error("invalid prefix {0}: length exceeds address width")]
    InvalidPrefix(String),
}
