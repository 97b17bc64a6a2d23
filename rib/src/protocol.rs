// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed enumerations of supported device dialects and routing protocol
//! kinds. Both sets are fixed at compile time and versioned alongside the
//! administrative distance tables in [`crate::distance`]; adding a vendor
//! or protocol is a data-table update, not a new code path.

use crate::error::Error;
use lazy_static::lazy_static;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Device/OS flavors with distinct control-plane behavior. The
/// placeholder variants (`Empty`, `Ignored`, `Unknown`) exist so upstream
/// configuration converters can tag elements they recognized but do not
/// model; such vendors define distances only for connected and static
/// routes.
#[derive(
    Debug,
    Copy,
    Clone,
    Serialize,
    Deserialize,
    Eq,
    Hash,
    PartialEq,
    Ord,
    PartialOrd,
)]
pub enum VendorDialect {
    AlcatelAos,
    Arista,
    ArubaOs,
    Aws,
    BladeNetwork,
    Cadant,
    CiscoAsa,
    CiscoIos,
    CiscoIosXr,
    CiscoNx,
    Empty,
    F5,
    FlatJuniper,
    FlatVyos,
    Force10,
    Foundry,
    Host,
    Ignored,
    Iptables,
    Juniper,
    JuniperSwitch,
    Mrv,
    MrvCommands,
    Mss,
    Unknown,
    VxWorks,
    Vyos,
}

impl VendorDialect {
    pub const ALL: [VendorDialect; 27] = [
        VendorDialect::AlcatelAos,
        VendorDialect::Arista,
        VendorDialect::ArubaOs,
        VendorDialect::Aws,
        VendorDialect::BladeNetwork,
        VendorDialect::Cadant,
        VendorDialect::CiscoAsa,
        VendorDialect::CiscoIos,
        VendorDialect::CiscoIosXr,
        VendorDialect::CiscoNx,
        VendorDialect::Empty,
        VendorDialect::F5,
        VendorDialect::FlatJuniper,
        VendorDialect::FlatVyos,
        VendorDialect::Force10,
        VendorDialect::Foundry,
        VendorDialect::Host,
        VendorDialect::Ignored,
        VendorDialect::Iptables,
        VendorDialect::Juniper,
        VendorDialect::JuniperSwitch,
        VendorDialect::Mrv,
        VendorDialect::MrvCommands,
        VendorDialect::Mss,
        VendorDialect::Unknown,
        VendorDialect::VxWorks,
        VendorDialect::Vyos,
    ];
}

impl Display for VendorDialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Routing protocol kinds, including the sub-types route selection must
/// distinguish (OSPF intra/inter-area and externals, IS-IS levels and
/// externals). Several kinds are retained for completeness without a
/// defined administrative distance anywhere; looking them up yields
/// [`Error::UnsupportedCombination`].
#[derive(
    Debug, Copy, Clone, Eq, Hash, PartialEq, Ord, PartialOrd,
)]
pub enum RoutingProtocolKind {
    Aggregate,
    Bgp,
    Connected,
    Egp,
    Eigrp,
    Ibgp,
    Igp,
    Isis,
    IsisEl1,
    IsisEl2,
    IsisL1,
    IsisL2,
    Ldp,
    Lisp,
    Local,
    Msdp,
    Ospf,
    OspfE1,
    OspfE2,
    OspfIa,
    Ospf3,
    Rip,
    Rsvp,
    Static,
}

impl RoutingProtocolKind {
    pub const ALL: [RoutingProtocolKind; 24] = [
        RoutingProtocolKind::Aggregate,
        RoutingProtocolKind::Bgp,
        RoutingProtocolKind::Connected,
        RoutingProtocolKind::Egp,
        RoutingProtocolKind::Eigrp,
        RoutingProtocolKind::Ibgp,
        RoutingProtocolKind::Igp,
        RoutingProtocolKind::Isis,
        RoutingProtocolKind::IsisEl1,
        RoutingProtocolKind::IsisEl2,
        RoutingProtocolKind::IsisL1,
        RoutingProtocolKind::IsisL2,
        RoutingProtocolKind::Ldp,
        RoutingProtocolKind::Lisp,
        RoutingProtocolKind::Local,
        RoutingProtocolKind::Msdp,
        RoutingProtocolKind::Ospf,
        RoutingProtocolKind::OspfE1,
        RoutingProtocolKind::OspfE2,
        RoutingProtocolKind::OspfIa,
        RoutingProtocolKind::Ospf3,
        RoutingProtocolKind::Rip,
        RoutingProtocolKind::Rsvp,
        RoutingProtocolKind::Static,
    ];

    /// The canonical textual name, used for external (de)serialization.
    pub fn name(&self) -> &'static str {
        match self {
            RoutingProtocolKind::Aggregate => "aggregate",
            RoutingProtocolKind::Bgp => "bgp",
            RoutingProtocolKind::Connected => "connected",
            RoutingProtocolKind::Egp => "egp",
            RoutingProtocolKind::Eigrp => "eigrp",
            RoutingProtocolKind::Ibgp => "ibgp",
            RoutingProtocolKind::Igp => "igp",
            RoutingProtocolKind::Isis => "isis",
            RoutingProtocolKind::IsisEl1 => "isisEL1",
            RoutingProtocolKind::IsisEl2 => "isisEL2",
            RoutingProtocolKind::IsisL1 => "isisL1",
            RoutingProtocolKind::IsisL2 => "isisL2",
            RoutingProtocolKind::Ldp => "ldp",
            RoutingProtocolKind::Lisp => "lisp",
            RoutingProtocolKind::Local => "local",
            RoutingProtocolKind::Msdp => "msdp",
            RoutingProtocolKind::Ospf => "ospf",
            RoutingProtocolKind::OspfE1 => "ospfE1",
            RoutingProtocolKind::OspfE2 => "ospfE2",
            RoutingProtocolKind::OspfIa => "ospfIA",
            RoutingProtocolKind::Ospf3 => "ospf3",
            RoutingProtocolKind::Rip => "rip",
            RoutingProtocolKind::Rsvp => "rsvp",
            RoutingProtocolKind::Static => "static",
        }
    }

    /// Case-insensitive lookup by protocol name, the total inverse of
    /// [`Self::name`] over the enumeration.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        NAME_MAP
            .get(name.to_lowercase().as_str())
            .copied()
            .ok_or_else(|| Error::UnknownProtocolName(name.to_string()))
    }
}

lazy_static! {
    static ref NAME_MAP: HashMap<String, RoutingProtocolKind> =
        RoutingProtocolKind::ALL
            .iter()
            .map(|p| (p.name().to_lowercase(), *p))
            .collect();
}

impl Display for RoutingProtocolKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RoutingProtocolKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

// Protocol identity crosses the process boundary as the canonical name,
// never as a variant index.
impl Serialize for RoutingProtocolKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for RoutingProtocolKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::from_name(&name).map_err(D::Error::custom)
    }
}
