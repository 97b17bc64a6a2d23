// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Administrative distance tables.
//!
//! Administrative distance is not a formula. Each value below is drawn
//! from the corresponding vendor's documentation, so the tables are data
//! built once at first use, never control flow. A missing cell means the
//! protocol is unsupported on that vendor and lookups fail with
//! [`Error::UnsupportedCombination`], which callers are expected to
//! handle by excluding the protocol from consideration on that device.

use crate::error::Error;
use crate::protocol::{RoutingProtocolKind, VendorDialect};
use lazy_static::lazy_static;
use std::collections::HashMap;

pub type DistanceTable = HashMap<(RoutingProtocolKind, VendorDialect), u8>;

/// Vendors sharing the classic Cisco distance values.
const CISCO_FAMILY: [VendorDialect; 6] = [
    VendorDialect::CiscoAsa,
    VendorDialect::CiscoIos,
    VendorDialect::CiscoIosXr,
    VendorDialect::CiscoNx,
    VendorDialect::Force10,
    VendorDialect::Foundry,
];

const JUNIPER_FAMILY: [VendorDialect; 3] = [
    VendorDialect::FlatJuniper,
    VendorDialect::Juniper,
    VendorDialect::JuniperSwitch,
];

const VYOS_FAMILY: [VendorDialect; 2] =
    [VendorDialect::FlatVyos, VendorDialect::Vyos];

fn row(
    table: &mut DistanceTable,
    protocol: RoutingProtocolKind,
    vendors: &[VendorDialect],
    cost: u8,
) {
    for vendor in vendors {
        table.insert((protocol, *vendor), cost);
    }
}

fn build_default_table() -> DistanceTable {
    use crate::protocol::RoutingProtocolKind::*;
    use crate::protocol::VendorDialect::*;

    let mut t = DistanceTable::new();

    // Directly connected and static routes have the same distance
    // everywhere, placeholder dialects included.
    row(&mut t, Connected, &VendorDialect::ALL, 0);
    row(&mut t, Static, &VendorDialect::ALL, 1);

    // eBGP. Aruba controllers do not support BGP.
    row(&mut t, Bgp, &[Arista], 200);
    row(&mut t, Bgp, &[Aws, Cadant], 20);
    row(&mut t, Bgp, &CISCO_FAMILY, 20);
    row(&mut t, Bgp, &JUNIPER_FAMILY, 170);
    row(&mut t, Bgp, &VYOS_FAMILY, 20);

    // iBGP. Cadant ranks it alongside eBGP.
    row(&mut t, Ibgp, &[Arista, Aws], 200);
    row(&mut t, Ibgp, &[Cadant], 20);
    row(&mut t, Ibgp, &CISCO_FAMILY, 200);
    row(&mut t, Ibgp, &JUNIPER_FAMILY, 170);
    row(&mut t, Ibgp, &VYOS_FAMILY, 200);

    // IS-IS levels and externals. Cadant increments per level/external,
    // Juniper uses its own scale.
    row(&mut t, IsisL1, &[Arista, ArubaOs, Aws, Cadant], 115);
    row(&mut t, IsisL1, &CISCO_FAMILY, 115);
    row(&mut t, IsisL1, &JUNIPER_FAMILY, 15);
    row(&mut t, IsisL1, &VYOS_FAMILY, 115);

    row(&mut t, IsisL2, &[Arista, ArubaOs, Aws], 115);
    row(&mut t, IsisL2, &[Cadant], 116);
    row(&mut t, IsisL2, &CISCO_FAMILY, 115);
    row(&mut t, IsisL2, &JUNIPER_FAMILY, 18);
    row(&mut t, IsisL2, &VYOS_FAMILY, 115);

    row(&mut t, IsisEl1, &[Arista, ArubaOs, Aws], 115);
    row(&mut t, IsisEl1, &[Cadant], 117);
    row(&mut t, IsisEl1, &CISCO_FAMILY, 115);
    row(&mut t, IsisEl1, &JUNIPER_FAMILY, 160);
    row(&mut t, IsisEl1, &VYOS_FAMILY, 115);

    row(&mut t, IsisEl2, &[Arista, ArubaOs, Aws], 115);
    row(&mut t, IsisEl2, &[Cadant], 118);
    row(&mut t, IsisEl2, &CISCO_FAMILY, 115);
    row(&mut t, IsisEl2, &JUNIPER_FAMILY, 165);
    row(&mut t, IsisEl2, &VYOS_FAMILY, 115);

    // OSPF intra-area, inter-area and externals.
    row(&mut t, Ospf, &[Arista, ArubaOs, Aws, Cadant], 110);
    row(&mut t, Ospf, &CISCO_FAMILY, 110);
    row(&mut t, Ospf, &JUNIPER_FAMILY, 10);
    row(&mut t, Ospf, &VYOS_FAMILY, 110);

    row(&mut t, OspfIa, &[Arista, ArubaOs, Aws], 110);
    row(&mut t, OspfIa, &[Cadant], 111);
    row(&mut t, OspfIa, &CISCO_FAMILY, 110);
    row(&mut t, OspfIa, &JUNIPER_FAMILY, 10);
    row(&mut t, OspfIa, &VYOS_FAMILY, 110);

    row(&mut t, OspfE1, &[Arista, ArubaOs, Aws], 110);
    row(&mut t, OspfE1, &[Cadant], 112);
    row(&mut t, OspfE1, &CISCO_FAMILY, 110);
    row(&mut t, OspfE1, &JUNIPER_FAMILY, 150);
    row(&mut t, OspfE1, &VYOS_FAMILY, 110);

    row(&mut t, OspfE2, &[Arista, ArubaOs, Aws], 110);
    row(&mut t, OspfE2, &[Cadant], 113);
    row(&mut t, OspfE2, &CISCO_FAMILY, 110);
    row(&mut t, OspfE2, &JUNIPER_FAMILY, 150);
    row(&mut t, OspfE2, &VYOS_FAMILY, 110);

    row(&mut t, Rip, &[Arista, ArubaOs, Aws, Cadant], 120);
    row(&mut t, Rip, &CISCO_FAMILY, 120);
    row(&mut t, Rip, &JUNIPER_FAMILY, 100);
    row(&mut t, Rip, &VYOS_FAMILY, 120);

    // Aggregate, egp, eigrp, igp, isis (without a level), ldp, lisp,
    // local, msdp, ospf3, rsvp have no documented distance on any vendor.

    t
}

/// Distances used only for inter-area summary routes. Currently the only
/// protocol with a documented summary distance is OSPF inter-area.
fn build_summary_table() -> DistanceTable {
    use crate::protocol::RoutingProtocolKind::*;
    use crate::protocol::VendorDialect::*;

    let mut t = DistanceTable::new();

    row(&mut t, OspfIa, &[Arista, ArubaOs, Cadant], 254);
    row(&mut t, OspfIa, &CISCO_FAMILY, 254);
    row(&mut t, OspfIa, &JUNIPER_FAMILY, 10);

    t
}

lazy_static! {
    static ref DEFAULT_DISTANCE: DistanceTable = build_default_table();
    static ref SUMMARY_DISTANCE: DistanceTable = build_summary_table();
}

/// The default administrative distance of `protocol` on `vendor`. Lower
/// wins when ranking candidate routes for the same destination.
pub fn default_admin_distance(
    protocol: RoutingProtocolKind,
    vendor: VendorDialect,
) -> Result<u8, Error> {
    DEFAULT_DISTANCE
        .get(&(protocol, vendor))
        .copied()
        .ok_or(Error::UnsupportedCombination { protocol, vendor })
}

/// The administrative distance applied to inter-area/summary routes,
/// distinct from (and typically higher than) the default distance.
pub fn summary_admin_distance(
    protocol: RoutingProtocolKind,
    vendor: VendorDialect,
) -> Result<u8, Error> {
    SUMMARY_DISTANCE
        .get(&(protocol, vendor))
        .copied()
        .ok_or(Error::UnsupportedCombination { protocol, vendor })
}
