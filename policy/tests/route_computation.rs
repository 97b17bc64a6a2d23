// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end route computation: policy evaluation feeding ranking and
//! the resolution index, the way the dataplane iteration loop drives the
//! core for one element.

use policy::{
    CommunityMatch, MetricOp, PolicyRegistry, PolicyResult, RoutePolicy,
    Statement,
};
use rib::bestpath::rank_routes;
use rib::{
    Community, Prefix4, ResolutionTrie, Route, RoutingProtocolKind,
    VendorDialect,
};
use routesim_common::log::init_logger;
use std::collections::BTreeSet;
use std::net::Ipv4Addr;

fn candidate(
    protocol: RoutingProtocolKind,
    nexthop: &str,
    metric: u32,
) -> Route {
    let mut r = Route::new(
        "198.51.100.0/24".parse::<Prefix4>().unwrap(),
        nexthop.parse::<Ipv4Addr>().unwrap(),
        protocol,
    );
    r.metric = metric;
    r
}

#[test]
fn policy_then_ranking_then_resolution() {
    let log = init_logger();

    // One import policy: strip provider-internal communities, dampen the
    // metric, permit.
    let mut registry = PolicyRegistry::new(log.clone());
    registry.define_community_list(
        "provider-internal",
        vec![CommunityMatch::Regex("^64512:".into())],
    );
    registry.define_policy(RoutePolicy {
        name: "import".into(),
        statements: vec![
            Statement::DeleteCommunities(CommunityMatch::List(
                "provider-internal".into(),
            )),
            Statement::SetMetric(MetricOp::Add(10)),
            Statement::Permit,
        ],
    });

    let mut bgp = candidate(RoutingProtocolKind::Bgp, "203.0.113.1", 5);
    bgp.add_community("64512:1".parse::<Community>().unwrap());
    bgp.add_community("64500:7".parse::<Community>().unwrap());
    let ospf = candidate(RoutingProtocolKind::Ospf, "203.0.113.2", 20);

    // Policy pass over each learned candidate.
    let mut accepted = Vec::new();
    for route in [&bgp, &ospf] {
        match registry.evaluate("import", route).unwrap() {
            PolicyResult::Permit(transformed) => accepted.push(transformed),
            PolicyResult::Deny => {}
        }
    }
    assert_eq!(accepted.len(), 2);
    assert_eq!(
        accepted[0].communities,
        vec!["64500:7".parse::<Community>().unwrap()]
    );
    assert_eq!(accepted[0].metric, 15);

    // Rank on a Cisco-style device: eBGP distance 20 beats OSPF 110.
    let ranked = rank_routes(VendorDialect::CiscoIos, accepted, &log);
    assert!(ranked.unranked.is_empty());
    let best = ranked.best().unwrap().clone();
    assert_eq!(best.protocol, RoutingProtocolKind::Bgp);

    // Install the winner and note its next-hop; a later withdrawal of the
    // covering prefix must flag that next-hop for re-resolution.
    let mut trie = ResolutionTrie::new();
    let covering: Prefix4 = "203.0.113.0/24".parse().unwrap();
    trie.add_prefix(best.net).unwrap();
    trie.add_prefix(covering).unwrap();
    trie.add_next_hop(best.nexthop);

    trie.remove_prefix(covering).unwrap();
    assert_eq!(
        trie.affected_next_hops(covering).unwrap(),
        BTreeSet::from([best.nexthop])
    );
}

#[test]
fn unsupported_protocol_is_surfaced_not_ranked() {
    let log = init_logger();

    // The same candidates on an Aruba controller: no BGP support, so the
    // BGP route must fall out of ranking with its error attached while
    // OSPF still wins.
    let bgp = candidate(RoutingProtocolKind::Bgp, "203.0.113.1", 5);
    let ospf = candidate(RoutingProtocolKind::Ospf, "203.0.113.2", 20);

    let ranked =
        rank_routes(VendorDialect::ArubaOs, vec![bgp.clone(), ospf], &log);
    assert_eq!(ranked.ordered.len(), 1);
    assert_eq!(
        ranked.best().unwrap().protocol,
        RoutingProtocolKind::Ospf
    );
    assert_eq!(ranked.unranked.len(), 1);
    assert_eq!(ranked.unranked[0].0, bgp);
}
