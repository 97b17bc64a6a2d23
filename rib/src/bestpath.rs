// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Candidate route ranking.
//!
//! Orders candidate routes for the same destination prefix by
//! administrative distance first, then metric, then any caller-supplied
//! comparators, with the next-hop address as the final key so equal
//! priority routes with different next hops always rank in a total,
//! deterministic order.
//!
//! Routes whose (protocol, vendor) pair has no defined administrative
//! distance cannot participate in ranking. They are split out and
//! returned alongside the ranked set rather than silently dropped, so the
//! caller can surface them per element.

use crate::distance::default_admin_distance;
use crate::error::Error;
use crate::protocol::VendorDialect;
use crate::types::Route;
use itertools::{Either, Itertools};
use slog::{debug, Logger};
use std::cmp::Ordering;

/// Comparator applied between distance/metric and the final next-hop
/// tie-break.
pub type RouteComparator<'a> = &'a dyn Fn(&Route, &Route) -> Ordering;

#[derive(Debug)]
pub struct RankedRoutes {
    /// Best first.
    pub ordered: Vec<Route>,
    /// Routes excluded from ranking, each with the distance lookup error
    /// that excluded it.
    pub unranked: Vec<(Route, Error)>,
}

impl RankedRoutes {
    pub fn best(&self) -> Option<&Route> {
        self.ordered.first()
    }
}

/// Rank `candidates` for a single destination on a device speaking
/// `vendor`'s dialect.
pub fn rank_routes(
    vendor: VendorDialect,
    candidates: Vec<Route>,
    log: &Logger,
) -> RankedRoutes {
    rank_routes_with(vendor, candidates, &[], log)
}

/// As [`rank_routes`], with protocol-specific comparators supplied by the
/// caller. Comparators apply in order after administrative distance and
/// metric; the next-hop address still breaks any remaining tie.
pub fn rank_routes_with(
    vendor: VendorDialect,
    candidates: Vec<Route>,
    comparators: &[RouteComparator<'_>],
    log: &Logger,
) -> RankedRoutes {
    let (mut ranked, unranked): (Vec<(u8, Route)>, Vec<(Route, Error)>) =
        candidates.into_iter().partition_map(|route| {
            match default_admin_distance(route.protocol, vendor) {
                Ok(distance) => Either::Left((distance, route)),
                Err(e) => Either::Right((route, e)),
            }
        });

    for (route, e) in &unranked {
        debug!(log, "route excluded from ranking: {e}";
            "route" => %route, "vendor" => %vendor);
    }

    ranked.sort_by(|(da, a), (db, b)| {
        da.cmp(db)
            .then_with(|| a.metric.cmp(&b.metric))
            .then_with(|| {
                comparators
                    .iter()
                    .map(|cmp| cmp(a, b))
                    .find(|o| *o != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.nexthop.cmp(&b.nexthop))
    });

    RankedRoutes {
        ordered: ranked.into_iter().map(|(_, route)| route).collect(),
        unranked,
    }
}
