// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Prefix resolution index.
//!
//! A binary trie over address bits tracking which prefixes are currently
//! announced and which next-hop addresses are in use, so the dataplane
//! loop can find the recursive routes whose resolution must be
//! re-evaluated after a prefix is installed or withdrawn. One computation
//! session owns one trie; it is discarded at session end.
//!
//! Each occupied node carries a pair of marks: "announced network" and
//! "next-hop host route". The same prefix may carry both. Inserts and
//! removals descend by bit path only, so their cost is bounded by the
//! address width rather than the number of stored entries, and removal
//! prunes empty nodes so a round-tripped trie is structurally identical
//! to one that never held the entry.

use crate::error::Error;
use crate::types::Prefix4;
use std::collections::BTreeSet;
use std::net::Ipv4Addr;

#[derive(Debug, Default)]
struct Node {
    children: [Option<Box<Node>>; 2],
    announced: bool,
    nexthop: bool,
}

impl Node {
    fn is_empty(&self) -> bool {
        !self.announced
            && !self.nexthop
            && self.children[0].is_none()
            && self.children[1].is_none()
    }
}

/// Bit `depth` of `addr`, most significant first.
fn bit(addr: u32, depth: u8) -> usize {
    ((addr >> (31 - depth)) & 1) as usize
}

#[derive(Debug, Default)]
pub struct ResolutionTrie {
    root: Node,
}

impl ResolutionTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `prefix` as an announced network. Re-adding an already
    /// announced prefix is a no-op.
    pub fn add_prefix(&mut self, prefix: Prefix4) -> Result<(), Error> {
        let prefix = checked(prefix)?;
        self.node_mut(prefix).announced = true;
        Ok(())
    }

    /// Unmark `prefix` as an announced network. Removing a prefix that is
    /// not currently announced is a no-op.
    pub fn remove_prefix(&mut self, prefix: Prefix4) -> Result<(), Error> {
        let prefix = checked(prefix)?;
        Self::unmark(&mut self.root, prefix, 0, false);
        Ok(())
    }

    /// Mark the host route for `ip` as an in-use next-hop.
    pub fn add_next_hop(&mut self, ip: Ipv4Addr) {
        // A host prefix is always well formed.
        self.node_mut(Prefix4::host(ip)).nexthop = true;
    }

    /// Unmark the host route for `ip`. Idempotent.
    pub fn remove_next_hop(&mut self, ip: Ipv4Addr) {
        Self::unmark(&mut self.root, Prefix4::host(ip), 0, true);
    }

    pub fn contains_prefix(&self, prefix: Prefix4) -> bool {
        checked(prefix)
            .ok()
            .and_then(|p| self.find(p))
            .map(|n| n.announced)
            .unwrap_or(false)
    }

    pub fn contains_next_hop(&self, ip: Ipv4Addr) -> bool {
        self.find(Prefix4::host(ip))
            .map(|n| n.nexthop)
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// The set of tracked next-hop addresses whose resolution may have
    /// changed because the announcement state of `changed` just changed:
    /// every next-hop covered by `changed` whose most specific
    /// currently-announced covering prefix is no more specific than
    /// `changed` itself. Next-hops shadowed by a more specific announced
    /// prefix are untouched by the change and excluded.
    pub fn affected_next_hops(
        &self,
        changed: Prefix4,
    ) -> Result<BTreeSet<Ipv4Addr>, Error> {
        let changed = checked(changed)?;
        let mut affected = BTreeSet::new();

        // Any covered next-hop lives in the subtree under `changed`'s bit
        // path. If the path is absent there is nothing to revalidate.
        let Some(node) = self.find(changed) else {
            return Ok(affected);
        };

        Self::collect(node, changed.value.to_bits(), changed.length, &mut affected);
        Ok(affected)
    }

    fn collect(
        node: &Node,
        path: u32,
        depth: u8,
        out: &mut BTreeSet<Ipv4Addr>,
    ) {
        if node.nexthop {
            // Next-hop marks only exist at host depth.
            out.insert(Ipv4Addr::from_bits(path));
        }
        for (i, child) in node.children.iter().enumerate() {
            let Some(child) = child else { continue };
            // A deeper announced prefix is a more specific longest match
            // for everything under it. Its next-hops are not affected.
            if child.announced {
                continue;
            }
            let path = path | ((i as u32) << (31 - depth));
            Self::collect(child, path, depth + 1, out);
        }
    }

    fn node_mut(&mut self, prefix: Prefix4) -> &mut Node {
        let addr = prefix.value.to_bits();
        let mut node = &mut self.root;
        for depth in 0..prefix.length {
            node = node.children[bit(addr, depth)]
                .get_or_insert_with(Box::default);
        }
        node
    }

    fn find(&self, prefix: Prefix4) -> Option<&Node> {
        let addr = prefix.value.to_bits();
        let mut node = &self.root;
        for depth in 0..prefix.length {
            node = node.children[bit(addr, depth)].as_deref()?;
        }
        Some(node)
    }

    /// Clear one mark along `prefix`'s bit path, pruning nodes emptied by
    /// the removal on the way back up. Returns whether the visited node
    /// became empty.
    fn unmark(node: &mut Node, prefix: Prefix4, depth: u8, nexthop: bool) -> bool {
        if depth == prefix.length {
            if nexthop {
                node.nexthop = false;
            } else {
                node.announced = false;
            }
            return node.is_empty();
        }
        let slot = bit(prefix.value.to_bits(), depth);
        if let Some(child) = node.children[slot].as_deref_mut() {
            if Self::unmark(child, prefix, depth + 1, nexthop) {
                node.children[slot] = None;
            }
        }
        node.is_empty()
    }
}

fn checked(prefix: Prefix4) -> Result<Prefix4, Error> {
    if prefix.length > Prefix4::HOST_MASK {
        return Err(Error::InvalidPrefix(prefix.to_string()));
    }
    // Tolerate non-canonical inputs rather than descending garbage bits.
    Ok(Prefix4::new(prefix.value, prefix.length))
}

#[cfg(test)]
mod test {
    use super::*;

    fn ip(s: &str) -> Ipv4Addr {
        s.parse().unwrap()
    }

    fn pfx(s: &str) -> Prefix4 {
        s.parse().unwrap()
    }

    #[test]
    fn add_remove_round_trip() {
        let mut trie = ResolutionTrie::new();
        assert!(trie.is_empty());

        trie.add_prefix(pfx("10.0.0.0/8")).unwrap();
        assert!(trie.contains_prefix(pfx("10.0.0.0/8")));

        // Duplicate insert is idempotent.
        trie.add_prefix(pfx("10.0.0.0/8")).unwrap();

        trie.remove_prefix(pfx("10.0.0.0/8")).unwrap();
        assert!(!trie.contains_prefix(pfx("10.0.0.0/8")));
        assert!(trie.is_empty());

        // Removing an absent prefix is a no-op.
        trie.remove_prefix(pfx("10.0.0.0/8")).unwrap();
        assert!(trie.is_empty());
    }

    #[test]
    fn prefix_and_next_hop_marks_are_independent() {
        let mut trie = ResolutionTrie::new();
        let nh = ip("10.0.0.1");

        trie.add_next_hop(nh);
        trie.add_prefix(Prefix4::host(nh)).unwrap();
        assert!(trie.contains_next_hop(nh));
        assert!(trie.contains_prefix(Prefix4::host(nh)));

        trie.remove_prefix(Prefix4::host(nh)).unwrap();
        assert!(trie.contains_next_hop(nh));
        assert!(!trie.contains_prefix(Prefix4::host(nh)));

        trie.remove_next_hop(nh);
        assert!(trie.is_empty());
    }

    #[test]
    fn affected_respects_longest_match() {
        let mut trie = ResolutionTrie::new();
        trie.add_prefix(pfx("10.0.0.0/8")).unwrap();
        trie.add_prefix(pfx("10.0.0.0/24")).unwrap();
        trie.add_next_hop(ip("10.0.0.1"));
        trie.add_next_hop(ip("10.1.0.1"));

        // 10.0.0.1 resolves through the /24, 10.1.0.1 through the /8.
        assert_eq!(
            trie.affected_next_hops(pfx("10.0.0.0/24")).unwrap(),
            BTreeSet::from([ip("10.0.0.1")])
        );
        assert_eq!(
            trie.affected_next_hops(pfx("10.0.0.0/8")).unwrap(),
            BTreeSet::from([ip("10.1.0.1")])
        );

        // Withdraw the /24: both next-hops now depend on the /8.
        trie.remove_prefix(pfx("10.0.0.0/24")).unwrap();
        assert_eq!(
            trie.affected_next_hops(pfx("10.0.0.0/8")).unwrap(),
            BTreeSet::from([ip("10.0.0.1"), ip("10.1.0.1")])
        );
        // The withdrawn /24 still covers 10.0.0.1, whose longest match is
        // now the less specific /8.
        assert_eq!(
            trie.affected_next_hops(pfx("10.0.0.0/24")).unwrap(),
            BTreeSet::from([ip("10.0.0.1")])
        );
    }

    #[test]
    fn affected_excludes_shadowed_next_hops() {
        let mut trie = ResolutionTrie::new();
        trie.add_prefix(pfx("10.0.0.0/8")).unwrap();
        trie.add_prefix(pfx("10.2.0.0/16")).unwrap();
        trie.add_next_hop(ip("10.2.3.4"));
        trie.add_next_hop(ip("10.9.9.9"));

        // 10.2.3.4 is shadowed by the /16 and never reported against the
        // /8, no matter how many times it is queried.
        for _ in 0..2 {
            assert_eq!(
                trie.affected_next_hops(pfx("10.0.0.0/8")).unwrap(),
                BTreeSet::from([ip("10.9.9.9")])
            );
        }

        // A next-hop whose host route is itself announced resolves via
        // that /32, not the covering prefix.
        trie.add_prefix(Prefix4::host(ip("10.9.9.9"))).unwrap();
        assert_eq!(
            trie.affected_next_hops(pfx("10.0.0.0/8")).unwrap(),
            BTreeSet::new()
        );
        assert_eq!(
            trie.affected_next_hops(Prefix4::host(ip("10.9.9.9"))).unwrap(),
            BTreeSet::from([ip("10.9.9.9")])
        );
    }

    #[test]
    fn interleaved_churn_stays_consistent() {
        let mut trie = ResolutionTrie::new();
        trie.add_prefix(pfx("192.0.2.0/24")).unwrap();
        trie.add_next_hop(ip("192.0.2.7"));
        trie.add_prefix(pfx("192.0.2.0/28")).unwrap();
        trie.add_next_hop(ip("192.0.2.200"));
        trie.remove_prefix(pfx("192.0.2.0/28")).unwrap();
        trie.remove_next_hop(ip("192.0.2.200"));

        assert_eq!(
            trie.affected_next_hops(pfx("192.0.2.0/24")).unwrap(),
            BTreeSet::from([ip("192.0.2.7")])
        );

        trie.remove_prefix(pfx("192.0.2.0/24")).unwrap();
        trie.remove_next_hop(ip("192.0.2.7"));
        assert!(trie.is_empty());
    }

    #[test]
    fn malformed_prefix_is_rejected() {
        let mut trie = ResolutionTrie::new();
        let bad = Prefix4 {
            value: ip("10.0.0.0"),
            length: 33,
        };
        assert!(matches!(
            trie.add_prefix(bad),
            Err(Error::InvalidPrefix(_))
        ));
        assert!(matches!(
            trie.remove_prefix(bad),
            Err(Error::InvalidPrefix(_))
        ));
        assert!(matches!(
            trie.affected_next_hops(bad),
            Err(Error::InvalidPrefix(_))
        ));
        assert!(trie.is_empty());

        // Membership queries must not descend past host depth either,
        // even when the bit path is occupied down to a host route.
        trie.add_next_hop(ip("10.0.0.0"));
        assert!(!trie.contains_prefix(bad));
    }
}
