// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::protocol::RoutingProtocolKind;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::net::Ipv4Addr;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, Serialize, Deserialize, Eq, Hash, PartialEq)]
pub struct Prefix4 {
    pub value: Ipv4Addr,
    pub length: u8,
}

impl PartialOrd for Prefix4 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Prefix4 {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.value != other.value {
            return self.value.cmp(&other.value);
        }
        self.length.cmp(&other.length)
    }
}

impl Prefix4 {
    pub const HOST_MASK: u8 = 32;

    /// Create a new `Prefix4` from an IP address and net mask.
    /// The newly created `Prefix4` will have its host bits zeroed upon
    /// creation e.g.
    /// ```
    /// use rib::types::Prefix4;
    /// use std::net::Ipv4Addr;
    /// let p4 = Prefix4::new(Ipv4Addr::new(10, 0, 0, 10), 24);
    /// assert_eq!(p4.value, Ipv4Addr::new(10, 0, 0, 0));
    /// ```
    pub fn new(ip: Ipv4Addr, length: u8) -> Self {
        let mut new = Self { value: ip, length };
        new.unset_host_bits();
        new
    }

    /// The maximal-length prefix covering exactly `ip`.
    pub fn host(ip: Ipv4Addr) -> Self {
        Self {
            value: ip,
            length: Self::HOST_MASK,
        }
    }

    pub fn host_bits_are_unset(&self) -> bool {
        self.value.to_bits() & self.mask() == self.value.to_bits()
    }

    pub fn unset_host_bits(&mut self) {
        self.value = Ipv4Addr::from_bits(self.value.to_bits() & self.mask())
    }

    fn mask(&self) -> u32 {
        match self.length {
            0 => 0,
            n if n >= 32 => !0u32,
            n => (!0u32) << (32 - n),
        }
    }

    /// Check if this prefix is contained within another prefix.
    /// Returns true if this prefix is equal to or more specific than the
    /// other.
    pub fn within(&self, other: &Prefix4) -> bool {
        // A less specific prefix cannot be within a more specific one
        if self.length < other.length {
            return false;
        }
        self.value.to_bits() & other.mask()
            == other.value.to_bits() & other.mask()
    }

    /// Check if this prefix covers a single address.
    pub fn covers(&self, ip: Ipv4Addr) -> bool {
        Prefix4::host(ip).within(self)
    }
}

impl Display for Prefix4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.value, self.length)
    }
}

impl FromStr for Prefix4 {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (value, length) =
            s.split_once('/').ok_or("malformed prefix".to_string())?;

        let value = value
            .parse()
            .map_err(|_| "malformed ip addr".to_string())?;
        let length: u8 = length
            .parse()
            .map_err(|_| "malformed length".to_string())?;
        if length > Self::HOST_MASK {
            return Err("prefix length out of range".to_string());
        }
        Ok(Self::new(value, length))
    }
}

/// A route tag used by policy to group and filter routes across
/// administrative boundaries. Rendered as `high16:low16`, the form
/// community regular expressions match against.
#[derive(
    Debug, Copy, Clone, Serialize, Deserialize, Eq, Hash, PartialEq, Ord, PartialOrd,
)]
pub struct Community(pub u32);

impl Community {
    pub fn from_parts(high: u16, low: u16) -> Self {
        Self(((high as u32) << 16) | low as u32)
    }

    pub fn high(&self) -> u16 {
        (self.0 >> 16) as u16
    }

    pub fn low(&self) -> u16 {
        (self.0 & 0xffff) as u16
    }
}

impl Display for Community {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.high(), self.low())
    }
}

impl FromStr for Community {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (high, low) =
            s.split_once(':').ok_or("malformed community".to_string())?;
        Ok(Self::from_parts(
            high.parse()
                .map_err(|_| "malformed community high half".to_string())?,
            low.parse()
                .map_err(|_| "malformed community low half".to_string())?,
        ))
    }
}

/// BGP origin codes, carried through policy evaluation untouched.
#[derive(
    Debug, Copy, Clone, Serialize, Deserialize, Eq, Hash, PartialEq, Ord, PartialOrd,
)]
pub enum Origin {
    Igp,
    Egp,
    Incomplete,
}

/// A candidate route as consumed and produced by policy evaluation and
/// ranking. Routes are value objects: a policy produces a new `Route`,
/// never mutates its input in place.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Route {
    pub net: Prefix4,
    pub nexthop: Ipv4Addr,
    pub protocol: RoutingProtocolKind,
    pub metric: u32,
    pub tag: u64,
    /// Ordered sequence of AS-set elements.
    pub as_path: Vec<BTreeSet<u32>>,
    /// Duplicate-free, first-appearance order preserved.
    pub communities: Vec<Community>,
    pub origin: Origin,
}

impl Route {
    pub fn new(
        net: Prefix4,
        nexthop: Ipv4Addr,
        protocol: RoutingProtocolKind,
    ) -> Self {
        Self {
            net,
            nexthop,
            protocol,
            metric: 0,
            tag: 0,
            as_path: Vec::new(),
            communities: Vec::new(),
            origin: Origin::Incomplete,
        }
    }

    pub fn has_community(&self, c: Community) -> bool {
        self.communities.contains(&c)
    }

    /// Append a community unless already present, keeping first-appearance
    /// order.
    pub fn add_community(&mut self, c: Community) {
        if !self.communities.contains(&c) {
            self.communities.push(c);
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[net={}, nexthop={}, protocol={}, metric={}]",
            self.net, self.nexthop, self.protocol, self.metric
        )
    }
}
