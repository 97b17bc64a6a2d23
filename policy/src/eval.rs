// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::Error;
use crate::statement::{
    CommunityMatch, Disposition, MetricOp, RoutePolicy, Statement,
};
use regex::Regex;
use rib::types::{Community, Route};
use slog::{debug, Logger};
use std::collections::HashMap;

/// The outcome of evaluating a policy against a route.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PolicyResult {
    /// The route as transformed by the policy's set statements.
    Permit(Route),
    Deny,
}

/// Named policies and community lists for one element's computation
/// session. Definitions are registered up front by the configuration
/// conversion stage and are immutable during evaluation.
pub struct PolicyRegistry {
    policies: HashMap<String, RoutePolicy>,
    community_lists: HashMap<String, Vec<CommunityMatch>>,
    log: Logger,
}

impl PolicyRegistry {
    pub fn new(log: Logger) -> Self {
        Self {
            policies: HashMap::new(),
            community_lists: HashMap::new(),
            log,
        }
    }

    pub fn define_policy(&mut self, policy: RoutePolicy) {
        self.policies.insert(policy.name.clone(), policy);
    }

    pub fn define_community_list(
        &mut self,
        name: impl Into<String>,
        entries: Vec<CommunityMatch>,
    ) {
        self.community_lists.insert(name.into(), entries);
    }

    /// Evaluate the named policy against `route`, producing a new route
    /// value or a deny decision. The input route is never mutated.
    pub fn evaluate(
        &self,
        name: &str,
        route: &Route,
    ) -> Result<PolicyResult, Error> {
        let policy = self
            .policies
            .get(name)
            .ok_or_else(|| Error::UndefinedPolicy(name.to_string()))?;

        let mut candidate = route.clone();
        let disposition =
            self.eval_statements(&policy.statements, &mut candidate)?;

        debug!(self.log, "policy evaluated";
            "policy" => %name,
            "route" => %route,
            "disposition" => ?disposition);

        // Falling off the end without an explicit permit denies.
        Ok(match disposition {
            Disposition::Permit => PolicyResult::Permit(candidate),
            Disposition::Continue | Disposition::Deny => PolicyResult::Deny,
        })
    }

    fn eval_statements(
        &self,
        statements: &[Statement],
        candidate: &mut Route,
    ) -> Result<Disposition, Error> {
        for statement in statements {
            match self.apply(statement, candidate)? {
                Disposition::Continue => continue,
                terminal => return Ok(terminal),
            }
        }
        Ok(Disposition::Continue)
    }

    fn apply(
        &self,
        statement: &Statement,
        candidate: &mut Route,
    ) -> Result<Disposition, Error> {
        match statement {
            Statement::SetMetric(op) => {
                candidate.metric = match *op {
                    MetricOp::Set(v) => v,
                    MetricOp::Add(v) => candidate.metric.saturating_add(v),
                    MetricOp::Subtract(v) => {
                        candidate.metric.saturating_sub(v)
                    }
                };
            }
            Statement::SetCommunities(communities) => {
                candidate.communities.clear();
                for c in communities {
                    candidate.add_community(*c);
                }
            }
            Statement::AddCommunities(communities) => {
                for c in communities {
                    candidate.add_community(*c);
                }
            }
            Statement::DeleteCommunities(matcher) => {
                // Resolve list references and compile regexes once, then
                // sweep the community set against the compiled entries.
                let compiled = self.compile_matcher(matcher)?;
                candidate
                    .communities
                    .retain(|c| !compiled.iter().any(|m| m.matches(*c)));
            }
            Statement::Call(name) => {
                let callee = self
                    .policies
                    .get(name)
                    .ok_or_else(|| Error::UndefinedPolicy(name.clone()))?;
                match self.eval_statements(&callee.statements, candidate)? {
                    Disposition::Deny => return Ok(Disposition::Deny),
                    Disposition::Permit | Disposition::Continue => {}
                }
            }
            Statement::Continue => {}
            Statement::Permit => return Ok(Disposition::Permit),
            Statement::Deny => return Ok(Disposition::Deny),
        }
        Ok(Disposition::Continue)
    }

    /// Flatten `matcher` into compiled entries, resolving named lists and
    /// compiling each regex exactly once.
    fn compile_matcher(
        &self,
        matcher: &CommunityMatch,
    ) -> Result<Vec<CompiledMatch>, Error> {
        match matcher {
            CommunityMatch::Exact(c) => Ok(vec![CompiledMatch::Exact(*c)]),
            CommunityMatch::Regex(pattern) => {
                let re = Regex::new(pattern).map_err(|e| {
                    Error::InvalidRegex(pattern.clone(), e)
                })?;
                Ok(vec![CompiledMatch::Regex(re)])
            }
            CommunityMatch::List(name) => {
                let entries =
                    self.community_lists.get(name).ok_or_else(|| {
                        Error::UndefinedCommunityList(name.clone())
                    })?;
                let mut compiled = Vec::with_capacity(entries.len());
                for entry in entries {
                    compiled.extend(self.compile_matcher(entry)?);
                }
                Ok(compiled)
            }
        }
    }
}

enum CompiledMatch {
    Exact(Community),
    Regex(Regex),
}

impl CompiledMatch {
    fn matches(&self, community: Community) -> bool {
        match self {
            Self::Exact(c) => *c == community,
            Self::Regex(re) => re.is_match(&community.to_string()),
        }
    }
}
