// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("no policy defined with name '{0}'")]
    UndefinedPolicy(String),

    #[error("no community list defined with name '{0}'")]
    UndefinedCommunityList(String),

    #[error("invalid community regex '{0}': {1}")]
    InvalidRegex(String, regex::Error),
}
