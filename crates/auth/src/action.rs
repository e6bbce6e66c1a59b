use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Action an actor wants to perform on an entity (e.g. `"own"`, `"update"`).
///
/// Actions are opaque strings at this layer; policies decide which ones they
/// understand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(Cow<'static, str>);

impl Action {
    /// Ownership check used by the address, order and installment policies.
    pub const OWN: Action = Action(Cow::Borrowed("own"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Action {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}
