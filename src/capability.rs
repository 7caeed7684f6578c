//! Capability payloads the harness asks the invocation layer to sign.
//!
//! These are the plain `{can, with, nb}` values; encoding them into a signed
//! invocation is the external layer's job.

use crate::domain::DidMailto;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A single capability: an ability on a resource, with caveats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capability {
    /// Ability, e.g. `space/info`
    pub can: String,

    /// Resource the ability applies to, usually a DID
    pub with: String,

    /// Caveats
    #[serde(default)]
    pub nb: Map<String, Value>,
}

impl Capability {
    pub fn new(can: impl Into<String>, with: impl Into<String>) -> Self {
        Self {
            can: can.into(),
            with: with.into(),
            nb: Map::new(),
        }
    }

    /// Add a caveat.
    pub fn with_caveat(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.nb.insert(key.into(), value.into());
        self
    }

    /// `space/info` on a space.
    pub fn space_info(space: impl Into<String>) -> Self {
        Self::new("space/info", space)
    }

    /// `store/list` on a space.
    pub fn store_list(space: impl Into<String>) -> Self {
        Self::new("store/list", space)
    }

    /// `access/claim` by an agent.
    pub fn access_claim(agent: impl Into<String>) -> Self {
        Self::new("access/claim", agent)
    }

    /// `access/authorize`: an agent asks to act as the account behind an
    /// email address.
    pub fn access_authorize(agent: impl Into<String>, account: &DidMailto) -> Self {
        Self::new("access/authorize", agent).with_caveat("as", account.to_did())
    }

    /// `access/delegate` carrying delegations keyed by name.
    pub fn access_delegate(agent: impl Into<String>, delegations: Map<String, Value>) -> Self {
        Self::new("access/delegate", agent).with_caveat("delegations", Value::Object(delegations))
    }

    pub fn to_json(&self) -> Value {
        json!({
            "can": self.can,
            "with": self.with,
            "nb": self.nb,
        })
    }
}
