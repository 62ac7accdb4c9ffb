use serde::{Deserialize, Serialize};

use crate::error::Sensitive;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypair {
    pub id: Value<String>,
    pub name: Value<String>,
    pub description: Value<String>,
    pub public_key: Value<String>,
    /// Present exactly once, on the response to the Create that generated
    /// it. Every subsequent Read preserves the prior value rather than
    /// overwriting it with null.
    pub private_key: Value<Sensitive<String>>,
    pub fingerprint: Value<String>,
}
