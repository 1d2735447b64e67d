use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identity of an authenticated customer.
///
/// Accounts live with the identity collaborator; the core never looks a customer up, it
/// only receives the id of the caller that was already authenticated upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(pub u32);

impl Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "customer_{}", self.0)
    }
}
