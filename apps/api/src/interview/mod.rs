// Voice interview sessions. Call setup goes through the CallRegistrar seam
// so handlers never talk to the provider's HTTP API directly.

pub mod handlers;
pub mod retell;
