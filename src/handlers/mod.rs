// handlers/mod.rs - Handlers grouped by who may call them
//
// Public (no session) → Protected (session token, most routes also gated
// on the caller's stored role)
pub mod protected;
pub mod public;
