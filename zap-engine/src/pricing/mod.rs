//! Pricing Module
//!
//! Delivery cost rules and the policy that applies them to drafts.
//! Pricing is synchronous and free of side effects: the same draft always
//! yields the same amount.

mod calculator;
mod policy;

pub use calculator::*;
pub use policy::PricingPolicy;

#[cfg(test)]
mod tests;
