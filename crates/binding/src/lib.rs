//! Contract bindings for the omnichain contracts deployed and operated here.
//!
//! - `WeFi` omnichain fungible token and `WidgetOFTBridge` ([`oft`])
//! - `OmniCounter` cross-chain ping application ([`counter`])
//!
//! All bindings are generated using alloy's `sol!` macro. Contracts that are
//! deployed by this workspace declare their constructor so the arguments can be
//! ABI-encoded through [`alloy_sol_types::SolConstructor`].

pub mod counter;
pub mod oft;
