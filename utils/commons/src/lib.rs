//! Shared types for the ChainList marketplace contracts: error codes, event
//! tags, identifier aliases and the ordered role registry.
#![cfg_attr(not(feature = "std"), no_std)]
use concordium_std::*;

mod constants;
mod errors;
mod roles;
mod types;

pub use self::{constants::*, errors::*, roles::*, types::*};
