//! ChainList marketplace ledger.
//!
//! Store owners open stores, sellers list articles in them and buyers pay the
//! exact price to receive them. Admins decide who may act as admin or store
//! owner. Every purchase pays the seller out of the attached amount and
//! records the buyer.
#![cfg_attr(not(feature = "std"), no_std)]
use crate::{events::*, helper::*, structs::*};
use commons::*;
use concordium_std::{collections::BTreeSet, *};

mod contract;
mod events;
mod helper;
mod impls;
mod structs;
