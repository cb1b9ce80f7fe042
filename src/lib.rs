#![no_std]
#![allow(dead_code)]

mod storage;
mod types;
mod validation;
mod interfaces;
mod schedule;
mod belts;
mod allocation;
mod whitelist;
mod participation;
mod events;
pub mod sale;

pub use interfaces::{AdminInterface, ZamStakingInterface};
pub use sale::{ZamPadSale, ZamPadSaleClient};
pub use types::*;
