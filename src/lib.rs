//! Digital I/O for the DIO header of SBUS based boards.
//!
//! The 36 DIO lines (pins 5 to 40) are controlled through 16-bit registers on the SBUS.  This
//! crate knows which register and which bit belongs to which pin and performs the
//! read-modify-write sequences needed to drive, release or read a single pin without disturbing
//! the others sharing the same register.
//!
//! The bus itself is provided by the platform through the [`Sbus`] trait, and every operation
//! runs under a [`BusMutex`].
//!
//! ```
//! use sbus_dio::{Dio, PinState, RegisterBank};
//!
//! let mut bank = RegisterBank::new();
//! let dio = Dio::new(&mut bank);
//!
//! dio.set_pin(sbus_dio::board::RELAY_1, PinState::High).unwrap();
//! assert!(dio.get_pin(sbus_dio::board::RELAY_1).unwrap());
//! assert!(dio.get_pin(41).is_err());
//! ```
#![cfg_attr(not(test), no_std)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

mod bank;
pub mod board;
mod bus;
mod common;
mod dio;
pub mod map;
#[cfg(test)]
mod mock;
mod multi;
mod mutex;
mod pin;

pub use bank::{BankError, RegisterBank};
pub use bus::Sbus;
pub use common::mode;
pub use common::{Direction, DioDriver, Error, PinState};
pub use dio::{Dio, Driver, Parts};
pub use multi::{read_multiple, write_multiple};
pub use mutex::BusMutex;
pub use pin::Pin;
