// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod address;
pub mod cluster;
pub mod time;

pub use address::{Address, AddressError};
pub use cluster::{Cluster, Operator, Validator, ValidatorAddresses};
pub use time::{Clock, FixedClock, SystemClock, Timestamp};
