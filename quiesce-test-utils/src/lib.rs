// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shared helpers for quiesce tests.

pub mod helpers;
pub mod test_channel;

pub use helpers::{assert_no_item, drain, expect_item, next_within};
pub use test_channel::{test_channel, TestChannel};
