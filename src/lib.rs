// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod assembler;
pub mod catalog;
pub mod cipher;
pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod db;
pub mod directory;
pub mod logging;
pub mod models;
pub mod storage;
pub mod store;
pub mod utils;
