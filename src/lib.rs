// SPDX-License-Identifier: MIT

pub mod exp;
pub mod rules;
