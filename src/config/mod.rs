// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-process run configuration (§6, §10.3). There is no file format, wire
//! protocol, or CLI layer here — callers build a [`RunOptions`] directly.

mod run_options;

pub use run_options::RunOptions;
