// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // in-process run configuration (§6, §10.3)
pub mod observability;

pub mod model;      // argument model & traversal (C1)
pub mod graph;      // graph preprocessing & duplicate elimination (C2)
pub mod schedule;   // upward-rank & list scheduler (C3)
pub mod program;    // program generator (C4)
pub mod exec;       // execution engine (C5)
pub mod failure;    // error & timeout taxonomy (C6)
pub mod run;        // planner / executor / convenience entry points (§6)
