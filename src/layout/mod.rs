// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Position resolution for rendering.
//!
//! Stored positions are used verbatim; every other step gets a deterministic grid cell.

pub mod grid;

pub use grid::{grid_cell, resolve_positions, sorted_steps, ResolvedLayout};
