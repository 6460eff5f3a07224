// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tourflow: the workflow-diagram editor core.
//!
//! A graph of steps and connections, a deterministic grid layout, edge derivation, a pointer and
//! keyboard interaction state machine, bounded undo/redo with debounced drag checkpoints, and a
//! viewport. Rendering is left to the host; [`render::Scene`] describes what to paint.

pub mod config;
pub mod editor;
pub mod history;
pub mod layout;
pub mod model;
pub mod render;
pub mod store;
pub mod viewport;
