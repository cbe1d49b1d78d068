//! # Numerics
//!
//! Domain-free helpers that the `RustedSciThe` numerical stack does not provide. The stiff
//! integration, the scalar Newton solve, the interpolation and the least-squares refinement of
//! the shock solver all come from `RustedSciThe`; only the global search over a rectangle lives
//! here.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `box_search` | box bounds, deterministic tensor-grid search with successive zoom |
//!
//! ## Grid search with zoom
//!
//! `grid_zoom_search` evaluates the objective on a tensor grid, moves a rectangle half as wide
//! onto the best point and repeats. It is deterministic and derivative free; non-finite values
//! are skipped. Its result is meant as the starting point of a local refinement.

pub mod box_search;

mod box_search_tests;
