//! Generation inference and coordinate layout.
//!
//! [`infer`] assigns every member a generation; [`Engine`] turns those
//! generations into a [`TreeLayout`] of non-overlapping box positions.

mod engine;
mod generation;

pub use engine::{Engine, LayoutSettings, Placement, TreeLayout};
pub use generation::{Generations, infer};
