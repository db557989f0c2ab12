//! Tool infrastructure: the closed tool set, descriptors, schemas and typed
//! arguments.
//!
//! The catalog owns metadata only; the dispatcher owns behaviour. Both key
//! off [`ToolKind`], so the two cannot drift apart.

pub mod args;
pub mod catalog;
mod definitions;
pub mod kind;

pub use catalog::{ToolCatalog, ToolDescriptor};
pub use kind::ToolKind;
