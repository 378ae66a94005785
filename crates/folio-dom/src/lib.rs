//! Arena document tree for the folio page.
//!
//! The page logic never talks to a real browser DOM. It works against this
//! [`Document`]: an index-linked arena of elements carrying class lists,
//! inline style, per-element geometry from the host's layout, and a focus
//! pointer. [`selector`] adds the `querySelector` family on top.

pub mod builder;
pub mod dom;
pub mod selector;

pub use builder::ElementBuilder;
pub use dom::{Attribute, Document, ElementData, Geometry, Node, NodeId, NodeKind, TagName};
pub use selector::SelectorList;
