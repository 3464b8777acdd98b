//! The assignment layout engine.
//!
//! A statement goes through four steps: the classifier turns a syntax node
//! into an [`AssignmentNode`] (or passes it through), the width estimator
//! measures the one-line form, the decider picks [`LayoutDecision::Inline`],
//! [`LayoutDecision::Wrapped`] or [`LayoutDecision::Unchanged`] for every
//! binding, and the renderer produces the replacement text for the
//! statement's span. Everything after classification is a pure function of
//! the node and the [`Configuration`](crate::Configuration).

mod classify;
mod decide;
mod node;
mod render;
mod width;

pub use classify::{CANDIDATE_KINDS, Classification, Skip, classify};
pub use decide::decide;
pub use node::{
    AssignmentKind, AssignmentNode, Binding, Expr, FormattingContext, Gap, LayoutDecision, Leaf,
    Shape, Terminator,
};
pub use render::render;
pub use width::{estimate_width, fits, text_width};
