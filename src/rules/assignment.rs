use crate::engine::ast::descendants_of_kinds;
use crate::engine::{Ctx, TextEdit};
use crate::layout::{CANDIDATE_KINDS, Classification, classify, render};
use crate::rules::Rule;
use anyhow::Result;
use tracing::{debug, trace, warn};

/// Lays out every assignment-like statement through the layout engine.
pub struct AssignmentLayout;

impl Rule for AssignmentLayout {
    fn name(&self) -> &'static str {
        "assignment_layout"
    }

    fn run(&self, cx: &mut Ctx) -> Result<usize> {
        let src = cx.source();
        let root = cx.tree.root_node();
        let mut edits: Vec<TextEdit> = Vec::new();
        // end of the last rewritten span; nodes inside it wait for the next pass
        let mut covered = 0usize;

        for node in descendants_of_kinds(root, CANDIDATE_KINDS) {
            if node.start_byte() < covered {
                continue;
            }
            let assignment = match classify(node, &src) {
                Ok(Classification::Eligible(a)) => a,
                Ok(Classification::NotEligible(skip)) => {
                    trace!(kind = node.kind(), ?skip, "pass-through");
                    continue;
                }
                Err(e) => {
                    debug!(position = %e.position(), error = %e, "pass-through");
                    continue;
                }
            };

            let span = assignment.span.clone();
            match render(&assignment, &cx.config) {
                Ok(text) => {
                    if text != src[span.clone()] {
                        covered = span.end;
                        edits.push(TextEdit {
                            start_byte: span.start,
                            end_byte: span.end,
                            replacement: text,
                        });
                    }
                }
                Err(e) => warn!(position = %e.position(), error = %e, "keeping original text"),
            }
        }

        let n = edits.len();
        if n > 0 {
            cx.apply_edits(edits)?;
        }
        Ok(n)
    }
}
