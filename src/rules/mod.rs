use crate::engine::Ctx;
use anyhow::Result;

pub trait Rule {
    fn name(&self) -> &'static str;
    fn run(&self, cx: &mut Ctx) -> Result<usize>;
}

mod assignment;
mod standalone_pattern;

pub use assignment::AssignmentLayout;
pub use standalone_pattern::ParenthesizeStandalonePatterns;

/// Upper bound on layout passes. Each pass rewrites the outermost assignments
/// it finds; nested ones inside a rewritten span are picked up by the next.
const MAX_LAYOUT_PASSES: usize = 8;

/// Rewrites that make the source parseable for the layout pass.
pub fn run_pre(cx: &mut Ctx) -> Result<()> {
    let rules: Vec<Box<dyn Rule>> = vec![Box::new(ParenthesizeStandalonePatterns)];
    for r in rules {
        let n = r.run(cx)?;
        tracing::trace!(rule = r.name(), edits = n, "pre rule done");
    }
    Ok(())
}

pub fn run_layout(cx: &mut Ctx) -> Result<()> {
    let rule = AssignmentLayout;
    for pass in 0..MAX_LAYOUT_PASSES {
        let n = rule.run(cx)?;
        tracing::trace!(rule = rule.name(), pass, edits = n, "layout pass done");
        if n == 0 {
            break;
        }
    }
    Ok(())
}

pub fn run_all(cx: &mut Ctx) -> Result<()> {
    run_pre(cx)?;
    run_layout(cx)
}
