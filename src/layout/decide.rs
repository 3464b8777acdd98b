use crate::error::{LayoutError, Part, SourcePosition};
use crate::layout::node::{Binding, FormattingContext, LayoutDecision, Shape};
use crate::layout::width::{estimate_width, fits};

/// Choose the layout of one binding whose target has already been rendered to
/// `target` (for declarations this includes the keyword).
///
/// A binding without initializer is always inline. A preserved initializer is
/// emitted verbatim after `target = `, or on the next line when even its first
/// line does not fit. Otherwise the one-line form is used when it fits and the
/// wrapped form when it does not.
pub fn decide(
    target: &str,
    binding: &Binding,
    cx: &FormattingContext,
    position: SourcePosition,
) -> Result<LayoutDecision, LayoutError> {
    let Some(init) = &binding.initializer else {
        return Ok(LayoutDecision::Inline(target.to_string()));
    };
    let render_error = || LayoutError::Render {
        position,
        part: Part::Initializer,
    };

    if init.is_preserved() {
        let body = init.verbatim().ok_or_else(render_error)?;
        let width = estimate_width(target, body, cx);
        let text = if fits(width, cx) {
            format!("{target} = {body}")
        } else {
            format!("{target} =\n{}{body}", cx.continuation)
        };
        tracing::trace!(%position, width, "initializer layout preserved");
        return Ok(LayoutDecision::Unchanged(text));
    }

    let body = init.one_line().ok_or_else(render_error)?;
    let width = estimate_width(target, &body, cx);
    if fits(width, cx) {
        return Ok(LayoutDecision::Inline(format!("{target} = {body}")));
    }

    tracing::trace!(%position, width, max = cx.max_line_width, "wrapping initializer");
    let body = if cx.wrap_long_assignments && init.shape() == Shape::Simple {
        format!("({body})")
    } else {
        body
    };
    Ok(LayoutDecision::Wrapped(format!(
        "{target} =\n{}{body}",
        cx.continuation
    )))
}
