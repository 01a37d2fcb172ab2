//! Mustache sections on top of Handlebars.
//!
//! Handlebars calls its `blockHelperMissing` hook for `{{#name}}` when `name`
//! is not a helper. [`SectionHelper`] answers that hook the way a mustache
//! section behaves: arrays render the block once per item, objects and other
//! truthy values render it once with the value as `this`, falsy values render
//! the `{{else}}` branch if there is one.

use handlebars::{
    BlockContext, Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
    Renderable, Template,
};
use serde_json::Value;

/// Name of the Handlebars hook for unknown block helpers.
pub(super) const BLOCK_HELPER_MISSING: &str = "blockHelperMissing";

#[derive(Debug, Clone, Copy)]
pub(super) struct SectionHelper;

impl HelperDef for SectionHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let value = rc.evaluate(ctx, h.name())?.as_json().clone();

        if !is_truthy(&value) {
            if let Some(inverse) = h.inverse() {
                inverse.render(r, ctx, rc, out)?;
            }
            return Ok(());
        }

        let Some(template) = h.template() else {
            return Ok(());
        };

        match value {
            Value::Array(items) => {
                for item in items {
                    render_scoped(template, item, r, ctx, rc, out)?;
                }
                Ok(())
            }
            // `true` only switches the block on; names inside still resolve
            // against the enclosing scope.
            Value::Bool(_) => template.render(r, ctx, rc, out),
            other => render_scoped(template, other, r, ctx, rc, out),
        }
    }
}

fn render_scoped<'reg: 'rc, 'rc>(
    template: &'rc Template,
    value: Value,
    r: &'reg Handlebars<'reg>,
    ctx: &'rc Context,
    rc: &mut RenderContext<'reg, 'rc>,
    out: &mut dyn Output,
) -> HelperResult {
    let mut block = BlockContext::new();
    block.set_base_value(value);
    rc.push_block(block);
    let result = template.render(r, ctx, rc, out);
    rc.pop_block();
    result
}

/// Mustache truthiness: missing, `null`, `false`, `""`, `0` and `[]` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}
