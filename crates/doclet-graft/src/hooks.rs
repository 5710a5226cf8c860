//! Transform hooks.
//!
//! A hook turns one record into the payload of an output node, or into
//! nothing. Hooks are installed per [`Hook`] in a [`HookTable`]; any hook
//! without an explicit entry falls back to the table's fallback, which by
//! default only logs the record.

use crate::kind::Hook;
use crate::tree::Transformed;
use doclet_core::{BoxError, DocletError, Record, Result};
use std::collections::HashMap;
use tracing::info;

/// What a hook sees.
#[derive(Debug, Clone, Copy)]
pub struct HookInput<'a> {
    /// The rule that selected this hook.
    pub hook: Hook,
    pub record: &'a Record,
    /// Documentation of the counterpart member, for merged attributes and
    /// methods.
    pub parent_doc: Option<&'a Record>,
}

/// Result of a hook: a payload to attach, `None` to drop the record, or an
/// error that aborts the run.
pub type HookResult = std::result::Result<Option<Transformed>, BoxError>;

/// A transform strategy.
pub trait Transform {
    fn transform(&mut self, input: HookInput<'_>) -> HookResult;
}

impl<T: Transform + ?Sized> Transform for Box<T> {
    fn transform(&mut self, input: HookInput<'_>) -> HookResult {
        (**self).transform(input)
    }
}

/// Adapts a closure into a [`Transform`].
pub fn hook_fn<F>(f: F) -> FnHook<F>
where
    F: FnMut(HookInput<'_>) -> HookResult,
{
    FnHook(f)
}

/// A closure-backed [`Transform`]. See [`hook_fn`].
pub struct FnHook<F>(F);

impl<F> Transform for FnHook<F>
where
    F: FnMut(HookInput<'_>) -> HookResult,
{
    fn transform(&mut self, input: HookInput<'_>) -> HookResult {
        (self.0)(input)
    }
}

/// Default hook: logs the record unless quiet, produces nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHook {
    pub quiet: bool,
}

impl Transform for LogHook {
    fn transform(&mut self, input: HookInput<'_>) -> HookResult {
        if !self.quiet {
            match input.hook {
                Hook::Unknown => info!(
                    "{}: {} : {}",
                    input.hook,
                    input.record.kind,
                    input.record.display_name()
                ),
                _ => info!("{}: {}", input.hook, input.record.display_name()),
            }
        }
        Ok(None)
    }
}

/// Hooks installed for a run.
pub struct HookTable {
    hooks: HashMap<Hook, Box<dyn Transform>>,
    fallback: Box<dyn Transform>,
}

impl Default for HookTable {
    fn default() -> Self {
        Self::new(false)
    }
}

impl HookTable {
    /// A table where every hook is the logging stub.
    pub fn new(quiet: bool) -> Self {
        Self {
            hooks: HashMap::new(),
            fallback: Box::new(LogHook { quiet }),
        }
    }

    /// Installs `transform` for `hook`.
    pub fn with(mut self, hook: Hook, transform: impl Transform + 'static) -> Self {
        self.set(hook, transform);
        self
    }

    /// Replaces the transform used by hooks without their own entry.
    pub fn with_fallback(mut self, transform: impl Transform + 'static) -> Self {
        self.fallback = Box::new(transform);
        self
    }

    pub fn set(&mut self, hook: Hook, transform: impl Transform + 'static) {
        self.hooks.insert(hook, Box::new(transform));
    }

    /// Removes the entry for `hook`, returning it to the fallback.
    pub fn reset(&mut self, hook: Hook) {
        self.hooks.remove(&hook);
    }

    pub fn is_overridden(&self, hook: Hook) -> bool {
        self.hooks.contains_key(&hook)
    }

    /// Runs the hook selected by `input.hook`.
    pub fn transform(&mut self, input: HookInput<'_>) -> Result<Option<Transformed>> {
        let hook = input.hook;
        let transform = match self.hooks.get_mut(&hook) {
            Some(transform) => transform,
            None => &mut self.fallback,
        };
        transform.transform(input).map_err(|source| DocletError::Hook {
            hook: hook.as_str(),
            source,
        })
    }
}

impl std::fmt::Debug for HookTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut overridden: Vec<&Hook> = self.hooks.keys().collect();
        overridden.sort();
        f.debug_struct("HookTable")
            .field("overridden", &overridden)
            .finish()
    }
}
