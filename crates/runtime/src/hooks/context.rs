//! Execution context provided to instance hooks.

use crate::binding::BindingTable;

/// Read-only view of the runtime handed to every hook run.
///
/// The binding table stays read-locked for the duration of the run, so
/// hooks observe a consistent set of bindings.
pub struct HookContext<'a> {
    /// Current bindings, including the aggression index of armed templates.
    pub bindings: &'a BindingTable,
}

impl<'a> HookContext<'a> {
    pub fn new(bindings: &'a BindingTable) -> Self {
        Self { bindings }
    }
}
