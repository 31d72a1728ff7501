use std::collections::HashSet;

/// Per-verification bookkeeping, reset at the start of every `verify` call.
///
/// Grounded in `verificacion.py::Contexto`: the original keeps this as a standalone object
/// rather than inlining its three sets into the verifier function, so the port keeps the same
/// shape.
#[derive(Default)]
pub(crate) struct Context {
    variables: HashSet<String>,
    labels_defined: HashSet<String>,
    labels_required: HashSet<String>,
}

impl Context {
    pub(crate) fn new() -> Context {
        Context::default()
    }

    pub(crate) fn define_variable(&mut self, variable: &str) {
        self.variables.insert(variable.to_string());
    }

    pub(crate) fn variable_defined(&self, variable: &str) -> bool {
        self.variables.contains(variable)
    }

    pub(crate) fn require_label(&mut self, label: &str) {
        self.labels_required.insert(label.to_string());
    }

    pub(crate) fn define_label(&mut self, label: &str) {
        self.labels_defined.insert(label.to_string());
    }

    pub(crate) fn missing_labels(&self) -> Vec<String> {
        let mut missing: Vec<String> = self
            .labels_required
            .difference(&self.labels_defined)
            .cloned()
            .collect();
        missing.sort();
        missing
    }
}
