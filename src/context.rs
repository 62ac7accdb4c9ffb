//! `ResourceContext`/`DataSourceContext` boundary stand-ins.
//!
//! The real Terraform plugin protocol framing -- schema publishing, wire
//! decoding, diagnostics serialization -- is out of scope; this
//! module exists only so the reconcilers in `resources/` and `data_sources/`
//! have a typed carrier for plan/state/config and an accumulating
//! diagnostics sink, the shape the real framing would hand them.

use std::sync::Arc;

use crate::error::{Diagnostic, Diagnostics};
use crate::sdk::ProjectClient;

/// Carries one resource operation's plan/state pair plus the client and an
/// accumulating diagnostics sink. `plan` is absent for Read/Delete; `state`
/// is absent for Create (pre-apply) and Import.
pub struct ResourceContext<T> {
    pub client: Arc<dyn ProjectClient>,
    pub plan: Option<T>,
    pub state: Option<T>,
    diagnostics: Diagnostics,
}

impl<T> ResourceContext<T> {
    pub fn new(client: Arc<dyn ProjectClient>, plan: Option<T>, state: Option<T>) -> Self {
        Self {
            client,
            plan,
            state,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend_diagnostics(&mut self, other: Diagnostics) {
        self.diagnostics.extend(other);
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

/// Carries a data source's filter configuration plus the client and an
/// accumulating diagnostics sink.
pub struct DataSourceContext<F> {
    pub client: Arc<dyn ProjectClient>,
    pub filter: F,
    diagnostics: Diagnostics,
}

impl<F> DataSourceContext<F> {
    pub fn new(client: Arc<dyn ProjectClient>, filter: F) -> Self {
        Self {
            client,
            filter,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::VrmClient;
    use crate::sdk::VpsClient;

    struct StubClient;
    impl ProjectClient for StubClient {
        fn vps(&self) -> &dyn VpsClient {
            unimplemented!()
        }
        fn vrm(&self) -> &dyn VrmClient {
            unimplemented!()
        }
    }

    #[test]
    fn diagnostics_accumulate_across_the_operation() {
        let mut ctx: ResourceContext<()> = ResourceContext::new(Arc::new(StubClient), None, None);
        ctx.add_diagnostic(Diagnostic::warning("heads up", "non-fatal"));
        assert!(!ctx.diagnostics().has_errors());
        ctx.add_diagnostic(Diagnostic::error("boom", "fatal"));
        assert!(ctx.diagnostics().has_errors());
    }
}
