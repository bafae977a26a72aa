//! Built-in analysis tools for Atelier.
//!
//! Tools are secondary analyzers: an agent distills the prompt into a
//! [`Brief`](atelier_core::Brief) and offers it to whichever tools the
//! configuration enabled. Each tool renders one extra report section.

pub mod trust_report;
pub mod ux_audit;

pub use trust_report::TrustReportTool;
pub use ux_audit::UxAuditTool;

use atelier_core::ToolRegistry;

/// A registry with all built-in tools registered.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(UxAuditTool::new()));
    registry.register(Box::new(TrustReportTool::new()));
    registry
}
