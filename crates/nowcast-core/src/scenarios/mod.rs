//! Scenario valuation: per-cashflow itemization, the single-scenario engine
//! and the multi-scenario orchestrator.

pub mod engine;
pub mod orchestrator;
pub mod projection;

pub use engine::{check_scenario_domain, evaluate_scenario, ScenarioResult};
pub use orchestrator::{
    evaluate_all_scenarios, evaluate_all_scenarios_with_warnings, ScenarioEvaluation,
    ScenarioFailure, ScenarioResults,
};
pub use projection::{build_projections, CashflowProjection};
