//! # strassen-orchestration
//!
//! Operand preparation, multiplier selection, timed execution and result
//! analysis.

pub mod interfaces;
pub mod operands;
pub mod orchestrator;
pub mod selection;

pub use interfaces::{MultiplyResult, ResultPresenter};
pub use operands::{build_operands, OperandFill};
pub use orchestrator::{analyze_comparison_results, execute_multiplications};
pub use selection::get_multipliers_to_run;
