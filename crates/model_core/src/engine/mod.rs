//! Calculation engine.
//!
//! - `calculate`: The pure scenario → income statement function
//! - `result`: Output records (`CalculationResult`, `BreakEvenStatus`, ...)
//! - `sweep`: Parallel evaluation of the method × demand grid

mod calculate;
mod result;
mod sweep;

pub use calculate::calculate;
pub use result::{
    BreakEven, BreakEvenStatus, CalculationResult, IncomeStatement, LeverImpact,
    OperatingExpenses,
};
pub use sweep::{most_profitable, sweep, SweepPoint};
