//! Text, JSON and CSV rendering of calculation results.
//!
//! Statement values are whole dollars with thousands separators; costs are
//! shown in parentheses. Bucket deltas use a compact signed form (`+$80K`,
//! `-$1.20M`, `+$500`).

use std::io::Write;

use model_core::engine::{BreakEvenStatus, CalculationResult, LeverImpact};
use model_core::types::{CostCategory, LeverKind, ReferenceData};
use serde::Serialize;

use crate::Result;

const LABEL_WIDTH: usize = 28;
const VALUE_WIDTH: usize = 16;

/// Whether a cost change helps or hurts operating income.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaTone {
    /// Cost went down
    Favourable,
    /// Cost went up
    Adverse,
}

impl DeltaTone {
    /// Tone of an operating expense delta; `None` when unchanged.
    pub fn of_cost_delta(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::Adverse)
        } else if delta < 0.0 {
            Some(Self::Favourable)
        } else {
            None
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Favourable => "favourable",
            Self::Adverse => "adverse",
        }
    }
}

fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Whole number with thousands separators.
pub fn format_number(value: f64) -> String {
    let rounded = value.round();
    let grouped = group_digits(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Statement amount: `$1,400,000`, or `($141,200)` when negative.
pub fn format_statement_value(value: f64) -> String {
    let rounded = value.round();
    let formatted = format!("${}", group_digits(rounded.abs() as u64));
    if rounded < 0.0 {
        format!("({})", formatted)
    } else {
        formatted
    }
}

/// Percentage with one decimal.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Compact signed currency for deltas.
pub fn format_delta(value: f64) -> String {
    let sign = if value < 0.0 { '-' } else { '+' };
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{}${:.2}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}${:.0}K", sign, abs / 1_000.0)
    } else {
        format!("{}${:.0}", sign, abs)
    }
}

fn format_signed(value: i64) -> String {
    let grouped = group_digits(value.unsigned_abs());
    if value < 0 {
        format!("-{}", grouped)
    } else {
        format!("+{}", grouped)
    }
}

fn line(out: &mut impl Write, label: &str, value: &str) -> std::io::Result<()> {
    writeln!(out, "{:<LABEL_WIDTH$}{:>VALUE_WIDTH$}", label, value)
}

fn cost_line(
    out: &mut impl Write,
    result: &CalculationResult,
    category: CostCategory,
) -> std::io::Result<()> {
    let opex = &result.income.operating_expenses;
    let value = format_statement_value(-opex.bucket(category));
    let label = format!("  {}", category.label());
    let delta = opex.delta(category);

    match DeltaTone::of_cost_delta(delta) {
        Some(tone) => writeln!(
            out,
            "{:<LABEL_WIDTH$}{:>VALUE_WIDTH$}  {} {}",
            label,
            value,
            format_delta(delta),
            tone.label()
        ),
        None => line(out, &label, &value),
    }
}

fn impact_line(out: &mut impl Write, impact: &LeverImpact) -> std::io::Result<()> {
    let label = match impact.kind {
        LeverKind::Growth => "Growth levers",
        LeverKind::Defensive => "Defensive levers",
    };
    if impact.lever_count == 0 {
        return writeln!(out, "{:<LABEL_WIDTH$}none active", label);
    }

    let cost = match impact.kind {
        LeverKind::Growth => format!("cost {}", format_delta(impact.cost_impact)),
        LeverKind::Defensive => format!("savings {}", format_delta(impact.cost_impact)),
    };
    writeln!(
        out,
        "{:<LABEL_WIDTH$}{} active, volume {:+.1}%, {}",
        label, impact.lever_count, impact.volume_change_pct, cost
    )
}

/// Writes a human-readable income statement.
pub fn write_statement(
    out: &mut impl Write,
    result: &CalculationResult,
    catalog: &ReferenceData,
) -> Result<()> {
    let method = catalog.method(result.method.as_str())?;
    let demand = catalog.demand(result.demand.as_str())?;
    let income = &result.income;
    let opex = &income.operating_expenses;

    writeln!(out, "{} · {} demand", method.name(), demand.name())?;
    writeln!(out, "Volume: {} pints", format_number(result.volume as f64))?;
    writeln!(out)?;

    line(out, "Revenue", &format_statement_value(income.revenue))?;
    line(out, "Cost of Goods Sold", &format_statement_value(-income.cost_of_goods))?;
    line(out, "Gross Profit", &format_statement_value(income.gross_profit))?;
    line(out, "Gross Margin", &format_percent(income.gross_margin_pct))?;
    writeln!(out)?;

    writeln!(out, "Operating Expenses")?;
    cost_line(out, result, CostCategory::SellingMarketing)?;
    cost_line(out, result, CostCategory::BrandRd)?;
    let plant = if opex.plant_operations == 0.0 {
        "$0".to_string()
    } else {
        format_statement_value(-opex.plant_operations)
    };
    line(out, "  Plant Operations", &plant)?;
    line(out, "Total Operating Expenses", &format_statement_value(-opex.total))?;
    writeln!(out)?;

    line(out, "Operating Income", &format_statement_value(income.operating_income))?;
    line(out, "Operating Margin", &format_percent(income.operating_margin_pct))?;
    writeln!(out)?;

    match &result.break_even {
        BreakEvenStatus::Defined(be) => {
            line(out, "Contribution Margin", &format!("${:.2}", be.contribution_margin))?;
            line(out, "Break-even Volume", &format_number(be.volume as f64))?;
            writeln!(
                out,
                "{:<LABEL_WIDTH$}{:>VALUE_WIDTH$}  ({})",
                "Margin of Safety",
                format_signed(be.margin_of_safety),
                format_percent(be.margin_of_safety_pct)
            )?;
        }
        BreakEvenStatus::Undefined {
            unit_price,
            variable_cost,
        } => {
            writeln!(
                out,
                "Break-even undefined: unit price ${:.2} does not exceed variable cost ${:.2}",
                unit_price, variable_cost
            )?;
        }
    }
    writeln!(out)?;

    impact_line(out, &result.growth)?;
    impact_line(out, &result.defensive)?;
    Ok(())
}

/// Writes any serialisable value as pretty JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Flat CSV record of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow<'a> {
    /// Method id
    pub method: &'a str,
    /// Demand id
    pub demand: &'a str,
    /// Adjusted volume
    pub volume: u64,
    /// Revenue
    pub revenue: f64,
    /// Cost of goods sold
    pub cost_of_goods: f64,
    /// Gross profit
    pub gross_profit: f64,
    /// Gross margin percentage
    pub gross_margin_pct: f64,
    /// Selling & marketing bucket
    pub selling_marketing: f64,
    /// Brand / R&D bucket
    pub brand_rd: f64,
    /// Plant operating cost
    pub plant_operations: f64,
    /// Total operating expense
    pub total_opex: f64,
    /// Operating income
    pub operating_income: f64,
    /// Operating margin percentage
    pub operating_margin_pct: f64,
    /// Break-even volume; empty when undefined
    pub break_even_volume: Option<u64>,
    /// Margin of safety; empty when undefined
    pub margin_of_safety: Option<i64>,
}

impl<'a> From<&'a CalculationResult> for ResultRow<'a> {
    fn from(result: &'a CalculationResult) -> Self {
        let income = &result.income;
        let opex = &income.operating_expenses;
        let break_even = result.break_even().ok();
        Self {
            method: result.method.as_str(),
            demand: result.demand.as_str(),
            volume: result.volume,
            revenue: income.revenue,
            cost_of_goods: income.cost_of_goods,
            gross_profit: income.gross_profit,
            gross_margin_pct: income.gross_margin_pct,
            selling_marketing: opex.selling_marketing,
            brand_rd: opex.brand_rd,
            plant_operations: opex.plant_operations,
            total_opex: opex.total,
            operating_income: income.operating_income,
            operating_margin_pct: income.operating_margin_pct,
            break_even_volume: break_even.map(|be| be.volume),
            margin_of_safety: break_even.map(|be| be.margin_of_safety),
        }
    }
}

/// Writes results as CSV with a header row.
pub fn write_csv<'a>(
    out: &mut impl Write,
    results: impl IntoIterator<Item = &'a CalculationResult>,
) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for result in results {
        writer.serialize(ResultRow::from(result))?;
    }
    writer.flush()?;
    Ok(())
}
