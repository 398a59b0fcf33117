use super::ui::{self, AmountFormat};
use crate::core::{
    AmortizationRow, Calculation, CalculationMode, CalculationRequest, Calculator, EmiInput,
    SipInput, SipYearRow, amortization_schedule, sip_growth_schedule,
};
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::{Cell, Table};
use tracing::{debug, info};

/// One `sip` or `emi` invocation.
#[derive(Debug, Clone)]
pub struct CalculateArgs {
    pub mode: CalculationMode,
    pub request: CalculationRequest,
    pub schedule: bool,
    pub start_date: Option<NaiveDate>,
}

pub async fn run(
    args: &CalculateArgs,
    calculator: &dyn Calculator,
    format: &AmountFormat,
) -> Result<()> {
    info!("Calculating {}...", args.mode);
    let result = calculator.calculate(args.mode, &args.request).await?;
    debug!("Calculation result: {result:?}");

    let spec = args.mode.spec();
    println!("\n{}", ui::style_text(spec.label, ui::StyleType::Title));
    println!(
        "{}",
        ui::style_text(
            &format!(
                "{} {} at {}% for {} years",
                spec.amount_label,
                format.format(args.request.amount),
                args.request.rate,
                args.request.years
            ),
            ui::StyleType::Subtle
        )
    );
    println!("{}", result_table(&result, format));

    if args.schedule {
        ui::print_separator();
        println!("{}", schedule_table(args, format)?);
    }
    Ok(())
}

/// The mode's three output values, one per row.
pub fn result_table(result: &Calculation, format: &AmountFormat) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Result"), ui::header_cell("Amount")]);
    for field in result.fields() {
        table.add_row(vec![
            Cell::new(field.label),
            format.cell(field.value, field.highlight),
        ]);
    }
    table
}

/// Yearly growth for SIP, monthly amortization for EMI. Always computed
/// in-process.
pub fn schedule_table(args: &CalculateArgs, format: &AmountFormat) -> Result<Table> {
    let request = &args.request;
    let table = match args.mode {
        CalculationMode::Sip => {
            let input = SipInput::new(request.amount, request.rate, request.years)?;
            growth_table(&sip_growth_schedule(&input)?, format)
        }
        CalculationMode::Emi => {
            let input = EmiInput::new(request.amount, request.rate, request.years)?;
            amortization_table(&amortization_schedule(&input, args.start_date)?, format)
        }
    };
    Ok(table)
}

fn growth_table(rows: &[SipYearRow], format: &AmountFormat) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Year"),
        ui::header_cell("Invested"),
        ui::header_cell("Returns"),
        ui::header_cell("Total Value"),
    ]);
    for row in rows {
        table.add_row(vec![
            ui::number_cell(row.year),
            format.cell(row.invested_amount, false),
            format.cell(row.estimated_returns, false),
            format.cell(row.total_value, true),
        ]);
    }
    table
}

fn amortization_table(rows: &[AmortizationRow], format: &AmountFormat) -> Table {
    let with_dates = rows.iter().any(|row| row.date.is_some());

    let mut header = vec![ui::header_cell("Month")];
    if with_dates {
        header.push(ui::header_cell("Date"));
    }
    header.extend(
        ["Payment", "Principal", "Interest", "Balance"]
            .into_iter()
            .map(ui::header_cell),
    );

    let mut table = ui::new_styled_table();
    table.set_header(header);
    for row in rows {
        let mut cells = vec![ui::number_cell(row.month)];
        if with_dates {
            cells.push(Cell::new(
                row.date
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ));
        }
        cells.extend([
            format.cell(row.payment, false),
            format.cell(row.principal, false),
            format.cell(row.interest, false),
            format.cell(row.balance, row.balance == 0.0),
        ]);
        table.add_row(cells);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculate;

    fn rupees() -> AmountFormat {
        AmountFormat {
            symbol: "₹".to_string(),
            decimal_places: 2,
        }
    }

    #[test]
    fn test_result_table_lists_mode_fields() {
        let result = calculate(
            CalculationMode::Emi,
            &CalculationRequest::new(12000.0, 0.0, 1.0),
        )
        .unwrap();
        let rendered = result_table(&result, &rupees()).to_string();

        assert!(rendered.contains("Monthly EMI"));
        assert!(rendered.contains("₹1,000.00"));
        assert!(rendered.contains("Total Payable"));
        assert!(rendered.contains("₹12,000.00"));
    }

    #[test]
    fn test_sip_schedule_has_one_row_per_year() {
        let args = CalculateArgs {
            mode: CalculationMode::Sip,
            request: CalculationRequest::new(1000.0, 0.0, 2.5),
            schedule: true,
            start_date: None,
        };
        let table = schedule_table(&args, &rupees()).unwrap();
        assert_eq!(table.row_count(), 3);
        assert!(table.to_string().contains("₹30,000.00"));
    }

    #[test]
    fn test_emi_schedule_with_dates() {
        let args = CalculateArgs {
            mode: CalculationMode::Emi,
            request: CalculationRequest::new(12000.0, 0.0, 1.0),
            schedule: true,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 31),
        };
        let table = schedule_table(&args, &rupees()).unwrap();
        assert_eq!(table.row_count(), 12);

        let rendered = table.to_string();
        assert!(rendered.contains("Date"));
        assert!(rendered.contains("2024-02-29"));
        assert!(rendered.contains("2025-01-31"));
    }

    #[test]
    fn test_schedule_rejects_invalid_input() {
        let args = CalculateArgs {
            mode: CalculationMode::Emi,
            request: CalculationRequest::new(0.0, 5.0, 1.0),
            schedule: true,
            start_date: None,
        };
        let err = schedule_table(&args, &rupees()).unwrap_err();
        assert!(err.to_string().contains("loanAmount"));
    }
}
