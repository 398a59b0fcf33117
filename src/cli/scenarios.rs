use super::ui::{self, AmountFormat};
use crate::core::config::Scenario;
use crate::core::{Calculation, CalculationRequest, Calculator};
use anyhow::Result;
use comfy_table::{Cell, Table};
use futures::future::join_all;
use tracing::{debug, info};

struct ScenarioResult<'a> {
    scenario: &'a Scenario,
    result: Result<Calculation>,
}

pub async fn run(
    scenarios: &[Scenario],
    calculator: &dyn Calculator,
    format: &AmountFormat,
) -> Result<()> {
    if scenarios.is_empty() {
        println!("No scenarios found in the configuration.");
        return Ok(());
    }
    info!("Evaluating {} scenarios...", scenarios.len());

    let results = evaluate(scenarios, calculator).await;
    println!("\n{}", ui::style_text("Scenarios", ui::StyleType::Title));
    println!("{}", scenarios_table(&results, format));
    Ok(())
}

async fn evaluate<'a>(
    scenarios: &'a [Scenario],
    calculator: &dyn Calculator,
) -> Vec<ScenarioResult<'a>> {
    let pb = ui::new_progress_bar(scenarios.len() as u64, true);

    let futures = scenarios.iter().map(|scenario| {
        let pb_clone = pb.clone();
        async move {
            pb_clone.set_message(scenario.name.clone());
            let request = CalculationRequest::new(scenario.amount, scenario.rate, scenario.years);
            let result = calculator.calculate(scenario.mode, &request).await;
            debug!("Scenario '{}' evaluated: {:?}", scenario.name, result);
            pb_clone.inc(1);
            ScenarioResult { scenario, result }
        }
    });

    let results = join_all(futures).await;
    pb.finish_and_clear();
    results
}

fn scenarios_table(results: &[ScenarioResult<'_>], format: &AmountFormat) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Scenario"),
        ui::header_cell("Type"),
        ui::header_cell("Amount"),
        ui::header_cell("Rate"),
        ui::header_cell("Years"),
        ui::header_cell("Result"),
    ]);

    for ScenarioResult { scenario, result } in results {
        let spec = scenario.mode.spec();
        let mut row = vec![
            Cell::new(&scenario.name),
            Cell::new(spec.label),
            format.cell(scenario.amount, false),
            ui::number_cell(format!("{}%", scenario.rate)),
            ui::number_cell(scenario.years),
        ];
        match result {
            Ok(calculation) => {
                let summary = calculation
                    .fields()
                    .iter()
                    .map(|field| format!("{}: {}", field.label, format.format(field.value)))
                    .collect::<Vec<_>>()
                    .join("\n");
                row.push(Cell::new(summary));
            }
            Err(e) => row.push(ui::error_cell(&e.to_string())),
        }
        table.add_row(row);
    }
    table
}
