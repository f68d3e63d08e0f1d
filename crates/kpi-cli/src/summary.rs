use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use kpi_cli::types::{CorrelationRun, ForecastRun, RunResult};

pub fn print_summary(result: &RunResult, sample_rows: usize) {
    if let Some(run) = &result.forecast {
        print_forecast(run, sample_rows);
    }
    if let Some(run) = &result.correlation {
        print_correlation(run, sample_rows);
    }
    print_artifacts(result);
    if let Some(path) = &result.report {
        println!("Run report: {}", path.display());
    }
}

fn print_forecast(run: &ForecastRun, sample_rows: usize) {
    let metrics = &run.outcome.metrics;
    println!("Forecast input: {}", run.input.display());
    println!(
        "Accounts: {}  KPIs: {}  Historical rows: {}",
        run.outcome.accounts, run.outcome.kpis, run.historical_rows
    );

    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("R²"), number_cell(metrics.r2)]);
    table.add_row(vec![Cell::new("MAE"), number_cell(metrics.mae)]);
    table.add_row(vec![Cell::new("RMSE"), number_cell(metrics.rmse)]);
    table.add_row(vec![dim_cell("Train rows"), Cell::new(metrics.train_rows)]);
    table.add_row(vec![dim_cell("Test rows"), Cell::new(metrics.test_rows)]);
    println!("{table}");

    let forecasts = &run.outcome.forecasts;
    if !forecasts.is_empty() && sample_rows > 0 {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Account"),
            header_cell("KPI"),
            header_cell("Year"),
            header_cell("Month"),
            header_cell("Predicted"),
        ]);
        apply_sample_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        align_column(&mut table, 3, CellAlignment::Right);
        align_column(&mut table, 4, CellAlignment::Right);
        for row in forecasts.iter().take(sample_rows) {
            table.add_row(vec![
                Cell::new(&row.account_id)
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold),
                Cell::new(&row.english_name),
                Cell::new(row.year),
                Cell::new(row.month),
                number_cell(row.predicted_monthly_value),
            ]);
        }
        println!("{table}");
    }
    println!("Total forecast rows: {}", forecasts.len());
    println!(
        "Combined rows: {} historical + {} forecast = {}",
        run.historical_rows,
        forecasts.len(),
        run.outcome.combined.len()
    );
}

fn print_correlation(run: &CorrelationRun, sample_rows: usize) {
    let outcome = &run.outcome;
    println!("Correlation input: {}", run.input.display());
    println!(
        "Rows used: {} of {}  Months: {}  KPIs: {}",
        outcome.rows_used,
        run.input_rows,
        outcome.pivot.periods().len(),
        outcome.matrix.len()
    );
    if outcome.undefined_pairs > 0 {
        println!(
            "Undefined pairs: {} (too little overlap or zero variance)",
            outcome.undefined_pairs
        );
    }

    if !outcome.entries.is_empty() && sample_rows > 0 {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("KPI1"),
            header_cell("KPI2"),
            header_cell("Correlation"),
        ]);
        apply_sample_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        for entry in outcome.entries.iter().take(sample_rows) {
            table.add_row(vec![
                Cell::new(&entry.kpi1),
                Cell::new(&entry.kpi2),
                correlation_cell(entry.correlation),
            ]);
        }
        println!("{table}");
    }
    println!("Total correlation pairs: {}", outcome.entries.len());
}

fn print_artifacts(result: &RunResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Artifact"),
        header_cell("Rows"),
        header_cell("Path"),
        header_cell("SHA-256"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let mut any = false;
    for artifact in result.artifacts() {
        any = true;
        table.add_row(vec![
            Cell::new(&artifact.kind)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(artifact.rows),
            Cell::new(artifact.path.display()),
            dim_cell(&artifact.sha256),
        ]);
    }
    if any {
        println!("{table}");
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn apply_sample_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn number_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.4}"))
}

fn correlation_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) if value >= 0.5 => Cell::new(format!("{value:.4}")).fg(Color::Green),
        Some(value) if value <= -0.5 => Cell::new(format!("{value:.4}")).fg(Color::Red),
        Some(value) => Cell::new(format!("{value:.4}")),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
