use crate::infra::sample_table_rows;
use clap::Args;
use fundboard::error::AppError;
use fundboard::workflows::applications::{
    rows_from_csv, ApplicationIntakeService, IncomingApplication, MemoryTableStore, Reconciler,
};
use serde_json::Value;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// CSV snapshot of the leaderboard to merge into (defaults to a built-in
    /// sample with a comments column)
    #[arg(long)]
    pub(crate) table_csv: Option<PathBuf>,
    /// JSON file holding the incoming application payload (defaults to a
    /// built-in sample applicant)
    #[arg(long)]
    pub(crate) payload_json: Option<PathBuf>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        table_csv,
        payload_json,
    } = args;

    let rows = match table_csv {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            rows_from_csv(file)
                .map_err(|err| std::io::Error::new(ErrorKind::InvalidData, err))?
        }
        None => sample_table_rows(),
    };

    let payload: IncomingApplication = match payload_json {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            serde_json::from_reader(file)
                .map_err(|err| std::io::Error::new(ErrorKind::InvalidData, err))?
        }
        None => sample_payload(),
    };

    let store = Arc::new(MemoryTableStore::seeded(rows));
    let service = ApplicationIntakeService::new(store.clone(), Reconciler::standard());

    println!("Investor application intake demo");

    let receipt = match service.submit(&payload) {
        Ok(receipt) => receipt,
        Err(err) => {
            println!("  Submission rejected: {err}");
            return Ok(());
        }
    };

    let rank_label = receipt
        .rank
        .map(|rank| rank.to_string())
        .unwrap_or_else(|| "unranked".to_string());
    println!(
        "- Merged application {} ({}) -> rank {}",
        receipt.id, receipt.name, rank_label
    );
    println!("- Applications on the board: {}", receipt.total_applications);

    println!("\nRewritten table");
    for row in store.snapshot() {
        println!("  {}", row.join(" | "));
    }

    Ok(())
}

fn sample_payload() -> IncomingApplication {
    let pairs = [
        ("cuid", "gh78.w"),
        ("name", "Григорий Четвёртый"),
        ("Фонд_ставка_текст", "15%"),
        ("Фонд_сумма_текст", "300 млн."),
        ("phone", "79990000004"),
        ("messenger_username", "grigory"),
    ];

    let fields: HashMap<String, Value> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
        .collect();
    IncomingApplication(fields)
}
