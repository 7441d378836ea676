use autopay::application::wizard::{AutoPayWizard, WizardExit, WizardOptions};
use autopay::domain::bill::{BillId, BillRef};
use autopay::domain::choices::{step_choices, step_heading};
use autopay::domain::dashboard::{BillFilter, Dashboard};
use autopay::domain::draft::format_currency;
use autopay::domain::ports::{ConfigurationStoreBox, DashboardStoreBox};
use autopay::domain::step::Step;
use autopay::infrastructure::in_memory::InMemoryStore;
use autopay::interfaces::csv::action_reader::ActionReader;
use autopay::interfaces::csv::bill_writer::BillWriter;
use clap::{Parser, Subcommand};
use jiff::Zoned;
use jiff::civil::Date;
use log::info;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Date treated as today (YYYY-MM-DD). Defaults to the system date.
    #[arg(long, global = true)]
    today: Option<Date>,

    /// Simulated processing time before a configuration is written.
    #[arg(long, global = true, default_value_t = 2000)]
    processing_delay_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the sample bill list to the store
    Seed,
    /// List dashboard bills as CSV; per-filter counts go to stderr
    Bills {
        /// One of all, pending, paid, autopay
        #[arg(long, default_value = "all")]
        filter: BillFilter,
    },
    /// Pay a single bill
    Pay { bill_id: String },
    /// Pay every pending bill at once
    PayAll,
    /// Print the options offered on each wizard step
    Options,
    /// Print the stored AutoPay configuration of a bill as JSON
    Show { bill_id: String },
    /// Replay a CSV script of wizard actions (header `action,value`)
    Configure {
        script: PathBuf,

        #[arg(long)]
        bill_id: Option<String>,

        /// Display name; defaults to the bill's provider on the dashboard.
        #[arg(long)]
        bill_name: Option<String>,
    },
}

struct Stores {
    configurations: ConfigurationStoreBox,
    dashboard: DashboardStoreBox,
}

#[cfg(feature = "storage-rocksdb")]
fn persistent_stores(db_path: PathBuf) -> Result<Option<Stores>> {
    use autopay::infrastructure::rocksdb::RocksDBStore;

    let store = RocksDBStore::open(db_path).into_diagnostic()?;
    Ok(Some(Stores {
        configurations: Box::new(store.clone()),
        dashboard: Box::new(store),
    }))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn persistent_stores(_db_path: PathBuf) -> Result<Option<Stores>> {
    eprintln!(
        "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
    );
    Ok(None)
}

async fn open_stores(db_path: Option<PathBuf>) -> Result<Stores> {
    if let Some(db_path) = db_path
        && let Some(stores) = persistent_stores(db_path)?
    {
        return Ok(stores);
    }

    // In-memory storage starts from the demo bill list, like a fresh browser.
    let store = InMemoryStore::new();
    let stores = Stores {
        configurations: Box::new(store.clone()),
        dashboard: Box::new(store),
    };
    stores
        .dashboard
        .save(Dashboard::sample())
        .await
        .into_diagnostic()?;
    Ok(stores)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(|| Zoned::now().date());
    let stores = open_stores(cli.db_path).await?;

    match cli.command {
        Command::Seed => {
            let dashboard = Dashboard::sample();
            let count = dashboard.bills.len();
            stores.dashboard.save(dashboard).await.into_diagnostic()?;
            println!("Seeded {} bills", count);
        }
        Command::Bills { filter } => {
            let dashboard = stores
                .dashboard
                .load()
                .await
                .into_diagnostic()?
                .unwrap_or_default();
            eprintln!("{}", dashboard.counts());
            let stdout = io::stdout();
            let mut writer = BillWriter::new(stdout.lock());
            writer
                .write_bills(dashboard.filtered(filter), today)
                .into_diagnostic()?;
        }
        Command::Pay { bill_id } => {
            let bill_id = BillId::from(bill_id);
            let mut dashboard = stores
                .dashboard
                .load()
                .await
                .into_diagnostic()?
                .unwrap_or_default();
            if !dashboard.pay(&bill_id) {
                miette::bail!("Unknown bill {}", bill_id);
            }
            let provider = dashboard
                .get(&bill_id)
                .map(|bill| bill.provider.clone())
                .unwrap_or_default();
            stores.dashboard.save(dashboard).await.into_diagnostic()?;
            println!("Paid {}", provider);
        }
        Command::PayAll => {
            let mut dashboard = stores
                .dashboard
                .load()
                .await
                .into_diagnostic()?
                .unwrap_or_default();
            let pending = dashboard.counts().pending;
            let total = dashboard.pay_all_pending();
            stores.dashboard.save(dashboard).await.into_diagnostic()?;
            println!("Paid {} bills totaling {}", pending, format_currency(total));
        }
        Command::Options => {
            for step in Step::ALL {
                println!("{}", step_heading(step));
                for choice in step_choices(step) {
                    println!("  - {}", choice);
                }
            }
        }
        Command::Show { bill_id } => {
            let bill_id = BillId::from(bill_id);
            match stores.configurations.get(&bill_id).await.into_diagnostic()? {
                Some(config) => {
                    println!("{}", serde_json::to_string_pretty(&config).into_diagnostic()?)
                }
                None => miette::bail!("No AutoPay configuration stored for bill {}", bill_id),
            }
        }
        Command::Configure {
            script,
            bill_id,
            bill_name,
        } => {
            let bill = resolve_bill(&stores, bill_id, bill_name).await;
            info!("Configuring AutoPay for bill {}", bill.id);

            let options = WizardOptions::default()
                .with_processing_delay(Duration::from_millis(cli.processing_delay_ms))
                .with_today(today);

            let mut wizard =
                AutoPayWizard::open(bill, stores.configurations, stores.dashboard, options).await;

            let file = File::open(script).into_diagnostic()?;
            let reader = ActionReader::new(file);
            let mut exit = None;
            for action in reader.actions() {
                match action {
                    Ok(action) => match wizard.perform(&action).await {
                        Ok(Some(done)) => {
                            exit = Some(done);
                            break;
                        }
                        Ok(None) => {}
                        Err(e) => eprintln!("Error applying action: {}", e),
                    },
                    Err(e) => eprintln!("Error reading action: {}", e),
                }
            }

            match exit {
                Some(WizardExit::Saved {
                    message,
                    configuration,
                    ..
                }) => {
                    println!("{}", message);
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&configuration).into_diagnostic()?
                    );
                }
                Some(WizardExit::Cancelled) => println!("AutoPay configuration cancelled"),
                None => {
                    for (_, message) in wizard.visible_errors().iter() {
                        eprintln!("{}", message);
                    }
                    eprintln!("Script ended before the configuration was saved");
                }
            }
        }
    }

    Ok(())
}

async fn resolve_bill(
    stores: &Stores,
    bill_id: Option<String>,
    bill_name: Option<String>,
) -> BillRef {
    let Some(bill_id) = bill_id else {
        return BillRef::default();
    };
    let bill_id = BillId::from(bill_id);

    let display_name = match bill_name {
        Some(name) => name,
        None => stores
            .dashboard
            .load()
            .await
            .ok()
            .flatten()
            .and_then(|dashboard| dashboard.get(&bill_id).map(|bill| bill.provider.clone()))
            .unwrap_or_else(|| BillRef::default().display_name),
    };

    BillRef::new(bill_id, display_name)
}
