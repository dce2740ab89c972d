//! `apartments` entry-point: wires configuration, tracing and a repository
//! adapter into one session, runs a single user action, and prints the
//! outcome as JSON.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::cell::RefCell;
use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::Arc;

use apartments::config::{ApartmentSettings, RepositoryBackend};
use apartments::domain::ports::{ApartmentRepository, ChartPresenter};
use apartments::domain::{
    ApartmentId, ApartmentSession, BarSeries, ChartKind, DomainError, Notice, PieSlice,
};
use apartments::outbound::firestore::FirestoreApartmentRepository;
use apartments::outbound::memory::InMemoryApartmentRepository;
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, eyre};
use ortho_config::OrthoConfig;
use serde_json::{Value, json};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `apartments` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "apartments",
    about = "Manage rental apartments and their rent statistics",
    long_about = "Manage rental apartments and their rent statistics.\n\n\
        The default `memory` backend starts empty on every run, so `list` \
        prints nothing and `edit`/`delete` find no record. Set \
        APARTMENTS_BACKEND=firestore and APARTMENTS_PROJECT_ID to keep \
        records between runs.",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every apartment.
    List,
    /// Create an apartment.
    Add {
        /// Apartment number.
        #[arg(long = "num-app", value_name = "number")]
        num_app: String,
        /// Description.
        #[arg(long, value_name = "text")]
        design: String,
        /// Monthly rent.
        #[arg(long, value_name = "amount")]
        loyer: String,
    },
    /// Rewrite an apartment; omitted fields keep their stored value.
    Edit {
        /// Identifier of the apartment to edit.
        id: String,
        /// New apartment number.
        #[arg(long = "num-app", value_name = "number")]
        num_app: Option<String>,
        /// New description.
        #[arg(long, value_name = "text")]
        design: Option<String>,
        /// New monthly rent.
        #[arg(long, value_name = "amount")]
        loyer: Option<String>,
    },
    /// Delete an apartment.
    Delete {
        /// Identifier of the apartment to delete.
        id: String,
    },
    /// Print rent statistics and the selected chart series.
    Stats {
        /// Chart to shape the statistics for.
        #[arg(long, value_enum, default_value_t = ChartArg::Bar)]
        chart: ChartArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ChartArg {
    Bar,
    Pie,
}

impl From<ChartArg> for ChartKind {
    fn from(value: ChartArg) -> Self {
        match value {
            ChartArg::Bar => Self::Bar,
            ChartArg::Pie => Self::Pie,
        }
    }
}

/// Presenter that keeps the last series it was handed as JSON.
#[derive(Debug, Default)]
struct CapturedChart(RefCell<Value>);

impl ChartPresenter for CapturedChart {
    fn present_bar(&self, series: &BarSeries) {
        *self.0.borrow_mut() = json!(series);
    }

    fn present_pie(&self, slices: &[PieSlice]) {
        *self.0.borrow_mut() = json!(slices);
    }
}

/// Application bootstrap.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let settings = ApartmentSettings::load_from_iter([OsString::from("apartments")])
        .map_err(|error| eyre!("failed to load configuration: {error}"))?;

    let output = match settings.backend()? {
        RepositoryBackend::Memory => {
            run(args.command, Arc::new(InMemoryApartmentRepository::new())).await?
        }
        RepositoryBackend::Firestore => {
            let repository = FirestoreApartmentRepository::new(settings.firestore()?)?;
            run(args.command, Arc::new(repository)).await?
        }
    };

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &output)?;
    writeln!(stdout)?;
    Ok(())
}

async fn run<R>(command: Command, repository: Arc<R>) -> Result<Value>
where
    R: ApartmentRepository,
{
    let mut session = ApartmentSession::new(repository);
    session.load().await.map_err(report)?;

    match command {
        Command::List => Ok(json!({ "apartments": session.records() })),
        Command::Add {
            num_app,
            design,
            loyer,
        } => {
            let form = session.form_mut();
            form.set_num_app(num_app);
            form.set_design(design);
            form.set_loyer(loyer);
            submit(&mut session).await
        }
        Command::Edit {
            id,
            num_app,
            design,
            loyer,
        } => {
            session.begin_edit(&parse_id(id)?).map_err(report)?;
            let form = session.form_mut();
            if let Some(value) = num_app {
                form.set_num_app(value);
            }
            if let Some(value) = design {
                form.set_design(value);
            }
            if let Some(value) = loyer {
                form.set_loyer(value);
            }
            submit(&mut session).await
        }
        Command::Delete { id } => {
            let notice = session.remove(&parse_id(id)?).await.map_err(report)?;
            Ok(json!({ "notice": notice.to_string() }))
        }
        Command::Stats { chart } => {
            session.set_chart_kind(chart.into());
            let presenter = CapturedChart::default();
            session.render_chart(&presenter);
            Ok(json!({
                "statistics": session.statistics(),
                "chart": session.chart_kind(),
                "series": presenter.0.into_inner(),
            }))
        }
    }
}

async fn submit<R>(session: &mut ApartmentSession<R>) -> Result<Value>
where
    R: ApartmentRepository,
{
    let notice = session.submit().await.map_err(report)?;
    Ok(json!({
        "notice": notice.to_string(),
        "apartments": session.records(),
    }))
}

fn parse_id(raw: String) -> Result<ApartmentId> {
    ApartmentId::new(raw).map_err(|error| eyre!(error))
}

fn report(error: DomainError) -> color_eyre::Report {
    let notice = Notice::from_error(&error).to_string();
    color_eyre::Report::new(error).wrap_err(notice)
}
