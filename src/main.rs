use anyhow::Context;
use appointment_scheduler::{
    backend::AppointmentBackend,
    configuration::{Command, Configuration},
    configuration_handler::ConfigurationHandler,
    http::create_app,
    local_appointments::LocalAppointments,
    scheduler::Scheduler,
    store_client::HttpAppointmentStore,
};
use chrono::{Local, NaiveDate};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let configuration = ConfigurationHandler::parse_arguments();
    match run(&configuration).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(configuration: &impl Configuration) -> anyhow::Result<()> {
    let today = Local::now().date_naive();

    match configuration.command() {
        Command::Day { date } => {
            let scheduler = connect(configuration, date.unwrap_or(today)).await?;
            print_day(&scheduler);
        }
        Command::Book { date, slot, name } => {
            let mut scheduler = connect(configuration, date.unwrap_or(today)).await?;
            scheduler.select_time(*slot)?;
            scheduler.set_user_name(name.as_str());
            let appointment = scheduler.book().await?;
            println!("Booked {} for {}\n", appointment.time, appointment.name);
            print_day(&scheduler);
        }
        Command::Cancel { time } => {
            let mut scheduler = connect(configuration, time.date).await?;
            scheduler.cancel(*time).await?;
            println!("Cancelled {time}\n");
            print_day(&scheduler);
        }
        Command::Serve { port } => {
            let address = format!("0.0.0.0:{port}");
            let listener = tokio::net::TcpListener::bind(&address)
                .await
                .with_context(|| format!("Failed to bind {address}"))?;
            info!("Appointment store accessible at {address}");
            axum::serve(listener, create_app(LocalAppointments::default())).await?;
        }
    }
    Ok(())
}

async fn connect(
    configuration: &impl Configuration,
    date: NaiveDate,
) -> anyhow::Result<Scheduler<HttpAppointmentStore>> {
    let store =
        HttpAppointmentStore::new(configuration.store_url(), configuration.request_timeout())?;
    let mut scheduler = Scheduler::new(store, date);
    scheduler.load().await.with_context(|| {
        format!(
            "Failed to load appointments from {}",
            configuration.store_url()
        )
    })?;
    Ok(scheduler)
}

fn print_day<B: AppointmentBackend>(scheduler: &Scheduler<B>) {
    println!("Appointments on {}", scheduler.selected_date());
    let day = scheduler.day_appointments();
    if day.is_empty() {
        println!("  none");
    }
    for appointment in day {
        println!("  {:>5}  {}", appointment.time.slot.to_string(), appointment.name);
    }

    let slots: Vec<String> = scheduler
        .available_slots()
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("\nAvailable slots ({})", slots.len());
    println!("  {}", slots.join(" "));
}
