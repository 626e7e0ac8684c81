use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use daycare_intake::config::{AppConfig, AppEnvironment};
use daycare_intake::error::AppError;
use daycare_intake::intake::{
    intake_router, ContactForm, EnrollmentForm, IntakeError, IntakeService,
};
use daycare_intake::mail::ConfiguredDispatcher;
use daycare_intake::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Daycare Intake Service",
    about = "Run the form intake service or push a submission through it from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Push a single submission through the configured dispatcher
    Submit {
        #[command(subcommand)]
        command: SubmitCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum SubmitCommand {
    /// Submit a contact inquiry
    Contact(ContactArgs),
    /// Submit an enrollment request
    Enrollment(EnrollmentArgs),
}

#[derive(Args, Debug)]
struct ContactArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    subject: String,
    #[arg(long)]
    message: String,
}

#[derive(Args, Debug)]
struct EnrollmentArgs {
    #[arg(long)]
    parent_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    child_name: String,
    /// Child's date of birth (YYYY-MM-DD)
    #[arg(long)]
    child_dob: String,
    /// Program code (infants, toddlers, preschool, mixed)
    #[arg(long)]
    program: String,
    /// Schedule code (fulltime, parttime, saturday)
    #[arg(long)]
    schedule: String,
    /// Desired start date (YYYY-MM-DD)
    #[arg(long)]
    start_date: String,
    #[arg(long, default_value = "")]
    message: String,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Submit { command } => run_submit(command).await,
    }
}

fn build_service(config: &AppConfig) -> Result<IntakeService<ConfiguredDispatcher>, AppError> {
    if config.environment == AppEnvironment::Production && config.mail.app_password.is_none() {
        warn!("EMAIL_APP_PASSWORD not set; falling back to simulated dispatch");
    }

    let dispatcher = ConfiguredDispatcher::from_config(config)?;
    Ok(IntakeService::new(
        Arc::new(dispatcher),
        config.business.clone(),
        config.mail.send_confirmation,
    ))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let service = Arc::new(build_service(&config)?);
    let mode = service.mode();

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(intake_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, mode = mode.label(), "form intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn run_submit(command: SubmitCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let service = build_service(&config)?;

    let outcome = match command {
        SubmitCommand::Contact(args) => {
            let form = ContactForm {
                name: args.name,
                email: args.email,
                phone: args.phone,
                subject: args.subject,
                message: args.message,
            };
            service.submit_contact(form).await
        }
        SubmitCommand::Enrollment(args) => {
            let form = EnrollmentForm {
                parent_name: args.parent_name,
                email: args.email,
                phone: args.phone,
                child_name: args.child_name,
                child_dob: args.child_dob,
                program: args.program,
                schedule: args.schedule,
                start_date: args.start_date,
                message: args.message,
            };
            service.submit_enrollment(form).await
        }
    };

    match outcome {
        Ok(ack) => {
            println!("{}", ack.message);
            Ok(())
        }
        Err(IntakeError::Validation(rejection)) => {
            println!("Submission rejected:");
            for error in &rejection.errors {
                println!("- {}: {}", error.field, error.message);
            }
            Ok(())
        }
        Err(IntakeError::Dispatch(error)) => Err(AppError::Dispatch(error)),
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
