// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use shift_grid::{
    DEFAULT_CACHE_TTL, DEFAULT_IO_TIMEOUT, EditOutcome, FlushPolicy, FlushReport, GridSnapshot,
    MonthDirection, MonthState, Notice, SyncConfig, SyncController, SyncError,
};
use shift_grid_api::{EmailDraft, ExportError, compose_email, csv_string};
use shift_grid_domain::{
    DomainError, Employee, EmployeeId, MonthKey, ShiftCode, ShiftType, ShiftValue, format_iso_date,
    parse_iso_date,
};
use shift_grid_persistence::Backend;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use time::Date;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use live::{GridEvent, GridEventBroadcaster};

/// ShiftGrid Server - HTTP server for the ShiftGrid scheduling system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file.
    #[arg(long, conflicts_with = "data_dir")]
    database: Option<String>,

    /// Directory for the local JSON document store. Without this or
    /// `--database`, an in-memory backend is used.
    #[arg(long)]
    data_dir: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Starting month (`YYYY-MM`). Defaults to the current month.
    #[arg(long)]
    month: Option<String>,

    /// When queued edits are pushed to the backing store.
    #[arg(long, value_enum, default_value_t = FlushMode::Debounced)]
    flush: FlushMode,

    /// Quiet window before a debounced flush runs, in seconds.
    #[arg(long, default_value_t = 2)]
    debounce_seconds: u64,

    /// Lifetime of a cached month, in seconds.
    #[arg(long, default_value_t = DEFAULT_CACHE_TTL.as_secs())]
    cache_ttl_seconds: u64,

    /// Upper bound on a single backing-store call, in seconds.
    #[arg(long, default_value_t = DEFAULT_IO_TIMEOUT.as_secs())]
    io_timeout_seconds: u64,

    /// Warm the cache for the next month when navigating.
    #[arg(long)]
    prefetch: bool,
}

/// Command-line spelling of the flush policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FlushMode {
    /// Every edit saves immediately.
    Immediate,
    /// Edits save once a quiet window has elapsed.
    Debounced,
    /// Edits wait for an explicit save.
    Manual,
}

/// Application state shared across handlers.
///
/// The controller owns all grid state and sits behind one async mutex, so
/// handlers serialize their mutations; the broadcaster fans change events
/// out to live stream clients.
#[derive(Clone)]
struct AppState {
    /// The synchronization controller over the selected backend.
    controller: Arc<Mutex<SyncController<Backend>>>,
    /// Broadcast channel for live grid events.
    events: Arc<GridEventBroadcaster>,
}

/// API request for editing one grid cell.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct EditCellRequest {
    /// The employee the cell belongs to.
    employee_id: i64,
    /// The cell's date (ISO `YYYY-MM-DD`).
    date: String,
    /// The new cell value: a shift code, or empty/`−` to unset.
    value: String,
}

/// API request for switching the active month.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ChangeMonthRequest {
    /// Which way to move.
    direction: MonthDirection,
}

/// API request for adding or updating an employee.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct EmployeeRequest {
    /// Family name (required).
    family_name: String,
    /// Optional given name.
    given_name: Option<String>,
}

/// API request for adding or updating a shift type.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ShiftTypeRequest {
    /// Display symbol.
    code: String,
    /// Human-readable name.
    label: String,
    /// Rendering color as a hex string.
    color: String,
    /// Optional free-text working hours.
    hours: Option<String>,
}

/// Query parameters for the month bulk delete.
#[derive(Debug, Deserialize)]
struct DeleteQuery {
    /// Explicit confirmation; the delete is refused without it.
    #[serde(default)]
    confirm: bool,
}

/// One grid cell in a JSON response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CellResponse {
    /// The employee the cell belongs to.
    employee_id: i64,
    /// The cell's date (ISO `YYYY-MM-DD`).
    date: String,
    /// The resolved cell value.
    value: String,
}

/// Serializable representation of the grid for JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridResponse {
    /// The month being presented (`YYYY-MM`).
    month: String,
    /// Every day of the month (ISO `YYYY-MM-DD`).
    days: Vec<String>,
    /// The employee rows.
    employees: Vec<Employee>,
    /// The shift-type legend.
    shift_types: Vec<ShiftType>,
    /// The non-empty cells, resolved through the catalog.
    cells: Vec<CellResponse>,
}

/// API response for write operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    /// Success indicator.
    success: bool,
    /// Optional message.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    /// Notices drained from the controller by this operation.
    notices: Vec<Notice>,
}

/// API response for the add-employee endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EmployeeCreatedResponse {
    /// The id assigned to the new employee.
    id: i64,
    /// Notices drained from the controller by this operation.
    notices: Vec<Notice>,
}

/// API response for the explicit save endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveResponse {
    /// Queue entries successfully persisted.
    saved: usize,
    /// Queue entries that failed and remain queued for retry.
    failed: usize,
    /// Notices drained from the controller by this operation.
    notices: Vec<Notice>,
}

/// API response for the month bulk delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeleteResponse {
    /// Store records cleared by the delete.
    removed: usize,
    /// Notices drained from the controller by this operation.
    notices: Vec<Notice>,
}

/// API response for the status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StatusResponse {
    /// The active month (`YYYY-MM`).
    month: String,
    /// Load state of the active month.
    state: String,
    /// Cells awaiting persistence.
    pending: usize,
    /// Whether a backing-store operation is in flight.
    busy: bool,
}

/// API response for listing employees.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RosterResponse {
    /// The employees in display order.
    employees: Vec<Employee>,
}

/// API response for listing shift types.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogResponse {
    /// The shift types in display order.
    shift_types: Vec<ShiftType>,
    /// Code renames applied to stored assignments at read time.
    renames: BTreeMap<String, String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<SyncError> for HttpError {
    fn from(err: SyncError) -> Self {
        let status: StatusCode = match &err {
            SyncError::Domain(
                DomainError::EmployeeNotFound(_) | DomainError::ShiftTypeNotFound(_),
            ) => StatusCode::NOT_FOUND,
            SyncError::Domain(_) => StatusCode::BAD_REQUEST,
            SyncError::MonthNotLoaded(_) => StatusCode::CONFLICT,
            SyncError::Gateway(_) => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<ExportError> for HttpError {
    fn from(err: ExportError) -> Self {
        error!(error = %err, "Export failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Export failed: {err}"),
        }
    }
}

/// Converts a `GridSnapshot` to a `GridResponse`.
fn grid_to_response(snapshot: &GridSnapshot) -> GridResponse {
    GridResponse {
        month: snapshot.month().to_string(),
        days: snapshot
            .days()
            .iter()
            .map(|day| format_iso_date(*day))
            .collect(),
        employees: snapshot.employees().to_vec(),
        shift_types: snapshot.shift_types().to_vec(),
        cells: snapshot
            .cells()
            .iter()
            .map(|(cell, value)| CellResponse {
                employee_id: cell.employee.value(),
                date: format_iso_date(cell.date),
                value: value.to_string(),
            })
            .collect(),
    }
}

/// Wire label of a month load state.
const fn month_state_label(state: MonthState) -> &'static str {
    match state {
        MonthState::NotLoaded => "not_loaded",
        MonthState::Loading => "loading",
        MonthState::Loaded => "loaded",
    }
}

/// Handler for GET `/grid` endpoint.
///
/// Returns the grid of the active month.
async fn handle_get_grid(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<GridResponse>, HttpError> {
    debug!("Handling grid read request");

    let controller = app_state.controller.lock().await;
    let snapshot: GridSnapshot = controller.snapshot()?;
    drop(controller);

    Ok(Json(grid_to_response(&snapshot)))
}

/// Handler for GET `/grid/{month}` endpoint.
///
/// Makes the month active, loading it from the cache or the backing
/// store, and returns the resulting grid.
async fn handle_get_month(
    AxumState(app_state): AxumState<AppState>,
    Path(month): Path<String>,
) -> Result<Json<GridResponse>, HttpError> {
    info!(month = %month, "Handling month read request");

    let month: MonthKey = month.parse().map_err(SyncError::Domain)?;

    let mut controller = app_state.controller.lock().await;
    controller.load_month(month, false).await?;
    let snapshot: GridSnapshot = controller.snapshot()?;
    drop(controller);

    app_state.events.broadcast(&GridEvent::MonthLoaded {
        month: month.to_string(),
    });

    Ok(Json(grid_to_response(&snapshot)))
}

/// Handler for POST `/grid/{month}/refresh` endpoint.
///
/// Invalidates the month's cache entry and re-fetches it from the
/// backing store.
async fn handle_refresh_month(
    AxumState(app_state): AxumState<AppState>,
    Path(month): Path<String>,
) -> Result<Json<GridResponse>, HttpError> {
    info!(month = %month, "Handling forced refresh request");

    let month: MonthKey = month.parse().map_err(SyncError::Domain)?;

    let mut controller = app_state.controller.lock().await;
    controller.load_month(month, true).await?;
    let snapshot: GridSnapshot = controller.snapshot()?;
    drop(controller);

    app_state.events.broadcast(&GridEvent::MonthLoaded {
        month: month.to_string(),
    });

    Ok(Json(grid_to_response(&snapshot)))
}

/// Handler for PUT `/cells` endpoint.
///
/// Applies one optimistic cell edit and queues it for persistence.
async fn handle_edit_cell(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<EditCellRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        employee_id = req.employee_id,
        date = %req.date,
        value = %req.value,
        "Handling edit_cell request"
    );

    let date: Date = parse_iso_date(&req.date).map_err(SyncError::Domain)?;
    let value: ShiftValue = ShiftValue::from_storage(&req.value);

    let mut controller = app_state.controller.lock().await;
    let outcome: EditOutcome = controller
        .edit_cell(EmployeeId::new(req.employee_id), date, value.clone())
        .await?;
    let notices: Vec<Notice> = controller.drain_notices();
    drop(controller);

    let message: String = match outcome {
        EditOutcome::Unchanged => String::from("Cell already held that value"),
        EditOutcome::Queued => String::from("Edit applied and queued"),
        EditOutcome::Flushed(report) => {
            format!("Edit applied; saved {} change(s)", report.saved)
        }
    };
    app_state.events.broadcast(&GridEvent::CellEdited {
        employee_id: req.employee_id,
        date: req.date,
        value: value.to_string(),
    });

    Ok(Json(WriteResponse {
        success: true,
        message: Some(message),
        notices,
    }))
}

/// Handler for POST `/save` endpoint.
///
/// Pushes every queued change to the backing store.
async fn handle_save(AxumState(app_state): AxumState<AppState>) -> Json<SaveResponse> {
    info!("Handling save request");

    let mut controller = app_state.controller.lock().await;
    let report: FlushReport = controller.flush().await;
    let notices: Vec<Notice> = controller.drain_notices();
    drop(controller);

    if report.saved > 0 || report.failed > 0 {
        app_state.events.broadcast(&GridEvent::ChangesSaved {
            saved: report.saved,
            failed: report.failed,
        });
    }

    Json(SaveResponse {
        saved: report.saved,
        failed: report.failed,
        notices,
    })
}

/// Handler for DELETE `/grid/{month}` endpoint.
///
/// Deletes every shift of one month. Refused without `confirm=true`.
async fn handle_delete_month(
    AxumState(app_state): AxumState<AppState>,
    Path(month): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(month = %month, confirm = query.confirm, "Handling delete_month request");

    if !query.confirm {
        return Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: String::from("Deleting a month requires confirm=true"),
        });
    }
    let month: MonthKey = month.parse().map_err(SyncError::Domain)?;

    let mut controller = app_state.controller.lock().await;
    let removed: usize = controller.delete_all(month).await?;
    let notices: Vec<Notice> = controller.drain_notices();
    drop(controller);

    app_state.events.broadcast(&GridEvent::MonthCleared {
        month: month.to_string(),
    });

    Ok(Json(DeleteResponse { removed, notices }))
}

/// Handler for POST `/grid/change` endpoint.
///
/// Flushes pending changes, then moves the active month one step.
async fn handle_change_month(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ChangeMonthRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(direction = ?req.direction, "Handling change_month request");

    let mut controller = app_state.controller.lock().await;
    controller.change_month(req.direction).await?;
    let month: MonthKey = controller.active_month();
    let notices: Vec<Notice> = controller.drain_notices();
    drop(controller);

    app_state.events.broadcast(&GridEvent::MonthChanged {
        month: month.to_string(),
    });

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Moved to {month}")),
        notices,
    }))
}

/// Handler for GET `/status` endpoint.
///
/// Returns the active month, its load state, the pending-change count,
/// and the busy flag.
async fn handle_status(AxumState(app_state): AxumState<AppState>) -> Json<StatusResponse> {
    debug!("Handling status request");

    let controller = app_state.controller.lock().await;
    let month: MonthKey = controller.active_month();
    let response: StatusResponse = StatusResponse {
        month: month.to_string(),
        state: String::from(month_state_label(controller.state_of(month))),
        pending: controller.pending_count(),
        busy: controller.is_busy(),
    };
    drop(controller);

    Json(response)
}

/// Handler for GET `/employees` endpoint.
///
/// Lists the employee roster.
async fn handle_list_employees(AxumState(app_state): AxumState<AppState>) -> Json<RosterResponse> {
    debug!("Handling list_employees request");

    let controller = app_state.controller.lock().await;
    let employees: Vec<Employee> = controller.roster().employees().to_vec();
    drop(controller);

    Json(RosterResponse { employees })
}

/// Handler for POST `/employees` endpoint.
///
/// Adds an employee to the roster.
async fn handle_add_employee(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<EmployeeRequest>,
) -> Result<Json<EmployeeCreatedResponse>, HttpError> {
    info!(family_name = %req.family_name, "Handling add_employee request");

    let mut controller = app_state.controller.lock().await;
    let id: EmployeeId = controller
        .add_employee(req.family_name, req.given_name)
        .await?;
    let count: usize = controller.roster().len();
    let notices: Vec<Notice> = controller.drain_notices();
    drop(controller);

    app_state
        .events
        .broadcast(&GridEvent::RosterChanged { count });

    Ok(Json(EmployeeCreatedResponse {
        id: id.value(),
        notices,
    }))
}

/// Handler for PUT `/employees/{id}` endpoint.
///
/// Replaces an employee's names.
async fn handle_update_employee(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<EmployeeRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(id = id, "Handling update_employee request");

    let mut controller = app_state.controller.lock().await;
    controller
        .update_employee(EmployeeId::new(id), req.family_name, req.given_name)
        .await?;
    let count: usize = controller.roster().len();
    let notices: Vec<Notice> = controller.drain_notices();
    drop(controller);

    app_state
        .events
        .broadcast(&GridEvent::RosterChanged { count });

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Updated employee {id}")),
        notices,
    }))
}

/// Handler for GET `/shift_types` endpoint.
///
/// Lists the shift-type catalog and its active renames.
async fn handle_list_shift_types(
    AxumState(app_state): AxumState<AppState>,
) -> Json<CatalogResponse> {
    debug!("Handling list_shift_types request");

    let controller = app_state.controller.lock().await;
    let response: CatalogResponse = CatalogResponse {
        shift_types: controller.catalog().types().to_vec(),
        renames: controller.catalog().renames().clone(),
    };
    drop(controller);

    Json(response)
}

/// Handler for POST `/shift_types` endpoint.
///
/// Adds a shift type to the catalog.
async fn handle_add_shift_type(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ShiftTypeRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(code = %req.code, "Handling add_shift_type request");

    let definition: ShiftType =
        ShiftType::new(&req.code, &req.label, &req.color, req.hours.as_deref());

    let mut controller = app_state.controller.lock().await;
    controller.add_shift_type(definition).await?;
    let count: usize = controller.catalog().types().len();
    let notices: Vec<Notice> = controller.drain_notices();
    drop(controller);

    app_state
        .events
        .broadcast(&GridEvent::CatalogChanged { count });

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Added shift type '{}'", req.code)),
        notices,
    }))
}

/// Handler for PUT `/shift_types/{code}` endpoint.
///
/// Replaces a shift type's definition; a code change records a rename so
/// stored assignments resolve to the new code at read time.
async fn handle_update_shift_type(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
    Json(req): Json<ShiftTypeRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(code = %code, new_code = %req.code, "Handling update_shift_type request");

    let replacement: ShiftType =
        ShiftType::new(&req.code, &req.label, &req.color, req.hours.as_deref());

    let mut controller = app_state.controller.lock().await;
    controller
        .update_shift_type(&ShiftCode::new(&code), replacement)
        .await?;
    let count: usize = controller.catalog().types().len();
    let notices: Vec<Notice> = controller.drain_notices();
    drop(controller);

    app_state
        .events
        .broadcast(&GridEvent::CatalogChanged { count });

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Updated shift type '{code}'")),
        notices,
    }))
}

/// Handler for GET `/export/csv` endpoint.
///
/// Renders the active month as CSV.
async fn handle_export_csv(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Response, HttpError> {
    info!("Handling csv export request");

    let controller = app_state.controller.lock().await;
    let snapshot: GridSnapshot = controller.snapshot()?;
    drop(controller);

    let rendered: String = csv_string(&snapshot)?;

    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], rendered).into_response())
}

/// Handler for GET `/export/email` endpoint.
///
/// Drafts the monthly announcement mail for the active month.
async fn handle_export_email(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<EmailDraft>, HttpError> {
    info!("Handling email export request");

    let controller = app_state.controller.lock().await;
    let snapshot: GridSnapshot = controller.snapshot()?;
    drop(controller);

    Ok(Json(compose_email(&snapshot)))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/grid", get(handle_get_grid))
        .route("/grid/change", post(handle_change_month))
        .route("/grid/{month}", get(handle_get_month))
        .route("/grid/{month}", delete(handle_delete_month))
        .route("/grid/{month}/refresh", post(handle_refresh_month))
        .route("/cells", put(handle_edit_cell))
        .route("/save", post(handle_save))
        .route("/status", get(handle_status))
        .route("/employees", get(handle_list_employees))
        .route("/employees", post(handle_add_employee))
        .route("/employees/{id}", put(handle_update_employee))
        .route("/shift_types", get(handle_list_shift_types))
        .route("/shift_types", post(handle_add_shift_type))
        .route("/shift_types/{code}", put(handle_update_shift_type))
        .route("/export/csv", get(handle_export_csv))
        .route("/export/email", get(handle_export_email))
        .route("/live", get(live::live_events_handler))
        .with_state(app_state)
}

/// Builds the controller configuration from command-line arguments.
const fn sync_config(args: &Args) -> SyncConfig {
    SyncConfig {
        flush_policy: match args.flush {
            FlushMode::Immediate => FlushPolicy::Immediate,
            FlushMode::Debounced => {
                FlushPolicy::Debounced(Duration::from_secs(args.debounce_seconds))
            }
            FlushMode::Manual => FlushPolicy::Manual,
        },
        cache_ttl: Duration::from_secs(args.cache_ttl_seconds),
        io_timeout: Duration::from_secs(args.io_timeout_seconds),
        prefetch_adjacent: args.prefetch,
    }
}

/// Periodically flushes the queue once a debounce deadline passes.
///
/// With an immediate or manual flush policy no deadline is ever armed,
/// so the loop stays idle.
async fn drive_flushes(app_state: AppState) {
    let mut ticker: tokio::time::Interval = tokio::time::interval(Duration::from_millis(250));
    loop {
        ticker.tick().await;
        let mut controller = app_state.controller.lock().await;
        let flushed: Option<FlushReport> = controller.flush_if_due(Instant::now()).await;
        drop(controller);
        if let Some(report) = flushed {
            app_state.events.broadcast(&GridEvent::ChangesSaved {
                saved: report.saved,
                failed: report.failed,
            });
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing ShiftGrid Server");

    // Select the backend from CLI arguments
    let backend: Backend = if let Some(db_path) = &args.database {
        info!("Using the SQLite backend at: {}", db_path);
        Backend::sqlite(db_path)?
    } else if let Some(dir) = &args.data_dir {
        info!("Using the local document store at: {}", dir);
        Backend::local_store(dir)?
    } else {
        info!("Using the in-memory backend");
        Backend::memory()
    };

    let start: MonthKey = match &args.month {
        Some(raw) => raw.parse()?,
        None => MonthKey::from_date(time::OffsetDateTime::now_utc().date()),
    };
    let config: SyncConfig = sync_config(&args);

    let mut controller: SyncController<Backend> = SyncController::new(backend, start, config);
    controller.bootstrap().await?;
    if let Err(err) = controller.load_month(start, false).await {
        warn!("Starting with an empty grid; initial load failed: {err}");
    }

    let app_state: AppState = AppState {
        controller: Arc::new(Mutex::new(controller)),
        events: Arc::new(GridEventBroadcaster::new()),
    };

    // Drive debounced flushes in the background
    tokio::spawn(drive_flushes(app_state.clone()));

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
