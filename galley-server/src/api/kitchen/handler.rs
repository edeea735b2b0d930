//! Kitchen Orders API Handlers
//!
//! - List the kitchen queue (filtered, searched, sorted, paginated)
//! - Single-order detail
//! - Status transition
//! - Staff assignment
//! - Daily stats
//!
//! Every broadcast happens after the store write has succeeded and never
//! fails the request.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentStaff;
use crate::core::ServerState;
use crate::db::models::KitchenOrder;
use crate::db::repository::{OrderRepository, StaffRepository};
use crate::kitchen::queue::{self, QueueSelection, SortDirection, StatusFilter};
use crate::kitchen::{self, DailyStats, TaskDecoration};
use crate::utils::time::today_window;
use crate::utils::{AppError, AppResponse, AppResult, Pagination};
use shared::order::OrderStatus;
use shared::util::now_millis;

/// One row of the kitchen queue: the order plus its read-time decoration
#[derive(Debug, Serialize)]
pub struct QueueEntry {
    #[serde(flatten)]
    pub order: KitchenOrder,
    #[serde(flatten)]
    pub task: TaskDecoration,
}

fn decorated(order: KitchenOrder, now: i64) -> QueueEntry {
    QueueEntry {
        task: kitchen::decorate(&order, now),
        order,
    }
}

// ============================================================================
// Queue listing
// ============================================================================

/// Query params for the kitchen queue
#[derive(Debug, Deserialize, Validate)]
pub struct ListQuery {
    /// Status filter; `all` disables the status restriction
    pub status: Option<String>,
    /// Substring search over customer name/email/phone/room number
    pub search: Option<String>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u32,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

/// GET /api/kitchen/orders - the kitchen work queue
pub async fn list(
    State(state): State<ServerState>,
    _staff: CurrentStaff,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Vec<QueueEntry>>>> {
    query
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let status = StatusFilter::parse(query.status.as_deref())
        .map_err(|e| AppError::validation(format!("status: {e}")))?;

    let sort_field = match query.sort_by.as_deref() {
        None | Some("") => queue::DEFAULT_SORT_FIELD,
        Some(field) => queue::sort_field(field)
            .ok_or_else(|| AppError::validation(format!("sortBy: unknown field '{field}'")))?,
    };
    let sort_dir = SortDirection::parse(query.sort_order.as_deref())
        .map_err(|e| AppError::validation(format!("sortOrder: {e}")))?;

    let search = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let selection = QueueSelection { status, search };

    let (_, day_end) = today_window(chrono::Utc::now(), state.config.timezone);

    let repo = OrderRepository::new(state.db.clone());
    let (orders, total) = repo
        .find_queue(
            &selection,
            sort_field,
            sort_dir,
            query.page,
            query.limit,
            day_end,
        )
        .await?;

    let now = now_millis();
    let entries: Vec<QueueEntry> = orders.into_iter().map(|o| decorated(o, now)).collect();
    let pagination = Pagination::compute(query.page, query.limit, entries.len(), total);

    Ok(Json(AppResponse::with_pagination(entries, pagination)))
}

// ============================================================================
// Single order
// ============================================================================

/// GET /api/kitchen/orders/{id} - single-order detail
pub async fn get_by_id(
    State(state): State<ServerState>,
    _staff: CurrentStaff,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<QueueEntry>>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;

    Ok(Json(AppResponse::success(decorated(order, now_millis()))))
}

// ============================================================================
// Status transition
// ============================================================================

/// Body of the status transition request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    pub status: String,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// PUT /api/kitchen/orders/{id}/status - status transition
///
/// Fails without touching the order when the target is not reachable from
/// the current status; on success appends exactly one history entry and
/// broadcasts to the kitchen channel.
pub async fn update_status(
    State(state): State<ServerState>,
    staff: CurrentStaff,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> AppResult<Json<AppResponse<KitchenOrder>>> {
    body.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let target = OrderStatus::parse(&body.status)
        .ok_or_else(|| AppError::validation(format!("status: unknown status '{}'", body.status)))?;

    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;

    let plan = kitchen::plan_transition(&order, target, &staff.id, body.notes, now_millis())?;

    let rid = order
        .id
        .clone()
        .ok_or_else(|| AppError::internal("stored order has no record id"))?;
    let updated = repo.apply_transition(&rid, &plan).await?;

    tracing::info!(
        order_id = %updated.id_string(),
        from = %order.status,
        to = %target,
        actor = %staff.id,
        "Order status updated"
    );

    state.broadcaster.order_status_changed(&updated);

    Ok(Json(AppResponse::with_message(
        updated,
        format!("Order status updated to '{target}'"),
    )))
}

// ============================================================================
// Assignment
// ============================================================================

/// Body of the assignment request
#[derive(Debug, Deserialize, Validate)]
pub struct AssignRequest {
    #[serde(rename = "staffId")]
    #[validate(length(min = 1))]
    pub staff_id: String,
}

/// PUT /api/kitchen/orders/{id}/assign - bind an order to a staff member
///
/// Manager/admin actors only. Assignment never changes the order status;
/// the audit entry is appended at the current status. Reassignment simply
/// overwrites.
pub async fn assign(
    State(state): State<ServerState>,
    actor: CurrentStaff,
    Path(id): Path<String>,
    Json(body): Json<AssignRequest>,
) -> AppResult<Json<AppResponse<KitchenOrder>>> {
    body.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if !actor.role.can_assign() {
        return Err(AppError::forbidden(
            "Assignment requires manager or admin role",
        ));
    }

    let staff_repo = StaffRepository::new(state.db.clone());
    let staff = staff_repo
        .find_by_id(&body.staff_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Staff {} not found", body.staff_id)))?;

    kitchen::assignment::ensure_assignable(&staff)?;

    let order_repo = OrderRepository::new(state.db.clone());
    let order = order_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;

    let entry = kitchen::assignment::assignment_entry(&order, &staff, &actor.id, now_millis());

    let order_rid = order
        .id
        .clone()
        .ok_or_else(|| AppError::internal("stored order has no record id"))?;
    let staff_rid = staff
        .id
        .clone()
        .ok_or_else(|| AppError::internal("stored staff has no record id"))?;

    let updated = order_repo
        .apply_assignment(&order_rid, &staff_rid, &entry)
        .await?;

    tracing::info!(
        order_id = %updated.id_string(),
        assignee = %staff.id_string(),
        actor = %actor.id,
        "Order assigned"
    );

    state
        .broadcaster
        .food_task_assigned(&updated, &staff.id_string());

    Ok(Json(AppResponse::with_message(
        updated,
        format!("Order assigned to {}", staff.name),
    )))
}

// ============================================================================
// Stats
// ============================================================================

/// GET /api/kitchen/stats - per-status counts for today
pub async fn stats(
    State(state): State<ServerState>,
    _staff: CurrentStaff,
) -> AppResult<Json<AppResponse<DailyStats>>> {
    let (start, end) = today_window(chrono::Utc::now(), state.config.timezone);

    let repo = OrderRepository::new(state.db.clone());
    let rows = repo.status_counts(start, end).await?;

    Ok(Json(AppResponse::success(DailyStats::from_counts(&rows))))
}
