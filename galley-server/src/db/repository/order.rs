//! Order Repository
//!
//! All kitchen-order reads and writes. Queue reads are single-pass queries
//! with caller-supplied pagination; writes are single-record updates, atomic
//! at the store boundary. There is no version check: concurrent writers on
//! one record race and the later write wins.

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{KitchenOrder, ORDER_TABLE, OrderCreate};
use crate::kitchen::lifecycle::TransitionPlan;
use crate::kitchen::queue::{QueueSelection, SortDirection, StatusFilter};
use serde::Deserialize;
use shared::order::{OrderStatus, StatusEntry};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

#[derive(Debug, Deserialize)]
struct TotalRow {
    total: i64,
}

#[derive(Debug, Deserialize)]
struct StatusCountRow {
    status: OrderStatus,
    count: i64,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create an order.
    ///
    /// Entry point for the ordering collaborator (and tests); the kitchen
    /// API itself never creates orders. Status defaults to `pending`.
    pub async fn create(&self, data: OrderCreate) -> RepoResult<KitchenOrder> {
        if data.items.is_empty() {
            return Err(RepoError::Validation(
                "order must contain at least one item".to_string(),
            ));
        }

        let now = now_millis();
        let status = data.status.unwrap_or(OrderStatus::Pending);

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE type::table($table) CONTENT {
                    items: $items,
                    status: $status,
                    kitchen_status: $status,
                    order_type: $order_type,
                    is_part_of_meal_plan: $is_part_of_meal_plan,
                    scheduled_date: $scheduled_date,
                    total_price: $total_price,
                    priority: $priority,
                    status_history: [],
                    customer: $customer,
                    created_at: $now,
                    updated_at: $now
                } RETURN AFTER"#,
            )
            .bind(("table", ORDER_TABLE))
            .bind(("items", data.items))
            .bind(("status", status))
            .bind(("order_type", data.order_type))
            .bind(("is_part_of_meal_plan", data.is_part_of_meal_plan))
            .bind(("scheduled_date", data.scheduled_date))
            .bind(("total_price", data.total_price))
            .bind(("priority", data.priority))
            .bind(("customer", data.customer))
            .bind(("now", now))
            .await?;

        let created: Option<KitchenOrder> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find an order by id (full "kitchen_order:key" or bare key)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<KitchenOrder>> {
        let rid = parse_record_id(ORDER_TABLE, id)?;
        let order: Option<KitchenOrder> = self.base.db().select(rid).await?;
        Ok(order)
    }

    /// Run the kitchen queue query.
    ///
    /// `day_end` is the start of tomorrow in the business timezone; the
    /// meal-plan rule admits scheduled orders due before it. Returns the
    /// page of orders plus the total match count.
    pub async fn find_queue(
        &self,
        selection: &QueueSelection,
        sort_field: &'static str,
        sort_dir: SortDirection,
        page: u32,
        limit: u32,
        day_end: i64,
    ) -> RepoResult<(Vec<KitchenOrder>, i64)> {
        let where_clause = selection.where_clause();
        let skip = (page.max(1) as i64 - 1) * limit as i64;

        // sort field and direction come from a closed whitelist, the rest
        // of the clause is parameterised
        let rows_sql = format!(
            "SELECT * FROM {ORDER_TABLE} WHERE {where_clause} \
             ORDER BY {sort_field} {} LIMIT {limit} START {skip}",
            sort_dir.as_sql(),
        );
        let count_sql =
            format!("SELECT count() AS total FROM {ORDER_TABLE} WHERE {where_clause} GROUP ALL");

        let status_bind: Option<String> = match &selection.status {
            StatusFilter::Exact(status) => Some(status.as_str().to_string()),
            _ => None,
        };

        let mut result = self
            .base
            .db()
            .query(rows_sql)
            .query(count_sql)
            .bind(("status", status_bind))
            .bind(("search", selection.search.clone()))
            .bind(("day_end", day_end))
            .await?;

        let orders: Vec<KitchenOrder> = result.take(0)?;
        let totals: Vec<TotalRow> = result.take(1)?;
        let total = totals.first().map(|row| row.total).unwrap_or(0);

        Ok((orders, total))
    }

    /// Apply an accepted transition in one atomic record update.
    ///
    /// Sets both status fields, stamps the actor, and appends exactly one
    /// history entry. The caller has already validated the transition.
    pub async fn apply_transition(
        &self,
        id: &RecordId,
        plan: &TransitionPlan,
    ) -> RepoResult<KitchenOrder> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $order SET
                    status = $status,
                    kitchen_status = $status,
                    updated_by = $actor,
                    updated_at = $now,
                    status_history += $entry
                RETURN AFTER"#,
            )
            .bind(("order", id.clone()))
            .bind(("status", plan.target))
            .bind(("actor", plan.entry.updated_by.clone()))
            .bind(("now", plan.entry.updated_at))
            .bind(("entry", plan.entry.clone()))
            .await?;

        result
            .take::<Option<KitchenOrder>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Bind an order to a staff member.
    ///
    /// Overwrites any previous assignment; the prior assignee remains
    /// visible only through the appended history entry.
    pub async fn apply_assignment(
        &self,
        id: &RecordId,
        staff_id: &RecordId,
        entry: &StatusEntry,
    ) -> RepoResult<KitchenOrder> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $order SET
                    assigned_staff = $staff,
                    assigned_at = $now,
                    assigned_by = $actor,
                    updated_at = $now,
                    status_history += $entry
                RETURN AFTER"#,
            )
            .bind(("order", id.clone()))
            .bind(("staff", staff_id.clone()))
            .bind(("now", entry.updated_at))
            .bind(("actor", entry.updated_by.clone()))
            .bind(("entry", entry.clone()))
            .await?;

        result
            .take::<Option<KitchenOrder>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Per-status counts of orders created in `[start, end)`
    pub async fn status_counts(
        &self,
        start: i64,
        end: i64,
    ) -> RepoResult<Vec<(OrderStatus, i64)>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT status, count() AS count FROM type::table($table) \
                 WHERE created_at >= $start AND created_at < $end \
                 GROUP BY status",
            )
            .bind(("table", ORDER_TABLE))
            .bind(("start", start))
            .bind(("end", end))
            .await?;

        let rows: Vec<StatusCountRow> = result.take(0)?;
        Ok(rows.into_iter().map(|row| (row.status, row.count)).collect())
    }
}
