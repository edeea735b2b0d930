//! Kitchen queue selection
//!
//! Builds the WHERE clause for the kitchen work queue. Two selection rules
//! are unioned, then the search term narrows the union:
//!
//! ```text
//! (status rule OR meal-plan-due rule) AND search
//! ```
//!
//! The precedence is load-bearing: intersecting first would hide scheduled
//! meal-plan orders that fail the status rule.

use shared::order::OrderStatus;

/// Status portion of the queue selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No explicit filter: everything still needing kitchen attention
    #[default]
    Active,
    /// The `all` sentinel: no status restriction
    All,
    /// Explicit status, matched against either status field
    Exact(OrderStatus),
}

impl StatusFilter {
    /// Parse the `status` query parameter
    pub fn parse(param: Option<&str>) -> Result<Self, String> {
        match param {
            None | Some("") => Ok(Self::Active),
            Some("all") => Ok(Self::All),
            Some(value) => OrderStatus::parse(value)
                .map(Self::Exact)
                .ok_or_else(|| format!("unknown status '{value}'")),
        }
    }
}

/// Sort direction, default descending (newest first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn parse(param: Option<&str>) -> Result<Self, String> {
        match param {
            None | Some("") => Ok(Self::Desc),
            Some("asc") => Ok(Self::Asc),
            Some("desc") => Ok(Self::Desc),
            Some(other) => Err(format!("unknown sort order '{other}'")),
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Default sort: newest orders first
pub const DEFAULT_SORT_FIELD: &str = "created_at";

/// Map an API `sortBy` value onto a storage field.
///
/// Closed whitelist; anything else is a validation error, never query text.
pub fn sort_field(api_name: &str) -> Option<&'static str> {
    match api_name {
        "createdAt" | "created_at" => Some("created_at"),
        "updatedAt" | "updated_at" => Some("updated_at"),
        "scheduledDate" | "scheduled_date" => Some("scheduled_date"),
        "totalPrice" | "total_price" => Some("total_price"),
        "status" => Some("status"),
        _ => None,
    }
}

/// Full queue selection
#[derive(Debug, Clone, Default)]
pub struct QueueSelection {
    pub status: StatusFilter,
    /// Lowercased search term; matched as substring against customer fields
    pub search: Option<String>,
}

impl QueueSelection {
    /// WHERE clause with `$status`, `$day_end` and `$search` placeholders.
    ///
    /// The meal-plan rule admits orders due today or already overdue
    /// (`scheduled_date < startOfTomorrow`), independent of the status rule.
    pub fn where_clause(&self) -> String {
        let status_rule = match &self.status {
            StatusFilter::Active => "status NOT IN ['delivered', 'cancelled']".to_string(),
            StatusFilter::All => "true".to_string(),
            StatusFilter::Exact(_) => {
                "(status = $status OR kitchen_status = $status)".to_string()
            }
        };

        let meal_plan_rule = "(is_part_of_meal_plan = true \
             AND status IN ['scheduled', 'pending'] \
             AND scheduled_date != NONE \
             AND scheduled_date < $day_end)";

        let mut clause = format!("(({status_rule}) OR {meal_plan_rule})");

        if self.search.is_some() {
            clause.push_str(
                " AND (string::contains(string::lowercase(customer.name ?? ''), $search) \
                 OR string::contains(string::lowercase(customer.email ?? ''), $search) \
                 OR string::contains(string::lowercase(customer.phone ?? ''), $search) \
                 OR string::contains(string::lowercase(customer.room_number ?? ''), $search))",
            );
        }

        clause
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_excludes_terminal_statuses() {
        let clause = QueueSelection::default().where_clause();
        assert!(clause.contains("status NOT IN ['delivered', 'cancelled']"));
    }

    #[test]
    fn explicit_status_matches_either_field() {
        let sel = QueueSelection {
            status: StatusFilter::Exact(OrderStatus::Preparing),
            search: None,
        };
        let clause = sel.where_clause();
        assert!(clause.contains("status = $status OR kitchen_status = $status"));
    }

    #[test]
    fn meal_plan_rule_is_unioned_not_intersected() {
        let clause = QueueSelection::default().where_clause();
        // the status rule and meal-plan rule sit inside one OR group
        let or_pos = clause.find(") OR (").expect("union missing");
        assert!(clause[..or_pos].contains("NOT IN"));
        assert!(clause[or_pos..].contains("is_part_of_meal_plan"));
    }

    #[test]
    fn search_narrows_the_union() {
        let sel = QueueSelection {
            status: StatusFilter::Active,
            search: Some("smith".into()),
        };
        let clause = sel.where_clause();
        let and_pos = clause.rfind(" AND (").expect("search AND missing");
        // everything before the search AND is the closed union group
        assert!(clause[..and_pos].ends_with(')'));
        assert!(clause[and_pos..].contains("customer.room_number"));
    }

    #[test]
    fn all_sentinel_drops_the_status_restriction() {
        assert_eq!(StatusFilter::parse(Some("all")).unwrap(), StatusFilter::All);
        let sel = QueueSelection {
            status: StatusFilter::All,
            search: None,
        };
        assert!(sel.where_clause().starts_with("((true)"));
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(StatusFilter::parse(Some("burnt")).is_err());
    }

    #[test]
    fn sort_whitelist_rejects_unknown_fields() {
        assert_eq!(sort_field("createdAt"), Some("created_at"));
        assert_eq!(sort_field("scheduledDate"), Some("scheduled_date"));
        assert_eq!(sort_field("customer.name; DROP"), None);
    }
}
