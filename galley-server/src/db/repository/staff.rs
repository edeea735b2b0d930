//! Staff Repository
//!
//! Read access to the staff directory, plus a create used for seeding.

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{STAFF_TABLE, Staff, StaffCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct StaffRepository {
    base: BaseRepository,
}

impl StaffRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a staff member by id (full "staff:key" or bare key)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Staff>> {
        let rid = parse_record_id(STAFF_TABLE, id)?;
        let staff: Option<Staff> = self.base.db().select(rid).await?;
        Ok(staff)
    }

    /// Create a staff record (directory seeding and tests)
    pub async fn create(&self, data: StaffCreate) -> RepoResult<Staff> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE type::table($table) CONTENT {
                    name: $name,
                    role: $role,
                    department: $department,
                    is_active: $is_active
                } RETURN AFTER"#,
            )
            .bind(("table", STAFF_TABLE))
            .bind(("name", data.name))
            .bind(("role", data.role))
            .bind(("department", data.department))
            .bind(("is_active", data.is_active))
            .await?;

        let created: Option<Staff> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create staff record".to_string()))
    }
}
