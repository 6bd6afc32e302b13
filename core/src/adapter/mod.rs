//! Data access layer for report cards

use crate::domain::ReportCard;
use crate::error::Result;
use async_trait::async_trait;

pub mod postgres;

pub use postgres::PostgresReportRepository;

/// Storage for report cards
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Create the `report_card` table if it does not exist yet
    async fn ensure_schema(&self) -> Result<()>;

    /// All reports, newest `uploaded_at` first
    async fn list_reports(&self) -> Result<Vec<ReportCard>>;

    /// Look up a report by primary key
    async fn get_report(&self, post_id: &str) -> Result<Option<ReportCard>>;

    /// Insert a new report. Fails with `ReportExists` if `post_id` is taken.
    async fn create_report(&self, report: &ReportCard) -> Result<ReportCard>;

    /// Check that the storage is reachable
    async fn ping(&self) -> Result<()>;
}
