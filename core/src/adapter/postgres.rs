//! PostgreSQL report repository

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::{debug, info};

use crate::adapter::ReportRepository;
use crate::domain::ReportCard;
use crate::error::{CoreError, Result};

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS report_card (
        post_id        TEXT PRIMARY KEY,
        user_id        TEXT,
        hazard_type    TEXT NOT NULL,
        severity_level TEXT NOT NULL,
        latitude       DOUBLE PRECISION,
        longitude      DOUBLE PRECISION,
        description    TEXT,
        image_url      TEXT,
        video_url      TEXT,
        tags           TEXT,
        uploaded_at    TIMESTAMP DEFAULT (now() AT TIME ZONE 'utc')
    )
"#;

const REPORT_COLUMNS: &str = "post_id, user_id, hazard_type, severity_level, latitude, \
     longitude, description, image_url, video_url, tags, uploaded_at";

/// PostgreSQL-backed report repository
#[derive(Clone)]
pub struct PostgresReportRepository {
    pool: PgPool,
}

impl PostgresReportRepository {
    /// Wrap an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool and wrap it
    pub async fn connect(options: PgConnectOptions, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close every connection in the pool
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

#[async_trait]
impl ReportRepository for PostgresReportRepository {
    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        info!("Ensured report_card table exists");
        Ok(())
    }

    async fn list_reports(&self) -> Result<Vec<ReportCard>> {
        let query = format!(
            "SELECT {} FROM report_card ORDER BY uploaded_at DESC",
            REPORT_COLUMNS
        );
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        debug!("Fetched {} reports", rows.len());

        rows.iter().map(row_to_report).collect()
    }

    async fn get_report(&self, post_id: &str) -> Result<Option<ReportCard>> {
        let query = format!(
            "SELECT {} FROM report_card WHERE post_id = $1",
            REPORT_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_report).transpose()
    }

    async fn create_report(&self, report: &ReportCard) -> Result<ReportCard> {
        let query = format!(
            r#"
            INSERT INTO report_card ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            REPORT_COLUMNS, REPORT_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(&report.post_id)
            .bind(&report.user_id)
            .bind(&report.hazard_type)
            .bind(&report.severity_level)
            .bind(report.latitude)
            .bind(report.longitude)
            .bind(&report.description)
            .bind(&report.image_url)
            .bind(&report.video_url)
            .bind(&report.tags)
            .bind(report.uploaded_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| CoreError::from_insert(e, &report.post_id))?;

        info!("Created report {}", report.post_id);
        row_to_report(&row)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Map a `report_card` row to the domain record
fn row_to_report(row: &PgRow) -> Result<ReportCard> {
    Ok(ReportCard {
        post_id: row.try_get("post_id")?,
        user_id: row.try_get("user_id")?,
        hazard_type: row.try_get("hazard_type")?,
        severity_level: row.try_get("severity_level")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        description: row.try_get("description")?,
        image_url: row.try_get("image_url")?,
        video_url: row.try_get("video_url")?,
        tags: row.try_get("tags")?,
        uploaded_at: row.try_get("uploaded_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewReportCard;
    use chrono::{Duration, Utc};

    // Run with: DATABASE_URL=postgres://... cargo test -p report-card-core -- --ignored

    async fn test_repository() -> PostgresReportRepository {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let options: PgConnectOptions = url.parse().expect("invalid DATABASE_URL");
        let repo = PostgresReportRepository::connect(options, 2)
            .await
            .expect("pool creation failed");
        repo.ensure_schema().await.expect("schema creation failed");
        repo
    }

    fn new_report(hazard_type: &str) -> NewReportCard {
        NewReportCard {
            hazard_type: hazard_type.to_string(),
            severity_level: "low".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_report_columns_match_table() {
        for column in REPORT_COLUMNS.split(", ") {
            assert!(CREATE_TABLE_SQL.contains(column.trim()), "{column}");
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn test_create_and_get_report() {
        let repo = test_repository().await;
        let post_id = format!("abc-{}", uuid::Uuid::new_v4());
        let report = NewReportCard {
            post_id: Some(post_id.clone()),
            latitude: Some(12.9),
            longitude: Some(77.6),
            ..new_report("flood")
        }
        .into_report();

        repo.create_report(&report).await.unwrap();
        let fetched = repo.get_report(&post_id).await.unwrap().unwrap();

        assert_eq!(fetched.hazard_type, "flood");
        assert_eq!(fetched.latitude, Some(12.9));
        assert_eq!(fetched.longitude, Some(77.6));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn test_duplicate_post_id_is_rejected() {
        let repo = test_repository().await;
        let report = new_report("fire").into_report();

        repo.create_report(&report).await.unwrap();
        let err = repo.create_report(&report).await.unwrap_err();

        assert!(matches!(err, CoreError::ReportExists(id) if id == report.post_id));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn test_list_reports_newest_first() {
        let repo = test_repository().await;
        let now = Utc::now().naive_utc();
        let older = NewReportCard {
            uploaded_at: Some(now - Duration::hours(1)),
            ..new_report("older")
        }
        .into_report();
        let newer = NewReportCard {
            uploaded_at: Some(now + Duration::hours(1)),
            ..new_report("newer")
        }
        .into_report();

        repo.create_report(&older).await.unwrap();
        repo.create_report(&newer).await.unwrap();

        let reports = repo.list_reports().await.unwrap();
        let older_pos = reports.iter().position(|r| r.post_id == older.post_id);
        let newer_pos = reports.iter().position(|r| r.post_id == newer.post_id);
        assert!(newer_pos < older_pos);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn test_list_reports_puts_missing_timestamp_first() {
        let repo = test_repository().await;
        let dated = new_report("dated").into_report();
        let undated = ReportCard {
            uploaded_at: None,
            ..new_report("undated").into_report()
        };

        repo.create_report(&dated).await.unwrap();
        repo.create_report(&undated).await.unwrap();

        let reports = repo.list_reports().await.unwrap();
        let first_dated = reports.iter().position(|r| r.uploaded_at.is_some());
        let undated_pos = reports.iter().position(|r| r.post_id == undated.post_id);
        assert!(undated_pos.is_some());
        assert!(undated_pos < first_dated);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn test_get_missing_report() {
        let repo = test_repository().await;
        assert!(repo.get_report("does-not-exist").await.unwrap().is_none());
    }
}
