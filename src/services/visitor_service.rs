use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{DatabaseConnection, EntityTrait, Insert};
use tokio::task::JoinHandle;

use crate::client_ip::Resolution;
use crate::entities::visitor;
use crate::error::AppError;

pub struct VisitorService;

impl VisitorService {
    /// Storage key for one address on one page.
    #[must_use]
    pub fn visitor_key(ip: &str, page_id: &str) -> String {
        format!("{ip}#{page_id}")
    }

    /// Count a visit, creating the row on first sight.
    ///
    /// The increment happens inside a single upsert, so concurrent hits on
    /// the same key never lose a count.
    pub async fn record_visit(
        db: &DatabaseConnection,
        resolution: &Resolution,
        page_id: &str,
    ) -> Result<visitor::Model, AppError> {
        let key = Self::visitor_key(&resolution.ip, page_id);
        let now = Utc::now().fixed_offset();
        let alternative_ips = serde_json::to_string(&resolution.alternative_ips)?;

        let row = visitor::ActiveModel {
            visitor_key: Set(key.clone()),
            ip: Set(resolution.ip.clone()),
            page_id: Set(page_id.to_string()),
            visits: Set(1),
            source: Set(resolution.source.to_string()),
            confidence: Set(i32::from(resolution.confidence)),
            environment: Set(resolution.debug.environment.clone()),
            alternative_ips: Set(alternative_ips),
            first_seen_at: Set(now),
            last_seen_at: Set(now),
        };

        Self::upsert(row)
            .exec_without_returning(db)
            .await?;

        visitor::Entity::find_by_id(key.clone())
            .one(db)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("visitor {key} missing after upsert")))
    }

    /// Insert that bumps `visits` on an existing key. The counter reference is
    /// table-qualified; Postgres rejects a bare `visits` next to `EXCLUDED`.
    fn upsert(row: visitor::ActiveModel) -> Insert<visitor::ActiveModel> {
        visitor::Entity::insert(row).on_conflict(
            OnConflict::column(visitor::Column::VisitorKey)
                .value(
                    visitor::Column::Visits,
                    Expr::col((visitor::Entity, visitor::Column::Visits)).add(1),
                )
                .update_columns([
                    visitor::Column::Source,
                    visitor::Column::Confidence,
                    visitor::Column::Environment,
                    visitor::Column::AlternativeIps,
                    visitor::Column::LastSeenAt,
                ])
                .to_owned(),
        )
    }

    /// Look up the counter row for an address and page.
    pub async fn get_visit(
        db: &DatabaseConnection,
        ip: &str,
        page_id: &str,
    ) -> Result<Option<visitor::Model>, AppError> {
        let row = visitor::Entity::find_by_id(Self::visitor_key(ip, page_id))
            .one(db)
            .await?;
        Ok(row)
    }

    /// Record a visit in the background. Failures are logged, never returned.
    pub fn spawn_record(
        db: DatabaseConnection,
        resolution: Resolution,
        page_id: String,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            match Self::record_visit(&db, &resolution, &page_id).await {
                Ok(row) => tracing::debug!(
                    key = %row.visitor_key,
                    visits = row.visits,
                    "visit recorded"
                ),
                Err(err) => tracing::error!(
                    ip = %resolution.ip,
                    page_id = %page_id,
                    error = ?err,
                    "failed to record visit"
                ),
            }
        })
    }
}
