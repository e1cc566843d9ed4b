//! Listing post verification: mark posts verified and lapse the ones whose
//! verification went stale.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use ez_core::entities::ListingPost;
use ez_core::enums::ListingStatus;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_datetime};
use crate::service::EzService;

const SELECT_COLS: &str = "id, verified, last_verified_at, listing_status, created_at, updated_at";

fn row_to_listing_post(row: &libsql::Row) -> Result<ListingPost, DatabaseError> {
    Ok(ListingPost {
        id: row.get(0)?,
        verified: row.get::<i64>(1)? != 0,
        last_verified_at: parse_optional_datetime(get_opt_string(row, 2)?.as_deref())?,
        listing_status: parse_enum(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl EzService {
    /// Mark a listing post verified as of `at`, creating it on first sight.
    pub async fn verify_listing(
        &self,
        id: &str,
        at: DateTime<Utc>,
    ) -> Result<ListingPost, DatabaseError> {
        let at = at.to_rfc3339();
        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO listing_posts ({SELECT_COLS}) VALUES (?1, 1, ?2, ?3, ?2, ?2)
                     ON CONFLICT(id) DO UPDATE SET
                       verified = 1, last_verified_at = ?2, listing_status = ?3, updated_at = ?2"
                ),
                libsql::params![id, at.as_str(), ListingStatus::Active.as_str()],
            )
            .await?;
        debug!(listing = id, "verified listing");
        self.get_listing_post(id).await
    }

    pub async fn get_listing_post(&self, id: &str) -> Result<ListingPost, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM listing_posts WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_listing_post(&row)
    }

    /// Unverify every verified post not re-verified in the last `stale_days`
    /// days (or never), marking it `stale`. Returns the affected ids in
    /// insertion order.
    pub async fn unverify_stale_listings(
        &self,
        now: DateTime<Utc>,
        stale_days: u32,
    ) -> Result<Vec<String>, DatabaseError> {
        let cutoff = now - Duration::days(i64::from(stale_days));
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM listing_posts
                     WHERE verified = 1
                       AND (last_verified_at IS NULL
                            OR julianday(last_verified_at) < julianday(?1))
                     ORDER BY rowid ASC"
                ),
                [cutoff.to_rfc3339()],
            )
            .await?;

        let mut stale = Vec::new();
        while let Some(row) = rows.next().await? {
            let post = row_to_listing_post(&row)?;
            if post.last_verified_at.is_none_or(|at| at < cutoff) {
                stale.push(post.id);
            }
        }

        let updated_at = now.to_rfc3339();
        for id in &stale {
            self.db()
                .conn()
                .execute(
                    "UPDATE listing_posts SET verified = 0, listing_status = ?2, updated_at = ?3
                     WHERE id = ?1",
                    libsql::params![id.as_str(), ListingStatus::Stale.as_str(), updated_at.as_str()],
                )
                .await?;
        }

        if !stale.is_empty() {
            info!(count = stale.len(), stale_days, "unverified stale listings");
        }
        Ok(stale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_service;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn verify_creates_then_refreshes() {
        let svc = test_service().await;
        let first = Utc::now() - Duration::days(10);
        let post = svc.verify_listing("lst-1", first).await.unwrap();
        assert!(post.verified);
        assert_eq!(post.listing_status, ListingStatus::Active);
        assert_eq!(post.last_verified_at.map(|t| t.timestamp()), Some(first.timestamp()));

        let later = Utc::now();
        let post = svc.verify_listing("lst-1", later).await.unwrap();
        assert_eq!(post.last_verified_at.map(|t| t.timestamp()), Some(later.timestamp()));
    }

    #[tokio::test]
    async fn missing_post_is_no_result() {
        let svc = test_service().await;
        let result = svc.get_listing_post("lst-missing").await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }

    #[tokio::test]
    async fn stale_posts_are_unverified() {
        let svc = test_service().await;
        let now = Utc::now();
        svc.verify_listing("lst-old", now - Duration::days(45))
            .await
            .unwrap();
        svc.verify_listing("lst-fresh", now - Duration::days(3))
            .await
            .unwrap();
        // Verified with no timestamp, as an import might leave it.
        svc.db()
            .conn()
            .execute(
                "INSERT INTO listing_posts (id, verified) VALUES ('lst-never', 1)",
                (),
            )
            .await
            .unwrap();

        let stale = svc.unverify_stale_listings(now, 30).await.unwrap();
        assert_eq!(stale, ["lst-old", "lst-never"]);

        let old = svc.get_listing_post("lst-old").await.unwrap();
        assert!(!old.verified);
        assert_eq!(old.listing_status, ListingStatus::Stale);
        assert!(svc.get_listing_post("lst-fresh").await.unwrap().verified);

        assert!(svc.unverify_stale_listings(now, 30).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn threshold_is_configurable() {
        let svc = test_service().await;
        let now = Utc::now();
        svc.verify_listing("lst-1", now - Duration::days(10))
            .await
            .unwrap();
        assert!(svc.unverify_stale_listings(now, 30).await.unwrap().is_empty());
        assert_eq!(svc.unverify_stale_listings(now, 7).await.unwrap(), ["lst-1"]);
    }

    #[tokio::test]
    async fn sqlite_datetime_format_is_compared_by_instant() {
        let svc = test_service().await;
        let now = Utc::now();
        let old = (now - Duration::days(40)).format("%Y-%m-%d %H:%M:%S").to_string();
        svc.db()
            .conn()
            .execute(
                "INSERT INTO listing_posts (id, verified, last_verified_at) VALUES ('lst-plain', 1, ?1)",
                [old.as_str()],
            )
            .await
            .unwrap();
        assert_eq!(svc.unverify_stale_listings(now, 30).await.unwrap(), ["lst-plain"]);
    }
}
