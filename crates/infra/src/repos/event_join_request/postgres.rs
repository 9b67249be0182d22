use super::IEventJoinRequestRepo;
use crate::repos::shared::repo::DeleteResult;
use connectu_domain::{EventJoinRequest, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresEventJoinRequestRepo {
    pool: PgPool,
}

impl PostgresEventJoinRequestRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventJoinRequestRaw {
    join_request_uid: Uuid,
    event_uid: Uuid,
    user_uid: Uuid,
    created: i64,
}

impl From<EventJoinRequestRaw> for EventJoinRequest {
    fn from(raw: EventJoinRequestRaw) -> Self {
        Self {
            id: raw.join_request_uid.into(),
            event_id: raw.event_uid.into(),
            user_id: raw.user_uid.into(),
            created: raw.created,
        }
    }
}

#[async_trait::async_trait]
impl IEventJoinRequestRepo for PostgresEventJoinRequestRepo {
    async fn insert(&self, request: &EventJoinRequest) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO event_join_requests(join_request_uid, event_uid, user_uid, created)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(request.id.inner_ref())
        .bind(request.event_id.inner_ref())
        .bind(request.user_id.inner_ref())
        .bind(request.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<EventJoinRequest>> {
        let requests: Vec<EventJoinRequestRaw> = sqlx::query_as(
            r#"
            SELECT * FROM event_join_requests AS r
            WHERE r.event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(requests.into_iter().map(|r| r.into()).collect())
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM event_join_requests AS r
            WHERE r.event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
