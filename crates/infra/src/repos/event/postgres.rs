use super::IEventRepo;
use connectu_domain::{Event, EventStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRaw {
    event_uid: Uuid,
    scheduled_ts: i64,
    status: String,
}

impl TryFrom<EventRaw> for Event {
    type Error = anyhow::Error;

    fn try_from(raw: EventRaw) -> anyhow::Result<Self> {
        Ok(Event {
            id: raw.event_uid.into(),
            scheduled_ts: raw.scheduled_ts,
            status: raw.status.parse()?,
        })
    }
}

#[async_trait::async_trait]
impl IEventRepo for PostgresEventRepo {
    async fn insert(&self, e: &Event) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO events(event_uid, scheduled_ts, status)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(e.scheduled_ts)
        .bind(e.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save_status(
        &self,
        event_id: &ID,
        from: EventStatus,
        to: EventStatus,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE events SET status = $3
            WHERE event_uid = $1 AND status = $2
            "#,
        )
        .bind(event_id.inner_ref())
        .bind(from.as_str())
        .bind(to.as_str())
        .execute(&self.pool)
        .await?;

        if res.rows_affected() > 0 {
            return Ok(true);
        }
        match self.find(event_id).await? {
            Some(_) => Ok(false),
            None => Err(anyhow::anyhow!("Event with id: {} does not exist", event_id)),
        }
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<Event>> {
        let event: Option<EventRaw> = sqlx::query_as(
            r#"
            SELECT event_uid, scheduled_ts, status FROM events AS e
            WHERE e.event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        event.map(Event::try_from).transpose()
    }

    async fn find_by_statuses(&self, statuses: &[EventStatus]) -> anyhow::Result<Vec<Event>> {
        let statuses = statuses
            .iter()
            .map(|status| status.as_str().to_string())
            .collect::<Vec<_>>();
        let events: Vec<EventRaw> = sqlx::query_as(
            r#"
            SELECT event_uid, scheduled_ts, status FROM events AS e
            WHERE e.status = ANY($1)
            "#,
        )
        .bind(&statuses)
        .fetch_all(&self.pool)
        .await?;

        events.into_iter().map(Event::try_from).collect()
    }
}
