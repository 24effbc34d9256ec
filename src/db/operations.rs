use sqlx::PgPool;
use crate::models::{Metadata, TargetTable};

pub struct DatabaseOperations;

impl DatabaseOperations {
    /// Insert one parser metadata mapping as one row into the target table.
    ///
    /// The mapping's keys are matched against the table's columns by
    /// `jsonb_populate_record`, reproducing the hosted client's dict-to-row
    /// insert semantics. The table name comes from the `TargetTable` enum,
    /// never from caller-supplied text.
    pub async fn insert_metadata(
        pool: &PgPool,
        table: TargetTable,
        metadata: &Metadata,
    ) -> Result<(), sqlx::Error> {
        let sql = format!(
            "INSERT INTO {table} SELECT * FROM jsonb_populate_record(NULL::{table}, $1)",
            table = table.name()
        );

        sqlx::query(&sql)
            .bind(serde_json::Value::Object(metadata.clone()))
            .execute(pool)
            .await?;

        Ok(())
    }
}
