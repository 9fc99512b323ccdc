use sqlx::any::{AnyPool, AnyPoolOptions};
use tracing::debug;

use crate::models::{Customer, RemarksUpdate};

const LIST_CUSTOMERS: &str = "SELECT id, Name, Mobno, JCNo, Model FROM customers";
const UPDATE_BASIC: &str = "UPDATE customers SET Remarks = ?, Date = ? WHERE id = ?";
const UPDATE_EXTENDED: &str = "UPDATE customers SET Remarks = ?, FollowUpDate = ?, \
     BookingDate = ?, SelectedReason = ? WHERE id = ?";

/// Opens the single long-lived connection the service works with.
///
/// The pool never grows past one connection and never recycles it, so a
/// dropped connection stays dropped until the process restarts.
pub async fn establish_connection(db_url: &str) -> Result<AnyPool, sqlx::Error> {
    AnyPoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(db_url)
        .await
}

pub async fn list_customers(pool: &AnyPool) -> Result<Vec<Customer>, sqlx::Error> {
    sqlx::query_as::<_, Customer>(LIST_CUSTOMERS)
        .fetch_all(pool)
        .await
}

/// Overwrites the remarks columns of one row and returns the affected row count.
///
/// An unknown id affects zero rows and is not an error.
pub async fn save_remarks(pool: &AnyPool, update: &RemarksUpdate) -> Result<u64, sqlx::Error> {
    let result = match update {
        RemarksUpdate::Basic { id, remarks, date } => {
            sqlx::query(UPDATE_BASIC)
                .bind(remarks.clone())
                .bind(date.clone())
                .bind(*id)
                .execute(pool)
                .await?
        }
        RemarksUpdate::Extended {
            id,
            remarks,
            follow_up_date,
            booking_date,
            selected_reason,
        } => {
            sqlx::query(UPDATE_EXTENDED)
                .bind(remarks.clone())
                .bind(follow_up_date.clone())
                .bind(booking_date.clone())
                .bind(selected_reason.clone())
                .bind(*id)
                .execute(pool)
                .await?
        }
    };

    let rows = result.rows_affected();
    debug!(id = update.id(), rows, "Remarks update executed");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_pool() -> AnyPool {
        let pool = establish_connection("sqlite::memory:").await.unwrap();
        sqlx::query(
            "CREATE TABLE customers (id INTEGER PRIMARY KEY, Name TEXT, Mobno TEXT, \
             JCNo TEXT, Model TEXT, Remarks TEXT, Date TEXT, FollowUpDate TEXT, \
             BookingDate TEXT, SelectedReason TEXT)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO customers (id, Name, Mobno, JCNo, Model) VALUES \
             (1, 'Ravi', '98450 12345', 'JC001', 'Activa'), \
             (2, 'Meena', NULL, 'JC002', 'Splendor')",
        )
        .execute(&pool)
        .await
        .unwrap();
        pool
    }

    #[tokio::test]
    async fn lists_rows_in_store_order() {
        let pool = seeded_pool().await;
        let customers = list_customers(&pool).await.unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].name.as_deref(), Some("Ravi"));
        assert_eq!(customers[1].mobno, None);
    }

    #[tokio::test]
    async fn basic_update_touches_one_row() {
        let pool = seeded_pool().await;
        let update = RemarksUpdate::Basic {
            id: 2,
            remarks: "Call back".into(),
            date: "2024-06-01".into(),
        };
        assert_eq!(save_remarks(&pool, &update).await.unwrap(), 1);

        let rows: Vec<(i64, Option<String>, Option<String>)> =
            sqlx::query_as("SELECT id, Remarks, Date FROM customers ORDER BY id")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(rows[0], (1, None, None));
        assert_eq!(
            rows[1],
            (2, Some("Call back".into()), Some("2024-06-01".into()))
        );
    }

    #[tokio::test]
    async fn unknown_id_affects_nothing() {
        let pool = seeded_pool().await;
        let update = RemarksUpdate::Extended {
            id: 99,
            remarks: "Called".into(),
            follow_up_date: "2024-06-01".into(),
            booking_date: "2024-06-03".into(),
            selected_reason: String::new(),
        };
        assert_eq!(save_remarks(&pool, &update).await.unwrap(), 0);
    }
}
