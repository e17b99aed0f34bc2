use super::Database;
use crate::list::ShoppingListItem;

#[derive(sqlx::FromRow)]
struct ListRow {
    name: String,
    quantity: i64,
    category: String,
    price: f64,
}

impl From<ListRow> for ShoppingListItem {
    fn from(row: ListRow) -> Self {
        Self {
            name: row.name,
            quantity: row.quantity,
            category: row.category,
            price: row.price,
        }
    }
}

impl Database {
    pub async fn load_list(&self) -> Result<Vec<ShoppingListItem>, sqlx::Error> {
        tracing::trace!("Loading shopping list rows");
        let rows: Vec<ListRow> = sqlx::query_as(
            "SELECT name, quantity, category, price FROM shopping_list ORDER BY position",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Replace the stored list in one transaction so readers never see a
    /// partially written list.
    pub async fn replace_list(&self, items: &[ShoppingListItem]) -> Result<(), sqlx::Error> {
        tracing::debug!(count = items.len(), "Replacing stored shopping list");
        let mut tx = self.pool().begin().await?;
        sqlx::query("DELETE FROM shopping_list")
            .execute(&mut *tx)
            .await?;
        for (position, item) in items.iter().enumerate() {
            sqlx::query(
                "INSERT INTO shopping_list (position, name, quantity, category, price) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(position as i64)
            .bind(&item.name)
            .bind(item.quantity)
            .bind(&item.category)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::list::ShoppingListItem;
    use crate::tests::util::init_test_db;

    fn item(name: &str, quantity: i64) -> ShoppingListItem {
        ShoppingListItem {
            name: name.to_string(),
            quantity,
            category: "Dairy".to_string(),
            price: 2.5,
        }
    }

    #[tokio::test]
    async fn replace_and_load_preserves_order() -> anyhow::Result<()> {
        let db = init_test_db().await;
        db.replace_list(&[item("milk", 2), item("cheese", 1)]).await?;
        db.replace_list(&[item("yogurt", 4), item("milk", 3)]).await?;

        let items = db.load_list().await?;
        assert_eq!(items, vec![item("yogurt", 4), item("milk", 3)]);
        Ok(())
    }

    #[tokio::test]
    async fn failed_replace_keeps_previous_rows() -> anyhow::Result<()> {
        let db = init_test_db().await;
        db.replace_list(&[item("milk", 2)]).await?;

        // Duplicate names violate the UNIQUE constraint mid-transaction.
        let result = db.replace_list(&[item("eggs", 1), item("eggs", 1)]).await;
        assert!(result.is_err());

        assert_eq!(db.load_list().await?, vec![item("milk", 2)]);
        Ok(())
    }
}
