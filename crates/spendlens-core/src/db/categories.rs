//! Category operations

use rusqlite::params;

use super::Database;
use crate::analysis::tables::category_color;
use crate::error::Result;
use crate::models::{Category, TransactionType};

/// Built-in expense categories: (name, icon)
const EXPENSE_CATEGORIES: &[(&str, &str)] = &[
    ("Food & Dining", "🍔"),
    ("Transportation", "🚗"),
    ("Shopping", "🛍️"),
    ("Entertainment", "🎬"),
    ("Bills & Utilities", "💡"),
    ("Healthcare", "🏥"),
    ("Education", "📚"),
    ("Travel", "✈️"),
    ("Subscriptions", "📱"),
    ("Housing & Rent", "🏠"),
    ("Personal Care", "💅"),
    ("Gifts & Donations", "🎁"),
    ("Other", "📦"),
];

/// Built-in income categories: (name, icon, color)
const INCOME_CATEGORIES: &[(&str, &str, &str)] = &[
    ("Salary", "💼", "#2ECC71"),
    ("Freelance", "💻", "#27AE60"),
    ("Investments", "📈", "#1ABC9C"),
    ("Business", "🏢", "#16A085"),
    ("Other Income", "💰", "#52BE80"),
];

impl Database {
    /// Insert the built-in categories that don't exist yet
    ///
    /// Returns the number of categories added.
    pub fn seed_default_categories(&self) -> Result<usize> {
        let conn = self.conn()?;
        let mut added = 0;

        let expense = EXPENSE_CATEGORIES
            .iter()
            .map(|(name, icon)| (*name, TransactionType::Expense, *icon, category_color(name)));
        let income = INCOME_CATEGORIES
            .iter()
            .map(|(name, icon, color)| (*name, TransactionType::Income, *icon, *color));

        for (name, kind, icon, color) in expense.chain(income) {
            added += conn.execute(
                "INSERT OR IGNORE INTO categories (name, kind, icon, color) VALUES (?, ?, ?, ?)",
                params![name, kind.as_str(), icon, color],
            )?;
        }

        Ok(added)
    }

    /// List categories, optionally only one kind
    pub fn list_categories(&self, kind: Option<TransactionType>) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, kind, icon, color FROM categories
            WHERE (?1 IS NULL OR kind = ?1)
            ORDER BY kind DESC, id
            "#,
        )?;

        let rows = stmt.query_map(params![kind.map(|k| k.as_str())], row_to_category)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }
}

fn row_to_category(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
    let kind: String = row.get(2)?;
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        kind: kind.parse().unwrap_or(TransactionType::Expense),
        icon: row.get(3)?,
        color: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_idempotent() {
        let db = Database::in_memory().unwrap();
        let first = db.seed_default_categories().unwrap();
        assert_eq!(first, EXPENSE_CATEGORIES.len() + INCOME_CATEGORIES.len());
        assert_eq!(db.seed_default_categories().unwrap(), 0);
    }

    #[test]
    fn test_list_by_kind() {
        let db = Database::in_memory().unwrap();
        db.seed_default_categories().unwrap();

        let income = db.list_categories(Some(TransactionType::Income)).unwrap();
        assert_eq!(income.len(), INCOME_CATEGORIES.len());
        assert!(income.iter().all(|c| c.kind == TransactionType::Income));

        let all = db.list_categories(None).unwrap();
        assert_eq!(all.len(), EXPENSE_CATEGORIES.len() + INCOME_CATEGORIES.len());
    }

    #[test]
    fn test_seeded_colors_match_breakdown_table() {
        let db = Database::in_memory().unwrap();
        db.seed_default_categories().unwrap();

        let expense = db.list_categories(Some(TransactionType::Expense)).unwrap();
        for category in &expense {
            assert_eq!(category.color, category_color(&category.name));
        }

        let food = expense.iter().find(|c| c.name == "Food & Dining").unwrap();
        assert_eq!(food.icon, "🍔");
    }
}
