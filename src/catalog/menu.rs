use std::collections::HashMap;

use crate::error::{PlannerError, Result};

/// The date-indexed master menu: for each service date, the fixed list of
/// item names before any personalization.
#[derive(Debug, Clone, Default)]
pub struct MasterMenu {
    /// Dates in source column order.
    dates: Vec<String>,
    items: HashMap<String, Vec<String>>,
}

impl MasterMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item to a date's menu. Blank cells are skipped.
    pub fn push(&mut self, date: &str, item: &str) {
        let date = date.trim();
        let item = item.trim();
        if date.is_empty() {
            return;
        }
        if !self.items.contains_key(date) {
            self.dates.push(date.to_string());
        }
        let list = self.items.entry(date.to_string()).or_default();
        if !item.is_empty() {
            list.push(item.to_string());
        }
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    /// The first `limit` items served on `date`.
    pub fn meal_for(&self, date: &str, limit: usize) -> Result<Vec<String>> {
        self.items
            .get(date.trim())
            .map(|list| list.iter().take(limit).cloned().collect())
            .ok_or_else(|| PlannerError::UnknownMenuDate(date.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_for_limits_and_skips_blanks() {
        let mut menu = MasterMenu::new();
        for item in ["쌀밥", "", "미역국", "멸치볶음", "배추김치"] {
            menu.push("2024-03-01", item);
        }
        menu.push("2024-03-02", "흰죽");

        assert_eq!(menu.dates(), ["2024-03-01", "2024-03-02"]);
        let meal = menu.meal_for("2024-03-01", 3).unwrap();
        assert_eq!(meal, vec!["쌀밥", "미역국", "멸치볶음"]);
    }

    #[test]
    fn test_unknown_date() {
        let menu = MasterMenu::new();
        assert!(matches!(
            menu.meal_for("2099-01-01", 6),
            Err(PlannerError::UnknownMenuDate(_))
        ));
    }
}
