//! Category labels: the fixed built-in set plus user-added customs.

use serde::{Deserialize, Serialize};

/// Name given to a custom category created with an empty label.
pub const CUSTOM_PLACEHOLDER_NAME: &str = "自定义";

const CUSTOM_ID_PREFIX: &str = "custom_";

const DEFAULT_CATEGORIES: [(&str, &str); 5] = [
    ("c_food", "餐饮"),
    ("c_transport", "交通"),
    ("c_shopping", "购物"),
    ("c_salary", "工资"),
    ("c_other", "其他"),
];

/// Labels ledger activity for searching and reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub is_custom: bool,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, is_custom: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_custom,
        }
    }

    /// The built-in categories, rebuilt in code on every load and never persisted.
    pub fn defaults() -> Vec<Category> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|(id, name)| Category::new(*id, *name, false))
            .collect()
    }

    /// Appends a new custom category with the first free `custom_N` id and returns a copy.
    pub fn add_custom(categories: &mut Vec<Category>, name: &str) -> Category {
        let name = if name.is_empty() {
            CUSTOM_PLACEHOLDER_NAME
        } else {
            name
        };
        let id = next_custom_id(categories);
        let custom = Category::new(id, name, true);
        categories.push(custom.clone());
        custom
    }

    /// Display names in collection order.
    pub fn names(categories: &[Category]) -> Vec<String> {
        categories.iter().map(|c| c.name.clone()).collect()
    }
}

fn next_custom_id(categories: &[Category]) -> String {
    (1..)
        .map(|n: usize| format!("{CUSTOM_ID_PREFIX}{n}"))
        .find(|candidate| categories.iter().all(|c| &c.id != candidate))
        .unwrap_or_else(|| format!("{CUSTOM_ID_PREFIX}{}", categories.len() + 1))
}

/// Rule applied when persisted custom categories are merged into the default set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryMergePolicy {
    /// A loaded category is dropped when a category with the same name is already present.
    #[default]
    SkipDuplicateNames,
    /// Every loaded category is appended.
    KeepAll,
}

/// Outcome of merging persisted categories into a base list.
#[derive(Debug, Clone, Default)]
pub struct CategoryMerge {
    pub skipped: Vec<Category>,
    pub warnings: Vec<String>,
}

impl CategoryMergePolicy {
    /// Merges `loaded` into `base` in order. Ids shared by categories with different names are
    /// kept and reported.
    pub fn merge(self, base: &mut Vec<Category>, loaded: Vec<Category>) -> CategoryMerge {
        let mut outcome = CategoryMerge::default();
        for category in loaded {
            if self == CategoryMergePolicy::SkipDuplicateNames
                && base.iter().any(|existing| existing.name == category.name)
            {
                outcome.skipped.push(category);
                continue;
            }
            if let Some(existing) = base.iter().find(|existing| existing.id == category.id) {
                outcome.warnings.push(format!(
                    "category id {} is shared by `{}` and `{}`",
                    category.id, existing.name, category.name
                ));
            }
            base.push(category);
        }
        outcome
    }
}
