use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::record::{NutritionRecord, NUMERIC_COLUMNS};

const FUZZY_THRESHOLD: f64 = 0.85;

const VEGAN_CATEGORIES: [&str; 6] = [
    "Breads & Roti",
    "Rice & Grains",
    "Legumes & Dal",
    "Vegetables",
    "Fruits",
    "Nuts & Seeds",
];

const NON_VEG_KEYWORDS: [&str; 6] = ["chicken", "fish", "mutton", "beef", "pork", "egg"];

#[derive(Debug, Error)]
pub enum NutritionError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid dataset structure: {0}")]
    InvalidStructure(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Immutable nutrition dataset. Replacement happens by building a new table
/// and swapping it in via [`crate::NutritionHandle`].
#[derive(Debug)]
pub struct NutritionTable {
    records: Vec<NutritionRecord>,
    search_text: Vec<String>,
}

impl NutritionTable {
    pub fn from_records(records: Vec<NutritionRecord>) -> Self {
        let search_text = records.iter().map(|r| r.searchable_text()).collect();
        Self {
            records,
            search_text,
        }
    }

    /// Parse a raw JSON payload, enforcing the structural checks an upload
    /// must pass: a non-empty array whose first record carries the dish
    /// name, category, calorie, and protein keys.
    pub fn from_json_str(payload: &str) -> Result<Self, NutritionError> {
        let value: serde_json::Value = serde_json::from_str(payload)?;
        let array = value.as_array().ok_or_else(|| {
            NutritionError::InvalidStructure(
                "data must be a non-empty list of nutrition records".to_string(),
            )
        })?;
        if array.is_empty() {
            return Err(NutritionError::InvalidStructure(
                "data must be a non-empty list of nutrition records".to_string(),
            ));
        }

        let required = ["Dish Name", "Category", "Calories (kcal)", "Protein (g)"];
        let first = &array[0];
        if !required.iter().all(|field| first.get(field).is_some()) {
            return Err(NutritionError::InvalidStructure(format!(
                "invalid data structure, required fields: {required:?}"
            )));
        }

        let records: Vec<NutritionRecord> = serde_json::from_value(value)?;
        Ok(Self::from_records(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[NutritionRecord] {
        &self.records
    }

    /// Search cascade: exact dish-name match first, then substring matches
    /// (shortest dish name first), then token-set fuzzy matches above a
    /// high threshold. An exact match always wins over a fuzzy candidate.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&NutritionRecord> {
        if self.records.is_empty() || limit == 0 {
            return Vec::new();
        }
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let exact: Vec<&NutritionRecord> = self
            .records
            .iter()
            .filter(|r| r.dish_name.to_lowercase() == query)
            .take(limit)
            .collect();
        if !exact.is_empty() {
            return exact;
        }

        let mut contains: Vec<&NutritionRecord> = self
            .records
            .iter()
            .filter(|r| r.dish_name.to_lowercase().contains(&query))
            .collect();
        if !contains.is_empty() {
            contains.sort_by_key(|r| r.dish_name.len());
            contains.truncate(limit);
            return contains;
        }

        let mut scored: Vec<(f64, &NutritionRecord)> = self
            .records
            .iter()
            .zip(self.search_text.iter())
            .filter_map(|(record, text)| {
                let score = token_set_similarity(&query, text);
                (score > FUZZY_THRESHOLD).then_some((score, record))
            })
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().map(|(_, r)| r).take(limit).collect()
    }

    /// Region/diet/goal filtered suggestions, top 10.
    pub fn regional_suggestions(
        &self,
        region: &str,
        dietary_type: &str,
        goal: &str,
    ) -> Vec<&NutritionRecord> {
        if self.records.is_empty() {
            return Vec::new();
        }

        let mut filtered: Vec<&NutritionRecord> = self.records.iter().collect();

        if !region.is_empty() && region != "Indian" {
            let region_lower = region.to_lowercase();
            let regional: Vec<&NutritionRecord> = filtered
                .iter()
                .copied()
                .filter(|r| {
                    r.region
                        .as_deref()
                        .is_some_and(|reg| reg.to_lowercase().contains(&region_lower))
                })
                .collect();
            // An unknown region falls back to the full table rather than
            // returning nothing.
            if !regional.is_empty() {
                filtered = regional;
            }
        }

        match dietary_type {
            "vegan" => {
                filtered.retain(|r| {
                    let category = r.category.to_lowercase();
                    VEGAN_CATEGORIES
                        .iter()
                        .any(|allowed| category.contains(&allowed.to_lowercase()))
                });
            }
            "vegetarian" => {
                filtered.retain(|r| {
                    let dish = r.dish_name.to_lowercase();
                    !NON_VEG_KEYWORDS.iter().any(|kw| dish.contains(kw))
                });
            }
            _ => {}
        }

        match goal {
            "weight loss" => filtered.sort_by(|a, b| {
                cmp_opt(a.calories, b.calories, true)
                    .then_with(|| cmp_opt(a.fiber, b.fiber, false))
            }),
            "weight gain" => filtered.sort_by(|a, b| {
                cmp_opt(a.calories, b.calories, false)
                    .then_with(|| cmp_opt(a.protein, b.protein, false))
            }),
            _ => filtered.sort_by(|a, b| cmp_opt(a.fiber, b.fiber, false)),
        }

        filtered.truncate(10);
        filtered
    }

    /// Sorted category names plus per-category record counts.
    pub fn categories(&self) -> (Vec<String>, BTreeMap<String, usize>) {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.category.clone()).or_default() += 1;
        }
        let names: Vec<String> = counts.keys().cloned().collect();
        (names, counts)
    }

    /// Records in a category, case-insensitive; `None` when the category
    /// does not exist.
    pub fn dishes_in_category(&self, category: &str, limit: usize) -> Option<Vec<&NutritionRecord>> {
        let category_lower = category.to_lowercase();
        let matches: Vec<&NutritionRecord> = self
            .records
            .iter()
            .filter(|r| r.category.to_lowercase() == category_lower)
            .take(limit)
            .collect();
        (!matches.is_empty()).then_some(matches)
    }

    /// Aggregate the numeric columns across records, rounded to 2 decimals.
    pub fn meal_totals(records: &[&NutritionRecord]) -> BTreeMap<String, f64> {
        let mut totals: BTreeMap<String, f64> = NUMERIC_COLUMNS
            .iter()
            .map(|col| (col.to_string(), 0.0))
            .collect();
        for record in records {
            for (col, value) in NUMERIC_COLUMNS.iter().zip(record.numeric_values()) {
                if let Some(value) = value {
                    *totals.get_mut(*col).expect("column preseeded") += value;
                }
            }
        }
        for value in totals.values_mut() {
            *value = (*value * 100.0).round() / 100.0;
        }
        totals
    }
}

/// Human-readable summary block for one record.
pub fn format_record(record: &NutritionRecord) -> String {
    let fmt = |v: Option<f64>| match v {
        Some(v) => trim_float(v),
        None => "N/A".to_string(),
    };
    format!(
        "**{}** ({}, {})\n- Serving Size: {}\n- Calories: {} kcal\n- Protein: {}g | Carbs: {}g | Fat: {}g | Fiber: {}g\n- Key Nutrients: {}",
        record.dish_name,
        record.category,
        record.region.as_deref().unwrap_or("Unknown Region"),
        record.serving_size.as_deref().unwrap_or("Unknown serving"),
        fmt(record.calories),
        fmt(record.protein),
        fmt(record.carbs),
        fmt(record.fat),
        fmt(record.fiber),
        record.vitamins.as_deref().unwrap_or("N/A"),
    )
}

fn trim_float(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Missing values sort last regardless of direction, matching how the
/// dataset's tabular source treated NaN.
fn cmp_opt(a: Option<f64>, b: Option<f64>, ascending: bool) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let ord = x.total_cmp(&y);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        }
    }
}

/// Token-set similarity: compare the shared-token core against each side's
/// full token set and keep the best normalized-Levenshtein score. Word
/// order and duplicates don't count against a match.
fn token_set_similarity(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    let core = intersection.join(" ");
    let combined_a = join_nonempty(&core, &only_a.join(" "));
    let combined_b = join_nonempty(&core, &only_b.join(" "));

    let candidates = [
        strsim::normalized_levenshtein(&core, &combined_a),
        strsim::normalized_levenshtein(&core, &combined_b),
        strsim::normalized_levenshtein(&combined_a, &combined_b),
    ];
    candidates.into_iter().fold(0.0, f64::max)
}

fn join_nonempty(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, _) => b.to_string(),
        (_, true) => a.to_string(),
        _ => format!("{a} {b}"),
    }
}
