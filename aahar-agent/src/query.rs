//! Keyword-based query analysis: dietary preference, goal, region, and
//! table-format detection.

fn clean_query(query: &str) -> String {
    query
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .trim()
        .to_lowercase()
}

pub fn extract_diet_preference(query: &str) -> &'static str {
    let q = clean_query(query);
    if ["non-veg", "non veg", "nonvegetarian"]
        .iter()
        .any(|kw| q.contains(&clean_query(kw)))
    {
        return "non-vegetarian";
    }
    if q.contains("vegan") {
        return "vegan";
    }
    if q.contains("veg") || q.contains("vegetarian") {
        return "vegetarian";
    }
    "any"
}

pub fn extract_diet_goal(query: &str) -> &'static str {
    let q = query.to_lowercase();
    if [
        "lose weight",
        "loss weight",
        "cut weight",
        "reduce weight",
        "lose fat",
        "cut fat",
    ]
    .iter()
    .any(|kw| q.contains(kw))
    {
        return "weight loss";
    }
    if q.contains("gain weight") || q.contains("weight gain") || q.contains("muscle gain") {
        return "weight gain";
    }
    if q.contains("loss") {
        return "weight loss";
    }
    if q.contains("gain") {
        return "weight gain";
    }
    "diet"
}

pub fn extract_region(query: &str) -> &'static str {
    let q = query.to_lowercase();
    if q.contains("kolkata") || q.contains("bengali") {
        return "Bengali";
    }
    if [
        "south indian",
        "tamil",
        "kannada",
        "telugu",
        "malayalam",
        "kanyakumari",
    ]
    .iter()
    .any(|kw| q.contains(kw))
    {
        return "South Indian";
    }
    if ["north indian", "punjabi"].iter().any(|kw| q.contains(kw)) {
        return "North Indian";
    }
    if ["west indian", "maharashtrian", "gujarati"]
        .iter()
        .any(|kw| q.contains(kw))
    {
        return "West Indian";
    }
    if [
        "east indian",
        "odisha",
        "oriya",
        "bhubaneswar",
        "cuttack",
        "angul",
    ]
    .iter()
    .any(|kw| q.contains(kw))
    {
        return "East Indian";
    }
    "Indian"
}

pub fn wants_table(query: &str) -> bool {
    let q = query.to_lowercase();
    [
        "table",
        "tabular",
        "chart",
        "in a table",
        "in table format",
        "as a table",
    ]
    .iter()
    .any(|kw| q.contains(kw))
}
