//! Fixed lookup tables keyed by category name
//!
//! Keys are exact, case-sensitive category names. Anything not listed gets
//! the documented default.

/// Color for categories without a table entry
pub const DEFAULT_CATEGORY_COLOR: &str = "#512BD4";

/// Display color for an expense category
pub fn category_color(category: &str) -> &'static str {
    match category {
        "Food & Dining" => "#FF6B6B",
        "Transportation" => "#4ECDC4",
        "Shopping" => "#45B7D1",
        "Entertainment" => "#96CEB4",
        "Bills & Utilities" => "#FFEAA7",
        "Healthcare" => "#DDA0DD",
        "Education" => "#98D8C8",
        "Travel" => "#F7DC6F",
        "Subscriptions" => "#BB8FCE",
        "Housing & Rent" => "#85C1E9",
        "Personal Care" => "#F1948A",
        "Gifts & Donations" => "#82E0AA",
        "Other" => "#AEB6BF",
        _ => DEFAULT_CATEGORY_COLOR,
    }
}

/// Advice for the top spending category
pub fn category_tip(category: &str) -> String {
    match category {
        "Food & Dining" => "Food & Dining is your largest expense. Try meal prepping on weekends, \
            cooking in bulk, and limiting takeout to once or twice a week."
            .to_string(),
        "Transportation" => "Transportation is your largest expense. Consider carpooling, public \
            transit, or combining errands into fewer trips to cut fuel and ride costs."
            .to_string(),
        "Shopping" => "Shopping is your largest expense. Try a 48-hour rule before non-essential \
            purchases and unsubscribe from retailer marketing emails."
            .to_string(),
        "Entertainment" => "Entertainment is your largest expense. Look for free local events, \
            share streaming plans, and set a monthly fun budget."
            .to_string(),
        "Subscriptions" => "Subscriptions are your largest expense. Review every recurring charge \
            and cancel the services you haven't used in the last month."
            .to_string(),
        "Housing & Rent" => "Housing is your largest expense. If it's above 30% of your income, \
            consider negotiating your lease, finding a roommate, or refinancing."
            .to_string(),
        other => format!(
            "{} is your largest expense. Review these transactions to find purchases you can \
            reduce or skip next period.",
            other
        ),
    }
}
