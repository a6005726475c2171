//! Recommendation text for weak categories.

use super::score::ScoreCategory;

/// The two fixed recommendations for a category.
///
/// Text is stable across releases; dashboards key on it.
pub fn category_recommendations(category: ScoreCategory) -> [&'static str; 2] {
    match category {
        ScoreCategory::Liquidity => [
            "Improve cash runway by reducing burn rate or raising capital",
            "Optimize working capital management",
        ],
        ScoreCategory::Growth => [
            "Accelerate customer acquisition through better marketing",
            "Improve sales pipeline conversion rates",
        ],
        ScoreCategory::Profitability => [
            "Increase gross margins through pricing optimization",
            "Reduce operational costs and improve efficiency",
        ],
        ScoreCategory::Efficiency => [
            "Improve CAC payback period through better sales efficiency",
            "Optimize marketing spend allocation",
        ],
        ScoreCategory::Retention => [
            "Reduce customer churn through better onboarding",
            "Increase expansion revenue from existing customers",
        ],
    }
}

/// Collect recommendations for every category scoring below `threshold`.
///
/// `scores` must be in category order; output order follows it, with no
/// de-duplication or prioritization beyond source order.
pub(crate) fn generate(scores: &[(ScoreCategory, u8)], threshold: u8) -> Vec<String> {
    let mut recommendations = Vec::new();
    for &(category, score) in scores {
        if score < threshold {
            for text in category_recommendations(category) {
                recommendations.push(text.to_string());
            }
        }
    }
    recommendations
}
