//! Spending analyzer - orchestrates one analysis call

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{NaiveDate, Utc};

use crate::ai::{GenerationClient, TextGenerator};
use crate::config::GenerationConfig;
use crate::error::Result;
use crate::period::Period;
use crate::store::TransactionStore;

use super::aggregate::{aggregate, Aggregate};
use super::format::{money, period_label};
use super::insights::{InsightGenerator, InsightInput};
use super::recommend::{GenerationSettings, RecommendationEngine, RecommendationInput};
use super::types::SpendingAnalysis;

pub const EMPTY_PERIOD_SUMMARY: &str =
    "No transactions found for the selected period. Start adding transactions to get personalized insights!";

pub const EMPTY_PERIOD_RECOMMENDATION: &str =
    "Log your income and expenses for this period to receive personalized recommendations.";

/// Runs the analysis pipeline against a transaction store
///
/// Safe to share across tasks; calls are independent apart from the
/// capability flag, which only ever records the latest load attempt.
pub struct SpendingAnalyzer<S> {
    store: S,
    insights: InsightGenerator,
    recommender: RecommendationEngine,
    capability_available: AtomicBool,
}

impl<S: TransactionStore> SpendingAnalyzer<S> {
    pub fn new(store: S, generator: GenerationClient, settings: GenerationSettings) -> Self {
        Self {
            store,
            insights: InsightGenerator::new(),
            recommender: RecommendationEngine::new(generator, settings),
            capability_available: AtomicBool::new(false),
        }
    }

    /// Analyzer without a generation capability
    pub fn rule_based(store: S) -> Self {
        Self::new(store, GenerationClient::disabled(), GenerationSettings::default())
    }

    /// Analyzer using the backend selected by configuration
    pub fn from_config(store: S, config: &GenerationConfig) -> Self {
        Self::new(
            store,
            GenerationClient::from_config(config),
            GenerationSettings::from(config),
        )
    }

    /// Replace the insight battery
    pub fn with_insights(mut self, insights: InsightGenerator) -> Self {
        self.insights = insights;
        self
    }

    /// Result of the most recent capability load attempt
    pub fn capability_available(&self) -> bool {
        self.capability_available.load(Ordering::SeqCst)
    }

    /// Load the generation capability if it isn't loaded yet
    ///
    /// Never fails; an unreachable backend leaves the flag false.
    pub async fn ensure_capability(&self) -> bool {
        if self.capability_available() {
            return true;
        }

        let generator = self.recommender.generator();
        if generator.is_disabled() {
            return false;
        }

        let loaded = generator.try_load().await;
        self.capability_available.store(loaded, Ordering::SeqCst);
        if loaded {
            tracing::info!(backend = generator.name(), "Text generation capability loaded");
        } else {
            tracing::debug!(backend = generator.name(), "Text generation capability unavailable");
        }
        loaded
    }

    /// Analyze a user's transactions within `[from, to]`
    ///
    /// Only a store failure is an error.
    pub async fn analyze(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<SpendingAnalysis> {
        let available = self.ensure_capability().await;
        let transactions = self.store.transactions_in_range(user_id, from, to).await?;
        let label = period_label(from, to);

        tracing::debug!(
            user = user_id,
            %from,
            %to,
            count = transactions.len(),
            assisted = available,
            "Analyzing spending"
        );

        if transactions.is_empty() {
            return Ok(empty_analysis(label));
        }

        let agg = aggregate(&transactions);
        let insights = self.insights.generate(&InsightInput {
            transactions: &transactions,
            aggregate: &agg,
        });
        let recommendation = self
            .recommender
            .recommend(
                &RecommendationInput {
                    transactions: &transactions,
                    aggregate: &agg,
                },
                available,
            )
            .await;

        tracing::info!(
            user = user_id,
            insights = insights.len(),
            categories = agg.breakdowns.len(),
            "Spending analysis complete"
        );

        Ok(SpendingAnalysis {
            summary: summary_sentence(&label, &agg),
            insights,
            category_breakdowns: agg.breakdowns,
            total_income: agg.total_income,
            total_expenses: agg.total_expenses,
            savings_rate: agg.savings_rate,
            recommendation,
            analyzed_at: Utc::now(),
            period_label: label,
        })
    }

    /// Resolve a period against `now`, then analyze it
    pub async fn analyze_period(
        &self,
        user_id: &str,
        period: Period,
        now: NaiveDate,
    ) -> Result<SpendingAnalysis> {
        let (from, to) = period.resolve(now);
        self.analyze(user_id, from, to).await
    }
}

fn empty_analysis(period_label: String) -> SpendingAnalysis {
    SpendingAnalysis {
        summary: EMPTY_PERIOD_SUMMARY.to_string(),
        insights: vec![],
        category_breakdowns: vec![],
        total_income: 0.0,
        total_expenses: 0.0,
        savings_rate: 0.0,
        recommendation: EMPTY_PERIOD_RECOMMENDATION.to_string(),
        analyzed_at: Utc::now(),
        period_label,
    }
}

fn summary_sentence(label: &str, agg: &Aggregate) -> String {
    let net = agg.net();
    let balance = if net >= 0.0 { "positive" } else { "negative" };
    format!(
        "During {}, you earned {} and spent {}, leaving a {} balance of {}. Your savings rate is {:.1}%.",
        label,
        money(agg.total_income),
        money(agg.total_expenses),
        balance,
        money(net.abs()),
        agg.savings_rate
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MockBackend, MockReply};
    use crate::analysis::test_support::{memory_store, new_expense, new_income};
    use crate::error::Error;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use std::sync::Arc;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    struct FailingStore;

    #[async_trait]
    impl TransactionStore for FailingStore {
        async fn transactions_in_range(
            &self,
            _user_id: &str,
            _from: NaiveDate,
            _to: NaiveDate,
        ) -> Result<Vec<crate::models::Transaction>> {
            Err(Error::NotFound("store offline".into()))
        }
    }

    #[tokio::test]
    async fn test_empty_period() {
        let analyzer = SpendingAnalyzer::rule_based(MemoryStore::new());
        let analysis = analyzer
            .analyze("alice", d("2024-03-01"), d("2024-03-15"))
            .await
            .unwrap();

        assert_eq!(analysis.summary, EMPTY_PERIOD_SUMMARY);
        assert!(analysis.insights.is_empty());
        assert!(analysis.category_breakdowns.is_empty());
        assert_eq!(analysis.total_income, 0.0);
        assert_eq!(analysis.total_expenses, 0.0);
        assert!(!analysis.recommendation.is_empty());
        assert_eq!(analysis.period_label, "Mar 01 - Mar 15, 2024");
    }

    #[tokio::test]
    async fn test_empty_period_never_calls_backend() {
        let mock = MockBackend::new();
        let analyzer = SpendingAnalyzer::new(
            MemoryStore::new(),
            GenerationClient::mock(mock.clone()),
            GenerationSettings::default(),
        );
        analyzer
            .analyze("alice", d("2024-03-01"), d("2024-03-15"))
            .await
            .unwrap();

        assert_eq!(mock.load_calls(), 1);
        assert!(mock.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_full_analysis() {
        let store = memory_store(
            "alice",
            &[
                new_income(2000.0, "Salary", "2024-03-09"),
                new_expense(300.0, "Food & Dining", "2024-03-09"),
            ],
        );
        let analyzer = SpendingAnalyzer::rule_based(store);
        let analysis = analyzer
            .analyze("alice", d("2024-03-01"), d("2024-03-15"))
            .await
            .unwrap();

        assert_eq!(analysis.total_income, 2000.0);
        assert_eq!(analysis.total_expenses, 300.0);
        assert!((analysis.savings_rate - 85.0).abs() < 1e-9);
        assert_eq!(analysis.insights[0].title, "Excellent Savings!");
        assert_eq!(
            analysis.summary,
            "During Mar 01 - Mar 15, 2024, you earned $2,000.00 and spent $300.00, \
             leaving a positive balance of $1,700.00. Your savings rate is 85.0%."
        );
        assert_eq!(analysis.category_breakdowns.len(), 1);
    }

    #[tokio::test]
    async fn test_negative_balance_summary() {
        let store = memory_store(
            "alice",
            &[
                new_income(100.0, "Salary", "2024-03-04"),
                new_expense(150.0, "Shopping", "2024-03-05"),
            ],
        );
        let analysis = SpendingAnalyzer::rule_based(store)
            .analyze("alice", d("2024-03-01"), d("2024-03-31"))
            .await
            .unwrap();

        assert!(analysis.summary.contains("negative balance of $50.00"));
        assert!(analysis.summary.contains("-50.0%"));
    }

    #[tokio::test]
    async fn test_rule_based_is_idempotent() {
        let store = memory_store(
            "alice",
            &[
                new_income(1000.0, "Salary", "2024-03-04"),
                new_expense(420.0, "Housing & Rent", "2024-03-05"),
                new_expense(7.5, "Food & Dining", "2024-03-09"),
            ],
        );
        let analyzer = SpendingAnalyzer::rule_based(store);
        let first = analyzer
            .analyze("alice", d("2024-03-01"), d("2024-03-31"))
            .await
            .unwrap();
        let second = analyzer
            .analyze("alice", d("2024-03-01"), d("2024-03-31"))
            .await
            .unwrap();

        assert_eq!(first.recommendation, second.recommendation);
        assert_eq!(first.insights, second.insights);
        assert_eq!(first.category_breakdowns, second.category_breakdowns);
    }

    #[tokio::test]
    async fn test_assisted_recommendation() {
        let mock = MockBackend::replying(MockReply::Text("Cook at home twice more a week.".into()));
        let store = memory_store("alice", &[new_expense(80.0, "Food & Dining", "2024-03-05")]);
        let analyzer = SpendingAnalyzer::new(
            store,
            GenerationClient::mock(mock.clone()),
            GenerationSettings::default(),
        );

        let analysis = analyzer
            .analyze("alice", d("2024-03-01"), d("2024-03-31"))
            .await
            .unwrap();

        assert!(analyzer.capability_available());
        assert_eq!(analysis.recommendation, "Cook at home twice more a week.");
        // Insights are rule-based regardless of the capability
        assert_eq!(analysis.insights[0].title, "Room for Improvement");
    }

    #[tokio::test]
    async fn test_capability_loaded_once() {
        let mock = MockBackend::new();
        let store = memory_store("alice", &[new_expense(80.0, "Shopping", "2024-03-05")]);
        let analyzer = SpendingAnalyzer::new(
            store,
            GenerationClient::mock(mock.clone()),
            GenerationSettings::default(),
        );

        for _ in 0..3 {
            analyzer
                .analyze("alice", d("2024-03-01"), d("2024-03-31"))
                .await
                .unwrap();
        }
        assert_eq!(mock.load_calls(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_capability_retried_and_falls_back() {
        let mock = MockBackend::unhealthy();
        let store = memory_store("alice", &[new_expense(80.0, "Shopping", "2024-03-05")]);
        let analyzer = SpendingAnalyzer::new(
            store,
            GenerationClient::mock(mock.clone()),
            GenerationSettings::default(),
        );

        let analysis = analyzer
            .analyze("alice", d("2024-03-01"), d("2024-03-31"))
            .await
            .unwrap();
        analyzer
            .analyze("alice", d("2024-03-01"), d("2024-03-31"))
            .await
            .unwrap();

        assert!(!analyzer.capability_available());
        assert_eq!(mock.load_calls(), 2);
        assert!(mock.prompts().is_empty());
        assert!(analysis.recommendation.contains("Shopping is your largest expense."));
    }

    #[tokio::test]
    async fn test_ollama_backend_end_to_end() {
        use crate::ai::OllamaBackend;
        use crate::test_utils::MockOllamaServer;

        let server = MockOllamaServer::start().await;
        let store = memory_store(
            "alice",
            &[
                new_expense(90.0, "Travel", "2024-03-05"),
                new_expense(20.0, "Shopping", "2024-03-06"),
            ],
        );
        let analyzer = SpendingAnalyzer::new(
            store,
            GenerationClient::Ollama(OllamaBackend::new(&server.url(), "llama3.2")),
            GenerationSettings::default(),
        );

        let analysis = analyzer
            .analyze("alice", d("2024-03-01"), d("2024-03-31"))
            .await
            .unwrap();
        assert_eq!(
            analysis.recommendation,
            "Trim Travel first, then automate a transfer to savings on payday."
        );
    }

    struct LargestPurchaseCheck;

    impl crate::analysis::InsightCheck for LargestPurchaseCheck {
        fn id(&self) -> &'static str {
            "largest_purchase"
        }

        fn evaluate(&self, input: &InsightInput<'_>) -> Option<crate::analysis::SpendingInsight> {
            let largest = input
                .transactions
                .iter()
                .filter(|t| t.is_expense())
                .map(|t| t.amount)
                .fold(0.0, f64::max);
            Some(crate::analysis::SpendingInsight::new(
                crate::analysis::InsightKind::Neutral,
                "🔝",
                "Largest Purchase",
                format!("Your largest purchase was {}.", money(largest)),
            ))
        }
    }

    #[tokio::test]
    async fn test_custom_insight_battery() {
        let mut insights = InsightGenerator::empty();
        insights.register(Box::new(crate::analysis::SavingsTierCheck));
        insights.register(Box::new(LargestPurchaseCheck));

        let store = memory_store(
            "alice",
            &[
                new_income(1000.0, "Salary", "2024-03-01"),
                new_expense(4.0, "Food & Dining", "2024-03-02"),
                new_expense(4.0, "Food & Dining", "2024-03-03"),
                new_expense(4.0, "Food & Dining", "2024-03-04"),
                new_expense(4.0, "Food & Dining", "2024-03-05"),
                new_expense(4.0, "Food & Dining", "2024-03-06"),
                new_expense(250.0, "Travel", "2024-03-09"),
            ],
        );
        let analysis = SpendingAnalyzer::rule_based(store)
            .with_insights(insights)
            .analyze("alice", d("2024-03-01"), d("2024-03-31"))
            .await
            .unwrap();

        let titles: Vec<&str> = analysis.insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Excellent Savings!", "Largest Purchase"]);
        assert_eq!(
            analysis.insights[1].description,
            "Your largest purchase was $250.00."
        );
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let analyzer = SpendingAnalyzer::rule_based(FailingStore);
        let result = analyzer.analyze("alice", d("2024-03-01"), d("2024-03-31")).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_analyze_period_resolves_range() {
        let store = memory_store(
            "alice",
            &[
                new_expense(10.0, "Shopping", "2024-02-28"),
                new_expense(20.0, "Shopping", "2024-03-01"),
            ],
        );
        let analysis = SpendingAnalyzer::rule_based(store)
            .analyze_period("alice", Period::ThisMonth, d("2024-03-15"))
            .await
            .unwrap();

        assert_eq!(analysis.total_expenses, 20.0);
        assert_eq!(analysis.period_label, "Mar 01 - Mar 15, 2024");
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_independent() {
        let store = memory_store(
            "alice",
            &[
                new_income(500.0, "Salary", "2024-01-10"),
                new_expense(50.0, "Shopping", "2024-03-05"),
            ],
        );
        let analyzer = Arc::new(SpendingAnalyzer::rule_based(store));

        let month = {
            let analyzer = analyzer.clone();
            tokio::spawn(async move {
                analyzer
                    .analyze_period("alice", Period::ThisMonth, d("2024-03-15"))
                    .await
            })
        };
        let year = {
            let analyzer = analyzer.clone();
            tokio::spawn(async move {
                analyzer
                    .analyze_period("alice", Period::ThisYear, d("2024-03-15"))
                    .await
            })
        };

        let month = month.await.unwrap().unwrap();
        let year = year.await.unwrap().unwrap();
        assert_eq!(month.total_income, 0.0);
        assert_eq!(year.total_income, 500.0);
    }
}
