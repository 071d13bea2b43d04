use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use daybudget_core::{
    budget::{DailyBudgetEvaluator, DailyBudgetEvaluatorTrait, EvaluationOutcome, PillState},
    currency::DefaultCurrencyFormatter,
    spends::InMemoryBudgetStore,
};

use crate::config::{Config, LogFormat};
use crate::snapshot_file::load_spends_state;

pub struct AppState {
    pub store: Arc<InMemoryBudgetStore>,
    pub evaluator: Arc<dyn DailyBudgetEvaluatorTrait>,
}

pub fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let spends = load_spends_state(&config.snapshot_path)?;
    tracing::info!(
        "Loaded budget snapshot from {} (period active: {})",
        config.snapshot_path.display(),
        spends.is_period_active()
    );

    let store = Arc::new(InMemoryBudgetStore::new(spends));
    let formatter = Arc::new(DefaultCurrencyFormatter::new(config.format_settings.clone()));
    let evaluator: Arc<dyn DailyBudgetEvaluatorTrait> =
        Arc::new(DailyBudgetEvaluator::new(store.clone(), formatter));

    Ok(AppState { store, evaluator })
}

/// Human-readable lines for one evaluation.
pub fn render_outcome(outcome: &EvaluationOutcome, pill: &PillState) -> Vec<String> {
    match outcome {
        EvaluationOutcome::NotSet => vec!["No budgeting period is set.".to_string()],
        EvaluationOutcome::Skipped => {
            vec!["Today's budget has not been calculated yet.".to_string()]
        }
        EvaluationOutcome::Published(_) | EvaluationOutcome::Superseded => {
            let (including, excluding) = pill.progress();
            vec![
                format!("State:             {}", pill.state),
                format!("Left today:        {}", pill.display_remaining_today),
                format!("Next daily budget: {}", pill.display_next_daily_budget),
                format!(
                    "Progress:          {:.0}% -> {:.0}%",
                    including * 100.0,
                    excluding * 100.0
                ),
            ]
        }
    }
}
