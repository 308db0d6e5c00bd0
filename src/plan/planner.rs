//! Two-call planning pipeline.
//!
//! 1. Classification: ask the model how hard the question is.
//! 2. Decomposition: ask for a JSON array of tasks shaped by that
//!    difficulty and the scenario, then normalize what comes back.

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::{PlanRequest, PlanResponse, ProviderKind, parse_difficulty};
use crate::ai::{
    ChatMessage, SharedModel, classify_messages, create_provider, decompose_messages,
    parse_plan_items, with_timeout,
};
use crate::config::Config;
use crate::constants::{network, provider};
use crate::types::{QuestError, Result};

/// Anything that can turn a question into a plan
#[async_trait]
pub trait PlanSource: Send + Sync {
    async fn plan(&self, request: &PlanRequest) -> Result<PlanResponse>;
}

/// In-process planner backed by configured chat models
pub struct Planner {
    models: HashMap<ProviderKind, SharedModel>,
    timeout: Duration,
    max_retries: usize,
}

impl Planner {
    pub fn new(timeout: Duration, max_retries: usize) -> Self {
        Self {
            models: HashMap::new(),
            timeout,
            max_retries,
        }
    }

    /// Build clients for every provider with complete settings.
    ///
    /// Incomplete providers are skipped; requests routed to them fail with
    /// `ProviderNotConfigured`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut planner = Self::new(
            Duration::from_secs(config.llm.timeout_secs),
            config.llm.max_retries,
        );

        for kind in ProviderKind::ALL {
            let settings = config.providers.get(kind);
            match create_provider(kind, &settings, &config.llm)? {
                Some(model) => {
                    info!("Provider {} ready (model: {})", kind, model.model());
                    planner.models.insert(kind, model);
                }
                None => warn!(
                    "Provider {} not configured: set {label}_API_KEY, {label}_ENDPOINT and {label}_MODEL",
                    kind,
                    label = kind.env_label()
                ),
            }
        }

        Ok(planner)
    }

    pub fn with_model(mut self, kind: ProviderKind, model: SharedModel) -> Self {
        self.models.insert(kind, model);
        self
    }

    pub fn is_configured(&self, kind: ProviderKind) -> bool {
        self.models.contains_key(&kind)
    }

    /// Providers that can serve requests, in declaration order
    pub fn configured(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| self.is_configured(*kind))
            .collect()
    }

    fn model_for(&self, kind: ProviderKind) -> Result<&SharedModel> {
        self.models
            .get(&kind)
            .ok_or(QuestError::ProviderNotConfigured {
                label: kind.env_label(),
            })
    }

    /// One model call with timeout and retry on recoverable failures
    async fn call(
        &self,
        model: &SharedModel,
        messages: &[ChatMessage],
        operation: &str,
    ) -> Result<String> {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(provider::RETRY_BASE_DELAY_MS))
            .with_max_delay(Duration::from_secs(provider::RETRY_MAX_DELAY_SECS))
            .with_max_times(self.max_retries);

        (|| with_timeout(self.timeout, model.complete(messages), operation))
            .retry(backoff)
            .when(|e: &QuestError| e.is_recoverable())
            .adjust(|err: &QuestError, delay: Option<Duration>| {
                delay.map(|d| err.retry_hint().map_or(d, |hint| d.max(hint)))
            })
            .notify(|err: &QuestError, delay: Duration| {
                warn!(
                    "{} via {} failed, retrying in {:?}: {}",
                    operation,
                    model.name(),
                    delay,
                    err
                );
            })
            .await
    }

    #[instrument(skip(self, request), fields(provider = %request.provider, scenario = %request.scenario))]
    pub async fn plan(&self, request: &PlanRequest) -> Result<PlanResponse> {
        let question = request.question.trim();
        if question.is_empty() {
            return Err(QuestError::EmptyQuestion);
        }

        let model = self.model_for(request.provider)?;

        let verdict = self
            .call(model, &classify_messages(question), "difficulty classification")
            .await?;
        let difficulty = parse_difficulty(&verdict);
        debug!("Classified as {} ({:?})", difficulty, verdict.trim());

        let raw = self
            .call(
                model,
                &decompose_messages(difficulty, request.scenario, question),
                "task decomposition",
            )
            .await?;

        let items = parse_plan_items(&raw);
        if items.is_empty() {
            warn!("Decomposition returned no usable tasks ({} chars)", raw.len());
            return Err(QuestError::Unparseable { raw });
        }

        info!("Planned {} tasks ({})", items.len(), difficulty);
        Ok(PlanResponse {
            difficulty,
            scenario: request.scenario,
            items,
        })
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(Duration::from_secs(network::DEFAULT_TIMEOUT_SECS), 0)
    }
}

#[async_trait]
impl PlanSource for Planner {
    async fn plan(&self, request: &PlanRequest) -> Result<PlanResponse> {
        Planner::plan(self, request).await
    }
}
