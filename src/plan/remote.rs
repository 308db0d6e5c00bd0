//! Client for a running planning server (`POST {base}/plan`).

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use super::{PlanRequest, PlanResponse, PlanSource};
use crate::constants::network::{CONNECTION_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use crate::types::{QuestError, Result};

const UNREACHABLE: &str = "网络请求失败，请检查后端服务是否运行";
const MISSING_ITEMS: &str = "未返回清单任务";

#[derive(Debug, Clone)]
pub struct RemotePlanner {
    client: reqwest::Client,
    plan_url: Url,
}

impl RemotePlanner {
    /// `base` is the API root, e.g. `http://localhost:3001` or `https://host/api`
    pub fn new(base: &str) -> Result<Self> {
        let mut base = Url::parse(base.trim())
            .map_err(|e| QuestError::Config(format!("Invalid server URL '{}': {}", base, e)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let plan_url = base
            .join("plan")
            .map_err(|e| QuestError::Config(format!("Invalid server URL: {}", e)))?;

        // Two model calls happen server-side, each with its own timeout
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECTION_TIMEOUT_SECS))
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS * 3))
            .build()?;

        Ok(Self { client, plan_url })
    }

    pub fn plan_url(&self) -> &Url {
        &self.plan_url
    }
}

#[async_trait]
impl PlanSource for RemotePlanner {
    #[instrument(skip(self, request), fields(url = %self.plan_url))]
    async fn plan(&self, request: &PlanRequest) -> Result<PlanResponse> {
        let response = self
            .client
            .post(self.plan_url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                debug!("Request failed: {}", e);
                QuestError::Api(UNREACHABLE.to_string())
            })?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP错误: {}", status.as_u16()));
            return Err(QuestError::Api(message));
        }

        if !body.get("items").is_some_and(Value::is_array) {
            return Err(QuestError::Api(MISSING_ITEMS.to_string()));
        }

        Ok(serde_json::from_value(body)?)
    }
}
