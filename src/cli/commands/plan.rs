//! Plan Command
//!
//! Usage:
//!   questcraft plan <QUESTION> [--provider deepseek] [--scenario expand] [--format json] [--server URL]

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, is_json};
use crate::plan::{PlanRequest, ProviderKind, Scenario};
use crate::types::Result;

pub struct PlanOptions {
    pub question: String,
    pub provider: Option<ProviderKind>,
    pub scenario: Scenario,
    pub format: String,
    pub server: Option<String>,
}

pub async fn run(options: PlanOptions) -> Result<()> {
    let ctx = CommandContext::load(options.provider, options.server.as_deref())?;
    let request = PlanRequest::new(options.question, ctx.provider, options.scenario);
    let response = ctx.planner.plan(&request).await?;

    if is_json(&options.format) {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        Output::new().plan(&response);
    }
    Ok(())
}
