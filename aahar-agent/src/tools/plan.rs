use std::collections::HashMap;
use std::sync::Arc;

use aahar_core::{
    CompletionModel, EnsembleModel, LlmRequest, PromptTemplate, RequestContext, Retriever, Tool,
    ToolError,
};
use aahar_nutrition::{format_record, NutritionHandle, NutritionTable};
use serde_json::Value;

use crate::action::PlanRequest;
use crate::prompts::{merge_prompt_default, merge_prompt_table, rag_prompt};

const GENERATION_TEMPERATURE: f32 = 0.5;
const RAG_TOP_K: usize = 5;

fn merge_template(wants_table: bool) -> PromptTemplate {
    if wants_table {
        merge_prompt_table()
    } else {
        merge_prompt_default()
    }
}

fn merge_vars(
    plan: &PlanRequest,
    rag_section: String,
    additional: String,
    nutrition_section: String,
) -> HashMap<&'static str, String> {
    [
        ("rag_section", rag_section),
        ("additional_suggestions_section", additional),
        ("nutrition_section", nutrition_section),
        ("dietary_type", plan.dietary_type.clone()),
        ("goal", plan.goal.clone()),
        ("region", plan.region.clone()),
    ]
    .into_iter()
    .collect()
}

fn suggestion_bullets(table: &NutritionTable, plan: &PlanRequest, limit: usize) -> String {
    let suggestions = table.regional_suggestions(&plan.region, &plan.dietary_type, &plan.goal);
    suggestions
        .iter()
        .take(limit)
        .map(|record| {
            format!(
                "- {} ({} kcal, {}g protein)",
                record.dish_name,
                record
                    .calories
                    .map_or_else(|| "N/A".to_string(), |v| v.to_string()),
                record
                    .protein
                    .map_or_else(|| "N/A".to_string(), |v| v.to_string()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate a fresh diet plan: knowledge-base answer, ensemble suggestions,
/// and dataset context merged into one response. Every collaborator failure
/// degrades to inline text; this tool only errs on argument decoding.
pub struct DietPlanTool {
    model: Arc<dyn CompletionModel>,
    model_name: String,
    retriever: Arc<dyn Retriever>,
    ensemble: Arc<dyn EnsembleModel>,
    nutrition: Arc<NutritionHandle>,
}

impl DietPlanTool {
    pub fn new(
        model: Arc<dyn CompletionModel>,
        model_name: impl Into<String>,
        retriever: Arc<dyn Retriever>,
        ensemble: Arc<dyn EnsembleModel>,
        nutrition: Arc<NutritionHandle>,
    ) -> Self {
        Self {
            model,
            model_name: model_name.into(),
            retriever,
            ensemble,
            nutrition,
        }
    }

    async fn rag_answer(&self, plan: &PlanRequest, ctx: &RequestContext) -> String {
        let context = match self.retriever.retrieve(&ctx.query, RAG_TOP_K).await {
            Ok(docs) => {
                if docs.is_empty() {
                    tracing::warn!(query = %ctx.query, "no documents retrieved");
                }
                docs.iter()
                    .map(|doc| doc.document.content.as_str())
                    .collect::<Vec<_>>()
                    .join("\n\n")
            }
            Err(err) => {
                tracing::error!(error = %err, "knowledge-base retrieval failed");
                return "Error retrieving from knowledge base.".to_string();
            }
        };

        let table = self.nutrition.snapshot();
        let mut nutrition_context = String::new();
        let matches = table.search(&ctx.query, 3);
        if !matches.is_empty() {
            nutrition_context.push_str("Specific Nutrition Information:\n");
            for record in &matches {
                nutrition_context.push_str(&format_record(record));
                nutrition_context.push_str("\n\n");
            }
        }
        let bullets = suggestion_bullets(&table, plan, 5);
        if !bullets.is_empty() {
            nutrition_context.push_str(&format!(
                "Recommended {} foods for {} in {} context:\n{}",
                plan.dietary_type, plan.goal, plan.region, bullets
            ));
        }

        let vars: HashMap<&str, String> = [
            ("query", ctx.query.clone()),
            ("chat_history", ctx.history.clone()),
            ("dietary_type", plan.dietary_type.clone()),
            ("goal", plan.goal.clone()),
            ("region", plan.region.clone()),
            ("context", context),
            ("nutrition_context", nutrition_context.trim().to_string()),
        ]
        .into_iter()
        .collect();

        let request = match rag_prompt().render(&vars) {
            Ok(rendered) => LlmRequest::prompt(self.model_name.clone(), rendered)
                .with_temperature(GENERATION_TEMPERATURE),
            Err(err) => {
                tracing::error!(error = %err, "RAG prompt failed to render");
                return "Error retrieving from knowledge base.".to_string();
            }
        };

        match self.model.complete(request).await {
            Ok(response) => response.content,
            Err(err) => {
                tracing::error!(error = %err, "RAG completion failed");
                "Error retrieving from knowledge base.".to_string()
            }
        }
    }
}

#[async_trait::async_trait]
impl Tool for DietPlanTool {
    fn name(&self) -> &str {
        "generate_diet_plan"
    }

    fn description(&self) -> &str {
        "Generate new diet suggestions using the knowledge base, nutrition database, and secondary models. Input: `dietary_type`, `goal`, `region`, `wants_table`"
    }

    async fn execute(&self, args: Value, ctx: &RequestContext) -> Result<String, ToolError> {
        let plan: PlanRequest = serde_json::from_value(args)?;
        let plan = plan.refine_from_query(&ctx.query);
        tracing::info!(
            dietary_type = %plan.dietary_type,
            goal = %plan.goal,
            region = %plan.region,
            wants_table = plan.wants_table,
            "generating diet plan"
        );

        let rag_output = self.rag_answer(&plan, ctx).await;
        let suggestions = self
            .ensemble
            .suggest(&ctx.query, &plan.dietary_type, &plan.goal, &plan.region)
            .await;

        let table = self.nutrition.snapshot();
        let regional = table.regional_suggestions(&plan.region, &plan.dietary_type, &plan.goal);
        let mut nutrition_section = String::new();
        if !regional.is_empty() {
            nutrition_section.push_str("Detailed Nutrition Database Information:\n");
            for record in regional.iter().take(8) {
                nutrition_section.push_str(&format_record(record));
                nutrition_section.push('\n');
            }
        }

        let additional = format!(
            "- LLaMA: {}\n- Gemma: {}\n- Mixtral: {}",
            suggestions.get("llama").map_or("N/A", String::as_str),
            suggestions.get("gemma").map_or("N/A", String::as_str),
            suggestions.get("mixtral").map_or("N/A", String::as_str),
        );

        let vars = merge_vars(
            &plan,
            format!("Primary RAG Answer:\n{rag_output}"),
            additional,
            nutrition_section,
        );
        let request = match merge_template(plan.wants_table).render(&vars) {
            Ok(rendered) => LlmRequest::prompt(self.model_name.clone(), rendered)
                .with_temperature(GENERATION_TEMPERATURE),
            Err(err) => {
                tracing::error!(error = %err, "merge prompt failed to render");
                return Ok("Error generating comprehensive diet plan.".to_string());
            }
        };

        match self.model.complete(request).await {
            Ok(response) => Ok(response.content),
            Err(err) => {
                tracing::error!(error = %err, "merge completion failed");
                Ok("Error generating comprehensive diet plan.".to_string())
            }
        }
    }
}

/// Re-render the most recent substantial assistant answer, optionally as a
/// table, with current dataset context.
pub struct ReformatTool {
    model: Arc<dyn CompletionModel>,
    model_name: String,
    nutrition: Arc<NutritionHandle>,
}

impl ReformatTool {
    pub fn new(
        model: Arc<dyn CompletionModel>,
        model_name: impl Into<String>,
        nutrition: Arc<NutritionHandle>,
    ) -> Self {
        Self {
            model,
            model_name: model_name.into(),
            nutrition,
        }
    }
}

#[async_trait::async_trait]
impl Tool for ReformatTool {
    fn name(&self) -> &str {
        "reformat_diet_plan"
    }

    fn description(&self) -> &str {
        "Reformat previous diet plans (only if there's a substantial previous AI response). Input: `dietary_type`, `goal`, `region`, `wants_table`"
    }

    async fn execute(&self, args: Value, ctx: &RequestContext) -> Result<String, ToolError> {
        let plan: PlanRequest = serde_json::from_value(args)?;
        let plan = plan.refine_from_query(&ctx.query);
        tracing::info!(wants_table = plan.wants_table, "reformatting diet plan");

        let Some(previous) = ctx.last_answer.as_deref() else {
            return Ok("No substantial previous diet plan found to reformat.".to_string());
        };

        let table = self.nutrition.snapshot();
        let bullets: String = table
            .regional_suggestions(&plan.region, &plan.dietary_type, &plan.goal)
            .iter()
            .take(5)
            .map(|record| {
                format!(
                    "- {} ({} kcal)\n",
                    record.dish_name,
                    record
                        .calories
                        .map_or_else(|| "N/A".to_string(), |v| v.to_string())
                )
            })
            .collect();
        let nutrition_section = if bullets.is_empty() {
            String::new()
        } else {
            format!("Available Nutrition Data:\n{bullets}")
        };

        let vars = merge_vars(
            &plan,
            format!("Previous Answer to Reformat:\n{previous}"),
            String::new(),
            nutrition_section,
        );
        let rendered = merge_template(plan.wants_table)
            .render(&vars)
            .map_err(|err| ToolError::ExecutionFailed(err.to_string()))?;
        let request = LlmRequest::prompt(self.model_name.clone(), rendered)
            .with_temperature(GENERATION_TEMPERATURE);

        let response = self
            .model
            .complete(request)
            .await
            .map_err(|err| ToolError::ExecutionFailed(err.to_string()))?;
        Ok(response.content)
    }
}
