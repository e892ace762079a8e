//! Production tools available to the planner. Each is a pure function of
//! its named parameters (plus the request context) returning text; tools
//! never call other tools.

mod compare;
mod facts;
mod persona;
mod plan;
mod recipe;
mod weather;

pub use compare::ComparisonTool;
pub use facts::NutritionFactsTool;
pub use persona::{GreetingTool, IdentityTool, GREETING, IDENTITY};
pub use plan::{DietPlanTool, ReformatTool};
pub use recipe::RecipeTool;
pub use weather::WeatherTool;

use std::sync::Arc;

use aahar_core::{CompletionModel, EnsembleModel, Retriever, WeatherProvider};
use aahar_nutrition::NutritionHandle;

use crate::registry::{RegistryError, ToolRegistry};

/// Wire the full production tool set against its collaborators.
pub fn production_registry(
    model: Arc<dyn CompletionModel>,
    model_name: impl Into<String>,
    retriever: Arc<dyn Retriever>,
    ensemble: Arc<dyn EnsembleModel>,
    weather: Arc<dyn WeatherProvider>,
    nutrition: Arc<NutritionHandle>,
) -> Result<ToolRegistry, RegistryError> {
    let model_name = model_name.into();
    ToolRegistry::builder()
        .register(Arc::new(GreetingTool))
        .register(Arc::new(IdentityTool))
        .register(Arc::new(ReformatTool::new(
            model.clone(),
            model_name.clone(),
            nutrition.clone(),
        )))
        .register(Arc::new(DietPlanTool::new(
            model.clone(),
            model_name.clone(),
            retriever,
            ensemble,
            nutrition.clone(),
        )))
        .register(Arc::new(RecipeTool::new(nutrition.clone())))
        .register(Arc::new(NutritionFactsTool::new(nutrition.clone())))
        .register(Arc::new(ComparisonTool::new(nutrition)))
        .register(Arc::new(WeatherTool::new(model, model_name, weather)))
        .build()
}
