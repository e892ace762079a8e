mod fallback;
mod handle;
mod record;
mod table;

pub use fallback::fallback_records;
pub use handle::NutritionHandle;
pub use record::{NutritionRecord, NUMERIC_COLUMNS};
pub use table::{format_record, NutritionError, NutritionTable};
