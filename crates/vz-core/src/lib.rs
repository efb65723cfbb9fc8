pub mod ids;
mod effect_types;

pub use effect_types::Effect;
pub use ids::nano_id;
