//! Value Objects - Immutable, identity-less domain primitives

mod pipeline_state;
mod provider_id;
mod stage;
mod turn_source;

pub use pipeline_state::PipelineState;
pub use provider_id::ProviderId;
pub use stage::Stage;
pub use turn_source::TurnSource;
