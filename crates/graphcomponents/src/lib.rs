//! Standard component library
//!
//! Collection of built-in components for common graph definitions

mod debug;
mod delay;
mod passthrough;

pub use debug::DebugComponent;
pub use delay::DelayComponent;
pub use passthrough::PassthroughComponent;

use graphruntime::ComponentRegistry;
use std::sync::Arc;

/// Register all standard components with a registry
pub fn register_all(registry: &mut ComponentRegistry) {
    registry.register(Arc::new(debug::DebugComponentBuilder));
    registry.register(Arc::new(delay::DelayComponentBuilder));
    registry.register(Arc::new(passthrough::PassthroughComponentBuilder));
}
