//! Event wiring for product tours.
//!
//! Attaches the global listeners a tour needs while it runs:
//! - keyup: Escape / ArrowLeft / ArrowRight become emitted tour commands
//! - keydown: Tab and Shift+Tab are trapped inside the popover and the
//!   highlighted element
//! - resize / scroll: coalesced into one highlight refresh per frame
//! - capture-phase click interception for tour-owned elements
//!
//! Everything runs against a [`tourdom::Window`]. Shared state lives in an
//! explicit [`TourContext`] passed to every handler.

pub mod click;
pub mod config;
pub mod context;
pub mod emitter;
pub mod keyboard;
pub mod logging;
pub mod refresh;
pub mod state;
pub mod wiring;

pub use click::{
    on_driver_click, ClickInterception, InterceptRole, PreventPredicate, INTERCEPTED_EVENTS,
};
pub use config::{Config, ConfigError, ConfigValue, OverlayClickBehavior, PopoverButton};
pub use context::{HighlightRefresher, TourContext};
pub use emitter::{Emitter, TourEvent};
pub use keyboard::{on_keyup, trap_focus};
pub use refresh::request_refresh;
pub use state::{Popover, StateKey, StateStore, StateValue};
pub use wiring::EventWiring;
