//! The context shared by every tour handler.

use std::cell::{Ref, RefCell, RefMut};

use tourdom::{DocumentFocusScanner, FocusScanner, Window};

use crate::config::Config;
use crate::emitter::Emitter;
use crate::state::StateStore;

/// Recomputes the highlight overlay and popover position for the active
/// element. Geometry lives outside this crate.
pub trait HighlightRefresher {
    fn refresh_active_highlight(&self, window: &mut Window, cx: &TourContext);
}

impl<F> HighlightRefresher for F
where
    F: Fn(&mut Window, &TourContext),
{
    fn refresh_active_highlight(&self, window: &mut Window, cx: &TourContext) {
        self(window, cx)
    }
}

/// State, config and collaborators for one tour.
///
/// Handlers hold an `Rc<TourContext>`. Borrows of the state store are
/// short-lived and never held across a call back into the window.
pub struct TourContext {
    state: RefCell<StateStore>,
    config: RefCell<Config>,
    emitter: Emitter,
    scanner: Box<dyn FocusScanner>,
    highlight: Box<dyn HighlightRefresher>,
}

impl TourContext {
    pub fn new(config: Config, highlight: impl HighlightRefresher + 'static) -> Self {
        Self {
            state: RefCell::new(StateStore::new()),
            config: RefCell::new(config),
            emitter: Emitter::new(),
            scanner: Box::new(DocumentFocusScanner),
            highlight: Box::new(highlight),
        }
    }

    /// Replace the focus scanner.
    pub fn with_scanner(mut self, scanner: impl FocusScanner + 'static) -> Self {
        self.scanner = Box::new(scanner);
        self
    }

    pub fn state(&self) -> Ref<'_, StateStore> {
        self.state.borrow()
    }

    pub fn state_mut(&self) -> RefMut<'_, StateStore> {
        self.state.borrow_mut()
    }

    pub fn config(&self) -> Ref<'_, Config> {
        self.config.borrow()
    }

    /// Swap in a new configuration.
    pub fn configure(&self, config: Config) {
        *self.config.borrow_mut() = config;
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    pub fn scanner(&self) -> &dyn FocusScanner {
        self.scanner.as_ref()
    }

    pub fn highlight(&self) -> &dyn HighlightRefresher {
        self.highlight.as_ref()
    }
}
