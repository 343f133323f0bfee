//! Resize/scroll debouncing.

use std::rc::Rc;

use log::trace;
use tourdom::Window;

use crate::context::TourContext;
use crate::state::StateKey;

/// Schedule a highlight refresh on the next animation frame.
///
/// Any refresh still pending from an earlier call is cancelled first, so
/// however many requests arrive within a frame, one refresh runs.
pub fn request_refresh(window: &mut Window, cx: &Rc<TourContext>) {
    let pending = cx.state().resize_timeout();
    if let Some(handle) = pending {
        window.cancel_animation_frame(handle);
    }

    let frame_cx = Rc::clone(cx);
    let handle = window.request_animation_frame(move |w| {
        trace!("[refresh] refreshing active highlight");
        frame_cx
            .highlight()
            .refresh_active_highlight(w, &frame_cx);
    });

    cx.state_mut().set(StateKey::ResizeTimeout, handle);
}
