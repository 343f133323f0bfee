use std::cell::RefCell;
use std::rc::Rc;

use tourdom::Window;

#[test]
fn test_frame_runs_once_on_next_tick() {
    let mut window = Window::new(80, 24);
    let runs = Rc::new(RefCell::new(0));

    let r = Rc::clone(&runs);
    let handle = window.request_animation_frame(move |_| *r.borrow_mut() += 1);

    assert!(handle.get() > 0);
    assert!(window.is_frame_pending(handle));
    assert_eq!(*runs.borrow(), 0);

    assert_eq!(window.run_animation_frame(), 1);
    assert_eq!(window.run_animation_frame(), 0);
    assert_eq!(*runs.borrow(), 1);
    assert_eq!(window.frame_count(), 2);
}

#[test]
fn test_cancelled_frame_never_runs() {
    let mut window = Window::new(80, 24);
    let runs = Rc::new(RefCell::new(0));

    let r = Rc::clone(&runs);
    let handle = window.request_animation_frame(move |_| *r.borrow_mut() += 1);

    assert!(window.cancel_animation_frame(handle));
    assert!(!window.cancel_animation_frame(handle));
    window.run_animation_frame();

    assert_eq!(*runs.borrow(), 0);
}

#[test]
fn test_frame_requested_during_tick_waits() {
    let mut window = Window::new(80, 24);
    let log = Rc::new(RefCell::new(Vec::new()));

    let outer_log = Rc::clone(&log);
    window.request_animation_frame(move |w| {
        outer_log.borrow_mut().push("first");
        let inner_log = Rc::clone(&outer_log);
        w.request_animation_frame(move |_| inner_log.borrow_mut().push("second"));
    });

    window.run_animation_frame();
    assert_eq!(*log.borrow(), vec!["first"]);
    assert_eq!(window.pending_frames(), 1);

    window.run_animation_frame();
    assert_eq!(*log.borrow(), vec!["first", "second"]);
}

#[test]
fn test_frame_cancelled_by_earlier_callback_in_same_tick() {
    let mut window = Window::new(80, 24);
    let runs = Rc::new(RefCell::new(0));

    let victim = Rc::new(RefCell::new(None));
    let v = Rc::clone(&victim);
    window.request_animation_frame(move |w| {
        if let Some(handle) = v.borrow_mut().take() {
            w.cancel_animation_frame(handle);
        }
    });
    let r = Rc::clone(&runs);
    let handle = window.request_animation_frame(move |_| *r.borrow_mut() += 1);
    *victim.borrow_mut() = Some(handle);

    assert_eq!(window.run_animation_frame(), 1);
    assert_eq!(*runs.borrow(), 0);
}
