use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;

use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEventKind, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement};
use simplelog::LevelFilter;
use tour::logging::init_file_logger;
use tour::{Config, EventWiring, Popover, StateKey, TourContext, TourEvent};
use tourdom::{keyboard_event_type, EventType, KeyboardData, Node, NodeId, Window};

const STEPS: [&str; 3] = ["Welcome", "Search box", "Settings"];

fn main() -> io::Result<()> {
    init_file_logger("keyboard_tour.log", LevelFilter::Debug)
        .expect("Failed to initialize logger");

    let (cols, rows) = crossterm::terminal::size()?;
    let mut window = Window::new(cols, rows);
    let (popover, targets) = build_page(&mut window);

    let highlight = |window: &mut Window, cx: &TourContext| {
        let (w, h) = window.size();
        let target = cx.state().active_element();
        print!("refresh highlight for {target:?} in {w}x{h}\r\n");
    };
    let cx = Rc::new(TourContext::new(Config::default(), highlight));

    let step = Rc::new(Cell::new(0usize));
    let done = Rc::new(Cell::new(false));
    {
        let mut state = cx.state_mut();
        state.set(StateKey::IsInitialized, true);
        state.set(StateKey::Popover, Popover::new(popover));
        state.set(StateKey::ActiveElement, targets[0]);
        state.set(StateKey::ActiveStep, 0usize);
    }
    listen_for_commands(&cx, &step, &done, targets);

    let wiring = EventWiring::new(&cx);
    wiring.init_events(&mut window);

    enable_raw_mode()?;
    let reports_release = supports_keyboard_enhancement().unwrap_or(false);
    if reports_release {
        execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    print!("Tab/Shift+Tab cycles focus, arrows change step, Esc or q quits\r\n");
    io::stdout().flush()?;

    while !done.get() {
        match event::read()? {
            CtEvent::Key(key) => {
                if key.code == KeyCode::Char('q') && key.kind == KeyEventKind::Press {
                    break;
                }
                let data = KeyboardData::from(key);
                match keyboard_event_type(key.kind) {
                    EventType::KeyUp => {
                        window.key_up(data);
                    }
                    _ if reports_release => {
                        window.key_down(data);
                    }
                    // Without release events a press stands for both halves
                    _ => {
                        window.press_key(data);
                    }
                }
                print!(
                    "step {} ({}), focus {:?}\r\n",
                    step.get() + 1,
                    STEPS[step.get()],
                    window.document().active_element()
                );
            }
            CtEvent::Resize(w, h) => {
                window.resize(w, h);
            }
            _ => {}
        }
        window.run_animation_frame();
        io::stdout().flush()?;
    }

    wiring.destroy_events(&mut window);
    cx.state_mut().reset();
    if reports_release {
        execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    Ok(())
}

fn build_page(window: &mut Window) -> (NodeId, [NodeId; 3]) {
    let doc = window.document_mut();
    let body = doc.body();

    let header = doc.append_child(body, Node::div().id("header")).expect("body exists");
    let search = doc.append_child(header, Node::input().id("search")).expect("header exists");
    let settings = doc.append_child(header, Node::button().id("settings")).expect("header exists");

    let popover = doc.append_child(body, Node::div().id("popover")).expect("body exists");
    doc.append_child(popover, Node::button().id("prev")).expect("popover exists");
    doc.append_child(popover, Node::button().id("next")).expect("popover exists");
    doc.append_child(popover, Node::button().id("close")).expect("popover exists");

    (popover, [header, search, settings])
}

fn listen_for_commands(
    cx: &Rc<TourContext>,
    step: &Rc<Cell<usize>>,
    done: &Rc<Cell<bool>>,
    targets: [NodeId; 3],
) {
    let moves = [(TourEvent::ArrowRightPress, 1isize), (TourEvent::ArrowLeftPress, -1)];
    for (event, delta) in moves {
        let step = Rc::clone(step);
        let state_cx = Rc::downgrade(cx);
        cx.emitter().listen(event, move |_| {
            let next = step.get().saturating_add_signed(delta).min(STEPS.len() - 1);
            step.set(next);
            if let Some(cx) = state_cx.upgrade() {
                let mut state = cx.state_mut();
                state.set(StateKey::ActiveStep, next);
                state.set(StateKey::ActiveElement, targets[next]);
            }
        });
    }

    let done = Rc::clone(done);
    cx.emitter().listen(TourEvent::EscapePress, move |_| done.set(true));
}
