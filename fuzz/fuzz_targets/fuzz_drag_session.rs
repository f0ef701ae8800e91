#![no_main]

use std::rc::Rc;
use std::time::Duration;

use arbitrary::Arbitrary;
use dragline_core::config::DragConfig;
use dragline_core::event::PointerInput;
use dragline_core::geometry::Rect;
use dragline_runtime::{
    DragAxis, DragRef, DragState, HeadlessElement, ImmediateDispatcher, StaticScrollPosition,
};
use libfuzzer_sys::fuzz_target;
use web_time::Instant;

#[derive(Debug, Arbitrary)]
enum Step {
    Down { x: i16, y: i16, touch: bool },
    Move { x: i16, y: i16, touch: bool },
    Up { x: i16, y: i16, touch: bool },
    Wait { millis: u16 },
    Lock { axis: Option<bool> },
    Disable(bool),
    Reset,
    Dispose,
}

fn pointer(x: i16, y: i16, touch: bool, t: Instant) -> PointerInput {
    let (x, y) = (f64::from(x), f64::from(y));
    if touch {
        PointerInput::touch(x, y, t)
    } else {
        PointerInput::mouse(x, y, t)
    }
}

fuzz_target!(|steps: Vec<Step>| {
    let mut drag = DragRef::new(
        HeadlessElement::new(Rect::new(0.0, 0.0, 64.0, 32.0)),
        DragConfig::default(),
        Rc::new(ImmediateDispatcher),
        Rc::new(StaticScrollPosition::default()),
    );
    let mut t = Instant::now();

    for step in steps.into_iter().take(512) {
        match step {
            Step::Down { x, y, touch } => {
                drag.pointer_down(&pointer(x, y, touch, t), None);
            }
            Step::Move { x, y, touch } => {
                drag.pointer_move(&pointer(x, y, touch, t));
            }
            Step::Up { x, y, touch } => {
                drag.pointer_up(&pointer(x, y, touch, t));
            }
            Step::Wait { millis } => t += Duration::from_millis(u64::from(millis)),
            Step::Lock { axis } => {
                drag.set_lock_axis(axis.map(|x| if x { DragAxis::X } else { DragAxis::Y }));
            }
            Step::Disable(disabled) => drag.set_disabled(disabled),
            Step::Reset => drag.reset(),
            Step::Dispose => drag.dispose(),
        }

        assert!(!drag.has_moved() || drag.has_started_dragging());
        assert_eq!(drag.global_listeners().is_some(), drag.state() != DragState::Idle);
        if drag.is_disposed() {
            assert_eq!(drag.state(), DragState::Idle);
            assert!(drag.root_listeners().is_none());
        }
    }
});
