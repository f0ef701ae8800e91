use dragline::DragConfigError;
use dragline::prelude::*;
use pretty_assertions::assert_eq;
use web_time::Instant;

#[test]
fn prelude_drives_a_drag_and_reorders() {
    let mut drag = draggable(
        HeadlessElement::new(Rect::new(0.0, 0.0, 100.0, 30.0)),
        DragConfig::default(),
    );
    let t = Instant::now();
    drag.pointer_down(&PointerInput::mouse(10.0, 10.0, t), None);
    drag.pointer_move(&PointerInput::mouse(10.0, 40.0, t));
    drag.pointer_up(&PointerInput::mouse(10.0, 40.0, t));
    assert_eq!(drag.state(), DragState::Idle);
    assert_eq!(drag.passive_transform(), Point::new(0.0, 30.0));

    let mut rows = vec!["alpha", "beta", "gamma"];
    move_within(&mut rows, 0, 1);
    assert_eq!(rows, vec!["beta", "alpha", "gamma"]);
}

#[test]
fn errors_convert_into_facade_error() {
    let err: Error = DragConfig::new(-1.0, 5.0).map(|_| ()).unwrap_err().into();
    assert!(matches!(
        err,
        Error::Config(DragConfigError::InvalidThreshold { .. })
    ));

    let mut drag = draggable(HeadlessElement::default(), DragConfig::default());
    drag.dispose();
    let err: Error = drag
        .ended()
        .subscribe(|_| {})
        .map(|_| ())
        .unwrap_err()
        .into();
    assert!(matches!(err, Error::Closed(_)));
    assert!(err.to_string().contains("ended"));
}
