use snake_core::{Direction, Viewport};
use snake_system_input::{Input, InputEvent};

#[test]
fn held_keys_resolve_in_evaluation_order() {
    let mut input = Input::default();
    input.handle(&[
        InputEvent::KeyDown(Direction::Left),
        InputEvent::KeyDown(Direction::Up),
    ]);

    assert_eq!(
        input.intent(Viewport::Desktop, Direction::Up),
        Some(Direction::Left)
    );
    assert_eq!(
        input.intent(Viewport::Desktop, Direction::Right),
        Some(Direction::Up)
    );
}

#[test]
fn reversing_key_yields_no_intent() {
    let mut input = Input::default();
    input.handle(&[InputEvent::KeyDown(Direction::Down)]);

    assert_eq!(input.intent(Viewport::Desktop, Direction::Up), None);
    assert_eq!(
        input.intent(Viewport::Desktop, Direction::Left),
        Some(Direction::Down)
    );
}

#[test]
fn released_keys_stop_steering() {
    let mut input = Input::default();
    input.handle(&[
        InputEvent::KeyDown(Direction::Right),
        InputEvent::KeyUp(Direction::Right),
    ]);

    assert_eq!(input.intent(Viewport::Desktop, Direction::Up), None);
}

#[test]
fn swipes_follow_dominant_axis() {
    let mut input = Input::default();
    assert_eq!(input.intent(Viewport::Touch, Direction::Up), Some(Direction::Up));

    input.handle(&[
        InputEvent::TouchStart { x: 100.0, y: 100.0 },
        InputEvent::TouchMove { x: 160.0, y: 120.0 },
    ]);
    assert_eq!(input.swipe_direction(), Direction::Right);

    input.handle(&[InputEvent::TouchMove { x: 90.0, y: 20.0 }]);
    assert_eq!(input.swipe_direction(), Direction::Up);

    input.handle(&[InputEvent::TouchMove { x: 30.0, y: 110.0 }]);
    assert_eq!(input.swipe_direction(), Direction::Left);
}

#[test]
fn swipe_direction_persists_after_touch_end() {
    let mut input = Input::default();
    input.handle(&[
        InputEvent::TouchStart { x: 0.0, y: 0.0 },
        InputEvent::TouchMove { x: 5.0, y: 40.0 },
        InputEvent::TouchEnd,
        InputEvent::TouchMove { x: 300.0, y: 0.0 },
    ]);

    assert_eq!(
        input.intent(Viewport::Touch, Direction::Left),
        Some(Direction::Down)
    );
}

#[test]
fn key_sequence_is_deterministic() {
    let sequence = [
        InputEvent::KeyDown(Direction::Left),
        InputEvent::KeyUp(Direction::Left),
        InputEvent::KeyDown(Direction::Down),
        InputEvent::KeyDown(Direction::Right),
        InputEvent::KeyUp(Direction::Down),
    ];

    let run = || {
        let mut input = Input::default();
        let mut last = Direction::Up;
        let mut intents = Vec::new();
        for event in sequence {
            input.handle(&[event]);
            let intent = input.intent(Viewport::Desktop, last);
            if let Some(direction) = intent {
                last = direction;
            }
            intents.push(intent);
        }
        intents
    };

    let expected = vec![
        Some(Direction::Left),
        None,
        Some(Direction::Down),
        Some(Direction::Right),
        Some(Direction::Right),
    ];
    assert_eq!(run(), expected);
    assert_eq!(run(), run());
}
