use super::*;

#[test]
fn key_codes_round_trip() {
    for code in [37, 38, 39, 40, 32, 13, 65] {
        assert_eq!(Key::from_code(code).code(), code);
    }
    assert_eq!(Key::from_code(65), Key::Other(65));
}

#[test]
fn mapping_table() {
    let cases = [
        (Signal::Click { button: 0 }, Some(Command::Advance)),
        (Signal::Click { button: 2 }, None),
        (Signal::Key(Key::ArrowLeft), Some(Command::Retreat)),
        (Signal::Key(Key::ArrowDown), Some(Command::Retreat)),
        (Signal::Key(Key::ArrowRight), Some(Command::Advance)),
        (Signal::Key(Key::ArrowUp), Some(Command::Advance)),
        (Signal::Key(Key::Space), Some(Command::Advance)),
        (Signal::Key(Key::Enter), Some(Command::ToggleOverlay)),
        (Signal::Key(Key::Other(27)), None),
    ];
    for (signal, expected) in cases {
        assert_eq!(map_signal(signal), expected, "{signal:?}");
    }
}

#[test]
fn names_parse() {
    assert_eq!("click".parse::<Signal>().unwrap(), Signal::Click { button: 0 });
    assert_eq!(
        "Right".parse::<Signal>().unwrap(),
        Signal::Key(Key::ArrowRight)
    );
    assert_eq!("return".parse::<Signal>().unwrap(), Signal::Key(Key::Enter));
    assert_eq!("37".parse::<Signal>().unwrap(), Signal::Key(Key::ArrowLeft));
    assert!("jump".parse::<Signal>().is_err());
}

#[test]
fn commands_display() {
    assert_eq!(Command::ToggleOverlay.to_string(), "toggle-overlay");
    assert_eq!(Command::Retreat.to_string(), "retreat");
}
