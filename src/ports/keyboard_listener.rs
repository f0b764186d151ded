use iced::futures::{channel::mpsc, SinkExt, Stream, StreamExt};
use iced::stream;
use rdev::{listen, EventType, Key};

use crate::core::models::{KeyChord, KeyCode, Modifiers};
use crate::global_constants::LOG_TAG_KEYBOARD;

/// Global key listener. rdev's `listen` blocks forever, so it runs on its own
/// thread and feeds raw events into the stream; which chords mean anything
/// is decided by the keybinding registry.
pub struct GlobalKeyboardListener;

impl GlobalKeyboardListener {
    pub fn create_event_stream() -> impl Stream<Item = KeyChord> {
        stream::channel(
            16,
            |mut output_channel: mpsc::Sender<KeyChord>| async move {
                let (keyboard_sender, mut keyboard_receiver) = mpsc::channel(16);

                Self::spawn_keyboard_listener_thread(keyboard_sender);

                let mut state = KeyboardState::default();

                loop {
                    let keyboard_event = keyboard_receiver.select_next_some().await;
                    if let Some(chord) = state.process_event(keyboard_event) {
                        if output_channel.send(chord).await.is_err() {
                            log::debug!("{} key chord receiver dropped", LOG_TAG_KEYBOARD);
                        }
                    }
                }
            },
        )
    }

    fn spawn_keyboard_listener_thread(mut keyboard_sender: mpsc::Sender<rdev::Event>) {
        std::thread::spawn(move || {
            log::info!(
                "{} Starting global keyboard listener thread",
                LOG_TAG_KEYBOARD
            );
            if let Err(e) = listen(move |event| {
                if keyboard_sender.try_send(event).is_err() {
                    log::trace!("{} dropped key event, channel full", LOG_TAG_KEYBOARD);
                }
            }) {
                log::error!(
                    "{} Failed to start keyboard listener: {:?}. Keybindings are unavailable.",
                    LOG_TAG_KEYBOARD,
                    e
                );
            }
        });
    }
}

/// Held state of each physical modifier key. Autorepeated presses only set
/// the flag again, so one release always clears it.
#[derive(Default)]
struct KeyboardState {
    ctrl_left: bool,
    ctrl_right: bool,
    alt: bool,
    alt_gr: bool,
    shift_left: bool,
    shift_right: bool,
    meta_left: bool,
    meta_right: bool,
}

impl KeyboardState {
    fn process_event(&mut self, event: rdev::Event) -> Option<KeyChord> {
        match event.event_type {
            EventType::KeyPress(key) => self.handle_key_press(key),
            EventType::KeyRelease(key) => {
                self.handle_key_release(key);
                None
            }
            _ => None,
        }
    }

    fn handle_key_press(&mut self, key: Key) -> Option<KeyChord> {
        if let Some(held) = self.modifier_flag_mut(key) {
            *held = true;
            return None;
        }

        let key = key_code_of(key)?;
        let chord = KeyChord {
            modifiers: self.modifiers(),
            key,
        };
        log::trace!("{} chord {:?}", LOG_TAG_KEYBOARD, chord);
        Some(chord)
    }

    fn handle_key_release(&mut self, key: Key) {
        if let Some(held) = self.modifier_flag_mut(key) {
            *held = false;
        }
    }

    fn modifier_flag_mut(&mut self, key: Key) -> Option<&mut bool> {
        match key {
            Key::ControlLeft => Some(&mut self.ctrl_left),
            Key::ControlRight => Some(&mut self.ctrl_right),
            Key::Alt => Some(&mut self.alt),
            Key::AltGr => Some(&mut self.alt_gr),
            Key::ShiftLeft => Some(&mut self.shift_left),
            Key::ShiftRight => Some(&mut self.shift_right),
            Key::MetaLeft => Some(&mut self.meta_left),
            Key::MetaRight => Some(&mut self.meta_right),
            _ => None,
        }
    }

    fn modifiers(&self) -> Modifiers {
        Modifiers {
            ctrl: self.ctrl_left || self.ctrl_right,
            alt: self.alt || self.alt_gr,
            shift: self.shift_left || self.shift_right,
            super_key: self.meta_left || self.meta_right,
        }
    }
}

fn key_code_of(key: Key) -> Option<KeyCode> {
    let code = match key {
        Key::KeyA => KeyCode::Char('A'),
        Key::KeyB => KeyCode::Char('B'),
        Key::KeyC => KeyCode::Char('C'),
        Key::KeyD => KeyCode::Char('D'),
        Key::KeyE => KeyCode::Char('E'),
        Key::KeyF => KeyCode::Char('F'),
        Key::KeyG => KeyCode::Char('G'),
        Key::KeyH => KeyCode::Char('H'),
        Key::KeyI => KeyCode::Char('I'),
        Key::KeyJ => KeyCode::Char('J'),
        Key::KeyK => KeyCode::Char('K'),
        Key::KeyL => KeyCode::Char('L'),
        Key::KeyM => KeyCode::Char('M'),
        Key::KeyN => KeyCode::Char('N'),
        Key::KeyO => KeyCode::Char('O'),
        Key::KeyP => KeyCode::Char('P'),
        Key::KeyQ => KeyCode::Char('Q'),
        Key::KeyR => KeyCode::Char('R'),
        Key::KeyS => KeyCode::Char('S'),
        Key::KeyT => KeyCode::Char('T'),
        Key::KeyU => KeyCode::Char('U'),
        Key::KeyV => KeyCode::Char('V'),
        Key::KeyW => KeyCode::Char('W'),
        Key::KeyX => KeyCode::Char('X'),
        Key::KeyY => KeyCode::Char('Y'),
        Key::KeyZ => KeyCode::Char('Z'),
        Key::Num0 => KeyCode::Char('0'),
        Key::Num1 => KeyCode::Char('1'),
        Key::Num2 => KeyCode::Char('2'),
        Key::Num3 => KeyCode::Char('3'),
        Key::Num4 => KeyCode::Char('4'),
        Key::Num5 => KeyCode::Char('5'),
        Key::Num6 => KeyCode::Char('6'),
        Key::Num7 => KeyCode::Char('7'),
        Key::Num8 => KeyCode::Char('8'),
        Key::Num9 => KeyCode::Char('9'),
        Key::F1 => KeyCode::Function(1),
        Key::F2 => KeyCode::Function(2),
        Key::F3 => KeyCode::Function(3),
        Key::F4 => KeyCode::Function(4),
        Key::F5 => KeyCode::Function(5),
        Key::F6 => KeyCode::Function(6),
        Key::F7 => KeyCode::Function(7),
        Key::F8 => KeyCode::Function(8),
        Key::F9 => KeyCode::Function(9),
        Key::F10 => KeyCode::Function(10),
        Key::F11 => KeyCode::Function(11),
        Key::F12 => KeyCode::Function(12),
        Key::Space => KeyCode::Space,
        Key::Tab => KeyCode::Tab,
        Key::Escape => KeyCode::Escape,
        Key::Return => KeyCode::Return,
        Key::Backspace => KeyCode::Backspace,
        Key::Insert => KeyCode::Insert,
        Key::Delete => KeyCode::Delete,
        Key::Home => KeyCode::Home,
        Key::End => KeyCode::End,
        Key::PageUp => KeyCode::PageUp,
        Key::PageDown => KeyCode::PageDown,
        Key::UpArrow => KeyCode::Up,
        Key::DownArrow => KeyCode::Down,
        Key::LeftArrow => KeyCode::Left,
        Key::RightArrow => KeyCode::Right,
        _ => return None,
    };

    Some(code)
}
