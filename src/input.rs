//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
// -----------------------------------------------------------------------------
// Ported to rust from https://github.com/rxi/microui/ and the original license
//
// Copyright (c) 2020 rxi
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.
//
use crate::{Dimensioni, KeyMods, MouseButton, Vec2i, vec2};

/// Number of key slots addressable through [`Input::set_key_down`].
pub const KEY_COUNT: usize = 512;

#[derive(Clone)]
/// Per-frame input snapshot. Written by the host, read by widgets.
///
/// Input fed between frames is latched and becomes the next frame's edges when
/// the frame starts; input fed while a frame is active takes effect immediately.
pub struct Input {
    display_size: Dimensioni,
    mouse_pos: Vec2i,
    last_mouse_pos: Vec2i,
    mouse_delta: Vec2i,
    mouse_down: MouseButton,
    mouse_clicked: MouseButton,
    mouse_released: MouseButton,
    latched_clicked: MouseButton,
    latched_released: MouseButton,
    mouse_wheel: f32,
    latched_wheel: f32,
    key_mods: KeyMods,
    keys_down: [bool; KEY_COUNT],
    keys_pressed: [bool; KEY_COUNT],
    latched_keys: [bool; KEY_COUNT],
    input_chars: String,
    in_frame: bool,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            display_size: Dimensioni::new(0, 0),
            mouse_pos: Vec2i::default(),
            last_mouse_pos: Vec2i::default(),
            mouse_delta: Vec2i::default(),
            mouse_down: MouseButton::NONE,
            mouse_clicked: MouseButton::NONE,
            mouse_released: MouseButton::NONE,
            latched_clicked: MouseButton::NONE,
            latched_released: MouseButton::NONE,
            mouse_wheel: 0.0,
            latched_wheel: 0.0,
            key_mods: KeyMods::NONE,
            keys_down: [false; KEY_COUNT],
            keys_pressed: [false; KEY_COUNT],
            latched_keys: [false; KEY_COUNT],
            input_chars: String::new(),
            in_frame: false,
        }
    }
}

impl Input {
    /// Sets the size of the display the UI is drawn onto.
    pub fn set_display_size(&mut self, width: i32, height: i32) { self.display_size = Dimensioni::new(width, height); }

    /// Returns the display size.
    pub fn display_size(&self) -> Dimensioni { self.display_size }

    /// Updates the mouse pointer position.
    pub fn set_mouse_pos(&mut self, x: i32, y: i32) { self.mouse_pos = vec2(x, y); }

    /// Records a mouse button transition.
    pub fn set_mouse_button(&mut self, btn: MouseButton, down: bool) {
        if down {
            let pressed = btn & !self.mouse_down;
            self.mouse_down |= btn;
            if self.in_frame {
                self.mouse_clicked |= pressed;
            } else {
                self.latched_clicked |= pressed;
            }
        } else {
            let lifted = btn & self.mouse_down;
            self.mouse_down &= !btn;
            if self.in_frame {
                self.mouse_released |= lifted;
            } else {
                self.latched_released |= lifted;
            }
        }
    }

    /// Accumulates vertical wheel movement.
    pub fn set_mouse_wheel(&mut self, wheel: f32) {
        if self.in_frame {
            self.mouse_wheel += wheel;
        } else {
            self.latched_wheel += wheel;
        }
    }

    /// Records a key transition. Keys outside `0..KEY_COUNT` are ignored.
    pub fn set_key_down(&mut self, key: usize, down: bool) {
        if key >= KEY_COUNT {
            tracing::trace!(key, "ignoring out of range key");
            return;
        }
        if down && !self.keys_down[key] {
            if self.in_frame {
                self.keys_pressed[key] = true;
            } else {
                self.latched_keys[key] = true;
            }
        }
        self.keys_down[key] = down;
    }

    /// Replaces the modifier key state.
    pub fn set_key_modifiers(&mut self, ctrl: bool, shift: bool, alt: bool, super_key: bool) {
        let mut mods = KeyMods::NONE;
        mods.set(KeyMods::CTRL, ctrl);
        mods.set(KeyMods::SHIFT, shift);
        mods.set(KeyMods::ALT, alt);
        mods.set(KeyMods::SUPER, super_key);
        self.key_mods = mods;
    }

    /// Queues a typed character. Only codepoints 1..=127 are kept.
    pub fn add_input_character(&mut self, codepoint: u32) {
        if (1..=127).contains(&codepoint) {
            self.input_chars.push(codepoint as u8 as char);
        }
    }

    /// Mouse position in screen space.
    pub fn mouse_pos(&self) -> Vec2i { self.mouse_pos }

    /// Mouse movement since the previous frame.
    pub fn mouse_delta(&self) -> Vec2i { self.mouse_delta }

    /// Wheel movement seen this frame.
    pub fn mouse_wheel(&self) -> f32 { self.mouse_wheel }

    /// Returns `true` while any of `btn` is held.
    pub fn mouse_down(&self, btn: MouseButton) -> bool { self.mouse_down.intersects(btn) }

    /// Returns `true` if `btn` went down this frame and no widget claimed it yet.
    pub fn mouse_clicked(&self, btn: MouseButton) -> bool { self.mouse_clicked.intersects(btn) }

    /// Returns `true` if `btn` went up this frame and no widget consumed it yet.
    pub fn mouse_released(&self, btn: MouseButton) -> bool { self.mouse_released.intersects(btn) }

    /// Returns `true` while `key` is held.
    pub fn key_down(&self, key: usize) -> bool { key < KEY_COUNT && self.keys_down[key] }

    /// Returns `true` if `key` went down this frame.
    pub fn key_pressed(&self, key: usize) -> bool { key < KEY_COUNT && self.keys_pressed[key] }

    /// Active modifier keys.
    pub fn key_mods(&self) -> KeyMods { self.key_mods }

    /// ASCII characters typed since the last frame ended.
    pub fn input_characters(&self) -> &str { &self.input_chars }

    pub(crate) fn consume_click(&mut self, btn: MouseButton) { self.mouse_clicked &= !btn; }

    pub(crate) fn consume_release(&mut self, btn: MouseButton) { self.mouse_released &= !btn; }

    pub(crate) fn consume_wheel(&mut self) { self.mouse_wheel = 0.0; }

    pub(crate) fn prelude(&mut self) {
        self.mouse_delta.x = self.mouse_pos.x - self.last_mouse_pos.x;
        self.mouse_delta.y = self.mouse_pos.y - self.last_mouse_pos.y;
        self.last_mouse_pos = self.mouse_pos;

        self.mouse_clicked = self.latched_clicked;
        self.mouse_released = self.latched_released;
        self.latched_clicked = MouseButton::NONE;
        self.latched_released = MouseButton::NONE;

        self.mouse_wheel = self.latched_wheel;
        self.latched_wheel = 0.0;

        self.keys_pressed = self.latched_keys;
        self.latched_keys = [false; KEY_COUNT];
        self.in_frame = true;
    }

    pub(crate) fn epilogue(&mut self) {
        self.input_chars.clear();
        self.in_frame = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latched_press_becomes_next_frame_edge() {
        let mut input = Input::default();
        input.set_mouse_button(MouseButton::LEFT, true);
        assert!(!input.mouse_clicked(MouseButton::LEFT));
        input.prelude();
        assert!(input.mouse_clicked(MouseButton::LEFT));
        assert!(input.mouse_down(MouseButton::LEFT));
        input.epilogue();
        input.prelude();
        assert!(!input.mouse_clicked(MouseButton::LEFT));
        assert!(input.mouse_down(MouseButton::LEFT));
    }

    #[test]
    fn click_between_frames_keeps_both_edges() {
        let mut input = Input::default();
        input.set_mouse_button(MouseButton::LEFT, true);
        input.set_mouse_button(MouseButton::LEFT, false);
        input.prelude();
        assert!(input.mouse_clicked(MouseButton::LEFT));
        assert!(input.mouse_released(MouseButton::LEFT));
        assert!(!input.mouse_down(MouseButton::LEFT));
    }

    #[test]
    fn in_frame_input_applies_immediately() {
        let mut input = Input::default();
        input.prelude();
        input.set_mouse_button(MouseButton::RIGHT, true);
        assert!(input.mouse_clicked(MouseButton::RIGHT));
        input.consume_click(MouseButton::RIGHT);
        assert!(!input.mouse_clicked(MouseButton::RIGHT));
        // repeated "down" without a release is not a new edge
        input.set_mouse_button(MouseButton::RIGHT, true);
        assert!(!input.mouse_clicked(MouseButton::RIGHT));
    }

    #[test]
    fn mouse_delta_tracks_frames() {
        let mut input = Input::default();
        input.set_mouse_pos(10, 10);
        input.prelude();
        input.epilogue();
        input.set_mouse_pos(15, 7);
        input.prelude();
        assert_eq!((input.mouse_delta().x, input.mouse_delta().y), (5, -3));
    }

    #[test]
    fn characters_are_ascii_only_and_cleared_at_frame_end() {
        let mut input = Input::default();
        input.add_input_character('a' as u32);
        input.add_input_character(0);
        input.add_input_character(0x00e9);
        input.add_input_character('Z' as u32);
        input.prelude();
        assert_eq!(input.input_characters(), "aZ");
        input.epilogue();
        assert_eq!(input.input_characters(), "");
    }

    #[test]
    fn keys_and_modifiers() {
        let mut input = Input::default();
        input.set_key_down(65, true);
        input.set_key_down(KEY_COUNT + 3, true);
        input.set_key_modifiers(true, false, true, false);
        input.prelude();
        assert!(input.key_pressed(65));
        assert!(input.key_down(65));
        assert!(!input.key_down(KEY_COUNT + 3));
        assert!(input.key_mods().is_ctrl() && input.key_mods().is_alt());
        assert!(!input.key_mods().is_shift());
        input.epilogue();
        input.prelude();
        assert!(!input.key_pressed(65));
    }

    #[test]
    fn wheel_resets_each_frame() {
        let mut input = Input::default();
        input.set_mouse_wheel(1.0);
        input.set_mouse_wheel(0.5);
        input.prelude();
        assert_eq!(input.mouse_wheel(), 1.5);
        input.epilogue();
        input.prelude();
        assert_eq!(input.mouse_wheel(), 0.0);
    }
}
