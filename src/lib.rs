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
#![deny(missing_docs)]
//! `immui-redux` is the core of an immediate-mode GUI toolkit.
//! Widgets are declared procedurally every frame; the [`Context`] derives interaction state
//! (hovered/active ids), cursor-based layout and a renderer-agnostic [`DrawList`] from that
//! declaration stream. Rendering backends consume the draw list through the [`Renderer`] trait.

mod behavior;
mod context;
pub mod current;
mod draw_list;
mod error;
#[cfg(feature = "fontdue")]
mod fontdue_measure;
mod id;
mod input;
mod layout;
mod style;
mod text;
mod widgets;
mod window;

pub use behavior::ControlState;
pub use context::{Context, ContextConfig, FrameState, Renderer};
pub use draw_list::*;
pub use error::{FontError, UiError};
#[cfg(feature = "fontdue")]
pub use fontdue_measure::FontdueMeasure;
pub use id::IdStack;
pub use input::{Input, KEY_COUNT};
pub use layout::LayoutCursor;
pub use rs_math3d::*;
pub use style::*;
pub use text::{FixedWidthFont, TextMeasure, visible_label};
pub use window::{Window, WindowHandle, WindowRegistry};

use bitflags::*;

#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Debug)]
/// 32-bit widget/window identifier.
pub struct Id(u32);

const FNV_OFFSET_BASIS: u32 = 0x811c9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in bytes {
        hash ^= *byte as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

impl Id {
    /// Wraps a raw 32-bit value.
    pub fn new(value: u32) -> Self { Self(value) }

    /// Hashes a string label using FNV-1a.
    pub fn from_str(label: &str) -> Self { Self(fnv1a(label.as_bytes())) }

    /// Hashes the address of a stable object.
    pub fn from_ptr<T: ?Sized>(value: &T) -> Self {
        let addr = value as *const T as *const () as usize;
        Self(fnv1a(&addr.to_le_bytes()))
    }

    /// Hashes an integer.
    pub fn from_int(value: i64) -> Self { Self(fnv1a(&value.to_le_bytes())) }

    /// Combines this hash with a scope seed.
    pub fn seeded(self, seed: Id) -> Self { Self(self.0 ^ seed.0) }

    /// Returns the raw numeric value wrapped by this ID.
    pub fn raw(self) -> u32 { self.0 }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
/// Handle referencing a renderer-owned texture. Id 0 is the font atlas / default texture.
pub struct TextureId(u32);

impl TextureId {
    /// The default texture, conventionally the font atlas.
    pub const FONT_ATLAS: TextureId = TextureId(0);

    /// Wraps a renderer texture name.
    pub fn new(raw: u32) -> Self { Self(raw) }

    /// Returns the raw numeric identifier stored inside the handle.
    pub fn raw(self) -> u32 { self.0 }
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
/// Simple RGBA color stored with 8-bit components.
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    /// Opaque black.
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    /// Builds a color from normalized floating point channels.
    pub fn from_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        fn channel(v: f32) -> u8 { (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8 }
        Self { r: channel(r), g: channel(g), b: channel(b), a: channel(a) }
    }

    /// Returns the color with its alpha multiplied by `alpha` (0..1).
    pub fn scale_alpha(self, alpha: f32) -> Self {
        let a = (self.a as f32 * alpha.clamp(0.0, 1.0) + 0.5) as u8;
        Self { a, ..self }
    }

    /// Returns `true` when the color is fully transparent.
    pub fn is_invisible(&self) -> bool { self.a == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Options that control how a window behaves.
    pub struct WindowFlags : u32 {
        /// Window background and border are not drawn.
        const NO_BACKGROUND = 32;
        /// Size follows the content extent measured at `end`.
        const ALWAYS_AUTO_RESIZE = 16;
        /// The collapse arrow is hidden and collapsing is disabled.
        const NO_COLLAPSE = 8;
        /// Mouse wheel does not scroll the window.
        const NO_SCROLL_WITH_MOUSE = 4;
        /// Title bar dragging does not move the window.
        const NO_MOVE = 2;
        /// Hides the title bar.
        const NO_TITLE_BAR = 1;
        /// No special options.
        const NONE = 0;
    }
}

impl WindowFlags {
    /// Returns `true` if the title bar should be hidden.
    pub fn has_no_title(&self) -> bool { self.intersects(Self::NO_TITLE_BAR) }
    /// Returns `true` if the window cannot be dragged.
    pub fn is_fixed(&self) -> bool { self.intersects(Self::NO_MOVE) }
    /// Returns `true` if the mouse wheel should be ignored.
    pub fn has_no_scroll(&self) -> bool { self.intersects(Self::NO_SCROLL_WITH_MOUSE) }
    /// Returns `true` if the window cannot be collapsed.
    pub fn has_no_collapse(&self) -> bool { self.intersects(Self::NO_COLLAPSE) }
    /// Returns `true` if the window resizes to its content.
    pub fn is_auto_sizing(&self) -> bool { self.intersects(Self::ALWAYS_AUTO_RESIZE) }
    /// Returns `true` if background and border are suppressed.
    pub fn has_no_background(&self) -> bool { self.intersects(Self::NO_BACKGROUND) }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Mouse button state as reported by the input system.
    pub struct MouseButton : u32 {
        /// Middle mouse button.
        const MIDDLE = 4;
        /// Right mouse button.
        const RIGHT = 2;
        /// Left (primary) mouse button.
        const LEFT = 1;
        /// No buttons pressed.
        const NONE = 0;
    }
}

impl MouseButton {
    /// Returns `true` if the middle mouse button is set.
    pub fn is_middle(&self) -> bool { self.intersects(Self::MIDDLE) }
    /// Returns `true` if the right mouse button is set.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
    /// Returns `true` if the left mouse button is set.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Returns `true` if no mouse buttons are set.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Modifier key state tracked by the input system.
    pub struct KeyMods : u32 {
        /// Super/command key held.
        const SUPER = 8;
        /// Alt key held.
        const ALT = 4;
        /// Control key held.
        const CTRL = 2;
        /// Shift key held.
        const SHIFT = 1;
        /// No modifiers active.
        const NONE = 0;
    }
}

impl KeyMods {
    /// Returns `true` if no modifiers are active.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
    /// Returns `true` if Super is held.
    pub fn is_super(&self) -> bool { self.intersects(Self::SUPER) }
    /// Returns `true` if Alt is held.
    pub fn is_alt(&self) -> bool { self.intersects(Self::ALT) }
    /// Returns `true` if Control is held.
    pub fn is_ctrl(&self) -> bool { self.intersects(Self::CTRL) }
    /// Returns `true` if Shift is held.
    pub fn is_shift(&self) -> bool { self.intersects(Self::SHIFT) }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Rectangle corners that receive rounding.
    pub struct Corners : u32 {
        /// Bottom-left corner.
        const BOTTOM_LEFT = 8;
        /// Bottom-right corner.
        const BOTTOM_RIGHT = 4;
        /// Top-right corner.
        const TOP_RIGHT = 2;
        /// Top-left corner.
        const TOP_LEFT = 1;
        /// Both top corners.
        const TOP = Self::TOP_LEFT.bits() | Self::TOP_RIGHT.bits();
        /// Both bottom corners.
        const BOTTOM = Self::BOTTOM_LEFT.bits() | Self::BOTTOM_RIGHT.bits();
        /// Every corner.
        const ALL = Self::TOP.bits() | Self::BOTTOM.bits();
        /// No rounded corners.
        const NONE = 0;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Condition under which a `set_next_window_*` request applies.
pub enum Cond {
    /// Apply on every frame.
    Always,
    /// Apply only when the window is created.
    FirstUseEver,
}

/// Convenience constructor for [`Vec2i`].
pub fn vec2(x: i32, y: i32) -> Vec2i { Vec2i { x, y } }

/// Convenience constructor for [`Vec2f`].
pub fn vec2f(x: f32, y: f32) -> Vec2f { Vec2f { x, y } }

/// Convenience constructor for [`Recti`].
pub fn rect(x: i32, y: i32, w: i32, h: i32) -> Recti { Recti { x, y, width: w, height: h } }

/// Convenience constructor for [`Color`].
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

/// Expands (or shrinks) a rectangle uniformly on all sides.
pub fn expand_rect(r: Recti, n: i32) -> Recti { rect(r.x - n, r.y - n, r.width + n * 2, r.height + n * 2) }

/// Top-left and bottom-right corners of `r` in draw-list coordinates.
pub fn rect_corners(r: Recti) -> (Vec2f, Vec2f) { (vec2f(r.x as f32, r.y as f32), vec2f((r.x + r.width) as f32, (r.y + r.height) as f32)) }

/// Returns `true` when `p` lies inside `r` (left/top edges inclusive, right/bottom exclusive).
pub fn point_in_rect(p: Vec2i, r: Recti) -> bool { p.x >= r.x && p.y >= r.y && p.x < r.x + r.width && p.y < r.y + r.height }

/// Field-wise rectangle equality.
pub fn same_rect(a: Recti, b: Recti) -> bool { a.x == b.x && a.y == b.y && a.width == b.width && a.height == b.height }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_hash_is_deterministic() {
        assert_eq!(Id::from_str("OK"), Id::from_str("OK"));
        assert_ne!(Id::from_str("OK"), Id::from_str("Cancel"));
        // FNV-1a of the empty string is the offset basis
        assert_eq!(Id::from_str("").raw(), FNV_OFFSET_BASIS);
    }

    #[test]
    fn seeded_id_differs_per_scope() {
        let base = Id::from_str("X");
        assert_eq!(base.seeded(Id::new(0)), base);
        assert_ne!(base.seeded(Id::from_str("a")), base.seeded(Id::from_str("b")));
    }

    #[test]
    fn point_in_rect_edges() {
        let r = rect(10, 10, 5, 5);
        assert!(point_in_rect(vec2(10, 10), r));
        assert!(point_in_rect(vec2(14, 14), r));
        assert!(!point_in_rect(vec2(15, 10), r));
        assert!(!point_in_rect(vec2(9, 12), r));
    }

    #[test]
    fn color_from_f32_rounds() {
        assert_eq!(Color::from_f32(1.0, 0.0, 0.5, 1.0), color(255, 0, 128, 255));
        assert_eq!(Color::WHITE.scale_alpha(0.0).a, 0);
    }
}
