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
//! Optional "current context" convenience layer.
//!
//! The engine never reads this slot; it only exists for hosts that prefer free
//! functions over threading a [`Context`] through their UI code. The slot is
//! thread-local, and every helper degrades to a default value when it is empty
//! or already borrowed by an enclosing call.

use std::cell::RefCell;

use crate::{Context, UiError, WindowFlags};

thread_local! {
    static CURRENT: RefCell<Option<Context>> = const { RefCell::new(None) };
}

/// Installs `ctx` as the current context and returns the previous one.
pub fn set_current(ctx: Context) -> Option<Context> { CURRENT.with(|slot| slot.borrow_mut().replace(ctx)) }

/// Removes and returns the current context.
pub fn take_current() -> Option<Context> { CURRENT.with(|slot| slot.borrow_mut().take()) }

/// Returns `true` when a context is installed.
pub fn has_current() -> bool { CURRENT.with(|slot| slot.try_borrow().is_ok_and(|ctx| ctx.is_some())) }

/// Runs `f` on the current context. Returns `None` when there is none, or when
/// called from inside another `with_current`.
pub fn with_current<R>(f: impl FnOnce(&mut Context) -> R) -> Option<R> {
    CURRENT.with(|slot| {
        let mut guard = slot.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    })
}

/// [`Context::new_frame`] on the current context.
pub fn new_frame() -> Result<(), UiError> { with_current(|ctx| ctx.new_frame()).unwrap_or(Ok(())) }

/// [`Context::end_frame`] on the current context.
pub fn end_frame() -> Result<(), UiError> { with_current(|ctx| ctx.end_frame()).unwrap_or(Ok(())) }

/// [`Context::begin`] on the current context; `false` without one.
pub fn begin(name: &str, open: Option<&mut bool>, flags: WindowFlags) -> bool { with_current(|ctx| ctx.begin(name, open, flags)).unwrap_or(false) }

/// [`Context::end`] on the current context.
pub fn end() -> Result<(), UiError> { with_current(|ctx| ctx.end()).unwrap_or(Ok(())) }

/// [`Context::text`] on the current context; `false` without one.
pub fn text(text: &str) -> bool { with_current(|ctx| ctx.text(text)).unwrap_or(false) }

/// [`Context::button`] on the current context; `false` without one.
pub fn button(label: &str) -> bool { with_current(|ctx| ctx.button(label)).unwrap_or(false) }

/// [`Context::checkbox`] on the current context; `false` without one.
pub fn checkbox(label: &str, value: &mut bool) -> bool { with_current(|ctx| ctx.checkbox(label, value)).unwrap_or(false) }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MouseButton;

    #[test]
    fn helpers_without_a_context_return_defaults() {
        let _ = take_current();
        assert!(!has_current());
        assert!(!button("OK"));
        assert!(!begin("W", None, WindowFlags::NONE));
        assert_eq!(new_frame(), Ok(()));
        assert!(with_current(|ctx| ctx.frame_count()).is_none());
    }

    #[test]
    fn installed_context_drives_widgets() {
        let _ = take_current();
        assert!(set_current(Context::new()).is_none());
        assert!(has_current());

        new_frame().unwrap();
        assert!(begin("W", None, WindowFlags::NONE));
        let pos = with_current(|ctx| ctx.get_cursor_screen_pos()).flatten().unwrap();
        with_current(|ctx| {
            ctx.set_mouse_pos(pos.x + 1, pos.y + 1);
            ctx.set_mouse_button(MouseButton::LEFT, true);
            ctx.set_mouse_button(MouseButton::LEFT, false);
        });
        assert!(button("OK"));
        end().unwrap();
        end_frame().unwrap();

        let ctx = take_current().unwrap();
        assert_eq!(ctx.frame_count(), 1);
        assert!(!has_current());
    }

    #[test]
    fn nested_access_is_refused() {
        let _ = take_current();
        set_current(Context::new());
        let inner = with_current(|_| with_current(|ctx| ctx.frame_count()));
        assert_eq!(inner, Some(None));
        let _ = take_current();
    }
}
