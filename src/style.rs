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
use crate::{Color, Vec2i, vec2};

/// Number of entries in [`Style::colors`].
pub const STYLE_COLOR_COUNT: usize = 45;

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[repr(u32)]
/// Identifiers for each color role in the style table.
pub enum StyleColor {
    /// Default text color.
    Text = 0,
    /// Text of disabled items.
    TextDisabled,
    /// Window background.
    WindowBg,
    /// Background of child regions.
    ChildBg,
    /// Background of popups and tooltips.
    PopupBg,
    /// Window and frame borders.
    Border,
    /// Drop shadow drawn under borders.
    BorderShadow,
    /// Background of checkbox, slider and input frames.
    FrameBg,
    /// Frame background while hovered.
    FrameBgHovered,
    /// Frame background while active.
    FrameBgActive,
    /// Title bar of unfocused windows.
    TitleBg,
    /// Title bar of the focused window.
    TitleBgActive,
    /// Title bar of collapsed windows.
    TitleBgCollapsed,
    /// Title bar text.
    TitleText,
    /// Menu bar background.
    MenuBarBg,
    /// Scrollbar track.
    ScrollbarBg,
    /// Scrollbar thumb.
    ScrollbarGrab,
    /// Scrollbar thumb while hovered.
    ScrollbarGrabHovered,
    /// Scrollbar thumb while dragged.
    ScrollbarGrabActive,
    /// Check mark of checkboxes and radio buttons.
    CheckMark,
    /// Slider thumb.
    SliderGrab,
    /// Slider thumb while dragged.
    SliderGrabActive,
    /// Button background.
    Button,
    /// Button background while hovered.
    ButtonHovered,
    /// Button background while pressed.
    ButtonActive,
    /// Header/selectable background.
    Header,
    /// Header background while hovered.
    HeaderHovered,
    /// Header background while pressed.
    HeaderActive,
    /// Separator lines.
    Separator,
    /// Separator while hovered.
    SeparatorHovered,
    /// Separator while dragged.
    SeparatorActive,
    /// Resize grip in the window corner.
    ResizeGrip,
    /// Resize grip while hovered.
    ResizeGripHovered,
    /// Resize grip while dragged.
    ResizeGripActive,
    /// Window close box.
    CloseButton,
    /// Close box while hovered.
    CloseButtonHovered,
    /// Close box while pressed.
    CloseButtonActive,
    /// Plot line color.
    PlotLines,
    /// Plot line color while hovered.
    PlotLinesHovered,
    /// Histogram bar color.
    PlotHistogram,
    /// Histogram bar color while hovered.
    PlotHistogramHovered,
    /// Background of selected text.
    TextSelectedBg,
    /// Dimming overlay behind modal windows.
    ModalWindowDim,
    /// Highlight of drag and drop targets.
    DragDropTarget,
    /// Keyboard navigation highlight.
    NavHighlight,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Built-in style presets.
pub enum StylePreset {
    /// Dark grey/blue theme (the default).
    Dark,
    /// Light theme.
    Light,
    /// Purple-tinted classic theme.
    Classic,
}

#[derive(Copy, Clone, Debug)]
/// Collection of visual constants that drive widget and window appearance.
pub struct Style {
    /// Global alpha applied to every color.
    pub alpha: f32,
    /// Padding between the window frame and its content.
    pub window_padding: Vec2i,
    /// Corner radius of windows.
    pub window_rounding: f32,
    /// Thickness of the window border; zero disables it.
    pub window_border_size: f32,
    /// Smallest size a window may take.
    pub window_min_size: Vec2i,
    /// Corner radius of child regions.
    pub child_rounding: f32,
    /// Thickness of the child region border.
    pub child_border_size: f32,
    /// Corner radius of popups.
    pub popup_rounding: f32,
    /// Thickness of the popup border.
    pub popup_border_size: f32,
    /// Padding inside framed widgets (buttons, frames).
    pub frame_padding: Vec2i,
    /// Corner radius of framed widgets.
    pub frame_rounding: f32,
    /// Thickness of framed widget borders.
    pub frame_border_size: f32,
    /// Spacing between consecutive items.
    pub item_spacing: Vec2i,
    /// Spacing between the parts of a composite item (e.g. box and label).
    pub item_inner_spacing: Vec2i,
    /// Horizontal indentation applied by `indent` when no width is given.
    pub indent_spacing: i32,
    /// Width of scrollbars.
    pub scrollbar_size: i32,
    /// Corner radius of scrollbar thumbs.
    pub scrollbar_rounding: f32,
    /// Minimum size of slider/scrollbar grabs.
    pub grab_min_size: i32,
    /// Corner radius of grabs.
    pub grab_rounding: f32,
    /// Horizontal alignment of title text (0 = left, 1 = right).
    pub window_title_align: f32,
    /// Horizontal alignment of button text (0 = left, 1 = right).
    pub button_text_align: f32,
    /// Margin kept between windows and the display edge.
    pub display_safe_area_padding: Vec2i,
    /// Maximum error allowed when tessellating curves, in pixels.
    pub curve_tessellation_tol: f32,
    /// Thickness of check marks.
    pub check_mark_thickness: f32,
    /// Pixels scrolled per mouse wheel notch.
    pub mouse_wheel_step: i32,
    /// Palette indexed by [`StyleColor`].
    pub colors: [Color; STYLE_COLOR_COUNT],
}

impl Default for Style {
    fn default() -> Self { Self::dark() }
}

fn palette(entries: &[(StyleColor, [f32; 4])]) -> [Color; STYLE_COLOR_COUNT] {
    let mut colors = [Color::BLACK; STYLE_COLOR_COUNT];
    for (role, [r, g, b, a]) in entries {
        colors[*role as usize] = Color::from_f32(*r, *g, *b, *a);
    }
    colors
}

impl Style {
    fn metrics(colors: [Color; STYLE_COLOR_COUNT]) -> Self {
        Self {
            alpha: 1.0,
            window_padding: vec2(8, 8),
            window_rounding: 7.0,
            window_border_size: 1.0,
            window_min_size: vec2(32, 32),
            child_rounding: 0.0,
            child_border_size: 1.0,
            popup_rounding: 0.0,
            popup_border_size: 1.0,
            frame_padding: vec2(4, 3),
            frame_rounding: 0.0,
            frame_border_size: 0.0,
            item_spacing: vec2(8, 4),
            item_inner_spacing: vec2(4, 4),
            indent_spacing: 21,
            scrollbar_size: 16,
            scrollbar_rounding: 9.0,
            grab_min_size: 10,
            grab_rounding: 0.0,
            window_title_align: 0.0,
            button_text_align: 0.5,
            display_safe_area_padding: vec2(4, 4),
            curve_tessellation_tol: 1.25,
            check_mark_thickness: 2.0,
            mouse_wheel_step: 20,
            colors,
        }
    }

    /// Builds the style for a preset.
    pub fn from_preset(preset: StylePreset) -> Self {
        match preset {
            StylePreset::Dark => Self::dark(),
            StylePreset::Light => Self::light(),
            StylePreset::Classic => Self::classic(),
        }
    }

    /// Dark theme.
    pub fn dark() -> Self {
        use StyleColor::*;
        Self::metrics(palette(&[
            (Text, [1.00, 1.00, 1.00, 1.00]),
            (TextDisabled, [0.50, 0.50, 0.50, 1.00]),
            (WindowBg, [0.06, 0.06, 0.06, 0.94]),
            (ChildBg, [0.00, 0.00, 0.00, 0.00]),
            (PopupBg, [0.08, 0.08, 0.08, 0.94]),
            (Border, [0.43, 0.43, 0.50, 0.50]),
            (BorderShadow, [0.00, 0.00, 0.00, 0.00]),
            (FrameBg, [0.16, 0.29, 0.48, 0.54]),
            (FrameBgHovered, [0.26, 0.59, 0.98, 0.40]),
            (FrameBgActive, [0.26, 0.59, 0.98, 0.67]),
            (TitleBg, [0.04, 0.04, 0.04, 1.00]),
            (TitleBgActive, [0.16, 0.29, 0.48, 1.00]),
            (TitleBgCollapsed, [0.00, 0.00, 0.00, 0.51]),
            (TitleText, [1.00, 1.00, 1.00, 1.00]),
            (MenuBarBg, [0.14, 0.14, 0.14, 1.00]),
            (ScrollbarBg, [0.02, 0.02, 0.02, 0.53]),
            (ScrollbarGrab, [0.31, 0.31, 0.31, 1.00]),
            (ScrollbarGrabHovered, [0.41, 0.41, 0.41, 1.00]),
            (ScrollbarGrabActive, [0.51, 0.51, 0.51, 1.00]),
            (CheckMark, [0.26, 0.59, 0.98, 1.00]),
            (SliderGrab, [0.24, 0.52, 0.88, 1.00]),
            (SliderGrabActive, [0.26, 0.59, 0.98, 1.00]),
            (Button, [0.26, 0.59, 0.98, 0.40]),
            (ButtonHovered, [0.26, 0.59, 0.98, 1.00]),
            (ButtonActive, [0.06, 0.53, 0.98, 1.00]),
            (Header, [0.26, 0.59, 0.98, 0.31]),
            (HeaderHovered, [0.26, 0.59, 0.98, 0.80]),
            (HeaderActive, [0.26, 0.59, 0.98, 1.00]),
            (Separator, [0.43, 0.43, 0.50, 0.50]),
            (SeparatorHovered, [0.10, 0.40, 0.75, 0.78]),
            (SeparatorActive, [0.10, 0.40, 0.75, 1.00]),
            (ResizeGrip, [0.26, 0.59, 0.98, 0.25]),
            (ResizeGripHovered, [0.26, 0.59, 0.98, 0.67]),
            (ResizeGripActive, [0.26, 0.59, 0.98, 0.95]),
            (CloseButton, [0.41, 0.41, 0.41, 0.50]),
            (CloseButtonHovered, [0.98, 0.39, 0.36, 1.00]),
            (CloseButtonActive, [0.98, 0.39, 0.36, 1.00]),
            (PlotLines, [0.61, 0.61, 0.61, 1.00]),
            (PlotLinesHovered, [1.00, 0.43, 0.35, 1.00]),
            (PlotHistogram, [0.90, 0.70, 0.00, 1.00]),
            (PlotHistogramHovered, [1.00, 0.60, 0.00, 1.00]),
            (TextSelectedBg, [0.26, 0.59, 0.98, 0.35]),
            (ModalWindowDim, [0.80, 0.80, 0.80, 0.35]),
            (DragDropTarget, [1.00, 1.00, 0.00, 0.90]),
            (NavHighlight, [0.26, 0.59, 0.98, 1.00]),
        ]))
    }

    /// Light theme.
    pub fn light() -> Self {
        use StyleColor::*;
        let mut style = Self::metrics(palette(&[
            (Text, [0.00, 0.00, 0.00, 1.00]),
            (TextDisabled, [0.60, 0.60, 0.60, 1.00]),
            (WindowBg, [0.94, 0.94, 0.94, 1.00]),
            (ChildBg, [0.00, 0.00, 0.00, 0.00]),
            (PopupBg, [1.00, 1.00, 1.00, 0.98]),
            (Border, [0.00, 0.00, 0.00, 0.30]),
            (BorderShadow, [0.00, 0.00, 0.00, 0.00]),
            (FrameBg, [1.00, 1.00, 1.00, 1.00]),
            (FrameBgHovered, [0.26, 0.59, 0.98, 0.40]),
            (FrameBgActive, [0.26, 0.59, 0.98, 0.67]),
            (TitleBg, [0.96, 0.96, 0.96, 1.00]),
            (TitleBgActive, [0.82, 0.82, 0.82, 1.00]),
            (TitleBgCollapsed, [1.00, 1.00, 1.00, 0.51]),
            (TitleText, [0.00, 0.00, 0.00, 1.00]),
            (MenuBarBg, [0.86, 0.86, 0.86, 1.00]),
            (ScrollbarBg, [0.98, 0.98, 0.98, 0.53]),
            (ScrollbarGrab, [0.69, 0.69, 0.69, 0.80]),
            (ScrollbarGrabHovered, [0.49, 0.49, 0.49, 0.80]),
            (ScrollbarGrabActive, [0.49, 0.49, 0.49, 1.00]),
            (CheckMark, [0.26, 0.59, 0.98, 1.00]),
            (SliderGrab, [0.26, 0.59, 0.98, 0.78]),
            (SliderGrabActive, [0.46, 0.54, 0.80, 0.60]),
            (Button, [0.26, 0.59, 0.98, 0.40]),
            (ButtonHovered, [0.26, 0.59, 0.98, 1.00]),
            (ButtonActive, [0.06, 0.53, 0.98, 1.00]),
            (Header, [0.26, 0.59, 0.98, 0.31]),
            (HeaderHovered, [0.26, 0.59, 0.98, 0.80]),
            (HeaderActive, [0.26, 0.59, 0.98, 1.00]),
            (Separator, [0.39, 0.39, 0.39, 0.62]),
            (SeparatorHovered, [0.14, 0.44, 0.80, 0.78]),
            (SeparatorActive, [0.14, 0.44, 0.80, 1.00]),
            (ResizeGrip, [0.35, 0.35, 0.35, 0.17]),
            (ResizeGripHovered, [0.26, 0.59, 0.98, 0.67]),
            (ResizeGripActive, [0.26, 0.59, 0.98, 0.95]),
            (CloseButton, [0.59, 0.59, 0.59, 0.50]),
            (CloseButtonHovered, [0.98, 0.39, 0.36, 1.00]),
            (CloseButtonActive, [0.98, 0.39, 0.36, 1.00]),
            (PlotLines, [0.39, 0.39, 0.39, 1.00]),
            (PlotLinesHovered, [1.00, 0.43, 0.35, 1.00]),
            (PlotHistogram, [0.90, 0.70, 0.00, 1.00]),
            (PlotHistogramHovered, [1.00, 0.45, 0.00, 1.00]),
            (TextSelectedBg, [0.26, 0.59, 0.98, 0.35]),
            (ModalWindowDim, [0.20, 0.20, 0.20, 0.35]),
            (DragDropTarget, [0.26, 0.59, 0.98, 0.95]),
            (NavHighlight, [0.26, 0.59, 0.98, 0.80]),
        ]));
        style.window_border_size = 1.0;
        style.frame_border_size = 1.0;
        style
    }

    /// Classic purple-tinted theme.
    pub fn classic() -> Self {
        use StyleColor::*;
        let mut style = Self::metrics(palette(&[
            (Text, [0.90, 0.90, 0.90, 1.00]),
            (TextDisabled, [0.60, 0.60, 0.60, 1.00]),
            (WindowBg, [0.00, 0.00, 0.00, 0.70]),
            (ChildBg, [0.00, 0.00, 0.00, 0.00]),
            (PopupBg, [0.05, 0.05, 0.10, 0.90]),
            (Border, [0.70, 0.70, 0.70, 0.40]),
            (BorderShadow, [0.00, 0.00, 0.00, 0.00]),
            (FrameBg, [0.80, 0.80, 0.80, 0.30]),
            (FrameBgHovered, [0.90, 0.80, 0.80, 0.40]),
            (FrameBgActive, [0.90, 0.65, 0.65, 0.45]),
            (TitleBg, [0.27, 0.27, 0.54, 0.83]),
            (TitleBgActive, [0.32, 0.32, 0.63, 0.87]),
            (TitleBgCollapsed, [0.40, 0.40, 0.80, 0.20]),
            (TitleText, [0.90, 0.90, 0.90, 1.00]),
            (MenuBarBg, [0.40, 0.40, 0.55, 0.80]),
            (ScrollbarBg, [0.20, 0.25, 0.30, 0.60]),
            (ScrollbarGrab, [0.40, 0.40, 0.80, 0.30]),
            (ScrollbarGrabHovered, [0.40, 0.40, 0.80, 0.40]),
            (ScrollbarGrabActive, [0.41, 0.39, 0.80, 0.60]),
            (CheckMark, [0.90, 0.90, 0.90, 0.50]),
            (SliderGrab, [1.00, 1.00, 1.00, 0.30]),
            (SliderGrabActive, [0.41, 0.39, 0.80, 0.60]),
            (Button, [0.35, 0.40, 0.61, 0.62]),
            (ButtonHovered, [0.40, 0.48, 0.71, 0.79]),
            (ButtonActive, [0.46, 0.54, 0.80, 1.00]),
            (Header, [0.40, 0.40, 0.90, 0.45]),
            (HeaderHovered, [0.45, 0.45, 0.90, 0.80]),
            (HeaderActive, [0.53, 0.53, 0.87, 0.80]),
            (Separator, [0.50, 0.50, 0.50, 1.00]),
            (SeparatorHovered, [0.60, 0.60, 0.70, 1.00]),
            (SeparatorActive, [0.70, 0.70, 0.90, 1.00]),
            (ResizeGrip, [1.00, 1.00, 1.00, 0.16]),
            (ResizeGripHovered, [0.78, 0.82, 1.00, 0.60]),
            (ResizeGripActive, [0.78, 0.82, 1.00, 0.90]),
            (CloseButton, [0.50, 0.50, 0.90, 0.50]),
            (CloseButtonHovered, [0.70, 0.70, 0.90, 0.60]),
            (CloseButtonActive, [0.70, 0.70, 0.70, 1.00]),
            (PlotLines, [1.00, 1.00, 1.00, 1.00]),
            (PlotLinesHovered, [0.90, 0.70, 0.00, 1.00]),
            (PlotHistogram, [0.90, 0.70, 0.00, 1.00]),
            (PlotHistogramHovered, [1.00, 0.60, 0.00, 1.00]),
            (TextSelectedBg, [0.00, 0.00, 1.00, 0.35]),
            (ModalWindowDim, [0.20, 0.20, 0.20, 0.35]),
            (DragDropTarget, [1.00, 1.00, 0.00, 0.90]),
            (NavHighlight, [0.45, 0.45, 0.90, 0.80]),
        ]));
        style.window_rounding = 9.0;
        style
    }

    /// Returns the color for a role with the global alpha applied.
    pub fn color(&self, role: StyleColor) -> Color { self.colors[role as usize].scale_alpha(self.alpha) }

    /// Overrides a single color role.
    pub fn set_color(&mut self, role: StyleColor, color: Color) { self.colors[role as usize] = color; }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_fits_the_table() {
        assert_eq!(StyleColor::NavHighlight as usize + 1, STYLE_COLOR_COUNT);
    }

    #[test]
    fn presets_differ() {
        let dark = Style::from_preset(StylePreset::Dark);
        let light = Style::from_preset(StylePreset::Light);
        assert_ne!(dark.color(StyleColor::Text), light.color(StyleColor::Text));
        assert_eq!(Style::default().color(StyleColor::Text), Color::WHITE);
    }

    #[test]
    fn set_color_and_global_alpha() {
        let mut style = Style::classic();
        style.set_color(StyleColor::Button, Color::WHITE);
        assert_eq!(style.color(StyleColor::Button), Color::WHITE);
        style.alpha = 0.0;
        assert!(style.color(StyleColor::Button).is_invisible());
    }
}
