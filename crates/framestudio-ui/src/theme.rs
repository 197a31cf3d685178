//! Dark studio theme: palette, spacing and frame builders.

use egui::{Color32, Rounding, Stroke, Vec2};

/// Central theme shared by every panel.
pub struct Theme;

impl Theme {
    // ── Typography ─────────────────────────────────────────────
    pub const FONT_XS: f32 = 11.0; // time labels, badges
    pub const FONT_SM: f32 = 13.0; // body, buttons
    pub const FONT_MD: f32 = 15.0; // section headers

    // ── Spacing (4px base) ─────────────────────────────────────
    pub const SPACE_XS: f32 = 4.0;
    pub const SPACE_SM: f32 = 8.0;

    // ── Border radius ──────────────────────────────────────────
    pub const RADIUS: f32 = 6.0;
    pub const RADIUS_LG: f32 = 8.0; // segments

    // ── Stroke widths ──────────────────────────────────────────
    pub const STROKE_SUBTLE: f32 = 0.5;
    pub const STROKE_EMPHASIS: f32 = 1.0;
    pub const STROKE_DRAG: f32 = 4.0;

    // ── Backgrounds ────────────────────────────────────────────
    pub const fn bg() -> Color32 {
        Color32::from_rgb(18, 18, 22)
    }
    pub const fn bg1() -> Color32 {
        Color32::from_rgb(28, 28, 34)
    }
    pub const fn bg2() -> Color32 {
        Color32::from_rgb(35, 35, 42)
    }
    pub const fn bg3() -> Color32 {
        Color32::from_rgb(45, 45, 55)
    }
    /// Timeline lane.
    pub const fn lane() -> Color32 {
        Color32::from_rgb(229, 231, 235)
    }

    // ── Text ───────────────────────────────────────────────────
    pub const fn t1() -> Color32 {
        Color32::from_rgba_premultiplied(235, 235, 235, 235)
    }
    pub const fn t2() -> Color32 {
        Color32::from_rgba_premultiplied(153, 153, 153, 153)
    }
    pub const fn t3() -> Color32 {
        Color32::from_rgba_premultiplied(89, 89, 89, 89)
    }

    // ── Accent ─────────────────────────────────────────────────
    pub const fn accent() -> Color32 {
        Color32::from_rgb(59, 130, 246)
    }
    pub const fn accent_subtle() -> Color32 {
        Color32::from_rgba_premultiplied(5, 10, 20, 20)
    }

    pub const fn white_04() -> Color32 {
        Color32::from_rgba_premultiplied(10, 10, 10, 10)
    }
    pub const fn white_10() -> Color32 {
        Color32::from_rgba_premultiplied(26, 26, 26, 26)
    }
    /// Backing of the time badge.
    pub const fn badge() -> Color32 {
        Color32::from_rgba_premultiplied(8, 10, 14, 64)
    }

    /// Return a color with replaced alpha.
    pub const fn with_alpha(c: Color32, a: u8) -> Color32 {
        Color32::from_rgba_premultiplied(
            (c.r() as u16 * a as u16 / 255) as u8,
            (c.g() as u16 * a as u16 / 255) as u8,
            (c.b() as u16 * a as u16 / 255) as u8,
            a,
        )
    }

    // ── Frame builders ─────────────────────────────────────────

    /// Side panel frame.
    pub fn panel_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(Self::bg1())
            .inner_margin(egui::Margin::same(Self::SPACE_SM))
    }

    /// Frame around the timeline strip.
    pub fn timeline_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(Self::lane())
            .stroke(Stroke::new(Self::STROKE_SUBTLE, Self::white_10()))
            .inner_margin(egui::Margin::symmetric(0.0, Self::SPACE_XS))
    }

    /// Apply the theme to an egui context.
    pub fn apply(ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        let visuals = &mut style.visuals;
        *visuals = egui::Visuals::dark();

        visuals.panel_fill = Self::bg1();
        visuals.window_fill = Self::bg2();
        visuals.extreme_bg_color = Self::bg();

        visuals.widgets.inactive.bg_fill = Self::bg3();
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Self::t2());
        visuals.widgets.inactive.bg_stroke = Stroke::new(Self::STROKE_SUBTLE, Self::white_04());
        visuals.widgets.inactive.rounding = Rounding::same(Self::RADIUS);

        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Self::t1());
        visuals.widgets.hovered.rounding = Rounding::same(Self::RADIUS);

        visuals.widgets.active.bg_fill = Self::accent_subtle();
        visuals.widgets.active.fg_stroke = Stroke::new(Self::STROKE_EMPHASIS, Self::accent());
        visuals.widgets.active.rounding = Rounding::same(Self::RADIUS);

        visuals.selection.bg_fill = Self::accent_subtle();
        visuals.selection.stroke = Stroke::new(1.0, Self::accent());

        style.spacing.item_spacing = Vec2::new(Self::SPACE_SM, Self::SPACE_XS);
        ctx.set_style(style);
    }
}
