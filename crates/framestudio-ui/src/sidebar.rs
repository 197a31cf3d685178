//! Tool sidebar and selection toolbar.

use crate::theme::Theme;
use egui::{self, RichText};
use framestudio_editor::ActiveTool;

/// Tools listed in the sidebar, in display order.
pub fn sidebar_tools() -> impl Iterator<Item = ActiveTool> {
    std::iter::once(ActiveTool::Select).chain(ActiveTool::ALL.into_iter().filter(|t| t.in_sidebar()))
}

/// Tools that act on the current selection.
pub fn selection_tools() -> impl Iterator<Item = ActiveTool> {
    ActiveTool::ALL.into_iter().filter(|t| t.is_selection_dependent())
}

fn tool_button(ui: &mut egui::Ui, tool: ActiveTool, active: ActiveTool, enabled: bool) -> bool {
    let selected = tool == active;
    let text = RichText::new(tool.label()).size(Theme::FONT_SM);
    ui.add_enabled(enabled, egui::SelectableLabel::new(selected, text))
        .clicked()
}

/// Vertical list of sidebar tools. Returns the tool that was clicked.
pub fn show_sidebar(ui: &mut egui::Ui, active: ActiveTool) -> Option<ActiveTool> {
    let mut clicked = None;
    ui.vertical(|ui| {
        ui.label(RichText::new("Tools").size(Theme::FONT_MD).color(Theme::t2()));
        ui.add_space(Theme::SPACE_XS);
        for tool in sidebar_tools() {
            if tool_button(ui, tool, active, true) {
                clicked = Some(tool);
            }
        }
    });
    clicked
}

/// Horizontal toolbar of selection tools, disabled without a selection.
pub fn show_selection_toolbar(
    ui: &mut egui::Ui,
    active: ActiveTool,
    has_selection: bool,
) -> Option<ActiveTool> {
    let mut clicked = None;
    ui.horizontal(|ui| {
        for tool in selection_tools() {
            if tool_button(ui, tool, active, has_selection) {
                clicked = Some(tool);
            }
        }
    });
    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidebar_starts_with_select() {
        let tools: Vec<_> = sidebar_tools().collect();
        assert_eq!(tools.first(), Some(&ActiveTool::Select));
        assert!(tools.contains(&ActiveTool::Draw));
        assert!(!tools.contains(&ActiveTool::Fill));
    }

    #[test]
    fn toolbar_holds_selection_tools_only() {
        assert_eq!(selection_tools().count(), 7);
        assert!(selection_tools().all(|t| !t.in_sidebar()));
    }
}
