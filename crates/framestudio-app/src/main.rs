//! FrameStudio - Multi-frame design editor
//!
//! Entry point and main application loop.

mod canvas_view;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context as _, Result};
use eframe::egui;
use framestudio_canvas::{EditingSurface, RasterFactory};
use framestudio_editor::{EditorConfig, EditorShell, FileSink};
use framestudio_ui::sidebar::{show_selection_toolbar, show_sidebar};
use framestudio_ui::{show_timeline, PreviewCache, Theme, TimelineAction, TimelineState};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::canvas_view::CanvasView;

const AUTOSAVE_FILE: &str = "framestudio-autosave.json";

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("FrameStudio starting...");

    // Optional config file as the first argument
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => EditorConfig::load_from_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EditorConfig::default(),
    };
    let save_path = std::env::temp_dir().join(AUTOSAVE_FILE);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_title("FrameStudio"),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "FrameStudio",
        options,
        Box::new(move |cc| Ok(Box::new(FrameStudioApp::new(cc, config, save_path)?))),
    )?;

    Ok(())
}

struct FrameStudioApp {
    shell: EditorShell<RasterFactory, FileSink>,
    timeline: TimelineState,
    previews: PreviewCache,
    canvas: CanvasView,
    status: Option<String>,
}

impl FrameStudioApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        config: EditorConfig,
        save_path: PathBuf,
    ) -> Result<Self> {
        Theme::apply(&cc.egui_ctx);
        info!(path = %save_path.display(), "Autosaving to file");
        let shell = EditorShell::new(RasterFactory::new(), FileSink::new(save_path), config)?;
        Ok(Self {
            shell,
            timeline: TimelineState::new(),
            previews: PreviewCache::new(),
            canvas: CanvasView::default(),
            status: None,
        })
    }

    fn report(&mut self, context: &str, err: impl std::fmt::Display) {
        warn!(error = %err, "{}", context);
        self.status = Some(format!("{}: {}", context, err));
    }

    fn content_changed(&mut self, now: Instant) {
        if let Some(frame) = self.shell.active_frame() {
            self.previews.invalidate(frame);
        }
        if let Err(e) = self.shell.notify_content_changed(now) {
            self.report("Could not queue autosave", e);
        }
    }

    fn add_frame(&mut self, now: Instant) {
        match self.shell.add_frame() {
            Ok(frame) => {
                self.timeline.cancel_gesture();
                self.canvas.invalidate();
                self.status = Some(format!("Added {}", frame));
                self.content_changed(now);
            }
            Err(e) => self.report("Could not add frame", e),
        }
    }

    fn apply_timeline(&mut self, actions: Vec<TimelineAction>, now: Instant) {
        for action in actions {
            match action {
                TimelineAction::SwitchFrame(frame) => {
                    if let Some(previous) = self.shell.active_frame() {
                        self.previews.invalidate(previous);
                    }
                    if let Err(e) = self.shell.switch_frame(frame) {
                        self.report("Could not switch frame", e);
                    }
                }
                TimelineAction::Reorder {
                    segment,
                    x,
                    committed,
                } => {
                    debug!(%segment, x, "Reorder");
                    self.shell.commit_segments(committed);
                    self.content_changed(now);
                }
                TimelineAction::Retime {
                    segment,
                    width,
                    committed,
                } => {
                    debug!(%segment, width, "Retime");
                    self.shell.commit_segments(committed);
                    self.content_changed(now);
                }
            }
        }
    }

    fn refresh_previews(&mut self, ctx: &egui::Context) {
        let frames: Vec<_> = self.shell.orchestrator().registry().frames().collect();
        self.previews.retain(&frames);
        for frame in frames {
            if !self.previews.needs_refresh(frame) {
                continue;
            }
            let rendered = self
                .shell
                .orchestrator()
                .render_preview(frame)
                .and_then(|png| self.previews.refresh(ctx, frame, &png));
            if let Err(e) = rendered {
                self.report("Could not render preview", e);
            }
        }
    }

    fn has_selection(&self) -> bool {
        self.shell
            .orchestrator()
            .active_surface()
            .is_some_and(|s| s.has_active_selection())
    }
}

impl eframe::App for FrameStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Autosave
        if let Err(e) = self.shell.poll_autosave(now) {
            self.report("Autosave failed", e);
        }
        if let Some(wait) = self.shell.autosave().remaining(now) {
            ctx.request_repaint_after(wait);
        }

        self.refresh_previews(ctx);

        // Selection toolbar
        egui::TopBottomPanel::top("selection_toolbar").show(ctx, |ui| {
            let has_selection = self.has_selection();
            if let Some(tool) = show_selection_toolbar(ui, self.shell.active_tool(), has_selection) {
                self.shell.change_tool(tool);
            }
        });

        // Footer and timeline at bottom
        egui::TopBottomPanel::bottom("timeline_panel")
            .frame(Theme::timeline_frame())
            .show(ctx, |ui| {
                let actions = show_timeline(
                    ui,
                    &mut self.timeline,
                    self.shell.segments(),
                    self.shell.active_frame(),
                    &self.previews,
                );
                self.apply_timeline(actions, now);
            });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Add frame").clicked() {
                    self.add_frame(now);
                }
                ui.label(format!(
                    "{} frames | {:.2}s",
                    self.shell.orchestrator().frame_count(),
                    self.shell.segments().total_time()
                ));
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(egui::RichText::new(status).color(Theme::t2()));
                }
            });
        });

        // Tools on left
        egui::SidePanel::left("tool_panel")
            .resizable(false)
            .default_width(160.0)
            .frame(Theme::panel_frame())
            .show(ctx, |ui| {
                if let Some(tool) = show_sidebar(ui, self.shell.active_tool()) {
                    self.shell.change_tool(tool);
                }
            });

        // Active frame
        egui::CentralPanel::default().show(ctx, |ui| {
            let tool = self.shell.active_tool();
            let Some(frame) = self.shell.active_frame() else {
                ui.label("No frame");
                return;
            };
            let Some(surface) = self.shell.active_surface_mut() else {
                return;
            };
            let outcome = ui
                .centered_and_justified(|ui| self.canvas.show(ui, frame, surface, tool))
                .inner;
            if outcome.selection_changed {
                self.shell.sync_selection();
            }
            if outcome.content_changed {
                self.content_changed(now);
            }
        });
    }
}

impl Drop for FrameStudioApp {
    fn drop(&mut self) {
        self.shell.teardown();
    }
}
