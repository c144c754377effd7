use crate::demo::{Chat, Demo, BUILTIN_FRAMES};
use anyhow::{Context, Result};
use glam::Vec2;
use iris_core::{Iris, IrisConfig};
use iris_testkit::{EventRecorder, FrameEvent, FrameScript, JsonlSink};
use iris_ui::{Action, DrawCommand, IrisUi, UiInput};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

pub struct HeadlessConfig {
    pub iris: IrisConfig,
    pub frames: Option<PathBuf>,
    pub event_log: Option<PathBuf>,
    pub resolution: (u32, u32),
}

/// Summary of a finished run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub frames: u64,
    pub events: usize,
    pub selections: usize,
}

pub fn run(cfg: HeadlessConfig) -> Result<RunReport> {
    let script = match &cfg.frames {
        Some(path) => FrameScript::load(path)?,
        None => FrameScript::parse_str(BUILTIN_FRAMES).context("built-in frame script")?,
    };

    let mut iris: Iris<Action> =
        Iris::with_config(&cfg.iris).context("invalid iris configuration")?;
    let ui = IrisUi::attach(&mut iris);
    let (recorder, _) = EventRecorder::attach(&mut iris);

    let chat = Chat::default();
    let remote_ids: HashMap<_, _> = script
        .entities
        .iter()
        .filter_map(|entity| entity.remote_id.map(|id| (entity.handle, id)))
        .collect();
    let mut demo = Demo::register(&mut iris, remote_ids, chat.clone())?;

    let mut sink = cfg.event_log.as_deref().map(JsonlSink::create).transpose()?;
    let mut host = script.host();
    let resolution = Vec2::new(cfg.resolution.0 as f32, cfg.resolution.1 as f32);
    let mut report = RunReport::default();

    for (frame, step) in script.frames().enumerate() {
        let frame = frame as u64;
        host.aim(step.outcome());
        iris.tick(&mut host);

        let input = UiInput {
            toggle_pressed: step.toggle,
            scroll: step.scroll,
            select_pressed: step.select,
            resolution,
        };
        let output = ui.frame(&mut iris, &input);
        debug!(
            frame,
            draws = output.draws.len(),
            focused = %iris.last_entity_handle(),
            "frame rendered"
        );
        for draw in &output.draws {
            if let DrawCommand::Text { text, .. } = draw {
                debug!(frame, "menu: {text}");
            }
        }

        if let Some(selection) = output.selection {
            report.selections += 1;
            selection.dispatch(|event, entity| demo.handle_event(&mut iris, event, entity));
        }

        for line in ui.take_chat().into_iter().chain(chat.borrow_mut().drain(..)) {
            println!("[frame {frame:>3}] {line}");
        }

        for event in recorder.take() {
            report.events += 1;
            if let Some(sink) = sink.as_mut() {
                sink.write(&FrameEvent {
                    frame,
                    event: &event,
                })?;
            }
        }

        report.frames = frame + 1;
    }

    debug!(rays = host.rays().len(), "raycasts performed");
    info!(
        frames = report.frames,
        events = report.events,
        selections = report.selections,
        "headless run finished"
    );
    Ok(report)
}
