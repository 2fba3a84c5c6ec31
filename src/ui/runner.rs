use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};

use crate::controller::{Completion, Effect};
use crate::executor::Executor;
use crate::ui::{App, handle_key_event, layout::render_ui, terminal::Tui};

const TICK_RATE: Duration = Duration::from_millis(100);

pub fn run_app(
    terminal: &mut Tui,
    mut app: App,
    executor: &Executor,
    completions: &Receiver<Completion>,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| render_ui(f, &app))?;

        for intent in app.take_intents() {
            let effects = app.controller.dispatch(intent);
            apply_effects(&mut app, executor, effects);
        }

        // Finished fetches
        loop {
            match completions.try_recv() {
                Ok(completion) => {
                    let effects = app.controller.complete(completion);
                    apply_effects(&mut app, executor, effects);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("Completion channel closed");
                    break;
                }
            }
        }
        app.clamp_selection();

        let timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key_event(&mut app, key);
                }
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            last_tick = Instant::now();
        }

        if app.should_quit {
            info!("Quitting");
            break;
        }
    }

    Ok(())
}

/// UI effects are applied in place, the rest go to the executor. Executor
/// failures surface in the error banner.
pub fn apply_effects(app: &mut App, executor: &Executor, effects: Vec<Effect>) {
    for effect in effects {
        if app.apply_ui_effect(&effect) {
            continue;
        }
        if let Err(e) = executor.execute(effect) {
            warn!("Effect failed: {:#}", e);
            app.controller.report_error(format!("{:#}", e));
        }
    }
}
