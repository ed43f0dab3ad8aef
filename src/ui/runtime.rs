use crate::interactor::Environment;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use std::io;

/// Run the terminal UI until the user quits or input closes.
pub async fn run(env: Environment) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let mut events = EventHandler::new();
    let mut app = App::new(env, events.sender());
    app.restore_session();

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        let Some(event) = events.next().await else {
            break;
        };
        match event {
            AppEvent::Key(key) => handle_key(&mut app, key),
            AppEvent::Resize | AppEvent::StateChanged => {}
            AppEvent::TaskFinished { task, result } => {
                if let Err(err) = &result {
                    tracing::warn!(task = task.name(), error = %err, "Task failed");
                }
                app.on_task_finished(task, result);
            }
            AppEvent::TaskAborted(task) => app.on_task_aborted(task),
            AppEvent::InputClosed => break,
        }
    }

    drop(guard);
    Ok(())
}
