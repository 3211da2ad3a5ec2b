use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, TitleBar};

/// Lay out and draw one frame: title bar, transcript, input box.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let busy = app.is_busy();
    tui.input_box.disabled = busy;

    let input_height = tui.input_box.calculate_height(frame.area().width);
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    TitleBar::new(
        app.role(),
        app.collection.label(),
        &app.status_message,
        busy.then_some(spinner_frame),
    )
    .render(frame, title_area);

    MessageList::new(&mut tui.message_list, &app.transcript, busy, spinner_frame)
        .render(frame, main_area);

    tui.input_box.render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{Bootstrap, Collection, Submission};
    use crate::core::transcript::Entry;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_ui_shows_transcript_and_title() {
        let mut app = test_app();
        app.bootstrap = Bootstrap::Ready;
        app.collection = Collection::Complete;
        app.transcript.push(Entry::bot("What is your goal today?"));
        app.transcript.push(Entry::user("explain rain"));
        app.transcript.push(Entry::bot("Rain falls from clouds."));
        app.transcript.push(Entry::diagram("graph TD\nCloud-->Rain"));

        let mut tui = TuiState::new();
        let text = screen(&app, &mut tui);

        assert!(text.contains("chatbox (role: student)"));
        assert!(text.contains("free-form"));
        assert!(text.contains("What is your goal today?"));
        assert!(text.contains("Rain falls from clouds."));
        assert!(text.contains("diagram: graph"));
        assert!(text.contains("Cloud-->Rain"));
        assert!(text.contains("Enter to send"));
        assert!(!tui.input_box.disabled);
    }

    #[test]
    fn test_input_disabled_while_submitting() {
        let mut app = test_app();
        app.bootstrap = Bootstrap::Ready;
        app.submission = Submission::Submitting;
        app.status_message = "Waiting for reply...".to_string();

        let mut tui = TuiState::new();
        let text = screen(&app, &mut tui);

        assert!(tui.input_box.disabled);
        assert!(text.contains("Waiting for reply..."));
        assert!(text.contains("Waiting for response..."));
    }

    #[test]
    fn test_input_disabled_while_bootstrapping() {
        let mut app = test_app();
        app.bootstrap = Bootstrap::AwaitingFirstQuestion;

        let mut tui = TuiState::new();
        screen(&app, &mut tui);
        assert!(tui.input_box.disabled);
    }
}
