//! Text and keyboards for the chat front-end.

use pc_assembly::assembly::{Board, Part, PartStatus, Slot};
use pc_assembly::progress;
use pc_assembly::quiz::{Feedback, Question, QuizSession};
use teloxide::types::{KeyboardButton, KeyboardMarkup};

pub const ASSEMBLE: &str = "🛠 Assemble a PC";
pub const TAKE_QUIZ: &str = "❓ Take the quiz";
pub const RESET: &str = "🔄 Reset";
pub const MENU: &str = "⬅️ Menu";
pub const CANCEL: &str = "✋ Cancel";
pub const NEXT: &str = "➡️ Next";

const BAR_WIDTH: usize = 10;

pub fn menu_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(ASSEMBLE),
        KeyboardButton::new(TAKE_QUIZ),
    ]])
}

pub fn part_button(part: Part) -> String {
    format!("{} {}", part.icon(), part.label())
}

pub fn slot_button(slot: &Slot) -> String {
    format!("📍 {}", slot.label)
}

/// The part a button (or a typed id such as `cpu`) refers to.
pub fn parse_part(board: &Board, text: &str) -> Option<Part> {
    board
        .parts()
        .find(|p| part_button(*p) == text)
        .or_else(|| text.parse::<Part>().ok().filter(|p| board.parts().any(|b| b == *p)))
}

/// The slot id a button (or a typed slot id) refers to.
pub fn parse_slot(board: &Board, text: &str) -> Option<String> {
    board
        .slots()
        .iter()
        .find(|s| slot_button(s) == text || s.id == text.trim())
        .map(|s| s.id.clone())
}

/// Board overview. `highlight` marks a slot that just refused a part.
pub fn board_text(board: &Board, highlight: Option<&str>) -> String {
    let mut out = String::from("🖥 PC assembly\n\nSlots:\n");
    for slot in board.slots() {
        let line = match board.occupant(&slot.id) {
            Some(part) => format!("✅ {}: {} {}", slot.label, part.icon(), part.label()),
            None if highlight == Some(slot.id.as_str()) => format!("💢 {}", slot.label),
            None => format!("⬜ {}", slot.label),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str("\nParts:\n");
    for part in board.parts() {
        let status = match board.part_status(part) {
            PartStatus::Pending => "Pending",
            PartStatus::Done => "Done",
        };
        out.push_str(&format!("{}: {status}\n", part_button(part)));
    }
    out.push('\n');
    out.push_str(&progress::bar(board.percent(), BAR_WIDTH));
    out
}

/// Parts that can be picked up, plus reset and menu.
pub fn parts_keyboard(board: &Board) -> KeyboardMarkup {
    let draggable: Vec<KeyboardButton> = board
        .parts()
        .filter(|p| board.can_drag(*p))
        .map(|p| KeyboardButton::new(part_button(p)))
        .collect();
    let mut rows: Vec<Vec<KeyboardButton>> = draggable.chunks(2).map(|c| c.to_vec()).collect();
    rows.push(vec![KeyboardButton::new(RESET), KeyboardButton::new(MENU)]);
    KeyboardMarkup::new(rows)
}

pub fn slots_keyboard(board: &Board) -> KeyboardMarkup {
    let buttons: Vec<KeyboardButton> = board
        .slots()
        .iter()
        .map(|s| KeyboardButton::new(slot_button(s)))
        .collect();
    let mut rows: Vec<Vec<KeyboardButton>> = buttons.chunks(2).map(|c| c.to_vec()).collect();
    rows.push(vec![KeyboardButton::new(CANCEL)]);
    KeyboardMarkup::new(rows)
}

pub fn holding_text(part: Part) -> String {
    format!("Holding {}. Drop it on a slot:", part_button(part))
}

pub fn question_text(session: &QuizSession, question: &Question) -> String {
    format!(
        "Question {}/{}\n\n{}\n\n{}",
        session.index() + 1,
        session.len(),
        question.text,
        progress::bar(session.percent(), BAR_WIDTH)
    )
}

pub fn options_keyboard(question: &Question) -> KeyboardMarkup {
    KeyboardMarkup::new(
        question
            .options
            .iter()
            .map(|o| vec![KeyboardButton::new(o.clone())])
            .collect::<Vec<_>>(),
    )
}

/// Keyboard to answer with: the current options, or the menu once the
/// session has no question left.
pub fn answer_keyboard(session: &QuizSession) -> KeyboardMarkup {
    session
        .current()
        .map(options_keyboard)
        .unwrap_or_else(menu_keyboard)
}

/// The question with the chosen option marked, then the feedback line.
pub fn answered_text(question: &Question, selected: usize, correct: bool, feedback: Feedback) -> String {
    let mut out = format!("{}\n\n", question.text);
    for (i, option) in question.options.iter().enumerate() {
        let mark = match (i == selected, correct) {
            (true, true) => "✅",
            (true, false) => "❌",
            (false, _) => "▫️",
        };
        out.push_str(&format!("{mark} {option}\n"));
    }
    out.push('\n');
    out.push_str(feedback.text());
    out
}

pub fn next_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(NEXT)]])
}

pub fn finished_text(session: &QuizSession) -> String {
    format!(
        "Quiz Completed!\n\n{}\n{}",
        session.score_text(),
        progress::bar(100, BAR_WIDTH)
    )
}
