mod sound;
mod toast;
mod view;

use std::sync::Arc;

use dotenv::dotenv;
use log::debug;
use pc_assembly::assembly::{AssemblyEvent, Board, Part, Rejection};
use pc_assembly::config::Config;
use pc_assembly::feedback::{self, ToastKind};
use pc_assembly::quiz::{self, questions, Phase, QuizEvent, QuizSession};
use sound::{Cue, Sounds};
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, SqliteStorage, Storage},
    prelude::*,
    types::MessageId,
};
use toast::Toasts;

type AppDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    ChooseActivity,
    Assembly {
        board: Board,
        /// Part picked up and not yet dropped.
        holding: Option<Part>,
        /// Latest board message, edited for slot pulses.
        board_message: Option<MessageId>,
    },
    Quiz {
        session: QuizSession,
    },
}

type DialogueStorage = std::sync::Arc<ErasedStorage<State>>;

/// Everything handlers share besides the bot and the dialogue.
pub struct App {
    config: Config,
    questions: Vec<quiz::Question>,
    toasts: Toasts,
    sounds: Sounds,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting assembly bot...");

    let config = Config::from_env().expect("Invalid configuration");
    let questions = match &config.quiz_file {
        Some(path) => questions::load(path).expect("Failed to load the quiz file"),
        None => questions::builtin(),
    };
    log::info!("{} quiz question(s) loaded", questions.len());

    let bot = Bot::from_env();

    log::info!("Opening dialogue storage at {}", config.database_path.display());
    let storage: DialogueStorage =
        SqliteStorage::open(&config.database_path.to_string_lossy(), Json)
            .await
            .expect("Failed to open dialogue storage")
            .erase();

    let app = Arc::new(App {
        toasts: Toasts::new(bot.clone(), config.lifetimes),
        sounds: Sounds::new(config.sounds_dir.clone()),
        questions,
        config,
    });

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::ChooseActivity].endpoint(choose_activity))
            .branch(
                dptree::case![State::Assembly {
                    board,
                    holding,
                    board_message
                }]
                .endpoint(assembly),
            )
            .branch(dptree::case![State::Quiz { session }].endpoint(take_quiz)),
    )
    .dependencies(dptree::deps![storage, app])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

const GREETING_TEXT: &str = "Hi! Let's learn what goes inside a computer. Assemble a PC by dragging parts into their slots, or take a short quiz.";
async fn start(bot: Bot, dialogue: AppDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT)
        .reply_markup(view::menu_keyboard())
        .await?;

    dialogue.update(State::ChooseActivity).await?;
    Ok(())
}

async fn choose_activity(
    bot: Bot,
    dialogue: AppDialogue,
    app: Arc<App>,
    msg: Message,
) -> HandlerResult {
    match msg.text() {
        Some(view::ASSEMBLE) => {
            let board = Board::with_options(app.config.placement);
            let sent = send_board(&bot, msg.chat.id, &board).await?;
            dialogue
                .update(State::Assembly {
                    board,
                    holding: None,
                    board_message: Some(sent),
                })
                .await?;
        }
        Some(view::TAKE_QUIZ) => {
            let session = QuizSession::new(app.questions.clone())?;
            send_question(&bot, msg.chat.id, &session).await?;
            dialogue.update(State::Quiz { session }).await?;
        }
        _ => {
            bot.send_message(msg.chat.id, "Please choose one of the options")
                .reply_markup(view::menu_keyboard())
                .await?;
        }
    }
    Ok(())
}

async fn assembly(
    bot: Bot,
    dialogue: AppDialogue,
    app: Arc<App>,
    (mut board, holding, mut board_message): (Board, Option<Part>, Option<MessageId>),
    msg: Message,
) -> HandlerResult {
    let chat = msg.chat.id;
    let Some(text) = msg.text() else {
        bot.send_message(chat, "Please use the buttons").await?;
        return Ok(());
    };

    let holding = match (text, holding) {
        (view::MENU, _) => {
            app.toasts.dismiss_now(chat).await;
            bot.send_message(chat, "What would you like to do next?")
                .reply_markup(view::menu_keyboard())
                .await?;
            dialogue.update(State::ChooseActivity).await?;
            return Ok(());
        }
        (view::RESET, _) => {
            let events = board.reset();
            debug!("board reset in {chat}");
            board_message = render_assembly(&bot, &app, chat, &board, board_message, &events).await?;
            None
        }
        (view::CANCEL, Some(part)) => {
            debug!("{part} put back in {chat}");
            bot.send_message(chat, "Put it back.")
                .reply_markup(view::parts_keyboard(&board))
                .await?;
            None
        }
        (_, None) => match view::parse_part(&board, text) {
            Some(part) if !board.can_drag(part) => {
                app.toasts
                    .show(chat, ToastKind::Short, feedback::ALREADY_PLACED)
                    .await?;
                None
            }
            Some(part) => {
                bot.send_message(chat, view::holding_text(part))
                    .reply_markup(view::slots_keyboard(&board))
                    .await?;
                Some(part)
            }
            None => {
                bot.send_message(chat, "Pick a part to drag")
                    .reply_markup(view::parts_keyboard(&board))
                    .await?;
                None
            }
        },
        (_, Some(part)) => match view::parse_slot(&board, text) {
            Some(slot) => {
                let events = board.attempt_placement(part, &slot, &mut rand::thread_rng())?;
                board_message = render_assembly(&bot, &app, chat, &board, board_message, &events).await?;
                None
            }
            None => {
                bot.send_message(chat, "Drop it on one of the slots")
                    .reply_markup(view::slots_keyboard(&board))
                    .await?;
                Some(part)
            }
        },
    };

    dialogue
        .update(State::Assembly {
            board,
            holding,
            board_message,
        })
        .await?;
    Ok(())
}

async fn send_board(bot: &Bot, chat: ChatId, board: &Board) -> Result<MessageId, teloxide::RequestError> {
    let sent = bot
        .send_message(chat, view::board_text(board, None))
        .reply_markup(view::parts_keyboard(board))
        .await?;
    Ok(sent.id)
}

/// Draw the outcome of a board operation. Returns the board message to
/// pulse next time.
async fn render_assembly(
    bot: &Bot,
    app: &App,
    chat: ChatId,
    board: &Board,
    board_message: Option<MessageId>,
    events: &[AssemblyEvent],
) -> Result<Option<MessageId>, teloxide::RequestError> {
    let redraw = events.iter().any(|e| {
        matches!(
            e,
            AssemblyEvent::Placed { .. } | AssemblyEvent::Cleared | AssemblyEvent::Progress { .. }
        )
    });
    let board_message = if redraw {
        Some(send_board(bot, chat, board).await?)
    } else {
        // The parts keyboard has to come back after a rejected drop.
        bot.send_message(chat, "Pick a part to drag")
            .reply_markup(view::parts_keyboard(board))
            .await?;
        board_message
    };

    for event in events {
        match event {
            AssemblyEvent::Rejected {
                reason: Rejection::AlreadyFilled,
                ..
            } => {
                app.toasts
                    .show(chat, ToastKind::Short, feedback::ALREADY_FILLED)
                    .await?;
            }
            AssemblyEvent::Rejected {
                reason: Rejection::WrongSlot { .. },
                ..
            } => {
                app.toasts
                    .show(chat, ToastKind::Wrong, feedback::TRY_AGAIN)
                    .await?;
                app.sounds.play(bot, chat, Cue::Wrong);
            }
            AssemblyEvent::Pulse { slot } => {
                if let Some(message) = board_message {
                    app.toasts
                        .pulse(
                            chat,
                            message,
                            view::board_text(board, Some(slot.as_str())),
                            view::board_text(board, None),
                        )
                        .await;
                }
            }
            AssemblyEvent::Praise(text) => {
                app.toasts
                    .show(chat, ToastKind::Success, &format!("🎉 {text}"))
                    .await?;
                app.sounds.play(bot, chat, Cue::Success);
            }
            AssemblyEvent::Completed => {
                app.toasts
                    .show(chat, ToastKind::Success, feedback::ASSEMBLY_COMPLETE)
                    .await?;
            }
            AssemblyEvent::Placed { part, slot } => debug!("{part} placed in {slot} ({chat})"),
            AssemblyEvent::PartDone { .. }
            | AssemblyEvent::Progress { .. }
            | AssemblyEvent::Cleared => {}
        }
    }
    Ok(board_message)
}

async fn take_quiz(
    bot: Bot,
    dialogue: AppDialogue,
    session: QuizSession,
    msg: Message,
) -> HandlerResult {
    let chat = msg.chat.id;
    let mut session = session;
    let text = msg.text().unwrap_or_default();

    let events = match session.phase() {
        Phase::Showing => {
            let index = session.current().and_then(|q| q.option_index(text));
            match index {
                Some(index) => session.select_option(index)?,
                None => {
                    bot.send_message(chat, "Please pick one of the answers")
                        .reply_markup(view::answer_keyboard(&session))
                        .await?;
                    return Ok(());
                }
            }
        }
        Phase::Answered { .. } if text == view::NEXT => session.advance(),
        Phase::Answered { .. } => {
            bot.send_message(chat, "Tap Next to continue")
                .reply_markup(view::next_keyboard())
                .await?;
            return Ok(());
        }
        Phase::Finished => Vec::new(),
    };

    render_quiz(&bot, chat, &session, &events).await?;

    if session.is_finished() {
        dialogue.update(State::ChooseActivity).await?;
    } else {
        dialogue.update(State::Quiz { session }).await?;
    }
    Ok(())
}

async fn send_question(bot: &Bot, chat: ChatId, session: &QuizSession) -> Result<(), teloxide::RequestError> {
    if let Some(question) = session.current() {
        bot.send_message(chat, view::question_text(session, question))
            .reply_markup(view::options_keyboard(question))
            .await?;
    }
    Ok(())
}

async fn render_quiz(
    bot: &Bot,
    chat: ChatId,
    session: &QuizSession,
    events: &[QuizEvent],
) -> Result<(), teloxide::RequestError> {
    let mut marked = None;
    for event in events {
        match event {
            QuizEvent::Marked { option, correct } => marked = Some((*option, *correct)),
            QuizEvent::Feedback(feedback) => {
                if let (Some(question), Some((option, correct))) = (session.current(), marked) {
                    bot.send_message(chat, view::answered_text(question, option, correct, *feedback))
                        .reply_markup(view::next_keyboard())
                        .await?;
                }
            }
            QuizEvent::Showing { .. } => send_question(bot, chat, session).await?,
            QuizEvent::Finished { .. } => {
                bot.send_message(chat, view::finished_text(session))
                    .reply_markup(view::menu_keyboard())
                    .await?;
            }
            QuizEvent::NextRevealed | QuizEvent::Progress { .. } => {}
        }
    }
    if session.is_finished() && events.is_empty() {
        bot.send_message(chat, session.score_text())
            .reply_markup(view::menu_keyboard())
            .await?;
    }
    Ok(())
}
