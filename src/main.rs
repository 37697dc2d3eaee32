mod quiz;
mod render;
mod settings;

use quiz::session::{GameSession, Phase, Turn, FACTORS};
use settings::Settings;
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, SqliteStorage, Storage},
    prelude::*,
};

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    ReceiveFactor,
    ReceiveQuestionCount {
        factor: u32,
    },
    Playing {
        session: GameSession,
    },
}

type DialogueStorage = std::sync::Arc<ErasedStorage<State>>;

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    if let Err(err) = run().await {
        log::error!("Bot stopped: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> HandlerResult {
    let settings = Settings::from_env()?;
    log::info!("Starting times table bot...");

    let bot = Bot::new(settings.token);

    log::info!("Opening dialogue storage at {}", settings.db_path);
    let storage: DialogueStorage = SqliteStorage::open(&settings.db_path, Json)
        .await?
        .erase();

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::ReceiveFactor].endpoint(receive_factor))
            .branch(
                dptree::case![State::ReceiveQuestionCount { factor }]
                    .endpoint(receive_question_count),
            )
            .branch(dptree::case![State::Playing { session }].endpoint(playing)),
    )
    .dependencies(dptree::deps![storage])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;

    Ok(())
}

async fn start(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, render::GREETING_TEXT)
        .reply_markup(render::factor_keyboard())
        .await?;

    dialogue.update(State::ReceiveFactor).await?;
    Ok(())
}

async fn receive_factor(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    let factor = match render::parse_number::<u32>(msg.text()) {
        Some(factor) if FACTORS.contains(&factor) => factor,
        _ => {
            bot.send_message(msg.chat.id, render::SELECT_FACTOR_TEXT)
                .reply_markup(render::factor_keyboard())
                .await?;
            return Ok(());
        }
    };

    bot.send_message(msg.chat.id, render::SELECT_COUNT_TEXT)
        .reply_markup(render::question_count_keyboard())
        .await?;

    dialogue.update(State::ReceiveQuestionCount { factor }).await?;
    Ok(())
}

async fn receive_question_count(
    bot: Bot,
    dialogue: QuizDialogue,
    factor: u32,
    msg: Message,
) -> HandlerResult {
    let mut session = GameSession::default();
    let configured = render::parse_number::<usize>(msg.text())
        .map(|count| session.configure(factor, count));

    if let Some(Err(err)) = &configured {
        log::debug!("Rejected configuration in chat {}: {}", msg.chat.id.0, err);
    }
    if !matches!(configured, Some(Ok(()))) {
        bot.send_message(msg.chat.id, render::SELECT_COUNT_TEXT)
            .reply_markup(render::question_count_keyboard())
            .await?;
        return Ok(());
    }

    bot.send_message(msg.chat.id, render::setup_text(&session))
        .reply_markup(render::setup_keyboard())
        .await?;

    dialogue.update(State::Playing { session }).await?;
    Ok(())
}

async fn playing(
    bot: Bot,
    dialogue: QuizDialogue,
    mut session: GameSession,
    msg: Message,
) -> HandlerResult {
    let text = msg.text().map(str::trim);

    match session.phase() {
        Phase::Setup => match text {
            Some(render::START_GAME) => {
                session.start(&mut rand::thread_rng())?;
                log::info!(
                    "Chat {} started the table of {}",
                    msg.chat.id.0,
                    session.config().factor
                );
                send_question(&bot, msg.chat.id, &session).await?;
            }
            Some(render::CHANGE_MULTIPLICATION) => {
                bot.send_message(msg.chat.id, render::SELECT_FACTOR_TEXT)
                    .reply_markup(render::factor_keyboard())
                    .await?;
                dialogue.update(State::ReceiveFactor).await?;
                return Ok(());
            }
            _ => {
                bot.send_message(msg.chat.id, render::PICK_AN_OPTION_TEXT)
                    .reply_markup(render::setup_keyboard())
                    .await?;
                return Ok(());
            }
        },
        Phase::Active(Turn::AwaitingAnswer) => {
            let value = match render::parse_number::<u32>(text) {
                Some(value) if session.is_candidate(value) => value,
                _ => {
                    bot.send_message(msg.chat.id, render::PICK_AN_OPTION_TEXT)
                        .reply_markup(render::candidates_keyboard(&session))
                        .await?;
                    return Ok(());
                }
            };

            let verdict = session.submit_answer(value)?;
            log::debug!(
                "Chat {} answered {} ({})",
                msg.chat.id.0,
                value,
                if verdict.is_correct() { "correct" } else { "wrong" }
            );
            if verdict.game_over {
                let progress = session.progress();
                log::info!(
                    "Chat {} finished with {}/{}",
                    msg.chat.id.0,
                    progress.correct,
                    progress.total
                );
            }

            bot.send_message(msg.chat.id, render::verdict_text(&verdict, &session))
                .reply_markup(render::acknowledge_keyboard(verdict.game_over))
                .await?;
        }
        Phase::Active(Turn::ShowingResult) => {
            if text != Some(render::OK) {
                bot.send_message(msg.chat.id, render::PICK_AN_OPTION_TEXT)
                    .reply_markup(render::acknowledge_keyboard(false))
                    .await?;
                return Ok(());
            }

            session.acknowledge(&mut rand::thread_rng())?;
            send_question(&bot, msg.chat.id, &session).await?;
        }
        Phase::GameOver => {
            if text != Some(render::RESTART_GAME) {
                bot.send_message(msg.chat.id, render::PICK_AN_OPTION_TEXT)
                    .reply_markup(render::acknowledge_keyboard(true))
                    .await?;
                return Ok(());
            }

            session.reset();
            bot.send_message(msg.chat.id, render::setup_text(&session))
                .reply_markup(render::setup_keyboard())
                .await?;
        }
    }

    dialogue.update(State::Playing { session }).await?;
    Ok(())
}

async fn send_question(bot: &Bot, chat_id: ChatId, session: &GameSession) -> HandlerResult {
    bot.send_message(chat_id, render::question_text(session))
        .reply_markup(render::candidates_keyboard(session))
        .await?;
    Ok(())
}
