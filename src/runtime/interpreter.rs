use std::sync::Arc;

use tracing::{debug, debug_span, warn};

use super::session::{IntentSlot, SessionState};
use super::template::render_template;
use crate::classifier::IntentClassifier;
use crate::parser::{Action, BotDef, IntentDef, SetValue};

/// Runs a loaded bot against per-conversation sessions
///
/// The bot is shared read-only; every conversation brings its own
/// [`SessionState`]. One call handles one inbound message.
pub struct Interpreter {
    bot: Arc<BotDef>,
    classifier: Arc<dyn IntentClassifier>,
}

impl Interpreter {
    /// Creates an interpreter for `bot`
    pub fn new(bot: Arc<BotDef>, classifier: impl IntentClassifier + 'static) -> Self {
        Interpreter {
            bot,
            classifier: Arc::new(classifier),
        }
    }

    /// Creates an interpreter sharing an existing classifier
    pub fn with_shared_classifier(bot: Arc<BotDef>, classifier: Arc<dyn IntentClassifier>) -> Self {
        Interpreter { bot, classifier }
    }

    /// The loaded bot
    pub fn bot(&self) -> &BotDef {
        &self.bot
    }

    /// Handles one user message and returns the bot's replies in order
    ///
    /// If the session is waiting on an `ask`, `text` becomes the answer and
    /// the current block resumes after the `ask`. Otherwise the classifier
    /// picks an intent (falling back to the default block) which runs from
    /// its first action. An unknown intent with no default block produces
    /// no replies.
    pub fn handle_user_message(&self, session: &mut SessionState, text: &str) -> Vec<String> {
        let span = debug_span!("turn", session = %session.id());
        let _enter = span.enter();

        if session.bind_answer(text) {
            debug!(cursor = session.cursor(), "resuming after answer");
            return self.run(session);
        }

        let name = self.classifier.recognize(text);
        let slot = if self.bot.intent(&name).is_some() {
            IntentSlot::Named(name)
        } else if self.bot.default_intent.is_some() {
            debug!(intent = %name, "unknown intent, using default block");
            IntentSlot::Default
        } else {
            debug!(intent = %name, "unknown intent and no default block");
            session.finish();
            return Vec::new();
        };

        session.begin(slot);
        self.run(session)
    }

    /// Runs the current block from the session cursor until `ask`, `end`, or
    /// the last action
    fn run(&self, session: &mut SessionState) -> Vec<String> {
        let mut replies = Vec::new();

        let intent = match session.current_slot().and_then(|slot| self.lookup(slot)) {
            Some(intent) => intent,
            None => {
                if let Some(name) = session.current_intent() {
                    warn!(intent = %name, "current intent is not defined by this bot");
                }
                session.finish();
                return replies;
            }
        };

        while let Some(action) = intent.actions.get(session.cursor()) {
            session.advance_cursor();
            debug!(intent = %intent.name, %action, "executing action");

            match action {
                Action::Say { text } => {
                    replies.push(render_template(text, session.variables()));
                }
                Action::Ask { prompt, variable } => {
                    replies.push(render_template(prompt, session.variables()));
                    session.suspend_on(variable.clone());
                    break;
                }
                Action::Set { variable, value } => {
                    let value = match value {
                        SetValue::Literal(text) => render_template(text, session.variables()),
                        SetValue::Variable(name) => session
                            .variable(name)
                            .map(str::to_string)
                            .unwrap_or_else(|| name.clone()),
                    };
                    session.assign(variable.clone(), value);
                }
                Action::End => {
                    session.finish();
                    break;
                }
            }
        }

        replies
    }

    fn lookup(&self, slot: &IntentSlot) -> Option<&IntentDef> {
        match slot {
            IntentSlot::Named(name) => self.bot.intent(name),
            IntentSlot::Default => self.bot.default_intent(),
        }
    }
}
