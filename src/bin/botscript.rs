//! Botscript CLI - inspect and chat with bot scripts from a terminal

use anyhow::{Context, Result};
use botscript::{
    Interpreter, KeywordClassifier, KeywordRules, Scanner, ScriptOptions, SessionState,
};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "botscript")]
#[command(about = "Run declarative dialogue scripts", long_about = None)]
struct Cli {
    /// Match keywords as bare prefixes (`botname` scans as `bot` `name`)
    #[arg(long, global = true)]
    prefix_keywords: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream of a script
    Tokens {
        /// Script file
        script: PathBuf,
    },

    /// Parse a script and summarize it
    Check {
        /// Script file
        script: PathBuf,

        /// Print the parsed bot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Chat with a bot on the console
    Chat {
        /// Script file
        script: PathBuf,

        /// Keyword classifier rules (JSON)
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let options = if cli.prefix_keywords {
        ScriptOptions::prefix_keywords()
    } else {
        ScriptOptions::default()
    };

    match cli.command {
        Commands::Tokens { script } => {
            let source = read_script(&script)?;
            let tokens = Scanner::with_options(&source, &options).scan_tokens()?;
            for token in tokens {
                println!("{}:{}\t{:?}\t{}", token.line, token.column, token.kind, token.lexeme);
            }
        }

        Commands::Check { script, json } => {
            let bot = load(&script, &options)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&bot)?);
            } else {
                println!("Bot name: {}", bot.name);
                println!("Intents: {:?}", bot.intent_names());
                println!(
                    "Default intent: {}",
                    bot.default_intent()
                        .map(|d| d.name.as_str())
                        .unwrap_or("none")
                );
            }
        }

        Commands::Chat { script, rules } => {
            let bot = Arc::new(load(&script, &options)?);
            let classifier = match rules {
                Some(path) => {
                    let json = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading rules {}", path.display()))?;
                    KeywordClassifier::from_rules(KeywordRules::from_json(&json)?)
                }
                None => first_intent_classifier(&bot),
            };
            chat(Interpreter::new(bot, classifier))?;
        }
    }

    Ok(())
}

fn read_script(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading script {}", path.display()))
}

fn load(path: &Path, options: &ScriptOptions) -> Result<botscript::BotDef> {
    let source = read_script(path)?;
    botscript::parse_with_options(&source, options)
        .with_context(|| format!("loading {}", path.display()))
}

/// Without rules, every message goes to the first intent by name
fn first_intent_classifier(bot: &botscript::BotDef) -> KeywordClassifier {
    let fallback = bot.intent_names().first().copied().unwrap_or_default();
    KeywordClassifier::new(fallback)
}

fn chat(interpreter: Interpreter) -> Result<()> {
    println!(
        "Chatting with {}. Type 'exit' to quit.",
        interpreter.bot().name
    );

    let mut session = SessionState::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("you: ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let text = line.trim_end_matches(['\r', '\n']);
        if text.trim().eq_ignore_ascii_case("exit") {
            break;
        }

        for reply in interpreter.handle_user_message(&mut session, text) {
            println!("bot: {}", reply);
        }
    }

    Ok(())
}
