//! Interactive chat command
//!
//! A readline-based loop that submits user input to the backend through
//! the conversation controller. Presentation stays a pure function of
//! controller state: this module only renders messages and forwards user
//! intents (send, clear, new-session).
//!
//! The loop is sequential, so input is naturally not read again until
//! the in-flight send resolves, which is the terminal equivalent of
//! disabling the input field while loading.

use crate::api::{ApiClient, ChatApi, ChatMessage, Role};
use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
use crate::config::Config;
use crate::controller::{ChatController, SendOutcome};
use crate::error::Result;
use crate::session::SessionId;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Run the interactive chat session
///
/// # Arguments
///
/// * `config` - Global configuration
/// * `session` - Session id to resume, if any
/// * `no_rag` - Start with document retrieval disabled
pub async fn run_chat(config: Config, session: Option<String>, no_rag: bool) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let use_rag = if no_rag { false } else { config.chat.use_rag };

    let mut controller = match session {
        Some(id) => {
            let session_id = SessionId::from(id);
            let history = client.get_history(&session_id).await?;
            tracing::info!(
                "Resumed session {} with {} stored messages",
                session_id,
                history.len()
            );
            ChatController::resume(session_id, history, use_rag)
        }
        None => ChatController::new(use_rag),
    };

    let mut rl = DefaultEditor::new()?;

    print_welcome_banner(&controller);
    for message in controller.messages() {
        print_message(message);
    }

    loop {
        let prompt = format_prompt(&controller);
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(trimmed)?;

                match parse_special_command(trimmed) {
                    Some(Ok(SpecialCommand::NewSession)) => {
                        let id = controller.new_session();
                        println!("{} {}\n", "Started new session:".green(), id);
                        continue;
                    }
                    Some(Ok(SpecialCommand::ClearHistory)) => {
                        if let Err(e) = client.clear_history(controller.session_id()).await {
                            eprintln!("{} {}\n", "Error:".red(), e);
                            continue;
                        }
                        let id = controller.new_session();
                        println!("{} new session: {}\n", "History cleared,".green(), id);
                        continue;
                    }
                    Some(Ok(SpecialCommand::ShowHistory)) => {
                        match client.get_history(controller.session_id()).await {
                            Ok(history) if history.is_empty() => {
                                println!("No stored history for this session.\n");
                            }
                            Ok(history) => {
                                for message in &history {
                                    print_message(message);
                                }
                                println!();
                            }
                            Err(e) => eprintln!("{} {}\n", "Error:".red(), e),
                        }
                        continue;
                    }
                    Some(Ok(SpecialCommand::ShowSession)) => {
                        println!("Session: {}\n", controller.session_id());
                        continue;
                    }
                    Some(Ok(SpecialCommand::SetRag(enabled))) => {
                        controller.set_use_rag(enabled);
                        let state = if enabled { "on" } else { "off" };
                        println!("Document retrieval is now {}\n", state.bold());
                        continue;
                    }
                    Some(Ok(SpecialCommand::Help)) => {
                        print_help();
                        println!();
                        continue;
                    }
                    Some(Ok(SpecialCommand::Quit)) => break,
                    Some(Err(e)) => {
                        eprintln!("{}\n", e);
                        continue;
                    }
                    None => {
                        // Regular message for the assistant
                    }
                }

                match controller.send(&client, trimmed).await {
                    Some(SendOutcome::Replied {
                        message,
                        sources,
                        processing_time,
                    }) => {
                        print_message(&message);
                        if config.chat.show_timing {
                            if let Some(seconds) = processing_time {
                                println!("{}", format!("processed in {:.2}s", seconds).dimmed());
                            }
                        }
                        if config.chat.show_sources {
                            if let Some(sources) = sources {
                                if !sources.is_empty() {
                                    println!("{} {}", "sources:".dimmed(), sources.join(", "));
                                }
                            }
                        }
                        println!();
                    }
                    Some(SendOutcome::Failed(message)) => {
                        eprintln!(
                            "{} {}\n{}\n",
                            "Error:".red(),
                            message,
                            "Your message was kept; you can retry.".dimmed()
                        );
                    }
                    Some(SendOutcome::Discarded) => {
                        tracing::debug!("Response discarded for a replaced session");
                    }
                    None => {
                        // Empty after trim; the submit is inert
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                break;
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Format the prompt with the session tag and retrieval state
fn format_prompt(controller: &ChatController) -> String {
    let rag_tag = if controller.use_rag() {
        "[RAG]".cyan().to_string()
    } else {
        "[raw]".yellow().to_string()
    };
    format!("{}[{}] >> ", rag_tag, controller.session_id().short())
}

/// Print a single message with a colored role prefix
fn print_message(message: &ChatMessage) {
    let prefix = match message.role {
        Role::User => "you".blue().bold(),
        Role::Assistant => "assistant".green().bold(),
        Role::System => "system".yellow().bold(),
    };
    println!("{}: {}", prefix, message.content);
}

/// Display the welcome banner at the start of the session
fn print_welcome_banner(controller: &ChatController) {
    println!("{}", "ragchat".bold());
    println!("Session: {}", controller.session_id());
    println!("Type a message to chat, or '/help' for commands.\n");
}
