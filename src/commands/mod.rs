/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes the following top-level command modules:

- `chat`    — Interactive chat session
- `history` — Show or clear server-side conversation history
- `docs`    — Document upload, index statistics, and search
- `health`  — Backend liveness probe

These handlers are intentionally small and use the library components:
the API client and the conversation controller.
*/

pub mod chat;
pub mod docs;
pub mod health;
pub mod history;

// Special commands parser for the interactive session
pub mod special_commands;
