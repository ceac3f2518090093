//! `town-dialogue` — the boundary to the text-generation service.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`request`] | `DialogueRequest`, `Speaker`, `GenerationParams`, fallbacks      |
//! | [`prompt`]  | `Prompt` and the prompt text for each request kind               |
//! | [`parse`]   | `parse_dialogue_lines`, `clean_reply`                            |
//! | [`backend`] | `DialogueBackend` (enum dispatch over HTTP backends)             |
//! | [`config`]  | `DialogueConfig::from_env`                                       |
//! | [`port`]    | `DialoguePort` trait, `AsyncDialoguePort`, `ScriptedDialogue`    |
//! | [`error`]   | `DialogueError`, `DialogueResult<T>`                             |
//!
//! # Threading model
//!
//! The tick loop never waits on the service.  It hands a request and a
//! ticket to a [`DialoguePort`] and later drains whatever replies have
//! arrived, once per tick, on its own thread.  `AsyncDialoguePort` runs each
//! request as a tokio task and funnels results back through an unbounded
//! mpsc channel, so every mutation stays on the tick loop's thread.
//!
//! Every failure is answered by the caller with the request's
//! [`fallback`](DialogueRequest::fallback) text.

pub mod backend;
pub mod config;
pub mod error;
pub mod parse;
pub mod port;
pub mod prompt;
pub mod request;


pub use backend::{create_backend, DialogueBackend, OpenAiBackend, ReplicateProxyBackend};
pub use config::{BackendType, DialogueConfig};
pub use error::{DialogueError, DialogueResult};
pub use parse::{clean_reply, parse_dialogue_lines, DialogueLine};
pub use port::{AsyncDialoguePort, DialoguePort, DialogueReply, RequestLog, ScriptedDialogue};
pub use prompt::Prompt;
pub use request::{DialogueKind, DialogueRequest, GenerationParams, Speaker};
