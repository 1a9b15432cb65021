//! Language Server Protocol (LSP) implementation for skein
//!
//!     This crate provides language server capabilities for skein configuration files,
//!     enabling rich editor support in any LSP-compatible editor (VSCode, Neovim, Emacs,
//!     Helix, etc.).
//!
//! Protocol Stack: tower-lsp
//!
//!     We use tower-lsp as the protocol framework:
//!         - High-level async framework, handlers are plain async trait methods
//!         - Handles the JSON-RPC plumbing, lifecycle ordering and stdio transport
//!         - Good fit with the tokio runtime the rest of the tooling already uses
//!
//!     Trade-offs:
//!         - Handlers take &self, so document state lives behind an async RwLock
//!         - Notification ordering is best effort (acceptable, we reparse from full text)
//!
//! Feature Set
//!
//!     Skein is an indentation-sensitive key/value format, not a programming language,
//!     so the server stays deliberately small:
//!
//!     1. Semantic Tokens (textDocument/semanticTokens/full):
//!         - Every token the parser emits, mapped onto standard LSP token types
//!         - Flavor-aware coloring: app.skein, machine.skein and *.view.skein files
//!           classify the same key text differently
//!
//!     2. Published Diagnostics (textDocument/publishDiagnostics):
//!         - Pushed after every open and change, retracted on close
//!         - Parse problems arrive with stable codes and the "skein" source tag
//!
//! Document Lifecycle
//!
//!     Sync is FULL: skein documents are small and the parser is a single pass, so we
//!     reparse the whole file on every change instead of patching state. The parse path
//!     never fails and never panics outward; a hopelessly broken document still yields
//!     a best-effort token list and its diagnostics. The file flavor is derived from
//!     the document URI on every update.
//!
//! Architecture
//!
//!     Server Layer (server.rs):
//!         - Generic over the protocol client and a feature provider, so tests run the
//!           full handler stack against recording stand-ins
//!         - Owns the document store (URI -> parse result)
//!
//!     Feature Layer (features/):
//!         - Stateless conversions from parser output to protocol payloads
//!         - Legend, token type mapping and delta encoding for semantic tokens
//!         - Severity, range and code mapping for diagnostics
//!
//! Usage
//!
//!     This crate provides both a library and a binary:
//!
//!     Library:
//!         ```rust
//!         use skein_lsp::SkeinLanguageServer;
//!         use tower_lsp::{LspService, Server};
//!
//!         #[tokio::main]
//!         async fn main() {
//!             let (service, socket) = LspService::new(SkeinLanguageServer::new);
//!             Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
//!                 .serve(service)
//!                 .await;
//!         }
//!         ```
//!
//!     Binary:
//!         $ skein-lsp
//!         Speaks the protocol over stdin/stdout, the transport editor clients spawn.
//!

pub mod features;
pub mod server;

pub use server::SkeinLanguageServer;
