//! Lifecycle handlers, document state and the capability surface.
//!
//! Feature payloads are computed in [`crate::features`]; this module only
//! wires them to the protocol.

use std::collections::HashMap;
use std::sync::Arc;

use crate::features::diagnostics::to_lsp_diagnostics;
use crate::features::semantic_tokens::{
    encode_semantic_tokens, lsp_token_type, LEGEND_KINDS,
};
use skein_parser::skein::diagnostics::Diagnostic as SkeinDiagnostic;
use skein_parser::skein::flavor::FileFlavor;
use skein_parser::skein::parsing::{self, EditorParse};
use skein_parser::skein::source::SourceDocument;
use skein_parser::skein::token::Token;
use tokio::sync::RwLock;
use tower_lsp::async_trait;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    Diagnostic, InitializeParams, InitializeResult, InitializedParams, SemanticTokenType,
    SemanticTokens, SemanticTokensFullOptions, SemanticTokensLegend, SemanticTokensOptions,
    SemanticTokensParams, SemanticTokensResult, ServerCapabilities, ServerInfo, TextDocumentItem,
    TextDocumentSyncCapability, TextDocumentSyncKind, Url, WorkDoneProgressOptions,
};
use tower_lsp::Client;

/// The slice of the protocol client the server talks back through.
///
/// Diagnostics are pushed, not pulled, so handlers need a way to reach
/// the editor. Tests substitute a recording stand-in for the live
/// connection.
#[async_trait]
pub trait LspClient: Send + Sync + 'static {
    async fn publish_diagnostics(
        &self,
        uri: Url,
        diagnostics: Vec<Diagnostic>,
        version: Option<i32>,
    );
}

#[async_trait]
impl LspClient for Client {
    async fn publish_diagnostics(
        &self,
        uri: Url,
        diagnostics: Vec<Diagnostic>,
        version: Option<i32>,
    ) {
        Client::publish_diagnostics(self, uri, diagnostics, version).await;
    }
}

/// Computes feature payloads from a finished parse.
pub trait EditorFeatures: Send + Sync + 'static {
    fn semantic_tokens(&self, parse: &EditorParse) -> Vec<Token>;
    fn diagnostics(&self, parse: &EditorParse) -> Vec<SkeinDiagnostic>;
}

/// The parse already carries everything the features need, so the
/// default implementation hands its lists straight through.
#[derive(Default)]
pub struct ParseFeatures;

impl ParseFeatures {
    pub fn new() -> Self {
        Self
    }
}

impl EditorFeatures for ParseFeatures {
    fn semantic_tokens(&self, parse: &EditorParse) -> Vec<Token> {
        parse.tokens.clone()
    }

    fn diagnostics(&self, parse: &EditorParse) -> Vec<SkeinDiagnostic> {
        parse.diagnostics.clone()
    }
}

#[derive(Default)]
struct OpenDocuments {
    parses: RwLock<HashMap<Url, Arc<EditorParse>>>,
}

impl OpenDocuments {
    /// Parse `text` under the flavor its uri implies and store the result.
    ///
    /// The editor parse never fails, so every open document always has an
    /// entry, however broken its content.
    async fn reparse(&self, uri: Url, text: &str) -> Arc<EditorParse> {
        let flavor = FileFlavor::from_path(uri.path());
        let parse = Arc::new(parsing::parse_with_tokens(
            &SourceDocument::new(text),
            flavor,
        ));
        self.parses.write().await.insert(uri, parse.clone());
        parse
    }

    async fn get(&self, uri: &Url) -> Option<Arc<EditorParse>> {
        self.parses.read().await.get(uri).cloned()
    }

    async fn remove(&self, uri: &Url) {
        self.parses.write().await.remove(uri);
    }
}

fn token_legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: LEGEND_KINDS
            .iter()
            .map(|kind| SemanticTokenType::new(lsp_token_type(*kind)))
            .collect(),
        token_modifiers: Vec::new(),
    }
}

pub struct SkeinLanguageServer<C = Client, P = ParseFeatures> {
    client: C,
    documents: OpenDocuments,
    features: Arc<P>,
}

impl SkeinLanguageServer<Client, ParseFeatures> {
    pub fn new(client: Client) -> Self {
        Self::with_features(client, Arc::new(ParseFeatures::new()))
    }
}

impl<C, P> SkeinLanguageServer<C, P>
where
    C: LspClient,
    P: EditorFeatures,
{
    pub fn with_features(client: C, features: Arc<P>) -> Self {
        Self {
            client,
            documents: OpenDocuments::default(),
            features,
        }
    }

    /// Reparse a document and push its current diagnostics to the editor.
    async fn refresh_document(&self, uri: Url, text: &str, version: Option<i32>) {
        let parse = self.documents.reparse(uri.clone(), text).await;
        let diagnostics = to_lsp_diagnostics(&self.features.diagnostics(&parse));
        self.client
            .publish_diagnostics(uri, diagnostics, version)
            .await;
    }

    async fn parse(&self, uri: &Url) -> Option<Arc<EditorParse>> {
        self.documents.get(uri).await
    }
}

#[async_trait]
impl<C, P> tower_lsp::LanguageServer for SkeinLanguageServer<C, P>
where
    C: LspClient,
    P: EditorFeatures,
{
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        let capabilities = ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            semantic_tokens_provider: Some(
                lsp_types::SemanticTokensServerCapabilities::SemanticTokensOptions(
                    SemanticTokensOptions {
                        work_done_progress_options: WorkDoneProgressOptions::default(),
                        legend: token_legend(),
                        range: None,
                        full: Some(SemanticTokensFullOptions::Bool(true)),
                    },
                ),
            ),
            ..ServerCapabilities::default()
        };

        Ok(InitializeResult {
            capabilities,
            server_info: Some(ServerInfo {
                name: "skein-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {}

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: lsp_types::DidOpenTextDocumentParams) {
        let TextDocumentItem {
            uri, text, version, ..
        } = params.text_document;
        self.refresh_document(uri, &text, Some(version)).await;
    }

    async fn did_change(&self, params: lsp_types::DidChangeTextDocumentParams) {
        // Sync is FULL, so the last change event carries the whole document.
        if let Some(change) = params.content_changes.into_iter().last() {
            self.refresh_document(
                params.text_document.uri,
                &change.text,
                Some(params.text_document.version),
            )
            .await;
        }
    }

    async fn did_close(&self, params: lsp_types::DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.remove(&uri).await;
        // An empty batch retracts whatever the editor still shows.
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn semantic_tokens_full(
        &self,
        params: SemanticTokensParams,
    ) -> Result<Option<SemanticTokensResult>> {
        if let Some(parse) = self.parse(&params.text_document.uri).await {
            let tokens = self.features.semantic_tokens(&parse);
            let data = encode_semantic_tokens(&tokens);
            Ok(Some(SemanticTokensResult::Tokens(SemanticTokens {
                result_id: None,
                data,
            })))
        } else {
            Ok(None)
        }
    }
}
