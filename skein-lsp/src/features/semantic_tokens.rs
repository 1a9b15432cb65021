use skein_parser::skein::token::{Token, TokenKind};
use tower_lsp::lsp_types::SemanticToken;

/// Every token kind the parser can emit, in legend order.
///
/// The position of a kind in this slice is the `token_type` index sent on
/// the wire, so the slice and the advertised legend must stay in lockstep.
pub const LEGEND_KINDS: &[TokenKind] = &[
    TokenKind::RootKey,
    TokenKind::NestedKey,
    TokenKind::StringValue,
    TokenKind::NumberValue,
    TokenKind::BooleanValue,
    TokenKind::NullValue,
    TokenKind::Comment,
    TokenKind::Colon,
    TokenKind::Comma,
    TokenKind::Structural,
    TokenKind::TypeHint,
    TokenKind::Modifier,
    TokenKind::MetaKey,
    TokenKind::RoleKey,
    TokenKind::TopLevelKey,
    TokenKind::EnvKey,
    TokenKind::MachineLockedKey,
    TokenKind::MachineEditableKey,
    TokenKind::SchemaDataKey,
    TokenKind::SchemaFieldKey,
    TokenKind::SchemaValidationKey,
    TokenKind::NavbarKey,
    TokenKind::ElementKey,
    TokenKind::ElementPropertyKey,
    TokenKind::ContainerKey,
    TokenKind::SubBlockKey,
    TokenKind::ClientRenderKey,
];

/// Returns the LSP semantic token type string for a parser token kind.
///
/// We stay inside the standard LSP token type vocabulary so existing
/// editor themes (VSCode, Neovim, Helix, etc.) color skein files without
/// any extra configuration. Several kinds share a type when they play the
/// same visual role.
///
/// Mapping notes for the less obvious choices:
/// - boolean/null literals → "keyword" (themes color `true`/`null` as keywords)
/// - type hints like `(int)` → "type"
/// - `!`/`*` markers → "modifier"
/// - blueprint/view top-level keys and `meta:` keys → "namespace" (section openers)
/// - locked machine keys → "macro" (loud color, these are not editable)
/// - element keys → "function" (the callable units of a view)
/// - element properties and validation keys → "parameter"
/// - containers and dataset names → "class"
/// - underscore client-render keys → "decorator"
pub fn lsp_token_type(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::RootKey => "property",
        TokenKind::NestedKey => "property",
        TokenKind::StringValue => "string",
        TokenKind::NumberValue => "number",
        TokenKind::BooleanValue => "keyword",
        TokenKind::NullValue => "keyword",
        TokenKind::Comment => "comment",
        TokenKind::Colon => "operator",
        TokenKind::Comma => "operator",
        TokenKind::Structural => "operator",
        TokenKind::TypeHint => "type",
        TokenKind::Modifier => "modifier",
        TokenKind::MetaKey => "namespace",
        TokenKind::RoleKey => "enumMember",
        TokenKind::TopLevelKey => "namespace",
        TokenKind::EnvKey => "variable",
        TokenKind::MachineLockedKey => "macro",
        TokenKind::MachineEditableKey => "variable",
        TokenKind::SchemaDataKey => "class",
        TokenKind::SchemaFieldKey => "property",
        TokenKind::SchemaValidationKey => "parameter",
        TokenKind::NavbarKey => "interface",
        TokenKind::ElementKey => "function",
        TokenKind::ElementPropertyKey => "parameter",
        TokenKind::ContainerKey => "class",
        TokenKind::SubBlockKey => "struct",
        TokenKind::ClientRenderKey => "decorator",
    }
}

/// Index of a kind in [`LEGEND_KINDS`].
pub fn token_type_index(kind: TokenKind) -> u32 {
    LEGEND_KINDS
        .iter()
        .position(|candidate| *candidate == kind)
        .unwrap_or(0) as u32
}

/// Encode parser tokens into the LSP delta representation.
///
/// Parser tokens arrive sorted by line then column and never span lines,
/// so encoding is a single pass tracking the previous token's position.
/// Positions are 0-based on both sides and lengths are in characters.
pub fn encode_semantic_tokens(tokens: &[Token]) -> Vec<SemanticToken> {
    let mut data = Vec::with_capacity(tokens.len());
    let mut prev_line = 0u32;
    let mut prev_start = 0u32;

    for token in tokens {
        let line = token.line as u32;
        let start = token.column as u32;
        let delta_line = line.saturating_sub(prev_line);
        let delta_start = if delta_line == 0 {
            start.saturating_sub(prev_start)
        } else {
            start
        };
        data.push(SemanticToken {
            delta_line,
            delta_start,
            length: token.length as u32,
            token_type: token_type_index(token.kind),
            token_modifiers_bitset: 0,
        });
        prev_line = line;
        prev_start = start;
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use skein_parser::skein::flavor::FileFlavor;
    use skein_parser::skein::parsing::parse_with_tokens;
    use skein_parser::skein::source::SourceDocument;
    use std::collections::HashSet;

    #[test]
    fn legend_lists_every_kind_once() {
        let unique: HashSet<_> = LEGEND_KINDS.iter().collect();
        assert_eq!(unique.len(), LEGEND_KINDS.len());
        assert_eq!(LEGEND_KINDS.len(), 27);
    }

    #[test]
    fn every_kind_maps_to_a_token_type() {
        for kind in LEGEND_KINDS {
            assert!(!lsp_token_type(*kind).is_empty());
        }
    }

    #[test]
    fn token_type_index_round_trips_through_the_legend() {
        for kind in LEGEND_KINDS {
            let index = token_type_index(*kind) as usize;
            assert_eq!(LEGEND_KINDS[index], *kind);
        }
    }

    #[test]
    fn encode_produces_deltas_against_the_previous_token() {
        let tokens = vec![
            Token {
                line: 0,
                column: 0,
                length: 4,
                kind: TokenKind::RootKey,
            },
            Token {
                line: 0,
                column: 4,
                length: 1,
                kind: TokenKind::Colon,
            },
            Token {
                line: 1,
                column: 2,
                length: 3,
                kind: TokenKind::NestedKey,
            },
            Token {
                line: 3,
                column: 0,
                length: 6,
                kind: TokenKind::Comment,
            },
        ];

        let encoded = encode_semantic_tokens(&tokens);
        let deltas: Vec<(u32, u32, u32)> = encoded
            .iter()
            .map(|t| (t.delta_line, t.delta_start, t.length))
            .collect();
        assert_eq!(deltas, vec![(0, 0, 4), (0, 4, 1), (1, 2, 3), (2, 0, 6)]);
    }

    #[test]
    fn encode_uses_legend_indices() {
        let tokens = vec![Token {
            line: 0,
            column: 0,
            length: 1,
            kind: TokenKind::Comment,
        }];
        let encoded = encode_semantic_tokens(&tokens);
        assert_eq!(encoded[0].token_type, token_type_index(TokenKind::Comment));
    }

    #[test]
    fn encode_covers_a_real_parse() {
        let doc = SourceDocument::new("# manifest\nname: api\nserver:\n  port: 8080\n");
        let parse = parse_with_tokens(&doc, FileFlavor::Generic);
        let encoded = encode_semantic_tokens(&parse.tokens);

        assert_eq!(encoded.len(), parse.tokens.len());
        assert!(encoded.iter().all(|t| t.length > 0));
        // Reconstructed absolute positions must match the parser tokens.
        let mut line = 0u32;
        let mut start = 0u32;
        for (wire, token) in encoded.iter().zip(parse.tokens.iter()) {
            line += wire.delta_line;
            start = if wire.delta_line == 0 {
                start + wire.delta_start
            } else {
                wire.delta_start
            };
            assert_eq!((line as usize, start as usize), (token.line, token.column));
        }
    }
}
