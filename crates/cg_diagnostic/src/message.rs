//! The fixed message catalog from the recognizer's diagnostic design.

use std::fmt;

/// Which construct was being parsed when input ran out.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum EofContext {
    Expression,
    Declaration,
    Struct,
    InitializerList,
    FunctionBody,
    FunctionDeclaration,
    ParameterList,
}

impl fmt::Display for EofContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EofContext::Expression => "expression",
            EofContext::Declaration => "declaration",
            EofContext::Struct => "struct",
            EofContext::InitializerList => "initializer list",
            EofContext::FunctionBody => "function body",
            EofContext::FunctionDeclaration => "function declaration",
            EofContext::ParameterList => "parameter list",
        };
        write!(f, "{name}")
    }
}

/// The closed set of diagnostic messages the recognizer can emit.
///
/// Kept as a single enum (rather than free-form strings) so the message
/// catalog in spec stays exhaustively checkable: every arm here is one
/// line of spec §6's catalog.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Message {
    UnexpectedEof(EofContext),
    ExpectedSemicolon,
    ExpectedCloseParen,
    MissingSemicolonAfterStruct,
    ForcedFunctionBodyClose,
    Redefined { name: Box<str>, arity: i32 },
    PreviousDefinitionHere,
    InternalCannotPutback,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::UnexpectedEof(ctx) => write!(f, "unexpected eof in {ctx}"),
            Message::ExpectedSemicolon => write!(f, "expected `;`"),
            Message::ExpectedCloseParen => write!(f, "expected `)`"),
            Message::MissingSemicolonAfterStruct => {
                write!(f, "missing `;` after struct declaration")
            }
            Message::ForcedFunctionBodyClose => write!(f, "forced function body close"),
            Message::Redefined { name, arity } => write!(f, "{name}/{arity} redefined"),
            Message::PreviousDefinitionHere => write!(f, "this is the place of previous definition"),
            Message::InternalCannotPutback => {
                write!(f, "INTERNAL ERROR: cannot return token to stream")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_catalog_text_exactly() {
        assert_eq!(
            Message::UnexpectedEof(EofContext::FunctionBody).to_string(),
            "unexpected eof in function body"
        );
        assert_eq!(Message::ExpectedSemicolon.to_string(), "expected `;`");
        assert_eq!(
            Message::Redefined {
                name: "f".into(),
                arity: 2
            }
            .to_string(),
            "f/2 redefined"
        );
    }
}
