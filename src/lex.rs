// SPDX: CC0-1.0

use core::{iter::Peekable, str::CharIndices};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperatorTyp {
    Add,
    Sub,
    Mul,
    Div,
    Exp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bracket {
    Paren,
    Square,
    Curly,
}

impl Bracket {
    pub const fn open(&self) -> char {
        match self {
            Self::Paren => '(',
            Self::Square => '[',
            Self::Curly => '{',
        }
    }

    pub const fn close(&self) -> char {
        match self {
            Self::Paren => ')',
            Self::Square => ']',
            Self::Curly => '}',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokTyp {
    Ident,
    Number,
    Op(OperatorTyp),
    Open(Bracket),
    Close(Bracket),
    Equal,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tok<'src> {
    pub typ: TokTyp,
    /// Byte offset into the source.
    pub start: usize,
    pub text: &'src str,
}

pub const fn is_ident_start(chr: char) -> bool {
    chr.is_ascii_alphabetic() || chr == '_'
}

pub const fn is_ident_continue(chr: char) -> bool {
    chr.is_ascii_alphanumeric() || chr == '_'
}

/// Tokenizes formula text without ever failing.
///
/// Identifiers are maximal runs of `[a-zA-Z_][a-zA-Z0-9_]*` found the way a
/// global regex scan finds them: a digit can never start an identifier, so
/// `2x` lexes as the number `2` followed by the identifier `x`, and a
/// backslash is never part of one, so `\alpha` yields `alpha`. Anything that
/// is not an identifier, a digit run, an operator, a bracket or `=` becomes a
/// single-character [`TokTyp::Other`].
#[derive(Debug)]
pub struct Lexer<'src> {
    src: &'src str,
    cur: Peekable<CharIndices<'src>>,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            cur: src.char_indices().peekable(),
        }
    }

    pub fn trim_whitespace(&mut self) {
        while let Some((_, chr)) = self.cur.peek() {
            if chr.is_whitespace() {
                self.cur.next();
            } else {
                break;
            }
        }
    }

    fn tok(&self, typ: TokTyp, start: usize, end: usize) -> Tok<'src> {
        Tok {
            typ,
            start,
            text: &self.src[start..end],
        }
    }

    pub fn consume_unambiguous(&mut self) -> Option<Tok<'src>> {
        let (idx, chr) = self.cur.peek().copied()?;
        let typ = match chr {
            '+' => TokTyp::Op(OperatorTyp::Add),
            '-' => TokTyp::Op(OperatorTyp::Sub),
            '*' => TokTyp::Op(OperatorTyp::Mul),
            '/' => TokTyp::Op(OperatorTyp::Div),
            '^' => TokTyp::Op(OperatorTyp::Exp),
            '(' => TokTyp::Open(Bracket::Paren),
            ')' => TokTyp::Close(Bracket::Paren),
            '[' => TokTyp::Open(Bracket::Square),
            ']' => TokTyp::Close(Bracket::Square),
            '{' => TokTyp::Open(Bracket::Curly),
            '}' => TokTyp::Close(Bracket::Curly),
            '=' => TokTyp::Equal,
            _ => return None,
        };
        self.cur.next();
        Some(self.tok(typ, idx, idx + chr.len_utf8()))
    }

    /// Consumes a run whose first character satisfies `first` and whose
    /// following characters satisfy `rest`.
    pub fn consume_by<F, R>(&mut self, typ: TokTyp, first: F, rest: R) -> Option<Tok<'src>>
    where
        F: Fn(char) -> bool,
        R: Fn(char) -> bool,
    {
        let (start, chr) = self.cur.peek().copied()?;
        if !first(chr) {
            return None;
        }
        self.cur.next();
        let mut end = start + chr.len_utf8();
        while let Some((idx, chr)) = self.cur.peek().copied() {
            if rest(chr) {
                end = idx + chr.len_utf8();
                self.cur.next();
            } else {
                break;
            }
        }
        Some(self.tok(typ, start, end))
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Tok<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        self.trim_whitespace();

        let (next_idx, next_chr) = self.cur.peek().copied()?;
        if let Some(tok) = self.consume_unambiguous() {
            Some(tok)
        } else if let Some(tok) =
            self.consume_by(TokTyp::Ident, is_ident_start, is_ident_continue)
        {
            Some(tok)
        } else if let Some(tok) = self.consume_by(
            TokTyp::Number,
            |chr| chr.is_ascii_digit(),
            |chr| chr.is_ascii_digit(),
        ) {
            Some(tok)
        } else {
            self.cur.next();
            Some(self.tok(TokTyp::Other, next_idx, next_idx + next_chr.len_utf8()))
        }
    }
}

/// Yields every identifier token of `src`.
pub fn idents(src: &str) -> impl Iterator<Item = Tok<'_>> {
    Lexer::new(src).filter(|tok| tok.typ == TokTyp::Ident)
}

/// Yields the maximal runs of word characters (`[A-Za-z0-9_]`), which are
/// the units a `\b...\b` pattern matches against.
pub fn words(src: &str) -> impl Iterator<Item = &str> {
    src.split(|chr: char| !is_ident_continue(chr))
        .filter(|word| !word.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typs(src: &str) -> Vec<TokTyp> {
        Lexer::new(src).map(|tok| tok.typ).collect()
    }

    fn ident_texts(src: &str) -> Vec<&str> {
        idents(src).map(|tok| tok.text).collect()
    }

    #[test]
    fn lexes_assignment() {
        assert_eq!(
            typs("y = A*(b+1)"),
            [
                TokTyp::Ident,
                TokTyp::Equal,
                TokTyp::Ident,
                TokTyp::Op(OperatorTyp::Mul),
                TokTyp::Open(Bracket::Paren),
                TokTyp::Ident,
                TokTyp::Op(OperatorTyp::Add),
                TokTyp::Number,
                TokTyp::Close(Bracket::Paren),
            ]
        );
    }

    #[test]
    fn digits_never_start_identifiers() {
        assert_eq!(ident_texts("2x + x2 + 1.5e3"), ["x", "x2", "e3"]);
    }

    #[test]
    fn latex_commands_lose_backslash() {
        assert_eq!(ident_texts(r"\frac{\alpha}{2}"), ["frac", "alpha"]);
    }

    #[test]
    fn underscore_runs_are_identifiers() {
        assert_eq!(ident_texts("__ + _a + v_max"), ["__", "_a", "v_max"]);
    }

    #[test]
    fn offsets_are_byte_offsets() {
        let toks: Vec<_> = Lexer::new("ω = k").collect();
        assert_eq!(toks[0].typ, TokTyp::Other);
        assert_eq!(toks[0].text, "ω");
        assert_eq!(toks[1].start, 3);
        assert_eq!(toks[2].start, 5);
        assert_eq!(toks[2].text, "k");
    }

    #[test]
    fn words_join_digits_and_letters() {
        assert_eq!(words("2x+ y_1 (z)").collect::<Vec<_>>(), ["2x", "y_1", "z"]);
    }

    #[test]
    fn empty_source() {
        assert_eq!(Lexer::new("").count(), 0);
        assert_eq!(Lexer::new("   \t").count(), 0);
    }
}
