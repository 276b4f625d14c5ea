//! Word scanner for level script lines.
//!
//! A script line is a command keyword followed by arguments separated by
//! anything that cannot start a word: spaces, commas and parentheses all
//! work. `RANDOM(min,max)` is replaced by its value as soon as it is read.

use keeper_rng::KeeperRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordKind {
    /// Bare identifier, upper-cased.
    Name,
    /// Optionally signed decimal digits.
    Number,
    /// Contents of a `"..."` string.
    Text,
    /// Comparison operator.
    Operator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub kind: WordKind,
    pub text: String,
}

impl Word {
    fn new(kind: WordKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("Invalid {which} argument for RANDOM command")]
    RandomArgument { which: &'static str },
    #[error("Unexpected '-' not followed by a number")]
    DanglingMinus,
    #[error("Expected '=' after '{0}'")]
    IncompleteOperator(char),
    #[error("Unterminated text string")]
    UnterminatedText,
}

fn is_line_end(ch: char) -> bool {
    matches!(ch, '\r' | '\n' | '\0')
}

fn starts_word(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '"' | '=' | '!' | '<' | '>')
}

/// Cursor over a single script line.
pub struct LineScanner<'a> {
    rest: &'a str,
    line_end: bool,
    warnings: Vec<String>,
}

impl<'a> LineScanner<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            rest: line,
            line_end: false,
            warnings: Vec::new(),
        }
    }

    /// Problems noticed since the last call which did not stop the scan.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    /// Set once the scanner has run into the end of the line.
    pub fn at_line_end(&self) -> bool {
        self.line_end
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next().filter(|&c| !is_line_end(c))
    }

    fn bump(&mut self) {
        if let Some(c) = self.rest.chars().next() {
            self.rest = &self.rest[c.len_utf8()..];
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let end = self
            .rest
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(self.rest.len(), |(i, _)| i);
        let (taken, rest) = self.rest.split_at(end);
        self.rest = rest;
        taken
    }

    /// Read the next word. `Ok(None)` means the line has no more words.
    pub fn next_word(&mut self, rng: &mut KeeperRng) -> Result<Option<Word>, ScanError> {
        let first = loop {
            match self.peek() {
                None => {
                    self.line_end = true;
                    return Ok(None);
                }
                Some(c) if starts_word(c) => break c,
                Some(_) => self.bump(),
            }
        };

        let word = if first.is_ascii_alphabetic() {
            let name = self
                .take_while(|c| c.is_ascii_alphanumeric() || c == '_')
                .to_ascii_uppercase();
            if name == "RANDOM" {
                let value = self.random_value(rng)?;
                Word::new(WordKind::Number, value.to_string())
            } else {
                Word::new(WordKind::Name, name)
            }
        } else if first.is_ascii_digit() || first == '-' {
            let negative = first == '-';
            if negative {
                self.bump();
            }
            let digits = self.take_while(|c| c.is_ascii_digit());
            if digits.is_empty() {
                return Err(ScanError::DanglingMinus);
            }
            let text = if negative {
                format!("-{digits}")
            } else {
                digits.to_string()
            };
            Word::new(WordKind::Number, text)
        } else if first == '"' {
            self.bump();
            let text = self.take_while(|c| c != '"' && !is_line_end(c));
            if self.peek() != Some('"') {
                self.line_end = true;
                return Err(ScanError::UnterminatedText);
            }
            self.bump();
            Word::new(WordKind::Text, text)
        } else {
            self.bump();
            let second = self.peek();
            let text = match (first, second) {
                ('!' | '=', Some('=')) | ('<' | '>', Some('=')) => {
                    self.bump();
                    format!("{first}=")
                }
                ('!' | '=', _) => return Err(ScanError::IncompleteOperator(first)),
                _ => first.to_string(),
            };
            Word::new(WordKind::Operator, text)
        };

        if self.peek().is_none() {
            self.line_end = true;
        }
        Ok(Some(word))
    }

    /// Read the `min` and `max` of a `RANDOM` and roll a value between them.
    fn random_value(&mut self, rng: &mut KeeperRng) -> Result<i64, ScanError> {
        let min = self.random_bound("first")?;
        let max = self.random_bound("second")?;
        Ok(rng.range_inclusive(min, max))
    }

    fn random_bound(&mut self, which: &'static str) -> Result<i64, ScanError> {
        loop {
            match self.peek() {
                None => {
                    self.line_end = true;
                    return Err(ScanError::RandomArgument { which });
                }
                Some(c) if c.is_ascii_digit() || c == '-' => break,
                Some(_) => self.bump(),
            }
        }
        let negative = self.peek() == Some('-');
        if negative {
            self.bump();
        }
        let digits = self.take_while(|c| c.is_ascii_digit());
        let value = match digits.parse::<i64>() {
            Ok(value) => value,
            Err(_) => {
                let value = if digits.is_empty() { 0 } else { i64::MAX };
                self.warnings.push(format!(
                    "RANDOM {which} bound '{}{digits}' interpreted as {}",
                    if negative { "-" } else { "" },
                    if negative { -value } else { value }
                ));
                value
            }
        };
        Ok(if negative { -value } else { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<(WordKind, String)> {
        let mut rng = KeeperRng::new(0);
        let mut scanner = LineScanner::new(line);
        let mut out = Vec::new();
        while let Some(w) = scanner.next_word(&mut rng).expect("scan") {
            out.push((w.kind, w.text));
        }
        out
    }

    #[test]
    fn command_with_arguments() {
        let got = words("ADD_CREATURE_TO_LEVEL(PLAYER0,HORNY,-1,3,1,500)");
        let texts: Vec<_> = got.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(
            texts,
            ["ADD_CREATURE_TO_LEVEL", "PLAYER0", "HORNY", "-1", "3", "1", "500"]
        );
        assert_eq!(got[3].0, WordKind::Number);
        assert_eq!(got[1].0, WordKind::Name);
    }

    #[test]
    fn names_are_upper_cased() {
        assert_eq!(
            words("if(player0, money >= 1000)"),
            vec![
                (WordKind::Name, "IF".to_string()),
                (WordKind::Name, "PLAYER0".to_string()),
                (WordKind::Name, "MONEY".to_string()),
                (WordKind::Operator, ">=".to_string()),
                (WordKind::Number, "1000".to_string()),
            ]
        );
    }

    #[test]
    fn quoted_text_keeps_case_and_spaces() {
        let got = words("QUICK_OBJECTIVE(1,\"Kill the Avatar, then rest.\",PLAYER0)");
        assert_eq!(got[2], (WordKind::Text, "Kill the Avatar, then rest.".to_string()));
        assert_eq!(got[3], (WordKind::Name, "PLAYER0".to_string()));
    }

    #[test]
    fn operators() {
        let ops: Vec<_> = words("== != < > <= >=").into_iter().map(|(_, t)| t).collect();
        assert_eq!(ops, ["==", "!=", "<", ">", "<=", ">="]);
    }

    #[test]
    fn single_equals_is_an_error() {
        let mut rng = KeeperRng::new(0);
        let mut scanner = LineScanner::new("IF(PLAYER0,MONEY = 5)");
        for _ in 0..3 {
            scanner.next_word(&mut rng).expect("word");
        }
        assert_eq!(scanner.next_word(&mut rng), Err(ScanError::IncompleteOperator('=')));
    }

    #[test]
    fn dangling_minus() {
        let mut rng = KeeperRng::new(0);
        let mut scanner = LineScanner::new("- x");
        assert_eq!(scanner.next_word(&mut rng), Err(ScanError::DanglingMinus));
    }

    #[test]
    fn unterminated_text() {
        let mut rng = KeeperRng::new(0);
        let mut scanner = LineScanner::new("\"no end");
        assert_eq!(scanner.next_word(&mut rng), Err(ScanError::UnterminatedText));
    }

    #[test]
    fn line_end_flag() {
        let mut rng = KeeperRng::new(0);
        let mut scanner = LineScanner::new("WIN_GAME\r\n");
        let w = scanner.next_word(&mut rng).expect("scan").expect("word");
        assert_eq!(w.text, "WIN_GAME");
        assert!(scanner.at_line_end());
    }

    #[test]
    fn trailing_separator_is_not_line_end() {
        let mut rng = KeeperRng::new(0);
        let mut scanner = LineScanner::new("ENDIF )");
        scanner.next_word(&mut rng).expect("scan");
        assert!(!scanner.at_line_end());
        assert_eq!(scanner.next_word(&mut rng), Ok(None));
        assert!(scanner.at_line_end());
    }

    #[test]
    fn random_is_rolled_in_range() {
        let mut rng = KeeperRng::new(42);
        for _ in 0..50 {
            let mut scanner = LineScanner::new("RANDOM(3, 9)");
            let w = scanner.next_word(&mut rng).expect("scan").expect("word");
            assert_eq!(w.kind, WordKind::Number);
            let v: i64 = w.text.parse().expect("number");
            assert!((3..=9).contains(&v), "RANDOM(3,9) gave {v}");
        }
    }

    #[test]
    fn random_negative_bounds() {
        let mut rng = KeeperRng::new(1);
        let mut scanner = LineScanner::new("RANDOM(-5,-5)");
        let w = scanner.next_word(&mut rng).expect("scan").expect("word");
        assert_eq!(w.text, "-5");
    }

    #[test]
    fn random_bound_too_large_is_clamped_with_warning() {
        let mut rng = KeeperRng::new(1);
        let mut scanner = LineScanner::new("RANDOM(99999999999999999999, 99999999999999999999)");
        let w = scanner.next_word(&mut rng).expect("scan").expect("word");
        assert_eq!(w.text, i64::MAX.to_string());
        let warnings = scanner.take_warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("first"), "{warnings:?}");
        assert!(scanner.take_warnings().is_empty());
    }

    #[test]
    fn random_without_arguments() {
        let mut rng = KeeperRng::new(0);
        let mut scanner = LineScanner::new("RANDOM");
        assert_eq!(
            scanner.next_word(&mut rng),
            Err(ScanError::RandomArgument { which: "first" })
        );
        let mut scanner = LineScanner::new("RANDOM(4)");
        assert_eq!(
            scanner.next_word(&mut rng),
            Err(ScanError::RandomArgument { which: "second" })
        );
    }
}
