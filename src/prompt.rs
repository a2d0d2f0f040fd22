//! # Confirmation Prompt Module
//!
//! Chiede conferma all'utente prima di qualsiasi operazione distruttiva.
//!
//! ## Componenti:
//! - `Confirm`: capability iniettabile (`confirm(prompt, default) -> bool`)
//! - `ConsolePrompt`: legge una riga da stdin (o da qualsiasi `BufRead`)
//! - `AssumeYes`: risponde sempre di sì, per esecuzioni non interattive
//!
//! Solo "y" e "yes" (case-insensitive) valgono come conferma; una riga vuota
//! restituisce il default, qualsiasi altra risposta è un rifiuto.

use crate::error::Result;
use std::io::{self, BufRead, Write};

/// Yes/no decision source
pub trait Confirm {
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;
}

/// Interactive prompt over a reader/writer pair
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process stdin/stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the writer, mostly so tests can inspect what was shown.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Confirm for ConsolePrompt<R, W> {
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        write!(self.output, "{} {} ", prompt, hint)?;
        self.output.flush()?;

        let mut answer = Vec::new();
        self.input.read_until(b'\n', &mut answer)?;

        Ok(parse_answer(&String::from_utf8_lossy(&answer), default))
    }
}

/// Non-interactive confirmation, used by `--yes`
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str, _default: bool) -> Result<bool> {
        Ok(true)
    }
}

fn parse_answer(answer: &str, default: bool) -> bool {
    let answer = answer.trim();
    if answer.is_empty() {
        return default;
    }
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str, default: bool) -> (bool, String) {
        let mut prompt = ConsolePrompt::new(Cursor::new(input.to_string()), Vec::new());
        let answer = prompt.confirm("Proceed?", default).unwrap();
        (answer, String::from_utf8(prompt.into_output()).unwrap())
    }

    #[test]
    fn test_affirmative_answers() {
        for input in ["y\n", "Y\n", "yes\n", "YES\r\n", "  Yes  \n"] {
            assert!(ask(input, false).0, "{:?} should confirm", input);
        }
    }

    #[test]
    fn test_anything_else_declines() {
        for input in ["n\n", "no\n", "yep\n", "sure\n", "1\n"] {
            assert!(!ask(input, false).0, "{:?} should decline", input);
        }
    }

    #[test]
    fn test_invalid_utf8_declines() {
        for input in [&b"\xff\n"[..], &b"\xff\xfe\n"[..], &b"y\xff\n"[..]] {
            let mut prompt = ConsolePrompt::new(Cursor::new(input.to_vec()), Vec::new());
            assert!(!prompt.confirm("Proceed?", false).unwrap());
        }
    }

    #[test]
    fn test_empty_answer_uses_default() {
        assert!(!ask("\n", false).0);
        assert!(ask("\n", true).0);
        // EOF on stdin behaves like an empty line
        assert!(!ask("", false).0);
    }

    #[test]
    fn test_prompt_shows_default_hint() {
        assert_eq!(ask("n\n", false).1, "Proceed? [y/N] ");
        assert_eq!(ask("n\n", true).1, "Proceed? [Y/n] ");
    }

    #[test]
    fn test_assume_yes() {
        assert!(AssumeYes.confirm("Proceed?", false).unwrap());
    }
}
