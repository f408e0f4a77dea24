//! Line-oriented terminal prompts.
//!
//! [`Prompter`] reads one line per answer from any [`BufRead`] and writes
//! prompts to any [`Write`], so the same code drives a real terminal and
//! scripted test input. Masked secret entry goes through a [`SecretReader`]
//! that is only installed when the terminal can hide input.

use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};

/// Reads a secret without echoing it.
pub trait SecretReader {
    /// Reads one line of hidden input, without the trailing newline.
    fn read_secret(&mut self) -> io::Result<String>;
}

/// Hidden input from the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSecretReader;

impl SecretReader for TerminalSecretReader {
    fn read_secret(&mut self) -> io::Result<String> {
        rpassword::read_password()
    }
}

/// Interprets a yes/no answer. `None` means the answer was not understood.
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "" | "n" | "no" => Some(false),
        _ => None,
    }
}

/// Sequential prompt engine over an input and an output stream.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    secret: Option<Box<dyn SecretReader>>,
}

impl Prompter<StdinLock<'static>, Stdout> {
    /// Prompts on stdout and reads stdin. Secrets are masked when stdin is a
    /// terminal.
    pub fn stdio() -> Self {
        let stdin = io::stdin();
        let masking = stdin.is_terminal();
        let prompter = Self::new(stdin.lock(), io::stdout());

        if masking {
            prompter.with_secret_reader(TerminalSecretReader)
        } else {
            prompter
        }
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Creates a prompter without masked input.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            secret: None,
        }
    }

    /// Installs a reader for hidden secret entry.
    pub fn with_secret_reader(mut self, reader: impl SecretReader + 'static) -> Self {
        self.secret = Some(Box::new(reader));
        self
    }

    /// Returns whether secrets are read without echo.
    pub fn supports_masking(&self) -> bool {
        self.secret.is_some()
    }

    /// Returns the output stream for non-prompt messages.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Asks until a non-empty (trimmed) answer is given.
    pub fn required(&mut self, prompt: &str) -> io::Result<String> {
        loop {
            let answer = self.ask(prompt)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            writeln!(self.output, "  A value is required.")?;
        }
    }

    /// Asks once and returns the trimmed answer, which may be empty.
    pub fn optional(&mut self, prompt: &str) -> io::Result<String> {
        self.ask(prompt)
    }

    /// Asks for a secret until a non-empty answer is given.
    ///
    /// Without masking support a warning is printed and the answer is read
    /// as visible text.
    pub fn secret(&mut self, prompt: &str) -> io::Result<String> {
        let Some(reader) = self.secret.as_mut() else {
            writeln!(
                self.output,
                "  Warning: hidden input is not available, the value will be visible."
            )?;
            return self.required(prompt);
        };

        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let answer = reader.read_secret()?;
            let answer = answer.trim();
            if !answer.is_empty() {
                return Ok(answer.to_owned());
            }
            writeln!(self.output, "  A value is required.")?;
        }
    }

    /// Asks a yes/no question until the answer is understood.
    ///
    /// `y`/`yes` is true; `n`/`no` or an empty answer is false.
    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        loop {
            let answer = self.ask(prompt)?;
            match parse_yes_no(&answer) {
                Some(choice) => return Ok(choice),
                None => writeln!(self.output, "  Please answer 'y' or 'n'.")?,
            }
        }
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            ));
        }

        Ok(line.trim().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io::Cursor;

    use super::*;

    fn prompter(script: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn output_of(prompter: &mut Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.output().clone()).unwrap()
    }

    struct ScriptedSecrets(VecDeque<&'static str>);

    impl SecretReader for ScriptedSecrets {
        fn read_secret(&mut self) -> io::Result<String> {
            self.0
                .pop_front()
                .map(str::to_owned)
                .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
        }
    }

    #[test]
    fn yes_no_answers() {
        for answer in ["Y", "yes", "YES\n", " y "] {
            assert_eq!(parse_yes_no(answer), Some(true), "{answer:?}");
        }
        for answer in ["", "n", "no", "No\n"] {
            assert_eq!(parse_yes_no(answer), Some(false), "{answer:?}");
        }
        assert_eq!(parse_yes_no("maybe"), None);
    }

    #[test]
    fn required_reasks_until_non_empty() {
        let mut prompter = prompter("\n   \n\t\nlocalhost:9000\n");

        let answer = prompter.required("Endpoint: ").unwrap();
        assert_eq!(answer, "localhost:9000");

        let output = output_of(&mut prompter);
        assert_eq!(output.matches("Endpoint: ").count(), 4);
        assert_eq!(output.matches("A value is required.").count(), 3);
    }

    #[test]
    fn required_fails_on_closed_input() {
        let mut prompter = prompter("\n\n");
        let err = prompter.required("Endpoint: ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn optional_returns_empty_answers() {
        let mut prompter = prompter("\n  eu-west-1  \n");
        assert_eq!(prompter.optional("Region: ").unwrap(), "");
        assert_eq!(prompter.optional("Region: ").unwrap(), "eu-west-1");
    }

    #[test]
    fn confirm_reprompts_on_unknown_answer() {
        let mut prompter = prompter("maybe\nsure\nYES\n");

        assert!(prompter.confirm("Use SSL? [y/N]: ").unwrap());

        let output = output_of(&mut prompter);
        assert_eq!(output.matches("Please answer 'y' or 'n'.").count(), 2);
    }

    #[test]
    fn confirm_empty_is_no() {
        let mut prompter = prompter("\n");
        assert!(!prompter.confirm("Use SSL? [y/N]: ").unwrap());
    }

    #[test]
    fn secret_falls_back_to_visible_input() {
        let mut prompter = prompter("\nsuper-secret\n");
        assert!(!prompter.supports_masking());

        assert_eq!(prompter.secret("Secret key: ").unwrap(), "super-secret");

        let output = output_of(&mut prompter);
        assert!(output.contains("Warning: hidden input is not available"));
        assert!(output.contains("A value is required."));
    }

    #[test]
    fn secret_uses_masked_reader() {
        let mut prompter =
            prompter("visible-line\n").with_secret_reader(ScriptedSecrets(VecDeque::from([
                "", "  ", "hidden",
            ])));
        assert!(prompter.supports_masking());

        assert_eq!(prompter.secret("Secret key: ").unwrap(), "hidden");

        // The visible input stream is left untouched.
        assert_eq!(prompter.optional("Next: ").unwrap(), "visible-line");

        let output = output_of(&mut prompter);
        assert!(!output.contains("Warning"));
        assert!(!output.contains("hidden"));
        assert_eq!(output.matches("A value is required.").count(), 2);
    }
}
