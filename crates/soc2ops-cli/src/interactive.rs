//! Interactive prompts

use anyhow::Result;
use std::io::{self, BufRead, BufReader, Write};

/// Repository used when the prompt is answered with an empty line
pub const DEFAULT_REPOSITORY: &str = "saasx-soc2-certification";

/// Line-based prompt over any reader/writer pair
pub struct Prompt {
    input: Box<dyn BufRead + Send>,
    output: Box<dyn Write + Send>,
}

impl Prompt {
    pub fn new<R, W>(input: R, output: W) -> Self
    where
        R: BufRead + Send + 'static,
        W: Write + Send + 'static,
    {
        Self {
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    /// Prompt on stdout, read from stdin
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }

    /// Ask `question`; an empty answer (or EOF) yields `default`
    pub fn ask_with_default(&mut self, question: &str, default: &str) -> Result<String> {
        write!(self.output, "{} [{}]: ", question, default)?;
        self.output.flush()?;

        let mut input = String::new();
        self.input.read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(input.to_string())
        }
    }

    pub fn ask_repository(&mut self) -> Result<String> {
        self.ask_with_default("Enter repository name", DEFAULT_REPOSITORY)
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::stdio()
    }
}
