//! Line-oriented prompting over any reader/writer pair.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", text.as_ref())?;
        Ok(())
    }

    /// Reads one trimmed line. `None` once the input is exhausted.
    pub fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question} ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks until the answer parses. An empty answer gives up.
    pub fn ask_parsed<T: FromStr>(&mut self, question: &str) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say(format!("Not understood: {answer}"))?,
            }
        }
    }

    /// Numbered choice; `0` backs out. Returns the picked index.
    pub fn choose<S: AsRef<str>>(&mut self, title: &str, options: &[S]) -> Result<Option<usize>> {
        self.say(format!("\n{title}"))?;
        for (index, option) in options.iter().enumerate() {
            self.say(format!("  {}) {}", index + 1, option.as_ref()))?;
        }
        self.say("  0) Back")?;
        loop {
            let Some(picked) = self.ask_parsed::<usize>(">")? else {
                return Ok(None);
            };
            match picked {
                0 => return Ok(None),
                n if n <= options.len() => return Ok(Some(n - 1)),
                n => self.say(format!("No option {n}"))?,
            }
        }
    }

    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(&format!("{question} [y/N]"))?;
        Ok(answer.is_some_and(|answer| matches!(answer.to_lowercase().as_str(), "y" | "yes")))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
