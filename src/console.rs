//! Interactive console abstraction
//!
//! The orchestrator talks to the terminal only through `Console`, so the
//! whole flow can be driven from a script in tests.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin, Stdout};

use crate::error::AppResult;

/// Line-oriented user interaction
#[async_trait]
pub trait Console: Send {
    /// Show `message` and read one line; end of input reads as an empty line
    async fn prompt_line(&mut self, message: &str) -> AppResult<String>;

    /// Print one line of output
    async fn print_line(&mut self, message: &str) -> AppResult<()>;
}

/// Console over the process stdin/stdout
pub struct StdConsole {
    input: BufReader<Stdin>,
    output: Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            input: BufReader::new(tokio::io::stdin()),
            output: tokio::io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdConsole {
    async fn prompt_line(&mut self, message: &str) -> AppResult<String> {
        self.output.write_all(message.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        self.input.read_line(&mut line).await?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    async fn print_line(&mut self, message: &str) -> AppResult<()> {
        self.output.write_all(message.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use scripted::ScriptedConsole;

#[cfg(any(test, feature = "test-utils"))]
mod scripted {
    use std::collections::VecDeque;

    use async_trait::async_trait;

    use super::Console;
    use crate::error::AppResult;

    /// Console fed from a fixed list of input lines
    ///
    /// Once the script runs out every prompt reads an empty line.
    #[derive(Debug, Default)]
    pub struct ScriptedConsole {
        inputs: VecDeque<String>,
        prompts: Vec<String>,
        output: Vec<String>,
    }

    impl ScriptedConsole {
        pub fn new<I, S>(inputs: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                inputs: inputs.into_iter().map(Into::into).collect(),
                ..Self::default()
            }
        }

        /// Every prompt shown, in order
        pub fn prompts(&self) -> &[String] {
            &self.prompts
        }

        /// Every printed line, in order
        pub fn output(&self) -> &[String] {
            &self.output
        }

        /// Printed lines joined with newlines
        pub fn transcript(&self) -> String {
            self.output.join("\n")
        }
    }

    #[async_trait]
    impl Console for ScriptedConsole {
        async fn prompt_line(&mut self, message: &str) -> AppResult<String> {
            self.prompts.push(message.to_string());
            Ok(self.inputs.pop_front().unwrap_or_default())
        }

        async fn print_line(&mut self, message: &str) -> AppResult<()> {
            self.output.push(message.to_string());
            Ok(())
        }
    }
}
