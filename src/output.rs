//! Output rendering abstraction for switchyard.
//!
//! Defines the [`Renderer`] trait that decouples streamed model output from
//! the display layer. [`StdoutRenderer`] prints tokens directly to the
//! terminal.

use colored::Colorize;
use std::io::{self, Write};

/// Trait for rendering streamed LLM output.
pub trait Renderer {
    /// Render a single token as it arrives.
    fn render_token(&mut self, token: &str);

    /// Called when the full response is complete.
    fn render_done(&mut self);

    /// Called when an error occurs during streaming.
    fn render_error(&mut self, err: &str);
}

/// Renders streaming LLM output directly to stdout.
///
/// Each token is printed immediately with an explicit flush so the user
/// sees a "typing" effect.
#[derive(Default)]
pub struct StdoutRenderer {
    token_count: usize,
}

impl StdoutRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of tokens rendered.
    pub fn token_count(&self) -> usize {
        self.token_count
    }
}

impl Renderer for StdoutRenderer {
    fn render_token(&mut self, token: &str) {
        print!("{}", token);
        // Flush immediately so each token appears as it arrives
        io::stdout().flush().ok();
        self.token_count += 1;
    }

    fn render_done(&mut self) {
        println!();
        println!("{}", format!("[{} chunks]", self.token_count).dimmed());
    }

    fn render_error(&mut self, err: &str) {
        eprintln!();
        eprintln!("{} {}", "error:".red().bold(), err);
    }
}
