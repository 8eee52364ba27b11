//! Terminal colors for the dashboard banner and fatal errors.

use std::io::IsTerminal;

use owo_colors::{AnsiColors, OwoColorize};

#[derive(Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    fn is_terminal(self) -> bool {
        match self {
            Stream::Stdout => std::io::stdout().is_terminal(),
            Stream::Stderr => std::io::stderr().is_terminal(),
        }
    }
}

// Plain text when the stream is not a terminal.
fn paint(stream: Stream, color: AnsiColors, text: &str) -> String {
    if stream.is_terminal() {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

/// Banner label printed once the server is listening.
pub fn banner(text: &str) -> String {
    paint(Stream::Stdout, AnsiColors::Green, text)
}

/// Dashboard URL in the banner.
pub fn url(text: &str) -> String {
    paint(Stream::Stdout, AnsiColors::Cyan, text)
}

/// Fatal error line written to stderr before exiting.
pub fn error(text: &str) -> String {
    paint(Stream::Stderr, AnsiColors::Red, text)
}
