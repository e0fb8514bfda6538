use inksac::prelude::*;

use crate::parser::{PARALLEL, REDIRECT, SEQUENCE};

#[derive(Debug, Clone, Copy)]
enum Token {
    Command,
    Operator,
    Flag,
}

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colors command names, operators and flags. Whitespace is preserved so
    /// the cursor position in the editor stays valid.
    pub fn highlight_line(&self, input: &str) -> String {
        if !self.enabled() {
            return input.to_string();
        }

        let mut result = String::with_capacity(input.len());
        let mut word = String::new();
        let mut expect_command = true;

        let flush = |word: &mut String, result: &mut String, expect_command: &mut bool| {
            if word.is_empty() {
                return;
            }
            if *expect_command {
                result.push_str(&self.paint(word, Token::Command));
                *expect_command = false;
            } else if word.starts_with('-') {
                result.push_str(&self.paint(word, Token::Flag));
            } else {
                result.push_str(word);
            }
            word.clear();
        };

        for c in input.chars() {
            if c == PARALLEL || c == SEQUENCE || c == REDIRECT {
                flush(&mut word, &mut result, &mut expect_command);
                result.push_str(&self.paint(&c.to_string(), Token::Operator));
                // The word after `>` is a file, not a command.
                expect_command = c != REDIRECT;
            } else if c.is_whitespace() {
                flush(&mut word, &mut result, &mut expect_command);
                result.push(c);
            } else {
                word.push(c);
            }
        }
        flush(&mut word, &mut result, &mut expect_command);

        result
    }

    fn paint(&self, text: &str, token: Token) -> String {
        let style = match token {
            Token::Command => Style::builder().foreground(Color::Cyan).bold().build(),
            Token::Operator => Style::builder().foreground(Color::Magenta).bold().build(),
            Token::Flag => Style::builder().foreground(Color::Yellow).build(),
        };
        text.style(style).to_string()
    }

    pub fn highlight_prompt(&self, prompt: &str) -> String {
        if !self.enabled() {
            return prompt.to_string();
        }

        let prompt_style = Style::builder().foreground(Color::Green).bold().build();
        prompt.style(prompt_style).to_string()
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder()
            .foreground(Color::Red)
            .bold()
            .build();

        error.style(error_style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if !self.enabled() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();

        hint.style(hint_style).to_string()
    }
}
