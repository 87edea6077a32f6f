// SPDX-License-Identifier: AGPL-3.0-or-later
//! Interactive shell
//!
//! Reads one command per line and runs it against the same session, so history,
//! clipboard and the current directory carry over between lines.

use clap::Parser;
use console::style;
use rove_core::RoveResult;
use std::io::{self, BufRead, Write};

use crate::commands::{Action, Session};

#[derive(Parser, Debug)]
#[command(name = "rove", no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    action: Action,
}

pub fn run(session: &mut Session) -> RoveResult<()> {
    println!("{}", style("Type `help` for commands, `exit` to leave.").dim());
    session.run(Action::Drives)?;

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("{}> ", style(session.prompt()).green());
        io::stdout().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            println!();
            return Ok(());
        }

        let words = match split_words(&input) {
            Ok(words) => words,
            Err(quote) => {
                eprintln!("{} unclosed {quote}", style("Error:").red());
                continue;
            }
        };
        match words.first().map(String::as_str) {
            None => continue,
            Some("exit" | "quit") => return Ok(()),
            Some(_) => {}
        }

        match Line::try_parse_from(&words) {
            Ok(line) => {
                if let Err(e) = session.run(line.action) {
                    eprintln!("{} {e}", style("Error:").red());
                }
            }
            Err(e) => e.print()?,
        }
    }
}

/// Split a line into words.
///
/// Single or double quotes group text containing spaces. A backslash escapes a following
/// space, quote or backslash and is kept literally before anything else, so Windows paths
/// need no doubling. Returns the quote character if a quote is left open.
fn split_words(line: &str) -> Result<Vec<String>, char> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('\''), c) => word.push(c),
            (_, '\\') => {
                in_word = true;
                match chars.peek() {
                    Some(&next) if next.is_whitespace() || matches!(next, '"' | '\'' | '\\') => {
                        word.push(next);
                        chars.next();
                    }
                    _ => word.push('\\'),
                }
            }
            (Some(_), c) => word.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            (None, c) => {
                word.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(q);
    }
    if in_word {
        words.push(word);
    }
    Ok(words)
}
