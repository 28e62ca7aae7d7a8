//! Line-oriented interactive mode.
//!
//! Each line is parsed with the same clap definitions as the one-shot
//! commands, minus the binary name. `help` lists them; `quit` or end of
//! input leaves.

use std::io::{self, BufRead, Write};

use billing_core::BillingApi;
use clap::{CommandFactory, Parser};

use crate::cli::Action;
use crate::session::Session;

const PROMPT: &str = "billing> ";

#[derive(Parser, Debug)]
#[command(name = "billing-console", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    action: Action,
}

/// Run the shell until `quit`, `exit`, or end of input. The dashboard's
/// health check runs once on entry.
pub fn run<A: BillingApi>(
    session: &mut Session<A>,
    input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    writeln!(output, "{}", session.run(Action::Health).screen)?;
    write!(output, "{PROMPT}")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["help"] => {
                writeln!(output, "{}", ShellLine::command().render_help())?;
            }
            _ => match ShellLine::try_parse_from(words.iter().copied()) {
                Ok(parsed) => writeln!(output, "{}", session.run(parsed.action).screen)?,
                Err(err) => writeln!(output, "{}", err.render())?,
            },
        }
        write!(output, "{PROMPT}")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_line_parses_without_binary_name() {
        let parsed = ShellLine::try_parse_from(["invoices", "--user-id", "u1"]).unwrap();
        assert_eq!(
            parsed.action,
            Action::Invoices {
                user_id: Some("u1".to_string())
            }
        );
    }

    #[test]
    fn shell_line_rejects_unknown_action() {
        assert!(ShellLine::try_parse_from(["refund"]).is_err());
    }
}
