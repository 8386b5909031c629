//! Interactive collaborator: the prompt loop and the bare-invocation menu.
//! All I/O is generic over `BufRead`/`Write` so tests can drive it with
//! in-memory buffers.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::config::Config;
use crate::pipeline::Request;

/// Selection made in the bare-invocation menu.
#[derive(Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Interactive,
    Help,
    Quit,
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context("read from input")?;
    if n == 0 {
        return Ok(None); // EOF
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask one question; an empty answer falls back to `default` when one exists.
fn ask<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
    default: Option<&Path>,
) -> Result<String> {
    match default {
        Some(d) => write!(out, "{question} [{}]: ", d.display())?,
        None => write!(out, "{question}: ")?,
    }
    out.flush()?;

    let answer = read_line(input)?.unwrap_or_default();
    if answer.is_empty() {
        if let Some(d) = default {
            return Ok(d.display().to_string());
        }
    }
    Ok(answer)
}

/// Prompt for source folder, pattern and target folder.
///
/// The source must already exist; the target is created when missing, with a
/// note, matching direct-mode behavior. Configured bases appear as defaults
/// that an empty answer accepts.
pub fn prompt_request<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    cfg: &Config,
) -> Result<Request> {
    let source = ask(
        input,
        out,
        "Enter source folder path",
        cfg.source_base.as_deref(),
    )?;
    if source.is_empty() {
        bail!("no source folder given");
    }
    let source = PathBuf::from(source);
    if !source.is_dir() {
        bail!("source folder does not exist: {}", source.display());
    }

    let pattern = ask(
        input,
        out,
        "Enter regex pattern (e.g. .*\\.txt$ for txt files)",
        None,
    )?;
    if pattern.is_empty() {
        bail!("no pattern given");
    }

    let target = ask(
        input,
        out,
        "Enter target folder path",
        cfg.target_base.as_deref(),
    )?;
    if target.is_empty() {
        bail!("no target folder given");
    }
    let target = PathBuf::from(target);
    if !target.exists() {
        writeln!(out, "Target folder doesn't exist. Creating: {}", target.display())?;
        fs::create_dir_all(&target)
            .with_context(|| format!("failed to create target folder '{}'", target.display()))?;
    }

    Ok(Request {
        source,
        pattern,
        target,
    })
}

/// Show the i/h/q menu once and read a choice; invalid input re-prompts.
/// EOF quits.
pub fn mode_menu<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<MenuChoice> {
    writeln!(out, "Welcome to file_mover!")?;
    writeln!(out, "Select a mode:")?;
    writeln!(out, "  i - Interactive mode")?;
    writeln!(out, "  h - Help")?;
    writeln!(out, "  q - Quit")?;
    loop {
        write!(out, "Enter your choice: ")?;
        out.flush()?;
        let Some(choice) = read_line(input)? else {
            return Ok(MenuChoice::Quit);
        };
        match choice.as_str() {
            "i" => return Ok(MenuChoice::Interactive),
            "h" => return Ok(MenuChoice::Help),
            "q" => return Ok(MenuChoice::Quit),
            _ => writeln!(out, "Invalid option. Please try again.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn full_prompt_flow_creates_target() {
        let td = tempdir().unwrap();
        let source = td.path().join("in");
        fs::create_dir(&source).unwrap();
        let target = td.path().join("out");

        let script = format!(
            "{}\n\\.txt$\n{}\n",
            source.display(),
            target.display()
        );
        let mut input = Cursor::new(script);
        let mut out = Vec::new();

        let req = prompt_request(&mut input, &mut out, &Config::default()).unwrap();
        assert_eq!(req.source, source);
        assert_eq!(req.pattern, "\\.txt$");
        assert_eq!(req.target, target);
        assert!(target.is_dir(), "target should have been created");

        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("Enter source folder path"));
        assert!(transcript.contains("Creating"));
    }

    #[test]
    fn missing_source_fails() {
        let td = tempdir().unwrap();
        let script = format!("{}\n", td.path().join("ghost").display());
        let mut input = Cursor::new(script);
        let mut out = Vec::new();

        let err = prompt_request(&mut input, &mut out, &Config::default()).unwrap_err();
        assert!(format!("{err}").contains("does not exist"));
    }

    #[test]
    fn empty_answer_accepts_configured_default() {
        let td = tempdir().unwrap();
        let source = td.path().join("in");
        fs::create_dir(&source).unwrap();
        let target = td.path().join("out");
        fs::create_dir(&target).unwrap();

        let cfg = Config {
            source_base: Some(source.clone()),
            target_base: Some(target.clone()),
            ..Default::default()
        };

        let mut input = Cursor::new("\nreport\n\n");
        let mut out = Vec::new();
        let req = prompt_request(&mut input, &mut out, &cfg).unwrap();
        assert_eq!(req.source, source);
        assert_eq!(req.target, target);
    }

    #[test]
    fn menu_retries_on_invalid_then_accepts() {
        let mut input = Cursor::new("x\ni\n");
        let mut out = Vec::new();
        let choice = mode_menu(&mut input, &mut out).unwrap();
        assert_eq!(choice, MenuChoice::Interactive);
        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("Invalid option"));
    }

    #[test]
    fn menu_quits_on_q_and_on_eof() {
        let mut out = Vec::new();
        assert_eq!(
            mode_menu(&mut Cursor::new("q\n"), &mut out).unwrap(),
            MenuChoice::Quit
        );
        assert_eq!(
            mode_menu(&mut Cursor::new(""), &mut out).unwrap(),
            MenuChoice::Quit
        );
    }
}
