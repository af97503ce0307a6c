//! Interactive console menu.
//!
//! Single pass: show the menu, read a choice, read one line of input for the
//! chosen workflow, run it and print the result. Anything other than a
//! workflow number ends the program with a farewell.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::output;
use crate::workflow::{Workflow, WorkflowExecutor};

pub const FAREWELL: &str = "感谢使用！";
const EXIT_LABEL: &str = "退出";

/// What the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Run(Workflow),
    Exit,
}

impl MenuChoice {
    /// Exact match on "1"–"3"; everything else exits.
    pub fn parse(input: &str) -> Self {
        match input {
            "1" => MenuChoice::Run(Workflow::TechResearch),
            "2" => MenuChoice::Run(Workflow::MarketAnalysis),
            "3" => MenuChoice::Run(Workflow::Optimization),
            _ => MenuChoice::Exit,
        }
    }
}

/// Print the banner and the numbered options.
pub fn print_menu(out: &mut impl Write) -> Result<()> {
    output::banner(out)?;
    writeln!(out, "请选择运行模式：")?;
    for (i, workflow) in Workflow::ALL.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, workflow.label())?;
    }
    writeln!(out, "{}. {EXIT_LABEL}", Workflow::ALL.len() + 1)?;
    writeln!(out)?;
    Ok(())
}

/// Read one line, without its terminator. `None` at end of input.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Run the menu once.
pub async fn run<R, W, E>(input: &mut R, out: &mut W, executor: &E) -> Result<()>
where
    R: BufRead,
    W: Write,
    E: WorkflowExecutor + ?Sized,
{
    print_menu(out)?;
    output::prompt(out, "请输入选项 (1-4): ")?;
    let choice = read_line(input)?.unwrap_or_default();

    let workflow = match MenuChoice::parse(&choice) {
        MenuChoice::Run(workflow) => workflow,
        MenuChoice::Exit => {
            tracing::debug!(choice = %choice, "Exit selected");
            writeln!(out, "{FAREWELL}")?;
            return Ok(());
        }
    };

    output::prompt(out, workflow.input_prompt())?;
    let Some(text) = read_line(input)? else {
        tracing::debug!(?workflow, "Input closed before topic");
        writeln!(out, "\n{FAREWELL}")?;
        return Ok(());
    };
    writeln!(out, "\n{}\n", workflow.start_notice())?;
    out.flush()?;

    let result = executor.execute(workflow, &text).await?;

    output::result_heading(out, workflow.result_heading())?;
    writeln!(out, "{result}")?;
    Ok(())
}
