use std::{
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result};
use minidb::{
    engine::Engine,
    executor::ExecuteResult,
    types::{
        CELL_COUNT_OFFSET, LEAF_NODE_HEADER_SIZE, LEAF_NODE_MAX_CELLS, LEAF_NODE_SPACE_FOR_CELLS,
        ROW_SIZE, page::NodeKind, row::Row,
    },
};
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::warn;

const PROMPT: &str = "db > ";
const CONTINUATION_PROMPT: &str = "   > ";

#[derive(Debug, PartialEq, Eq)]
pub enum ReplAction {
    Continue,
    Exit,
}

fn read_multiline_command(rl: &mut DefaultEditor) -> rustyline::Result<String> {
    let mut input = String::new();
    let mut prompt = PROMPT;

    loop {
        let line = rl.readline(prompt)?;
        let trimmed_line = line.trim_end();

        // A trailing backslash continues the command on the next line
        if let Some(head) = trimmed_line.strip_suffix('\\') {
            input.push_str(head);
            input.push(' ');
            prompt = CONTINUATION_PROMPT;
        } else {
            input.push_str(trimmed_line);
            break;
        }
    }

    Ok(input)
}

/// Handles one complete line of input, writing everything the user sees to `out`.
pub fn handle_line<W: Write>(engine: &mut Engine, line: &str, out: &mut W) -> io::Result<ReplAction> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ReplAction::Continue);
    }
    if line.starts_with('.') {
        return do_meta_command(engine, line, out);
    }

    let statement = match engine.prepare(line) {
        Ok(statement) => statement,
        Err(err) => {
            writeln!(out, "{err}")?;
            return Ok(ReplAction::Continue);
        }
    };

    match engine.execute(&statement) {
        Ok(ExecuteResult::Rows(rows)) => {
            for row in rows {
                writeln!(out, "{row}")?;
            }
            writeln!(out, "Executed.")?;
        }
        Ok(ExecuteResult::Inserted) => writeln!(out, "Executed.")?,
        Err(err) => writeln!(out, "Error: {err}")?,
    }
    Ok(ReplAction::Continue)
}

fn do_meta_command<W: Write>(engine: &mut Engine, command: &str, out: &mut W) -> io::Result<ReplAction> {
    match command {
        ".exit" => return Ok(ReplAction::Exit),
        ".help" => writeln!(
            out,
            r#"Available commands:
  insert <id> <username> <email>   - Append a row
  select                           - Print every row
  INSERT INTO t VALUES (...)       - SQL form of insert
  SELECT * FROM t                  - SQL form of select
  .btree                           - Print the root leaf node
  .constants                       - Print layout constants
  .exit                            - Flush and quit

Use '\' at the end of a line for multiline input."#
        )?,
        ".constants" => print_constants(out)?,
        ".btree" => print_tree(engine, out)?,
        _ => writeln!(out, "Unrecognized command '{command}'")?,
    }
    Ok(ReplAction::Continue)
}

fn print_constants<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Constants:")?;
    writeln!(out, "ROW_SIZE: {ROW_SIZE}")?;
    writeln!(out, "COMMON_NODE_HEADER_SIZE: {CELL_COUNT_OFFSET}")?;
    writeln!(out, "LEAF_NODE_HEADER_SIZE: {LEAF_NODE_HEADER_SIZE}")?;
    writeln!(out, "LEAF_NODE_CELL_SIZE: {ROW_SIZE}")?;
    writeln!(out, "LEAF_NODE_SPACE_FOR_CELLS: {LEAF_NODE_SPACE_FOR_CELLS}")?;
    writeln!(out, "LEAF_NODE_MAX_CELLS: {LEAF_NODE_MAX_CELLS}")
}

fn print_tree<W: Write>(engine: &mut Engine, out: &mut W) -> io::Result<()> {
    let root = match engine.table_mut().root_page() {
        Ok(root) => root,
        Err(err) => return writeln!(out, "Error: {err}"),
    };

    writeln!(out, "Tree:")?;
    match root.node_kind() {
        Ok(NodeKind::Leaf) => {
            let cell_count = root.cell_count();
            writeln!(out, "leaf (size {cell_count})")?;
            for cell_num in 0..cell_count as usize {
                match root.cell(cell_num) {
                    Ok(cell) => writeln!(out, "  - {cell_num} : {}", Row::deserialize(cell).id)?,
                    Err(err) => return writeln!(out, "Error: {err}"),
                }
            }
            Ok(())
        }
        Ok(NodeKind::Internal) => writeln!(out, "internal"),
        Err(err) => writeln!(out, "Error: {err}"),
    }
}

pub fn run(mut engine: Engine, history: Option<&Path>) -> Result<()> {
    let mut rl = DefaultEditor::new().context("Failed to start line editor")?;
    if let Some(history) = history {
        if let Err(err) = rl.load_history(history) {
            warn!(path = %history.display(), "could not load history: {err}");
        }
    }

    let mut stdout = io::stdout();
    loop {
        match read_multiline_command(&mut rl) {
            Ok(input) => {
                let command = input.trim();
                if command.is_empty() {
                    continue;
                }
                rl.add_history_entry(command)?;
                let action = handle_line(&mut engine, command, &mut stdout)?;
                stdout.flush()?;
                if action == ReplAction::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("Failed to read input"),
        }
    }

    if let Some(history) = history {
        if let Err(err) = rl.save_history(history) {
            warn!(path = %history.display(), "could not save history: {err}");
        }
    }
    engine.close().context("Failed to flush database")
}
