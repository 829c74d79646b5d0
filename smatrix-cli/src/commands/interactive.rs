//! Menu-driven session.
//!
//! smatrix interactive [--once]

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Args;
use tracing::{debug, info};

use smatrix_store::{EngineConfig, SparseMatrix};

use super::user_message;
use crate::console::Console;

const MENU: &str = "\nC)reate, I)nsert, D)uplicate, R)esize, T)ranspose, Q)uit? ";
const NOT_CREATED: &str = "Currently Matrix is not created!!";

#[derive(Args, Default)]
pub struct InteractiveArgs {
    /// Exit after the first session instead of asking to continue
    #[arg(long)]
    once: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    Quit,
    EndOfInput,
}

pub fn run(args: InteractiveArgs, config: &EngineConfig) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    drive(&mut console, config, args.once)
}

fn drive<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &EngineConfig,
    once: bool,
) -> Result<()> {
    let mut sessions = 0usize;
    loop {
        sessions += 1;
        info!("Starting session {}", sessions);
        let end = session(console, config)?;
        if end == SessionEnd::EndOfInput || once || !console.confirm_continue()? {
            break;
        }
    }
    Ok(())
}

/// One create/manipulate/quit cycle. The matrix never outlives the session.
fn session<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &EngineConfig,
) -> Result<SessionEnd> {
    let mut matrix: Option<SparseMatrix> = None;

    loop {
        show(console.out(), matrix.as_ref())?;
        let Some(choice) = console.choice(MENU)? else {
            teardown(matrix);
            return Ok(SessionEnd::EndOfInput);
        };

        match choice {
            'c' => {
                if matrix.is_some() {
                    writeln!(console.out(), "Matrix is already created")?;
                    continue;
                }
                let Some(rows) = console.number::<usize>("No of Rows? ", "integer")? else {
                    return Ok(SessionEnd::EndOfInput);
                };
                let Some(columns) = console.number::<usize>("No of Columns? ", "integer")?
                else {
                    return Ok(SessionEnd::EndOfInput);
                };
                match SparseMatrix::with_config(rows, columns, config.clone()) {
                    Ok(m) => matrix = Some(m),
                    Err(e) => writeln!(console.out(), "{}", user_message(&e)?)?,
                }
                writeln!(console.out(), "\n")?;
            }
            'i' => {
                let Some(m) = matrix.as_mut() else {
                    writeln!(console.out(), "{}", NOT_CREATED)?;
                    continue;
                };
                let Some(row) = console.number::<usize>("Position of Row? ", "integer")? else {
                    teardown(matrix);
                    return Ok(SessionEnd::EndOfInput);
                };
                let Some(column) = console.number::<usize>("Position of Column? ", "integer")?
                else {
                    teardown(matrix);
                    return Ok(SessionEnd::EndOfInput);
                };
                let Some(value) = console.number::<f64>("value? ", "double")? else {
                    teardown(matrix);
                    return Ok(SessionEnd::EndOfInput);
                };
                if let Err(e) = m.insert(row, column, value) {
                    writeln!(console.out(), "{}", user_message(&e)?)?;
                }
                writeln!(console.out(), "\n")?;
            }
            'd' => {
                let Some(m) = matrix.as_ref() else {
                    writeln!(console.out(), "{}", NOT_CREATED)?;
                    continue;
                };
                let Some(value) = console.number::<f64>("value? ", "double")? else {
                    teardown(matrix);
                    return Ok(SessionEnd::EndOfInput);
                };
                let presence = if m.contains(value) {
                    "present"
                } else {
                    "not present"
                };
                writeln!(
                    console.out(),
                    "Value {:.1} {} in Sparse Matrix\n",
                    value,
                    presence
                )?;
            }
            'r' => match matrix.as_mut().map(SparseMatrix::resize) {
                Some(Ok(())) => writeln!(console.out(), "Matrix is resized\n")?,
                Some(Err(e)) => {
                    writeln!(console.out(), "{}", user_message(&e)?)?;
                    writeln!(console.out(), "Matrix is not resized\n")?;
                }
                None => writeln!(console.out(), "{}\nMatrix is not resized\n", NOT_CREATED)?,
            },
            't' => match matrix.as_mut().map(SparseMatrix::transpose) {
                Some(Ok(())) => writeln!(console.out(), "Matrix converted to transposed version\n")?,
                Some(Err(e)) => {
                    writeln!(console.out(), "{}", user_message(&e)?)?;
                    writeln!(console.out(), "Matrix not converted to transposed version\n")?;
                }
                None => writeln!(
                    console.out(),
                    "{}\nMatrix not converted to transposed version\n",
                    NOT_CREATED
                )?,
            },
            'q' => {
                teardown(matrix);
                writeln!(console.out(), "\nExiting")?;
                return Ok(SessionEnd::Quit);
            }
            _ => writeln!(console.out(), "Invalid choice\n")?,
        }
    }
}

fn show<W: Write>(out: &mut W, matrix: Option<&SparseMatrix>) -> io::Result<()> {
    writeln!(out, "\n--------Current Matrix--------")?;
    match matrix {
        Some(m) => write!(out, "{}", m),
        None => writeln!(out, "Not Created"),
    }
}

fn teardown(matrix: Option<SparseMatrix>) {
    if let Some(m) = matrix {
        let freed = m.destroy();
        debug!("Released {} stored entries", freed);
    }
}
