use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::Preset;

fn cell_ref(col_1_based: usize, row_1_based: usize) -> String {
    fn col_to_name(mut col: usize) -> String {
        let mut name = String::new();
        while col > 0 {
            let rem = (col - 1) % 26;
            name.push((b'A' + rem as u8) as char);
            col = (col - 1) / 26;
        }
        name.chars().rev().collect()
    }

    format!("{}{}", col_to_name(col_1_based), row_1_based)
}

/// Write a single-sheet `.xlsx`: `headers` in row 1, then `rows`. Empty
/// strings leave the cell unset.
pub fn write_workbook(path: &Path, headers: &[&str], rows: &[Vec<&str>]) -> Result<()> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_active_sheet_mut();

    for (i, header) in headers.iter().enumerate() {
        sheet.get_cell_mut(cell_ref(i + 1, 1).as_str()).set_value(*header);
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            sheet.get_cell_mut(cell_ref(c + 1, r + 2).as_str()).set_value(*value);
        }
    }

    umya_spreadsheet::writer::xlsx::write(&book, path)
        .with_context(|| format!("failed to write workbook: {}", path.display()))?;
    Ok(())
}

pub fn sample_rows(preset: Preset) -> (Vec<&'static str>, Vec<Vec<&'static str>>) {
    match preset {
        Preset::Reason => (
            vec!["Teammate", "Name", "Reason for the shout-out", "Photo"],
            vec![
                vec!["Jordan", "Evelin Ortiz", "Stayed late to get the release out with me", "yes"],
                vec!["Priya", "Isabel Moreira", "Always the first to offer help", "yes"],
                vec!["Alex", "Sam Lee", "Great teamwork on the migration", ""],
            ],
        ),
        Preset::Send => (
            vec!["Name", "Sending Note", "Photo"],
            vec![
                vec!["Evelin Ortiz", "Thank you for every code review", "yes"],
                vec!["Sam Lee", "Best onboarding buddy", ""],
            ],
        ),
    }
}

#[derive(Parser, Debug)]
#[command(name = "shoutouts-sample")]
#[command(about = "Write a demo shout-outs workbook")]
struct SampleArgs {
    /// Where to write the workbook.
    #[arg(default_value = "shoutouts-sample.xlsx")]
    output: PathBuf,

    /// Column layout to generate.
    #[arg(long, value_enum, default_value_t = Preset::Reason)]
    preset: Preset,
}

pub fn run(args: impl IntoIterator<Item = std::ffi::OsString>) -> Result<()> {
    let args = SampleArgs::parse_from(args);
    let (headers, rows) = sample_rows(args.preset);
    write_workbook(&args.output, &headers, &rows)?;
    println!("wrote {} rows to {}", rows.len(), args.output.display());
    Ok(())
}
