use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use excel_template::excel::reader;
use excel_template::template;
use excel_template::utils::cell_reference;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Excel file to generate (or to inspect with --show)
    #[arg(required = true)]
    file_path: PathBuf,

    /// Print the sheets of an existing file instead of generating a template
    #[arg(long, short = 's')]
    show: bool,

    /// Output the --show dump as JSON (for piping)
    #[arg(long, short = 'j')]
    json: bool,

    /// JSON file mapping each category to its value list (defaults to the built-in country and city data)
    #[arg(long, short = 'd')]
    data: Option<PathBuf>,

    /// Last row covered by the dropdown validations
    #[arg(long, short = 'r', default_value = "100")]
    rows: u32,

    /// Protect the generated sheet with this password
    #[arg(long, short = 'p')]
    password: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // If the show flag is set, dump the existing file and exit
    if cli.show {
        let dump = reader::dump_workbook(&cli.file_path)?;

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&dump)?);
        } else {
            print_dump(&dump);
        }

        return Ok(());
    }

    // Otherwise, generate the template
    let data = match &cli.data {
        Some(path) => template::load_category_map(path)?,
        None => template::sample_data(),
    };

    let workbook = template::build_personnel_template(&data, cli.rows, cli.password.as_deref())?;
    workbook.save(&cli.file_path)?;

    println!("Template written to {}", cli.file_path.display());

    Ok(())
}

fn print_dump(dump: &[reader::SheetDump]) {
    for sheet in dump {
        if sheet.hidden {
            println!("# {} (hidden)", sheet.name);
        } else {
            println!("# {}", sheet.name);
        }

        for cell in &sheet.cells {
            println!("{}: {}", cell_reference(cell.row, cell.col), cell.value);
        }

        println!();
    }
}
