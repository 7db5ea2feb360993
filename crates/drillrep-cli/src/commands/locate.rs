use drillrep_core::error::DrillrepError;
use drillrep_core::locate;
use std::path::PathBuf;

pub fn run(input_file: PathBuf, markers: &[String]) -> Result<(), DrillrepError> {
    let grid = super::read_grid(&input_file)?;
    let markers: Vec<&str> = markers.iter().map(String::as_str).collect();
    let row = locate::find_row(&grid, &markers)?;

    println!(
        "Row {row} of {} ({} columns):",
        grid.height(),
        grid.width()
    );
    for (column, cell) in grid.row(row).unwrap_or_default().iter().enumerate() {
        if cell.trim().is_empty() {
            continue;
        }
        println!("  [{column:>2}] {}", cell.replace('\n', " | "));
    }
    Ok(())
}
