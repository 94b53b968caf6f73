//! Some utility functions

use crate::controller::RenderedCell;
use crate::grid::WEEKDAY_NAMES;

/// A debug utility that pretty-prints a rendered month, one week per line.
///
/// Outside days are shown in brackets, days with a holiday are starred, and the tasks of each day are listed after each week
pub fn print_month(title: &str, cells: &[RenderedCell]) {
    println!("{:^35}", title);
    println!("{}", WEEKDAY_NAMES.iter().map(|d| format!("{:>5}", d)).collect::<String>());

    for week in cells.chunks(7) {
        let line: String = week.iter().map(format_cell).collect();
        println!("{}", line);

        for cell in week {
            for holiday in &cell.holidays {
                println!("    * {}  {}", cell.cell.iso_date(), holiday.name);
            }
            for task in &cell.tasks {
                println!("    - {}  {}", cell.cell.iso_date(), task.text());
            }
        }
    }
}

fn format_cell(cell: &RenderedCell) -> String {
    let marker = if cell.holidays.is_empty() { ' ' } else { '*' };
    if cell.cell.is_outside() {
        format!("{:>4}{}", format!("({})", cell.cell.day_of_month()), marker)
    } else if cell.is_today {
        format!("{:>4}{}", format!("[{}]", cell.cell.day_of_month()), marker)
    } else {
        format!("{:>4}{}", cell.cell.day_of_month(), marker)
    }
}
