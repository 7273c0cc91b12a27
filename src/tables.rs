use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::{grid::ContingencyGrid, histogram::Histogram, package::Package, report::Report};

/// Width of the longest distribution bar, in characters.
const BAR_WIDTH: usize = 40;

/// Bar characters of the package groups, in the group order.
const BAR_CHARACTERS: [char; 2] = ['█', '░'];

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

const fn priority_color(priority: u8) -> Color {
    match priority {
        3 => Color::Red,
        2 => Color::DarkYellow,
        _ => Color::Reset,
    }
}

pub fn build_packages_table(packages: &[Package]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Priority", "Age", "Weight"]);
    for (index, package) in packages.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index).add_attribute(Attribute::Dim).set_alignment(CellAlignment::Right),
            Cell::new(package.priority)
                .fg(priority_color(package.priority))
                .set_alignment(CellAlignment::Right),
            Cell::new(package.age).set_alignment(CellAlignment::Right),
            Cell::new(package.weight).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Package counts with the highest priority and the oldest orders in the upper left corner.
pub fn build_grid_table(grid: &ContingencyGrid) -> Table {
    let mut table = new_table();
    let mut header = vec![Cell::new("Priority \\ Age")];
    header.extend(ContingencyGrid::ages().map(|age| {
        Cell::new(format!("{age} d")).set_alignment(CellAlignment::Right)
    }));
    header.push(Cell::new("Total").set_alignment(CellAlignment::Right));
    table.set_header(header);

    for (priority, counts) in grid.rows() {
        let mut row = vec![Cell::new(priority).fg(priority_color(priority))];
        row.extend(counts.iter().map(|count| {
            let cell = Cell::new(count).set_alignment(CellAlignment::Right);
            if *count == 0 { cell.add_attribute(Attribute::Dim) } else { cell }
        }));
        row.push(
            Cell::new(counts.iter().sum::<usize>())
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Bold),
        );
        table.add_row(row);
    }
    table
}

pub fn build_summary_table(report: &Report) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "Shipped", "Limit"]);
    table.add_row(vec![
        Cell::new("Weight"),
        Cell::new(report.total_weight)
            .set_alignment(CellAlignment::Right)
            .fg(if report.is_within_weight_limit() { Color::Green } else { Color::Red }),
        Cell::new(report.limits.max_weight).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Num packages"),
        Cell::new(report.total_count)
            .set_alignment(CellAlignment::Right)
            .fg(if report.is_at_package_limit() { Color::Green } else { Color::Red }),
        Cell::new(report.limits.max_packages).set_alignment(CellAlignment::Right),
    ]);
    table
}

/// Per-bin counts of each group, followed by the stacked bar of all the groups.
pub fn build_histogram_table(histogram: &Histogram, group_names: &[&str]) -> Table {
    let mut table = new_table();
    let mut header = vec![Cell::new(histogram.attribute)];
    header.extend(
        group_names.iter().map(|name| Cell::new(name).set_alignment(CellAlignment::Right)),
    );
    header.push(Cell::new("Distribution"));
    table.set_header(header);

    let max_total = histogram.max_total();
    for bin in &histogram.bins {
        let mut row = vec![Cell::new(&bin.label)];
        row.extend(
            bin.counts.iter().map(|count| Cell::new(count).set_alignment(CellAlignment::Right)),
        );
        row.push(Cell::new(stacked_bar(&bin.counts, max_total)).fg(Color::Cyan));
        table.add_row(row);
    }
    table
}

/// Bar segments are scaled so that the largest bin total spans the full width.
fn stacked_bar(counts: &[usize], max_total: usize) -> String {
    if max_total == 0 {
        return String::new();
    }
    counts
        .iter()
        .zip(BAR_CHARACTERS.iter().cycle())
        .map(|(count, character)| {
            let length = (count * BAR_WIDTH).div_ceil(max_total);
            character.to_string().repeat(length)
        })
        .collect()
}
