//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every screen.

use comfy_table::{ContentArrangement, Table};
use console::style;

/// Width of the `=====` banner lines around screen titles.
const BANNER_WIDTH: usize = 50;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a screen title framed by banner lines.
pub fn banner(title: &str) {
    let line = "=".repeat(BANNER_WIDTH);
    println!("{line}");
    println!("{}", style(title).bold());
    println!("{line}");
}

/// Print a table summarizing the store without revealing any secret.
///
/// `lowest`/`highest` are `None` when the store is empty.
pub fn print_summary(count: usize, lowest: Option<i64>, highest: Option<i64>) {
    if count == 0 {
        info("No messages stored.");
        tip("Choose \"Create a new message\" to add one.");
        return;
    }

    let fmt_id = |id: Option<i64>| id.map_or_else(|| "-".to_string(), |v| v.to_string());

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Messages", "Lowest UID", "Highest UID"]);
    table.add_row(vec![count.to_string(), fmt_id(lowest), fmt_id(highest)]);

    println!("{table}");
}
