mod contracts;

use std::cell::Cell;
use std::fs::File;
use std::rc::Rc;

use cellgrid::{CellSnapshot, RowKey, Table};
use contracts::Contract;
use simplelog::{Config, LevelFilter, WriteLogger};

fn print_cells(label: &str, table: &Table<Contract>) {
    let columns = table.data_column_count().max(1);
    println!("== {label}: {} rows", table.rows().len());
    if let Some(model) = table.model() {
        println!("   template: {}", model.column_template);
    }
    for row in table.cells().chunks(columns).take(8) {
        let line: Vec<String> = row
            .iter()
            .map(|cell| {
                let pin = match (cell.sticky_left, cell.sticky_right) {
                    (true, true) => "<>",
                    (true, false) => "<",
                    (false, true) => ">",
                    (false, false) => "",
                };
                format!("[{}{}] {}", cell.track_key(), pin, cell.value)
            })
            .collect();
        println!("   {}", line.join(" | "));
    }
    if table.rows().len() > 8 {
        println!("   ...");
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let spec = contracts::configuration();
    let mut table: Table<Contract> = Table::new();

    let publishes = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&publishes);
    let _subscription = table.subscribe(move |cells: &CellSnapshot| {
        counter.set(counter.get() + 1);
        log::debug!("[demo] published {} cells", cells.len());
    });

    table.set_configuration(Some(Rc::clone(&spec)));
    table.set_data(contracts::load()?);
    table.check()?;
    print_cells("initial", &table);

    let mut generated = 0;
    table.update_rows(|rows| {
        for _ in 0..5 {
            generated += 1;
            rows.insert(0, Contract::generated(generated));
        }
    });
    table.check()?;
    print_cells("added 5", &table);

    let first = RowKey::from_value(&serde_json::json!("new-005"));
    table.toggle_selection(&first);
    table.toggle_expanded(&first);
    println!(
        "   selected: {:?}, expanded: {}",
        table.selected_keys().map(RowKey::as_str).collect::<Vec<_>>(),
        table.is_expanded(&first)
    );

    table.update_rows(|rows| {
        let n = rows.len().min(5);
        rows.drain(..n);
    });
    table.check()?;
    print_cells("removed 5", &table);
    println!("   selected after removal: {}", table.selected_keys().count());

    let sortable = spec
        .columns()
        .iter()
        .find_map(|c| c.sort_fn().map(|sort| (c, sort)));
    if let Some((column, sort)) = sortable {
        let sorted = sort(table.rows(), column.field());
        table.set_data(sorted);
        table.check()?;
        print_cells(&format!("sorted by {}", column.name()), &table);
    }

    println!("{} cell sequences published", publishes.get());
    Ok(())
}

fn main() {
    match File::create("cellgrid-demo.log") {
        Ok(log_file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file) {
                eprintln!("Error: failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Error: failed to create log file: {}", e),
    }

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
    }
}
