use std::io::{self, Write};
use turma_schedule::report::filter_class;
use turma_schedule::{
    AppConfig, ModuleInput, ScheduleRegistry, format_date, load_modules_from_csv, logging,
    parse_date, render_text_table, schedules_dataframe,
};

fn print_help() {
    println!(
        "Commands:\n  help                                         Show this help\n  show [class]                                 Show computed schedules\n  add <class> <module> <weeks> [dd/mm/yyyy]    Append a module to a class\n  import <class> <csv_path>                    Append modules from a CSV file\n  summary <class>                              One-line summary of a class\n  holidays                                     List holiday dates\n  quit|exit                                    Exit"
    );
}

fn print_schedules(registry: &ScheduleRegistry, class_name: Option<&str>) {
    let table = schedules_dataframe(registry).and_then(|df| match class_name {
        Some(name) => filter_class(&df, name),
        None => Ok(df),
    });
    match table {
        Ok(df) if df.height() == 0 => println!("No scheduled modules."),
        Ok(df) => println!("{}", render_text_table(&df)),
        Err(e) => println!("Error building table: {}", e),
    }
}

fn print_holidays(registry: &ScheduleRegistry) {
    let holidays = registry
        .calendar()
        .holidays()
        .into_iter()
        .map(format_date)
        .collect::<Vec<_>>()
        .join(", ");
    println!("Holidays: {}", holidays);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    logging::init(config.log_verbosity);
    let mut registry = ScheduleRegistry::new(config.load_calendar()?);

    println!("Turma Schedule (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => print_schedules(&registry, parts.next()),
            "holidays" => print_holidays(&registry),
            "add" => {
                let class_s = parts.next();
                let module_s = parts.next();
                let weeks_s = parts.next();
                let date_s = parts.next();
                match (class_s, module_s, weeks_s) {
                    (Some(class_name), Some(module_name), Some(weeks_s)) => {
                        let weeks: u32 = match weeks_s.parse() {
                            Ok(v) => v,
                            Err(_) => {
                                println!("Invalid weeks");
                                continue;
                            }
                        };
                        if let Some(date_s) = date_s {
                            if parse_date(date_s).is_err() {
                                println!(
                                    "Start date '{}' is not dd/mm/yyyy; treating it as absent.",
                                    date_s
                                );
                            }
                        }
                        let outcome = registry.add_modules_to_class(
                            class_name,
                            vec![ModuleInput::new(module_name, date_s, weeks)],
                        );
                        println!("{}.", outcome.notice());
                    }
                    _ => println!("Usage: add <class> <module> <weeks> [dd/mm/yyyy]"),
                }
            }
            "import" => match (parts.next(), parts.next()) {
                (Some(class_name), Some(path)) => match load_modules_from_csv(path) {
                    Ok(modules) => {
                        let outcome = registry.add_modules_to_class(class_name, modules);
                        println!("{}. Imported {} module(s).", outcome.notice(), outcome.added);
                    }
                    Err(e) => println!("Import error: {}", e),
                },
                _ => println!("Usage: import <class> <csv_path>"),
            },
            "summary" => match parts.next() {
                Some(class_name) => match registry.class_summary(class_name) {
                    Some(summary) => println!("{}: {}", class_name, summary.to_cli_summary()),
                    None => println!("Class {} not found.", class_name),
                },
                None => println!("Usage: summary <class>"),
            },
            _ => println!("Unknown command. Type 'help'."),
        }
    }
    Ok(())
}
