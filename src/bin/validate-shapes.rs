use std::path::Path;
use std::process;

use arrrg::CommandLine;
use arrrg_derive::CommandLine;
use shapeyard::cli_utils;
use shapeyard::{ShapeKind, ShapeReader, factory_for};

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Options {
    #[arrrg(flag, "Enable verbose output showing pass/fail for each record")]
    verbose: bool,
}

fn main() {
    let (options, free) = Options::from_command_line(
        "USAGE: validate-shapes [--verbose] <point|triangle|sphere> <file>...",
    );

    if free.len() < 2 {
        process::exit(1);
    }
    let kind: ShapeKind = match free[0].parse() {
        Ok(kind) => kind,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(cli_utils::log_filter("error"))
        .with_writer(std::io::stderr)
        .init();

    let factory = factory_for(kind);
    let mut all_valid = true;

    for path in &free[1..] {
        let path = Path::new(path);
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            if options.verbose {
                println!("{} fail", path.display());
            }
            all_valid = false;
            continue;
        };

        let report = match ShapeReader::new(dir).read_shapes_from_file(file_name, factory.as_ref()) {
            Ok(report) => report,
            Err(e) => {
                if options.verbose {
                    println!("{} fail: {}", path.display(), e);
                }
                all_valid = false;
                continue;
            }
        };

        if options.verbose {
            for shape in &report.shapes {
                println!("{}: {} pass", path.display(), shape.id());
            }
            for skipped in &report.skipped {
                println!("{}:{} fail: {}", path.display(), skipped.line, skipped.reason);
            }
        }
        if !report.is_clean() {
            all_valid = false;
        }
    }

    if all_valid {
        process::exit(0);
    } else {
        process::exit(1);
    }
}
