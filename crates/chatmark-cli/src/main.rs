use anyhow::Result;
use chatmark_config::Config;
use chatmark_engine::{RenderOptions, Renderer};
use std::io::Read;
use std::{env, process};

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} [--no-autodetect] [--plain-diagrams] [input.md]");
    eprintln!("Reads Markdown from the file (or stdin) and writes HTML to stdout.");
    process::exit(1);
}

fn main() -> Result<()> {
    // Flags override the config file, which overrides defaults.
    let args: Vec<String> = env::args().collect();
    let mut options = RenderOptions::default();

    match Config::load() {
        Ok(Some(config)) => {
            if let Some(autodetect) = config.autodetect {
                options.autodetect = autodetect;
            }
            if let Some(diagrams) = config.diagrams {
                options.diagrams = diagrams;
            }
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    }

    let mut input_path = None;
    for arg in &args[1..] {
        match arg.as_str() {
            "--no-autodetect" => options.autodetect = false,
            "--plain-diagrams" => options.diagrams = false,
            "--help" | "-h" => usage(&args[0]),
            _ if arg.starts_with('-') => {
                eprintln!("Error: Unknown option '{arg}'");
                usage(&args[0]);
            }
            _ => {
                if input_path.replace(arg).is_some() {
                    usage(&args[0]);
                }
            }
        }
    }

    let markdown = match input_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let html = Renderer::new(options).render(&markdown);
    println!("{html}");
    Ok(())
}
