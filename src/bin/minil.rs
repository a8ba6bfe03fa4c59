// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use clap::{arg, Arg, ArgMatches, Command};
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
//
use minil::pipeline::{Compilation, Pipeline};
use minil::vm::{InputStream, Vm};

fn main() {
    // Parse command-line arguments
    let matches = Command::new("minil")
        .about("MiniLang compiler and virtual machine")
        .version("0.1.0")
        .arg(Arg::new("file").required(true).help("MiniLang source file"))
        .arg(arg!(--"no-opt" "Disable constant folding"))
        .arg(arg!(--run "Execute the compiled program on the VM"))
        .arg(
            Arg::new("inputs")
                .long("inputs")
                .takes_value(true)
                .multiple_values(true)
                .allow_hyphen_values(true)
                .help("Preloaded inputs for 'read'"),
        )
        .arg(
            Arg::new("emit")
                .long("emit")
                .takes_value(true)
                .possible_values(["tokens", "ast", "ir", "asm", "machine"])
                .help("Serialize one stage to stdout"),
        )
        .arg(arg!(--"emit-all" "Write every stage artifact to --out-dir"))
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .takes_value(true)
                .help("Directory for --emit-all artifacts"),
        )
        .arg(arg!(--"trace-ir" "Print the three-address code"))
        .arg(arg!(--"trace-asm" "Print the generated assembly"))
        .arg(arg!(--"trace-vm" "Print the VM execution trace"))
        .arg(arg!(--verbose "Show verbose output"))
        .get_matches();
    // Initialise logging
    if matches.is_present("verbose") {
        init_logging(LevelFilter::Info);
    }
    // Determine appropriate exit code
    let exitcode = match run(&matches) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("internal error: {}", e);
            2
        }
    };
    // Done
    std::process::exit(exitcode);
}

/// Compile (and optionally execute) the given file.  Returns `false`
/// when a compilation or runtime error was reported to the user.
fn run(matches: &ArgMatches) -> Result<bool, Box<dyn Error>> {
    // Read the source file
    let filename = matches.get_one::<String>("file").unwrap();
    let source = fs::read_to_string(filename)?;
    // Compile through every stage
    let pipeline = Pipeline::new(!matches.is_present("no-opt"));
    let compilation = match pipeline.compile(&source) {
        Ok(compilation) => compilation,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(false);
        }
    };
    // Report accumulated warnings; they never abort the pipeline.
    for warning in &compilation.warnings {
        eprintln!("warning: {}", warning);
    }
    // Stage dumps
    if let Some(stage) = matches.get_one::<String>("emit") {
        print!("{}", emit_stage(&compilation, stage));
    }
    if matches.is_present("emit-all") {
        let dir = matches
            .get_one::<String>("out-dir")
            .map(String::as_str)
            .unwrap_or(".");
        emit_all(&compilation, Path::new(dir))?;
    }
    if matches.is_present("trace-ir") {
        print!("{}", render_lines(&compilation.tac));
    }
    if matches.is_present("trace-asm") {
        print!("{}", render_lines(&compilation.asm.code));
    }
    // Execute on the VM
    if matches.is_present("run") || matches.is_present("trace-vm") {
        return execute(matches, &compilation);
    }
    //
    Ok(true)
}

/// Run the linked program on the VM, printing outputs line by line.
fn execute(matches: &ArgMatches, compilation: &Compilation) -> Result<bool, Box<dyn Error>> {
    // Inputs come preloaded from the command line, or interactively
    // from stdin.
    let inputs = match matches.get_many::<String>("inputs") {
        Some(values) => {
            let mut batch = Vec::new();
            for value in values {
                batch.push(value.parse::<i64>()?);
            }
            InputStream::batch(&batch)
        }
        None => InputStream::Interactive,
    };
    //
    let mut vm = Vm::new(&compilation.machine, inputs);
    if matches.is_present("trace-vm") {
        vm = vm.with_trace();
    }
    let result = vm.run();
    //
    if matches.is_present("trace-vm") {
        for record in vm.trace() {
            println!("{}", record);
        }
    }
    match result {
        Ok(()) => {
            for value in vm.outputs() {
                println!("{}", value);
            }
            Ok(true)
        }
        Err(e) => {
            eprintln!("{}", e);
            Ok(false)
        }
    }
}

/// Serialize one stage artifact.
fn emit_stage(compilation: &Compilation, stage: &str) -> String {
    match stage {
        "tokens" => render_lines(&compilation.tokens),
        "ast" => compilation.ast.to_string(),
        "ir" => render_lines(&compilation.tac),
        "asm" => render_lines(&compilation.asm.code),
        "machine" => compilation.machine.to_string(),
        // clap enforces the possible values
        _ => unreachable!(),
    }
}

/// Write every stage artifact into the given directory.
fn emit_all(compilation: &Compilation, dir: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join("tokens.txt"), render_lines(&compilation.tokens))?;
    fs::write(dir.join("ast.txt"), compilation.ast.to_string())?;
    fs::write(dir.join("ir.txt"), render_lines(&compilation.tac))?;
    fs::write(dir.join("asm.txt"), render_lines(&compilation.asm.code))?;
    fs::write(dir.join("machine.txt"), compilation.machine.to_string())?;
    Ok(())
}

fn render_lines<T: fmt::Display>(items: &[T]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&item.to_string());
        out.push('\n');
    }
    out
}

/// Initialise logging using a suitable pattern.
fn init_logging(level: LevelFilter) {
    let encoder = PatternEncoder::new("[{l}] {m}{n}");
    //
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(encoder))
        .build();
    //
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))
        .unwrap();
    //
    let _handle = log4rs::init_config(config).unwrap();
}
