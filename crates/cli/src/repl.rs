// This code is part of star-route.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! An interactive REPL over a single loaded or generated [`Instance`],
//! mirroring the original solver's single-character command prompt.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use star_route_core::Problem;

use crate::error::CliResult;
use crate::instance::Instance;

const HELP: &str = "Press one of the following keys\n\
c: Close the solver\n\
e: Use the trivial solving algorithm\n\
h: Show help information\n\
m: Use the decomposition-based lower bound\n\
s: Save the problem\n\
l: Load the problem";

pub fn run(mut instance: Instance, save_path: PathBuf) -> CliResult<()> {
    println!("{HELP}");
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().ok();
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let Some(command) = line.trim().chars().next() else {
            continue;
        };

        match command {
            'c' => break,
            'h' => println!("{HELP}"),
            'e' => {
                let mut p = Problem::new(instance.k, instance.m, instance.x0.clone(), instance.identity_y())?;
                let start = Instant::now();
                p.route_simple()?;
                let elapsed = start.elapsed();
                println!(
                    "\trouteSimple\nd\t{}\n#s(a)\t{}\n#s(b)\t{}\n#s\t{}\ntime\t{} ms",
                    p.depth(),
                    p.ns() - p.nsb(),
                    p.nsb(),
                    p.ns(),
                    elapsed.as_millis()
                );
            }
            'm' => {
                let mut p = Problem::new(instance.k, instance.m, instance.x0.clone(), instance.identity_y())?;
                let start = Instant::now();
                let beta = p.get_decomp()?;
                let elapsed = start.elapsed();
                println!("\tdecomposition\nbeta (lower bound on #s(b))\t{beta}\ntime\t{} ms", elapsed.as_millis());
            }
            's' => {
                instance.save(&save_path)?;
            }
            'l' => {
                instance = Instance::load(&save_path)?;
                println!("> Problem loaded: k = {}, m = {}", instance.k, instance.m);
            }
            other => println!("! Unknown command: {other}"),
        }
    }

    Ok(())
}

impl From<io::Error> for crate::error::CliError {
    fn from(source: io::Error) -> Self {
        crate::error::CliError::Open {
            path: PathBuf::from("<stdin>"),
            source,
        }
    }
}
