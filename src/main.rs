#![warn(clippy::all)]

use std::io;
use std::io::Write;
use std::process;

use structopt::StructOpt;

use skcli::{Opt, Result};
use skcli_util::console::Console;

fn main() -> Result<()> {
    let opt = Opt::from_args();
    opt.init_tracing();
    let mut cnsl = Console::term();
    let is_error = opt.run(&mut io::stdout(), &mut cnsl).map_err(|err| {
        io::stdout().flush().expect("Could not flush stdout");
        eprintln!();
        err
    })?;
    if is_error {
        io::stdout().flush()?;
        process::exit(1);
    }
    Ok(())
}
