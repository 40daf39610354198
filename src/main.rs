use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use measure_time::debug_time;
use tracing_subscriber::EnvFilter;

use word_htable::primes::next_prime;
use word_htable::words::Words;
use word_htable::{HashTable, StrHashTable};

mod cli;

use cli::{CliError, Options, USAGE};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let result = Options::try_parse()
        .map_err(CliError::from)
        .and_then(|options| {
            if options.help {
                print!("{}", USAGE);
                Ok(())
            } else {
                run(&options)
            }
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.to_string().trim_end());
            if e.is_usage() {
                eprintln!("Try 'word_htable -h' for more information.");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> Result<(), CliError> {
    let capacity = next_prime(options.table_size).ok_or(CliError::TableSize(options.table_size))?;
    // Open the dictionary before touching stdin so a bad path fails without output
    let check_file = match &options.check_file {
        Some(path) => Some(File::open(path).map_err(|source| CliError::Dictionary {
            path: path.clone(),
            source,
        })?),
        None => None,
    };

    let mut table = StrHashTable::new(capacity, options.method())?;
    let fill_time = fill(&mut table, io::stdin().lock())?;

    if options.entire_table {
        let mut out = String::new();
        table.print_entire_table(&mut out)?;
        io::stderr().write_all(out.as_bytes())?;
    }

    let mut stdout = BufWriter::new(io::stdout().lock());
    if let Some(file) = check_file {
        let (search_time, unknown) = spell_check(&table, BufReader::new(file), &mut stdout)?;
        stdout.flush()?;
        eprintln!("Fill time     : {:.6}", fill_time.as_secs_f64());
        eprintln!("Search time   : {:.6}", search_time.as_secs_f64());
        eprintln!("Unknown words = {}", unknown);
        return Ok(());
    }

    let mut out = String::new();
    if options.print_stats {
        table.print_stats(&mut out, options.snapshots)?;
    } else {
        table.print_all(&mut out)?;
    }
    stdout.write_all(out.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Inserts every word of `reader`, returning how long it took
fn fill<R: Read>(table: &mut StrHashTable, reader: R) -> Result<Duration, CliError> {
    debug_time!("Filling table of {} slots", table.capacity());
    let start = Instant::now();
    for word in Words::new(reader) {
        table.insert(word?.as_str())?;
    }
    Ok(start.elapsed())
}

/// Writes every word of `reader` missing from `table`, returning the time taken and the number of misses
fn spell_check<R: Read, W: Write>(
    table: &StrHashTable,
    reader: R,
    out: &mut W,
) -> Result<(Duration, usize), CliError> {
    debug_time!("Checking words against {} entries", table.len());
    let start = Instant::now();
    let mut unknown = 0;
    for word in Words::new(reader) {
        let word = word?;
        if table.search(word.as_str()) == 0 {
            writeln!(out, "{}", word)?;
            unknown += 1;
        }
    }
    Ok((start.elapsed(), unknown))
}
