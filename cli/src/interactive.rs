use std::io::{stdin, stdout, Write};

use anyhow::Result;
use core_cache::{
    bits::BitString,
    cache::{DirectMappedCache, Outcome},
};

use crate::render;

peg::parser!(grammar command() for str {
    rule bits() -> &'input str
        = $(quiet!{['0' | '1']+})
        / expected!("binary address")
    rule show_kind() -> ShowKind
        = "cache" { ShowKind::Cache }
        / "history" { ShowKind::History }
        / ("stats" / "stat" / "summary") { ShowKind::Stat }
        / ("config" / "cfg") { ShowKind::Config }
    pub(crate) rule parse_command() -> Command
        = _ "access" __ a:bits() _ { Command::Access(a.to_owned()) }
        / _ "seq" __ aa:(bits() ++ __) _ {
            Command::Sequence(aa.into_iter().map(str::to_owned).collect())
        }
        / _ "show" __ k:show_kind() _ { Command::Show(k) }
        / _ "reset" _ { Command::Reset }
        / _ "help" _ { Command::Help }
        / _ ("exit" / "quit") _ { Command::Exit }
        / expected!("command")

    rule ws() = quiet!{[' ' | '\t' | '\r' | '\n']}
        / expected!("whitespace")
    rule _() = ws()*
    rule __() = ws()+
});

pub(crate) enum Command {
    Access(String),
    Sequence(Vec<String>),
    Show(ShowKind),
    Reset,
    Help,
    Exit,
}

pub(crate) enum ShowKind {
    Cache,
    History,
    Stat,
    Config,
}

const HELP: &str = "\
commands:
  access <addr>        simulate one access, e.g. `access 10011`
  seq <addr> <addr>..  simulate a sequence in order
  show cache           per-line cache state
  show history         every access so far
  show stat            hit/miss counters and hit rate
  show config          the cache geometry
  reset                clear lines, history and counters
  exit                 leave interactive mode";

pub fn execute_interactive(cache: &mut DirectMappedCache) -> Result<()> {
    println!("entering interactive: {}", cache.config());
    println!("type \"help\" for commands.");
    loop {
        print!("cache> ");
        stdout().flush()?;
        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let parsed = match command::parse_command(&line) {
            Ok(p) => p,
            Err(e) => {
                println!("parse error: expected {}", e.expected);
                continue;
            }
        };
        match parsed {
            Command::Access(raw) => {
                if let Err(e) = submit(cache, &raw) {
                    println!("{e}");
                }
            }
            Command::Sequence(raw) => {
                let mut hits = 0;
                let mut misses = 0;
                for r in &raw {
                    match submit(cache, r) {
                        Ok(Outcome::Hit) => hits += 1,
                        Ok(Outcome::Miss) => misses += 1,
                        Err(e) => {
                            println!("{e}");
                            break;
                        }
                    }
                }
                println!("summary: {hits} HIT, {misses} MISS");
            }
            Command::Show(ShowKind::Cache) => {
                print!("{}", render::state_table(cache));
            }
            Command::Show(ShowKind::History) => {
                if cache.history().is_empty() {
                    println!("no accesses yet.");
                } else {
                    print!("{}", render::history_table(cache));
                }
            }
            Command::Show(ShowKind::Stat) => {
                println!("{}", cache.stats());
            }
            Command::Show(ShowKind::Config) => {
                println!("{}", cache.config());
            }
            Command::Reset => {
                cache.reset();
                println!("cache reset. ready for a new exercise.");
            }
            Command::Help => {
                println!("{HELP}");
            }
            Command::Exit => break,
        }
    }
    println!("exiting interactive.");
    Ok(())
}

/// Validates and pads the raw address, then runs it through the
/// engine, echoing the decomposition and outcome.
fn submit(cache: &mut DirectMappedCache, raw: &str) -> Result<Outcome> {
    let address_bits = cache.config().address_bits();
    let address = BitString::parse(raw)?;
    if address.len() < address_bits {
        println!("padded {raw} to {}", address.zero_extend(address_bits));
    }
    let outcome = cache.access(&address)?;
    if let Some(rec) = cache.history().last() {
        println!(
            "{}: index {} (line {}) | tag {} -> {} ({})",
            rec.address, rec.index, rec.index_value, rec.tag, rec.outcome, rec.action
        );
    }
    Ok(outcome)
}
