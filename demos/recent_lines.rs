//! # Recent Lines Demo
//!
//! Keeps the last N lines read from stdin, like a tiny `tail`, and
//! counts how many older lines were pushed out along the way.
//!
//! Run with: `seq 1 25 | cargo run --example recent_lines -- 10`

use std::cell::Cell;
use std::io::{self, BufRead};
use std::rc::Rc;

use anyhow::Context;
use log::info;
use ringbuff::{Config, RingBuffer};

fn main() -> anyhow::Result<()> {
    ringbuff::init_logging();

    let capacity = match std::env::args().nth(1) {
        Some(raw) => Config::parse_capacity(&raw)?,
        None => ringbuff::config::DEFAULT_CAPACITY,
    };

    let config = Config {
        capacity,
        label: "recent-lines".to_string(),
    };
    let mut lines = RingBuffer::with_config(&config)?;

    let evicted = Rc::new(Cell::new(0u64));
    let counter = Rc::clone(&evicted);
    lines.set_evict_handler(move |_line: String| counter.set(counter.get() + 1));

    for line in io::stdin().lock().lines() {
        lines.add(line.context("failed to read stdin")?);
    }

    info!(
        "Kept {} of {} lines ({} evicted)",
        lines.len(),
        lines.len() as u64 + evicted.get(),
        evicted.get()
    );

    lines.for_each(|line| println!("{}", line));

    Ok(())
}
