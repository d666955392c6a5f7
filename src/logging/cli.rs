//! Command-line logger
use super::{Event, LogError, Loggable, Logger};
use enum_map::{enum_map, EnumMap};
use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};
use yansi::Paint;

/// Logger that writes aggregated summaries to standard output.
///
/// Values are aggregated per name between displays; a summary is printed
/// whenever an event completes after `display_period` has elapsed, and a
/// final summary is flushed on drop.
#[derive(Debug)]
pub struct CLILogger {
    events: EnumMap<Event, EventLog>,

    display_period: Duration,
    last_display_time: Instant,
}

impl CLILogger {
    pub fn new(display_period: Duration) -> Self {
        Self {
            events: enum_map! { _ => EventLog::new() },
            display_period,
            last_display_time: Instant::now(),
        }
    }

    /// Display the summary and clear all stored data.
    pub fn display(&mut self) {
        for (event, event_log) in self.events.iter_mut() {
            if event_log.index == event_log.summary_start_index {
                continue;
            }
            println!(
                "==== {:?}s {} - {} ====",
                event,
                event_log.summary_start_index,
                event_log.index - 1
            );
            for (name, aggregator) in &mut event_log.aggregators {
                println!("{}: {}", Paint::fixed(35, name), aggregator);
                aggregator.clear();
            }
            event_log.summary_start_index = event_log.index;
        }
        self.last_display_time = Instant::now();
    }
}

impl Logger for CLILogger {
    fn log(&mut self, event: Event, name: &'static str, value: Loggable) -> Result<(), LogError> {
        let aggregators = &mut self.events[event].aggregators;
        if let Some(aggregator) = aggregators.get_mut(name) {
            aggregator
                .update(value)
                .map_err(|expected| LogError {
                    name,
                    value,
                    expected,
                })
        } else {
            aggregators.insert(name, Aggregator::new(value));
            Ok(())
        }
    }

    fn done(&mut self, event: Event) {
        self.events[event].index += 1;
        if self.last_display_time.elapsed() >= self.display_period {
            self.display();
        }
    }
}

impl Drop for CLILogger {
    fn drop(&mut self) {
        // Ensure everything is flushed.
        self.display();
    }
}

#[derive(Debug)]
struct EventLog {
    /// Global index for this event.
    index: u64,
    /// Value of `index` at the start of the current summary period.
    summary_start_index: u64,
    aggregators: BTreeMap<&'static str, Aggregator>,
}

impl EventLog {
    fn new() -> Self {
        Self {
            index: 0,
            summary_start_index: 0,
            aggregators: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
enum Aggregator {
    ScalarMean { sum: f64, count: u64 },
    IndexDistribution { counts: Vec<u64> },
}

impl Aggregator {
    fn new(value: Loggable) -> Self {
        match value {
            Loggable::Scalar(x) => Self::ScalarMean { sum: x, count: 1 },
            Loggable::IndexSample { value, size } => {
                let mut counts = vec![0; size];
                counts[value] += 1;
                Self::IndexDistribution { counts }
            }
        }
    }

    fn update(&mut self, value: Loggable) -> Result<(), &'static str> {
        match (self, value) {
            (Self::ScalarMean { sum, count }, Loggable::Scalar(x)) => {
                *sum += x;
                *count += 1;
                Ok(())
            }
            (Self::IndexDistribution { counts }, Loggable::IndexSample { value, size })
                if counts.len() == size =>
            {
                counts[value] += 1;
                Ok(())
            }
            (Self::ScalarMean { .. }, _) => Err("a scalar"),
            (Self::IndexDistribution { .. }, _) => Err("an index sample of matching size"),
        }
    }

    fn clear(&mut self) {
        match self {
            Self::ScalarMean { sum, count } => {
                *sum = 0.0;
                *count = 0;
            }
            Self::IndexDistribution { counts } => {
                for count in counts {
                    *count = 0;
                }
            }
        }
    }
}

impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ScalarMean { sum, count } => {
                if *count == 0 {
                    write!(f, "-")
                } else {
                    write!(f, "{:.3} (n = {})", sum / (*count as f64), count)
                }
            }
            Self::IndexDistribution { counts } => {
                let total: u64 = counts.iter().sum();
                write!(f, "{:?} (n = {})", counts, total)
            }
        }
    }
}
