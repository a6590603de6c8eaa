use crate::route::RouteDescriptor;
use std::fmt;

/// Why a candidate route was left out of the output.
#[derive(Debug, Clone)]
pub enum SkipReason {
    ExcludedByFilter,
    /// `@hideFromAPIDocumentation` tag present.
    Hidden,
    UnresolvableHandler,
    /// A strategy failed; the reason string is surfaced verbatim.
    Strategy(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ExcludedByFilter => f.write_str("excluded by filter"),
            SkipReason::Hidden => f.write_str("@hideFromAPIDocumentation tag present"),
            SkipReason::UnresolvableHandler => f.write_str("unresolvable handler"),
            SkipReason::Strategy(reason) => f.write_str(reason),
        }
    }
}

/// One process-log line. The rendered form is an operator-facing contract
/// scraped by tooling, reproduced verbatim:
/// `Processed route: [<METHOD,...>] <path>` or
/// `Skipping route: [<METHOD,...>] <path>` with an optional reason suffix.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub processed: bool,
    pub methods: String,
    pub path: String,
    pub reason: Option<SkipReason>,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.processed {
            write!(f, "Processed route: {} {}", self.methods, self.path)
        } else {
            write!(f, "Skipping route: {} {}", self.methods, self.path)?;
            if let Some(reason) = &self.reason {
                write!(f, ": {reason}")?;
            }
            Ok(())
        }
    }
}

/// Append-only run log, owned exclusively by the pipeline driver. Each
/// entry is echoed to stdout as it is recorded.
#[derive(Debug, Default)]
pub struct ProcessLog {
    entries: Vec<LogEntry>,
}

impl ProcessLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn processed(&mut self, route: &RouteDescriptor) {
        self.record(LogEntry {
            processed: true,
            methods: route.method_label(),
            path: route.uri.clone(),
            reason: None,
        });
    }

    pub fn skipped(&mut self, route: &RouteDescriptor, reason: SkipReason) {
        self.record(LogEntry {
            processed: false,
            methods: route.method_label(),
            path: route.uri.clone(),
            reason: Some(reason),
        });
    }

    fn record(&mut self, entry: LogEntry) {
        println!("{entry}");
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn processed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.processed).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.entries.len() - self.processed_count()
    }

    /// The full log as one string, one line per entry, for assertions and
    /// scraping.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
