// src/progress.rs
/// Lightweight progress reporting for the long-running crawl.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of politicians to crawl.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One politician's trades were collected.
    fn item_done(&mut self, _id: &str, _name: &str) {}

    /// One politician was skipped; the batch continues.
    fn item_failed(&mut self, _id: &str, _msg: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Prints one status line per politician on stderr, leaving stdout to the
/// final confirmation lines.
#[derive(Default)]
pub struct ConsoleProgress {
    total: usize,
    seen: usize,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Crawling trades for {total} politician(s)");
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, id: &str, name: &str) {
        self.seen += 1;
        eprintln!("[{}/{}] {id} {name}", self.seen, self.total);
    }

    fn item_failed(&mut self, id: &str, msg: &str) {
        self.seen += 1;
        eprintln!("[{}/{}] {id} skipped: {msg}", self.seen, self.total);
    }
}
