// src/progress.rs
/// Lightweight progress reporting for the fetch phase.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of categories to fetch.
    fn begin(&mut self, _total: usize) {}

    /// Called when one category has been fetched.
    fn item_done(&mut self, _category: &str, _hits: usize) {}

    /// Called at the end of the fetch.
    fn finish(&mut self) {}
}

/// Reports fetch progress to the log.
#[derive(Default)]
pub struct LogProgress {
    total: usize,
    done: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn item_done(&mut self, category: &str, hits: usize) {
        self.done += 1;
        logf!("[{}/{}] {category} ({hits} hits)", self.done, self.total);
    }

    fn finish(&mut self) {
        logd!("fetch finished: {}/{} categories", self.done, self.total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_categories_and_resets_on_begin() {
        let mut p = LogProgress::default();
        p.begin(4);
        p.item_done("wine", 10);
        p.item_done("beer", 0);
        p.finish();
        assert_eq!((p.done, p.total), (2, 4));

        p.begin(1);
        assert_eq!((p.done, p.total), (0, 1));
    }
}
