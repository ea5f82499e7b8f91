use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};

/// Progress over a batch of input files, drawn on stderr.
///
/// The bar stays hidden for a single file so that one-shot invocations print
/// nothing but their result.
#[derive(Clone)]
pub struct FileProgress {
    pb: ProgressBar,
}

impl FileProgress {
    pub fn new(total: usize) -> Self {
        let pb = ProgressBar::new(total as u64);
        if total > 1 {
            pb.set_draw_target(ProgressDrawTarget::stderr());
            pb.set_style(Self::bar_style());
            pb.set_message("Decoding");
        } else {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        Self { pb }
    }

    pub fn is_hidden(&self) -> bool {
        self.pb.is_hidden()
    }

    /// Marks one file as done. Safe to call from worker threads.
    pub fn file_done(&self) {
        self.pb.inc(1);
    }

    pub fn finish(&self) {
        self.pb.finish_with_message("Done");
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<12} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .with_key("eta", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
            })
            .progress_chars("##-")
    }

    #[cfg(test)]
    fn position(&self) -> u64 {
        self.pb.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn single_file_runs_without_a_visible_bar() {
        assert!(FileProgress::new(1).is_hidden());
    }

    #[test]
    fn increments_from_worker_threads_are_counted() {
        let progress = FileProgress::new(4);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let progress = progress.clone();
                thread::spawn(move || progress.file_done())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(progress.position(), 4);
        progress.finish();
        assert!(progress.pb.is_finished());
    }
}
