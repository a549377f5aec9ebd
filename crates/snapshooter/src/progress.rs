use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use snapshooter_cloud::Progress;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Renders workflow steps as terminal spinners
#[derive(Default)]
pub struct SpinnerProgress {
    current: Mutex<Option<(ProgressBar, String)>>,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn current(&self) -> MutexGuard<'_, Option<(ProgressBar, String)>> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn finish(&self, mark: colored::ColoredString) {
        if let Some((pb, message)) = self.current().take() {
            pb.finish_and_clear();
            println!("{} {}", mark, message);
        }
    }
}

impl Progress for SpinnerProgress {
    fn start(&self, message: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));

        // a step that was never finished gets cleared
        if let Some((previous, _)) = self.current().replace((pb, message.to_string())) {
            previous.finish_and_clear();
        }
    }

    fn succeed(&self) {
        self.finish("✔".green().bold());
    }

    fn fail(&self) {
        self.finish("‼".red().bold());
    }

    fn println(&self, line: &str) {
        match self.current().as_ref() {
            Some((pb, _)) => pb.println(line),
            None => println!("{}", line),
        }
    }
}
