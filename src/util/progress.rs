use std::{
    io::{IsTerminal, stdout},
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use relup::sources::ProgressObserver;

const PROGRESS_BAR_TEMPLATE: &str =
    "{msg} [{bar:32.cyan/blue}] {bytes} / {total_bytes} ({percent:>3}%)";
const PROGRESS_BAR_CHARACTERS: &str = "▪▸-";

const NOTHING_PRINTED: u64 = u64::MAX;

/**
    Upload progress shown on stdout.

    In an interactive terminal this is a progress bar redrawn in place,
    otherwise plain lines are printed each time another whole percent is sent.
*/
#[derive(Clone)]
pub enum UploadProgress {
    Bar(ProgressBar),
    Plain(Arc<AtomicU64>),
}

impl UploadProgress {
    pub fn for_stdout() -> Self {
        if stdout().is_terminal() {
            Self::Bar(new_upload_progress_bar())
        } else {
            Self::Plain(Arc::new(AtomicU64::new(NOTHING_PRINTED)))
        }
    }

    pub fn finish(&self) {
        if let Self::Bar(pb) = self {
            pb.finish();
        }
    }

    pub fn finish_and_clear(&self) {
        if let Self::Bar(pb) = self {
            pb.finish_and_clear();
        }
    }
}

impl ProgressObserver for UploadProgress {
    fn on_progress(&self, current: u64, expected: u64) {
        match self {
            Self::Bar(pb) => {
                pb.set_length(expected);
                pb.set_position(current);
            }
            Self::Plain(last_percent) => {
                let percent = permille(current, expected) / 10;
                if last_percent.swap(percent, Ordering::Relaxed) != percent {
                    println!("{}", format_plain_progress(current, expected));
                }
            }
        }
    }
}

/*
    The length is set by the upload itself once the file size is known.
*/
fn new_upload_progress_bar() -> ProgressBar {
    ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout())
        .with_message("Uploading")
        .with_style(
            ProgressStyle::with_template(PROGRESS_BAR_TEMPLATE)
                .unwrap()
                .progress_chars(PROGRESS_BAR_CHARACTERS),
        )
}

fn permille(current: u64, expected: u64) -> u64 {
    if expected == 0 {
        return 1000;
    }
    let permille = u128::from(current) * 1000 / u128::from(expected);
    u64::try_from(permille).unwrap_or(1000).min(1000)
}

fn format_plain_progress(current: u64, expected: u64) -> String {
    let permille = permille(current, expected);
    format!(
        "{current} / {expected} ({:>3}.{}%)",
        permille / 10,
        permille % 10
    )
}
