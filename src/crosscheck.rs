//! Randomized crosscheck
//!
//! Generates random "rho" lists with a known cycle position and checks that
//! the Floyd detector, its shape analysis, and the petgraph SCC answer all
//! agree with it.

use eyre::{eyre, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::list::{format_path, reference_entry, CycleDetector, ListArena, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrosscheckReport {
    pub trials: usize,
    pub cyclic: usize,
    pub acyclic: usize,
    pub seed: u64,
}

pub struct Crosscheck {
    trials: usize,
    max_len: usize,
    seed: u64,
    show_progress: bool,
}

impl Crosscheck {
    /// `seed: None` picks a random seed (reported back for reproduction).
    /// Random seeds stay within i64::MAX so they paste into TOML as integers.
    pub fn new(trials: usize, max_len: usize, seed: Option<u64>) -> Self {
        Self {
            trials,
            max_len,
            seed: seed.unwrap_or_else(|| rand::thread_rng().gen_range(0..=i64::MAX as u64)),
            show_progress: true,
        }
    }

    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn run(&self) -> Result<CrosscheckReport> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut report = CrosscheckReport {
            trials: 0,
            cyclic: 0,
            acyclic: 0,
            seed: self.seed,
        };

        let progress = if self.show_progress {
            let bar = ProgressBar::new(self.trials as u64);
            bar.set_style(
                ProgressStyle::with_template("{spinner} [{bar:40.cyan/blue}] {pos}/{len} lists")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=> "),
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        info!(trials = self.trials, max_len = self.max_len, seed = self.seed, "Starting crosscheck");

        for trial in 0..self.trials {
            let len = rng.gen_range(0..=self.max_len);
            let values: Vec<i64> = (0..len).map(|_| rng.gen_range(-1_000..1_000)).collect();
            let pos = if len > 0 && rng.gen_bool(0.5) {
                Some(rng.gen_range(0..len))
            } else {
                None
            };

            let (list, head) = ListArena::from_values_with_pos(&values, pos)?;
            self.check_one(trial, &list, head, pos)?;

            report.trials += 1;
            if pos.is_some() {
                report.cyclic += 1;
            } else {
                report.acyclic += 1;
            }
            progress.inc(1);
        }

        progress.finish_and_clear();
        info!(
            cyclic = report.cyclic,
            acyclic = report.acyclic,
            "Crosscheck passed"
        );

        Ok(report)
    }

    fn check_one(
        &self,
        trial: usize,
        list: &ListArena,
        head: Option<NodeId>,
        pos: Option<usize>,
    ) -> Result<()> {
        let detector = CycleDetector::new(list);
        let expected = pos.map(NodeId);
        let found = detector.detect(head);
        let oracle = reference_entry(list, head);

        if found != expected || oracle != expected {
            return Err(eyre!(
                "trial {} (seed {}): expected {:?}, floyd {:?}, scc {:?} for {}",
                trial,
                self.seed,
                expected,
                found,
                oracle,
                format_path(list, head)
            ));
        }

        if let (Some(info), Some(p)) = (detector.analyze(head), pos) {
            if info.tail_len != p || info.cycle_len != list.len() - p {
                return Err(eyre!(
                    "trial {} (seed {}): shape mismatch, got tail {} loop {}, expected tail {} loop {}",
                    trial,
                    self.seed,
                    info.tail_len,
                    info.cycle_len,
                    p,
                    list.len() - p
                ));
            }
        }

        debug!(trial, len = list.len(), ?pos, "ok");
        Ok(())
    }
}
