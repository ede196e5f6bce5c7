use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};

use crate::error::LoadError;

/// Results of one batch of files, collected until every file has reported.
/// Successful entries keep the order the files were submitted in.
#[derive(Debug)]
pub struct PendingBatch<T> {
    id: u64,
    paths: Vec<PathBuf>,
    slots: Vec<Option<T>>,
    reported: Vec<bool>,
    completed: usize,
    failures: Vec<LoadError>,
}

impl<T> PendingBatch<T> {
    pub fn new(id: u64, paths: Vec<PathBuf>) -> Self {
        let expected = paths.len();
        Self {
            id,
            paths,
            slots: (0..expected).map(|_| None).collect(),
            reported: vec![false; expected],
            completed: 0,
            failures: Vec::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn expected(&self) -> usize {
        self.paths.len()
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.expected()
    }

    /// Records the outcome for the file at `position`. A position that was
    /// already reported (or is out of range) is ignored.
    pub fn resolve(&mut self, position: usize, result: Result<T, LoadError>) -> bool {
        match self.reported.get_mut(position) {
            Some(reported) if !*reported => *reported = true,
            _ => return false,
        }
        self.completed += 1;
        match result {
            Ok(value) => self.slots[position] = Some(value),
            Err(e) => self.failures.push(e),
        }
        true
    }

    /// Marks every file that has not reported yet as interrupted.
    pub fn abandon(&mut self) {
        for position in 0..self.expected() {
            if !self.reported[position] {
                let path = self.paths[position].clone();
                self.resolve(position, Err(LoadError::Interrupted { path }));
            }
        }
    }

    /// Splits a finished batch into its entries and its failures.
    pub fn finish(self) -> (Vec<T>, Vec<LoadError>) {
        let entries = self.slots.into_iter().flatten().collect();
        (entries, self.failures)
    }
}

/// A batch whose files have all reported.
#[derive(Debug)]
pub struct CompletedBatch<T> {
    pub id: u64,
    pub entries: Vec<T>,
    pub failures: Vec<LoadError>,
}

enum Message<T> {
    Loaded {
        batch: u64,
        position: usize,
        result: Result<T, LoadError>,
    },
}

struct InFlight<T> {
    batch: PendingBatch<T>,
    worker: Option<JoinHandle<()>>,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

pub type Decoder<T> = fn(&Path) -> Result<T, LoadError>;

/// Decodes batches of files on worker threads. The owner polls once per
/// frame and receives each batch only when all of its files are done.
pub struct BatchLoader<T> {
    decoder: Decoder<T>,
    sender: Sender<Message<T>>,
    receiver: Receiver<Message<T>>,
    in_flight: Vec<InFlight<T>>,
    next_id: u64,
}

impl<T: Send + 'static> BatchLoader<T> {
    pub fn new(decoder: Decoder<T>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            decoder,
            sender,
            receiver,
            in_flight: Vec::new(),
            next_id: 0,
        }
    }

    /// Starts decoding `paths` in the background. Empty batches are ignored.
    pub fn submit(&mut self, paths: Vec<PathBuf>) -> Option<u64> {
        if paths.is_empty() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        info!("Loading batch {} ({} files)", id, paths.len());

        let worker = thread::spawn({
            let tx = self.sender.clone();
            let decoder = self.decoder;
            let paths = paths.clone();
            move || {
                for (position, path) in paths.iter().enumerate() {
                    let result = decoder(path);
                    let message = Message::Loaded { batch: id, position, result };
                    if tx.send(message).is_err() {
                        // Loader was dropped, nobody is waiting for the rest
                        return;
                    }
                }
            }
        });

        self.in_flight.push(InFlight {
            batch: PendingBatch::new(id, paths),
            worker: Some(worker),
        });
        Some(id)
    }

    /// (files done, files submitted) over every batch still in flight.
    pub fn progress(&self) -> (usize, usize) {
        self.in_flight.iter().fold((0, 0), |(done, total), f| {
            (done + f.batch.completed(), total + f.batch.expected())
        })
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Collects results that arrived since the last poll and hands back
    /// every batch that is now complete, in completion order.
    pub fn poll(&mut self) -> Vec<CompletedBatch<T>> {
        // Check for dead workers before draining so their last messages are counted
        let exited: Vec<u64> = self
            .in_flight
            .iter()
            .filter(|f| f.worker.as_ref().is_some_and(|w| w.is_finished()))
            .map(|f| f.batch.id())
            .collect();

        while let Ok(Message::Loaded { batch, position, result }) = self.receiver.try_recv() {
            if let Some(f) = self.in_flight.iter_mut().find(|f| f.batch.id() == batch) {
                f.batch.resolve(position, result);
            }
        }

        for f in self.in_flight.iter_mut() {
            if exited.contains(&f.batch.id()) {
                if let Some(worker) = f.worker.take() {
                    if let Err(payload) = worker.join() {
                        warn!("worker for batch {} panicked: {}", f.batch.id(), panic_message(payload.as_ref()));
                    }
                }
                if !f.batch.is_complete() {
                    debug!("worker for batch {} exited early", f.batch.id());
                    f.batch.abandon();
                }
            }
        }

        let mut completed = Vec::new();
        let mut i = 0;
        while i < self.in_flight.len() {
            if self.in_flight[i].batch.is_complete() {
                let f = self.in_flight.remove(i);
                let id = f.batch.id();
                let (entries, failures) = f.batch.finish();
                completed.push(CompletedBatch { id, entries, failures });
            } else {
                i += 1;
            }
        }
        completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn fake_decoder(path: &Path) -> Result<String, LoadError> {
        let name = path.to_string_lossy().into_owned();
        if name.contains("slow") {
            thread::sleep(Duration::from_millis(50));
        }
        if name.contains("boom") {
            panic!("decoder blew up on {}", name);
        }
        if name.contains("bad") {
            return Err(LoadError::Texture {
                path: path.to_path_buf(),
                reason: "fake".into(),
            });
        }
        Ok(name)
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    fn wait_for(loader: &mut BatchLoader<String>) -> Vec<CompletedBatch<String>> {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            let done = loader.poll();
            if !done.is_empty() || Instant::now() > deadline {
                return done;
            }
            thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn out_of_order_results_keep_submission_order() {
        let mut batch = PendingBatch::new(0, paths(&["a", "b", "c"]));
        assert!(batch.resolve(2, Ok("c")));
        assert!(batch.resolve(0, Ok("a")));
        assert!(!batch.is_complete());
        assert!(batch.resolve(1, Ok("b")));
        assert!(batch.is_complete());
        let (entries, failures) = batch.finish();
        assert_eq!(entries, vec!["a", "b", "c"]);
        assert!(failures.is_empty());
    }

    #[test]
    fn failures_count_toward_completion() {
        let mut batch = PendingBatch::<&str>::new(0, paths(&["a", "b"]));
        batch.resolve(1, Err(LoadError::Interrupted { path: "b".into() }));
        batch.resolve(0, Ok("a"));
        assert!(batch.is_complete());
        let (entries, failures) = batch.finish();
        assert_eq!(entries, vec!["a"]);
        assert_eq!(failures.len(), 1);
    }

    #[test]
    fn duplicate_or_unknown_positions_are_ignored() {
        let mut batch = PendingBatch::new(0, paths(&["a", "b"]));
        assert!(batch.resolve(0, Ok(1)));
        assert!(!batch.resolve(0, Ok(2)));
        assert!(!batch.resolve(9, Ok(3)));
        assert_eq!(batch.completed(), 1);
    }

    #[test]
    fn abandon_completes_with_interrupted_files() {
        let mut batch = PendingBatch::new(0, paths(&["a", "b", "c"]));
        batch.resolve(1, Ok(1));
        batch.abandon();
        assert!(batch.is_complete());
        let (entries, failures) = batch.finish();
        assert_eq!(entries, vec![1]);
        assert!(failures.iter().all(|e| matches!(e, LoadError::Interrupted { .. })));
        assert_eq!(failures.len(), 2);
    }

    #[test]
    fn loader_delivers_whole_batch_at_once() {
        let mut loader = BatchLoader::new(fake_decoder as Decoder<String>);
        loader.submit(paths(&["one", "slow-two", "three", "slow-four"]));

        let deadline = Instant::now() + Duration::from_secs(10);
        let batch = loop {
            let mut done = loader.poll();
            if let Some(batch) = done.pop() {
                break batch;
            }
            assert!(Instant::now() < deadline, "batch never completed");
            thread::sleep(Duration::from_millis(1));
        };
        assert_eq!(batch.entries, vec!["one", "slow-two", "three", "slow-four"]);
        assert!(loader.is_idle());
    }

    #[test]
    fn failed_files_are_reported_not_appended() {
        let mut loader = BatchLoader::new(fake_decoder as Decoder<String>);
        loader.submit(paths(&["good", "bad", "fine"]));
        let done = wait_for(&mut loader);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].entries, vec!["good", "fine"]);
        assert_eq!(done[0].failures.len(), 1);
        assert_eq!(done[0].failures[0].file_name(), "bad");
    }

    #[test]
    fn empty_submission_is_ignored() {
        let mut loader = BatchLoader::new(fake_decoder as Decoder<String>);
        assert_eq!(loader.submit(Vec::new()), None);
        assert!(loader.is_idle());
        assert_eq!(loader.progress(), (0, 0));
    }

    #[test]
    fn panicking_worker_interrupts_the_rest_of_its_batch() {
        let mut loader = BatchLoader::new(fake_decoder as Decoder<String>);
        loader.submit(paths(&["ok", "boom", "after"]));
        let done = wait_for(&mut loader);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].entries, vec!["ok"]);
        assert_eq!(done[0].failures.len(), 2);
        assert!(done[0].failures.iter().all(|e| matches!(e, LoadError::Interrupted { .. })));
        assert!(loader.is_idle());
    }

    #[test]
    fn panic_messages_are_readable() {
        let payload: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(payload.as_ref()), "static message");
        let payload: Box<dyn Any + Send> = Box::new(String::from("formatted 7"));
        assert_eq!(panic_message(payload.as_ref()), "formatted 7");
        let payload: Box<dyn Any + Send> = Box::new(7u32);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
