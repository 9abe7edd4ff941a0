//! Scripted collaborators shared by the integration tests
//!
//! `FakeFs` answers `file_size` from per-path scripts that `FakeAutomation`
//! installs when a publish is triggered, so each test describes how the
//! output file evolves tick by tick.

#![allow(dead_code)]

use async_trait::async_trait;
use onexport::adapters::{ArtifactFilesystem, NotebookAutomation, OpenedHandle};
use onexport::domain::{
    AutomationError, ExportJob, LocationHint, NotebookId, NotebookInfo, OnexportError,
    OutputKind, Result, VersionInfo,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Something a collaborator was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    CreateDir(PathBuf),
    Remove(PathBuf),
    Open(String),
    Publish(String, PathBuf, i32),
    Poll(PathBuf),
}

/// Event log shared by the fakes
pub type EventLog = Arc<Mutex<Vec<Event>>>;

pub fn events(log: &EventLog) -> Vec<Event> {
    log.lock().unwrap().clone()
}

pub fn position(log: &[Event], wanted: &Event) -> Option<usize> {
    log.iter().position(|e| e == wanted)
}

pub fn last_position(log: &[Event], wanted: &Event) -> Option<usize> {
    log.iter().rposition(|e| e == wanted)
}

pub fn count(log: &[Event], matches: impl Fn(&Event) -> bool) -> usize {
    log.iter().filter(|e| matches(e)).count()
}

#[derive(Default)]
struct FsState {
    files: HashMap<PathBuf, u64>,
    scripts: HashMap<PathBuf, VecDeque<Option<u64>>>,
    failing_polls: HashMap<PathBuf, HashSet<u32>>,
    poll_counts: HashMap<PathBuf, u32>,
    fail_create_dir: bool,
    fail_remove: bool,
}

/// In-memory filesystem driven by scripts
pub struct FakeFs {
    state: Mutex<FsState>,
    log: EventLog,
}

impl FakeFs {
    pub fn new(log: EventLog) -> Self {
        Self {
            state: Mutex::new(FsState::default()),
            log,
        }
    }

    /// Put a file on disk before the run starts
    pub fn put_file(&self, path: impl Into<PathBuf>, size: u64) {
        self.state.lock().unwrap().files.insert(path.into(), size);
    }

    pub fn file(&self, path: &Path) -> Option<u64> {
        self.state.lock().unwrap().files.get(path).copied()
    }

    /// Script the sizes observed at `path`, one entry per poll
    ///
    /// `None` means "whatever is on disk". The last entry repeats forever.
    pub fn script(&self, path: impl Into<PathBuf>, sizes: Vec<Option<u64>>) {
        let path = path.into();
        let mut state = self.state.lock().unwrap();
        state.poll_counts.remove(&path);
        state.scripts.insert(path, sizes.into_iter().collect());
    }

    /// Make the given polls of `path` (1-based, counted from the publish) fail
    ///
    /// A failing poll does not consume a script entry.
    pub fn fail_polls(&self, path: impl Into<PathBuf>, ticks: &[u32]) {
        self.state
            .lock()
            .unwrap()
            .failing_polls
            .insert(path.into(), ticks.iter().copied().collect());
    }

    pub fn fail_create_dir(&self) {
        self.state.lock().unwrap().fail_create_dir = true;
    }

    pub fn fail_remove(&self) {
        self.state.lock().unwrap().fail_remove = true;
    }
}

#[async_trait]
impl ArtifactFilesystem for FakeFs {
    async fn file_size(&self, path: &Path) -> Result<Option<u64>> {
        let mut state = self.state.lock().unwrap();

        if state.scripts.contains_key(path) {
            let poll = state.poll_counts.entry(path.to_path_buf()).or_insert(0);
            *poll += 1;
            let poll = *poll;
            if state
                .failing_polls
                .get(path)
                .is_some_and(|ticks| ticks.contains(&poll))
            {
                self.log.lock().unwrap().push(Event::Poll(path.to_path_buf()));
                return Err(OnexportError::Io("access denied".to_string()));
            }
        }

        let scripted = match state.scripts.get_mut(path) {
            Some(queue) if queue.len() > 1 => queue.pop_front().flatten(),
            Some(queue) => queue.front().copied().flatten(),
            None => None,
        };

        if let Some(size) = scripted {
            state.files.insert(path.to_path_buf(), size);
        }

        // Only polls after a publish count as polls
        if state.scripts.contains_key(path) {
            self.log.lock().unwrap().push(Event::Poll(path.to_path_buf()));
        }

        Ok(state.files.get(path).copied())
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        self.log.lock().unwrap().push(Event::Remove(path.to_path_buf()));
        let mut state = self.state.lock().unwrap();
        if state.fail_remove {
            return Err(OnexportError::Io("file is locked".to_string()));
        }
        state.files.remove(path);
        Ok(())
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(Event::CreateDir(path.to_path_buf()));
        if self.state.lock().unwrap().fail_create_dir {
            return Err(OnexportError::Io("access denied".to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
struct AutomationState {
    scripts: HashMap<String, Vec<Option<u64>>>,
    open_failures: HashMap<String, (u32, String)>,
    publish_failures: HashMap<String, (u32, String)>,
}

/// Automation bridge that records calls and installs file scripts on publish
pub struct FakeAutomation {
    fs: Arc<FakeFs>,
    log: EventLog,
    state: Mutex<AutomationState>,
    notebooks: Vec<NotebookInfo>,
}

impl FakeAutomation {
    pub fn new(fs: Arc<FakeFs>, log: EventLog) -> Self {
        Self {
            fs,
            log,
            state: Mutex::new(AutomationState::default()),
            notebooks: Vec::new(),
        }
    }

    /// How the output of notebook `name` evolves once published
    pub fn on_publish(&self, name: &str, sizes: Vec<Option<u64>>) {
        self.state
            .lock()
            .unwrap()
            .scripts
            .insert(name.to_string(), sizes);
    }

    /// Make the next `times` opens of `name` fail
    pub fn fail_open(&self, name: &str, times: u32, message: &str) {
        self.state
            .lock()
            .unwrap()
            .open_failures
            .insert(name.to_string(), (times, message.to_string()));
    }

    /// Make the next `times` publishes of `name` fail
    pub fn fail_publish(&self, name: &str, times: u32, message: &str) {
        self.state
            .lock()
            .unwrap()
            .publish_failures
            .insert(name.to_string(), (times, message.to_string()));
    }

    fn take_failure(failures: &mut HashMap<String, (u32, String)>, name: &str) -> Option<String> {
        let (remaining, message) = failures.get_mut(name)?;
        if *remaining == 0 {
            return None;
        }
        *remaining -= 1;
        Some(message.clone())
    }
}

#[async_trait]
impl NotebookAutomation for FakeAutomation {
    async fn version(&self) -> Result<VersionInfo> {
        Ok(VersionInfo {
            version: "test".to_string(),
            one_note_installed: true,
            one_note_version: "16.0".to_string(),
        })
    }

    async fn list_notebooks(&self) -> Result<Vec<NotebookInfo>> {
        Ok(self.notebooks.clone())
    }

    async fn open_notebook(&self, job: &ExportJob) -> Result<OpenedHandle> {
        let name = job.target_name().to_string();
        self.log.lock().unwrap().push(Event::Open(name.clone()));

        let mut state = self.state.lock().unwrap();
        if let Some(message) = Self::take_failure(&mut state.open_failures, &name) {
            return Err(AutomationError::OpenFailed(message).into());
        }
        Ok(OpenedHandle::new(name))
    }

    async fn publish(&self, handle: &OpenedHandle, target: &Path, format_code: i32) -> Result<()> {
        let name = handle.hierarchy_id().to_string();
        self.log.lock().unwrap().push(Event::Publish(
            name.clone(),
            target.to_path_buf(),
            format_code,
        ));

        let script = {
            let mut state = self.state.lock().unwrap();
            if let Some(message) = Self::take_failure(&mut state.publish_failures, &name) {
                return Err(AutomationError::PublishRejected(message).into());
            }
            state.scripts.get(&name).cloned().unwrap_or_else(|| vec![None])
        };

        self.fs.script(target, script);
        Ok(())
    }
}

/// Everything a runner test needs
pub struct Harness {
    pub log: EventLog,
    pub fs: Arc<FakeFs>,
    pub automation: Arc<FakeAutomation>,
}

impl Harness {
    pub fn new() -> Self {
        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let fs = Arc::new(FakeFs::new(log.clone()));
        let automation = Arc::new(FakeAutomation::new(fs.clone(), log.clone()));
        Self {
            log,
            fs,
            automation,
        }
    }

    pub fn events(&self) -> Vec<Event> {
        events(&self.log)
    }
}

/// Local job writing a `.onepkg` into `/exports`
pub fn job(name: &str) -> ExportJob {
    job_with(name, LocationHint::Local, OutputKind::Onepkg)
}

pub fn job_with(name: &str, hint: LocationHint, kind: OutputKind) -> ExportJob {
    ExportJob::new(
        NotebookId::new(format!("{{{name}}}")).unwrap(),
        name,
        hint,
        "/exports",
        kind,
    )
    .unwrap()
}

/// `n` copies of `Some(size)`
pub fn repeat(size: u64, n: usize) -> Vec<Option<u64>> {
    vec![Some(size); n]
}
