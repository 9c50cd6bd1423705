// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::Sender;

use super::Task;
use super::worker;
use super::worker::Worker;
use crate::Error;
use crate::Layout;
use crate::Trap;
use crate::append::Append;
use crate::error::ErrorKind;
use crate::event::Event;
use crate::layout::BasicLayout;
use crate::trap::DefaultTrap;

/// A builder to configure and create a [`FileAppender`].
#[derive(Debug)]
pub struct FileAppenderBuilder {
    path: PathBuf,
    layout: Box<dyn Layout>,
    trap: Box<dyn Trap>,
    thread_name: String,
}

impl FileAppenderBuilder {
    /// Create a new builder for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            layout: Box::new(BasicLayout::default()),
            trap: Box::new(DefaultTrap::default()),
            thread_name: "logtrellis-file".to_string(),
        }
    }

    /// Set the layout for the logs.
    ///
    /// Default to [`BasicLayout`].
    ///
    /// # Examples
    ///
    /// ```
    /// use logtrellis::append::FileAppenderBuilder;
    /// use logtrellis::layout::MessagePassThroughLayout;
    ///
    /// let builder = FileAppenderBuilder::new("my_service.log");
    /// builder.layout(MessagePassThroughLayout::default());
    /// ```
    pub fn layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Set the trap for errors raised by the background writer.
    ///
    /// Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Set the name of the background writer thread.
    pub fn thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }

    /// Open the file in append mode and start the background writer.
    ///
    /// # Errors
    ///
    /// Return an error if the file cannot be opened or the writer thread cannot be spawned.
    pub fn build(self) -> Result<FileAppender, Error> {
        let FileAppenderBuilder {
            path,
            layout,
            trap,
            thread_name,
        } = self;

        let file = worker::open(&path)?;
        let trap: Arc<dyn Trap> = Arc::from(trap);

        // unbounded, append never blocks
        let (sender, receiver) = crossbeam_channel::unbounded();
        let worker = Worker::new(file, receiver, trap.clone());
        let handle = std::thread::Builder::new()
            .name(thread_name)
            .spawn(move || worker.run())
            .map_err(|err| {
                Error::new(ErrorKind::Io, "failed to spawn file writer thread").with_source(err)
            })?;

        Ok(FileAppender {
            path,
            layout,
            state: FileState(Some(State {
                sender,
                handle,
                trap,
            })),
        })
    }
}

/// Create a [`FileAppender`] for `path`, with [`BasicLayout`] unless another layout is given.
///
/// Call [`crate::flush`] before exiting when the appender is registered in the default context;
/// see [`FileAppender`].
pub fn file_appender(
    path: impl Into<PathBuf>,
    layout: Option<Box<dyn Layout>>,
) -> Result<FileAppender, Error> {
    let builder = FileAppenderBuilder::new(path);
    match layout {
        Some(layout) => builder.layout(layout).build(),
        None => builder.build(),
    }
}

/// An appender that writes log events to a file.
///
/// [`append`](Append::append) renders the event, terminates it with a newline and queues it.
/// A single background thread owns the file handle and writes queued lines one at a time, so
/// lines reach the file in the order `append` was called and never interleave.
///
/// [`flush`](Append::flush) blocks until every line queued before the call has been written.
/// Dropping the appender drains the queue and joins the background thread.
///
/// Several appenders may target the same path. Their writes are not coordinated with each other.
///
/// The [default context](crate::default_context) is never dropped. Lines still queued in an
/// appender registered there are lost when the process exits, unless [`crate::flush`] is called
/// before returning from `main`.
#[derive(Debug)]
pub struct FileAppender {
    path: PathBuf,
    layout: Box<dyn Layout>,
    state: FileState,
}

impl FileAppender {
    /// The path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Append for FileAppender {
    fn append(&self, event: &Event) -> Result<(), Error> {
        let mut line = self.layout.format(event)?;
        line.push('\n');
        self.state.send(Task::Write(line))
    }

    fn flush(&self) -> Result<(), Error> {
        let (done, wait) = oneshot::channel();
        self.state.send(Task::Flush(done))?;
        match wait.recv() {
            Ok(result) => result,
            Err(_) => Err(Error::new(
                ErrorKind::Append,
                "file writer stopped before flushing",
            )),
        }
    }
}

#[derive(Debug)]
struct FileState(Option<State>);

#[derive(Debug)]
struct State {
    sender: Sender<Task>,
    handle: JoinHandle<()>,
    trap: Arc<dyn Trap>,
}

impl FileState {
    fn send(&self, task: Task) -> Result<(), Error> {
        let Some(State { sender, .. }) = self.0.as_ref() else {
            return Err(Error::new(ErrorKind::Append, "file appender is closed"));
        };

        sender.send(task).map_err(|err| {
            Error::new(
                ErrorKind::Append,
                match err.0 {
                    Task::Write(_) => "failed to queue log line",
                    Task::Flush(_) => "failed to queue flush",
                },
            )
        })
    }
}

impl Drop for FileState {
    fn drop(&mut self) {
        if let Some(State {
            sender,
            handle,
            trap,
        }) = self.0.take()
        {
            // drop our sender, the worker drains the queue and breaks the loop
            drop(sender);

            if handle.join().is_err() {
                trap.trap(&Error::new(ErrorKind::Append, "file writer thread panicked"));
            }
        }
    }
}
