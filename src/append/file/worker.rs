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

use std::fs::File;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::io::Write;
use std::sync::Arc;

use crossbeam_channel::Receiver;

use super::Task;
use crate::Error;
use crate::Trap;
use crate::error::ErrorKind;

pub(super) struct Worker {
    writer: BufWriter<File>,
    receiver: Receiver<Task>,
    trap: Arc<dyn Trap>,
}

impl Worker {
    pub(super) fn new(file: File, receiver: Receiver<Task>, trap: Arc<dyn Trap>) -> Self {
        Self {
            writer: BufWriter::new(file),
            receiver,
            trap,
        }
    }

    pub(super) fn run(mut self) {
        // one task at a time, in the order they were sent
        while let Ok(task) = self.receiver.recv() {
            match task {
                Task::Write(line) => {
                    if let Err(err) = self.writer.write_all(line.as_bytes()) {
                        let err = Error::new(ErrorKind::Append, "failed to write log line")
                            .with_source(err);
                        self.trap.trap(&err);
                    }
                    if self.receiver.is_empty() {
                        self.flush_or_trap();
                    }
                }
                Task::Flush(done) => {
                    let result = self.writer.flush().map_err(Error::from_io_error);
                    // the caller may have given up waiting
                    let _ = done.send(result);
                }
            }
        }

        // all senders are gone
        self.flush_or_trap();
    }

    fn flush_or_trap(&mut self) {
        if let Err(err) = self.writer.flush() {
            let err = Error::new(ErrorKind::Append, "failed to flush log file").with_source(err);
            self.trap.trap(&err);
        }
    }
}

pub(super) fn open(path: &std::path::Path) -> Result<File, Error> {
    OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|err| {
            Error::new(ErrorKind::Io, "failed to open log file")
                .with_context("path", path.display())
                .with_source(err)
        })
}
