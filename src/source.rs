use {
    chrono::{Local, NaiveDateTime},
    std::{
        cell::RefCell,
        collections::BTreeMap,
        fs::File,
        io::{self, Read},
        process::{Command, ExitStatus, Stdio},
        string::FromUtf8Error,
    },
    thiserror::Error,
};

pub use self::{clock::*, commands::*, load::*};


mod clock {
    use super::*;

    pub trait Clock {
        fn now(&self) -> NaiveDateTime;
    }

    /// the local wall clock.
    #[derive(Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> NaiveDateTime {
            Local::now().naive_local()
        }
    }

    /// a clock stopped at a fixed instant.
    #[allow(dead_code, reason = "this is a testing utility.")]
    pub struct FrozenClock(pub NaiveDateTime);

    impl Clock for FrozenClock {
        fn now(&self) -> NaiveDateTime {
            let Self(time) = self;
            *time
        }
    }
}

/// abstracts over spawning external utilities.
mod commands {
    use super::*;

    /// runs an external program to completion, capturing its standard output.
    pub trait CommandRunner {
        fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError>;
    }

    #[derive(Debug, Error)]
    pub enum CommandError {
        #[error("failed to spawn `{program}`: {source}")]
        Spawn {
            program: String,
            #[source]
            source: io::Error,
        },
        #[error("`{program}` exited unsuccessfully: {status}")]
        Status { program: String, status: ExitStatus },
        #[error("`{program}` wrote non-utf-8 output: {source}")]
        Utf8 {
            program: String,
            #[source]
            source: FromUtf8Error,
        },
    }

    /// spawns real processes.
    ///
    /// there is no timeout; a hung utility blocks the caller indefinitely.
    #[derive(Default)]
    pub struct SystemRunner;

    /// a single recorded call to a [`MockRunner`].
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct Invocation {
        pub program: String,
        pub args: Vec<String>,
    }

    /// a mock command runner.
    ///
    /// programs without canned output behave as though they are not installed.
    #[derive(Default)]
    #[allow(dead_code, reason = "this is a testing utility.")]
    pub struct MockRunner {
        outputs: BTreeMap<String, String>,
        calls: RefCell<Vec<Invocation>>,
    }

    // === impl SystemRunner ===

    impl CommandRunner for SystemRunner {
        fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
            tracing::debug!(program, ?args, "spawning command");

            let output = Command::new(program)
                .args(args)
                .stdin(Stdio::null())
                .stderr(Stdio::inherit())
                .output()
                .map_err(|source| CommandError::Spawn {
                    program: program.to_owned(),
                    source,
                })?;

            if !output.status.success() {
                return Err(CommandError::Status {
                    program: program.to_owned(),
                    status: output.status,
                });
            }

            String::from_utf8(output.stdout).map_err(|source| CommandError::Utf8 {
                program: program.to_owned(),
                source,
            })
        }
    }

    // === impl MockRunner ===

    impl CommandRunner for MockRunner {
        fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
            let Self { outputs, calls } = self;

            calls.borrow_mut().push(Invocation {
                program: program.to_owned(),
                args: args.iter().copied().map(str::to_owned).collect(),
            });

            outputs
                .get(program)
                .cloned()
                .ok_or_else(|| CommandError::Spawn {
                    program: program.to_owned(),
                    source: io::ErrorKind::NotFound.into(),
                })
        }
    }

    #[allow(dead_code, reason = "this is a testing utility.")]
    impl MockRunner {
        /// sets the output `program` will print.
        pub fn with(mut self, program: &str, stdout: &str) -> Self {
            self.outputs.insert(program.to_owned(), stdout.to_owned());
            self
        }

        /// returns the calls made so far.
        pub fn calls(&self) -> Vec<Invocation> {
            self.calls.borrow().clone()
        }

        /// returns the calls made to `program`.
        pub fn calls_to(&self, program: &str) -> Vec<Invocation> {
            self.calls
                .borrow()
                .iter()
                .filter(|call| call.program == program)
                .cloned()
                .collect()
        }
    }
}

/// abstracts over providers of the load average.
mod load {
    use super::*;

    /// a source of the system load average.
    pub trait LoadSource {
        /// returns a reader.
        fn open(&self) -> io::Result<impl Read>;
    }

    /// load average backed by `/proc/loadavg`.
    #[derive(Default)]
    pub struct ProcLoadAvg;

    /// a fixed `/proc/loadavg` body.
    #[allow(dead_code, reason = "this is a testing utility.")]
    pub struct MockLoadAvg(String);

    // === impl ProcLoadAvg ===

    impl LoadSource for ProcLoadAvg {
        fn open(&self) -> io::Result<impl Read> {
            File::open(Self::LOADAVG)
        }
    }

    impl ProcLoadAvg {
        const LOADAVG: &str = "/proc/loadavg";
    }

    // === impl MockLoadAvg ===

    impl LoadSource for MockLoadAvg {
        fn open(&self) -> io::Result<impl Read> {
            let Self(contents) = self;
            Ok(contents.as_bytes())
        }
    }

    #[allow(dead_code, reason = "this is a testing utility.")]
    impl MockLoadAvg {
        pub fn new(contents: &str) -> Self {
            Self(contents.to_owned())
        }
    }
}
