use crate::{
    record::Reading,
    source::{CommandError, CommandRunner},
};

/// raises desktop notifications through `notify-send(1)`.
pub struct Notifier<'a, R> {
    runner: &'a R,
    title: &'a str,
}

// === impl Notifier ===

impl<'a, R: CommandRunner> Notifier<'a, R> {
    pub fn new(runner: &'a R, title: &'a str) -> Self {
        Self { runner, title }
    }

    /// alerts the user that the cpu was throttled.
    pub fn throttled(&self, reading: &Reading) -> Result<(), CommandError> {
        let Self { runner, title } = self;

        let body = Self::body(reading);
        tracing::debug!(%body, "raising notification");
        runner.run("notify-send", &[*title, body.as_str()]).map(drop)
    }

    fn body(
        Reading {
            core0_temp,
            core1_temp,
            system_load,
            ..
        }: &Reading,
    ) -> String {
        format!("core0temp: {core0_temp:.1}, core1temp: {core1_temp:.1}, load: {system_load}")
    }
}
