use {
    super::*,
    crossterm::{style::Stylize, tty::IsTty},
    std::io::Write,
};

impl<R, L, C> App<R, L, C> {
    /// prints a reading to standard output.
    ///
    /// terminals get it in color: red if the cpu was throttled, green otherwise.
    pub(crate) fn emit(reading: &Reading) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        let line = reading.to_string();

        if !stdout.is_tty() {
            return writeln!(stdout, "{line}");
        }

        let styled = if reading.is_throttled() {
            line.red()
        } else {
            line.green()
        };
        writeln!(stdout, "{styled}")
    }
}
