use std::process::Command;

/// Output of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capture {
    pub text:      String,
    /// None when the process could not be spawned or was killed by a signal.
    pub exit_code: Option<i32>,
}

/// Runs external commands and hands back their output as text.
///
/// Never fails: a command that cannot be spawned produces an empty capture.
/// A non-zero exit status is not an error either, since smartctl sets status
/// bits on perfectly usable reports.
pub trait Runner {
    fn capture(&self, program: &str, args: &[&str], merge_stderr: bool) -> Capture;
}

/// The real thing, backed by `std::process::Command`.
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn capture(&self, program: &str, args: &[&str], merge_stderr: bool) -> Capture {
        let out = match Command::new(program).args(args).output() {
            Ok(o)  => o,
            Err(_) => return Capture::default(),
        };

        let mut text = String::from_utf8_lossy(&out.stdout).into_owned();
        if merge_stderr && !out.stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&String::from_utf8_lossy(&out.stderr));
        }
        Capture { text, exit_code: out.status.code() }
    }
}
