//! 콘솔 리포터 포트 구현 어댑터.
//! 진행 상황은 stderr로 내보낸다. stdout은 결과 본문/JSON 전용이다.

use std::io::{self, IsTerminal, Write};

use crate::application::ports::Reporter;

/// 콘솔 전용 리포터 어댑터.
pub struct ConsoleReporter {
    colored: bool,
    quiet: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ConsoleReporter {
    /// `quiet`이면 진행 출력을 모두 생략한다.
    pub fn new(quiet: bool) -> Self {
        Self {
            colored: io::stderr().is_terminal(),
            quiet,
        }
    }

    fn emit(&self, line: &str) {
        if self.quiet {
            return;
        }
        let _ = writeln!(io::stderr().lock(), "{line}");
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, name: &str) {
        if self.colored {
            self.emit(&format!("\n\x1b[1m== {name} ==\x1b[0m"));
        } else {
            self.emit(&format!("\n== {name} =="));
        }
    }

    fn kv(&self, key: &str, value: &str) {
        self.emit(&format!("{key:<12}: {value}"));
    }

    fn status(&self, scope: &str, message: &str) {
        if self.colored {
            self.emit(&format!("[{}] {message}", colorize_scope(scope)));
        } else {
            self.emit(&format!("[{scope:<8}] {message}"));
        }
    }
}

fn colorize_scope(scope: &str) -> String {
    match scope {
        "error" => format!("\x1b[31m{scope:<8}\x1b[0m"),
        "done" => format!("\x1b[32m{scope:<8}\x1b[0m"),
        _ => format!("\x1b[33m{scope:<8}\x1b[0m"),
    }
}
