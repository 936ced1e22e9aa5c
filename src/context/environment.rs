//! Terminal facts gathered once at startup

/// Execution environment
#[derive(Debug, Clone)]
pub struct Environment {
    pub stdin_isatty: bool,
    pub stdout_isatty: bool,
    pub colors: bool,
    pub program_name: String,
}

impl Environment {
    /// Initialize the environment with Windows ANSI support
    pub fn init() -> Self {
        #[cfg(windows)]
        {
            let _ = crossterm::execute!(
                std::io::stdout(),
                crossterm::terminal::SetTitle("boomipulse")
            );
        }

        Self::default()
    }

    /// Turn colors off regardless of what the terminal supports
    pub fn without_colors(mut self) -> Self {
        self.colors = false;
        self
    }
}

impl Default for Environment {
    fn default() -> Self {
        let stdout_isatty = atty::is(atty::Stream::Stdout);
        Self {
            stdin_isatty: atty::is(atty::Stream::Stdin),
            stdout_isatty,
            colors: stdout_isatty && colors_allowed(std::env::var_os("NO_COLOR"), std::env::var("TERM").ok()),
            program_name: "boomipulse".to_string(),
        }
    }
}

/// `NO_COLOR` (any value) and `TERM=dumb` both disable colors
fn colors_allowed(no_color: Option<std::ffi::OsString>, term: Option<String>) -> bool {
    no_color.is_none() && term.as_deref() != Some("dumb")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_allowed() {
        assert!(colors_allowed(None, Some("xterm-256color".into())));
        assert!(colors_allowed(None, None));
        assert!(!colors_allowed(Some("1".into()), Some("xterm".into())));
        assert!(!colors_allowed(None, Some("dumb".into())));
    }

    #[test]
    fn test_without_colors() {
        let env = Environment::default().without_colors();
        assert!(!env.colors);
    }
}
