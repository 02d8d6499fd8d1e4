use std::{
    borrow::Cow,
    env,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use log::{LevelFilter, debug, info, warn};

use crate::Tree;

/// One line of input, already split into command, key and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert { key: String, value: String },
    Find { key: String },
    Delete { key: String, value: String },
    Print,
    Quit,
}

impl Command {
    /// Splits `line` into command word, key and value. The command and key
    /// end at the next space; the value is the rest of the line and may hold
    /// spaces. Returns `None` for unknown commands and for commands missing
    /// their key or value.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let (key, value) = rest.split_once(' ').unwrap_or((rest, ""));

        match command {
            "insert" | "delete" if key.is_empty() || value.is_empty() => None,
            "insert" => Some(Command::Insert {
                key: key.to_string(),
                value: value.to_string(),
            }),
            "delete" => Some(Command::Delete {
                key: key.to_string(),
                value: value.to_string(),
            }),
            "find" if key.is_empty() => None,
            "find" => Some(Command::Find {
                key: key.to_string(),
            }),
            "print" => Some(Command::Print),
            "quit" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Settings for the `rbapp` binary, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
    /// A `RBAPP_LOG` value that did not name a level; reported once logging
    /// is up.
    pub rejected_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: LevelFilter::Warn,
            log_file: None,
            rejected_level: None,
        }
    }
}

impl AppConfig {
    pub const LEVEL_VAR: &'static str = "RBAPP_LOG";
    pub const FILE_VAR: &'static str = "RBAPP_LOG_FILE";

    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = AppConfig::default();
        if let Some(level) = var(Self::LEVEL_VAR) {
            match level.trim().parse::<LevelFilter>() {
                Ok(level) => config.log_level = level,
                Err(_) => config.rejected_level = Some(level),
            }
        }
        config.log_file = var(Self::FILE_VAR)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        config
    }
}

/// Reads commands line by line and applies them to a tree.
#[derive(Debug, Default)]
pub struct App {
    tree: Tree,
    done: bool,
}

impl App {
    pub fn new() -> Self {
        App::default()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Runs until `quit` or the end of `input`. `find` and `print` write to
    /// `output`. Bytes that are not UTF-8 are replaced with U+FFFD rather
    /// than ending the session.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, output: &mut W) -> io::Result<()> {
        let mut buf = Vec::new();
        while !self.done {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            if matches!(line, Cow::Owned(_)) {
                warn!("replaced invalid UTF-8 in {line:?}");
            }
            match Command::parse(&line) {
                Some(command) => self.execute(command, output)?,
                None => debug!("ignoring {line:?}"),
            }
        }
        info!("done, {} entries left", self.tree.len());
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, command: Command, output: &mut W) -> io::Result<()> {
        match command {
            Command::Insert { key, value } => self.tree.insert(key, value),
            Command::Find { key } => {
                for value in self.tree.find(&key) {
                    writeln!(output, "{key} {value}")?;
                }
            }
            Command::Delete { key, value } => {
                self.tree.delete(&key, &value);
            }
            Command::Print => self.tree.write_tree(output)?,
            Command::Quit => self.done = true,
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn insert(key: &str, value: &str) -> Option<Command> {
        Some(Command::Insert {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    #[test]
    fn parse_insert() {
        assert_eq!(insert("k", "v"), Command::parse("insert k v"));
        assert_eq!(insert("k", "a b  c"), Command::parse("insert k a b  c"));
        assert_eq!(insert("k", "v"), Command::parse("insert k v\r\n"));
        assert_eq!(None, Command::parse("insert k"));
        assert_eq!(None, Command::parse("insert k "));
        assert_eq!(None, Command::parse("insert"));
        assert_eq!(None, Command::parse("insert  v"));
    }

    #[test]
    fn parse_delete() {
        assert_eq!(
            Some(Command::Delete {
                key: "k".to_string(),
                value: "two words".to_string()
            }),
            Command::parse("delete k two words")
        );
        assert_eq!(None, Command::parse("delete k"));
    }

    #[test]
    fn parse_find_ignores_extra_words() {
        assert_eq!(
            Some(Command::Find {
                key: "k".to_string()
            }),
            Command::parse("find k whatever")
        );
        assert_eq!(None, Command::parse("find"));
        assert_eq!(None, Command::parse("find "));
    }

    #[test]
    fn parse_bare_commands() {
        assert_eq!(Some(Command::Print), Command::parse("print"));
        assert_eq!(Some(Command::Print), Command::parse("print now"));
        assert_eq!(Some(Command::Quit), Command::parse("quit"));
        assert_eq!(None, Command::parse(""));
        assert_eq!(None, Command::parse("Insert k v"));
        assert_eq!(None, Command::parse("frobnicate"));
    }

    #[test]
    fn config_defaults() {
        let config = AppConfig::from_vars(|_| None);
        assert_eq!(AppConfig::default(), config);
        assert_eq!(LevelFilter::Warn, config.log_level);
    }

    #[test]
    fn config_reads_vars() {
        let config = AppConfig::from_vars(|name| match name {
            AppConfig::LEVEL_VAR => Some("trace".to_string()),
            AppConfig::FILE_VAR => Some("/tmp/rbapp.log".to_string()),
            _ => None,
        });
        assert_eq!(LevelFilter::Trace, config.log_level);
        assert_eq!(Some(PathBuf::from("/tmp/rbapp.log")), config.log_file);
        assert_eq!(None, config.rejected_level);
    }

    #[test]
    fn config_rejects_bad_level() {
        let config = AppConfig::from_vars(|name| {
            (name == AppConfig::LEVEL_VAR).then(|| "loud".to_string())
        });
        assert_eq!(LevelFilter::Warn, config.log_level);
        assert_eq!(Some("loud".to_string()), config.rejected_level);
    }

    #[test]
    fn execute_commands() {
        let mut app = App::new();
        let mut out = Vec::new();
        app.execute(Command::parse("insert k v1").unwrap(), &mut out)
            .unwrap();
        app.execute(Command::parse("insert k v2").unwrap(), &mut out)
            .unwrap();
        app.execute(Command::parse("find k").unwrap(), &mut out)
            .unwrap();
        assert_eq!("k v1\nk v2\n", String::from_utf8(out).unwrap());

        let mut out = Vec::new();
        app.execute(Command::parse("delete k v1").unwrap(), &mut out)
            .unwrap();
        app.execute(Command::Quit, &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(1, app.tree().len());
        assert!(app.is_done());
    }
}
