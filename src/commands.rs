/// Line-oriented command loop and the one-shot actions behind the CLI.
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::errors::SeeMouseResult;
use crate::executor::resolver::{ActionResolver, MouseAction};
use crate::perception::annotator::{element_table, save_annotated};
use crate::session::Session;

const HELP: &str = "Commands:
  click <text>       - Click on element containing text
  right <text>       - Right-click on element
  double <text>      - Double-click on element
  move <text>        - Move mouse to element
  find <text>        - Show the best-scoring candidates without acting
  show               - Refresh and write an annotated screenshot
  list               - Print the current element list
  refresh            - Refresh screen analysis
  help               - Show this help
  quit               - Exit";

/// How many candidates `find` prints.
const FIND_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Act(MouseAction, String),
    Find(String),
    Show,
    List,
    Refresh,
    Help,
    Quit,
    MissingTarget(String),
    Unknown(String),
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((v, r)) => (v, r.trim()),
            None => (line, ""),
        };

        let action = match verb {
            "click" => Some(MouseAction::Click),
            "right" => Some(MouseAction::Right),
            "double" => Some(MouseAction::Double),
            "move" => Some(MouseAction::Move),
            _ => None,
        };
        if let Some(action) = action {
            if rest.is_empty() {
                return Command::MissingTarget(verb.to_string());
            }
            return Command::Act(action, rest.to_string());
        }

        match verb {
            "find" if !rest.is_empty() => Command::Find(rest.to_string()),
            "find" => Command::MissingTarget(verb.to_string()),
            "show" => Command::Show,
            "list" => Command::List,
            "refresh" => Command::Refresh,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

pub struct Controller {
    session: Session,
    resolver: ActionResolver,
    annotate_dir: PathBuf,
}

impl Controller {
    pub fn new(session: Session, resolver: ActionResolver, annotate_dir: PathBuf) -> Self {
        Self {
            session,
            resolver,
            annotate_dir,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Refresh, match, act. `Ok(false)` means nothing matched.
    pub fn act_on(&mut self, target: &str, action: MouseAction, out: &mut dyn Write) -> SeeMouseResult<bool> {
        self.refresh(out)?;
        let Some(elem) = self.session.find(target).cloned() else {
            writeln!(out, "Could not find element matching: {target}")?;
            return Ok(false);
        };
        let (x, y) = elem.center();
        writeln!(out, "{}: {} at ({x}, {y})", action.verb(), elem.text)?;
        self.resolver.perform(&elem, action)?;
        Ok(true)
    }

    pub fn refresh(&mut self, out: &mut dyn Write) -> SeeMouseResult<()> {
        let count = self.session.refresh()?.len();
        writeln!(out, "Detected {count} UI elements")?;
        Ok(())
    }

    /// Refresh and write the overlay. Returns the image path.
    pub fn show(&mut self, out: &mut dyn Write) -> SeeMouseResult<PathBuf> {
        self.refresh(out)?;
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
        let path = self.annotate_dir.join(format!("seemouse-detections-{stamp}.png"));
        self.write_annotation(&path)?;
        writeln!(out, "{}", element_table(self.session.elements()))?;
        writeln!(out, "Annotated screenshot: {}", path.display())?;
        Ok(path)
    }

    pub fn write_annotation(&self, path: &std::path::Path) -> SeeMouseResult<()> {
        match self.session.last_frame() {
            Some(frame) => save_annotated(frame, self.session.elements(), path),
            None => Ok(()),
        }
    }

    pub fn find(&mut self, target: &str, out: &mut dyn Write) -> SeeMouseResult<()> {
        self.refresh(out)?;
        let selected = self.session.find(target).cloned();
        for (elem, score) in self.session.candidates(target).into_iter().take(FIND_LIMIT) {
            let marker = if selected.as_ref() == Some(elem) { "*" } else { " " };
            let (x, y) = elem.center();
            writeln!(
                out,
                "{marker} {score:.3}  {:<6} \"{}\" at ({x}, {y})",
                elem.node_type.as_str(),
                elem.text
            )?;
        }
        if selected.is_none() {
            writeln!(out, "Could not find element matching: {target}")?;
        }
        Ok(())
    }

    /// One command. `Ok(false)` ends the loop.
    pub fn execute(&mut self, cmd: Command, out: &mut dyn Write) -> SeeMouseResult<bool> {
        match cmd {
            Command::Act(action, target) => {
                self.act_on(&target, action, out)?;
            }
            Command::Find(target) => self.find(&target, out)?,
            Command::Show => {
                self.show(out)?;
            }
            Command::List => writeln!(out, "{}", element_table(self.session.elements()))?,
            Command::Refresh => self.refresh(out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(false),
            Command::MissingTarget(verb) => writeln!(out, "Usage: {verb} <text>")?,
            Command::Unknown(_) => writeln!(out, "Unknown command")?,
            Command::Empty => {}
        }
        Ok(true)
    }

    /// Read commands until `quit` or end of input. Failures inside a command
    /// are reported and the loop carries on.
    pub fn run_interactive(&mut self, input: &mut dyn BufRead, out: &mut dyn Write) -> SeeMouseResult<()> {
        writeln!(out, "\n=== seemouse ===")?;
        writeln!(out, "{HELP}\n")?;

        let mut line = String::new();
        loop {
            write!(out, "> ")?;
            out.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            let cmd = Command::parse(&line);
            tracing::debug!(?cmd, "command");
            match self.execute(cmd, out) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    tracing::error!(error = %e, "command failed");
                    writeln!(out, "Error: {e}")?;
                }
            }
        }
        Ok(())
    }
}
