//! UI collaborator traits and their terminal implementation.
//!
//! The core flows are written against these traits only; tests drive them
//! with scripted doubles instead of a real terminal.

use crate::roster::{student_listing, ClassData};
use crate::text;
use anyhow::{bail, Context};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Plain text console: output, line input, screen clearing, pausing.
pub trait Console {
    fn print_line(&mut self, text: &str);

    /// Prints `prompt` without a newline and returns one line of input with
    /// surrounding whitespace removed.
    fn prompt(&mut self, prompt: &str) -> anyhow::Result<String>;

    /// Scrolls previous output away by printing blank lines.
    fn clear_screen(&mut self, lines: usize);

    /// Blocks so the user can read what is on screen.
    fn pause(&mut self, duration: Duration);
}

/// Interactive steps of class creation.
pub trait RosterUi {
    /// Asks for a class name until the reply is usable and returns it in
    /// directory-safe form.
    fn class_name_input(&mut self) -> anyhow::Result<String>;

    /// Collects the initial roster for a new class.
    fn compose_roster(&mut self, class_name: &str) -> anyhow::Result<ClassData>;

    /// Shows the created roster back to the user.
    fn roster_feedback(&mut self, class_name: &str, data: &ClassData);
}

/// Folder selection dialogue.
pub trait FolderPicker {
    /// Returns the chosen folder, or `None` when the user cancels.
    fn pick_folder(&mut self, title: &str, start_dir: &Path) -> Option<PathBuf>;
}

/// Stdin/stdout implementation used by the interactive shell.
#[derive(Debug, Default)]
pub struct Terminal;

impl Console for Terminal {
    fn print_line(&mut self, text: &str) {
        println!("{text}");
    }

    fn prompt(&mut self, prompt: &str) -> anyhow::Result<String> {
        print!("{prompt}");
        io::stdout().flush().context("failed to flush stdout")?;
        let mut line = String::new();
        let read = io::stdin()
            .read_line(&mut line)
            .context("failed to read stdin")?;
        if read == 0 {
            bail!("input ended");
        }
        Ok(line.trim().to_string())
    }

    fn clear_screen(&mut self, lines: usize) {
        print!("{}", "\n".repeat(lines));
    }

    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl RosterUi for Terminal {
    fn class_name_input(&mut self) -> anyhow::Result<String> {
        loop {
            let reply = self.prompt("Please enter a name for the class: ")?;
            if text::is_essentially_blank(&reply) {
                self.print_line("Class name must contain at least one letter or number.");
                continue;
            }
            return Ok(text::sanitize_class_name(&reply));
        }
    }

    fn compose_roster(&mut self, class_name: &str) -> anyhow::Result<ClassData> {
        self.print_line(&format!("Enter student names for {class_name}, one per line."));
        self.print_line("Leave the name blank to finish.");
        let mut data = ClassData::new();
        loop {
            let reply = self.prompt("Student name: ")?;
            if text::is_essentially_blank(&reply) {
                break;
            }
            data.add_student(text::scrub_input(&reply));
        }
        Ok(data)
    }

    fn roster_feedback(&mut self, class_name: &str, data: &ClassData) {
        self.print_line(&format!("Created class: {class_name}"));
        if data.is_empty() {
            self.print_line("No students entered.");
            return;
        }
        for (index, student) in student_listing(data) {
            self.print_line(&format!("{index}. {student}"));
        }
    }
}

impl FolderPicker for Terminal {
    fn pick_folder(&mut self, title: &str, start_dir: &Path) -> Option<PathBuf> {
        self.print_line(title);
        let reply = self
            .prompt(&format!(
                "Folder path (blank to cancel) [{}]: ",
                start_dir.display()
            ))
            .ok()?;
        if reply.is_empty() {
            return None;
        }
        let chosen = PathBuf::from(reply);
        if chosen.is_absolute() {
            Some(chosen)
        } else {
            Some(start_dir.join(chosen))
        }
    }
}
