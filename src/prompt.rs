//! Line-oriented interactive layer: user selection and the review loop.

use crate::domain::{Outcome, TaskId, Timestamp};
use crate::persistence::{create_user, list_users};
use crate::scheduler::Agenda;
use crate::session::Session;
use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::io::{BufRead, Write};
use std::path::Path;

/// Reads answers from `input` and writes prompts to `output`
pub struct Prompter<R, W> {
    input: R,
    output: W,
    clear: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// `clear` enables screen clearing between screens (only useful on a terminal)
    pub fn new(input: R, output: W, clear: bool) -> Self {
        Self { input, output, clear }
    }

    /// Print `message` and read one trimmed line; `None` at end of input
    pub fn ask(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    pub fn clear_screen(&mut self) -> Result<()> {
        if self.clear {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Pick an existing user or create a new one. `None` when the user quits.
pub fn select_user<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, data_dir: &Path) -> Result<Option<String>> {
    let users = list_users(data_dir)?;

    prompter.clear_screen()?;
    let choices = if users.is_empty() {
        prompter.say("no user files found")?;
        "enter your choice [(a)dd new user | (q)uit]: "
    } else {
        prompter.say("select user:")?;
        for (i, user) in users.iter().enumerate() {
            prompter.say(&format!("{} {}", i + 1, user))?;
        }
        "enter your choice [<sno> | (a)dd new user | (q)uit]: "
    };

    loop {
        let Some(answer) = prompter.ask(choices)? else {
            return Ok(None);
        };
        match answer.as_str() {
            "q" => return Ok(None),
            "a" => {
                let Some(name) = prompter.ask("enter user name: ")? else {
                    return Ok(None);
                };
                match create_user(data_dir, &name) {
                    Ok(_) => return Ok(Some(name.trim().to_string())),
                    Err(e) => prompter.say(&format!("{}", e))?,
                }
            }
            other => match other.parse::<usize>() {
                Ok(n) if n >= 1 && n <= users.len() => return Ok(Some(users[n - 1].clone())),
                _ => prompter.say(&format!("invalid choice: {}", other))?,
            },
        }
    }
}

/// Print due tasks (numbered) and upcoming tasks
pub fn render_agenda<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, user: &str, agenda: &Agenda<'_>) -> Result<()> {
    if agenda.due.is_empty() {
        prompter.say(&format!("no tasks due for {}", user))?;
    } else {
        prompter.say(&format!("tasks due for {}:", user))?;
        for (i, entry) in agenda.due.iter().enumerate() {
            prompter.say(&format!("{}. {}", i + 1, entry.task.description()))?;
        }
    }

    if !agenda.upcoming.is_empty() {
        prompter.say("upcoming:")?;
        for entry in &agenda.upcoming {
            prompter.say(&format!(
                "   {} (due {})",
                entry.task.description(),
                entry.due_at.format("%Y-%m-%d %H:%M")
            ))?;
        }
    }
    Ok(())
}

/// Run the review loop until the user quits or input ends.
///
/// Every change is saved immediately and the file reloaded, so the screen
/// always reflects what is on disk.
pub fn run_session<R, W, C>(prompter: &mut Prompter<R, W>, session: &mut Session, now: C) -> Result<()>
where
    R: BufRead,
    W: Write,
    C: Fn() -> Timestamp,
{
    loop {
        prompter.clear_screen()?;
        for comment in &session.comments {
            prompter.say(comment)?;
        }

        let due: Vec<(TaskId, String)> = {
            let agenda = session.agenda(now());
            render_agenda(prompter, &session.user, &agenda)?;
            agenda.due.iter().map(|e| (e.id, e.task.description())).collect()
        };

        match next_action(prompter, session, &due, &now)? {
            Step::Changed => {
                session.save(now())?;
                session.reload()?;
            }
            Step::Unchanged => {}
            Step::Quit => return Ok(()),
        }
    }
}

enum Step {
    Changed,
    Unchanged,
    Quit,
}

fn next_action<R, W, C>(
    prompter: &mut Prompter<R, W>,
    session: &mut Session,
    due: &[(TaskId, String)],
    now: &C,
) -> Result<Step>
where
    R: BufRead,
    W: Write,
    C: Fn() -> Timestamp,
{
    loop {
        let Some(answer) = prompter.ask("select task [<sno> | (a)dd new task | (q)uit]: ")? else {
            return Ok(Step::Quit);
        };

        match answer.as_str() {
            "q" => return Ok(Step::Quit),
            "a" => return add_task(prompter, session, now),
            other => {
                let selected = other
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n >= 1 && *n <= due.len())
                    .map(|n| &due[n - 1]);
                let Some((id, description)) = selected else {
                    prompter.say(&format!("incorrect choice: {}", other))?;
                    continue;
                };

                prompter.say(&format!("updating task: {}", description))?;
                let Some(answer) = prompter.ask("how did it go? (g)ood, (b)ad, (d)elete task, (q)uit: ")? else {
                    return Ok(Step::Quit);
                };
                if answer == "q" {
                    return Ok(Step::Quit);
                }
                let Some(outcome) = Outcome::from_key(&answer) else {
                    prompter.say(&format!("unknown option: {}", answer))?;
                    continue;
                };

                if outcome == Outcome::Delete {
                    let confirm = prompter.ask("are you sure? (y)es delete, (n)o cancel: ")?;
                    if confirm.as_deref() != Some("y") {
                        continue;
                    }
                }

                let task = session.review(*id, outcome, now())?;
                if outcome == Outcome::Delete {
                    prompter.say(&format!("deleted: {}", task.description()))?;
                }
                return Ok(Step::Changed);
            }
        }
    }
}

fn add_task<R, W, C>(prompter: &mut Prompter<R, W>, session: &mut Session, now: &C) -> Result<Step>
where
    R: BufRead,
    W: Write,
    C: Fn() -> Timestamp,
{
    prompter.say("add new task:")?;

    let subjects = session.tasks.subjects();
    for (i, subject) in subjects.iter().enumerate() {
        prompter.say(&format!("{} {}", i + 1, subject))?;
    }
    let question = if subjects.is_empty() {
        "enter subject: "
    } else {
        "enter subject [<sno> | new subject]: "
    };

    let Some(answer) = prompter.ask(question)? else {
        return Ok(Step::Quit);
    };
    let subject = match answer.parse::<usize>() {
        Ok(n) if n >= 1 && n <= subjects.len() => subjects[n - 1].clone(),
        _ => answer,
    };

    let Some(name) = prompter.ask("enter task name: ")? else {
        return Ok(Step::Quit);
    };
    match session.add(&subject, &name, now()) {
        Ok(_) => Ok(Step::Changed),
        Err(e) => {
            prompter.say(&format!("{}", e))?;
            Ok(Step::Unchanged)
        }
    }
}
